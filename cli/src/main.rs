//! PhotoDuel CLI
//!
//! Interactive runner for the contest engine: presents one duel at a time,
//! records verdicts, and prints the ranked leaderboard when the round-robin
//! is exhausted. Progress persists between runs; quitting mid-contest is
//! always safe.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use photoduel_engine::adapters::fs::{FsStateStore, JsonPhotoStore};
use photoduel_engine::domain::ports::{ConfirmPrompt, PhotoStore};
use photoduel_engine::{
    ContestError, ContestService, ContestState, MatchSide, PhotoId, ResolveOutcome,
};

mod config;
mod prompt;

use config::Config;
use prompt::StdinPrompt;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    let photos = Arc::new(JsonPhotoStore::new(&config.library_path));
    let store = Arc::new(FsStateStore::new(&config.state_dir));
    let service = ContestService::new(photos.clone(), store);
    let prompt = StdinPrompt;

    let names: HashMap<PhotoId, String> = photos
        .list()
        .await?
        .into_iter()
        .map(|p| (p.id, p.name))
        .collect();

    let mut state = match service.resume().await? {
        Some(state) if !state.phase.is_terminal() => {
            let resume = prompt
                .confirm(
                    "Contest in progress",
                    &format!(
                        "{} of {} duels resolved. Resume it?",
                        state.history.len(),
                        state.max_qualifying_matches()
                    ),
                )
                .await;
            if resume {
                state
            } else if prompt
                .confirm("Discard contest", "Throw the saved contest away and start over?")
                .await
            {
                service.restart().await?;
                start_or_exit(&service).await?
            } else {
                state
            }
        }
        Some(state) => {
            println!("\nLast contest results:");
            print_ranking(&state, &names);
            if !prompt
                .confirm("Contest finished", "Start a new contest?")
                .await
            {
                return Ok(());
            }
            service.restart().await?;
            start_or_exit(&service).await?
        }
        None => start_or_exit(&service).await?,
    };

    run_duels(&service, &mut state, &names).await?;

    if state.phase.is_terminal() {
        if let Some(champion) = state.champion() {
            println!("\nChampion: {}", display_name(&names, champion));
        }
        print_ranking(&state, &names);
    } else {
        println!(
            "\nProgress saved ({} of {} duels). Run again to continue.",
            state.history.len(),
            state.max_qualifying_matches()
        );
    }
    Ok(())
}

/// Start a contest, exiting cleanly when the library has too few five-star
/// photos to make one.
async fn start_or_exit(
    service: &ContestService<JsonPhotoStore, FsStateStore>,
) -> anyhow::Result<ContestState> {
    match service.start().await {
        Ok(state) => {
            println!(
                "\nContest started: {} photos, {} duels ahead.",
                state.participant_count(),
                state.max_qualifying_matches()
            );
            Ok(state)
        }
        Err(ContestError::InsufficientParticipants { found, need }) => {
            eprintln!("Not enough five-star photos for a contest (found {found}, need {need}).");
            std::process::exit(1);
        }
        Err(err) => Err(err.into()),
    }
}

async fn run_duels(
    service: &ContestService<JsonPhotoStore, FsStateStore>,
    state: &mut ContestState,
    names: &HashMap<PhotoId, String>,
) -> anyhow::Result<()> {
    let mut input = BufReader::new(tokio::io::stdin()).lines();
    let mut out = tokio::io::stdout();

    while let Some((a, b)) = state.pending_match() {
        let banner = format!(
            "\nDuel {} of {}:\n  [a] {}\n  [b] {}\nWinner? [a/b, q to quit]: ",
            state.history.len() + 1,
            state.max_qualifying_matches(),
            display_name(names, a),
            display_name(names, b),
        );
        out.write_all(banner.as_bytes()).await?;
        out.flush().await?;

        let Some(line) = input.next_line().await? else {
            break;
        };
        let side = match line.trim().to_lowercase().as_str() {
            "a" => MatchSide::A,
            "b" => MatchSide::B,
            "q" | "quit" => break,
            _ => {
                println!("Please answer a, b, or q.");
                continue;
            }
        };

        match service.resolve(state, side).await? {
            ResolveOutcome::NextMatch(record) | ResolveOutcome::Finished(record) => {
                println!(
                    "{} wins ({:+} rating)",
                    display_name(names, record.winner),
                    record.winner_delta
                );
            }
            ResolveOutcome::Rescheduled => {}
        }
    }
    Ok(())
}

fn display_name(names: &HashMap<PhotoId, String>, id: PhotoId) -> String {
    names
        .get(&id)
        .cloned()
        .unwrap_or_else(|| id.to_string())
}

fn print_ranking(state: &ContestState, names: &HashMap<PhotoId, String>) {
    println!("\n  #  Score  Tier             W-L    Photo");
    for entry in state.ranking() {
        println!(
            "{:>3}  {:>5}  {} {:<12} {:>3}-{:<3}  {}",
            entry.rank,
            entry.score,
            entry.tier.icon(),
            entry.tier.label(),
            entry.wins,
            entry.losses,
            display_name(names, entry.id),
        );
    }
}
