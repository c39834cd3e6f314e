use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use photoduel_engine::domain::ports::ConfirmPrompt;

/// Yes/no confirmation on the terminal. Anything other than an explicit yes
/// counts as no.
pub struct StdinPrompt;

#[async_trait]
impl ConfirmPrompt for StdinPrompt {
    async fn confirm(&self, title: &str, message: &str) -> bool {
        let mut out = tokio::io::stdout();
        let banner = format!("\n{title}\n{message} [y/N]: ");
        if out.write_all(banner.as_bytes()).await.is_err() || out.flush().await.is_err() {
            return false;
        }

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        match lines.next_line().await {
            Ok(Some(line)) => matches!(line.trim().to_lowercase().as_str(), "y" | "yes"),
            _ => false,
        }
    }
}
