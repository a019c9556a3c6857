//! Line-oriented co-pilot conversation over stdin.

use scriptos_core::{ChatMessage, ChatRole};
use scriptos_studio::Studio;
use tokio::io::{AsyncBufReadExt, BufReader};

const EXIT_WORDS: [&str; 3] = ["exit", "quit", "/q"];

pub(crate) async fn run_chat(studio: &Studio) -> anyhow::Result<()> {
    let greeting = studio.chat_greeting();
    println!("{greeting}");
    let mut history = vec![ChatMessage::new(ChatRole::Model, greeting)];

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let message = line.trim();
        if message.is_empty() {
            continue;
        }
        if is_exit(message) {
            break;
        }

        let reply = match studio.chat(&history, message).await {
            Ok(reply) => reply,
            Err(e) => {
                tracing::error!(error = %e, turns = history.len(), "chat turn failed");
                return Err(e.into());
            }
        };
        println!();
        println!("{reply}");
        println!();
        history.push(ChatMessage::new(ChatRole::User, message));
        history.push(ChatMessage::new(ChatRole::Model, reply));
    }
    tracing::info!(turns = history.len(), "chat session ended");
    Ok(())
}

pub(crate) fn is_exit(message: &str) -> bool {
    EXIT_WORDS.iter().any(|w| message.eq_ignore_ascii_case(w))
}
