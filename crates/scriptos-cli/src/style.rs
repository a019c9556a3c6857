//! Style DNA command handlers.

use clap::Subcommand;
use scriptos_core::StyleProfile;
use scriptos_studio::Studio;

use crate::clip;

/// Sub-commands available under `style`.
#[derive(Debug, Subcommand)]
pub enum StyleCommands {
    /// Decode a Style DNA profile from a URL, channel name or sample text
    Decode {
        input: String,
        /// Treat the input as a channel identifier and analyse the channel's own data
        #[arg(long)]
        channel: bool,
    },
    /// List stored profiles
    List,
}

pub(crate) async fn run(studio: &Studio, command: StyleCommands) -> anyhow::Result<()> {
    match command {
        StyleCommands::Decode { input, channel } => {
            let profile = studio.decode_style(&input, channel).await?;
            print_profile(&profile);
            if profile.is_error() {
                anyhow::bail!("style decode failed; nothing was saved");
            }
            println!();
            println!("saved as {}", profile.id);
        }
        StyleCommands::List => {
            let styles = studio.styles()?;
            println!("{:<38}{:<28}TONE", "ID", "NAME");
            for style in &styles {
                println!(
                    "{:<38}{:<28}{}",
                    style.id,
                    clip(&style.name, 24),
                    clip(&style.tone, 50)
                );
            }
        }
    }
    Ok(())
}

fn print_profile(profile: &StyleProfile) {
    println!("{}", profile.name);
    println!("Tone:       {}", profile.tone);
    println!("Structure:  {}", profile.structure);
    println!("Audio:      {}", profile.audio_signature);
    println!();
    println!("{}", profile.description);
}
