//! Script wizard and production board command handlers.

use std::path::{Path, PathBuf};

use base64::Engine;
use clap::Subcommand;
use scriptos_core::{ReferenceType, Script, ScriptReference, ScriptStatus, TitleVariant};
use scriptos_studio::{RemixMode, ScriptDraft, Studio};

use crate::clip;

/// Sub-commands available under `script`.
#[derive(Debug, Subcommand)]
pub enum ScriptCommands {
    /// Write a new script and place it in the IDEA column
    New {
        topic: String,
        /// Chosen video title (defaults to the topic)
        #[arg(long)]
        title: Option<String>,
        /// Style DNA id (defaults to the first stored style)
        #[arg(long)]
        style: Option<String>,
        /// Target duration, e.g. "Short (3-5 min)"
        #[arg(long)]
        duration: Option<String>,
        /// Research notes or facts to build on
        #[arg(long)]
        context: Option<String>,
        /// Link to use as a reference (repeatable)
        #[arg(long = "url")]
        urls: Vec<String>,
        /// Local file to attach as research material (repeatable)
        #[arg(long = "file")]
        files: Vec<PathBuf>,
    },
    /// List stored scripts
    List {
        /// Only show scripts in this column
        #[arg(long)]
        status: Option<ScriptStatus>,
    },
    /// Print a script with its metrics
    Show { id: String },
    /// Rewrite a script for retention or controversy
    Remix {
        id: String,
        #[arg(long, default_value = "RETENTION")]
        mode: RemixMode,
    },
    /// Score a script's viral potential
    Analyze { id: String },
    /// Move a script to the next board column
    Advance { id: String },
    /// Move a script to a specific board column
    Status { id: String, status: ScriptStatus },
    /// Delete a script
    Delete { id: String },
    /// Write a script as Markdown
    Export {
        id: String,
        /// Target directory
        #[arg(long, default_value = ".")]
        dir: PathBuf,
    },
}

pub(crate) async fn run(studio: &Studio, command: ScriptCommands) -> anyhow::Result<()> {
    match command {
        ScriptCommands::New {
            topic,
            title,
            style,
            duration,
            context,
            urls,
            files,
        } => {
            let mut references: Vec<ScriptReference> =
                urls.iter().map(|url| url_reference(url)).collect();
            for path in &files {
                references.push(file_reference(path)?);
            }
            for (i, reference) in references.iter_mut().enumerate() {
                reference.id = format!("ref-{}", i + 1);
            }
            let draft = ScriptDraft {
                selected_title: title.map(|title| TitleVariant {
                    title,
                    psychology: String::new(),
                    score: 0.0,
                }),
                style_id: style,
                duration,
                context,
                references,
                ..ScriptDraft::new(topic)
            };
            let script = studio.create_script(draft).await?;
            print_script(&script);
        }
        ScriptCommands::List { status } => {
            let scripts: Vec<Script> = studio
                .scripts()?
                .into_iter()
                .filter(|s| status.is_none_or(|wanted| s.status == wanted))
                .collect();
            if scripts.is_empty() {
                println!("no scripts found; run `script new` first");
                return Ok(());
            }
            println!("{:<38}{:<11}TITLE", "ID", "STATUS");
            for script in &scripts {
                println!(
                    "{:<38}{:<11}{}",
                    script.id,
                    script.status.as_str(),
                    clip(&script.title, 60)
                );
            }
        }
        ScriptCommands::Show { id } => print_script(&studio.script(&id)?),
        ScriptCommands::Remix { id, mode } => {
            let script = studio.remix_script(&id, mode).await?;
            println!("{}", script.content);
        }
        ScriptCommands::Analyze { id } => {
            let script = studio.analyze_script(&id).await?;
            print_script(&script);
        }
        ScriptCommands::Advance { id } => {
            let script = studio.advance_script(&id)?;
            println!("{} is now {}", script.id, script.status.as_str());
        }
        ScriptCommands::Status { id, status } => {
            let script = studio.set_script_status(&id, status)?;
            println!("{} is now {}", script.id, script.status.as_str());
        }
        ScriptCommands::Delete { id } => {
            studio.delete_script(&id)?;
            println!("deleted {id}");
        }
        ScriptCommands::Export { id, dir } => {
            let path = studio.export_script(&id, &dir)?;
            tracing::info!(script_id = %id, path = %path.display(), "script exported");
            println!("wrote {}", path.display());
        }
    }
    Ok(())
}

/// Classifies a link as a channel, a video or a plain web reference.
pub(crate) fn url_reference(url: &str) -> ScriptReference {
    let lower = url.to_ascii_lowercase();
    let kind = if lower.contains("youtube.com/@") || lower.contains("youtube.com/channel/") {
        ReferenceType::YoutubeChannel
    } else if lower.contains("youtube.com/") || lower.contains("youtu.be/") {
        ReferenceType::YoutubeVideo
    } else {
        ReferenceType::Url
    };
    ScriptReference {
        id: String::new(),
        kind,
        data: url.to_string(),
        mime_type: None,
        title: url.to_string(),
    }
}

/// Reads a local file into a base64 `File` reference.
pub(crate) fn file_reference(path: &Path) -> anyhow::Result<ScriptReference> {
    let bytes = std::fs::read(path)
        .map_err(|e| anyhow::anyhow!("cannot read {}: {e}", path.display()))?;
    let title = path
        .file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
    Ok(ScriptReference {
        id: String::new(),
        kind: ReferenceType::File,
        data: base64::engine::general_purpose::STANDARD.encode(bytes),
        mime_type: Some(mime_for(path).to_string()),
        title,
    })
}

pub(crate) fn mime_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("pdf") => "application/pdf",
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("webp") => "image/webp",
        Some("md") => "text/markdown",
        Some("csv") => "text/csv",
        Some("html" | "htm") => "text/html",
        _ => "text/plain",
    }
}

fn print_script(script: &Script) {
    println!("{} [{}]", script.title, script.status.as_str());
    println!("Topic:     {}", script.topic);
    if let Some(duration) = &script.duration {
        println!("Duration:  {duration}");
    }
    if let Some(thumbnail) = &script.thumbnail {
        println!("Thumbnail: {}", thumbnail.concept);
    }
    if let Some(metrics) = &script.viral_metrics {
        println!(
            "Scores:    hook {:.0} / retention {:.0} / controversy {:.0}",
            metrics.hook_score, metrics.retention_score, metrics.controversy_score
        );
        println!("Feedback:  {}", metrics.feedback);
    }
    println!();
    println!("{}", script.content);
}
