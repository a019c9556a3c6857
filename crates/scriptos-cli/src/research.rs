//! Channel, video and trend research commands, plus the title and
//! thumbnail helpers of the script wizard.

use std::path::{Path, PathBuf};

use base64::Engine;
use clap::Subcommand;
use scriptos_core::VideoSummary;
use scriptos_studio::Studio;

use crate::clip;

/// Sub-commands available under `thumbnail`.
#[derive(Debug, Subcommand)]
pub enum ThumbnailCommands {
    /// Art direction and an image prompt for a chosen title
    Concept {
        /// The chosen video title
        #[arg(long)]
        title: String,
        /// The video topic
        #[arg(long)]
        topic: String,
        /// Style DNA id (defaults to the first stored style)
        #[arg(long)]
        style: Option<String>,
    },
    /// Render an image prompt and write the image to disk
    Image {
        prompt: String,
        /// Output file
        #[arg(long, default_value = "thumbnail.png")]
        out: PathBuf,
    },
}

pub(crate) async fn run_channel(studio: &Studio, identifier: &str) -> anyhow::Result<()> {
    let Some(channel) = studio.resolve_channel(identifier).await else {
        anyhow::bail!("channel '{identifier}' not found; check the handle, URL or id");
    };

    println!("{}", channel.context_block());
    Ok(())
}

pub(crate) async fn run_video(studio: &Studio, reference: &str) -> anyhow::Result<()> {
    let Some(video) = studio.video_details(reference).await else {
        anyhow::bail!("video '{reference}' not found or not a video URL");
    };

    println!("{} \u{2014} {}", video.title, video.channel_title);
    println!("Published:  {}", video.published_at);
    println!("Views:      {}", video.view_count);
    println!("Velocity:   {} views/day", video.viral_velocity);
    println!("Thumbnail:  {}", video.thumbnail_url);
    if !video.description.is_empty() {
        println!();
        println!("{}", clip(&video.description, 400));
    }
    Ok(())
}

pub(crate) async fn run_search(studio: &Studio, query: &str) -> anyhow::Result<()> {
    let videos = studio.search_videos(query).await;
    print_videos(&videos);
    Ok(())
}

pub(crate) async fn run_trends(studio: &Studio, query: &str) -> anyhow::Result<()> {
    let result = studio.trend_search(query).await?;

    println!("{}", result.report.content);
    if !result.report.sources.is_empty() {
        println!();
        println!("SOURCES");
        for source in &result.report.sources {
            println!("- {} <{}>", source.title, source.uri);
        }
    }
    println!();
    print_videos(&result.videos);
    Ok(())
}

pub(crate) async fn run_titles(studio: &Studio, topic: &str) -> anyhow::Result<()> {
    let titles = studio.viral_titles(topic).await?;
    if titles.is_empty() {
        println!("no titles generated for '{topic}'");
        return Ok(());
    }

    println!("{:<7}{:<72}TRIGGER", "SCORE", "TITLE");
    for variant in &titles {
        println!(
            "{:<7}{:<72}{}",
            format!("{:.0}", variant.score),
            clip(&variant.title, 68),
            variant.psychology
        );
    }
    Ok(())
}

pub(crate) async fn run_thumbnail(
    studio: &Studio,
    command: ThumbnailCommands,
) -> anyhow::Result<()> {
    match command {
        ThumbnailCommands::Concept {
            title,
            topic,
            style,
        } => {
            let Some(concept) = studio
                .thumbnail_concept(&title, &topic, style.as_deref())
                .await?
            else {
                anyhow::bail!("thumbnail concept generation failed");
            };
            println!("CONCEPT");
            println!("{}", concept.concept);
            println!();
            println!("IMAGE PROMPT");
            println!("{}", concept.image_prompt);
        }
        ThumbnailCommands::Image { prompt, out } => {
            let Some(encoded) = studio.thumbnail_image(&prompt).await? else {
                anyhow::bail!("image model returned no image");
            };
            write_image(&encoded, &out)?;
            println!("wrote {}", out.display());
        }
    }
    Ok(())
}

/// Decodes base64 image data and writes it to `path`.
pub(crate) fn write_image(encoded: &str, path: &Path) -> anyhow::Result<()> {
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(encoded.trim())
        .map_err(|e| anyhow::anyhow!("image data is not valid base64: {e}"))?;
    std::fs::write(path, &bytes)?;
    tracing::info!(path = %path.display(), bytes = bytes.len(), "thumbnail image written");
    Ok(())
}

fn print_videos(videos: &[VideoSummary]) {
    if videos.is_empty() {
        println!("no videos found");
        return;
    }

    println!(
        "{:<13}{:<12}{:<12}{:<26}TITLE",
        "ID", "VIEWS", "VEL/DAY", "CHANNEL"
    );
    for video in videos {
        println!(
            "{:<13}{:<12}{:<12}{:<26}{}",
            video.id,
            video.view_count,
            video.viral_velocity,
            clip(&video.channel_title, 22),
            clip(&video.title, 60)
        );
    }
}
