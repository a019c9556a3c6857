//! Client for the video platform's public Data API and the authenticated
//! Analytics API.
//!
//! Channel lookups accept free-form identifiers and resolve them by the
//! most precise structural match available before falling back to a
//! free-text search (see [`classify_identifier`]).

pub mod analytics;
pub mod client;
pub mod error;
pub mod identifier;
pub mod metrics;
pub mod normalize;
pub mod types;

pub use analytics::{analytics_window, chart_points, growth_rate};
pub use client::YoutubeClient;
pub use error::YoutubeError;
pub use identifier::{classify_identifier, extract_video_id, ChannelLookup};
pub use metrics::{format_view_count, viral_velocity};
