//! Shared domain types and configuration for the `ScriptOS` content studio.

pub mod app_config;
pub mod automation;
pub mod channel;
pub mod config;
pub mod language;
pub mod profile;
pub mod scripts;
pub mod styles;
pub mod trends;

pub use app_config::{AppConfig, Environment};
pub use automation::{
    AutomationEdge, AutomationFlow, AutomationNode, NodeData, NodePosition, NodeStatus, NodeType,
};
pub use channel::{
    ChannelRecord, RecentUpload, VideoSummary, MAX_RECENT_UPLOADS, MAX_UPLOAD_DESCRIPTION_CHARS,
};
pub use config::{load_app_config, load_app_config_from_env};
pub use language::Language;
pub use profile::{ChannelAnalytics, ChannelIdentity, ChartPoint, TopVideo, UserProfile};
pub use scripts::{
    now_millis, ReferenceType, Script, ScriptReference, ScriptStatus, ThumbnailData, TitleVariant,
    ViralMetrics,
};
pub use styles::{StyleProfile, ERROR_STYLE_ID};
pub use trends::{ChatMessage, ChatRole, GroundingSource, TrendReport};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid script status: {0}")]
    InvalidStatus(String),

    #[error("invalid language: {0}")]
    InvalidLanguage(String),

    #[error("unknown automation node: {0}")]
    UnknownNode(String),

    #[error("duplicate automation node id: {0}")]
    DuplicateNode(String),

    #[error("invalid node type: {0}")]
    InvalidNodeType(String),
}
