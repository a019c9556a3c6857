use serde::{Deserialize, Serialize};

/// The creator's brand identity, interpolated into every system instruction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChannelIdentity {
    /// e.g. "Sarcastic, Nihilistic, Educational".
    pub brand_voice: String,
    /// e.g. "Gen Z interested in True Crime".
    pub target_audience: String,
    /// The "why" of the channel.
    pub manifesto: String,
}

impl ChannelIdentity {
    /// True when no field carries any text.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.brand_voice.trim().is_empty()
            && self.target_audience.trim().is_empty()
            && self.manifesto.trim().is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartPoint {
    /// Day-of-month label.
    pub name: String,
    pub val: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopVideo {
    pub title: String,
    pub views: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelAnalytics {
    pub views: u64,
    pub subscribers: u64,
    pub videos: u64,
    pub avg_views: u64,
    /// Percent change between the two halves of the reporting window.
    /// `None` when no daily report was available.
    #[serde(default)]
    pub growth_rate: Option<i64>,
    #[serde(default)]
    pub top_videos: Vec<TopVideo>,
    #[serde(default)]
    pub chart_data: Vec<ChartPoint>,
}

/// Local user identity: linked channel snapshot plus brand identity.
///
/// The OAuth access token is short-lived and never persisted here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_handle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subscriber_count: Option<String>,
    #[serde(default)]
    pub identity: ChannelIdentity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analytics: Option<ChannelAnalytics>,
}

impl UserProfile {
    /// Identity to inject into prompts, or `None` when it is blank.
    #[must_use]
    pub fn persona(&self) -> Option<&ChannelIdentity> {
        (!self.identity.is_blank()).then_some(&self.identity)
    }

    /// Overlays the channel fields of `linked` onto `self`, keeping identity.
    pub fn merge_channel(&mut self, linked: UserProfile) {
        if linked.channel_id.is_some() {
            self.channel_id = linked.channel_id;
        }
        if linked.channel_name.is_some() {
            self.channel_name = linked.channel_name;
        }
        if linked.channel_handle.is_some() {
            self.channel_handle = linked.channel_handle;
        }
        if linked.avatar_url.is_some() {
            self.avatar_url = linked.avatar_url;
        }
        if linked.subscriber_count.is_some() {
            self.subscriber_count = linked.subscriber_count;
        }
    }
}
