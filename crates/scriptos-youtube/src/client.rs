//! HTTP client for the video platform's Data API (v3) and Analytics API (v2).
//!
//! Public lookups are keyed by a static API key sent as the `key` query
//! parameter. "My channel" and analytics calls are authorized with a
//! short-lived OAuth bearer token supplied per call and never stored.

use std::time::Duration;

use chrono::{NaiveDate, Utc};
use reqwest::{Client, Url};
use scriptos_core::{ChannelAnalytics, ChannelRecord, UserProfile, VideoSummary};
use serde::de::DeserializeOwned;

use crate::analytics::{analytics_window, chart_points, growth_rate};
use crate::error::YoutubeError;
use crate::identifier::{classify_identifier, extract_video_id, ChannelLookup};
use crate::normalize::{
    channel_analytics, channel_record, linked_profile, uploads_playlist_id, video_summary,
    ThumbnailPreference,
};
use crate::types::{
    AnalyticsReport, ChannelItem, ErrorResponse, ListResponse, PlaylistItem, SearchItem, VideoItem,
};

const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/youtube/v3/";
const DEFAULT_ANALYTICS_BASE_URL: &str = "https://youtubeanalytics.googleapis.com/v2/";

const CHANNEL_PARTS: &str = "snippet,contentDetails,statistics,brandingSettings";
const MY_CHANNEL_PARTS: &str = "snippet,statistics,brandingSettings";
const VIDEO_PARTS: &str = "snippet,statistics";
const MAX_SEARCH_RESULTS: &str = "6";
const MAX_UPLOAD_RESULTS: &str = "5";

/// Client for the video platform's public and authenticated APIs.
///
/// Use [`YoutubeClient::new`] for production or
/// [`YoutubeClient::with_base_urls`] to point at a mock server in tests.
pub struct YoutubeClient {
    client: Client,
    api_key: Option<String>,
    base_url: Url,
    analytics_base_url: Url,
}

impl std::fmt::Debug for YoutubeClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("YoutubeClient")
            .field("api_key", &self.api_key.as_ref().map(|_| "[redacted]"))
            .field("base_url", &self.base_url.as_str())
            .field("analytics_base_url", &self.analytics_base_url.as_str())
            .finish_non_exhaustive()
    }
}

fn normalise_base(url: &str) -> Result<Url, YoutubeError> {
    let normalised = format!("{}/", url.trim_end_matches('/'));
    Url::parse(&normalised).map_err(|e| YoutubeError::InvalidBaseUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })
}

impl YoutubeClient {
    /// Creates a client pointed at the production APIs.
    ///
    /// A missing `api_key` is accepted here; public lookups then fail with
    /// [`YoutubeError::MissingApiKey`].
    ///
    /// # Errors
    ///
    /// Returns [`YoutubeError::Http`] if the `reqwest::Client` cannot be built.
    pub fn new(
        api_key: Option<&str>,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, YoutubeError> {
        Self::with_base_urls(
            api_key,
            timeout_secs,
            user_agent,
            DEFAULT_BASE_URL,
            DEFAULT_ANALYTICS_BASE_URL,
        )
    }

    /// Creates a client with custom base URLs (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`YoutubeError::Http`] if the `reqwest::Client` cannot be built,
    /// or [`YoutubeError::InvalidBaseUrl`] if either URL does not parse.
    pub fn with_base_urls(
        api_key: Option<&str>,
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
        analytics_base_url: &str,
    ) -> Result<Self, YoutubeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            api_key: api_key
                .map(str::trim)
                .filter(|k| !k.is_empty())
                .map(str::to_owned),
            base_url: normalise_base(base_url)?,
            analytics_base_url: normalise_base(analytics_base_url)?,
        })
    }

    /// True when a Data API key is configured.
    #[must_use]
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    // -----------------------------------------------------------------------
    // Public lookups
    // -----------------------------------------------------------------------

    /// Resolves a free-form channel identifier and fetches the channel with
    /// its most recent uploads.
    ///
    /// Resolution follows [`classify_identifier`]; only unstructured input
    /// triggers a free-text channel search.
    ///
    /// # Errors
    ///
    /// - [`YoutubeError::MissingApiKey`] if no key is configured.
    /// - [`YoutubeError::ChannelNotFound`] if no path yields a channel.
    /// - [`YoutubeError::Http`] / [`YoutubeError::Api`] /
    ///   [`YoutubeError::Deserialize`] on remote failure.
    pub async fn fetch_channel_deep_data(
        &self,
        identifier: &str,
    ) -> Result<ChannelRecord, YoutubeError> {
        let key = self.require_key()?;

        let lookup = classify_identifier(identifier);
        tracing::debug!(?lookup, "resolving channel identifier");

        let (param, value) = match lookup {
            ChannelLookup::Handle(handle) => ("forHandle", handle),
            ChannelLookup::Id(id) => ("id", id),
            ChannelLookup::Search(query) => {
                let id = self.search_channel_id(key, &query).await?.ok_or_else(|| {
                    YoutubeError::ChannelNotFound(identifier.trim().to_string())
                })?;
                ("id", id)
            }
        };

        let url = self.build_url(
            "channels",
            &[("part", CHANNEL_PARTS), (param, &value), ("key", key)],
        );
        let channels: ListResponse<ChannelItem> =
            self.get_json(&url, None, "channels lookup").await?;
        let item = channels
            .items
            .into_iter()
            .next()
            .ok_or_else(|| YoutubeError::ChannelNotFound(identifier.trim().to_string()))?;

        let uploads = match uploads_playlist_id(&item) {
            Some(playlist_id) => {
                let url = self.build_url(
                    "playlistItems",
                    &[
                        ("part", "snippet"),
                        ("playlistId", playlist_id),
                        ("maxResults", MAX_UPLOAD_RESULTS),
                        ("key", key),
                    ],
                );
                let listed: Result<ListResponse<PlaylistItem>, _> =
                    self.get_json(&url, None, "playlistItems").await;
                match listed {
                    Ok(list) => list.items,
                    Err(e) => {
                        tracing::warn!(error = %e, playlist_id, "uploads lookup failed");
                        Vec::new()
                    }
                }
            }
            None => Vec::new(),
        };

        let record = channel_record(&item, &uploads);
        tracing::debug!(
            title = %record.title,
            uploads = record.recent_videos.len(),
            "channel resolved"
        );
        Ok(record)
    }

    /// Fetches one video by watch/short/embed URL or bare id.
    ///
    /// # Errors
    ///
    /// - [`YoutubeError::MissingApiKey`] if no key is configured.
    /// - [`YoutubeError::InvalidVideoReference`] if no id can be extracted;
    ///   no request is made in that case.
    /// - [`YoutubeError::VideoNotFound`] if the API returns no item.
    /// - [`YoutubeError::Http`] / [`YoutubeError::Api`] /
    ///   [`YoutubeError::Deserialize`] on remote failure.
    pub async fn get_video_details(&self, url_or_id: &str) -> Result<VideoSummary, YoutubeError> {
        let key = self.require_key()?;
        let video_id = extract_video_id(url_or_id)
            .ok_or_else(|| YoutubeError::InvalidVideoReference(url_or_id.to_string()))?;

        let url = self.build_url(
            "videos",
            &[("part", VIDEO_PARTS), ("id", &video_id), ("key", key)],
        );
        let list: ListResponse<VideoItem> = self.get_json(&url, None, "videos lookup").await?;
        let item = list
            .items
            .first()
            .ok_or(YoutubeError::VideoNotFound(video_id))?;

        Ok(video_summary(item, ThumbnailPreference::Detail, Utc::now()))
    }

    /// Searches videos by relevance and returns them with statistics and
    /// viral velocity.
    ///
    /// Two requests: a search for up to six ids, then one batched statistics
    /// lookup, since search results carry no view counts.
    ///
    /// # Errors
    ///
    /// - [`YoutubeError::MissingApiKey`] if no key is configured.
    /// - [`YoutubeError::Http`] / [`YoutubeError::Api`] /
    ///   [`YoutubeError::Deserialize`] on remote failure.
    pub async fn search_videos(&self, query: &str) -> Result<Vec<VideoSummary>, YoutubeError> {
        let key = self.require_key()?;

        let url = self.build_url(
            "search",
            &[
                ("part", "snippet"),
                ("type", "video"),
                ("q", query),
                ("maxResults", MAX_SEARCH_RESULTS),
                ("order", "relevance"),
                ("key", key),
            ],
        );
        let search: ListResponse<SearchItem> = self.get_json(&url, None, "video search").await?;
        let ids: Vec<String> = search
            .items
            .into_iter()
            .filter_map(|item| item.id.and_then(|id| id.video_id))
            .collect();
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let joined = ids.join(",");
        let url = self.build_url(
            "videos",
            &[("part", "statistics,snippet"), ("id", &joined), ("key", key)],
        );
        let list: ListResponse<VideoItem> = self.get_json(&url, None, "videos batch").await?;

        let now = Utc::now();
        let videos: Vec<VideoSummary> = list
            .items
            .iter()
            .map(|item| video_summary(item, ThumbnailPreference::Grid, now))
            .collect();
        tracing::debug!(query, results = videos.len(), "video search complete");
        Ok(videos)
    }

    // -----------------------------------------------------------------------
    // Authenticated (OAuth bearer)
    // -----------------------------------------------------------------------

    /// The authenticated user's own channel, as profile fields.
    ///
    /// # Errors
    ///
    /// - [`YoutubeError::MissingAccessToken`] if `access_token` is blank.
    /// - [`YoutubeError::ChannelNotFound`] if the account has no channel.
    /// - [`YoutubeError::Http`] / [`YoutubeError::Api`] /
    ///   [`YoutubeError::Deserialize`] on remote failure.
    pub async fn fetch_my_channel(&self, access_token: &str) -> Result<UserProfile, YoutubeError> {
        let token = require_token(access_token)?;
        let url = self.build_url("channels", &[("part", MY_CHANNEL_PARTS), ("mine", "true")]);
        let list: ListResponse<ChannelItem> =
            self.get_json(&url, Some(token), "my channel").await?;
        let item = list
            .items
            .first()
            .ok_or_else(|| YoutubeError::ChannelNotFound("mine".to_string()))?;
        Ok(linked_profile(item))
    }

    /// Channel totals plus a daily-views chart for the window ending `today`.
    ///
    /// The totals come from the Data API and are required. The daily report
    /// comes from the Analytics API and is optional: if it fails or has no
    /// rows, the chart is empty and the growth rate is `None`.
    ///
    /// # Errors
    ///
    /// - [`YoutubeError::MissingAccessToken`] if `access_token` is blank.
    /// - [`YoutubeError::ChannelNotFound`] if the account has no channel.
    /// - [`YoutubeError::Http`] / [`YoutubeError::Api`] /
    ///   [`YoutubeError::Deserialize`] if the totals lookup fails.
    pub async fn fetch_my_analytics(
        &self,
        access_token: &str,
        today: NaiveDate,
    ) -> Result<ChannelAnalytics, YoutubeError> {
        let token = require_token(access_token)?;

        let url = self.build_url("channels", &[("part", "statistics"), ("mine", "true")]);
        let list: ListResponse<ChannelItem> =
            self.get_json(&url, Some(token), "my channel statistics").await?;
        let stats = list
            .items
            .into_iter()
            .next()
            .ok_or_else(|| YoutubeError::ChannelNotFound("mine".to_string()))?
            .statistics
            .unwrap_or_default();

        let (chart, growth) = match self.fetch_daily_views(token, today).await {
            Ok(report) => (chart_points(&report.rows), growth_rate(&report.rows)),
            Err(e) => {
                tracing::warn!(error = %e, "analytics report unavailable; returning totals only");
                (Vec::new(), None)
            }
        };

        Ok(channel_analytics(&stats, chart, growth))
    }

    async fn fetch_daily_views(
        &self,
        token: &str,
        today: NaiveDate,
    ) -> Result<AnalyticsReport, YoutubeError> {
        let (start, end) = analytics_window(today);
        let start = start.format("%Y-%m-%d").to_string();
        let end = end.format("%Y-%m-%d").to_string();

        let mut url = self
            .analytics_base_url
            .join("reports")
            .unwrap_or_else(|_| self.analytics_base_url.clone());
        url.query_pairs_mut()
            .append_pair("ids", "channel==MINE")
            .append_pair("startDate", &start)
            .append_pair("endDate", &end)
            .append_pair("metrics", "views")
            .append_pair("dimensions", "day")
            .append_pair("sort", "day");

        self.get_json(&url, Some(token), "analytics report").await
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    async fn search_channel_id(
        &self,
        key: &str,
        query: &str,
    ) -> Result<Option<String>, YoutubeError> {
        let url = self.build_url(
            "search",
            &[
                ("part", "snippet"),
                ("type", "channel"),
                ("q", query),
                ("maxResults", "1"),
                ("key", key),
            ],
        );
        let search: ListResponse<SearchItem> =
            self.get_json(&url, None, "channel search").await?;
        Ok(search
            .items
            .into_iter()
            .next()
            .and_then(|item| item.id)
            .and_then(|id| id.channel_id)
            .filter(|id| !id.is_empty()))
    }

    fn require_key(&self) -> Result<&str, YoutubeError> {
        self.api_key.as_deref().ok_or(YoutubeError::MissingApiKey)
    }

    /// Builds `{base_url}{resource}?{params}` with percent-encoded values.
    fn build_url(&self, resource: &str, params: &[(&str, &str)]) -> Url {
        let mut url = self
            .base_url
            .join(resource)
            .unwrap_or_else(|_| self.base_url.clone());
        {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in params {
                pairs.append_pair(k, v);
            }
        }
        url
    }

    /// Sends a GET, maps non-2xx statuses to [`YoutubeError::Api`] with the
    /// API's own error message when present, and deserializes the body.
    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &Url,
        bearer: Option<&str>,
        context: &str,
    ) -> Result<T, YoutubeError> {
        let mut request = self
            .client
            .get(url.clone())
            .header(reqwest::header::ACCEPT, "application/json");
        if let Some(token) = bearer {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorResponse>(&body)
                .map(|e| e.error.message)
                .ok()
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("error").to_string());
            return Err(YoutubeError::Api {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&body).map_err(|source| YoutubeError::Deserialize {
            context: context.to_string(),
            source,
        })
    }
}

fn require_token(access_token: &str) -> Result<&str, YoutubeError> {
    let token = access_token.trim();
    if token.is_empty() {
        return Err(YoutubeError::MissingAccessToken);
    }
    Ok(token)
}
