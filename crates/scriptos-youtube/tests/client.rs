//! Integration tests for `YoutubeClient` using wiremock HTTP mocks.

use chrono::{Duration, NaiveDate, Utc};
use scriptos_youtube::{YoutubeClient, YoutubeError};
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(server: &MockServer) -> YoutubeClient {
    YoutubeClient::with_base_urls(
        Some("test-key"),
        30,
        "scriptos-test",
        &server.uri(),
        &format!("{}/v2", server.uri()),
    )
    .expect("client construction should not fail")
}

fn channel_body(id: &str, uploads: Option<&str>) -> serde_json::Value {
    let mut item = json!({
        "id": id,
        "snippet": {
            "title": "Abyss Files",
            "description": "Cold cases, warm coffee.",
            "customUrl": "@abyssfiles"
        },
        "statistics": { "subscriberCount": "1200", "videoCount": "48", "viewCount": "90000" },
        "brandingSettings": { "channel": { "keywords": "mystery documentary" } }
    });
    if let Some(playlist) = uploads {
        item["contentDetails"] = json!({ "relatedPlaylists": { "uploads": playlist } });
    }
    json!({ "items": [item] })
}

async fn mount_search_guard(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": [] })))
        .expect(0)
        .mount(server)
        .await;
}

#[tokio::test]
async fn handle_lookup_never_searches() {
    let server = MockServer::start().await;
    mount_search_guard(&server).await;

    Mock::given(method("GET"))
        .and(path("/channels"))
        .and(query_param("forHandle", "@abyssfiles"))
        .and(query_param("key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(channel_body("UCx", None)))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let record = client
        .fetch_channel_deep_data("watch this: @abyssfiles channel")
        .await
        .expect("should resolve by handle");

    assert_eq!(record.title, "Abyss Files");
    assert_eq!(record.custom_url, "@abyssfiles");
    assert_eq!(record.subscribers, "1200");
    assert_eq!(record.keywords, "mystery documentary");
    assert!(record.recent_videos.is_empty());
}

#[tokio::test]
async fn exact_channel_id_never_searches() {
    let server = MockServer::start().await;
    mount_search_guard(&server).await;

    let id = "UC1234567890abcdefghijkl";
    Mock::given(method("GET"))
        .and(path("/channels"))
        .and(query_param("id", id))
        .respond_with(ResponseTemplate::new(200).set_body_json(channel_body(id, None)))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let record = client
        .fetch_channel_deep_data(id)
        .await
        .expect("should resolve by id");
    assert_eq!(record.video_count, "48");
}

#[tokio::test]
async fn channel_url_resolves_by_embedded_id() {
    let server = MockServer::start().await;
    mount_search_guard(&server).await;

    Mock::given(method("GET"))
        .and(path("/channels"))
        .and(query_param("id", "UCshort"))
        .respond_with(ResponseTemplate::new(200).set_body_json(channel_body("UCshort", None)))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    client
        .fetch_channel_deep_data("https://www.youtube.com/channel/UCshort/featured")
        .await
        .expect("should resolve by url id");
}

#[tokio::test]
async fn free_text_falls_back_to_search() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("type", "channel"))
        .and(query_param("q", "abyss files"))
        .and(query_param("maxResults", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{ "id": { "kind": "youtube#channel", "channelId": "UCfound" } }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/channels"))
        .and(query_param("id", "UCfound"))
        .respond_with(ResponseTemplate::new(200).set_body_json(channel_body("UCfound", None)))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let record = client
        .fetch_channel_deep_data("  abyss files ")
        .await
        .expect("should resolve via search");
    assert_eq!(record.title, "Abyss Files");
}

#[tokio::test]
async fn empty_search_is_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": [] })))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let err = client
        .fetch_channel_deep_data("nobody at all")
        .await
        .expect_err("should not resolve");
    assert!(matches!(err, YoutubeError::ChannelNotFound(ref s) if s == "nobody at all"));
}

#[tokio::test]
async fn empty_channel_list_is_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/channels"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let err = client
        .fetch_channel_deep_data("@ghost")
        .await
        .expect_err("should not resolve");
    assert!(matches!(err, YoutubeError::ChannelNotFound(_)));
}

#[tokio::test]
async fn uploads_are_capped_and_truncated() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/channels"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(channel_body("UCx", Some("UUuploads"))),
        )
        .mount(&server)
        .await;

    // Upstream ignores maxResults here and returns eight items.
    let items: Vec<serde_json::Value> = (0..8)
        .map(|i| {
            json!({ "snippet": { "title": format!("Case {i}"), "description": "d".repeat(450) } })
        })
        .collect();
    Mock::given(method("GET"))
        .and(path("/playlistItems"))
        .and(query_param("playlistId", "UUuploads"))
        .and(query_param("maxResults", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": items })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let record = client
        .fetch_channel_deep_data("@abyssfiles")
        .await
        .expect("should resolve");

    assert_eq!(record.recent_videos.len(), 5);
    assert_eq!(record.recent_videos[0].title, "Case 0");
    for video in &record.recent_videos {
        assert_eq!(video.description.chars().count(), 200);
    }
}

#[tokio::test]
async fn missing_optional_fields_default() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/channels"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "items": [{ "snippet": { "title": "Bare" } }] })),
        )
        .mount(&server)
        .await;

    let client = test_client(&server);
    let record = client
        .fetch_channel_deep_data("@bare")
        .await
        .expect("should tolerate missing fields");
    assert_eq!(record.title, "Bare");
    assert_eq!(record.subscribers, "0");
    assert_eq!(record.keywords, "");
    assert_eq!(record.custom_url, "");
}

#[tokio::test]
async fn failed_uploads_lookup_keeps_the_channel() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/channels"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(channel_body("UCx", Some("UUempty"))),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/playlistItems"))
        .and(query_param("playlistId", "UUempty"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": {
                "code": 404,
                "message": "The playlist identified with the request's playlistId parameter cannot be found."
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let record = client
        .fetch_channel_deep_data("@abyssfiles")
        .await
        .expect("channel should still resolve");
    assert_eq!(record.title, "Abyss Files");
    assert_eq!(record.subscribers, "1200");
    assert!(record.recent_videos.is_empty());
}

#[tokio::test]
async fn uploads_without_items_yield_no_recent_videos() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/channels"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(channel_body("UCx", Some("UUquiet"))),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/playlistItems"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "kind": "list" })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let record = client
        .fetch_channel_deep_data("@abyssfiles")
        .await
        .expect("channel should resolve");
    assert!(record.recent_videos.is_empty());
}

#[tokio::test]
async fn api_error_message_is_surfaced() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/channels"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "error": { "code": 403, "message": "quotaExceeded" }
        })))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let err = client
        .fetch_channel_deep_data("@abyssfiles")
        .await
        .expect_err("should fail");
    assert!(
        matches!(err, YoutubeError::Api { status: 403, ref message } if message == "quotaExceeded")
    );
}

#[tokio::test]
async fn missing_key_fails_without_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = YoutubeClient::with_base_urls(None, 30, "ua", &server.uri(), &server.uri())
        .expect("client");
    let err = client
        .search_videos("lakes")
        .await
        .expect_err("should fail");
    assert!(matches!(err, YoutubeError::MissingApiKey));
}

#[tokio::test]
async fn video_details_compute_velocity() {
    let server = MockServer::start().await;
    let published = (Utc::now() - Duration::days(10)).to_rfc3339();

    Mock::given(method("GET"))
        .and(path("/videos"))
        .and(query_param("id", "dQw4w9WgXcQ"))
        .and(query_param("part", "snippet,statistics"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{
                "id": "dQw4w9WgXcQ",
                "snippet": {
                    "title": "The Lake",
                    "channelTitle": "Abyss Files",
                    "publishedAt": published,
                    "thumbnails": {
                        "medium": { "url": "https://img/m.jpg" },
                        "maxres": { "url": "https://img/max.jpg" }
                    }
                },
                "statistics": { "viewCount": "36500" }
            }]
        })))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let video = client
        .get_video_details("https://youtu.be/dQw4w9WgXcQ?t=3")
        .await
        .expect("should fetch video");

    assert_eq!(video.viral_velocity, 3650);
    assert_eq!(video.view_count, "36,500");
    assert_eq!(video.thumbnail_url, "https://img/max.jpg");
    assert_eq!(video.channel_title, "Abyss Files");
}

#[tokio::test]
async fn invalid_video_reference_makes_no_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let err = client
        .get_video_details("https://example.com/not-a-video")
        .await
        .expect_err("should reject");
    assert!(matches!(err, YoutubeError::InvalidVideoReference(_)));
}

#[tokio::test]
async fn search_videos_batches_statistics_lookup() {
    let server = MockServer::start().await;
    let today = Utc::now().to_rfc3339();

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("type", "video"))
        .and(query_param("order", "relevance"))
        .and(query_param("maxResults", "6"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [
                { "id": { "videoId": "aaaaaaaaaaa" } },
                { "id": { "videoId": "bbbbbbbbbbb" } }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/videos"))
        .and(query_param("id", "aaaaaaaaaaa,bbbbbbbbbbb"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [
                {
                    "id": "aaaaaaaaaaa",
                    "snippet": {
                        "title": "Fresh",
                        "publishedAt": today,
                        "thumbnails": { "default": { "url": "https://img/d.jpg" } }
                    },
                    "statistics": { "viewCount": "1200" }
                },
                { "id": "bbbbbbbbbbb", "snippet": { "title": "No stats" } }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let videos = client.search_videos("lake mystery").await.expect("search");

    assert_eq!(videos.len(), 2);
    assert_eq!(videos[0].viral_velocity, 1200);
    assert_eq!(videos[0].thumbnail_url, "https://img/d.jpg");
    assert_eq!(videos[1].view_count, "0");
    assert_eq!(videos[1].viral_velocity, 0);
}

#[tokio::test]
async fn search_without_ids_skips_statistics_lookup() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": [] })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/videos"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = test_client(&server);
    assert!(client.search_videos("void").await.expect("search").is_empty());
}

#[tokio::test]
async fn my_channel_uses_bearer_token() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/channels"))
        .and(query_param("mine", "true"))
        .and(header("authorization", "Bearer tok-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{
                "id": "UCmine",
                "snippet": {
                    "title": "My Channel",
                    "customUrl": "@mine",
                    "thumbnails": { "medium": { "url": "https://img/me.png" } }
                },
                "statistics": { "subscriberCount": "77" }
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let profile = client.fetch_my_channel("tok-123").await.expect("my channel");
    assert_eq!(profile.channel_id.as_deref(), Some("UCmine"));
    assert_eq!(profile.channel_handle.as_deref(), Some("@mine"));
    assert_eq!(profile.subscriber_count.as_deref(), Some("77"));
}

#[tokio::test]
async fn blank_token_is_rejected() {
    let server = MockServer::start().await;
    let client = test_client(&server);
    let err = client.fetch_my_channel("").await.expect_err("should fail");
    assert!(matches!(err, YoutubeError::MissingAccessToken));
}

#[tokio::test]
async fn analytics_combines_totals_and_daily_report() {
    let server = MockServer::start().await;
    let today = NaiveDate::from_ymd_opt(2026, 10, 18).expect("date");

    Mock::given(method("GET"))
        .and(path("/channels"))
        .and(query_param("part", "statistics"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{ "statistics": {
                "viewCount": "10000", "subscriberCount": "300", "videoCount": "4"
            } }]
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v2/reports"))
        .and(query_param("ids", "channel==MINE"))
        .and(query_param("startDate", "2026-09-20"))
        .and(query_param("endDate", "2026-10-18"))
        .and(query_param("dimensions", "day"))
        .and(header("authorization", "Bearer tok"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "rows": [
                ["2026-10-15", 100],
                ["2026-10-16", 100],
                ["2026-10-17", 150],
                ["2026-10-18", 150]
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let analytics = client
        .fetch_my_analytics("tok", today)
        .await
        .expect("analytics");

    assert_eq!(analytics.views, 10_000);
    assert_eq!(analytics.avg_views, 2500);
    assert_eq!(analytics.growth_rate, Some(50));
    assert_eq!(analytics.chart_data.len(), 4);
    assert_eq!(analytics.chart_data[3].name, "18");
}

#[tokio::test]
async fn analytics_report_failure_keeps_totals() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/channels"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{ "statistics": { "viewCount": "900", "videoCount": "3" } }]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v2/reports"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "error": { "message": "insufficient scope" }
        })))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let analytics = client
        .fetch_my_analytics("tok", Utc::now().date_naive())
        .await
        .expect("totals survive");

    assert_eq!(analytics.views, 900);
    assert_eq!(analytics.avg_views, 300);
    assert!(analytics.chart_data.is_empty());
    assert_eq!(analytics.growth_rate, None);
}
