//! Studio workflows against wiremock stand-ins for both remote APIs and an
//! in-memory store.

use scriptos_core::{
    ChannelIdentity, CoreError, Language, NodePosition, NodeType, Script, ScriptStatus,
    TitleVariant,
};
use scriptos_gemini::GeminiClient;
use scriptos_store::LocalStore;
use scriptos_studio::{RemixMode, ScriptDraft, Studio, StudioError};
use scriptos_youtube::{YoutubeClient, YoutubeError};
use serde_json::json;
use wiremock::matchers::{body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TEXT_PATH: &str = "/v1beta/models/gemini-2.5-flash:generateContent";

fn studio_with_keys(server: &MockServer, gemini_key: Option<&str>) -> Studio {
    let youtube = YoutubeClient::with_base_urls(
        Some("yt-key"),
        30,
        "scriptos-test",
        &format!("{}/youtube/v3", server.uri()),
        &format!("{}/v2", server.uri()),
    )
    .expect("youtube client");
    let gemini = GeminiClient::with_base_url(
        gemini_key,
        "gemini-2.5-flash",
        "gemini-2.5-flash-image",
        30,
        "scriptos-test",
        &server.uri(),
    )
    .expect("gemini client");
    Studio::new(LocalStore::in_memory(), youtube, gemini, Language::EnUs)
}

fn test_studio(server: &MockServer) -> Studio {
    studio_with_keys(server, Some("gm-key"))
}

fn text_response(text: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "candidates": [{ "content": { "role": "model", "parts": [{ "text": text }] } }]
    }))
}

fn stored_script(studio: &Studio) -> Script {
    let mut script = Script::new("The Lake", "Lake Bodom", "# HOOK\nFour tents.");
    script.language = Some(Language::EnUs);
    studio.store().save_script(&script).expect("save");
    script
}

#[tokio::test]
async fn trend_search_queries_both_apis() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(TEXT_PATH))
        .and(body_string_contains("Find obscure"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{
                "content": { "parts": [{ "text": "Three cases nobody closed." }] },
                "groundingMetadata": { "groundingChunks": [
                    { "web": { "uri": "https://a.example", "title": "A" } }
                ] }
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/youtube/v3/search"))
        .and(query_param("q", "lake mystery"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{ "id": { "videoId": "aaaaaaaaaaa" } }]
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/youtube/v3/videos"))
        .and(query_param("id", "aaaaaaaaaaa"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{
                "id": "aaaaaaaaaaa",
                "snippet": { "title": "The Lake Files" },
                "statistics": { "viewCount": "4200" }
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let result = test_studio(&server)
        .trend_search("lake mystery")
        .await
        .expect("trend search");

    assert_eq!(result.report.content, "Three cases nobody closed.");
    assert_eq!(result.report.sources.len(), 1);
    assert_eq!(result.videos.len(), 1);
    assert_eq!(result.videos[0].title, "The Lake Files");
}

#[tokio::test]
async fn trend_search_without_generative_key_fails_fast() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/youtube/v3/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": [] })))
        .expect(0)
        .mount(&server)
        .await;

    let err = studio_with_keys(&server, None)
        .trend_search("lake")
        .await
        .expect_err("missing key");
    assert!(err.is_missing_credential());
}

#[tokio::test]
async fn unresolvable_channel_yields_placeholder_and_saves_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/youtube/v3/channels"))
        .and(query_param("forHandle", "@ghost"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": [] })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(TEXT_PATH))
        .respond_with(text_response("{}"))
        .expect(0)
        .mount(&server)
        .await;

    let studio = test_studio(&server);
    let profile = studio.decode_style("@ghost", true).await.expect("decode");

    assert!(profile.is_error());
    assert_eq!(profile.name, "Channel Not Found");
    let styles = studio.styles().expect("styles");
    assert_eq!(styles.len(), 1);
    assert_eq!(styles[0].id, "default-noir");
}

#[tokio::test]
async fn channel_decode_feeds_channel_data_and_saves_profile() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/youtube/v3/channels"))
        .and(query_param("forHandle", "@abyssfiles"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{
                "id": "UCx",
                "snippet": { "title": "Abyss Files", "customUrl": "@abyssfiles" },
                "statistics": { "subscriberCount": "1200", "videoCount": "48" }
            }]
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(TEXT_PATH))
        .and(body_string_contains("CHANNEL: Abyss Files"))
        .respond_with(text_response(
            r#"{"name":"Cold Case Noir","tone":"Dry","structure":"Cold Open -> Files","audioSignature":"Drones","description":"Slow dread."}"#,
        ))
        .expect(1)
        .mount(&server)
        .await;

    let studio = test_studio(&server);
    let profile = studio
        .decode_style("@abyssfiles", true)
        .await
        .expect("decode");

    assert_eq!(profile.name, "Cold Case Noir");
    let styles = studio.styles().expect("styles");
    assert_eq!(styles.len(), 2);
    assert!(styles.iter().any(|s| s.id == profile.id));
}

#[tokio::test]
async fn text_decode_failure_is_not_saved() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(TEXT_PATH))
        .respond_with(text_response("I cannot help with that."))
        .mount(&server)
        .await;

    let studio = test_studio(&server);
    let profile = studio
        .decode_style("some sample paragraph", false)
        .await
        .expect("decode");

    assert!(profile.is_error());
    assert_eq!(studio.styles().expect("styles").len(), 1);
    assert!(matches!(
        studio.save_style(&profile),
        Err(StudioError::SentinelStyle)
    ));
}

#[tokio::test]
async fn create_script_uses_identity_title_and_default_style() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(TEXT_PATH))
        .and(body_string_contains("BRAND VOICE: Clinical"))
        .and(body_string_contains("CHOSEN TITLE: Four Tents, One Survivor"))
        .and(body_string_contains("STYLE DNA: Noir Detective"))
        .respond_with(text_response("# HOOK\nOne of them walked out."))
        .expect(1)
        .mount(&server)
        .await;

    let studio = test_studio(&server);
    studio
        .set_identity(ChannelIdentity {
            brand_voice: "Clinical".to_string(),
            ..ChannelIdentity::default()
        })
        .expect("identity");

    let mut draft = ScriptDraft::new("Lake Bodom");
    draft.selected_title = Some(TitleVariant {
        title: "Four Tents, One Survivor".to_string(),
        psychology: "curiosity gap".to_string(),
        score: 88.0,
    });
    let script = studio.create_script(draft).await.expect("script");

    assert_eq!(script.status, ScriptStatus::Idea);
    assert_eq!(script.title, "Four Tents, One Survivor");
    assert_eq!(script.topic, "Lake Bodom");
    assert_eq!(script.content, "# HOOK\nOne of them walked out.");
    assert_eq!(script.style_id.as_deref(), Some("default-noir"));
    assert_eq!(script.duration.as_deref(), Some("Medium (8-12 min)"));
    assert_eq!(script.language, Some(Language::EnUs));
    assert_eq!(studio.script(&script.id).expect("stored"), script);
}

#[tokio::test]
async fn create_script_rejects_unknown_style_without_calling_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(TEXT_PATH))
        .respond_with(text_response("never"))
        .expect(0)
        .mount(&server)
        .await;

    let studio = test_studio(&server);
    let mut draft = ScriptDraft::new("Lake Bodom");
    draft.style_id = Some("missing".to_string());
    let err = studio.create_script(draft).await.expect_err("unknown style");

    assert!(matches!(err, StudioError::StyleNotFound(ref id) if id == "missing"));
    assert!(studio.scripts().expect("scripts").is_empty());
}

#[tokio::test]
async fn failed_remix_keeps_content_and_analysis_is_recorded() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(TEXT_PATH))
        .and(body_string_contains("Rewrite the following script"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(TEXT_PATH))
        .and(body_string_contains("Analyze this script"))
        .respond_with(text_response(
            r#"{"hookScore":71,"retentionScore":64,"controversyScore":40,"feedback":"Slow middle."}"#,
        ))
        .expect(1)
        .mount(&server)
        .await;

    let studio = test_studio(&server);
    let original = stored_script(&studio);

    let remixed = studio
        .remix_script(&original.id, RemixMode::Retention)
        .await
        .expect("remix");
    assert_eq!(remixed.content, original.content);
    assert!(remixed.last_modified >= original.last_modified);

    let analysed = studio.analyze_script(&original.id).await.expect("analyze");
    let metrics = analysed.viral_metrics.expect("metrics");
    assert!((metrics.hook_score - 71.0).abs() < f64::EPSILON);
    assert_eq!(metrics.feedback, "Slow middle.");
    assert!(studio
        .script(&original.id)
        .expect("stored")
        .viral_metrics
        .is_some());
}

#[tokio::test]
async fn advance_walks_the_board_and_stops_at_published() {
    let server = MockServer::start().await;
    let studio = test_studio(&server);
    let script = stored_script(&studio);

    let mut seen = Vec::new();
    for _ in 0..5 {
        seen.push(studio.advance_script(&script.id).expect("advance").status);
    }
    assert_eq!(
        seen,
        vec![
            ScriptStatus::Drafting,
            ScriptStatus::Filming,
            ScriptStatus::Editing,
            ScriptStatus::Published,
            ScriptStatus::Published,
        ]
    );

    let back = studio
        .set_script_status(&script.id, ScriptStatus::Idea)
        .expect("status");
    assert_eq!(back.status, ScriptStatus::Idea);
}

#[tokio::test]
async fn unknown_script_is_not_found() {
    let server = MockServer::start().await;
    let studio = test_studio(&server);

    let err = studio.advance_script("nope").expect_err("unknown id");
    assert!(err.is_not_found());
    assert!(matches!(
        studio.delete_script("nope"),
        Err(StudioError::ScriptNotFound(_))
    ));
}

#[tokio::test]
async fn sync_profile_merges_channel_and_keeps_identity() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/youtube/v3/channels"))
        .and(query_param("part", "snippet,statistics,brandingSettings"))
        .and(query_param("mine", "true"))
        .and(header("authorization", "Bearer tok"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{
                "id": "UCmine",
                "snippet": {
                    "title": "My Abyss",
                    "customUrl": "@myabyss",
                    "thumbnails": { "medium": { "url": "https://img/me.png" } }
                },
                "statistics": { "subscriberCount": "77" }
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/youtube/v3/channels"))
        .and(query_param("part", "statistics"))
        .and(query_param("mine", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{ "statistics": {
                "viewCount": "900", "subscriberCount": "77", "videoCount": "3"
            } }]
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v2/reports"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let studio = test_studio(&server);
    studio
        .set_identity(ChannelIdentity {
            manifesto: "Nobody else will say it.".to_string(),
            ..ChannelIdentity::default()
        })
        .expect("identity");

    let profile = studio.sync_profile("tok").await.expect("sync");

    assert_eq!(profile.channel_name.as_deref(), Some("My Abyss"));
    assert_eq!(profile.avatar_url.as_deref(), Some("https://img/me.png"));
    assert_eq!(profile.identity.manifesto, "Nobody else will say it.");
    let analytics = profile.analytics.as_ref().expect("analytics");
    assert_eq!(analytics.views, 900);
    assert_eq!(analytics.avg_views, 300);
    assert!(analytics.chart_data.is_empty());
    assert_eq!(studio.profile().expect("stored"), profile);
}

#[tokio::test]
async fn sync_profile_requires_a_token() {
    let server = MockServer::start().await;
    let err = test_studio(&server)
        .sync_profile("  ")
        .await
        .expect_err("blank token");
    assert!(matches!(
        err,
        StudioError::Youtube(YoutubeError::MissingAccessToken)
    ));
    assert!(err.is_missing_credential());
}

#[tokio::test]
async fn chat_carries_identity_and_skips_greeting() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(TEXT_PATH))
        .and(body_string_contains("A.I.N.A"))
        .and(body_string_contains("TARGET AUDIENCE: Night owls"))
        .respond_with(text_response("Open on the empty tent."))
        .expect(1)
        .mount(&server)
        .await;

    let studio = test_studio(&server);
    studio
        .set_identity(ChannelIdentity {
            target_audience: "Night owls".to_string(),
            ..ChannelIdentity::default()
        })
        .expect("identity");

    let history = vec![scriptos_core::ChatMessage::new(
        scriptos_core::ChatRole::Model,
        studio.chat_greeting(),
    )];
    let reply = studio
        .chat(&history, "How do I open the Bodom video?")
        .await
        .expect("chat");
    assert_eq!(reply, "Open on the empty tent.");
}

#[tokio::test]
async fn search_degrades_to_empty_on_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/youtube/v3/search"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "error": { "message": "quotaExceeded" }
        })))
        .mount(&server)
        .await;

    let studio = test_studio(&server);
    assert!(studio.search_videos("lake").await.is_empty());
    assert!(studio.resolve_channel("just some words").await.is_none());
    assert!(studio.video_details("not a video").await.is_none());
}

#[tokio::test]
async fn export_writes_markdown_into_directory() {
    let server = MockServer::start().await;
    let studio = test_studio(&server);
    let script = stored_script(&studio);
    let dir = tempfile::tempdir().expect("tempdir");

    let path = studio
        .export_script(&script.id, dir.path())
        .expect("export");

    assert!(path.starts_with(dir.path()));
    let written = std::fs::read_to_string(&path).expect("read back");
    assert!(written.contains("Four tents."));
}

#[tokio::test]
async fn flows_start_with_the_discovery_pipeline() {
    let server = MockServer::start().await;
    let studio = test_studio(&server);

    let flows = studio.flows().expect("flows");
    assert_eq!(flows.len(), 1);
    let flow = studio.flow(&flows[0].id).expect("flow");
    assert_eq!(flow.nodes.len(), 3);
    assert!(matches!(
        studio.flow("missing"),
        Err(StudioError::FlowNotFound(_))
    ));
}

#[tokio::test]
async fn flow_edits_are_persisted() {
    let server = MockServer::start().await;
    let studio = test_studio(&server);

    let flow = studio
        .add_flow_node(
            "flow-1",
            NodeType::OutputNotify,
            "Ping Slack",
            NodePosition { x: 1150.0, y: 150.0 },
        )
        .expect("add node");
    let added = flow.nodes.last().expect("new node").id.clone();

    let flow = studio
        .connect_flow_nodes("flow-1", "3", &added)
        .expect("connect");
    assert_eq!(flow.edges.len(), 3);

    let flow = studio.remove_flow_node("flow-1", "2").expect("remove");
    assert_eq!(flow.nodes.len(), 3);
    assert_eq!(flow.edges.len(), 1);

    let stored = studio.flow("flow-1").expect("stored flow");
    assert_eq!(stored, flow);
    assert_eq!(stored.edges[0].target, added);
}

#[tokio::test]
async fn flow_edits_reject_unknown_nodes() {
    let server = MockServer::start().await;
    let studio = test_studio(&server);

    assert!(matches!(
        studio.connect_flow_nodes("flow-1", "1", "ghost"),
        Err(StudioError::InvalidFlow(CoreError::UnknownNode(ref id))) if id == "ghost"
    ));
    assert!(matches!(
        studio.remove_flow_node("flow-1", "ghost"),
        Err(StudioError::InvalidFlow(_))
    ));
    assert!(matches!(
        studio.remove_flow_node("nope", "1"),
        Err(StudioError::FlowNotFound(_))
    ));
    assert_eq!(studio.flow("flow-1").expect("flow").edges.len(), 2);
}

#[tokio::test]
async fn saving_a_flow_with_dangling_edges_fails() {
    let server = MockServer::start().await;
    let studio = test_studio(&server);

    let mut flow = studio.flow("flow-1").expect("flow");
    flow.nodes.retain(|n| n.id != "1");
    assert!(matches!(
        studio.save_flow(&flow),
        Err(StudioError::InvalidFlow(_))
    ));
    assert_eq!(studio.flow("flow-1").expect("flow").nodes.len(), 3);
}
