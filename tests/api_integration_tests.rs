use std::time::Duration;

use hews::api::{ApiError, Category, HnApi, HnClient, ItemKind, fetch_main_posts};
use hews::core::loaders::{ItemLoader, PostEvent, ProfileEvent, ProfileLoader, load_post, load_profile};
use hews::core::machine::{PhaseEvent, Transition};
use hews::core::phase::{LoadError, Phase};
use serde_json::{Value, json};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

// ============================================================================
// Helper Functions
// ============================================================================

fn story_json(id: u64, kids: &[u64]) -> Value {
    json!({
        "id": id,
        "type": "story",
        "by": "dhouston",
        "time": 1175714200,
        "title": format!("Story {id}"),
        "url": "http://www.getdropbox.com/u/2/screencast.html",
        "score": 111,
        "descendants": kids.len(),
        "kids": kids,
    })
}

fn comment_json(id: u64, parent: u64) -> Value {
    json!({
        "id": id,
        "type": "comment",
        "by": "norvig",
        "time": 1175714300,
        "parent": parent,
        "text": format!("comment {id}"),
    })
}

async fn mount_json(server: &MockServer, route: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// Runs `load_post` to completion, collecting every emitted event.
async fn collect_post(client: &HnClient, id: u64) -> Vec<PostEvent> {
    let mut events = Vec::new();
    load_post(client, id, |event| {
        events.push(event);
        true
    })
    .await;
    events
}

async fn collect_profile(client: &HnClient, id: &str) -> Vec<ProfileEvent> {
    let mut events = Vec::new();
    load_profile(client, id.to_string(), |event| {
        events.push(event);
        true
    })
    .await;
    events
}

fn ids<P>(event: &PhaseEvent<P, Vec<hews::api::Item>>) -> Vec<u64> {
    match event {
        PhaseEvent::SecondaryLoaded(items) => items.iter().map(|i| i.id).collect(),
        _ => panic!("expected secondary collection"),
    }
}

// ============================================================================
// HnClient Tests
// ============================================================================

#[tokio::test]
async fn test_fetch_item_decodes_story() {
    let server = MockServer::start().await;
    mount_json(&server, "/item/8863.json", story_json(8863, &[9224, 8917])).await;

    let client = HnClient::new(Some(server.uri()));
    let item = client.fetch_item(8863).await.unwrap();

    assert_eq!(item.id, 8863);
    assert_eq!(item.kind, ItemKind::Story);
    assert_eq!(item.by.as_deref(), Some("dhouston"));
    assert_eq!(item.kids, vec![9224, 8917]);
    assert_eq!(item.descendants, Some(2));
}

#[tokio::test]
async fn test_fetch_item_null_is_not_found() {
    let server = MockServer::start().await;
    mount_json(&server, "/item/1.json", Value::Null).await;

    let client = HnClient::new(Some(server.uri()));
    let err = client.fetch_item(1).await.unwrap_err();

    assert_eq!(
        err,
        ApiError::NotFound {
            kind: "item",
            id: "1".to_string()
        }
    );
}

#[tokio::test]
async fn test_http_error_status_is_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/user/pg.json"))
        .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
        .mount(&server)
        .await;

    let client = HnClient::new(Some(server.uri()));
    let err = client.fetch_user("pg").await.unwrap_err();

    assert_eq!(
        err,
        ApiError::Api {
            status: 503,
            message: "unavailable".to_string()
        }
    );
    assert_eq!(err.to_string(), "API error (HTTP 503): unavailable");
}

#[tokio::test]
async fn test_malformed_body_is_parse_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/item/5.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{not json"))
        .mount(&server)
        .await;

    let client = HnClient::new(Some(server.uri()));
    assert!(matches!(client.fetch_item(5).await, Err(ApiError::Parse(_))));
}

#[tokio::test]
async fn test_front_page_keeps_rank_order_and_drops_dead() {
    let server = MockServer::start().await;
    mount_json(&server, "/newstories.json", json!([3, 1, 2, 4])).await;
    mount_json(&server, "/item/3.json", story_json(3, &[])).await;
    mount_json(&server, "/item/1.json", story_json(1, &[])).await;
    let mut dead = story_json(2, &[]);
    dead["dead"] = json!(true);
    mount_json(&server, "/item/2.json", dead).await;
    // Past the limit, never requested
    Mock::given(method("GET"))
        .and(path("/item/4.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(story_json(4, &[])))
        .expect(0)
        .mount(&server)
        .await;

    let client = HnClient::new(Some(server.uri()));
    let stories = fetch_main_posts(&client, Category::New, 3).await.unwrap();

    let ids: Vec<u64> = stories.iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![3, 1]);
}

// ============================================================================
// Loader Tests (end to end against the mock server)
// ============================================================================

#[tokio::test]
async fn test_post_then_comments_in_kid_order() {
    let server = MockServer::start().await;
    mount_json(&server, "/item/42.json", story_json(42, &[7, 8])).await;
    mount_json(&server, "/item/7.json", comment_json(7, 42)).await;
    mount_json(&server, "/item/8.json", comment_json(8, 42)).await;

    let client = HnClient::new(Some(server.uri()));
    let events = collect_post(&client, 42).await;

    let mut loader = ItemLoader::default();
    let ticket = loader.start(42);
    assert_eq!(events.len(), 2);
    assert!(matches!(events[0], PhaseEvent::PrimaryLoaded(_)));
    assert_eq!(ids(&events[1]), vec![7, 8]);

    for event in events {
        assert_eq!(loader.apply(ticket, event), Transition::Applied);
    }
    let state = loader.state();
    assert_eq!(state.primary.loaded().map(|p| p.id), Some(42));
    assert_eq!(state.secondary.loaded().map(|c| c.len()), Some(2));
    assert_eq!(state.error, None);
}

#[tokio::test]
async fn test_primary_failure_never_fetches_comments() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/item/42.json"))
        .respond_with(ResponseTemplate::new(504).set_body_string("timeout"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/item/7.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(comment_json(7, 42)))
        .expect(0)
        .mount(&server)
        .await;

    let client = HnClient::new(Some(server.uri()));
    let events = collect_post(&client, 42).await;

    assert_eq!(
        events,
        vec![PhaseEvent::Failed(LoadError(
            "API error (HTTP 504): timeout".to_string()
        ))]
    );

    let mut loader = ItemLoader::default();
    let ticket = loader.start(42);
    for event in events {
        loader.apply(ticket, event);
    }
    assert_eq!(loader.state().secondary, Phase::Loading);
    assert!(loader.state().error.is_some());
}

#[tokio::test]
async fn test_comment_order_survives_slow_responses() {
    let server = MockServer::start().await;
    mount_json(&server, "/item/10.json", story_json(10, &[3, 1, 2])).await;
    Mock::given(method("GET"))
        .and(path("/item/3.json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(comment_json(3, 10))
                .set_delay(Duration::from_millis(150)),
        )
        .mount(&server)
        .await;
    mount_json(&server, "/item/1.json", comment_json(1, 10)).await;
    Mock::given(method("GET"))
        .and(path("/item/2.json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(comment_json(2, 10))
                .set_delay(Duration::from_millis(50)),
        )
        .mount(&server)
        .await;

    let client = HnClient::new(Some(server.uri()));
    let events = collect_post(&client, 10).await;

    assert_eq!(ids(&events[1]), vec![3, 1, 2]);
}

#[tokio::test]
async fn test_post_without_kids_skips_comment_requests() {
    let server = MockServer::start().await;
    let mut post = story_json(5, &[]);
    if let Some(fields) = post.as_object_mut() {
        fields.remove("kids");
    }
    Mock::given(method("GET"))
        .and(path("/item/5.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(post))
        .expect(1)
        .mount(&server)
        .await;

    let client = HnClient::new(Some(server.uri()));
    let events = collect_post(&client, 5).await;

    assert_eq!(events.len(), 2);
    assert_eq!(ids(&events[1]), Vec::<u64>::new());
}

#[tokio::test]
async fn test_profile_requests_first_thirty_submissions() {
    let server = MockServer::start().await;
    let submitted: Vec<u64> = (1..=45).collect();
    mount_json(
        &server,
        "/user/pg.json",
        json!({
            "id": "pg",
            "created": 1160418092,
            "karma": 155111,
            "about": "Bug fixer.",
            "submitted": submitted,
        }),
    )
    .await;
    for id in 1..=30 {
        Mock::given(method("GET"))
            .and(path(format!("/item/{id}.json")))
            .respond_with(ResponseTemplate::new(200).set_body_json(story_json(id, &[])))
            .expect(1)
            .mount(&server)
            .await;
    }
    for id in 31..=45 {
        Mock::given(method("GET"))
            .and(path(format!("/item/{id}.json")))
            .respond_with(ResponseTemplate::new(200).set_body_json(story_json(id, &[])))
            .expect(0)
            .mount(&server)
            .await;
    }

    let client = HnClient::new(Some(server.uri()));
    let events = collect_profile(&client, "pg").await;

    match &events[0] {
        PhaseEvent::PrimaryLoaded(user) => assert_eq!(user.karma, 155111),
        other => panic!("expected user first, got {other:?}"),
    }
    assert_eq!(ids(&events[1]), (1..=30).collect::<Vec<u64>>());

    let mut loader = ProfileLoader::default();
    let ticket = loader.start("pg".to_string());
    for event in events {
        loader.apply(ticket, event);
    }
    assert!(loader.state().secondary.is_loaded());
}

#[tokio::test]
async fn test_unknown_user_fails_profile() {
    let server = MockServer::start().await;
    mount_json(&server, "/user/nobody.json", Value::Null).await;

    let client = HnClient::new(Some(server.uri()));
    let events = collect_profile(&client, "nobody").await;

    assert_eq!(
        events,
        vec![PhaseEvent::Failed(LoadError("user nobody not found".to_string()))]
    );
}
