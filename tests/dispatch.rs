mod common;

use chrono::Duration;
use common::{Fixture, ScriptedPrompt, API_KEY};
use itad_client::collection::types::{NewCopy, Price};
use itad_client::errors::ErrorKind;
use itad_client::notes::types::Note;
use itad_client::{AuthKind, Core, RequestDescriptor, Resource};
use reqwest::Method;
use wiremock::matchers::{body_json, header, header_exists, method, path, query_param};
use wiremock::{Match, Mock, Request, ResponseTemplate};

/// Any request carrying the static API key
struct HasKeyParam;

impl Match for HasKeyParam {
    fn matches(&self, request: &Request) -> bool {
        request.url.query_pairs().any(|(key, _)| key == "key")
    }
}

async fn forbid_bearer(fixture: &Fixture) {
    Mock::given(header_exists("authorization"))
        .respond_with(ResponseTemplate::new(500))
        .with_priority(1)
        .expect(0)
        .mount(&fixture.server)
        .await;
}

async fn forbid_key(fixture: &Fixture) {
    Mock::given(HasKeyParam)
        .respond_with(ResponseTemplate::new(500))
        .with_priority(1)
        .expect(0)
        .mount(&fixture.server)
        .await;
}

#[tokio::test]
async fn api_key_requests_never_send_a_bearer() {
    let fixture = Fixture::new().await;
    forbid_bearer(&fixture).await;

    Mock::given(method("GET"))
        .and(path("/games/search/v1"))
        .and(query_param("key", API_KEY))
        .and(query_param("title", "tekken 8"))
        .and(query_param("results", "999"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {
                "id": "018d937f-0a4f-72a9-a6ce-c4c5a0e9e4b1",
                "slug": "tekken-8",
                "title": "TEKKEN 8",
                "type": "game",
                "mature": false,
                "assets": {"boxart": "https://assets.isthereanydeal.com/boxart.jpg"}
            }
        ])))
        .expect(1)
        .mount(&fixture.server)
        .await;

    let prompt = ScriptedPrompt::default();
    let core = Core::new(fixture.config.clone(), prompt.clone()).expect("core");
    let games = core.search_games("tekken 8", Some(999)).await.expect("search");
    assert_eq!(games.len(), 1);
    assert_eq!(games[0].title(), "TEKKEN 8");
    assert_eq!(games[0].kind().as_deref(), Some("game"));
    assert!(games[0].assets().contains_key("boxart"));

    assert_eq!(prompt.calls(), 0);
    assert!(!fixture.token_path().exists());
}

#[tokio::test]
async fn oauth_requests_never_send_the_key() {
    let fixture = Fixture::new().await;
    fixture.store_token("stored-access", Duration::hours(1)).await;
    forbid_key(&fixture).await;

    Mock::given(method("GET"))
        .and(path("/collection/games/v1"))
        .and(header("authorization", "Bearer stored-access"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {
                "id": "018d937f-3a3b-7210-bd2d-0d1dfb1d84c0",
                "slug": "red-dead-redemption-2",
                "title": "Red Dead Redemption 2",
                "type": "game",
                "mature": true,
                "assets": {},
                "added": "2024-02-10T18:21:05+01:00"
            }
        ])))
        .expect(1)
        .mount(&fixture.server)
        .await;

    let core = Core::new(fixture.config.clone(), ScriptedPrompt::default()).expect("core");
    let games = core.collection().await.expect("collection");
    assert_eq!(games.len(), 1);
    assert!(*games[0].mature());
    assert!(games[0].added().is_some());
}

#[tokio::test]
async fn client_errors_carry_status_and_body() {
    let fixture = Fixture::new().await;

    Mock::given(method("GET"))
        .and(path("/games/info/v2"))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
            "status_code": 404,
            "reason_phrase": "Not Found",
            "details": "Game not found"
        })))
        .mount(&fixture.server)
        .await;

    let core = Core::new(fixture.config.clone(), ScriptedPrompt::default()).expect("core");
    let err = core.game_info("missing").await.expect_err("found a missing game");
    match err.kind() {
        ErrorKind::ClientRequest { status, body } => {
            assert_eq!(*status, 404);
            assert_eq!(body["reason_phrase"], "Not Found");
        }
        kind => panic!("unexpected error kind {:?}", kind),
    }

    assert_eq!(core.game_title("missing").await.expect("title lookup"), None);
    assert_eq!(
        core.game_titles(&["missing", "also-missing"])
            .await
            .expect("titles"),
        vec![None, None]
    );
}

#[tokio::test]
async fn non_json_client_error_body_is_kept_as_text() {
    let fixture = Fixture::new().await;

    Mock::given(method("GET"))
        .and(path("/service/shops/v1"))
        .respond_with(ResponseTemplate::new(403).set_body_string("Forbidden"))
        .mount(&fixture.server)
        .await;

    let core = Core::new(fixture.config.clone(), ScriptedPrompt::default()).expect("core");
    let err = core.shops(None).await.expect_err("forbidden");
    match err.kind() {
        ErrorKind::ClientRequest { status, body } => {
            assert_eq!(*status, 403);
            assert_eq!(body, &serde_json::json!("Forbidden"));
        }
        kind => panic!("unexpected error kind {:?}", kind),
    }
}

#[tokio::test]
async fn server_errors_are_service_unavailable() {
    let fixture = Fixture::new().await;

    Mock::given(method("GET"))
        .and(path("/service/shops/v1"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&fixture.server)
        .await;

    let core = Core::new(fixture.config.clone(), ScriptedPrompt::default()).expect("core");
    let err = core.shops(Some("CZ")).await.expect_err("server error");
    assert!(matches!(
        err.kind(),
        ErrorKind::ServiceUnavailable { status: Some(503) }
    ));
}

#[tokio::test]
async fn unreachable_server_is_service_unavailable() {
    let fixture = Fixture::new().await;
    let config = fixture.config.clone().with_base_url("http://127.0.0.1:9");

    let core = Core::new(config, ScriptedPrompt::default()).expect("core");
    let err = core.shops(None).await.expect_err("nothing listens there");
    assert!(matches!(
        err.kind(),
        ErrorKind::ServiceUnavailable { status: None }
    ));
}

#[tokio::test]
async fn mutations_send_json_bodies() {
    let fixture = Fixture::new().await;
    fixture.store_token("stored-access", Duration::hours(1)).await;

    Mock::given(method("PUT"))
        .and(path("/waitlist/games/v1"))
        .and(body_json(serde_json::json!(["game-a", "game-b"])))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&fixture.server)
        .await;

    Mock::given(method("POST"))
        .and(path("/collection/copies/v1"))
        .and(body_json(serde_json::json!([{
            "gameId": "game-a",
            "redeemed": true,
            "shop": 61,
            "price": {"amount": 9.99, "currency": "EUR"},
            "note": null,
            "tags": null
        }])))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&fixture.server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/user/notes/v1"))
        .and(body_json(serde_json::json!([{"gid": "game-a", "note": "gift"}])))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&fixture.server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/collection/groups/v1"))
        .and(body_json(serde_json::json!([3, 4])))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&fixture.server)
        .await;

    let core = Core::new(fixture.config.clone(), ScriptedPrompt::default()).expect("core");
    core.add_to_waitlist(&["game-a", "game-b"])
        .await
        .expect("waitlist put");

    let mut copy = NewCopy::new("game-a", true);
    copy.shop = Some(61);
    copy.price = Some(Price::eur(9.99));
    core.add_copies(&[copy]).await.expect("copies post");

    core.set_notes(&[Note::new("game-a", "gift")])
        .await
        .expect("notes put");
    core.delete_groups(&[3, 4]).await.expect("groups delete");
}

#[tokio::test]
async fn created_group_is_returned() {
    let fixture = Fixture::new().await;
    fixture.store_token("stored-access", Duration::hours(1)).await;

    Mock::given(method("POST"))
        .and(path("/collection/groups/v1"))
        .and(body_json(serde_json::json!({"title": "Backlog", "public": false})))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": 12,
            "title": "Backlog",
            "public": false
        })))
        .expect(1)
        .mount(&fixture.server)
        .await;

    let core = Core::new(fixture.config.clone(), ScriptedPrompt::default()).expect("core");
    let group = core.create_group("Backlog", false).await.expect("create group");
    assert_eq!(*group.id(), 12);
    assert_eq!(group.title(), "Backlog");
    assert!(group.position().is_none());
}

#[tokio::test]
async fn raw_send_uses_the_given_credential() {
    let fixture = Fixture::new().await;
    forbid_bearer(&fixture).await;

    Mock::given(method("GET"))
        .and(path("/games/info/v2"))
        .and(query_param("id", "game-a"))
        .and(query_param("key", API_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "game-a",
            "slug": "game-a",
            "title": "Game A"
        })))
        .expect(2)
        .mount(&fixture.server)
        .await;

    let core = Core::new(fixture.config.clone(), ScriptedPrompt::default()).expect("core");
    let descriptor =
        RequestDescriptor::new(Method::GET, "games/info/v2").with_query("id", "game-a");
    let value = core
        .send(descriptor, AuthKind::ApiKey)
        .await
        .expect("raw send");
    assert_eq!(value["title"], "Game A");

    let value = core
        .call(
            Resource::GameInfo,
            vec![("id".to_string(), "game-a".to_string())],
            None,
        )
        .await
        .expect("table call");
    assert_eq!(value["slug"], "game-a");
}

#[tokio::test]
async fn copies_are_requested_for_game_ids() {
    let fixture = Fixture::new().await;
    fixture.store_token("stored-access", Duration::hours(1)).await;

    Mock::given(method("GET"))
        .and(path("/collection/copies/v1"))
        .and(body_json(serde_json::json!(["game-a"])))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([{
            "id": 41,
            "game": {"id": "game-a"},
            "redeemed": true,
            "shop": {"id": 61, "name": "Steam"},
            "price": {"amount": 9.99, "currency": "EUR"},
            "note": null,
            "tags": ["gift"],
            "added": "2024-05-01T10:00:00+02:00"
        }])))
        .expect(1)
        .mount(&fixture.server)
        .await;

    let core = Core::new(fixture.config.clone(), ScriptedPrompt::default()).expect("core");
    let copies = core.copies(&["game-a"]).await.expect("copies");
    assert_eq!(copies.len(), 1);
    assert_eq!(copies[0].shop().as_ref().map(|shop| shop.name().as_str()), Some("Steam"));
    assert_eq!(copies[0].price().as_ref(), Some(&Price::eur(9.99)));

    let err = core
        .call(Resource::Copies, Vec::new(), None)
        .await
        .expect_err("copies without ids");
    assert!(matches!(err.kind(), ErrorKind::InvalidRequest));
}
