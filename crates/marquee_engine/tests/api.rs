use std::sync::Arc;
use std::time::Duration;

use marquee_engine::wire::ListingRecord;
use marquee_engine::{
    ApiPaths, ApiSettings, BrowseFilters, FailureKind, ListingApi, ReqwestTransport,
    TransportError,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn api_for(server: &MockServer) -> ListingApi {
    api_with(server, ApiSettings::default())
}

fn api_with(server: &MockServer, settings: ApiSettings) -> ListingApi {
    let settings = ApiSettings {
        base_url: format!("{}/3", server.uri()),
        access_token: "test-token".to_string(),
        ..settings
    };
    let transport = ReqwestTransport::new(settings).expect("transport");
    ListingApi::new(Arc::new(transport))
}

#[tokio::test]
async fn browse_page_sends_defaults_and_auth() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/3/movie/popular"))
        .and(query_param("page", "2"))
        .and(query_param("language", "zh-CN"))
        .and(query_param("sort_by", "popularity.desc"))
        .and(query_param("include_adult", "false"))
        .and(query_param("include_video", "false"))
        .and(query_param_is_missing("genre_id"))
        .and(header("authorization", "Bearer test-token"))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "page": 2,
            "total_pages": 3,
            "results": [
                {
                    "id": 550,
                    "title": "Fight Club",
                    "poster_path": "/fc.jpg",
                    "vote_average": 8.4,
                    "release_date": "1999-10-15",
                    "overview": "An insomniac office worker."
                },
                { "id": 551, "title": "No Poster", "poster_path": null, "release_date": "" }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let page = api_for(&server).fetch_browse_page(2).await.expect("page");
    assert_eq!(page.page, 2);
    assert_eq!(page.total_pages, 3);
    assert_eq!(
        page.results[1],
        ListingRecord {
            id: 551,
            title: "No Poster".into(),
            poster_path: None,
            vote_average: 0.0,
            release_date: Some(String::new()),
            overview: None,
        }
    );
}

#[tokio::test]
async fn browse_filters_pass_through() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/3/movie/popular"))
        .and(query_param("genre_id", "878"))
        .and(query_param("sort_by", "vote_average.desc"))
        .and(query_param("language", "en-US"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "page": 1, "total_pages": 1, "results": []
        })))
        .expect(1)
        .mount(&server)
        .await;

    let api = api_for(&server)
        .with_language("en-US")
        .with_filters(BrowseFilters {
            sort_by: "vote_average.desc".into(),
            genre: Some("878".into()),
        });
    let page = api.fetch_browse_page(1).await.expect("page");
    assert!(page.results.is_empty());
}

#[tokio::test]
async fn search_query_is_trimmed_and_encoded_once() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/3/search/movie"))
        .and(query_param("query", "spirited away & more"))
        .and(query_param("page", "1"))
        .and(query_param("language", "zh-CN"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "page": 1, "total_pages": 1, "results": [{ "id": 129, "title": "Spirited Away" }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let page = api_for(&server)
        .fetch_search_page("  spirited away & more ", 1)
        .await
        .expect("page");
    assert_eq!(page.results[0].id, 129);
}

#[tokio::test]
async fn detail_and_credits_use_id_paths() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/3/movie/550"))
        .and(query_param("language", "zh-CN"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 550,
            "title": "Fight Club",
            "runtime": 139,
            "vote_average": 8.4,
            "genres": [{ "id": 18, "name": "Drama" }],
            "overview": "",
            "release_date": "1999-10-15"
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/3/movie/550/credits"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 550,
            "cast": [{ "id": 819, "name": "Edward Norton", "character": "The Narrator", "profile_path": null }]
        })))
        .mount(&server)
        .await;

    let api = api_for(&server);
    let detail = api.fetch_detail(550).await.expect("detail");
    assert_eq!(detail.runtime, Some(139));
    assert_eq!(detail.genres[0].name, "Drama");

    let credits = api.fetch_credits(550).await.expect("credits");
    assert_eq!(credits.cast.len(), 1);
    assert_eq!(credits.cast[0].character.as_deref(), Some("The Narrator"));
}

#[tokio::test]
async fn generic_listing_paths_are_supported() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/3/listing/popular"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "page": 1, "total_pages": 0, "results": []
        })))
        .expect(1)
        .mount(&server)
        .await;

    let api = api_for(&server).with_paths(ApiPaths {
        browse: "/listing/popular".into(),
        search: "/search/listing".into(),
        detail_prefix: "/listing".into(),
    });
    let page = api.fetch_browse_page(1).await.expect("page");
    assert_eq!(page.total_pages, 0);
}

#[tokio::test]
async fn non_success_status_is_a_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/3/movie/popular"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "page": 1, "total_pages": 1, "results": []
        })))
        .mount(&server)
        .await;

    let err = api_for(&server).fetch_browse_page(1).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(401));
    assert_eq!(err.message, "API error: 401");
    assert!(err.kind.is_transport());
}

#[tokio::test]
async fn missing_fields_are_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/3/search/movie"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "page": 1 })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/3/movie/popular"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let api = api_for(&server);
    let err = api.fetch_search_page("abc", 1).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::MalformedResponse);
    assert!(!err.kind.is_transport());

    let err = api.fetch_browse_page(1).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::MalformedResponse);
}

#[tokio::test]
async fn slow_response_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/3/movie/popular"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_json(json!({ "page": 1, "total_pages": 1, "results": [] })),
        )
        .mount(&server)
        .await;

    let settings = ApiSettings {
        request_timeout: Duration::from_millis(50),
        ..ApiSettings::default()
    };
    let err = api_with(&server, settings).fetch_browse_page(1).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Timeout);
    assert_eq!(err.message, "timeout");
}

#[tokio::test]
async fn invalid_arguments_never_reach_the_server() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let api = api_for(&server);
    assert_eq!(
        api.fetch_browse_page(0).await.unwrap_err().kind,
        FailureKind::InvalidRequest
    );
    assert_eq!(
        api.fetch_search_page("   ", 1).await.unwrap_err().kind,
        FailureKind::InvalidRequest
    );
    assert_eq!(
        api.fetch_detail(0).await.unwrap_err().kind,
        FailureKind::InvalidRequest
    );
}

#[test]
fn invalid_base_url_is_rejected() {
    let settings = ApiSettings {
        base_url: "not a url".into(),
        ..ApiSettings::default()
    };
    assert!(matches!(
        ReqwestTransport::new(settings),
        Err(TransportError::InvalidUrl(_))
    ));
}

#[test]
fn unusable_access_token_is_a_settings_error() {
    let settings = ApiSettings {
        access_token: "line\nbreak".into(),
        ..ApiSettings::default()
    };
    match ReqwestTransport::new(settings) {
        Err(TransportError::InvalidSettings(message)) => {
            assert!(message.contains("invalid access token"), "{message}");
        }
        other => panic!("expected a settings error, got {other:?}"),
    }
}
