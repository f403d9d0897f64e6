use std::sync::Arc;

use axum_test::TestServer;
use serde_json::json;

use sportspot_api::api::{create_router, AppState};
use sportspot_api::classifier::model::ModelArtifact;
use sportspot_api::classifier::{ThemeClassifier, ThemeModel, ThemePredictor, Vocabulary};
use sportspot_api::error::{AppError, AppResult};
use sportspot_api::models::{Article, UserHistoryEntry};
use sportspot_api::store::ArticleStore;

mockall::mock! {
    pub Store {}

    #[async_trait::async_trait]
    impl ArticleStore for Store {
        async fn fetch_articles(&self) -> AppResult<Vec<Article>>;
        async fn fetch_user_history(&self, user_id: &str) -> AppResult<Vec<UserHistoryEntry>>;
        async fn fetch_all_history(&self) -> AppResult<Vec<UserHistoryEntry>>;
    }
}

/// Classifier over a three-word vocabulary, one word per theme:
/// smash → badminton, dunk → basket, spike → voli.
fn keyword_classifier() -> ThemeClassifier {
    let vocab = Vocabulary::fit(["smash", "dunk", "spike"]);
    let artifact = ModelArtifact {
        labels: vec!["badminton".into(), "basket".into(), "voli".into()],
        embedding: vec![
            vec![0.0, 0.0, 0.0],
            vec![1.0, 0.0, 0.0],
            vec![0.0, 1.0, 0.0],
            vec![0.0, 0.0, 1.0],
        ],
        dense_weight: vec![
            vec![1.0, 0.0, 0.0],
            vec![0.0, 1.0, 0.0],
            vec![0.0, 0.0, 1.0],
        ],
        dense_bias: vec![0.0, 0.0, 0.0],
    };
    let model = ThemeModel::from_artifact(artifact).unwrap();
    ThemeClassifier::new(vocab, model).unwrap()
}

fn create_test_server(store: MockStore) -> TestServer {
    let state = AppState::new(Arc::new(store), ThemePredictor::new(keyword_classifier()));
    let app = create_router(state);
    TestServer::new(app).unwrap()
}

fn article(id: &str, title: &str) -> Article {
    Article {
        id: id.to_string(),
        title: title.to_string(),
        link: format!("https://example.com/{id}"),
        image_link: format!("https://example.com/{id}.jpg"),
        time: "2024-05-01".to_string(),
    }
}

fn history_entry(id: &str, user_id: &str, article_id: &str) -> UserHistoryEntry {
    UserHistoryEntry {
        id: id.to_string(),
        user_id: user_id.to_string(),
        article_id: article_id.to_string(),
    }
}

#[tokio::test]
async fn test_health_check() {
    let server = create_test_server(MockStore::new());
    let response = server.get("/health").await;
    response.assert_status_ok();
}

#[tokio::test]
async fn test_recommend_without_user_id() {
    // The store must not be consulted at all: no expectations set.
    let server = create_test_server(MockStore::new());

    let response = server.post("/recommend_articles").json(&json!({})).await;

    response.assert_status(axum::http::StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"], "Missing userId in request");
}

#[tokio::test]
async fn test_recommend_with_empty_user_id() {
    let server = create_test_server(MockStore::new());

    let response = server
        .post("/recommend_articles")
        .json(&json!({ "userId": "" }))
        .await;

    response.assert_status(axum::http::StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"], "Missing userId in request");
}

#[tokio::test]
async fn test_recommend_without_history_returns_whole_small_collection() {
    let mut store = MockStore::new();
    store
        .expect_fetch_user_history()
        .withf(|user_id| user_id == "u1")
        .returning(|_| Ok(vec![]));
    store.expect_fetch_articles().returning(|| {
        Ok(vec![
            article("a1", "smash final"),
            article("a2", "dunk recap"),
            article("a3", "spike drill"),
        ])
    });

    let server = create_test_server(store);
    let response = server
        .post("/recommend_articles")
        .json(&json!({ "userId": "u1" }))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    let recommended = body["recommended_articles"].as_array().unwrap();
    // Three articles in the store, all returned (3 < 5), order unspecified.
    assert_eq!(recommended.len(), 3);
    let mut titles: Vec<&str> = recommended
        .iter()
        .map(|a| a["title"].as_str().unwrap())
        .collect();
    titles.sort_unstable();
    assert_eq!(titles, vec!["dunk recap", "smash final", "spike drill"]);
}

#[tokio::test]
async fn test_recommend_theme_matches_in_collection_order() {
    let mut store = MockStore::new();
    store
        .expect_fetch_user_history()
        .withf(|user_id| user_id == "u2")
        .returning(|_| Ok(vec![history_entry("h1", "u2", "v1")]));
    store.expect_fetch_articles().returning(|| {
        let mut articles: Vec<Article> = (0..8)
            .map(|i| article(&format!("s{i}"), &format!("smash story {i}")))
            .collect();
        articles.insert(2, article("v1", "spike serve"));
        articles.push(article("v2", "spike block"));
        Ok(articles)
    });

    let server = create_test_server(store);
    let response = server
        .post("/recommend_articles")
        .json(&json!({ "userId": "u2" }))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    let recommended = body["recommended_articles"].as_array().unwrap();
    // Exactly the two voli articles, in scan order.
    assert_eq!(recommended.len(), 2);
    assert_eq!(recommended[0]["title"], "spike serve");
    assert_eq!(recommended[1]["title"], "spike block");
    // Projection shape: no id, camelCase imageLink.
    assert!(recommended[0].get("id").is_none());
    assert_eq!(recommended[0]["imageLink"], "https://example.com/v1.jpg");
}

#[tokio::test]
async fn test_recommend_caps_at_five() {
    let mut store = MockStore::new();
    store
        .expect_fetch_user_history()
        .returning(|_| Ok(vec![history_entry("h1", "u3", "b0")]));
    store.expect_fetch_articles().returning(|| {
        Ok((0..9)
            .map(|i| article(&format!("b{i}"), "dunk highlights"))
            .collect())
    });

    let server = create_test_server(store);
    let response = server
        .post("/recommend_articles")
        .json(&json!({ "userId": "u3" }))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["recommended_articles"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn test_recommend_history_fetch_failure() {
    let mut store = MockStore::new();
    store
        .expect_fetch_user_history()
        .returning(|_| Err(AppError::Store("firestore unreachable".to_string())));

    let server = create_test_server(store);
    let response = server
        .post("/recommend_articles")
        .json(&json!({ "userId": "u4" }))
        .await;

    response.assert_status(axum::http::StatusCode::INTERNAL_SERVER_ERROR);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"], "firestore unreachable");
}

#[tokio::test]
async fn test_user_history_empty_collection() {
    let mut store = MockStore::new();
    store.expect_fetch_all_history().returning(|| Ok(vec![]));

    let server = create_test_server(store);
    let response = server.get("/user_history").await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body, json!({ "user_history": [] }));
}

#[tokio::test]
async fn test_user_history_lists_every_record() {
    let mut store = MockStore::new();
    store.expect_fetch_all_history().returning(|| {
        Ok(vec![
            history_entry("h1", "u1", "a1"),
            history_entry("h2", "u2", "a2"),
        ])
    });

    let server = create_test_server(store);
    let response = server.get("/user_history").await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    let entries = body["user_history"].as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["id"], "h1");
    assert_eq!(entries[0]["userId"], "u1");
    assert_eq!(entries[0]["articleId"], "a1");
}

#[tokio::test]
async fn test_user_history_store_failure() {
    let mut store = MockStore::new();
    store
        .expect_fetch_all_history()
        .returning(|| Err(AppError::Store("permission denied".to_string())));

    let server = create_test_server(store);
    let response = server.get("/user_history").await;

    response.assert_status(axum::http::StatusCode::INTERNAL_SERVER_ERROR);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"], "permission denied");
}

#[tokio::test]
async fn test_responses_carry_request_id_header() {
    let mut store = MockStore::new();
    store.expect_fetch_all_history().returning(|| Ok(vec![]));

    let server = create_test_server(store);
    let response = server.get("/user_history").await;

    response.assert_status_ok();
    assert!(response.headers().contains_key("x-request-id"));
}
