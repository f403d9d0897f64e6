use std::path::Path;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use sportspot_api::api::{create_router, AppState};
use sportspot_api::classifier::{ThemeClassifier, ThemePredictor};
use sportspot_api::config::Config;
use sportspot_api::store::FirestoreStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env()?;

    // Vocabulary and model are fatal if absent; never a per-request error.
    let classifier = ThemeClassifier::load(
        Path::new(&config.keywords_path),
        Path::new(&config.model_path),
    )?;
    tracing::info!(
        vocabulary_size = classifier.vocabulary_size(),
        "Classifier loaded"
    );

    let store = FirestoreStore::new(
        config.firestore_base_url.clone(),
        config.firestore_project_id.clone(),
        config.firestore_auth_token.clone(),
    );

    let state = AppState::new(Arc::new(store), ThemePredictor::new(classifier));
    let app = create_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(addr = %addr, "Server running");
    axum::serve(listener, app).await?;

    Ok(())
}
