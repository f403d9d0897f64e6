use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Firestore REST endpoint
    #[serde(default = "default_firestore_base_url")]
    pub firestore_base_url: String,

    /// Firestore project holding the `articles` and `userHistory` collections
    pub firestore_project_id: String,

    /// Bearer token for Firestore, if the database requires one
    #[serde(default)]
    pub firestore_auth_token: Option<String>,

    /// Path to the keyword list the vocabulary is fit from
    #[serde(default = "default_keywords_path")]
    pub keywords_path: String,

    /// Path to the trained classifier weights
    #[serde(default = "default_model_path")]
    pub model_path: String,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_firestore_base_url() -> String {
    "https://firestore.googleapis.com".to_string()
}

fn default_keywords_path() -> String {
    "keywords.txt".to_string()
}

fn default_model_path() -> String {
    "model.json".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }
}
