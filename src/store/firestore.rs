/// Firestore REST v1 client
///
/// Full-collection reads list `…/documents/{collection}` and follow page
/// tokens; the per-user history read issues a `runQuery` with an equality
/// field filter. Every failure is surfaced immediately with the store's
/// own message; nothing is retried.
use reqwest::{Client as HttpClient, RequestBuilder};
use serde::Deserialize;
use serde_json::json;

use crate::{
    error::{AppError, AppResult},
    models::{Article, UserHistoryEntry},
    store::ArticleStore,
};

const ARTICLES_COLLECTION: &str = "articles";
const HISTORY_COLLECTION: &str = "userHistory";
const PAGE_SIZE: u32 = 300;

#[derive(Clone)]
pub struct FirestoreStore {
    http_client: HttpClient,
    base_url: String,
    project_id: String,
    auth_token: Option<String>,
}

/// A document as the REST API returns it: resource name plus typed fields
#[derive(Debug, Deserialize)]
struct FirestoreDocument {
    name: String,
    #[serde(default)]
    fields: serde_json::Map<String, serde_json::Value>,
}

impl FirestoreDocument {
    /// Document id: the last segment of the resource name
    fn id(&self) -> &str {
        self.name.rsplit('/').next().unwrap_or(&self.name)
    }

    /// String field value, defaulting to "" when absent or of another type
    fn string_field(&self, field: &str) -> String {
        self.fields
            .get(field)
            .and_then(|value| value.get("stringValue"))
            .and_then(|value| value.as_str())
            .unwrap_or_default()
            .to_string()
    }

    fn into_article(self) -> Article {
        Article {
            id: self.id().to_string(),
            title: self.string_field("title"),
            link: self.string_field("link"),
            image_link: self.string_field("imageLink"),
            time: self.string_field("time"),
        }
    }

    fn into_history_entry(self) -> UserHistoryEntry {
        UserHistoryEntry {
            id: self.id().to_string(),
            user_id: self.string_field("userId"),
            article_id: self.string_field("articleId"),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ListDocumentsResponse {
    #[serde(default)]
    documents: Vec<FirestoreDocument>,
    #[serde(default, rename = "nextPageToken")]
    next_page_token: Option<String>,
}

/// One element of a `runQuery` response stream; trailing elements carry
/// read metadata and no document
#[derive(Debug, Deserialize)]
struct RunQueryResult {
    document: Option<FirestoreDocument>,
}

impl FirestoreStore {
    pub fn new(base_url: String, project_id: String, auth_token: Option<String>) -> Self {
        Self {
            http_client: HttpClient::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            project_id,
            auth_token,
        }
    }

    fn documents_url(&self) -> String {
        format!(
            "{}/v1/projects/{}/databases/(default)/documents",
            self.base_url, self.project_id
        )
    }

    fn with_auth(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.auth_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Lists every document of a collection, following page tokens
    async fn list_collection(&self, collection: &str) -> AppResult<Vec<FirestoreDocument>> {
        let url = format!("{}/{}", self.documents_url(), collection);
        let mut documents = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut request = self
                .http_client
                .get(&url)
                .query(&[("pageSize", PAGE_SIZE.to_string())]);
            if let Some(token) = &page_token {
                request = request.query(&[("pageToken", token.as_str())]);
            }

            let response = self.with_auth(request).send().await?;
            if !response.status().is_success() {
                let status = response.status();
                let body = response.text().await.unwrap_or_default();
                tracing::error!(
                    collection = %collection,
                    status = %status,
                    body = %body,
                    "Firestore list request failed"
                );
                return Err(AppError::Store(format!(
                    "Firestore returned status {}: {}",
                    status, body
                )));
            }

            let page: ListDocumentsResponse = response.json().await?;
            documents.extend(page.documents);

            match page.next_page_token {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => break,
            }
        }

        tracing::debug!(collection = %collection, count = documents.len(), "Collection listed");
        Ok(documents)
    }

    /// Runs an equality-filtered structured query against a collection
    async fn query_equal(
        &self,
        collection: &str,
        field: &str,
        value: &str,
    ) -> AppResult<Vec<FirestoreDocument>> {
        let url = format!("{}:runQuery", self.documents_url());
        let body = json!({
            "structuredQuery": {
                "from": [{ "collectionId": collection }],
                "where": {
                    "fieldFilter": {
                        "field": { "fieldPath": field },
                        "op": "EQUAL",
                        "value": { "stringValue": value }
                    }
                }
            }
        });

        let response = self.with_auth(self.http_client.post(&url).json(&body)).send().await?;
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!(
                collection = %collection,
                field = %field,
                status = %status,
                body = %body,
                "Firestore query failed"
            );
            return Err(AppError::Store(format!(
                "Firestore returned status {}: {}",
                status, body
            )));
        }

        let results: Vec<RunQueryResult> = response.json().await?;
        Ok(results.into_iter().filter_map(|r| r.document).collect())
    }
}

#[async_trait::async_trait]
impl ArticleStore for FirestoreStore {
    async fn fetch_articles(&self) -> AppResult<Vec<Article>> {
        let documents = self.list_collection(ARTICLES_COLLECTION).await?;
        Ok(documents
            .into_iter()
            .map(FirestoreDocument::into_article)
            .collect())
    }

    async fn fetch_user_history(&self, user_id: &str) -> AppResult<Vec<UserHistoryEntry>> {
        let documents = self
            .query_equal(HISTORY_COLLECTION, "userId", user_id)
            .await?;
        Ok(documents
            .into_iter()
            .map(FirestoreDocument::into_history_entry)
            .collect())
    }

    async fn fetch_all_history(&self) -> AppResult<Vec<UserHistoryEntry>> {
        let documents = self.list_collection(HISTORY_COLLECTION).await?;
        Ok(documents
            .into_iter()
            .map(FirestoreDocument::into_history_entry)
            .collect())
    }
}
