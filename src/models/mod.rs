use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Sports theme assigned to an article title by the classifier
///
/// Variant order matches the classifier's output vector: argmax ties
/// resolve toward the earlier variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Badminton,
    Basket,
    Voli,
}

impl Theme {
    /// All themes, in classifier output order
    pub const ALL: [Theme; 3] = [Theme::Badminton, Theme::Basket, Theme::Voli];

    /// Label string as it appears in the model artifact
    pub fn label(&self) -> &'static str {
        match self {
            Theme::Badminton => "badminton",
            Theme::Basket => "basket",
            Theme::Voli => "voli",
        }
    }
}

impl Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Article document from the remote `articles` collection
///
/// Externally owned and read-only; every field beyond the document id
/// defaults to an empty string when absent upstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub link: String,
    #[serde(default, rename = "imageLink")]
    pub image_link: String,
    #[serde(default)]
    pub time: String,
}

/// Record from the `userHistory` collection linking a user to an article
/// they have viewed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserHistoryEntry {
    pub id: String,
    #[serde(default, rename = "userId")]
    pub user_id: String,
    #[serde(default, rename = "articleId")]
    pub article_id: String,
}

/// Article shape returned by article-serving endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleProjection {
    pub title: String,
    pub link: String,
    #[serde(rename = "imageLink")]
    pub image_link: String,
    pub time: String,
}

impl From<&Article> for ArticleProjection {
    fn from(article: &Article) -> Self {
        Self {
            title: article.title.clone(),
            link: article.link.clone(),
            image_link: article.image_link.clone(),
            time: article.time.clone(),
        }
    }
}
