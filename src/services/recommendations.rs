use rand::seq::SliceRandom;
use std::collections::HashMap;

use crate::{
    classifier::ThemePredictor,
    models::{Article, ArticleProjection, Theme},
};

/// Maximum number of articles any selection returns
pub const RECOMMENDATION_LIMIT: usize = 5;

/// Picks up to `limit` articles uniformly at random, without replacement
///
/// Fallback for users with no recorded history. Returns the whole
/// collection when it is smaller than `limit`.
pub fn random_articles(articles: &[Article], limit: usize) -> Vec<ArticleProjection> {
    let mut rng = rand::thread_rng();
    articles
        .choose_multiple(&mut rng, limit.min(articles.len()))
        .map(ArticleProjection::from)
        .collect()
}

/// Picks a theme uniformly at random and collects up to `limit` articles
/// whose predicted theme matches, in collection scan order
pub async fn articles_by_random_theme(
    predictor: &ThemePredictor,
    articles: &[Article],
    limit: usize,
) -> Vec<ArticleProjection> {
    let theme = *Theme::ALL
        .choose(&mut rand::thread_rng())
        .unwrap_or(&Theme::Badminton);
    tracing::debug!(theme = %theme, "Selecting articles by random theme");

    let mut matches = Vec::new();
    for article in articles {
        if predictor.get_theme(&article.title).await == theme {
            matches.push(ArticleProjection::from(article));
        }
        if matches.len() >= limit {
            break;
        }
    }
    matches
}

/// History-driven selection
///
/// Walks the user's viewed article ids in their returned order; ids with
/// no matching article are skipped. Each found article's predicted theme
/// becomes the target for a full scan of the collection. One budget of
/// `RECOMMENDATION_LIMIT` is shared across the outer history walk and the
/// inner scans, so an early history item can exhaust it on its own.
/// Duplicates across history items are not removed.
pub async fn recommend_for_user(
    predictor: &ThemePredictor,
    history_article_ids: &[String],
    articles: &[Article],
) -> Vec<ArticleProjection> {
    let by_id: HashMap<&str, &Article> =
        articles.iter().map(|article| (article.id.as_str(), article)).collect();

    let mut recommended = Vec::new();

    for article_id in history_article_ids {
        if let Some(article) = by_id.get(article_id.as_str()) {
            let target = predictor.get_theme(&article.title).await;
            tracing::debug!(article_id = %article_id, theme = %target, "Scanning for theme matches");

            for candidate in articles {
                if predictor.get_theme(&candidate.title).await == target {
                    recommended.push(ArticleProjection::from(candidate));
                }
                if recommended.len() >= RECOMMENDATION_LIMIT {
                    break;
                }
            }
        }
        if recommended.len() >= RECOMMENDATION_LIMIT {
            break;
        }
    }

    recommended.truncate(RECOMMENDATION_LIMIT);
    recommended
}
