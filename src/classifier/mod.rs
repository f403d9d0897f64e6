pub mod model;
pub mod normalize;
pub mod predictor;
pub mod vocab;

pub use model::ThemeModel;
pub use normalize::normalize_title;
pub use predictor::ThemePredictor;
pub use vocab::Vocabulary;

use anyhow::Context;
use std::path::Path;

use crate::models::Theme;

/// Token sequence length the model was trained with
pub const SEQUENCE_LENGTH: usize = 10;

/// Pre-trained theme classifier: fixed vocabulary plus loaded weights
///
/// A title is normalized, tokenized against the vocabulary, padded to
/// `SEQUENCE_LENGTH`, and scored by the model; the winning theme is the
/// argmax of the output vector.
#[derive(Debug, Clone)]
pub struct ThemeClassifier {
    vocab: Vocabulary,
    model: ThemeModel,
}

impl ThemeClassifier {
    /// Pairs a vocabulary with model weights, checking they agree in size
    pub fn new(vocab: Vocabulary, model: ThemeModel) -> anyhow::Result<Self> {
        anyhow::ensure!(
            model.embedding_rows() == vocab.len() + 1,
            "model embedding has {} rows but the vocabulary needs {} (including padding)",
            model.embedding_rows(),
            vocab.len() + 1
        );
        Ok(Self { vocab, model })
    }

    /// Loads vocabulary and weights from their artifact files
    ///
    /// Any failure here aborts startup; classification itself never fails.
    pub fn load(keywords_path: &Path, model_path: &Path) -> anyhow::Result<Self> {
        let vocab = Vocabulary::from_keyword_file(keywords_path).context("loading vocabulary")?;
        let model = ThemeModel::from_file(model_path).context("loading model")?;
        Self::new(vocab, model)
    }

    /// Number of distinct vocabulary words
    pub fn vocabulary_size(&self) -> usize {
        self.vocab.len()
    }

    /// Classifies a raw title into a theme
    pub fn predict(&self, title: &str) -> Theme {
        let normalized = normalize_title(title);
        let sequence = self.vocab.featurize(&normalized);
        let scores = self.model.forward(&sequence);

        let mut best: Option<(Theme, f32)> = None;
        for (&theme, &score) in Theme::ALL.iter().zip(scores.iter()) {
            if best.map_or(true, |(_, s)| score > s) {
                best = Some((theme, score));
            }
        }
        best.map(|(theme, _)| theme).unwrap_or(Theme::Badminton)
    }
}
