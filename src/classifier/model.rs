use anyhow::Context;
use ndarray::{Array1, Array2};
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::models::Theme;

use super::SEQUENCE_LENGTH;

/// On-disk shape of the pre-trained classifier weights
///
/// `embedding` has one row per token id (row 0 is the padding vector),
/// `dense_weight` has one row per output label.
#[derive(Debug, Clone, Deserialize)]
pub struct ModelArtifact {
    pub labels: Vec<String>,
    pub embedding: Vec<Vec<f32>>,
    pub dense_weight: Vec<Vec<f32>>,
    pub dense_bias: Vec<f32>,
}

/// Loaded classifier weights: embedding lookup, mean pooling, dense layer
#[derive(Debug, Clone)]
pub struct ThemeModel {
    embedding: Array2<f32>,
    dense_weight: Array2<f32>,
    dense_bias: Array1<f32>,
}

impl ThemeModel {
    /// Loads and validates the model artifact
    ///
    /// A missing or malformed file is a fatal startup condition, never a
    /// per-request error.
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read model artifact {}", path.display()))?;
        let artifact: ModelArtifact = serde_json::from_str(&contents)
            .with_context(|| format!("failed to parse model artifact {}", path.display()))?;
        Self::from_artifact(artifact)
    }

    /// Builds the model from a parsed artifact, validating every dimension
    pub fn from_artifact(artifact: ModelArtifact) -> anyhow::Result<Self> {
        let expected: Vec<&str> = Theme::ALL.iter().map(Theme::label).collect();
        anyhow::ensure!(
            artifact.labels == expected,
            "model labels {:?} do not match the theme enumeration {:?}",
            artifact.labels,
            expected
        );

        let embedding = to_matrix(artifact.embedding).context("embedding matrix")?;
        let dense_weight = to_matrix(artifact.dense_weight).context("dense weight matrix")?;
        let dense_bias = Array1::from_vec(artifact.dense_bias);

        anyhow::ensure!(
            dense_weight.ncols() == embedding.ncols(),
            "dense weight width {} does not match embedding dimension {}",
            dense_weight.ncols(),
            embedding.ncols()
        );
        anyhow::ensure!(
            dense_weight.nrows() == Theme::ALL.len() && dense_bias.len() == Theme::ALL.len(),
            "dense layer must have exactly {} outputs",
            Theme::ALL.len()
        );

        Ok(Self {
            embedding,
            dense_weight,
            dense_bias,
        })
    }

    /// Number of embedding rows, i.e. vocabulary size plus the padding row
    pub fn embedding_rows(&self) -> usize {
        self.embedding.nrows()
    }

    /// Scores a padded token-id sequence, one score per theme
    ///
    /// Embeddings are mean-pooled over all positions (padding contributes
    /// the row-0 vector) and fed through the dense layer. Ids outside the
    /// embedding table score as padding.
    pub fn forward(&self, sequence: &[usize; SEQUENCE_LENGTH]) -> Array1<f32> {
        let mut pooled = Array1::<f32>::zeros(self.embedding.ncols());
        for &id in sequence {
            let row = if id < self.embedding.nrows() { id } else { 0 };
            pooled += &self.embedding.row(row);
        }
        pooled /= SEQUENCE_LENGTH as f32;

        self.dense_weight.dot(&pooled) + &self.dense_bias
    }
}

/// Converts a row-major nested vector into a 2-d array, rejecting ragged input
fn to_matrix(rows: Vec<Vec<f32>>) -> anyhow::Result<Array2<f32>> {
    let nrows = rows.len();
    anyhow::ensure!(nrows > 0, "matrix has no rows");
    let ncols = rows[0].len();
    anyhow::ensure!(ncols > 0, "matrix has no columns");

    let mut flat = Vec::with_capacity(nrows * ncols);
    for (i, row) in rows.into_iter().enumerate() {
        anyhow::ensure!(
            row.len() == ncols,
            "row {} has {} columns, expected {}",
            i,
            row.len(),
            ncols
        );
        flat.extend(row);
    }

    Array2::from_shape_vec((nrows, ncols), flat).context("building matrix")
}
