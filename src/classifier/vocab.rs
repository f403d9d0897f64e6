use anyhow::Context;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use super::SEQUENCE_LENGTH;

/// Characters stripped from words when fitting and tokenizing
///
/// Matches the filter set of the tokenizer the model was trained with.
const WORD_FILTERS: &str = "!\"#$%&()*+,-./:;<=>?@[\\]^_`{|}~\t\n";

/// Text-to-token-id mapping fit once at startup from the static keyword list
///
/// Ids start at 1 and are assigned by descending word frequency, with
/// first-occurrence order breaking ties. Id 0 is reserved for padding.
/// Words outside the vocabulary produce no token at all.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    index: HashMap<String, usize>,
}

impl Vocabulary {
    /// Reads the keyword file (one entry per line) and fits the vocabulary
    pub fn from_keyword_file(path: &Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read keyword list {}", path.display()))?;
        let vocab = Self::fit(contents.lines().map(str::trim));
        anyhow::ensure!(
            !vocab.is_empty(),
            "keyword list {} produced an empty vocabulary",
            path.display()
        );
        Ok(vocab)
    }

    /// Fits the word index from keyword entries
    pub fn fit<'a, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        // Insertion-ordered counts so ties keep first-seen order after the
        // stable sort by frequency.
        let mut counts: Vec<(String, usize)> = Vec::new();
        let mut positions: HashMap<String, usize> = HashMap::new();

        for entry in entries {
            for raw in entry.split_whitespace() {
                let word = clean_word(raw);
                if word.is_empty() {
                    continue;
                }
                match positions.get(&word) {
                    Some(&pos) => counts[pos].1 += 1,
                    None => {
                        positions.insert(word.clone(), counts.len());
                        counts.push((word, 1));
                    }
                }
            }
        }

        counts.sort_by(|a, b| b.1.cmp(&a.1));

        let index = counts
            .into_iter()
            .enumerate()
            .map(|(i, (word, _))| (word, i + 1))
            .collect();

        Self { index }
    }

    /// Id for a single word, if in the vocabulary
    pub fn token_id(&self, word: &str) -> Option<usize> {
        self.index.get(&clean_word(word)).copied()
    }

    /// Number of distinct words, excluding the padding id
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Tokenizes a normalized title into a fixed-length id sequence
    ///
    /// Unknown words are skipped. The sequence is brought to
    /// `SEQUENCE_LENGTH` by pre-padding with 0 or pre-truncating (keeping
    /// the last ids), as the training pipeline did.
    pub fn featurize(&self, text: &str) -> [usize; SEQUENCE_LENGTH] {
        let ids: Vec<usize> = text
            .split_whitespace()
            .filter_map(|word| self.token_id(word))
            .collect();

        let mut sequence = [0usize; SEQUENCE_LENGTH];
        let keep = ids.len().min(SEQUENCE_LENGTH);
        let offset = SEQUENCE_LENGTH - keep;
        for (slot, &id) in sequence[offset..].iter_mut().zip(&ids[ids.len() - keep..]) {
            *slot = id;
        }
        sequence
    }
}

/// Lowercases a word and strips the tokenizer's filter characters
fn clean_word(word: &str) -> String {
    word.to_lowercase()
        .chars()
        .filter(|c| !WORD_FILTERS.contains(*c))
        .collect()
}
