use super::LanguageModel;
use crate::error::{DecipherError, DfResult};
use crate::text::{clean, Language};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{debug, info};

/// Raw corpus statistics gathered line by line.
#[derive(Debug, Default, Clone)]
pub struct CorpusCounts {
    /// Letters in first-appearance order with their counts.
    pub monograms: Vec<(char, u64)>,
    pub bigrams: HashMap<(char, char), u64>,
    index: HashMap<char, usize>,
}

impl CorpusCounts {
    fn bump_monogram(&mut self, c: char) {
        match self.index.get(&c) {
            Some(&i) => self.monograms[i].1 += 1,
            None => {
                self.index.insert(c, self.monograms.len());
                self.monograms.push((c, 1));
            }
        }
    }

    /// Counts one raw corpus line. The line is normalized first; a bigram is
    /// only counted when both of its symbols are letters of `language`.
    pub fn add_line(&mut self, line: &str, language: Language) {
        let cleaned: Vec<char> = clean(line, language).chars().collect();
        let Some(&last) = cleaned.last() else {
            return;
        };

        for pair in cleaned.windows(2) {
            if language.is_letter(pair[0]) {
                self.bump_monogram(pair[0]);
                if language.is_letter(pair[1]) {
                    *self.bigrams.entry((pair[0], pair[1])).or_default() += 1;
                }
            }
        }
        if language.is_letter(last) {
            self.bump_monogram(last);
        }
    }

    /// Alphabet ordered by descending count; equal counts keep first-appearance order.
    pub fn alphabet(&self) -> Vec<char> {
        let mut ranked = self.monograms.clone();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.into_iter().map(|(c, _)| c).collect()
    }

    /// Laplace-smoothed log-score table: `ln(count + 1)` for every ordered pair.
    pub fn into_model(self, name: impl Into<String>) -> DfResult<LanguageModel> {
        let alphabet = self.alphabet();
        if alphabet.is_empty() {
            return Err(DecipherError::Model(
                "corpus contains no letters of the requested language".to_string(),
            ));
        }
        let bigrams = self.bigrams;
        LanguageModel::from_fn(name, alphabet, |a, b| {
            let count = bigrams.get(&(a, b)).copied().unwrap_or(0);
            ((count + 1) as f64).ln()
        })
    }
}

pub fn train_from_reader<R: BufRead>(reader: R, language: Language) -> DfResult<LanguageModel> {
    let mut counts = CorpusCounts::default();
    let mut lines_read = 0usize;
    for line in reader.lines() {
        let mut line = line?;
        // Line breaks act as word separators, same as inside a line.
        line.push('\n');
        counts.add_line(&line, language);
        lines_read += 1;
    }

    debug!(
        "Scanned {} lines: {} letters, {} distinct bigrams",
        lines_read,
        counts.monograms.len(),
        counts.bigrams.len()
    );

    counts.into_model(language.to_string())
}

pub fn train_from_file<P: AsRef<Path>>(path: P, language: Language) -> DfResult<LanguageModel> {
    let path = path.as_ref();
    info!("📚 Training {} bigram model from {}", language, path.display());
    let file = File::open(path)?;
    train_from_reader(BufReader::new(file), language)
}
