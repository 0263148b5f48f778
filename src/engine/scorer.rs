use super::mapping::Mapping;
use crate::config::InitStrategy;
use crate::error::{DecipherError, DfResult};
use crate::model::LanguageModel;
use std::collections::BTreeMap;

/// A distinct adjacent pair of ciphertext symbols and how often it occurs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: u8,
    pub to: u8,
    pub count: u32,
}

/// Ciphertext re-encoded over its own distinct symbols. Symbol ids follow the
/// initial ordering, so id `i` is the i-th symbol of that ordering.
#[derive(Debug, Clone)]
pub struct Ciphertext {
    symbols: Vec<char>,
    text: Vec<u8>,
    transitions: Vec<Transition>,
}

impl Ciphertext {
    pub fn parse(raw: &str, init: InitStrategy, max_symbols: usize) -> DfResult<Self> {
        if raw.is_empty() {
            return Err(DecipherError::InvalidInput(
                "ciphertext is empty".to_string(),
            ));
        }

        let mut counts: BTreeMap<char, usize> = BTreeMap::new();
        for c in raw.chars() {
            *counts.entry(c).or_default() += 1;
        }
        if counts.len() > max_symbols {
            return Err(DecipherError::InvalidInput(format!(
                "ciphertext uses {} distinct symbols, the alphabet only has {}",
                counts.len(),
                max_symbols
            )));
        }

        // BTreeMap iteration is code point order; the stable sort keeps it for ties.
        let mut ranked: Vec<(char, usize)> = counts.into_iter().collect();
        if init == InitStrategy::Frequency {
            ranked.sort_by(|a, b| b.1.cmp(&a.1));
        }
        let symbols: Vec<char> = ranked.into_iter().map(|(c, _)| c).collect();

        let ids: BTreeMap<char, u8> = symbols
            .iter()
            .enumerate()
            .map(|(i, &c)| (c, i as u8))
            .collect();
        let text: Vec<u8> = raw.chars().map(|c| ids[&c]).collect();

        let k = symbols.len();
        let mut dense = vec![0u32; k * k];
        for pair in text.windows(2) {
            dense[pair[0] as usize * k + pair[1] as usize] += 1;
        }
        let transitions = dense
            .iter()
            .enumerate()
            .filter(|&(_, &count)| count > 0)
            .map(|(idx, &count)| Transition {
                from: (idx / k) as u8,
                to: (idx % k) as u8,
                count,
            })
            .collect();

        Ok(Self {
            symbols,
            text,
            transitions,
        })
    }

    pub fn symbols(&self) -> &[char] {
        &self.symbols
    }

    pub fn symbol_count(&self) -> usize {
        self.symbols.len()
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    /// Log-likelihood of the text decoded by `mapping`: the sum of bigram
    /// scores over all `len - 1` adjacent pairs (0.0 for a single symbol).
    ///
    /// Panics if `mapping` does not cover every ciphertext symbol.
    #[inline]
    pub fn score(&self, mapping: &Mapping, model: &LanguageModel) -> f64 {
        assert_eq!(
            mapping.len(),
            self.symbols.len(),
            "mapping domain does not match the ciphertext symbols"
        );
        self.transitions
            .iter()
            .map(|t| t.count as f64 * model.score(mapping.image(t.from), mapping.image(t.to)))
            .sum()
    }

    /// Plaintext under `mapping`, optionally only the first `length` symbols.
    pub fn decode(&self, mapping: &Mapping, model: &LanguageModel, length: Option<usize>) -> String {
        let end = length.map_or(self.text.len(), |l| l.min(self.text.len()));
        self.text[..end]
            .iter()
            .map(|&id| model.symbol(mapping.image(id)))
            .collect()
    }
}
