pub mod artifact;
pub mod trainer;

use crate::error::{DecipherError, DfResult};
use std::collections::HashMap;

/// Symbols are addressed by `u8` ids, so an alphabet holds at most this many.
pub const MAX_ALPHABET: usize = 256;

/// Immutable order-1 language model: an ordered alphabet plus a dense
/// row-major table of bigram log-scores, `table[a * n + b]`.
#[derive(Debug, Clone, PartialEq)]
pub struct LanguageModel {
    name: String,
    alphabet: Vec<char>,
    ids: HashMap<char, u8>,
    table: Vec<f64>,
}

impl LanguageModel {
    pub fn new(name: impl Into<String>, alphabet: Vec<char>, table: Vec<f64>) -> DfResult<Self> {
        let n = alphabet.len();
        if n == 0 {
            return Err(DecipherError::Model("alphabet is empty".to_string()));
        }
        if n > MAX_ALPHABET {
            return Err(DecipherError::Model(format!(
                "alphabet has {} symbols, at most {} are supported",
                n, MAX_ALPHABET
            )));
        }
        if table.len() != n * n {
            return Err(DecipherError::Model(format!(
                "bigram table has {} entries, expected {} for a {}-symbol alphabet",
                table.len(),
                n * n,
                n
            )));
        }
        if let Some(pos) = table.iter().position(|v| !v.is_finite()) {
            return Err(DecipherError::Model(format!(
                "bigram score for '{}{}' is not finite",
                alphabet[pos / n],
                alphabet[pos % n]
            )));
        }

        let mut ids = HashMap::with_capacity(n);
        for (i, &c) in alphabet.iter().enumerate() {
            if ids.insert(c, i as u8).is_some() {
                return Err(DecipherError::Model(format!(
                    "alphabet symbol '{}' appears more than once",
                    c
                )));
            }
        }

        Ok(Self {
            name: name.into(),
            alphabet,
            ids,
            table,
        })
    }

    /// Builds the table by evaluating `score` for every ordered symbol pair.
    pub fn from_fn<F>(name: impl Into<String>, alphabet: Vec<char>, score: F) -> DfResult<Self>
    where
        F: Fn(char, char) -> f64,
    {
        let mut table = Vec::with_capacity(alphabet.len() * alphabet.len());
        for &a in &alphabet {
            for &b in &alphabet {
                table.push(score(a, b));
            }
        }
        Self::new(name, alphabet, table)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn alphabet(&self) -> &[char] {
        &self.alphabet
    }

    pub fn len(&self) -> usize {
        self.alphabet.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alphabet.is_empty()
    }

    pub fn table(&self) -> &[f64] {
        &self.table
    }

    pub fn symbol(&self, id: u8) -> char {
        self.alphabet[id as usize]
    }

    pub fn id_of(&self, c: char) -> Option<u8> {
        self.ids.get(&c).copied()
    }

    #[inline(always)]
    pub fn score(&self, a: u8, b: u8) -> f64 {
        self.table[a as usize * self.alphabet.len() + b as usize]
    }

    pub fn pair_score(&self, a: char, b: char) -> Option<f64> {
        Some(self.score(self.id_of(a)?, self.id_of(b)?))
    }
}
