use crate::error::{DecipherError, DfResult};
use fastrand::Rng;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::LazyLock;
use strum_macros::{Display, EnumIter, EnumString};

/// Symbols used by [`encrypt`] when no pool is supplied.
pub const DEFAULT_SYMBOL_POOL: &str =
    "⨒⨓⨔⨕⨖⊣⊢⊥⊤ℕℤℚℝℂ∅⊂⊃⊄⊅⊩⊮⊫⊯⊪⊨⊭∀∃∄⊲⊳⊴⊵⋪⋫⋬⋭≍≭≣≺≻≼≽≾≿∈∋∉∌⊞⊟⊠⊡";

static SPACE_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(" +").expect("static regex is valid"));

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, EnumIter, Display, Serialize, Deserialize,
)]
#[strum(ascii_case_insensitive)]
pub enum Language {
    #[strum(to_string = "ru", serialize = "rus", serialize = "russian")]
    #[serde(rename = "ru", alias = "rus", alias = "russian")]
    Russian,
    #[strum(to_string = "en", serialize = "eng", serialize = "english")]
    #[serde(rename = "en", alias = "eng", alias = "english")]
    English,
}

impl Language {
    /// Lowercase letters of the language, plus the space separator.
    pub fn is_letter(self, c: char) -> bool {
        match self {
            Language::English => c.is_ascii_lowercase() || c == ' ',
            Language::Russian => ('а'..='я').contains(&c) || c == 'ё' || c == ' ',
        }
    }
}

/// Lowercases `s`, keeps only letters of `language`, turns newlines into
/// spaces and collapses runs of spaces.
pub fn clean(s: &str, language: Language) -> String {
    let kept: String = s
        .to_lowercase()
        .chars()
        .filter_map(|c| match c {
            '\n' => Some(' '),
            c if language.is_letter(c) => Some(c),
            _ => None,
        })
        .collect();
    SPACE_RUNS.replace_all(&kept, " ").into_owned()
}

/// Draws a random injective key from the distinct symbols of `text` into `pool`.
pub fn random_key(text: &str, pool: &[char], rng: &mut Rng) -> DfResult<BTreeMap<char, char>> {
    let mut symbols: Vec<char> = text.chars().collect();
    symbols.sort_unstable();
    symbols.dedup();

    let mut targets = pool.to_vec();
    targets.sort_unstable();
    targets.dedup();
    if symbols.len() > targets.len() {
        return Err(DecipherError::InvalidInput(format!(
            "text uses {} distinct symbols but the pool only has {}",
            symbols.len(),
            targets.len()
        )));
    }

    rng.shuffle(&mut targets);
    Ok(symbols.into_iter().zip(targets).collect())
}

pub fn apply_key(text: &str, key: &BTreeMap<char, char>) -> String {
    text.chars().map(|c| key.get(&c).copied().unwrap_or(c)).collect()
}

/// Applies a fresh random substitution to `text`.
pub fn encrypt(text: &str, pool: &[char], rng: &mut Rng) -> DfResult<String> {
    let key = random_key(text, pool, rng)?;
    Ok(apply_key(text, &key))
}

pub fn default_pool() -> Vec<char> {
    DEFAULT_SYMBOL_POOL.chars().collect()
}
