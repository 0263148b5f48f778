#![allow(dead_code)]

use cipherforge::config::EngineParams;
use cipherforge::engine::rng::RandomSource;
use cipherforge::engine::Decryptor;
use cipherforge::model::LanguageModel;
use std::collections::VecDeque;
use std::sync::Arc;

/// Alphabet `[a, b, c]` where only the bigram "ab" scores high.
pub fn abc_model() -> Arc<LanguageModel> {
    let model = LanguageModel::from_fn("abc", vec!['a', 'b', 'c'], |x, y| {
        if x == 'a' && y == 'b' {
            10.0
        } else {
            0.01
        }
    })
    .expect("valid model");
    Arc::new(model)
}

/// Every bigram scores the same, so no swap can ever change the score.
pub fn flat_model(symbols: &str) -> Arc<LanguageModel> {
    Arc::new(LanguageModel::from_fn("flat", symbols.chars().collect(), |_, _| -1.0).unwrap())
}

/// Small alphabet with uneven, moderate scores.
pub fn graded_model(symbols: &str) -> Arc<LanguageModel> {
    let alphabet: Vec<char> = symbols.chars().collect();
    let n = alphabet.len() as f64;
    let lookup = alphabet.clone();
    let index = move |c: char| lookup.iter().position(|&x| x == c).unwrap() as f64;
    Arc::new(
        LanguageModel::from_fn("graded", alphabet, |a, b| {
            -((index(a) * n + index(b)) * 0.37).sin().abs() - 0.05 * index(b)
        })
        .unwrap(),
    )
}

pub fn params(scaling_factor: f64, broken: bool) -> EngineParams {
    EngineParams {
        scaling_factor,
        broken,
    }
}

pub fn seeded_decryptor(model: Arc<LanguageModel>, seed: u64) -> Decryptor {
    Decryptor::new(model, EngineParams::default(), Some(seed))
}

/// Replays fixed draws so a test controls exactly which swap is proposed
/// and what the acceptance draw is.
pub struct ScriptedRng {
    pub indices: VecDeque<usize>,
    pub units: VecDeque<f64>,
}

impl ScriptedRng {
    pub fn new(indices: &[usize], units: &[f64]) -> Self {
        Self {
            indices: indices.iter().copied().collect(),
            units: units.iter().copied().collect(),
        }
    }
}

impl RandomSource for ScriptedRng {
    fn index(&mut self, n: usize) -> usize {
        let i = self.indices.pop_front().expect("script ran out of indices");
        assert!(i < n, "scripted index {} out of range 0..{}", i, n);
        i
    }

    fn unit(&mut self) -> f64 {
        self.units.pop_front().expect("script ran out of uniform draws")
    }
}
