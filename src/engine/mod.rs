pub mod history;
pub mod mapping;
pub mod rng;
pub mod runner;
pub mod scorer;

use self::history::History;
use self::mapping::Mapping;
use self::rng::RandomSource;
use self::scorer::Ciphertext;
use crate::config::{EngineParams, InitStrategy, SearchParams};
use crate::error::{DecipherError, DfResult};
use crate::model::LanguageModel;
use fastrand::Rng;
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    pub steps: usize,
    /// Plateau length (steps without a new best score) that ends the run.
    pub early_stop: Option<usize>,
    pub report_every: Option<usize>,
    pub preview_len: Option<usize>,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            steps: 5_000,
            early_stop: Some(1_000),
            report_every: None,
            preview_len: Some(100),
        }
    }
}

impl From<&SearchParams> for RunOptions {
    fn from(p: &SearchParams) -> Self {
        Self {
            steps: p.steps,
            early_stop: (p.early_stop > 0).then_some(p.early_stop),
            report_every: (p.report_every > 0).then_some(p.report_every),
            preview_len: Some(p.preview_len),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunSummary {
    pub steps_taken: usize,
    pub accepted: usize,
    pub stopped_early: bool,
    pub best_score: f64,
}

/// Search state for one ciphertext.
#[derive(Debug, Clone)]
struct Chain {
    cipher: Ciphertext,
    mapping: Mapping,
    score: f64,
    best_mapping: Mapping,
    best_score: f64,
    history: History,
}

/// Metropolis-Hastings search over substitution keys for a single ciphertext.
///
/// The language model is shared and read-only; everything else belongs to
/// this instance, so independent searches never see each other's state.
pub struct Decryptor<R: RandomSource = Rng> {
    model: Arc<LanguageModel>,
    params: EngineParams,
    rng: R,
    chain: Option<Chain>,
}

impl Decryptor<Rng> {
    pub fn new(model: Arc<LanguageModel>, params: EngineParams, seed: Option<u64>) -> Self {
        Self::with_rng(model, params, rng::seeded(seed))
    }
}

impl<R: RandomSource> Decryptor<R> {
    pub fn with_rng(model: Arc<LanguageModel>, params: EngineParams, rng: R) -> Self {
        Self {
            model,
            params,
            rng,
            chain: None,
        }
    }

    pub fn model(&self) -> &LanguageModel {
        &self.model
    }

    pub fn params(&self) -> &EngineParams {
        &self.params
    }

    pub fn is_initialized(&self) -> bool {
        self.chain.is_some()
    }

    fn chain(&self) -> DfResult<&Chain> {
        self.chain.as_ref().ok_or(DecipherError::NotInitialized)
    }

    /// Loads a new ciphertext and resets the search. On error the previous
    /// state, if any, is kept as it was.
    pub fn start_from(&mut self, text: &str, init: InitStrategy) -> DfResult<()> {
        let cipher = Ciphertext::parse(text, init, self.model.len())?;
        let mapping = Mapping::prefix(cipher.symbol_count());
        let score = cipher.score(&mapping, &self.model);

        debug!(
            "Loaded ciphertext: {} symbols, {} distinct, initial score {:.3}",
            cipher.len(),
            cipher.symbol_count(),
            score
        );

        self.chain = Some(Chain {
            best_mapping: mapping.clone(),
            best_score: score,
            cipher,
            mapping,
            score,
            history: History::default(),
        });
        Ok(())
    }

    pub fn compute_score(&self, mapping: &Mapping) -> DfResult<f64> {
        let chain = self.chain()?;
        Ok(chain.cipher.score(mapping, &self.model))
    }

    /// One propose/accept-or-reject iteration. Returns whether the swap was kept.
    pub fn metropolis_step(&mut self) -> DfResult<bool> {
        let chain = self.chain.as_mut().ok_or(DecipherError::NotInitialized)?;
        let n = chain.cipher.symbol_count();
        if n < 2 {
            chain.history.record(false, chain.score);
            return Ok(false);
        }

        let idx_a = self.rng.index(n);
        let mut idx_b = self.rng.index(n - 1);
        if idx_b >= idx_a {
            idx_b += 1;
        }

        chain.mapping.swap(idx_a, idx_b);
        let old_score = chain.score;
        let new_score = chain.cipher.score(&chain.mapping, &self.model);

        // The uniform draw happens on every step, even when the move improves.
        let metropolis_condition =
            self.rng.unit().ln() < (new_score - old_score) * self.params.scaling_factor;
        let accepted = new_score > old_score || (!self.params.broken && metropolis_condition);

        if accepted {
            chain.score = new_score;
            if new_score > chain.best_score {
                chain.best_score = new_score;
                chain.best_mapping.clone_from(&chain.mapping);
            }
        } else {
            chain.mapping.swap(idx_a, idx_b);
        }

        chain.history.record(accepted, chain.score);
        Ok(accepted)
    }

    /// Steps until `options.steps` is exhausted or the best score has not
    /// improved for `options.early_stop` consecutive steps.
    pub fn run(&mut self, options: &RunOptions) -> DfResult<RunSummary> {
        let patience = options.early_stop.filter(|&p| p > 0);
        let report_every = options.report_every.filter(|&e| e > 0);

        if report_every.is_some() {
            let chain = self.chain()?;
            info!(
                "Initial text   : {}",
                self.decrypt(&chain.mapping, options.preview_len)?
            );
        }

        let mut not_improving = 0usize;
        let mut steps_taken = 0usize;
        let mut accepted = 0usize;
        let mut stopped_early = false;

        for step_num in 0..options.steps {
            let old_best = self.best_score()?;
            if self.metropolis_step()? {
                accepted += 1;
            }
            steps_taken += 1;

            if self.best_score()? > old_best {
                not_improving = 0;
            } else {
                not_improving += 1;
            }
            if Some(not_improving) == patience {
                stopped_early = true;
                break;
            }

            if let Some(every) = report_every {
                if (step_num + 1) % every == 0 {
                    let chain = self.chain()?;
                    info!(
                        "Iteration {:5}: {}",
                        step_num + 1,
                        self.decrypt(&chain.mapping, options.preview_len)?
                    );
                }
            }
        }

        let best_score = self.best_score()?;
        if report_every.is_some() {
            info!(
                "Best score     : {}",
                self.decrypt(self.best_mapping()?, options.preview_len)?
            );
        }
        debug!(
            "Run finished: {} steps, {} accepted, best {:.3}{}",
            steps_taken,
            accepted,
            best_score,
            if stopped_early { " (plateau)" } else { "" }
        );

        Ok(RunSummary {
            steps_taken,
            accepted,
            stopped_early,
            best_score,
        })
    }

    pub fn decrypt(&self, mapping: &Mapping, length: Option<usize>) -> DfResult<String> {
        let chain = self.chain()?;
        Ok(chain.cipher.decode(mapping, &self.model, length))
    }

    /// Best decryption found so far over the full ciphertext.
    pub fn final_text(&self) -> DfResult<String> {
        let chain = self.chain()?;
        Ok(chain.cipher.decode(&chain.best_mapping, &self.model, None))
    }

    pub fn acc_rate(&self) -> DfResult<f64> {
        self.chain()?.history.acceptance_rate()
    }

    pub fn current_mapping(&self) -> DfResult<&Mapping> {
        Ok(&self.chain()?.mapping)
    }

    pub fn best_mapping(&self) -> DfResult<&Mapping> {
        Ok(&self.chain()?.best_mapping)
    }

    pub fn current_score(&self) -> DfResult<f64> {
        Ok(self.chain()?.score)
    }

    pub fn best_score(&self) -> DfResult<f64> {
        Ok(self.chain()?.best_score)
    }

    pub fn history(&self) -> DfResult<&History> {
        Ok(&self.chain()?.history)
    }

    /// Domain of the mapping, in the order chosen at initialization.
    pub fn symbols(&self) -> DfResult<&[char]> {
        Ok(self.chain()?.cipher.symbols())
    }

    /// Best key as (ciphertext symbol, plaintext symbol) pairs in domain order.
    pub fn best_key(&self) -> DfResult<Vec<(char, char)>> {
        let chain = self.chain()?;
        Ok(chain
            .cipher
            .symbols()
            .iter()
            .enumerate()
            .map(|(i, &c)| (c, self.model.symbol(chain.best_mapping.image(i as u8))))
            .collect())
    }
}
