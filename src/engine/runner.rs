use super::{Decryptor, RunOptions, RunSummary};
use crate::config::Config;
use crate::error::{DecipherError, DfResult};
use crate::model::LanguageModel;
use rayon::prelude::*;
use std::sync::Arc;
use tracing::info;

pub struct RestartOutcome {
    /// Index of the winning chain among the restarts.
    pub chain_index: usize,
    pub seed: Option<u64>,
    pub decryptor: Decryptor,
    pub summary: RunSummary,
    pub restarts: usize,
}

/// Runs `config.search.restarts` independent chains on the same ciphertext
/// and keeps the one with the highest best score (ties go to the lowest index).
/// Chain `i` is seeded with `seed + i`, so a fixed seed is reproducible
/// regardless of thread scheduling.
pub fn run_restarts(
    model: Arc<LanguageModel>,
    text: &str,
    config: &Config,
) -> DfResult<RestartOutcome> {
    config.validate()?;
    let restarts = config.search.restarts;
    let options = RunOptions::from(&config.search);

    if restarts > 1 {
        info!(
            "🔥 Running {} independent chains of {} steps",
            restarts, options.steps
        );
    }

    let results: Vec<(usize, Option<u64>, Decryptor, RunSummary)> = (0..restarts)
        .into_par_iter()
        .map(|i| {
            let seed = config.search.seed.map(|s| s.wrapping_add(i as u64));
            let mut decryptor = Decryptor::new(model.clone(), config.engine.clone(), seed);
            decryptor.start_from(text, config.search.init)?;
            let summary = decryptor.run(&options)?;
            Ok((i, seed, decryptor, summary))
        })
        .collect::<DfResult<Vec<_>>>()?;

    let mut best: Option<(usize, Option<u64>, Decryptor, RunSummary)> = None;
    for entry in results {
        let better = match &best {
            Some(current) => entry.3.best_score > current.3.best_score,
            None => true,
        };
        if better {
            best = Some(entry);
        }
    }

    // `restarts >= 1` is checked by `validate`, so at least one chain ran.
    let (chain_index, seed, decryptor, summary) =
        best.ok_or_else(|| DecipherError::Config("no chains were run".to_string()))?;

    if restarts > 1 {
        info!(
            "🏆 Chain #{} won with best score {:.3}",
            chain_index, summary.best_score
        );
    }

    Ok(RestartOutcome {
        chain_index,
        seed,
        decryptor,
        summary,
        restarts,
    })
}
