use crate::error::{DecipherError, DfResult};
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Per-step accept/reject decisions and the current score after each step.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct History {
    accepted: Vec<bool>,
    scores: Vec<f64>,
}

#[derive(Serialize)]
struct HistoryRow {
    step: usize,
    accepted: bool,
    score: f64,
}

impl History {
    pub fn record(&mut self, accepted: bool, score: f64) {
        self.accepted.push(accepted);
        self.scores.push(score);
    }

    pub fn clear(&mut self) {
        self.accepted.clear();
        self.scores.clear();
    }

    pub fn len(&self) -> usize {
        self.accepted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accepted.is_empty()
    }

    pub fn accepted(&self) -> &[bool] {
        &self.accepted
    }

    pub fn scores(&self) -> &[f64] {
        &self.scores
    }

    pub fn accepted_count(&self) -> usize {
        self.accepted.iter().filter(|&&a| a).count()
    }

    /// Accepted steps as a percentage of all recorded steps.
    pub fn acceptance_rate(&self) -> DfResult<f64> {
        if self.accepted.is_empty() {
            return Err(DecipherError::EmptyHistory);
        }
        Ok(100.0 * self.accepted_count() as f64 / self.accepted.len() as f64)
    }

    /// Writes `step,accepted,score` rows, one per recorded step (1-based).
    pub fn write_csv<W: Write>(&self, writer: W) -> DfResult<()> {
        let mut wtr = csv::Writer::from_writer(writer);
        for (i, (&accepted, &score)) in self.accepted.iter().zip(&self.scores).enumerate() {
            wtr.serialize(HistoryRow {
                step: i + 1,
                accepted,
                score,
            })?;
        }
        wtr.flush()?;
        Ok(())
    }

    pub fn save_csv<P: AsRef<Path>>(&self, path: P) -> DfResult<()> {
        self.write_csv(File::create(path)?)
    }
}

pub fn format_rate(rate: f64) -> String {
    format!("{:.2}%", rate)
}
