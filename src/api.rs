use crate::config::Config;
use crate::engine::runner::run_restarts;
use crate::error::{DecipherError, DfResult};
use crate::model::LanguageModel;
use crate::text::{clean, default_pool, encrypt, Language};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumString};
use tracing::{info, warn};

/// Read-only language models, one per supported language, shared by all requests.
#[derive(Debug, Default, Clone)]
pub struct ModelRegistry {
    models: HashMap<Language, Arc<LanguageModel>>,
}

impl ModelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, language: Language, model: LanguageModel) {
        self.models.insert(language, Arc::new(model));
    }

    pub fn get(&self, language: Language) -> Option<Arc<LanguageModel>> {
        self.models.get(&language).cloned()
    }

    pub fn languages(&self) -> Vec<Language> {
        Language::iter()
            .filter(|l| self.models.contains_key(l))
            .collect()
    }

    /// Loads `<dir>/<code>.json` for every supported language. Any missing or
    /// corrupt model fails the whole load.
    pub fn load_dir<P: AsRef<Path>>(dir: P) -> DfResult<Self> {
        let dir = dir.as_ref();
        let mut registry = Self::new();
        for language in Language::iter() {
            let path = dir.join(format!("{}.json", language));
            let model = LanguageModel::load_from_file(&path).map_err(|e| {
                DecipherError::Model(format!("{} model at {}: {}", language, path.display(), e))
            })?;
            registry.insert(language, model);
        }
        info!("Model registry ready: {:?}", registry.languages());
        Ok(registry)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    Decipher,
    Encrypt,
}

/// Iteration count as submitted by a client, before validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Iterations {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl Iterations {
    pub fn parse(&self) -> DfResult<usize> {
        let value = match self {
            Iterations::Integer(n) => *n,
            Iterations::Float(f) => {
                return Err(DecipherError::InvalidInput(format!(
                    "iterations must be an integer, got {}",
                    f
                )))
            }
            Iterations::Text(s) => s.trim().parse::<i64>().map_err(|_| {
                DecipherError::InvalidInput(format!("iterations must be an integer, got '{}'", s))
            })?,
        };
        if value <= 0 {
            return Err(DecipherError::InvalidInput(format!(
                "iterations must be positive, got {}",
                value
            )));
        }
        usize::try_from(value)
            .map_err(|_| DecipherError::InvalidInput(format!("iterations too large: {}", value)))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecryptRequest {
    pub mode: Mode,
    pub language: String,
    pub input_text: String,
    #[serde(default)]
    pub iterations: Option<Iterations>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DecryptResponse {
    Deciphered {
        text: String,
        score: f64,
        acceptance_rate: Option<f64>,
    },
    Encrypted {
        text: String,
    },
    InvalidInput {
        message: String,
    },
}

/// Serves one request with a fresh search state. User mistakes come back as
/// `DecryptResponse::InvalidInput`; only internal failures are `Err`.
pub fn handle_request(
    registry: &ModelRegistry,
    request: &DecryptRequest,
    config: &Config,
) -> DfResult<DecryptResponse> {
    match serve(registry, request, config) {
        Err(DecipherError::InvalidInput(message)) => {
            warn!("Rejected request: {}", message);
            Ok(DecryptResponse::InvalidInput { message })
        }
        other => other,
    }
}

fn serve(
    registry: &ModelRegistry,
    request: &DecryptRequest,
    config: &Config,
) -> DfResult<DecryptResponse> {
    let language = Language::from_str(&request.language).map_err(|_| {
        DecipherError::InvalidInput(format!("unknown language '{}'", request.language))
    })?;

    match request.mode {
        Mode::Encrypt => {
            let mut rng = crate::engine::rng::seeded(config.search.seed);
            let text = encrypt(&clean(&request.input_text, language), &default_pool(), &mut rng)?;
            Ok(DecryptResponse::Encrypted { text })
        }
        Mode::Decipher => {
            let model = registry.get(language).ok_or_else(|| {
                DecipherError::InvalidInput(format!("no model loaded for language '{}'", language))
            })?;
            let steps = request
                .iterations
                .as_ref()
                .ok_or_else(|| DecipherError::InvalidInput("iterations is required".to_string()))?
                .parse()?;

            let mut run_config = config.clone();
            run_config.search.steps = steps;
            let outcome = run_restarts(model, &request.input_text, &run_config)?;

            Ok(DecryptResponse::Deciphered {
                text: outcome.decryptor.final_text()?,
                score: outcome.summary.best_score,
                acceptance_rate: outcome.decryptor.acc_rate().ok(),
            })
        }
    }
}
