use super::LanguageModel;
use crate::error::{DecipherError, DfResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;
use tracing::{debug, info};

/// On-disk form of a language model. Bigrams are keyed by the two-symbol
/// string `"ab"`; the dense table is rebuilt from them at load time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    #[serde(default)]
    pub name: String,
    pub alphabet: Vec<char>,
    pub bigrams: BTreeMap<String, f64>,
}

impl From<&LanguageModel> for ModelArtifact {
    fn from(model: &LanguageModel) -> Self {
        let mut bigrams = BTreeMap::new();
        for &a in model.alphabet() {
            for &b in model.alphabet() {
                // Both symbols come from the alphabet, so the lookup always hits.
                if let Some(score) = model.pair_score(a, b) {
                    bigrams.insert(format!("{}{}", a, b), score);
                }
            }
        }
        Self {
            name: model.name().to_string(),
            alphabet: model.alphabet().to_vec(),
            bigrams,
        }
    }
}

impl TryFrom<ModelArtifact> for LanguageModel {
    type Error = DecipherError;

    fn try_from(artifact: ModelArtifact) -> DfResult<Self> {
        let n = artifact.alphabet.len();
        let position: BTreeMap<char, usize> = artifact
            .alphabet
            .iter()
            .enumerate()
            .map(|(i, &c)| (c, i))
            .collect();

        let mut table: Vec<Option<f64>> = vec![None; n * n];
        for (key, score) in &artifact.bigrams {
            let mut chars = key.chars();
            let (Some(a), Some(b), None) = (chars.next(), chars.next(), chars.next()) else {
                return Err(DecipherError::Model(format!(
                    "bigram key '{}' is not exactly two symbols",
                    key
                )));
            };
            match (position.get(&a), position.get(&b)) {
                (Some(&ia), Some(&ib)) => table[ia * n + ib] = Some(*score),
                _ => {
                    return Err(DecipherError::Model(format!(
                        "bigram key '{}' uses a symbol outside the alphabet",
                        key
                    )))
                }
            }
        }

        let mut dense = Vec::with_capacity(n * n);
        for (idx, entry) in table.into_iter().enumerate() {
            match entry {
                Some(v) => dense.push(v),
                None => {
                    return Err(DecipherError::Model(format!(
                        "bigram table is missing pair '{}{}'",
                        artifact.alphabet[idx / n],
                        artifact.alphabet[idx % n]
                    )))
                }
            }
        }

        LanguageModel::new(artifact.name, artifact.alphabet, dense)
    }
}

impl LanguageModel {
    pub fn from_reader<R: Read>(reader: R) -> DfResult<Self> {
        let artifact: ModelArtifact = serde_json::from_reader(reader)?;
        LanguageModel::try_from(artifact)
    }

    pub fn to_writer<W: Write>(&self, writer: W) -> DfResult<()> {
        serde_json::to_writer_pretty(writer, &ModelArtifact::from(self))?;
        Ok(())
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> DfResult<Self> {
        let path = path.as_ref();
        info!("📂 Loading language model: {}", path.display());
        let file = File::open(path)?;
        let model = Self::from_reader(BufReader::new(file))?;
        debug!(
            "Model '{}' ready: {} symbols, {} bigrams",
            model.name(),
            model.len(),
            model.table().len()
        );
        Ok(model)
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> DfResult<()> {
        let path = path.as_ref();
        let mut writer = BufWriter::new(File::create(path)?);
        self.to_writer(&mut writer)?;
        writer.flush()?;
        info!("💾 Saved language model '{}' to {}", self.name(), path.display());
        Ok(())
    }
}
