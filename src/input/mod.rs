use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::Deserialize;

#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("request is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid request: {0}")]
    Invalid(String),
}

/// One input peptide: its candidate sequence windows (semicolon-joined,
/// the way upstream site annotation emits them) and one regulation call
/// per experiment, `null` where the peptide was not quantified.
#[derive(Debug, Clone, Deserialize)]
pub struct PeptideRecord {
    pub windows: String,
    #[serde(default)]
    pub weight: Option<f64>,
    pub regulations: Vec<Option<String>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EnrichmentRequest {
    pub experiments: Vec<String>,
    pub peptides: Vec<PeptideRecord>,
}

pub fn load_request(path: &Path) -> Result<EnrichmentRequest, InputError> {
    let file = File::open(path)?;
    let request: EnrichmentRequest = serde_json::from_reader(BufReader::new(file))?;
    validate_request(&request)?;
    Ok(request)
}

fn validate_request(request: &EnrichmentRequest) -> Result<(), InputError> {
    for (i, name) in request.experiments.iter().enumerate() {
        if name.is_empty() {
            return Err(InputError::Invalid(format!(
                "experiment {} has an empty name",
                i
            )));
        }
        if request.experiments[..i].contains(name) {
            return Err(InputError::Invalid(format!(
                "duplicate experiment name {:?}",
                name
            )));
        }
    }

    for (i, peptide) in request.peptides.iter().enumerate() {
        if peptide.regulations.len() != request.experiments.len() {
            return Err(InputError::Invalid(format!(
                "peptide {} has {} regulation calls for {} experiments",
                i,
                peptide.regulations.len(),
                request.experiments.len()
            )));
        }
        if let Some(weight) = peptide.weight {
            if !(weight.is_finite() && weight > 0.0 && weight <= 1.0) {
                return Err(InputError::Invalid(format!(
                    "peptide {} has weight {} outside (0, 1]",
                    i, weight
                )));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/tests.rs"]
mod tests;
