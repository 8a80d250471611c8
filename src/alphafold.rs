use std::time::{Duration, Instant};

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use tracing::{debug, warn};

use crate::domain::{ModelCandidate, ModelId};
use crate::error::SeekError;

pub trait AlphaFoldClient: Send + Sync {
    /// Lightweight existence check for one model file. HTTP success means
    /// the model exists; any other status means it does not. Transport
    /// errors bubble up so the probe loop can log and move on.
    fn model_exists(&self, model: &ModelId) -> Result<bool, SeekError>;
}

#[derive(Clone)]
pub struct AlphaFoldHttpClient {
    client: Client,
}

impl AlphaFoldHttpClient {
    pub fn new() -> Result<Self, SeekError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&format!("structseek/{}", env!("CARGO_PKG_VERSION")))
                .map_err(|err| SeekError::AlphaFoldHttp(err.to_string()))?,
        );
        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(5))
            .build()
            .map_err(|err| SeekError::AlphaFoldHttp(err.to_string()))?;
        Ok(Self { client })
    }
}

impl AlphaFoldClient for AlphaFoldHttpClient {
    fn model_exists(&self, model: &ModelId) -> Result<bool, SeekError> {
        let url = model_file_url(model);
        let response = self
            .client
            .head(&url)
            .send()
            .map_err(|err| SeekError::AlphaFoldHttp(err.to_string()))?;
        Ok(response.status().is_success())
    }
}

pub fn model_file_url(model: &ModelId) -> String {
    format!("https://alphafold.ebi.ac.uk/files/{}.pdb", model.as_str())
}

pub fn entry_url(accession: &str) -> String {
    format!("https://alphafold.ebi.ac.uk/entry/{accession}")
}

/// Walks the accessions in priority order and returns the first one whose
/// predicted model exists, short-circuiting the remaining probes. A probe
/// that fails or times out counts as "no model under this accession".
/// `deadline` bounds total probe latency; once past it the remaining
/// accessions are skipped and the caller gets a degraded result.
pub fn probe_first_available<'a, C, I>(
    client: &C,
    accessions: I,
    deadline: Instant,
) -> Option<ModelCandidate>
where
    C: AlphaFoldClient + ?Sized,
    I: IntoIterator<Item = &'a str>,
{
    for accession in accessions {
        if Instant::now() >= deadline {
            warn!(accession, "probe budget exhausted, skipping remaining accessions");
            break;
        }
        let model_id = ModelId::for_accession(accession);
        let probe_url = model_file_url(&model_id);
        match client.model_exists(&model_id) {
            Ok(true) => {
                debug!(accession, model = %model_id, "predicted model available");
                return Some(ModelCandidate {
                    accession: accession.to_string(),
                    model_id,
                    probe_url,
                    available: true,
                });
            }
            Ok(false) => {
                debug!(accession, model = %model_id, "no predicted model");
            }
            Err(err) => {
                warn!(accession, %err, "model probe failed, treating as unavailable");
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_urls() {
        let model = ModelId::for_accession("P04637");
        assert_eq!(
            model_file_url(&model),
            "https://alphafold.ebi.ac.uk/files/AF-P04637-F1-model_v4.pdb"
        );
        assert_eq!(
            entry_url("P04637"),
            "https://alphafold.ebi.ac.uk/entry/P04637"
        );
    }
}
