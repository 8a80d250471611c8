use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use serde::Deserialize;
use tracing::debug;

use crate::domain::{AccessionSet, CrossReferenceRecord, GeneQuery, GeneSymbol};
use crate::error::SeekError;

/// Everything the resolver needs from one UniProt search: the accession
/// identity of the gene's product and the raw cross-references attached to
/// the same entry. Both come out of a single HTTP fetch.
#[derive(Debug, Clone)]
pub struct GeneEntry {
    pub accessions: AccessionSet,
    pub cross_references: Vec<CrossReferenceRecord>,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    results: Vec<SearchResult>,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    #[serde(rename = "primaryAccession")]
    primary_accession: String,
    #[serde(rename = "secondaryAccessions", default)]
    secondary_accessions: Vec<String>,
    #[serde(rename = "uniProtKBCrossReferences", default)]
    cross_references: Vec<CrossReferenceRecord>,
}

pub trait UniprotClient: Send + Sync {
    fn search(&self, query: &GeneQuery) -> Result<GeneEntry, SeekError>;
}

#[derive(Clone)]
pub struct UniprotHttpClient {
    client: Client,
}

impl UniprotHttpClient {
    pub fn new() -> Result<Self, SeekError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&format!("structseek/{}", env!("CARGO_PKG_VERSION")))
                .map_err(|err| SeekError::UniprotHttp(err.to_string()))?,
        );
        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|err| SeekError::UniprotHttp(err.to_string()))?;
        Ok(Self { client })
    }

    pub fn search_url(query: &GeneQuery) -> String {
        format!(
            "https://rest.uniprot.org/uniprotkb/search?query=reviewed:true+AND+organism_id:{}+AND+gene_exact:{}&format=json",
            query.taxon, query.symbol
        )
    }

    fn send_with_retry<F>(&self, mut make_req: F) -> Result<reqwest::blocking::Response, SeekError>
    where
        F: FnMut() -> reqwest::blocking::RequestBuilder,
    {
        const MAX_RETRIES: usize = 1;
        const BASE_DELAY_MS: u64 = 200;
        let mut attempt = 0usize;
        loop {
            let response = make_req().send();
            match response {
                Ok(resp) => {
                    let status = resp.status().as_u16();
                    if attempt < MAX_RETRIES && is_retryable_status(status) {
                        let delay = BASE_DELAY_MS * (attempt as u64 + 1);
                        std::thread::sleep(Duration::from_millis(delay));
                        attempt += 1;
                        continue;
                    }
                    return Ok(resp);
                }
                Err(err) => {
                    if attempt < MAX_RETRIES && is_retryable_error(&err) {
                        let delay = BASE_DELAY_MS * (attempt as u64 + 1);
                        std::thread::sleep(Duration::from_millis(delay));
                        attempt += 1;
                        continue;
                    }
                    return Err(SeekError::UniprotHttp(err.to_string()));
                }
            }
        }
    }

    fn handle_status(
        response: reqwest::blocking::Response,
    ) -> Result<reqwest::blocking::Response, SeekError> {
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status().as_u16();
        let message = response
            .text()
            .unwrap_or_else(|_| "UniProt request failed".to_string());
        Err(SeekError::UniprotStatus { status, message })
    }
}

impl UniprotClient for UniprotHttpClient {
    fn search(&self, query: &GeneQuery) -> Result<GeneEntry, SeekError> {
        let url = Self::search_url(query);
        debug!(%url, "uniprot search");

        let response = self.send_with_retry(|| self.client.get(&url))?;
        let response = Self::handle_status(response)?;
        let body = response
            .text()
            .map_err(|err| SeekError::UniprotHttp(err.to_string()))?;

        parse_search_response(&body, &query.symbol)
    }
}

/// Parses a UniProt search response body into a [`GeneEntry`].
///
/// The first result is taken as the canonical entry; its primary accession
/// leads the probe priority order and its secondary accessions follow in
/// record order. An empty results list means the gene does not exist as a
/// reviewed entry in the requested taxon.
pub fn parse_search_response(body: &str, gene: &GeneSymbol) -> Result<GeneEntry, SeekError> {
    let parsed: SearchResponse =
        serde_json::from_str(body).map_err(|err| SeekError::MalformedResponse(err.to_string()))?;

    let Some(first) = parsed.results.into_iter().next() else {
        return Err(SeekError::GeneNotFound(gene.as_str().to_string()));
    };

    if first.primary_accession.is_empty() {
        return Err(SeekError::MalformedResponse(
            "empty primaryAccession in search result".to_string(),
        ));
    }

    Ok(GeneEntry {
        accessions: AccessionSet::new(first.primary_accession, first.secondary_accessions),
        cross_references: first.cross_references,
    })
}

fn is_retryable_status(status: u16) -> bool {
    matches!(status, 429 | 500 | 502 | 503 | 504)
}

fn is_retryable_error(err: &reqwest::Error) -> bool {
    err.is_timeout() || err.is_connect()
}
