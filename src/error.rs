use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum SeekError {
    #[error("invalid gene symbol: {0}")]
    InvalidGeneSymbol(String),

    #[error("invalid taxon id: {0}")]
    InvalidTaxonId(String),

    #[error("no reviewed UniProt entry found for gene: {0}")]
    GeneNotFound(String),

    #[error("UniProt request failed: {0}")]
    UniprotHttp(String),

    #[error("UniProt returned status {status}: {message}")]
    UniprotStatus { status: u16, message: String },

    #[error("malformed UniProt response: {0}")]
    MalformedResponse(String),

    #[error("AlphaFold request failed: {0}")]
    AlphaFoldHttp(String),

    #[error("missing config file structseek.json in current directory")]
    MissingConfig,

    #[error("failed to read config file at {0}")]
    ConfigRead(PathBuf),

    #[error("failed to parse JSON config: {0}")]
    ConfigParse(String),

    #[error("output error: {0}")]
    Output(String),
}
