use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::{GeneQuery, HUMAN_TAXON, TaxonId};
use crate::error::SeekError;

#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub schema_version: Option<u32>,
    #[serde(default)]
    pub taxon: Option<u32>,
    #[serde(default)]
    pub genes: Vec<GeneEntry>,
    #[serde(default)]
    pub cache_ttl_secs: Option<u64>,
    #[serde(default)]
    pub probe_budget_secs: Option<u64>,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(untagged)]
pub enum GeneEntry {
    Shorthand(String),
    Detailed(GeneEntryObject),
}

#[derive(Debug, Deserialize, Serialize)]
pub struct GeneEntryObject {
    pub symbol: String,
    #[serde(default)]
    pub taxon: Option<u32>,
}

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub schema_version: u32,
    pub queries: Vec<GeneQuery>,
    pub cache_ttl: Duration,
    pub probe_budget: Duration,
}

pub const DEFAULT_CACHE_TTL_SECS: u64 = 600;
pub const DEFAULT_PROBE_BUDGET_SECS: u64 = 20;

pub struct ConfigLoader;

impl ConfigLoader {
    pub fn resolve(path: Option<&str>) -> Result<ResolvedConfig, SeekError> {
        let config_path = match path {
            Some(path) => PathBuf::from(path),
            None => PathBuf::from("structseek.json"),
        };

        if path.is_none() && !config_path.exists() {
            return Err(SeekError::MissingConfig);
        }

        let content = fs::read_to_string(&config_path)
            .map_err(|_| SeekError::ConfigRead(config_path.clone()))?;
        let config: Config = serde_json::from_str(&content)
            .map_err(|err| SeekError::ConfigParse(err.to_string()))?;

        Self::resolve_config(config)
    }

    pub fn resolve_config(config: Config) -> Result<ResolvedConfig, SeekError> {
        let schema_version = config.schema_version.unwrap_or(1);
        let default_taxon = match config.taxon {
            Some(value) => TaxonId::new(value)?,
            None => HUMAN_TAXON,
        };

        let queries = config
            .genes
            .into_iter()
            .map(|entry| match entry {
                GeneEntry::Shorthand(value) => Ok(GeneQuery::new(value.parse()?, default_taxon)),
                GeneEntry::Detailed(obj) => {
                    let taxon = match obj.taxon {
                        Some(value) => TaxonId::new(value)?,
                        None => default_taxon,
                    };
                    Ok(GeneQuery::new(obj.symbol.parse()?, taxon))
                }
            })
            .collect::<Result<Vec<_>, SeekError>>()?;

        Ok(ResolvedConfig {
            schema_version,
            queries,
            cache_ttl: Duration::from_secs(config.cache_ttl_secs.unwrap_or(DEFAULT_CACHE_TTL_SECS)),
            probe_budget: Duration::from_secs(
                config.probe_budget_secs.unwrap_or(DEFAULT_PROBE_BUDGET_SECS),
            ),
        })
    }
}
