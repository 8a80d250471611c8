use std::fmt;
use std::str::FromStr;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::SeekError;

/// Gene symbol as typed by the caller. Case is preserved because UniProt's
/// `gene_exact` filter is case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GeneSymbol(String);

impl GeneSymbol {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GeneSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for GeneSymbol {
    type Err = SeekError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        let pattern = Regex::new(r"^[A-Za-z0-9][A-Za-z0-9_.-]*$").unwrap();
        if !pattern.is_match(trimmed) {
            return Err(SeekError::InvalidGeneSymbol(value.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }
}

/// NCBI taxonomy identifier of the organism the gene is searched in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaxonId(u32);

/// Homo sapiens, the default organism for the CLI.
pub const HUMAN_TAXON: TaxonId = TaxonId(9606);

impl TaxonId {
    pub fn new(value: u32) -> Result<Self, SeekError> {
        if value == 0 {
            return Err(SeekError::InvalidTaxonId(value.to_string()));
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for TaxonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TaxonId {
    type Err = SeekError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let parsed = value
            .trim()
            .parse::<u32>()
            .map_err(|_| SeekError::InvalidTaxonId(value.to_string()))?;
        Self::new(parsed)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GeneQuery {
    pub symbol: GeneSymbol,
    pub taxon: TaxonId,
}

impl GeneQuery {
    pub fn new(symbol: GeneSymbol, taxon: TaxonId) -> Self {
        Self { symbol, taxon }
    }
}

impl fmt::Display for GeneQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.symbol, self.taxon)
    }
}

/// UniProt identity of the gene's protein product: the canonical accession
/// plus any secondary (historical or merged) accessions in record order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccessionSet {
    primary: String,
    secondary: Vec<String>,
}

impl AccessionSet {
    pub fn new(primary: String, secondary: Vec<String>) -> Self {
        Self { primary, secondary }
    }

    pub fn primary(&self) -> &str {
        &self.primary
    }

    pub fn secondary(&self) -> &[String] {
        &self.secondary
    }

    /// Accessions in probe priority order: primary first, then secondary
    /// accessions as the source record listed them.
    pub fn priority_order(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.primary.as_str()).chain(self.secondary.iter().map(String::as_str))
    }
}

/// Predicted-model identifier derived from an accession by the fixed
/// AlphaFold naming rule.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ModelId(String);

impl ModelId {
    pub fn for_accession(accession: &str) -> Self {
        Self(format!("AF-{accession}-F1-model_v4"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Outcome of a successful model probe: which accession the model was found
/// under, and where it was probed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelCandidate {
    pub accession: String,
    pub model_id: ModelId,
    pub probe_url: String,
    pub available: bool,
}

/// One raw cross-reference entry from a UniProt record, as received.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrossReferenceRecord {
    pub database: String,
    pub id: String,
}

/// Final resolver output: everything downstream geometry and presentation
/// components need, including the degraded no-model case.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedStructureSet {
    pub query: GeneQuery,
    pub accessions: AccessionSet,
    pub model: Option<ModelCandidate>,
    pub pdb_ids: Vec<String>,
    pub resolved_at: String,
}

impl ResolvedStructureSet {
    /// Ordered structure identifiers for the geometry engine: the predicted
    /// model first when one was found, then the experimental entries.
    pub fn structure_ids(&self) -> Vec<String> {
        let mut ids = Vec::with_capacity(self.pdb_ids.len() + 1);
        if let Some(model) = &self.model {
            ids.push(model.model_id.as_str().to_string());
        }
        ids.extend(self.pdb_ids.iter().cloned());
        ids
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn parse_gene_symbol_valid() {
        let symbol: GeneSymbol = " BRCA1 ".parse().unwrap();
        assert_eq!(symbol.as_str(), "BRCA1");
    }

    #[test]
    fn parse_gene_symbol_preserves_case() {
        let symbol: GeneSymbol = "Trp53".parse().unwrap();
        assert_eq!(symbol.as_str(), "Trp53");
    }

    #[test]
    fn parse_gene_symbol_invalid() {
        let err = "".parse::<GeneSymbol>().unwrap_err();
        assert_matches!(err, SeekError::InvalidGeneSymbol(_));

        let err = "BRCA 1".parse::<GeneSymbol>().unwrap_err();
        assert_matches!(err, SeekError::InvalidGeneSymbol(_));
    }

    #[test]
    fn parse_taxon_id() {
        let taxon: TaxonId = "9606".parse().unwrap();
        assert_eq!(taxon, HUMAN_TAXON);

        let err = "0".parse::<TaxonId>().unwrap_err();
        assert_matches!(err, SeekError::InvalidTaxonId(_));

        let err = "human".parse::<TaxonId>().unwrap_err();
        assert_matches!(err, SeekError::InvalidTaxonId(_));
    }

    #[test]
    fn model_id_naming_rule() {
        let id = ModelId::for_accession("P38398");
        assert_eq!(id.as_str(), "AF-P38398-F1-model_v4");
    }

    #[test]
    fn priority_order_puts_primary_first() {
        let set = AccessionSet::new(
            "P38398".to_string(),
            vec!["O15129".to_string(), "Q1RMC1".to_string()],
        );
        let ordered: Vec<&str> = set.priority_order().collect();
        assert_eq!(ordered, vec!["P38398", "O15129", "Q1RMC1"]);
    }

    #[test]
    fn structure_ids_model_first() {
        let set = ResolvedStructureSet {
            query: GeneQuery::new("BRCA1".parse().unwrap(), HUMAN_TAXON),
            accessions: AccessionSet::new("P38398".to_string(), Vec::new()),
            model: Some(ModelCandidate {
                accession: "P38398".to_string(),
                model_id: ModelId::for_accession("P38398"),
                probe_url: "https://alphafold.ebi.ac.uk/files/AF-P38398-F1-model_v4.pdb"
                    .to_string(),
                available: true,
            }),
            pdb_ids: vec!["1JM7".to_string(), "1T15".to_string()],
            resolved_at: String::new(),
        };
        assert_eq!(
            set.structure_ids(),
            vec!["AF-P38398-F1-model_v4", "1JM7", "1T15"]
        );
    }

    #[test]
    fn structure_ids_without_model() {
        let set = ResolvedStructureSet {
            query: GeneQuery::new("BRCA1".parse().unwrap(), HUMAN_TAXON),
            accessions: AccessionSet::new("P38398".to_string(), Vec::new()),
            model: None,
            pdb_ids: vec!["1JM7".to_string()],
            resolved_at: String::new(),
        };
        assert_eq!(set.structure_ids(), vec!["1JM7"]);
    }
}
