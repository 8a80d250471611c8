use std::collections::HashSet;

use crate::domain::CrossReferenceRecord;

/// Cross-reference database tag for experimentally solved structures.
pub const PDB_DATABASE: &str = "PDB";

/// Extracts solved-structure identifiers from raw cross-reference records.
/// Keeps only `PDB` entries and collapses duplicates to their first
/// occurrence, so the output order follows the source record. Empty input
/// yields an empty list.
pub fn extract_pdb_ids(records: &[CrossReferenceRecord]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut ids = Vec::new();
    for record in records {
        if record.database != PDB_DATABASE {
            continue;
        }
        if seen.insert(record.id.clone()) {
            ids.push(record.id.clone());
        }
    }
    ids
}

/// Browsing link for a solved structure, built for presentation and never
/// fetched by the resolver.
pub fn entry_url(pdb_id: &str) -> String {
    format!("https://www.ebi.ac.uk/pdbe/entry/pdb/{pdb_id}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(database: &str, id: &str) -> CrossReferenceRecord {
        CrossReferenceRecord {
            database: database.to_string(),
            id: id.to_string(),
        }
    }

    #[test]
    fn filters_and_deduplicates_in_first_seen_order() {
        let records = vec![
            record("PDB", "1ABC"),
            record("GO", "X"),
            record("PDB", "1ABC"),
        ];
        assert_eq!(extract_pdb_ids(&records), vec!["1ABC"]);
    }

    #[test]
    fn preserves_source_order() {
        let records = vec![
            record("PDB", "1JM7"),
            record("EMBL", "U14680"),
            record("PDB", "1T15"),
            record("PDB", "1JM7"),
            record("PDB", "4IGK"),
        ];
        assert_eq!(extract_pdb_ids(&records), vec!["1JM7", "1T15", "4IGK"]);
    }

    #[test]
    fn empty_and_non_matching_input() {
        assert!(extract_pdb_ids(&[]).is_empty());
        assert!(extract_pdb_ids(&[record("GO", "GO:0005634")]).is_empty());
    }

    #[test]
    fn extraction_is_idempotent() {
        let records = vec![
            record("PDB", "1T15"),
            record("PDB", "1JM7"),
            record("PDB", "1T15"),
        ];
        let first = extract_pdb_ids(&records);
        let again: Vec<CrossReferenceRecord> =
            first.iter().map(|id| record("PDB", id)).collect();
        assert_eq!(extract_pdb_ids(&again), first);
    }

    #[test]
    fn entry_link() {
        assert_eq!(
            entry_url("1YCS"),
            "https://www.ebi.ac.uk/pdbe/entry/pdb/1YCS"
        );
    }
}
