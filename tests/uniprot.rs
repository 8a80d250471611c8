use std::fs;

use assert_matches::assert_matches;

use structseek::domain::GeneSymbol;
use structseek::error::SeekError;
use structseek::uniprot::parse_search_response;

fn gene(symbol: &str) -> GeneSymbol {
    symbol.parse().unwrap()
}

#[test]
fn parse_search_takes_first_result() {
    let body = fs::read_to_string("tests/fixtures/uniprot_search_BRCA1.json").unwrap();
    let entry = parse_search_response(&body, &gene("BRCA1")).unwrap();

    assert_eq!(entry.accessions.primary(), "P38398");
    assert_eq!(
        entry.accessions.secondary(),
        ["E9PFC7", "O15129", "Q1RMC1", "Q6IN79", "Q7KYU9"]
    );

    let ordered: Vec<&str> = entry.accessions.priority_order().collect();
    assert_eq!(ordered[0], "P38398");
    assert_eq!(&ordered[1..], ["E9PFC7", "O15129", "Q1RMC1", "Q6IN79", "Q7KYU9"]);
}

#[test]
fn parse_search_keeps_raw_cross_references() {
    let body = fs::read_to_string("tests/fixtures/uniprot_search_BRCA1.json").unwrap();
    let entry = parse_search_response(&body, &gene("BRCA1")).unwrap();

    // Unfiltered, as received: the duplicate PDB id and the non-PDB records
    // are all still present at this stage.
    assert_eq!(entry.cross_references.len(), 6);
    assert_eq!(entry.cross_references[0].database, "EMBL");
    assert_eq!(entry.cross_references[1].id, "1JM7");
}

#[test]
fn empty_results_is_gene_not_found() {
    let err = parse_search_response(r#"{"results":[]}"#, &gene("ZZZZZZ999")).unwrap_err();
    assert_matches!(err, SeekError::GeneNotFound(symbol) if symbol == "ZZZZZZ999");
}

#[test]
fn missing_results_field_is_malformed() {
    let err = parse_search_response(r#"{"messages":["oops"]}"#, &gene("BRCA1")).unwrap_err();
    assert_matches!(err, SeekError::MalformedResponse(_));
}

#[test]
fn missing_primary_accession_is_malformed() {
    let body = r#"{"results":[{"secondaryAccessions":["O15129"]}]}"#;
    let err = parse_search_response(body, &gene("BRCA1")).unwrap_err();
    assert_matches!(err, SeekError::MalformedResponse(_));
}

#[test]
fn absent_secondary_accessions_default_to_empty() {
    let body = r#"{"results":[{"primaryAccession":"P04637"}]}"#;
    let entry = parse_search_response(body, &gene("TP53")).unwrap();
    assert_eq!(entry.accessions.primary(), "P04637");
    assert!(entry.accessions.secondary().is_empty());
    assert!(entry.cross_references.is_empty());
}
