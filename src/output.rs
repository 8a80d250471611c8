use std::io::{self, Write};

use serde::Serialize;

use crate::domain::ResolvedStructureSet;
use crate::{alphafold, pdbe};

#[derive(Debug, Clone, Copy)]
pub enum OutputMode {
    Interactive,
    NonInteractive,
}

pub struct JsonOutput;

impl JsonOutput {
    pub fn print_resolution(result: &ResolvedStructureSet) -> io::Result<()> {
        Self::print_json(result)
    }

    pub fn print_batch(results: &[ResolvedStructureSet]) -> io::Result<()> {
        Self::print_json(&results)
    }

    fn print_json<T: Serialize>(value: &T) -> io::Result<()> {
        let json = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
        let mut stdout = io::stdout();
        stdout.write_all(json.as_bytes())?;
        stdout.write_all(b"\n")?;
        Ok(())
    }
}

pub struct TextOutput;

impl TextOutput {
    pub fn print_resolution(result: &ResolvedStructureSet) -> io::Result<()> {
        let mut stdout = io::stdout();
        writeln!(stdout, "{}", result.query)?;
        writeln!(stdout, "  accession: {}", result.accessions.primary())?;
        if !result.accessions.secondary().is_empty() {
            writeln!(
                stdout,
                "  secondary: {}",
                result.accessions.secondary().join(" ")
            )?;
        }
        match &result.model {
            Some(candidate) => {
                writeln!(stdout, "  model:     {}", candidate.model_id)?;
                writeln!(
                    stdout,
                    "             {}",
                    alphafold::entry_url(&candidate.accession)
                )?;
            }
            None => writeln!(stdout, "  model:     none available")?,
        }
        if result.pdb_ids.is_empty() {
            writeln!(stdout, "  pdb:       none cross-referenced")?;
        } else {
            writeln!(stdout, "  pdb:       {}", result.pdb_ids.join(" "))?;
            for id in &result.pdb_ids {
                writeln!(stdout, "             {}", pdbe::entry_url(id))?;
            }
        }
        Ok(())
    }
}
