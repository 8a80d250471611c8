//! Gene-to-structure resolver.
//!
//! Turns a gene symbol and an organism taxon into the best available
//! structural representations of its protein product: the AlphaFold
//! predicted model registered under the highest-priority accession that has
//! one, and the PDB entries cross-referenced from the reviewed UniProt
//! entry. A missing model degrades the result instead of failing it.

pub mod alphafold;
pub mod cache;
pub mod config;
pub mod domain;
pub mod error;
pub mod output;
pub mod pdbe;
pub mod resolver;
pub mod uniprot;
