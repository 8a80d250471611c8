use std::time::{Duration, Instant};

use tracing::info;

use crate::alphafold::{AlphaFoldClient, probe_first_available};
use crate::cache::ResolutionCache;
use crate::domain::{GeneQuery, ResolvedStructureSet};
use crate::error::SeekError;
use crate::pdbe::extract_pdb_ids;
use crate::uniprot::UniprotClient;

#[derive(Debug, Clone)]
pub struct ResolveOptions {
    /// Upper bound on the total time spent probing model availability.
    /// Accessions left when the budget runs out are treated as unavailable.
    pub probe_budget: Duration,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            probe_budget: Duration::from_secs(20),
        }
    }
}

/// Composes the accession fetch, the model probe and the cross-reference
/// extraction into one resolution step. The accession fetch is the only
/// fatal edge; everything after it degrades the result instead of failing.
#[derive(Clone)]
pub struct Resolver<U: UniprotClient, A: AlphaFoldClient> {
    uniprot: U,
    alphafold: A,
    options: ResolveOptions,
}

impl<U: UniprotClient, A: AlphaFoldClient> Resolver<U, A> {
    pub fn new(uniprot: U, alphafold: A) -> Self {
        Self::with_options(uniprot, alphafold, ResolveOptions::default())
    }

    pub fn with_options(uniprot: U, alphafold: A, options: ResolveOptions) -> Self {
        Self {
            uniprot,
            alphafold,
            options,
        }
    }

    pub fn resolve(&self, query: &GeneQuery) -> Result<ResolvedStructureSet, SeekError> {
        info!(gene = %query.symbol, taxon = %query.taxon, "resolving structures");

        let entry = self.uniprot.search(query)?;

        let deadline = Instant::now() + self.options.probe_budget;
        let model = probe_first_available(
            &self.alphafold,
            entry.accessions.priority_order(),
            deadline,
        );
        let pdb_ids = extract_pdb_ids(&entry.cross_references);

        match &model {
            Some(candidate) => info!(
                model = %candidate.model_id,
                accession = %candidate.accession,
                pdb_count = pdb_ids.len(),
                "resolution complete"
            ),
            None => info!(
                pdb_count = pdb_ids.len(),
                "resolution complete without predicted model"
            ),
        }

        Ok(ResolvedStructureSet {
            query: query.clone(),
            accessions: entry.accessions,
            model,
            pdb_ids,
            resolved_at: chrono::Utc::now().to_rfc3339(),
        })
    }

    /// Resolution through a caller-owned cache. A fresh entry for the same
    /// `(symbol, taxon)` key is returned as-is; anything else goes through
    /// [`Resolver::resolve`] and is stored on success.
    pub fn resolve_cached(
        &self,
        cache: &mut ResolutionCache,
        query: &GeneQuery,
    ) -> Result<ResolvedStructureSet, SeekError> {
        if let Some(hit) = cache.get(query) {
            info!(gene = %query.symbol, taxon = %query.taxon, "resolved from cache");
            return Ok(hit.clone());
        }
        let resolved = self.resolve(query)?;
        cache.insert(resolved.clone());
        Ok(resolved)
    }
}
