//! Taxonomic ranks accepted by `--tax-rank`, `tax_rank(...)` and `--ranks`

use crate::error::{GoatError, Result};
use crate::parser::suggest::did_you_mean;

/// Every rank in the NCBI taxdump
pub const TAX_RANKS: &[&str] = &[
    "biotype",
    "clade",
    "class",
    "cohort",
    "family",
    "forma",
    "forma specialis",
    "genotype",
    "genus",
    "infraclass",
    "infraorder",
    "isolate",
    "kingdom",
    "morph",
    "no rank",
    "order",
    "parvorder",
    "pathogroup",
    "phylum",
    "section",
    "series",
    "serogroup",
    "serotype",
    "species",
    "species group",
    "species subgroup",
    "strain",
    "subclass",
    "subcohort",
    "subfamily",
    "subgenus",
    "subkingdom",
    "suborder",
    "subphylum",
    "subsection",
    "subspecies",
    "subtribe",
    "superclass",
    "superfamily",
    "superkingdom",
    "superorder",
    "superphylum",
    "tribe",
    "varietas",
];

/// Ranks that can be shown as lineage columns, lowest first
pub const DISPLAY_RANKS: &[&str] = &[
    "subspecies",
    "species",
    "genus",
    "family",
    "order",
    "class",
    "phylum",
    "kingdom",
    "superkingdom",
];

/// Validate a comma separated list of ranks
pub fn parse_tax_ranks(input: &str) -> Result<Vec<&'static str>> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|rank| {
            TAX_RANKS
                .iter()
                .copied()
                .find(|r| *r == rank)
                .ok_or_else(|| unknown_rank(rank, TAX_RANKS))
        })
        .collect()
}

/// The chosen display rank and every rank above it.
///
/// `none` selects no lineage columns.
pub fn display_ranks_from(rank: &str) -> Result<&'static [&'static str]> {
    if rank == "none" {
        return Ok(&[]);
    }
    DISPLAY_RANKS
        .iter()
        .position(|r| *r == rank)
        .map(|p| &DISPLAY_RANKS[p..])
        .ok_or_else(|| unknown_rank(rank, DISPLAY_RANKS))
}

fn unknown_rank(rank: &str, known: &'static [&'static str]) -> GoatError {
    let help = match did_you_mean(rank, known.iter().copied()) {
        Some(s) => format!("Did you mean: {}?\nEnter one of: {}", s, known.join(", ")),
        None => format!("Enter one of: {}", known.join(", ")),
    };
    GoatError::TaxRank {
        rank: rank.to_string(),
        help: Some(help),
    }
}
