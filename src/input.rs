//! Taxon identifiers from the command line or a file

use std::path::Path;

use itertools::Itertools;
use once_cell::sync::Lazy;
use regex::Regex;
use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::error::{GoatError, Result};
use crate::UPPER_CLI_FILE_LIMIT;

/// Text that would change the shape of the `tax_name(...)` filter a taxon lands in
static FILTER_SYNTAX: Lazy<Regex> = Lazy::new(|| Regex::new(r"[()]|\b(AND|OR|NOT)\b").unwrap());

/// Reject taxa that would be read as part of the filter expression
pub fn check_taxon(taxon: &str) -> Result<()> {
    match FILTER_SYNTAX.find(taxon) {
        Some(m) => Err(GoatError::Cli {
            message: format!("taxon '{}' contains '{}'", taxon, m.as_str()),
            help: Some(
                "Taxon names cannot contain parentheses, AND, OR or NOT; use the NCBI taxon id"
                    .to_string(),
            ),
        }),
        None => Ok(()),
    }
}

/// Split a comma separated list, trimming each entry and dropping blanks and repeats
pub fn parse_comma_separated(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unique()
        .map(str::to_string)
        .collect()
}

/// One identifier per non-blank line, at most [`UPPER_CLI_FILE_LIMIT`] of them
pub async fn lines_from_file(path: &Path) -> Result<Vec<String>> {
    let display = path.display().to_string();
    let file = File::open(path).await.map_err(|source| GoatError::File {
        path: display.clone(),
        source,
    })?;

    let mut lines = BufReader::new(file).lines();
    let mut taxa = Vec::new();
    let mut line_no = 0;
    loop {
        line_no += 1;
        let line = lines.next_line().await.map_err(|source| GoatError::ReadLine {
            path: display.clone(),
            line: line_no,
            source,
        })?;
        let Some(line) = line else { break };
        let line = line.trim();
        if !line.is_empty() {
            taxa.push(line.to_string());
        }
    }

    if taxa.len() > UPPER_CLI_FILE_LIMIT {
        return Err(GoatError::Cli {
            message: format!(
                "{} lists {} taxa, the limit is {}",
                display,
                taxa.len(),
                UPPER_CLI_FILE_LIMIT
            ),
            help: Some("Split the file and run each part separately".to_string()),
        });
    }
    Ok(taxa)
}

/// Taxa from `-t` or, failing that, `-f`
pub async fn taxa(taxon: Option<&str>, file: Option<&Path>) -> Result<Vec<String>> {
    let taxa = match (taxon, file) {
        (Some(taxon), _) => parse_comma_separated(taxon),
        (None, Some(path)) => lines_from_file(path).await?,
        (None, None) => {
            return Err(GoatError::cli(
                "one of -t (--taxon) or -f (--file) should be specified",
            ))
        }
    };
    if taxa.is_empty() {
        return Err(GoatError::cli("no taxa given, please specify a taxon"));
    }
    taxa.iter().try_for_each(|taxon| check_taxon(taxon))?;
    Ok(taxa)
}
