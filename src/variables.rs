//! Explicit field lists given with `-v`

use itertools::Itertools;

use crate::error::{GoatError, Result};
use crate::parser::Registry;

/// Resolve a comma separated variable list against the registry.
///
/// Order is kept and repeats are dropped. The first unknown name fails with a
/// suggestion for the nearest known one.
pub fn parse_variables(registry: &Registry, input: &str) -> Result<Vec<&'static str>> {
    let names: Vec<&'static str> = input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|name| {
            registry
                .lookup(name)
                .map(|v| v.name)
                .ok_or_else(|| unknown_variable(registry, name))
        })
        .collect::<Result<_>>()?;

    Ok(names.into_iter().unique().collect())
}

fn unknown_variable(registry: &Registry, name: &str) -> GoatError {
    let listing = "Run `goat variables` to see every variable for this index.";
    let help = match registry.suggest(name) {
        Some(s) => format!("Did you mean: {}?\n{}", s, listing),
        None => listing.to_string(),
    };
    GoatError::Variable {
        variable: name.to_string(),
        index: registry.index().to_string(),
        help: Some(help),
    }
}
