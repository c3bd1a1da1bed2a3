//! Building the body of the data request.
//!
//! A query either comes verbatim from a file given with `--query`, or is
//! synthesized from the table metadata so that it selects everything (or the
//! first `n` values of every variable when a limit is set).

use crate::config::Config;
use crate::models::{Query, ResponseFormat, Selection, Variable, VariableSelection};
use anyhow::{Context, Result};
use serde_json::Map;
use std::fs;
use std::path::Path;

/// Read a query document from disk. The result is exactly what the file says.
pub fn load_query<P: AsRef<Path>>(path: P) -> Result<Query> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)
        .with_context(|| format!("read query file {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parse query file {}", path.display()))
}

/// Synthesize a query from the table's variables.
///
/// A limit larger than a variable's value count keeps all of its values.
pub fn query_from_variables(
    variables: &[Variable],
    limit: Option<usize>,
    exclude_elimination: bool,
) -> Query {
    let query = variables
        .iter()
        .filter(|v| !(exclude_elimination && v.elimination))
        .map(|v| VariableSelection {
            code: v.code.clone(),
            selection: match limit {
                Some(n) => Selection::items(v.values.iter().take(n).cloned().collect()),
                None => Selection::all(),
            },
            extra: Map::new(),
        })
        .collect();
    Query {
        query,
        response: ResponseFormat::default(),
        extra: Map::new(),
    }
}

/// Produce the query for this invocation: the `--query` file when one is
/// configured, otherwise one built from `variables`.
pub fn build_query(variables: &[Variable], config: &Config) -> Result<Query> {
    match &config.query_file {
        Some(path) => load_query(path),
        None => Ok(query_from_variables(
            variables,
            config.effective_limit(),
            config.exclude_elimination,
        )),
    }
}
