//! The request flow of one invocation:
//!
//! ```text
//! fetch metadata ─┬─ no variables ─────────────► InvalidTable
//!                 ├─ --metadata ───────────────► MetadataPrinted
//!                 └─ build query ─► fetch data ─┬─ 403 ─► Forbidden
//!                                               ├─ ok ──► Presented
//!                                               └─ error (returned)
//! ```

use crate::api::{Client, DataOutcome};
use crate::config::Config;
use crate::query;
use crate::viewer::Viewer;
use anyhow::Result;
use log::info;
use std::io::Write;

/// Printed after the error message when the data endpoint answers 403.
pub const FORBIDDEN_HINT: &str = "The response may be too big. Use [--limit n] to only fetch the n first values of each dimension, \
or [--exclude-elimination] to leave out the variables that can be eliminated.";

/// How a run ended, when it ended without an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The metadata had no variable list; it was printed instead.
    InvalidTable,
    /// `--metadata` was given; the metadata was printed.
    MetadataPrinted,
    /// The data request was refused with 403; guidance was printed.
    Forbidden,
    /// The dataset was handed to the viewer.
    Presented,
}

/// Run the whole flow. Normal output goes to `out`, diagnostics to `diag`.
pub fn run<V, O, D>(
    config: &Config,
    client: &Client,
    viewer: &mut V,
    out: &mut O,
    diag: &mut D,
) -> Result<Outcome>
where
    V: Viewer + ?Sized,
    O: Write + ?Sized,
    D: Write + ?Sized,
{
    let metadata = client.fetch_metadata(&config.table_id)?;

    let Some(variables) = metadata.variables() else {
        writeln!(
            diag,
            "invalid table\n\n{}",
            serde_json::to_string_pretty(&metadata)?
        )?;
        return Ok(Outcome::InvalidTable);
    };

    if config.metadata_only {
        writeln!(out, "{}", serde_json::to_string_pretty(&metadata)?)?;
        return Ok(Outcome::MetadataPrinted);
    }

    let query = query::build_query(variables, config)?;
    info!(
        "requesting {} variable(s) from table {}",
        query.query.len(),
        config.table_id
    );

    match client.fetch_data(&config.table_id, &query)? {
        DataOutcome::Forbidden(message) => {
            writeln!(diag, "{}", message)?;
            writeln!(diag, "{}", FORBIDDEN_HINT)?;
            Ok(Outcome::Forbidden)
        }
        DataOutcome::Dataset(dataset) => {
            viewer.present(dataset)?;
            Ok(Outcome::Presented)
        }
    }
}
