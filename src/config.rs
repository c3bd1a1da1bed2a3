use std::path::PathBuf;

/// Default PxWeb v0 table endpoint of Statistics Norway.
pub const DEFAULT_BASE_URL: &str = "https://data.ssb.no/api/v0/no/table";

/// Settings for one invocation. Built once from the command line and passed
/// to every step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub table_id: String,
    /// Keep only the first `n` values of each variable. `Some(0)` means no limit.
    pub limit: Option<usize>,
    /// Leave out variables the API marks as eliminable.
    pub exclude_elimination: bool,
    /// Send this query document instead of building one.
    pub query_file: Option<PathBuf>,
    /// Print the metadata and stop.
    pub metadata_only: bool,
    pub debug: bool,
    pub base_url: String,
}

impl Config {
    pub fn new(table_id: impl Into<String>) -> Self {
        Self {
            table_id: table_id.into(),
            limit: None,
            exclude_elimination: false,
            query_file: None,
            metadata_only: false,
            debug: false,
            base_url: DEFAULT_BASE_URL.into(),
        }
    }

    /// The configured limit, with zero folded into "no limit".
    pub fn effective_limit(&self) -> Option<usize> {
        self.limit.filter(|&n| n > 0)
    }
}
