//! ssb_repl
//!
//! A small Rust library for pulling a table out of the Statistics Norway
//! (PxWeb v0) API as JSON-stat. Pairs with the `ssb-repl` CLI.
//!
//! ### Features
//! - Fetch table metadata (variables and their values)
//! - Build a query selecting everything, or the first `n` values of each variable
//! - Optionally leave out eliminable variables, or send a hand-written query file
//! - Fetch the result as JSON-stat and hand it to a `Viewer`
//!
//! ### Example
//! ```no_run
//! use ssb_repl::{Client, Config, TerminalViewer, app};
//!
//! let mut config = Config::new("07459");
//! config.limit = Some(2);
//! let client = Client::new(&config.base_url)?;
//! let mut viewer = TerminalViewer::new(std::io::stdout());
//! let outcome = app::run(
//!     &config,
//!     &client,
//!     &mut viewer,
//!     &mut std::io::stdout(),
//!     &mut std::io::stderr(),
//! )?;
//! println!("{:?}", outcome);
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod models;
pub mod query;
pub mod viewer;

pub use api::{Client, DataOutcome};
pub use app::Outcome;
pub use config::Config;
pub use error::ApiError;
pub use models::{Dataset, Metadata, Query, TableMetadata, Variable};
pub use viewer::{TerminalViewer, Viewer};
