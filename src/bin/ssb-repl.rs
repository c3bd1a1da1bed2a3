use anyhow::Result;
use clap::Parser;
use clap::error::ErrorKind;
use log::LevelFilter;
use ssb_repl::config::DEFAULT_BASE_URL;
use ssb_repl::{Client, Config, TerminalViewer, app};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(
    name = "ssb-repl",
    version,
    about = "Fetch a Statistics Norway table as JSON-stat and open it in a viewer",
    override_usage = "ssb-repl [--limit n] [--exclude-elimination] [--metadata] [--query FILE] [--debug] <TABLE_ID>"
)]
struct Cli {
    /// Table id (e.g., 07459)
    table_id: String,
    /// Only fetch the first n values of each variable.
    #[arg(short, long, value_name = "n")]
    limit: Option<usize>,
    /// Leave out variables that can be eliminated.
    #[arg(long = "exclude-elimination", visible_alias = "ee")]
    exclude_elimination: bool,
    /// Only print metadata and stop.
    #[arg(short, long)]
    metadata: bool,
    /// Send the query document in FILE instead of building one.
    #[arg(short, long, value_name = "FILE")]
    query: Option<PathBuf>,
    /// Log request URLs and bodies to stderr.
    #[arg(short, long)]
    debug: bool,
    /// Table endpoint to talk to.
    #[arg(long, env = "SSB_API_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,
}

impl From<Cli> for Config {
    fn from(cli: Cli) -> Self {
        Config {
            table_id: cli.table_id,
            limit: cli.limit,
            exclude_elimination: cli.exclude_elimination,
            query_file: cli.query,
            metadata_only: cli.metadata,
            debug: cli.debug,
            base_url: cli.base_url,
        }
    }
}

fn init_logging(config: &Config) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if config.debug {
        builder.filter_module("ssb_repl", LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        // --help / --version
        Err(e) if !e.use_stderr() => e.exit(),
        Err(e) => {
            eprint!("{}", e);
            if e.kind() == ErrorKind::MissingRequiredArgument {
                eprintln!("USAGE: ssb-repl [--limit n] table-id");
            }
            return ExitCode::from(1);
        }
    };
    let config = Config::from(cli);
    init_logging(&config);

    match run(&config) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            for cause in e.chain().skip(1) {
                eprintln!("  caused by: {}", cause);
            }
            ExitCode::from(1)
        }
    }
}

fn run(config: &Config) -> Result<app::Outcome> {
    let client = Client::new(&config.base_url)?;
    let mut viewer = TerminalViewer::new(io::stdout());
    app::run(
        config,
        &client,
        &mut viewer,
        &mut io::stdout(),
        &mut io::stderr(),
    )
}
