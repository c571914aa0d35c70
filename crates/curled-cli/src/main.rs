use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use curled_config::{Config, ConfigLoader};
use curled_runtime::constants::{CURLOPT_FOLLOWLOCATION, CURLOPT_MAXREDIRS};
use curled_runtime::fetch::DEFAULT_MAX_REDIRS;
use curled_runtime::{Library, Session};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod commands;

/// Transfer URLs through a runtime-loaded libcurl.
///
/// EXAMPLES:
///     curled fetch https://example.com/            Print a response body
///     curled fetch URL -H 'Accept: text/html' -i   Send a header, show response headers
///     curled trace http://example.com/old          List the redirect chain
///     curled version --json                        Describe the loaded libcurl
///
/// ENVIRONMENT VARIABLES:
///     CURLED_LOG             Log filter, e.g. 'debug' or 'curled_runtime=trace'
///     LIBCURL_LIBRARY_PATH   Path to the libcurl shared object
///     CURLED_USER_AGENT      Default User-Agent
#[derive(Parser)]
#[command(name = "curled")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Path to the libcurl shared object (overrides configuration)
    #[arg(long, global = true, value_name = "PATH")]
    library: Option<PathBuf>,

    /// Log at debug level
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Download a URL and print its body
    ///
    /// Redirects are followed unless configuration says otherwise.
    ///
    /// EXAMPLES:
    ///     curled fetch https://example.com/
    ///     curled fetch https://example.com/ -H 'X-Token: abc' --json
    Fetch {
        /// URL to download
        url: String,
        /// Extra request header as 'Name: value' (repeatable)
        #[arg(long = "header", short = 'H', value_name = "HEADER")]
        headers: Vec<String>,
        /// Print the status code and response headers before the body
        #[arg(long, short = 'i')]
        include: bool,
        /// Print the result as JSON
        #[arg(long, env = "CURLED_JSON")]
        json: bool,
    },

    /// List every URL in a redirect chain without downloading bodies
    Trace {
        /// URL to start from
        url: String,
    },

    /// Show the loaded libcurl's version and features
    Version {
        /// Print the result as JSON
        #[arg(long, env = "CURLED_JSON")]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = ConfigLoader::new()
        .load_from_directory(&std::env::current_dir()?)
        .context("Failed to load configuration")?;
    let library = open_library(&config, cli.library)?;

    match cli.command {
        Commands::Fetch {
            url,
            headers,
            include,
            json,
        } => {
            let mut session = open_session(&library, &config)?;
            let args = commands::fetch::FetchArgs {
                url,
                headers,
                include,
                json,
            };
            commands::fetch::run(&mut session, args)?;
        }
        Commands::Trace { url } => {
            let mut session = open_session(&library, &config)?;
            commands::trace::run(&mut session, &url)?;
        }
        Commands::Version { json } => {
            commands::version::run(&library, json)?;
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env("CURLED_LOG").unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn open_library(config: &Config, path: Option<PathBuf>) -> Result<Arc<Library>> {
    let mut library_config = config.library();
    if path.is_some() {
        library_config.path = path;
    }

    let library = Library::load(&library_config).context("Failed to load libcurl")?;
    Ok(Arc::new(library))
}

/// A session with the CLI's defaults, then configured defaults on top
fn open_session(library: &Arc<Library>, config: &Config) -> Result<Session> {
    let mut session =
        Session::with_library(Arc::clone(library)).context("Failed to create a session")?;
    session.set_option(CURLOPT_FOLLOWLOCATION, true)?;
    session.set_option(CURLOPT_MAXREDIRS, DEFAULT_MAX_REDIRS)?;

    let transfer = config.transfer();
    debug!(?transfer, "applying transfer defaults");
    session
        .apply_transfer_defaults(&transfer)
        .context("Invalid transfer configuration")?;
    Ok(session)
}
