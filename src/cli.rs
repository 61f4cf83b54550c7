//! Command-line interface definitions.
//!
//! Two subcommands share one optional config file:
//! `analyze` scores a fixed list of URLs and prints one line per URL,
//! `serve` exposes the same analysis over HTTP.

use clap::{Parser, Subcommand};

/// Command-line arguments for the sensationalism analyzer.
///
/// # Examples
///
/// ```sh
/// # Score two articles and print the results
/// jaundice_rate analyze https://inosmi.ru/20220303/kitay-shos-253268048.html random_link
///
/// # Also write a JSON report
/// jaundice_rate -c config.yaml analyze -j ./reports https://inosmi.ru/20220302/ssha-253253195.html
///
/// # Run the HTTP API
/// jaundice_rate serve --bind 0.0.0.0:8000
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Optional path to config.yaml file
    #[arg(short, long, env = "JAUNDICE_CONFIG", global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Analyze a batch of article URLs and print one outcome per line
    Analyze {
        /// Article URLs to analyze
        #[arg(required = true)]
        urls: Vec<String>,

        /// Output directory for the JSON report
        #[arg(short, long)]
        json_output_dir: Option<String>,

        /// Tokenization budget per article in seconds (overrides config)
        #[arg(short, long)]
        timeout: Option<f64>,
    },

    /// Serve the analysis over HTTP
    Serve {
        /// Address to listen on (overrides config)
        #[arg(short, long)]
        bind: Option<String>,
    },
}
