//! CLI for the NephroGo portal toolkit.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use nephrogo_core::config;

use commands::{run_ascii, run_gauge, run_pages, run_params, run_reverse, run_route};

/// Top-level CLI for the NephroGo portal toolkit.
#[derive(Debug, Parser)]
#[command(name = "nephrogo")]
#[command(about = "NephroGo: URL parameters, host routing and metrics for the doctor portal", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Merge GET parameters into a URL and print the result.
    Params {
        /// URL to merge into (absolute or relative).
        url: String,
        /// Set a parameter; repeating a key makes it a list.
        #[arg(short = 'p', long = "param", value_name = "KEY=VALUE")]
        params: Vec<String>,
        /// Set a parameter to a JSON value (object, bool, list, number).
        #[arg(long = "json", value_name = "KEY=JSON")]
        json: Vec<String>,
        /// Remove a parameter.
        #[arg(long = "unset", value_name = "KEY")]
        unset: Vec<String>,
    },

    /// Transliterate text to ASCII.
    Ascii {
        text: String,
        /// Keep only letters, digits and spaces.
        #[arg(long)]
        strip: bool,
    },

    /// Show which portal and view a request would reach.
    Route {
        /// Host header value, e.g. doctor.nephrogo.com:8000.
        host: String,
        /// Request path, e.g. /doctor/nutrition/.
        path: String,
    },

    /// Build the absolute URL for a named route such as doctor:nutrition.
    Reverse {
        name: String,
        /// URL scheme; scheme-relative when omitted.
        #[arg(long)]
        scheme: Option<String>,
        /// Page number to add to the URL.
        #[arg(long, value_name = "N")]
        page: Option<usize>,
    },

    /// Paginate a list of COUNT rows and print the page and its links.
    Pages {
        count: usize,
        /// Raw page value (a number or `last`); defaults to the URL's `page`.
        #[arg(long)]
        page: Option<String>,
        /// Request URL the links are built from.
        #[arg(long, default_value = "/doctor/nutrition/")]
        url: String,
        /// Rows per page; defaults to `paginate_by` from the config.
        #[arg(long, value_name = "N")]
        per_page: Option<usize>,
    },

    /// Send a gauge through the configured metrics client.
    Gauge {
        metric: String,
        value: f64,
        /// Tag in key:value form; may be repeated.
        #[arg(long = "tag", value_name = "TAG")]
        tags: Vec<String>,
        /// Record the gauge locally and print it instead of sending.
        #[arg(long)]
        dry_run: bool,
    },
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Params {
                url,
                params,
                json,
                unset,
            } => run_params(&url, &params, &json, &unset)?,
            CliCommand::Ascii { text, strip } => run_ascii(&text, strip),
            CliCommand::Route { host, path } => run_route(&cfg, &host, &path)?,
            CliCommand::Reverse { name, scheme, page } => {
                run_reverse(&cfg, &name, scheme.as_deref(), page)?
            }
            CliCommand::Pages {
                count,
                page,
                url,
                per_page,
            } => run_pages(
                per_page.unwrap_or(cfg.paginate_by),
                count,
                page.as_deref(),
                &url,
            )?,
            CliCommand::Gauge {
                metric,
                value,
                tags,
                dry_run,
            } => run_gauge(&cfg, metric, value, tags, dry_run).await?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
