use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use ofxview_ingest::{ParsedStatement, parse_ofx};
use ofxview_report::{
    AccountSummary, ErrorKind, ErrorResponse, HealthResponse, StatementResponse,
    TransactionFilter, TypeFilter, format_currency, format_date,
};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod config;
mod input;
mod state;

use config::Config;
use input::{ReadFailure, read_statement};

const VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), "+", env!("OFXVIEW_BUILD_SHA"));

#[derive(Parser, Debug)]
#[command(name = "ofxview", version = VERSION, about = "Read OFX bank statements")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse a statement and print the JSON payload served to the web viewer
    Parse {
        /// OFX file to read
        file: PathBuf,

        /// Indent the JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Print account summaries and a filtered transaction list
    Show {
        /// OFX file to read
        file: PathBuf,

        /// all | credit | debit
        #[arg(long = "type", default_value = "all")]
        kind: TypeFilter,

        /// Case-insensitive text to look for in description or memo
        #[arg(long)]
        search: Option<String>,

        /// Limit number of transactions printed per account
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Print service status and version as JSON
    Health,

    /// Manage ~/.ofxview/config.toml
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write the default config file if none exists
    Init,
    /// Print the effective configuration
    Show,
}

fn main() -> Result<ExitCode> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("install log subscriber")?;

    let cli = Cli::parse();

    match cli.command {
        Command::Parse { file, pretty } => run_parse(&file, pretty, config::load_config()),

        Command::Show {
            file,
            kind,
            search,
            limit,
        } => {
            let cfg = config::load_config()?;
            let stmt = load_statement(&file, &cfg)?;
            let filter = TransactionFilter::new(kind, search);
            print_statement(&stmt, &filter, limit, &cfg.locale());
            Ok(ExitCode::SUCCESS)
        }

        Command::Health => {
            print_json(&HealthResponse::ok(VERSION), false)?;
            Ok(ExitCode::SUCCESS)
        }

        Command::Config { command } => {
            match command {
                ConfigCommand::Init => config::init_config()?,
                ConfigCommand::Show => {
                    let cfg = config::load_config()?;
                    println!("# {}", state::config_path()?.display());
                    print!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
                    println!("# effective locale: {}", cfg.locale());
                }
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// What `parse` prints: the statement payload or an error payload with its kind.
#[derive(Debug)]
enum ParseOutcome {
    Parsed(StatementResponse),
    Failed(ErrorKind, ErrorResponse),
}

/// JSON on stdout either way; exit 2 for client errors, 1 for internal ones.
fn run_parse(file: &Path, pretty: bool, cfg: Result<Config>) -> Result<ExitCode> {
    match parse_outcome(file, cfg) {
        ParseOutcome::Parsed(resp) => {
            print_json(&resp, pretty)?;
            Ok(ExitCode::SUCCESS)
        }
        ParseOutcome::Failed(kind, resp) => {
            print_json(&resp, pretty)?;
            Ok(exit_code(kind))
        }
    }
}

fn parse_outcome(file: &Path, cfg: Result<Config>) -> ParseOutcome {
    let cfg = match cfg {
        Ok(cfg) => cfg,
        Err(err) => {
            tracing::error!("loading config: {err:#}");
            return ParseOutcome::Failed(ErrorKind::Internal, ErrorResponse::internal());
        }
    };

    let content = match read_statement(file, cfg.input.max_file_bytes) {
        Ok(c) => c,
        Err(failure) => {
            if let ReadFailure::Io(err) = &failure {
                tracing::error!("{err:#}");
            }
            let kind = failure.kind();
            return ParseOutcome::Failed(kind, ErrorResponse::new(kind, failure.details(file)));
        }
    };

    match parse_ofx(&content) {
        Ok(stmt) => {
            tracing::info!(
                file = %file.display(),
                accounts = stmt.accounts.len(),
                transactions = stmt.transaction_count(),
                "parsed statement"
            );
            ParseOutcome::Parsed(StatementResponse::from_statement(
                &stmt,
                &cfg.locale(),
                Utc::now(),
            ))
        }
        Err(err) => {
            tracing::warn!(file = %file.display(), "{err}");
            ParseOutcome::Failed(ErrorKind::InvalidFormat, ErrorResponse::from(&err))
        }
    }
}

fn exit_code(kind: ErrorKind) -> ExitCode {
    if kind.is_client_error() {
        ExitCode::from(2)
    } else {
        ExitCode::FAILURE
    }
}

fn load_statement(file: &Path, cfg: &Config) -> Result<ParsedStatement> {
    let content = read_statement(file, cfg.input.max_file_bytes).map_err(|failure| match failure {
        ReadFailure::Io(err) => err,
        other => anyhow::anyhow!("{}: {}", other.kind().message(), other.details(file)),
    })?;
    parse_ofx(&content).with_context(|| format!("parsing {}", file.display()))
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let out = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
    .context("serialize JSON")?;
    println!("{out}");
    Ok(())
}

fn print_statement(
    stmt: &ParsedStatement,
    filter: &TransactionFilter,
    limit: Option<usize>,
    locale: &str,
) {
    if stmt.accounts.is_empty() {
        println!("No account found in statement.");
        return;
    }

    if let Some(fi) = stmt.sign_on.as_ref().and_then(|s| s.institution.as_ref()) {
        if let Some(name) = &fi.name {
            println!("Institution: {name}\n");
        }
    }

    for account in &stmt.accounts {
        let summary = AccountSummary::from_transactions(&account.transactions);

        println!("# Account {} ({})", account.account_id, account.account_type);
        if let Some(bank) = &account.bank_id {
            println!("Bank: {bank}");
        }
        if let (Some(oldest), Some(newest)) = (summary.oldest, summary.newest) {
            println!(
                "Period: {} - {}",
                format_date(oldest, locale),
                format_date(newest, locale)
            );
        }
        println!("Credits: {}", format_currency(summary.total_credits, locale));
        println!("Debits:  {}", format_currency(summary.total_debits, locale));
        println!(
            "Net:     {} {} ({} transactions)\n",
            format_currency(summary.net_amount, locale),
            if summary.is_positive() { "surplus" } else { "deficit" },
            summary.total_transactions
        );

        let matching = filter.apply(&account.transactions);
        if matching.is_empty() {
            println!("No transactions match your filters.\n");
            continue;
        }

        let shown = limit.unwrap_or(matching.len());
        for t in matching.iter().take(shown) {
            println!(
                "{}  {:<6} {:>16}  {}",
                format_date(t.date, locale),
                t.kind.as_str(),
                format_currency(t.amount, locale),
                t.description
            );
            if let Some(memo) = t.memo.as_deref().filter(|m| *m != t.description) {
                println!("{:>12}  {memo}", "");
            }
        }
        if matching.len() > shown {
            println!("... {} more", matching.len() - shown);
        }
        println!();
    }
}
