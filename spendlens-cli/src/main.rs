use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use spendlens_core::{Category, STATEMENT_DATE_FORMAT};
use spendlens_finance::{categorize, import_statement, is_pdf, BudgetSummary, EntryUpdate, Ledger};
use spendlens_ingest::{render_statement, sample_rows};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod config;
mod output;
mod state;

use output::{ExtractedRow, OutputFormat};

#[derive(Parser, Debug)]
#[command(
    name = "spendlens",
    version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("SPENDLENS_BUILD_SHA"), ")"),
    about = "Bank statement PDF import, categorization, and budget tracking"
)]
struct Cli {
    /// Debug logging (per-page extraction details)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Ledger owner (default: [user] name from config.toml)
    #[arg(long, global = true)]
    user: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the transactions found in statement PDFs without storing them
    Extract {
        #[arg(required = true)]
        files: Vec<PathBuf>,

        #[arg(long, value_enum, default_value = "table")]
        format: OutputFormat,
    },

    /// Print the category for a transaction description
    Categorize { description: String },

    /// Copy a statement into the upload folder and add its transactions to the ledger
    Import { file: PathBuf },

    /// Record a manual expense (always stored as money out)
    AddExpense {
        /// DD/MM/YYYY (default: today)
        #[arg(long)]
        date: Option<String>,

        #[arg(long)]
        description: String,

        #[arg(long, allow_hyphen_values = true)]
        amount: f64,

        /// Category label (default: derived from the description)
        #[arg(long)]
        category: Option<Category>,
    },

    /// Change fields of one of your ledger entries
    Edit {
        id: u64,

        #[arg(long)]
        date: Option<String>,

        #[arg(long)]
        description: Option<String>,

        /// Stored as given; negative = money out
        #[arg(long, allow_hyphen_values = true)]
        amount: Option<f64>,

        #[arg(long)]
        category: Option<Category>,
    },

    /// Delete one of your ledger entries
    Delete { id: u64 },

    /// List your ledger entries, newest first
    List {
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Budget dashboard: totals, this month vs. limit, category and date breakdown
    Summary {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write the four-transaction sample statement PDF
    Sample {
        #[arg(long, default_value = "sample_statement.pdf")]
        out: PathBuf,
    },

    /// Manage ~/.spendlens/config.toml
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a default config file if none exists
    Init,
    /// Print the current config
    Show,
    /// Set the monthly spending limit (0 disables it)
    SetLimit { amount: f64 },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact().with_writer(std::io::stderr))
        .init();

    let cfg = config::load_config()?;
    let user = cli.user.clone().unwrap_or_else(|| cfg.user.name.clone());

    match cli.command {
        Command::Extract { files, format } => {
            let rows = extract_files(files).await?;
            let mut stdout = std::io::stdout().lock();
            output::write_rows(&mut stdout, &rows, format)?;
        }

        Command::Categorize { description } => {
            println!("{}", categorize(&description));
        }

        Command::Import { file } => {
            import(&cfg, &user, &file)?;
        }

        Command::AddExpense { date, description, amount, category } => {
            let date = date.unwrap_or_else(|| chrono::Local::now().format(STATEMENT_DATE_FORMAT).to_string());
            let category = category.unwrap_or_else(|| categorize(&description));

            let mut ledger = open_ledger()?;
            let entry = ledger.add_expense(&user, &date, &description, amount, category)?.clone();
            ledger.save()?;
            println!("Expense added: #{} {} {:.2} [{}]", entry.id, entry.description, entry.amount, entry.category);
        }

        Command::Edit { id, date, description, amount, category } => {
            let update = EntryUpdate { date, description, amount, category };
            if update == EntryUpdate::default() {
                bail!("Nothing to change (pass --date, --description, --amount or --category)");
            }
            let mut ledger = open_ledger()?;
            let entry = ledger.update(&user, id, update)?.clone();
            ledger.save()?;
            println!("Expense updated: #{} {} {} {:.2} [{}]", entry.id, entry.date, entry.description, entry.amount, entry.category);
        }

        Command::Delete { id } => {
            let mut ledger = open_ledger()?;
            let entry = ledger.delete(&user, id)?;
            ledger.save()?;
            println!("Expense deleted: #{} {}", entry.id, entry.description);
        }

        Command::List { limit } => {
            let ledger = open_ledger()?;
            let mut entries = ledger.entries_for(&user);
            if let Some(limit) = limit {
                entries.truncate(limit);
            }
            output::print_entries(&entries);
        }

        Command::Summary { json } => {
            let ledger = open_ledger()?;
            let today = chrono::Local::now().date_naive();
            let summary = BudgetSummary::compute(ledger.entries_for(&user), cfg.budget.monthly_limit, today);
            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                output::print_summary(&user, &summary);
            }
        }

        Command::Sample { out } => {
            render_statement("PhonePe Statement", &sample_rows(), &out)
                .with_context(|| format!("writing {}", out.display()))?;
            println!("Sample statement written to {}", out.display());
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config()?,
            ConfigCommand::Show => {
                println!("# {}", config::config_path()?.display());
                print!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
            }
            ConfigCommand::SetLimit { amount } => {
                let mut cfg = cfg;
                cfg.set_monthly_limit(amount)?;
                config::save_config(&cfg)?;
                println!("Monthly limit set to {:.2}", amount);
            }
        },
    }

    Ok(())
}

fn open_ledger() -> Result<Ledger> {
    let path = state::ledger_path()?;
    Ledger::open(&path).with_context(|| format!("opening ledger {}", path.display()))
}

/// Extract each file on a blocking task; output keeps the argument order.
async fn extract_files(files: Vec<PathBuf>) -> Result<Vec<ExtractedRow>> {
    let handles: Vec<_> = files
        .into_iter()
        .map(|path| {
            tokio::task::spawn_blocking(move || {
                if !path.exists() {
                    warn!(file = %path.display(), "file not found");
                }
                let txns = spendlens_ingest::extract(&path);
                (path, txns)
            })
        })
        .collect();

    let mut rows = Vec::new();
    for handle in handles {
        let (path, txns) = handle.await.context("extraction task panicked")?;
        info!(file = %path.display(), count = txns.len(), "extracted");
        let file = path.display().to_string();
        rows.extend(txns.into_iter().map(|t| ExtractedRow {
            file: file.clone(),
            category: categorize(&t.description),
            date: t.date,
            description: t.description,
            amount: t.amount,
        }));
    }
    Ok(rows)
}

fn import(cfg: &config::Config, user: &str, file: &Path) -> Result<()> {
    if !is_pdf(file) {
        bail!("Invalid file type. Please upload a PDF: {}", file.display());
    }
    let name = file.file_name().context("statement path has no file name")?;

    let upload_dir = cfg.upload_dir()?;
    fs::create_dir_all(&upload_dir).with_context(|| format!("create {}", upload_dir.display()))?;
    let stored = upload_dir.join(name);
    let source = fs::canonicalize(file).with_context(|| format!("read {}", file.display()))?;
    // Re-importing a file that already sits in the upload folder must not copy it onto itself.
    if fs::canonicalize(&stored).ok().as_ref() != Some(&source) {
        fs::copy(&source, &stored).with_context(|| format!("copy {} to {}", file.display(), stored.display()))?;
    }

    let entries = import_statement(&stored)?;
    if entries.is_empty() {
        warn!(file = %stored.display(), "no transactions found; the PDF may be scanned or unreadable");
    }

    let mut ledger = open_ledger()?;
    let ids = ledger.append(user, entries);
    ledger.save()?;

    println!("Imported {} transactions from {} for {}", ids.len(), file.display(), user);
    Ok(())
}
