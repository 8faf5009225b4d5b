use clap::{Args, Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use tabled::{settings::Style, Table, Tabled};

use client_statement::config::{
    config_dir, StatementDefaults, CLIENTS_TEMPLATE, CONFIG_TEMPLATE, INVOICES_TEMPLATE,
    PAYMENTS_TEMPLATE,
};
use client_statement::error::{Result, StatementError};
use client_statement::statement::{
    generate_statement, parse_date, AgeGroup, StatementData, StatementLine, StatementOptions,
    StatusFilter,
};
use client_statement::store::RecordStore;

#[derive(Parser)]
#[command(name = "statement")]
#[command(version, about = "Client account statement generator", long_about = None)]
struct Cli {
    /// Path to config directory (default: ~/.statement or XDG config)
    #[arg(short = 'C', long, global = true)]
    config_dir: Option<PathBuf>,

    /// Log more (-v debug, -vv trace); RUST_LOG overrides
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize config directory with template files
    Init,

    /// List configured clients
    Clients,

    /// Generate a statement as JSON
    Generate {
        #[command(flatten)]
        selection: Selection,

        /// Write the statement to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,
    },

    /// Print a statement as a table
    Show {
        #[command(flatten)]
        selection: Selection,
    },
}

#[derive(Args)]
struct Selection {
    /// Client identifier from clients.toml
    #[arg(short, long)]
    client: String,

    /// Statement period start (YYYY-MM-DD)
    #[arg(long)]
    from: String,

    /// Statement period end (YYYY-MM-DD)
    #[arg(long)]
    to: String,

    /// Filter invoices by status (all, paid, unpaid)
    #[arg(long)]
    status: Option<String>,

    /// Include payments received during the period
    #[arg(long, overrides_with = "no_payments")]
    payments: bool,

    /// Leave payments out even when config.toml turns them on
    #[arg(long, overrides_with = "payments")]
    no_payments: bool,

    /// Append an accounts-receivable aging summary
    #[arg(long, overrides_with = "no_aging")]
    aging: bool,

    /// Leave the aging summary out even when config.toml turns it on
    #[arg(long, overrides_with = "aging")]
    no_aging: bool,

    /// Age invoices as of this date (default: today)
    #[arg(long, value_name = "DATE")]
    as_of: Option<String>,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    client_statement::logging::init(cli.verbose);

    // Determine config directory
    let cfg_dir = match cli.config_dir {
        Some(p) => p,
        None => config_dir()?,
    };

    match cli.command {
        Commands::Init => cmd_init(&cfg_dir),
        Commands::Clients => cmd_clients(&cfg_dir),
        Commands::Generate {
            selection,
            output,
            pretty,
        } => cmd_generate(&cfg_dir, &selection, output, pretty),
        Commands::Show { selection } => cmd_show(&cfg_dir, &selection),
    }
}

/// Initialize config directory with template files
fn cmd_init(cfg_dir: &Path) -> Result<()> {
    if cfg_dir.exists() {
        return Err(StatementError::AlreadyInitialized(cfg_dir.to_path_buf()));
    }

    fs::create_dir_all(cfg_dir)?;

    fs::write(cfg_dir.join("config.toml"), CONFIG_TEMPLATE)?;
    fs::write(cfg_dir.join("clients.toml"), CLIENTS_TEMPLATE)?;
    fs::write(cfg_dir.join("invoices.toml"), INVOICES_TEMPLATE)?;
    fs::write(cfg_dir.join("payments.toml"), PAYMENTS_TEMPLATE)?;

    println!("Initialized statement config at: {}", cfg_dir.display());
    println!();
    println!("Next steps:");
    println!(
        "  1. Add your clients:      $EDITOR {}/clients.toml",
        cfg_dir.display()
    );
    println!(
        "  2. Record invoices:       $EDITOR {}/invoices.toml",
        cfg_dir.display()
    );
    println!(
        "  3. Record payments:       $EDITOR {}/payments.toml",
        cfg_dir.display()
    );
    println!();
    println!("Then generate a statement:");
    println!("  statement generate --client <client-id> --from <date> --to <date>");

    Ok(())
}

/// Open the record store, failing early when the directory is missing
fn open_store(cfg_dir: &Path) -> Result<RecordStore> {
    if !cfg_dir.exists() {
        return Err(StatementError::ConfigNotFound(cfg_dir.to_path_buf()));
    }
    RecordStore::load(cfg_dir)
}

/// Resolve an `--x`/`--no-x` flag pair against its config.toml default
fn switch(on: bool, off: bool, default: bool) -> bool {
    match (on, off) {
        (true, _) => true,
        (_, true) => false,
        _ => default,
    }
}

/// Turn CLI selection flags into statement options, falling back to config.toml
fn build_options(defaults: StatementDefaults, selection: &Selection) -> Result<StatementOptions> {
    let status = match &selection.status {
        Some(s) => s.parse::<StatusFilter>()?,
        None => defaults.status,
    };

    let show_payments = switch(selection.payments, selection.no_payments, defaults.show_payments);
    let show_aging = switch(selection.aging, selection.no_aging, defaults.show_aging);

    let mut options =
        StatementOptions::new(parse_date(&selection.from)?, parse_date(&selection.to)?)?
            .with_status(status)
            .with_payments(show_payments)
            .with_aging(show_aging);

    if let Some(as_of) = &selection.as_of {
        options = options.aged_as_of(parse_date(as_of)?);
    }

    Ok(options)
}

// Table row structs for tabled
#[derive(Tabled)]
struct ClientRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "NAME")]
    name: String,
    #[tabled(rename = "EMAIL")]
    email: String,
}

#[derive(Tabled)]
struct LineRow {
    #[tabled(rename = "TYPE")]
    kind: String,
    #[tabled(rename = "INVOICE")]
    invoice: String,
    #[tabled(rename = "DATE")]
    date: String,
    #[tabled(rename = "DETAIL")]
    detail: String,
    #[tabled(rename = "AMOUNT")]
    amount: String,
    #[tabled(rename = "BALANCE")]
    balance: String,
}

#[derive(Tabled)]
struct AgingRow {
    #[tabled(rename = "DAYS PAST DUE")]
    age: String,
    #[tabled(rename = "AMOUNT")]
    amount: String,
}

/// List configured clients
fn cmd_clients(cfg_dir: &Path) -> Result<()> {
    let store = open_store(cfg_dir)?;
    let clients = store.clients();

    if clients.is_empty() {
        println!("No clients configured.");
        println!("Add clients to: {}/clients.toml", cfg_dir.display());
        return Ok(());
    }

    let mut sorted: Vec<_> = clients.iter().collect();
    sorted.sort_by_key(|(k, _)| *k);

    let rows: Vec<ClientRow> = sorted
        .iter()
        .map(|(id, client)| ClientRow {
            id: id.to_string(),
            name: client.name.clone(),
            email: client.email.clone().unwrap_or_default(),
        })
        .collect();

    let table = Table::new(rows).with(Style::rounded()).to_string();
    println!("{table}");

    Ok(())
}

/// Generate a statement as JSON
fn cmd_generate(
    cfg_dir: &Path,
    selection: &Selection,
    output: Option<PathBuf>,
    pretty: bool,
) -> Result<()> {
    let store = open_store(cfg_dir)?;
    let options = build_options(store.statement_defaults(), selection)?;
    let data = generate_statement(&store, &selection.client, &options)?;

    let json = if pretty {
        data.to_json_pretty()?
    } else {
        data.to_json()?
    };

    match output {
        Some(path) => {
            fs::write(&path, json)?;
            println!("Generated statement for '{}'", selection.client);
            println!("  Lines: {}", data.invoice_items.len());
            println!("  Saved: {}", path.display());
        }
        None => println!("{json}"),
    }

    Ok(())
}

/// Print a statement as a table
fn cmd_show(cfg_dir: &Path, selection: &Selection) -> Result<()> {
    let store = open_store(cfg_dir)?;
    let options = build_options(store.statement_defaults(), selection)?;
    let data = generate_statement(&store, &selection.client, &options)?;

    println!(
        "Statement for {} ({} to {}, {})",
        data.client.name, data.start_date, data.end_date, data.status
    );

    if data.invoice_items.is_empty() {
        println!(
            "No statement lines for client '{}' in the given period.",
            data.client.id
        );
        return Ok(());
    }

    let rows: Vec<LineRow> = data
        .invoice_items
        .iter()
        .filter_map(|line| match line {
            StatementLine::Invoice(inv) => Some(LineRow {
                kind: "INVOICE".to_string(),
                invoice: inv.invoice_number.clone(),
                date: inv.invoice_date.to_string(),
                detail: inv
                    .due_date
                    .map(|d| format!("due {d}"))
                    .unwrap_or_default(),
                amount: format_amount(inv.amount),
                balance: format_amount(inv.balance),
            }),
            StatementLine::Payment(pay) => Some(LineRow {
                kind: "PAYMENT".to_string(),
                invoice: pay.invoice_number.clone(),
                date: pay.payment_date.to_string(),
                detail: pay.payment_type.clone(),
                amount: format_amount(pay.amount),
                balance: String::new(),
            }),
            StatementLine::Aging(_) => None,
        })
        .collect();

    if !rows.is_empty() {
        let table = Table::new(rows).with(Style::rounded()).to_string();
        println!("{table}");
    }

    print_totals(&data, &options);

    if let Some(buckets) = data.aging() {
        let rows: Vec<AgingRow> = [
            AgeGroup::Current,
            AgeGroup::Days30,
            AgeGroup::Days60,
            AgeGroup::Days90,
            AgeGroup::Days120,
        ]
        .iter()
        .map(|group| AgingRow {
            age: group.label().to_string(),
            amount: format_amount(buckets.get(*group)),
        })
        .collect();

        println!();
        println!("Aging as of {}", options.as_of);
        let table = Table::new(rows).with(Style::rounded()).to_string();
        println!("{table}");
    }

    Ok(())
}

fn print_totals(data: &StatementData, options: &StatementOptions) {
    println!("  Invoiced:    {}", format_amount(data.invoiced()));
    if options.show_payments {
        println!("  Paid:        {}", format_amount(data.paid()));
    }
    println!("  Outstanding: {}", format_amount(data.outstanding()));
}

fn format_grouped_int(value: i64) -> String {
    let negative = value < 0;
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }

    let mut grouped: String = out.chars().rev().collect();
    if negative {
        grouped.insert(0, '-');
    }
    grouped
}

/// Format a money amount with two decimal places and thousands separators
fn format_amount(value: f64) -> String {
    let rounded = format!("{:.2}", value.abs());
    let (whole, frac) = rounded.split_once('.').unwrap_or((rounded.as_str(), "00"));
    let grouped = format_grouped_int(whole.parse::<i64>().unwrap_or(0));

    if value < 0.0 && rounded != "0.00" {
        format!("-{}.{}", grouped, frac)
    } else {
        format!("{}.{}", grouped, frac)
    }
}
