//! `records` command line: a thin presentation layer over [`RecordsStore`].

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};

use crate::config::ClientConfig;
use crate::model::{Record, RecordId, RecordRequest};
use crate::remote::{RemoteClient, RecordsApi};
use crate::repository::Repository;
use crate::store::RecordsStore;

#[derive(Parser, Debug)]
#[command(name = "records", version, about = "Client for the student records service")]
pub struct Cli {
    /// Config file (default: <config dir>/records-client/config.toml).
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Override the service base URL.
    #[arg(long, global = true, value_name = "URL")]
    pub base_url: Option<String>,

    /// Print records as JSON.
    #[arg(long, global = true)]
    pub json: bool,

    /// Log more (repeat for debug).
    #[arg(short = 'v', long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List records.
    #[command(alias = "ls")]
    List(ListArgs),

    /// Show one record.
    Show { id: RecordId },

    /// Create a record.
    #[command(alias = "new")]
    Create(CreateArgs),

    /// Update a record. Omitted fields keep their current value.
    Update(UpdateArgs),

    /// Delete a record.
    #[command(alias = "rm")]
    Delete { id: RecordId },
}

#[derive(Args, Debug)]
pub struct ListArgs {
    #[arg(long)]
    pub skip: Option<u32>,
    #[arg(long)]
    pub limit: Option<u32>,
}

#[derive(Args, Debug)]
pub struct CreateArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub age: i32,
    #[arg(long)]
    pub major: String,
    #[arg(long)]
    pub gpa: f64,
}

#[derive(Args, Debug)]
pub struct UpdateArgs {
    pub id: RecordId,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub age: Option<i32>,
    #[arg(long)]
    pub major: Option<String>,
    #[arg(long)]
    pub gpa: Option<f64>,
}

impl UpdateArgs {
    /// Overlay the given fields on the record's current values.
    pub fn merge_into(&self, current: &Record) -> RecordRequest {
        let mut request = RecordRequest::from(current);
        if let Some(name) = &self.name {
            request.name = name.clone();
        }
        if let Some(age) = self.age {
            request.age = age;
        }
        if let Some(major) = &self.major {
            request.major = major.clone();
        }
        if let Some(gpa) = self.gpa {
            request.gpa = gpa;
        }
        request
    }
}

impl From<CreateArgs> for RecordRequest {
    fn from(args: CreateArgs) -> Self {
        Self {
            name: args.name,
            age: args.age,
            major: args.major,
            gpa: args.gpa,
        }
    }
}

/// Resolve configuration from `--config`, the default location, and
/// `--base-url`.
pub fn load_config(cli: &Cli) -> anyhow::Result<ClientConfig> {
    let mut config = match &cli.config {
        Some(path) => ClientConfig::load_from(path)?,
        None => ClientConfig::load()?,
    };

    if let Some(base_url) = &cli.base_url {
        config.base_url = base_url.clone();
        config.validate()?;
    }

    Ok(config)
}

pub async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let config = load_config(&cli)?;
    let client = RemoteClient::from_config(&config).context("Failed to set up HTTP client")?;
    let store = RecordsStore::with_page(Repository::new(client), config.page);
    execute(&store, cli.command, cli.json).await
}

/// Run one subcommand against `store` and print the outcome.
pub async fn execute<A: RecordsApi>(
    store: &RecordsStore<A>,
    command: Commands,
    json: bool,
) -> anyhow::Result<ExitCode> {
    let outcome = match command {
        Commands::List(args) => {
            let page = store.page();
            let skip = args.skip.unwrap_or(page.skip);
            let limit = args.limit.unwrap_or(page.limit);
            store
                .load_page(skip, limit)
                .await
                .map(|()| print_list(&store.snapshot().list, json))
        }
        Commands::Show { id } => store.load_one(id).await.map(|record| print_record(&record, json)),
        Commands::Create(args) => {
            let request = RecordRequest::from(args);
            ensure_valid(&request)?;
            store.reset_success();
            store
                .create(request)
                .await
                .map(|created| announce("Created", &created, json))
        }
        Commands::Update(args) => {
            // Fill omitted fields from the current record.
            store.clear_selected();
            match store.load_one(args.id).await {
                Ok(current) => {
                    let request = args.merge_into(&current);
                    ensure_valid(&request)?;
                    store.reset_success();
                    store
                        .update(args.id, request)
                        .await
                        .map(|updated| announce("Updated", &updated, json))
                }
                Err(err) => Err(err),
            }
        }
        Commands::Delete { id } => store.delete(id).await.map(|()| {
            if !json {
                println!("Deleted record {}", id);
            }
        }),
    };

    // Failures are reported from the store's error field, then acknowledged.
    if let Some(message) = store.snapshot().error {
        eprintln!("Error: {}", message);
        store.clear_error();
        return Ok(ExitCode::FAILURE);
    }

    match outcome {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(err) => {
            eprintln!("Error: {}", err);
            Ok(ExitCode::FAILURE)
        }
    }
}

fn ensure_valid(request: &RecordRequest) -> anyhow::Result<()> {
    let errors = request.validate();
    if errors.is_empty() {
        return Ok(());
    }
    let details: Vec<String> = errors.iter().map(ToString::to_string).collect();
    bail!("Invalid record: {}", details.join("; "))
}

fn announce(verb: &str, record: &Record, json: bool) {
    if json {
        print_record(record, json);
    } else {
        println!("{} record {}", verb, record.id);
    }
}

fn print_list(records: &[Record], json: bool) {
    if json {
        println!("{}", to_json(&records));
    } else {
        print!("{}", render_table(records));
    }
}

fn print_record(record: &Record, json: bool) {
    if json {
        println!("{}", to_json(record));
    } else {
        print!("{}", render_record(record));
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e))
}

/// Fixed-width table, one record per line.
pub fn render_table(records: &[Record]) -> String {
    if records.is_empty() {
        return "No records\n".to_string();
    }

    let name_width = records
        .iter()
        .map(|r| r.name.chars().count())
        .max()
        .unwrap_or(0)
        .max("NAME".len());
    let major_width = records
        .iter()
        .map(|r| r.major.chars().count())
        .max()
        .unwrap_or(0)
        .max("MAJOR".len());

    let mut out = format!(
        "{:>6}  {:<nw$}  {:>3}  {:<mw$}  {:>6}\n",
        "ID",
        "NAME",
        "AGE",
        "MAJOR",
        "GPA",
        nw = name_width,
        mw = major_width
    );
    for r in records {
        out.push_str(&format!(
            "{:>6}  {:<nw$}  {:>3}  {:<mw$}  {:>6.2}\n",
            r.id,
            r.name,
            r.age,
            r.major,
            r.gpa,
            nw = name_width,
            mw = major_width
        ));
    }
    out
}

pub fn render_record(record: &Record) -> String {
    format!(
        "id:            {}\nname:          {}\nage:           {}\nmajor:         {}\ngpa:           {:.2}\nregistered_at: {}\n",
        record.id, record.name, record.age, record.major, record.gpa, record.registered_at
    )
}
