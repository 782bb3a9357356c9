//! rosterdb CLI
//!
//! Command-line interface for managing an employee database file.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};
use uuid::Uuid;

use rosterdb::{Config, Record, RecordFactory, RecordStore, RosterError};

/// rosterdb CLI
#[derive(Parser, Debug)]
#[command(name = "rosterdb-cli")]
#[command(about = "CLI for the rosterdb employee record store")]
#[command(version)]
struct Args {
    /// Database file
    #[arg(short, long, default_value = "./roster.db")]
    db: PathBuf,

    /// Company name (used when creating a new database)
    #[arg(long, default_value = Config::DEFAULT_COMPANY_NAME)]
    company: String,

    /// Email domain override (defaults to the normalized company name)
    #[arg(long)]
    email_suffix: Option<String>,

    /// Maximum employee count (used when creating a new database)
    #[arg(long, default_value_t = Config::DEFAULT_MAX_EMPLOYEES)]
    max_employees: u32,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate and insert new employees
    Add {
        /// How many employees to add
        #[arg(short, long, default_value_t = 1)]
        count: u32,
    },

    /// Show one employee
    Get {
        /// The employee id
        id: Uuid,
    },

    /// List all employees
    List,

    /// Remove an employee
    Remove {
        /// The employee id
        id: Uuid,
    },

    /// Update one field of an employee
    Update {
        /// The employee id
        id: Uuid,

        /// Field name (first_name, last_name, department, salary)
        field: String,

        /// New value, stored as-given
        value: String,
    },

    /// Find employees by field comparison
    Query {
        /// Field name
        field: String,

        /// Comparison operator: ==, !=, <, <=, >, >=
        operator: String,

        /// Value to compare against (coerced like a stored field)
        value: String,
    },

    /// Delete all employees, keeping the database metadata
    Reset {
        /// Confirm the reset
        #[arg(long)]
        yes: bool,
    },

    /// Replace the database file with its backup
    Restore,

    /// Show database metadata
    Info,
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,rosterdb=debug"));

    fmt().with_env_filter(filter).with_target(false).init();

    let args = Args::parse();

    let mut builder = Config::builder()
        .db_path(&args.db)
        .company_name(&args.company)
        .max_employees(args.max_employees);
    if let Some(suffix) = &args.email_suffix {
        builder = builder.email_suffix(suffix);
    }
    let config = builder.build();

    let store = match RecordStore::open(config) {
        Ok(store) => store,
        Err(e) => {
            tracing::error!("Failed to open database: {}", e);
            std::process::exit(1);
        }
    };

    let factory = RecordFactory::new();

    if let Err(e) = run(&store, &factory, args.command) {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(store: &RecordStore, factory: &RecordFactory, command: Commands) -> rosterdb::Result<()> {
    match command {
        Commands::Add { count } => {
            for _ in 0..count {
                let id = store.add(factory)?;
                if let Some(record) = store.get(id) {
                    println!(
                        "{}  {} {}  <{}>",
                        id, record.first_name, record.last_name, record.email
                    );
                }
            }
        }

        Commands::Get { id } => match store.get(id) {
            Some(record) => print_record(&record),
            None => return Err(RosterError::NotFound(id)),
        },

        Commands::List => {
            let records = store.get_all();
            if records.is_empty() {
                println!("(empty)");
            }
            for (id, record) in records.iter() {
                println!(
                    "{}  {} {}  dept={}  {}",
                    id, record.first_name, record.last_name, record.department, record.email
                );
            }
        }

        Commands::Remove { id } => {
            store.remove(id)?;
            println!("Removed {}", id);
        }

        Commands::Update { id, field, value } => {
            store.update_field(id, &field, &value)?;
            println!("Updated {} of {}", field, id);
        }

        Commands::Query {
            field,
            operator,
            value,
        } => match store.query_by_field(&field, &operator, &value) {
            Ok(matches) => {
                println!("{} match(es)", matches.len());
                for (id, record) in &matches {
                    println!(
                        "{}  {} {}  {}={}",
                        id,
                        record.first_name,
                        record.last_name,
                        field,
                        record.field(&field).unwrap_or_default()
                    );
                }
            }
            // Bad query input renders as an empty result; the store has
            // already logged the reason.
            Err(RosterError::InvalidOperator(_)) | Err(RosterError::UnknownQueryField(_)) => {
                println!("0 match(es)");
            }
            Err(other) => return Err(other),
        },

        Commands::Reset { yes } => {
            if !yes {
                eprintln!("Refusing to reset without --yes");
                std::process::exit(2);
            }
            store.reset()?;
            println!("Database reset");
        }

        Commands::Restore => {
            if store.restore_backup() {
                println!("Backup restored ({} records)", store.len());
            } else {
                return Err(RosterError::Recovery(
                    "no backup file found to restore".to_string(),
                ));
            }
        }

        Commands::Info => {
            let metadata = store.metadata();
            println!("Database:     {}", store.db_path().display());
            println!("Company:      {}", metadata.company_name);
            println!("Email domain: {}.com", metadata.email_suffix);
            println!("Created:      {}", metadata.creation_date);
            println!(
                "Employees:    {} / {}",
                metadata.total_employees, metadata.max_employees
            );
        }
    }

    Ok(())
}

fn print_record(record: &Record) {
    println!("id:         {}", record.id);
    println!("first_name: {}", record.first_name);
    println!("last_name:  {}", record.last_name);
    println!("department: {}", record.department);
    println!("salary:     {}", record.salary);
    println!("birth_date: {}", record.birth_date);
    println!("email:      {}", record.email);
}
