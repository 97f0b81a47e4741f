//! flatdb CLI
//!
//! Command-line interface for working with a flatdb directory.

use std::io;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use flatdb::{Config, Database, EncodingKind, Key};
use tracing_subscriber::{fmt, EnvFilter};

/// flatdb CLI
#[derive(Parser, Debug)]
#[command(name = "flatdb-cli")]
#[command(about = "CLI for the flatdb embedded record store")]
#[command(version)]
struct Args {
    /// Data directory
    #[arg(short, long, default_value = "./flatdb_data")]
    data_dir: String,

    /// Table file encoding
    #[arg(short, long, value_enum, default_value_t = EncodingArg::Text)]
    encoding: EncodingArg,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum EncodingArg {
    /// serde/bincode files (.ser)
    Native,
    /// hex-escaped text files (.tbl)
    Text,
}

impl From<EncodingArg> for EncodingKind {
    fn from(arg: EncodingArg) -> Self {
        match arg {
            EncodingArg::Native => EncodingKind::Native,
            EncodingArg::Text => EncodingKind::Text,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List tables
    Tables,

    /// Create a table
    Create {
        /// The table name
        name: String,

        /// Column names
        columns: Vec<String>,
    },

    /// Add a record
    Add {
        /// The table to add to
        table: String,

        /// One value per column
        values: Vec<String>,
    },

    /// Show a record
    Get {
        /// The table to read from
        table: String,

        /// The record key
        key: Key,
    },

    /// Update one field of a record
    Update {
        /// The table to update
        table: String,

        /// The record key
        key: Key,

        /// The column to change
        column: String,

        /// The new value
        value: String,
    },

    /// Delete a record
    Delete {
        /// The table to delete from
        table: String,

        /// The record key
        key: Key,
    },

    /// Insert a column
    AddColumn {
        /// The table to change
        table: String,

        /// Position of the new column (0 = first)
        index: usize,

        /// The new column name
        name: String,

        /// Value given to existing records
        #[arg(long, default_value = "")]
        default: String,
    },

    /// Delete a column
    DropColumn {
        /// The table to change
        table: String,

        /// The column to delete
        name: String,
    },

    /// Rename a column
    RenameColumn {
        /// The table to change
        table: String,

        /// Current column name
        old: String,

        /// New column name
        new: String,
    },

    /// Rename a table
    RenameTable {
        /// Current table name
        old: String,

        /// New table name
        new: String,
    },

    /// Print a table
    Print {
        /// The table to print
        table: String,
    },
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,flatdb=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let config = Config::builder()
        .data_dir(&args.data_dir)
        .encoding(args.encoding.into())
        .build();

    let mut database = match Database::open(config) {
        Ok(db) => db,
        Err(e) => {
            tracing::error!("Failed to open database: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run(&mut database, args.command) {
        tracing::error!("{}", e);
        process::exit(1);
    }
}

/// Execute one command, saving afterwards if it changed anything
fn run(db: &mut Database, command: Commands) -> flatdb::Result<()> {
    let mutated = match command {
        Commands::Tables => {
            let names = db.table_names();
            if names.is_empty() {
                println!("Currently no tables present.");
            }
            for name in names {
                println!("{}", name);
            }
            false
        }
        Commands::Create { name, columns } => {
            db.add_table(&name, &columns.join(", "))?;
            println!("Table {} added.", name);
            true
        }
        Commands::Add { table, values } => {
            let key = db.add_record(&table, values)?;
            println!("Record added with key {}.", key);
            true
        }
        Commands::Get { table, key } => {
            let fields = db.field_names(&table)?;
            let record = db.get_record(&table, key)?;
            for (field, value) in fields.iter().zip(record.fields()) {
                println!("{}: {}", field, value);
            }
            false
        }
        Commands::Update {
            table,
            key,
            column,
            value,
        } => {
            db.update_record(&table, key, &column, value)?;
            println!("Update completed successfully.");
            true
        }
        Commands::Delete { table, key } => {
            db.delete_record(&table, key)?;
            println!("Record deleted successfully.");
            true
        }
        Commands::AddColumn {
            table,
            index,
            name,
            default,
        } => {
            db.add_column(&table, index, &name, &default)?;
            println!("Column {} added.", name);
            true
        }
        Commands::DropColumn { table, name } => {
            db.delete_column(&table, &name)?;
            println!("Column {} deleted.", name);
            true
        }
        Commands::RenameColumn { table, old, new } => {
            db.rename_column(&table, &old, &new)?;
            println!("Column renamed successfully.");
            true
        }
        Commands::RenameTable { old, new } => {
            db.rename_table(&old, &new)?;
            println!("Table renamed successfully.");
            true
        }
        Commands::Print { table } => {
            db.print_table(&table, &mut io::stdout().lock())?;
            false
        }
    };

    if mutated {
        db.save_database()?;
    }
    Ok(())
}
