//! gpkg_rows CLI
//!
//! Command-line interface for checking rows against GeoPackage table schemas.

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use gpkg_rows::database::{Catalog, CatalogStorage, MemoryEngine, RowLoader, UserDao};
use gpkg_rows::utils::Logger;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "gpkg_rows")]
#[command(about = "Typed rows for GeoPackage user tables", long_about = None)]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the tables and columns of a catalog
    Inspect {
        /// Catalog file path
        #[arg(short, long)]
        catalog: PathBuf,
    },

    /// Validate rows and print their storage values
    Marshal {
        /// Catalog file path
        #[arg(short, long)]
        catalog: PathBuf,

        /// Table name
        #[arg(short, long)]
        table: String,

        /// JSON file holding an array of row objects
        #[arg(short, long)]
        rows: PathBuf,
    },

    /// Insert rows into an in-memory table and print the assigned ids
    Insert {
        /// Catalog file path
        #[arg(short, long)]
        catalog: PathBuf,

        /// Table name
        #[arg(short, long)]
        table: String,

        /// JSON file holding an array of row objects
        #[arg(short, long)]
        rows: PathBuf,
    },
}

fn load_catalog(path: &Path) -> Result<Catalog> {
    CatalogStorage::new()
        .load(path)
        .with_context(|| format!("failed to load catalog {}", path.display()))
}

fn inspect(catalog: &Catalog) {
    println!("Catalog: {}", catalog.name);
    for table in catalog.tables() {
        println!("{} ({:?})", table.name(), table.kind());
        for column in table.columns() {
            let mut flags = Vec::new();
            if column.is_primary_key() {
                flags.push("PRIMARY KEY".to_string());
            }
            if column.is_not_null() {
                flags.push("NOT NULL".to_string());
            }
            if let Some(max) = column.max() {
                flags.push(format!("MAX {}", max));
            }
            println!(
                "  {:>3} {} {} {}",
                column.index(),
                column.name(),
                column.data_type(),
                flags.join(" ")
            );
        }
    }
}

fn marshal(catalog: &Catalog, table: &str, rows: &Path) -> Result<()> {
    let table = catalog.table(table)?;
    let rows = RowLoader::new()
        .load_json(&table, rows)
        .with_context(|| format!("failed to load rows from {}", rows.display()))?;

    let mut output = Vec::with_capacity(rows.len());
    for (position, row) in rows.iter().enumerate() {
        let values = row
            .to_content_values()
            .with_context(|| format!("row {} is not valid for {}", position, table.name()))?;
        output.push(values.to_json());
    }
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn insert(catalog: &Catalog, table: &str, rows: &Path) -> Result<()> {
    let table = catalog.table(table)?;
    let mut rows = RowLoader::new()
        .load_json(&table, rows)
        .with_context(|| format!("failed to load rows from {}", rows.display()))?;

    let mut engine = MemoryEngine::new();
    let mut dao = UserDao::new(&mut engine, Arc::clone(&table))?;
    for (position, row) in rows.iter_mut().enumerate() {
        let id = dao
            .insert(row)
            .with_context(|| format!("failed to insert row {} into {}", position, table.name()))?;
        println!("{} -> id {}", position, id);
    }
    println!("{} rows in {}", dao.count()?, table.name());
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    Logger::init_with_level(Logger::level_for(cli.verbose));

    match cli.command {
        Commands::Inspect { catalog } => {
            inspect(&load_catalog(&catalog)?);
        }
        Commands::Marshal {
            catalog,
            table,
            rows,
        } => {
            marshal(&load_catalog(&catalog)?, &table, &rows)?;
        }
        Commands::Insert {
            catalog,
            table,
            rows,
        } => {
            insert(&load_catalog(&catalog)?, &table, &rows)?;
        }
    }

    Ok(())
}
