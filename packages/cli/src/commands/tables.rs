//! Catalog commands: new, list, rename, delete

use crate::config::Config;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use gridnest_model::{TableId, TableSize};
use gridnest_workspace::{TableRecord, TableStore};

#[derive(Debug, Args)]
pub struct NewArgs {
    /// Table name
    pub name: String,

    /// Size as ROWSxCOLUMNS (defaults to the configured size)
    #[arg(short, long)]
    pub size: Option<TableSize>,

    /// Fill cells with R1C1-style labels
    #[arg(short, long)]
    pub labelled: bool,
}

#[derive(Debug, Args)]
pub struct RenameArgs {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Args)]
pub struct DeleteArgs {
    pub id: u64,
}

/// Load the catalog, run `edit`, write it back
fn with_store<T>(cwd: &str, edit: impl FnOnce(&mut TableStore) -> Result<T>) -> Result<T> {
    let config = Config::load(cwd)?;
    let dir = config.get_data_dir(cwd);

    let mut store = TableStore::load_dir(&dir)?;
    let value = edit(&mut store)?;
    store.persist_dir(&dir)?;
    Ok(value)
}

pub fn new_table(args: NewArgs, cwd: &str) -> Result<()> {
    let size = match args.size {
        Some(size) => size,
        None => Config::load(cwd)?.default_table_size,
    };

    let record = with_store(cwd, |store| {
        let record = if args.labelled {
            store.create_labelled_table(&args.name, size)?
        } else {
            store.create_table(&args.name, size)?
        };
        Ok(record.clone())
    })?;

    println!(
        "{} Created {} {}",
        "✓".green(),
        record.name().bright_white(),
        format!("#{} ({})", record.id(), size).dimmed()
    );
    Ok(())
}

pub fn list(cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let store = TableStore::load_dir(&config.get_data_dir(cwd))?;

    if store.is_empty() {
        println!("No tables yet. Run: gridnest new \"My table\"");
        return Ok(());
    }

    for record in store.list() {
        println!("{}", summary_line(record));
    }
    Ok(())
}

pub fn rename(args: RenameArgs, cwd: &str) -> Result<()> {
    let id = TableId(args.id);
    with_store(cwd, |store| {
        store.rename_table(id, &args.name)?;
        Ok(())
    })?;

    println!("{} Renamed #{} to {}", "✓".green(), id, args.name.trim().bright_white());
    Ok(())
}

pub fn delete(args: DeleteArgs, cwd: &str) -> Result<()> {
    let record = with_store(cwd, |store| Ok(store.delete_table(TableId(args.id))?))?;
    println!("{} Deleted {} #{}", "✓".green(), record.name(), record.id());
    Ok(())
}

pub(crate) fn summary_line(record: &TableRecord) -> String {
    let size = record
        .table
        .size()
        .map_or_else(|| "?".to_string(), |size| size.to_string());

    format!(
        "{:>6}  {}  {}  {}",
        format!("#{}", record.id()).cyan(),
        record.name().bright_white(),
        size.dimmed(),
        format!(
            "v{} · updated {}",
            record.version,
            record.updated_at.format("%Y-%m-%d %H:%M")
        )
        .dimmed()
    )
}
