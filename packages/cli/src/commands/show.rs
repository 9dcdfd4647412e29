use crate::config::Config;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use gridnest_model::{
    walk_cell, walk_table, Cell, CellContent, CellCoord, PaneRegion, Table, TableId, TablePath,
    TableVisitor,
};
use gridnest_workspace::TableStore;

#[derive(Debug, Args)]
pub struct ShowArgs {
    pub id: u64,

    /// Print the stored JSON instead of the tree
    #[arg(long)]
    pub json: bool,
}

pub fn show(args: ShowArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let store = TableStore::load_dir(&config.get_data_dir(cwd))?;
    let record = store.get_table(TableId(args.id))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&record.table)?);
        return Ok(());
    }

    println!("{}", super::tables::summary_line(record));
    for line in render_tree(&record.table) {
        if line.trim_start().starts_with('▸') {
            println!("{}", line.bold());
        } else {
            println!("{}", line);
        }
    }
    Ok(())
}

const PREVIEW_CHARS: usize = 32;

/// One line per table and per cell, nested tables indented under the cell
/// that owns them
pub fn render_tree(root: &Table) -> Vec<String> {
    let mut printer = TreePrinter {
        lines: Vec::new(),
        frozen: Vec::new(),
    };
    printer.visit_table(root, &TablePath::root());
    printer.lines
}

struct TreePrinter {
    lines: Vec<String>,
    /// Freeze state of each table on the current path
    frozen: Vec<gridnest_model::FreezeState>,
}

fn indent(path: &TablePath) -> String {
    "    ".repeat(path.depth())
}

fn pane_marker(region: PaneRegion) -> char {
    match region {
        PaneRegion::Corner => '◆',
        PaneRegion::FrozenRows => '▬',
        PaneRegion::FrozenColumns => '▮',
        PaneRegion::Scrollable => ' ',
    }
}

fn preview(cell: &Cell) -> String {
    let text = match &cell.content {
        CellContent::Image(uri) if uri.starts_with("data:") => {
            let mime = uri
                .trim_start_matches("data:")
                .split(';')
                .next()
                .unwrap_or_default();
            format!("<{} data>", mime)
        }
        CellContent::Image(uri) => uri.clone(),
        CellContent::Table(_) => String::new(),
        _ => cell.text_value().unwrap_or_default().replace('\n', " / "),
    };

    if text.chars().count() > PREVIEW_CHARS {
        let cut: String = text.chars().take(PREVIEW_CHARS).collect();
        format!("{}…", cut)
    } else {
        text
    }
}

impl TableVisitor for TreePrinter {
    fn visit_table(&mut self, table: &Table, path: &TablePath) {
        let mut header = format!(
            "{}▸ {} #{} {}x{}",
            indent(path),
            table.name,
            table.id,
            table.row_count(),
            table.column_count()
        );
        if !table.frozen.is_empty() {
            header.push_str(&format!(
                " (frozen {} rows, {} columns)",
                table.frozen.rows, table.frozen.columns
            ));
        }
        self.lines.push(header);

        self.frozen.push(table.frozen);
        walk_table(self, table, path);
        self.frozen.pop();
    }

    fn visit_cell(&mut self, cell: &Cell, path: &TablePath, coord: CellCoord) {
        let region = self
            .frozen
            .last()
            .map_or(PaneRegion::Scrollable, |frozen| frozen.region(coord.row, coord.col));

        self.lines.push(
            format!(
                "{}  {} {} {:<11} {}",
                indent(path),
                pane_marker(region),
                coord,
                cell.content_type(),
                preview(cell)
            )
            .trim_end()
            .to_string(),
        );
        walk_cell(self, cell, path, coord);
    }
}
