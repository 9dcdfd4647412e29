use crate::config::Config;
use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use gridnest_editor::Mutation;
use gridnest_model::TableId;
use gridnest_workspace::{JsonDirSink, TableStore};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ApplyArgs {
    pub id: u64,

    /// Mutation as JSON, e.g. '{"AddRow":{}}'
    #[arg(required_unless_present = "file")]
    pub mutation: Option<String>,

    /// Read a JSON array of mutations from a file instead
    #[arg(short, long, conflicts_with = "mutation")]
    pub file: Option<PathBuf>,
}

/// Parse a single mutation or a JSON array of them
pub fn parse_mutations(json: &str) -> Result<Vec<Mutation>> {
    let value: serde_json::Value = serde_json::from_str(json).context("Mutation is not valid JSON")?;
    let mutations = match value {
        serde_json::Value::Array(_) => serde_json::from_value(value)?,
        _ => vec![serde_json::from_value(value)?],
    };
    Ok(mutations)
}

pub fn apply(args: ApplyArgs, cwd: &str) -> Result<()> {
    let json = match (&args.mutation, &args.file) {
        (_, Some(path)) => fs::read_to_string(path)
            .with_context(|| format!("Cannot read {}", path.display()))?,
        (Some(json), None) => json.clone(),
        (None, None) => anyhow::bail!("No mutation given"),
    };
    let mutations = parse_mutations(&json)?;

    let config = Config::load(cwd)?;
    let dir = config.get_data_dir(cwd);
    let store = TableStore::load_dir(&dir)?;
    let mut document = store
        .open_document(TableId(args.id))?
        .with_sink(JsonDirSink::new(&dir));

    for mutation in mutations {
        let name = mutation.name();
        let result = document
            .apply(mutation)
            .with_context(|| format!("{} failed", name))?;

        if result.changed {
            println!("  {} {} {}", "✓".green(), name, format!("v{}", result.version).dimmed());
        } else {
            println!("  {} {} {}", "·".dimmed(), name, "(no change)".dimmed());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridnest_model::{CellCoord, TablePath};

    #[test]
    fn test_parse_single_and_many() {
        let one = parse_mutations(r#"{ "AddRow": {} }"#).unwrap();
        assert_eq!(one, vec![Mutation::AddRow { path: TablePath::root() }]);

        let many = parse_mutations(
            r#"[
                { "AddColumn": {} },
                { "EditCellText": { "cell": { "row": 0, "col": 0 }, "text": "Owner" } }
            ]"#,
        )
        .unwrap();
        assert_eq!(many.len(), 2);
        assert_eq!(
            many[1],
            Mutation::EditCellText {
                path: TablePath::root(),
                cell: CellCoord::new(0, 0),
                text: "Owner".into(),
            }
        );
    }

    #[test]
    fn test_parse_rejects_unknown_mutation() {
        assert!(parse_mutations(r#"{ "Explode": {} }"#).is_err());
        assert!(parse_mutations("not json").is_err());
    }
}
