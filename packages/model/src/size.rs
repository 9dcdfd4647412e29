//! Table dimensions and the size presets offered when a cell becomes a table.

use crate::ModelError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Rows × columns, both at least 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "SizeRepr")]
pub struct TableSize {
    rows: usize,
    columns: usize,
}

/// Accepts either `"3x2"` or `{ "rows": 3, "columns": 2 }`
#[derive(Deserialize)]
#[serde(untagged)]
enum SizeRepr {
    Label(String),
    Dims { rows: usize, columns: usize },
}

impl TryFrom<SizeRepr> for TableSize {
    type Error = ModelError;

    fn try_from(repr: SizeRepr) -> Result<Self, Self::Error> {
        match repr {
            SizeRepr::Label(label) => label.parse(),
            SizeRepr::Dims { rows, columns } => TableSize::new(rows, columns),
        }
    }
}

impl TableSize {
    pub const DEFAULT: TableSize = TableSize { rows: 3, columns: 3 };

    pub fn new(rows: usize, columns: usize) -> Result<Self, ModelError> {
        if rows == 0 || columns == 0 {
            return Err(ModelError::invalid_size(format!(
                "{}x{} has an empty dimension",
                rows, columns
            )));
        }
        Ok(Self { rows, columns })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }
}

impl Default for TableSize {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for TableSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.columns)
    }
}

impl FromStr for TableSize {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (rows, columns) = s
            .trim()
            .split_once(['x', 'X'])
            .ok_or_else(|| ModelError::invalid_size(format!("expected ROWSxCOLUMNS, got {:?}", s)))?;

        let rows = rows
            .trim()
            .parse()
            .map_err(|_| ModelError::invalid_size(format!("bad row count in {:?}", s)))?;
        let columns = columns
            .trim()
            .parse()
            .map_err(|_| ModelError::invalid_size(format!("bad column count in {:?}", s)))?;

        TableSize::new(rows, columns)
    }
}

/// Menu entry for nested-table creation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TablePreset {
    pub size: TableSize,

    /// Menu grouping only; the built table does not depend on it
    #[serde(default)]
    pub headed: bool,
}

const fn preset(rows: usize, columns: usize, headed: bool) -> TablePreset {
    TablePreset {
        size: TableSize { rows, columns },
        headed,
    }
}

pub const PLAIN_PRESETS: [TablePreset; 8] = [
    preset(3, 3, false),
    preset(2, 1, false),
    preset(1, 2, false),
    preset(5, 5, false),
    preset(1, 3, false),
    preset(3, 1, false),
    preset(2, 2, false),
    preset(4, 4, false),
];

pub const HEADED_PRESETS: [TablePreset; 5] = [
    preset(2, 2, true),
    preset(3, 3, true),
    preset(2, 1, true),
    preset(5, 5, true),
    preset(1, 2, true),
];

impl TablePreset {
    pub fn plain(size: TableSize) -> Self {
        Self {
            size,
            headed: false,
        }
    }

    /// Every preset in menu order, plain ones first
    pub fn all() -> impl Iterator<Item = TablePreset> {
        PLAIN_PRESETS.into_iter().chain(HEADED_PRESETS)
    }

    pub fn label(&self) -> String {
        self.to_string()
    }
}

impl From<TableSize> for TablePreset {
    fn from(size: TableSize) -> Self {
        Self::plain(size)
    }
}

impl fmt::Display for TablePreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.headed {
            write!(f, "Headed {}", self.size)
        } else {
            write!(f, "{}", self.size)
        }
    }
}

impl FromStr for TablePreset {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.strip_prefix("Headed") {
            Some(rest) => Ok(Self {
                size: rest.parse()?,
                headed: true,
            }),
            None => Ok(Self::plain(trimmed.parse()?)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_size() {
        let size: TableSize = "2x5".parse().unwrap();
        assert_eq!((size.rows(), size.columns()), (2, 5));

        let size: TableSize = " 4 X 1 ".parse().unwrap();
        assert_eq!(size.to_string(), "4x1");
    }

    #[test]
    fn test_reject_empty_dimensions() {
        assert!(TableSize::new(0, 3).is_err());
        assert!("3x0".parse::<TableSize>().is_err());
        assert!("3".parse::<TableSize>().is_err());
        assert!("ax2".parse::<TableSize>().is_err());
    }

    #[test]
    fn test_large_sizes_are_accepted() {
        let size: TableSize = "120x7".parse().unwrap();
        assert_eq!(size.rows(), 120);
    }

    #[test]
    fn test_preset_labels() {
        let labels: Vec<String> = TablePreset::all().map(|p| p.label()).collect();
        assert_eq!(labels.len(), 13);
        assert_eq!(labels[0], "3x3");
        assert_eq!(labels[8], "Headed 2x2");

        for label in labels {
            assert_eq!(label.parse::<TablePreset>().unwrap().label(), label);
        }
    }

    #[test]
    fn test_size_deserializes_from_label_or_dims() {
        let a: TableSize = serde_json::from_str(r#""2x3""#).unwrap();
        let b: TableSize = serde_json::from_str(r#"{ "rows": 2, "columns": 3 }"#).unwrap();
        assert_eq!(a, b);

        assert!(serde_json::from_str::<TableSize>(r#"{ "rows": 0, "columns": 3 }"#).is_err());
    }
}
