//! Column content as seen by content predicates
//!
//! A content handle is a declared type tag plus the column's values. Name
//! selectors never look at content; only `where` selectors do.

use serde::{Deserialize, Serialize};

/// Declared column data type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Float32,
    Float64,
    Int32,
    Int64,
    Bool,
    String,
    Unknown,
}

impl ColumnType {
    /// Check if this is a numeric type
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            ColumnType::Float32 | ColumnType::Float64 | ColumnType::Int32 | ColumnType::Int64
        )
    }

    /// Lowercase type name, as used in selector expressions
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnType::Float32 => "float32",
            ColumnType::Float64 => "float64",
            ColumnType::Int32 => "int32",
            ColumnType::Int64 => "int64",
            ColumnType::Bool => "bool",
            ColumnType::String => "string",
            ColumnType::Unknown => "unknown",
        }
    }

    /// Look up a type by its lowercase name
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "float32" | "f32" => Some(ColumnType::Float32),
            "float64" | "f64" => Some(ColumnType::Float64),
            "int32" | "i32" => Some(ColumnType::Int32),
            "int64" | "i64" => Some(ColumnType::Int64),
            "bool" => Some(ColumnType::Bool),
            "string" | "str" => Some(ColumnType::String),
            "unknown" => Some(ColumnType::Unknown),
            _ => None,
        }
    }
}

impl std::fmt::Display for ColumnType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The values of one column
#[derive(Debug, Clone, PartialEq)]
pub enum DataColumn {
    Float32(Vec<f32>),
    Float64(Vec<f64>),
    Int32(Vec<i32>),
    Int64(Vec<i64>),
    Bool(Vec<bool>),
    String(Vec<String>),
}

impl DataColumn {
    /// Type tag that content predicates receive alongside the values
    pub fn dtype(&self) -> ColumnType {
        match self {
            DataColumn::Float32(_) => ColumnType::Float32,
            DataColumn::Float64(_) => ColumnType::Float64,
            DataColumn::Int32(_) => ColumnType::Int32,
            DataColumn::Int64(_) => ColumnType::Int64,
            DataColumn::Bool(_) => ColumnType::Bool,
            DataColumn::String(_) => ColumnType::String,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            DataColumn::Float32(v) => v.len(),
            DataColumn::Float64(v) => v.len(),
            DataColumn::Int32(v) => v.len(),
            DataColumn::Int64(v) => v.len(),
            DataColumn::Bool(v) => v.len(),
            DataColumn::String(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Values widened to `f64`, or `None` for non-numeric columns
    ///
    /// `Int64` values beyond 2^53 lose precision.
    pub fn numeric_values(&self) -> Option<Vec<f64>> {
        let values: Vec<f64> = match self {
            DataColumn::Float32(v) => v.iter().copied().map(f64::from).collect(),
            DataColumn::Float64(v) => v.clone(),
            DataColumn::Int32(v) => v.iter().copied().map(f64::from).collect(),
            DataColumn::Int64(v) => v.iter().map(|&x| x as f64).collect(),
            DataColumn::Bool(_) | DataColumn::String(_) => return None,
        };
        Some(values)
    }
}
