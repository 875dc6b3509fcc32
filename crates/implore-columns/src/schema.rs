//! Schema views: the read-only window selectors evaluate against
//!
//! The `SchemaView` trait is the only boundary between the selector engine
//! and a host table. Schema order (the order of `names()`) is the single
//! source of truth for every positional and ordering rule.

use crate::content::DataColumn;
use indexmap::IndexMap;

/// Read-only view of a table's columns
///
/// Implementations must return unique names. Views are never mutated or
/// retained by the evaluator.
pub trait SchemaView {
    /// Column names in schema order
    fn names(&self) -> Vec<&str>;

    /// Content handle for a column, if the view carries content
    fn content(&self, name: &str) -> Option<&DataColumn>;

    /// Number of columns
    fn size(&self) -> usize {
        self.names().len()
    }
}

impl SchemaView for [String] {
    fn names(&self) -> Vec<&str> {
        self.iter().map(String::as_str).collect()
    }

    fn content(&self, _name: &str) -> Option<&DataColumn> {
        None
    }

    fn size(&self) -> usize {
        self.len()
    }
}

impl SchemaView for Vec<String> {
    fn names(&self) -> Vec<&str> {
        self.as_slice().names()
    }

    fn content(&self, _name: &str) -> Option<&DataColumn> {
        None
    }

    fn size(&self) -> usize {
        self.len()
    }
}

impl<'a> SchemaView for [&'a str] {
    fn names(&self) -> Vec<&str> {
        self.to_vec()
    }

    fn content(&self, _name: &str) -> Option<&DataColumn> {
        None
    }

    fn size(&self) -> usize {
        self.len()
    }
}

impl<'a> SchemaView for Vec<&'a str> {
    fn names(&self) -> Vec<&str> {
        self.as_slice().names()
    }

    fn content(&self, _name: &str) -> Option<&DataColumn> {
        None
    }

    fn size(&self) -> usize {
        self.len()
    }
}

/// An in-memory table of named columns in insertion order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    columns: IndexMap<String, DataColumn>,
}

impl Frame {
    /// Create an empty frame
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a column, replacing any column of the same name in place
    pub fn with_column(mut self, name: impl Into<String>, data: DataColumn) -> Self {
        self.insert_column(name, data);
        self
    }

    /// Add a column, replacing any column of the same name in place
    ///
    /// Returns the replaced column, if any.
    pub fn insert_column(&mut self, name: impl Into<String>, data: DataColumn) -> Option<DataColumn> {
        self.columns.insert(name.into(), data)
    }

    /// Get a column by name
    pub fn column(&self, name: &str) -> Option<&DataColumn> {
        self.columns.get(name)
    }

    /// Get column index by name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.get_index_of(name)
    }

    /// Number of columns
    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    /// Iterate over `(name, column)` pairs in schema order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &DataColumn)> {
        self.columns.iter().map(|(name, data)| (name.as_str(), data))
    }
}

impl<N: Into<String>> FromIterator<(N, DataColumn)> for Frame {
    fn from_iter<I: IntoIterator<Item = (N, DataColumn)>>(iter: I) -> Self {
        let mut frame = Frame::new();
        for (name, data) in iter {
            frame.insert_column(name, data);
        }
        frame
    }
}

impl SchemaView for Frame {
    fn names(&self) -> Vec<&str> {
        self.columns.keys().map(String::as_str).collect()
    }

    fn content(&self, name: &str) -> Option<&DataColumn> {
        self.columns.get(name)
    }

    fn size(&self) -> usize {
        self.columns.len()
    }
}
