//! Selector expression trees
//!
//! A [`Selector`] is a schema-agnostic description of which columns to pick.
//! Building a selector never touches a schema; all validation happens when
//! an [`Evaluator`](crate::eval::Evaluator) applies it to a schema view.

use crate::content::{ColumnType, DataColumn};
use indexmap::IndexMap;
use std::fmt;
use std::ops::{BitAnd, BitOr, BitXor, Neg, Not, Sub};
use std::sync::Arc;

/// A column selector expression
#[derive(Debug, Clone, PartialEq)]
pub enum Selector {
    /// All columns, schema order
    Everything,

    /// No columns
    Nothing,

    /// Exactly one named column; fails if absent
    Column(String),

    /// Requested names present in the schema, schema order.
    /// Strict membership fails on any missing name.
    OneOf { names: Vec<String>, strict: bool },

    /// Names matching a pattern
    Name(NamePattern),

    /// Columns whose content satisfies a predicate
    Where(ContentPredicate),

    /// The column `offset` positions before the last one
    Last(usize),

    /// Columns at positions `[start, stop]`
    IntRange(IntRange),

    /// Columns from one name to another, inclusive, schema order
    StrRange(StrRange),

    /// `prefix` followed by a zero-padded number in range
    NumRange {
        prefix: String,
        range: IntRange,
        width: usize,
    },

    /// Intersection
    And(Box<Selector>, Box<Selector>),

    /// Union
    Or(Box<Selector>, Box<Selector>),

    /// Symmetric difference
    Xor(Box<Selector>, Box<Selector>),

    /// Difference
    Minus(Box<Selector>, Box<Selector>),

    /// All schema columns not selected by the inner selector, schema order
    Complement(Box<Selector>),

    /// The inner selection in reverse order
    Reverse(Box<Selector>),
}

impl Selector {
    /// Create an AND (intersection) selector
    pub fn and(self, other: Selector) -> Self {
        Selector::And(Box::new(self), Box::new(other))
    }

    /// Create an OR (union) selector
    pub fn or(self, other: Selector) -> Self {
        Selector::Or(Box::new(self), Box::new(other))
    }

    /// Create an XOR (symmetric difference) selector
    pub fn xor(self, other: Selector) -> Self {
        Selector::Xor(Box::new(self), Box::new(other))
    }

    /// Create a difference selector
    pub fn minus(self, other: Selector) -> Self {
        Selector::Minus(Box::new(self), Box::new(other))
    }

    /// Create a complement selector
    pub fn complement(self) -> Self {
        Selector::Complement(Box::new(self))
    }

    /// Create a reversed selector
    pub fn reversed(self) -> Self {
        Selector::Reverse(Box::new(self))
    }

    /// Fold selectors left to right with OR
    ///
    /// An empty input yields [`Selector::Nothing`].
    pub fn reduce_or<I>(selectors: I) -> Self
    where
        I: IntoIterator<Item = Selector>,
    {
        let mut iter = selectors.into_iter();
        match iter.next() {
            Some(first) => iter.fold(first, Selector::or),
            None => Selector::Nothing,
        }
    }

    /// Check if this is a leaf (no child selectors)
    pub fn is_leaf(&self) -> bool {
        !matches!(
            self,
            Selector::And(..)
                | Selector::Or(..)
                | Selector::Xor(..)
                | Selector::Minus(..)
                | Selector::Complement(_)
                | Selector::Reverse(_)
        )
    }

    /// Short name of the node kind
    pub fn kind(&self) -> &'static str {
        match self {
            Selector::Everything => "everything",
            Selector::Nothing => "nothing",
            Selector::Column(_) => "column",
            Selector::OneOf { strict: true, .. } => "all_of",
            Selector::OneOf { strict: false, .. } => "one_of",
            Selector::Name(pattern) => pattern.kind(),
            Selector::Where(_) => "where",
            Selector::Last(_) => "last",
            Selector::IntRange(_) => "int_range",
            Selector::StrRange(_) => "str_range",
            Selector::NumRange { .. } => "num_range",
            Selector::And(..) => "and",
            Selector::Or(..) => "or",
            Selector::Xor(..) => "xor",
            Selector::Minus(..) => "minus",
            Selector::Complement(_) => "complement",
            Selector::Reverse(_) => "reverse",
        }
    }
}

impl BitAnd for Selector {
    type Output = Selector;

    fn bitand(self, rhs: Selector) -> Selector {
        self.and(rhs)
    }
}

impl BitOr for Selector {
    type Output = Selector;

    fn bitor(self, rhs: Selector) -> Selector {
        self.or(rhs)
    }
}

impl BitXor for Selector {
    type Output = Selector;

    fn bitxor(self, rhs: Selector) -> Selector {
        self.xor(rhs)
    }
}

impl Sub for Selector {
    type Output = Selector;

    fn sub(self, rhs: Selector) -> Selector {
        self.minus(rhs)
    }
}

impl Neg for Selector {
    type Output = Selector;

    fn neg(self) -> Selector {
        self.complement()
    }
}

impl Not for Selector {
    type Output = Selector;

    fn not(self) -> Selector {
        self.complement()
    }
}

/// A test applied to column names
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NamePattern {
    /// Name begins with the prefix
    StartsWith(String),
    /// Name ends with the suffix
    EndsWith(String),
    /// Name contains the substring
    Contains(String),
    /// Regex found anywhere in the name (unanchored)
    Matches(String),
}

impl NamePattern {
    /// Short name of the pattern kind
    pub fn kind(&self) -> &'static str {
        match self {
            NamePattern::StartsWith(_) => "starts_with",
            NamePattern::EndsWith(_) => "ends_with",
            NamePattern::Contains(_) => "contains",
            NamePattern::Matches(_) => "matches",
        }
    }

    /// The pattern text
    pub fn text(&self) -> &str {
        match self {
            NamePattern::StartsWith(s)
            | NamePattern::EndsWith(s)
            | NamePattern::Contains(s)
            | NamePattern::Matches(s) => s,
        }
    }
}

/// Inclusive range of positions or numbers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IntRange {
    pub start: usize,
    pub stop: usize,
}

impl IntRange {
    /// Create a new inclusive range
    pub fn new(start: usize, stop: usize) -> Self {
        Self { start, stop }
    }

    /// Iterate the values in the range (empty when `start > stop`)
    pub fn values(&self) -> std::ops::RangeInclusive<usize> {
        self.start..=self.stop
    }
}

impl From<std::ops::RangeInclusive<usize>> for IntRange {
    fn from(range: std::ops::RangeInclusive<usize>) -> Self {
        Self::new(*range.start(), *range.end())
    }
}

/// Inclusive range between two column names
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StrRange {
    pub start: String,
    pub stop: String,
}

impl StrRange {
    /// Create a new name range
    pub fn new(start: impl Into<String>, stop: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            stop: stop.into(),
        }
    }
}

/// Signature of a user-supplied content test: declared type and values
pub type ContentTest = dyn Fn(ColumnType, &DataColumn) -> bool + Send + Sync;

/// A shared, user-supplied content test
///
/// Two `ContentFn`s are equal only if they share the same closure.
#[derive(Clone)]
pub struct ContentFn(Arc<ContentTest>);

impl ContentFn {
    /// Wrap a closure
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(ColumnType, &DataColumn) -> bool + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    /// Apply the test to a column
    pub fn call(&self, column: &DataColumn) -> bool {
        (self.0)(column.dtype(), column)
    }
}

impl fmt::Debug for ContentFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ContentFn(..)")
    }
}

impl PartialEq for ContentFn {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// A test applied to column content
#[derive(Debug, Clone, PartialEq)]
pub enum ContentPredicate {
    /// Declared type equals the given type
    Type(ColumnType),
    /// Declared type is numeric
    Numeric,
    /// Arbitrary test over type and values
    Custom(ContentFn),
}

impl ContentPredicate {
    /// Test a column's content
    pub fn matches(&self, column: &DataColumn) -> bool {
        match self {
            ContentPredicate::Type(ty) => column.dtype() == *ty,
            ContentPredicate::Numeric => column.dtype().is_numeric(),
            ContentPredicate::Custom(f) => f.call(column),
        }
    }
}

/// A rename mapping, or the union of several
///
/// Each mapping is validated on its own, left to right. Pairs keep mapping
/// insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Rename {
    mappings: Vec<IndexMap<String, String>>,
}

impl Rename {
    /// Build a rename from `(old, new)` pairs
    pub fn new<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mapping = pairs
            .into_iter()
            .map(|(old, new)| (old.into(), new.into()))
            .collect();
        Self {
            mappings: vec![mapping],
        }
    }

    /// Union with another rename
    pub fn or(mut self, other: Rename) -> Self {
        self.mappings.extend(other.mappings);
        self
    }

    /// The individual mappings, in union order
    pub fn mappings(&self) -> &[IndexMap<String, String>] {
        &self.mappings
    }
}

impl BitOr for Rename {
    type Output = Rename;

    fn bitor(self, rhs: Rename) -> Rename {
        self.or(rhs)
    }
}
