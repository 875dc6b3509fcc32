//! Selector evaluation
//!
//! Evaluates selector trees against a schema view. Leaves query the view;
//! combinators only combine their children's result sets. Evaluation is
//! pure: nothing is cached between calls and the view is never mutated.

use crate::ast::{IntRange, NamePattern, Rename, Selector, StrRange};
use crate::config::SelectConfig;
use crate::error::{SelectError, SelectResult};
use crate::result_set::ResultSet;
use crate::schema::SchemaView;
use regex::RegexBuilder;
use std::borrow::Cow;
use std::collections::HashMap;

/// A selected column name
pub type Names = ResultSet<String>;

/// Selected `(old, new)` rename pairs
pub type RenamePairs = ResultSet<(String, String)>;

/// Evaluator bound to one schema view
///
/// Holds the view's names and a name to position index for the lifetime of
/// the evaluator, so range lookups do not rescan the schema.
pub struct Evaluator<'a, V: SchemaView + ?Sized> {
    view: &'a V,
    config: SelectConfig,
    names: Vec<&'a str>,
    positions: HashMap<&'a str, usize>,
}

impl<'a, V: SchemaView + ?Sized> Evaluator<'a, V> {
    /// Create a new evaluator with default settings
    pub fn new(view: &'a V) -> Self {
        Self::with_config(view, SelectConfig::default())
    }

    /// Create a new evaluator with the given settings
    pub fn with_config(view: &'a V, config: SelectConfig) -> Self {
        let names = view.names();
        let positions = names
            .iter()
            .enumerate()
            .map(|(position, name)| (*name, position))
            .collect();
        Self {
            view,
            config,
            names,
            positions,
        }
    }

    /// Number of columns in the view
    pub fn size(&self) -> usize {
        self.names.len()
    }

    /// Evaluate a selector to an ordered set of names
    pub fn evaluate(&self, selector: &Selector) -> SelectResult<Names> {
        tracing::debug!(
            "Evaluating {} selector against {} columns",
            selector.kind(),
            self.size()
        );
        let result = self.evaluate_node(selector)?;
        tracing::debug!("Selected {} of {} columns", result.len(), self.size());
        Ok(result)
    }

    /// Evaluate a rename to an ordered set of `(old, new)` pairs
    ///
    /// Every mapping is checked in turn; the first one referencing missing
    /// columns fails the whole rename.
    pub fn evaluate_rename(&self, rename: &Rename) -> SelectResult<RenamePairs> {
        let mut pairs = RenamePairs::new();
        for mapping in rename.mappings() {
            let missing: Vec<String> = mapping
                .keys()
                .filter(|old| !self.positions.contains_key(old.as_str()))
                .cloned()
                .collect();
            if !missing.is_empty() {
                return Err(SelectError::RenameMissing { missing });
            }
            pairs.extend(
                mapping
                    .iter()
                    .map(|(old, new)| (old.clone(), new.clone())),
            );
        }
        tracing::debug!("Renaming {} columns", pairs.len());
        Ok(pairs)
    }

    fn evaluate_node(&self, selector: &Selector) -> SelectResult<Names> {
        tracing::trace!("Evaluating {} node", selector.kind());

        match selector {
            Selector::Everything => Ok(self.all_names()),
            Selector::Nothing => Ok(Names::new()),

            Selector::Column(name) => {
                self.position_of(name)?;
                Ok(std::iter::once(name.clone()).collect())
            }

            Selector::OneOf { names, strict } => self.evaluate_one_of(names, *strict),

            Selector::Name(pattern) => self.evaluate_pattern(pattern),

            Selector::Where(predicate) => Ok(self.filter_names(|name| {
                match self.view.content(name) {
                    Some(column) => predicate.matches(column),
                    None => {
                        tracing::warn!("No content for column '{}', skipping", name);
                        false
                    }
                }
            })),

            Selector::Last(offset) => {
                let size = self.size();
                if *offset >= size {
                    return Err(SelectError::OutOfBounds {
                        index: *offset,
                        size,
                    });
                }
                let position = size - 1 - offset;
                Ok(self.slice(position, position))
            }

            Selector::IntRange(range) => self.evaluate_int_range(range),

            Selector::StrRange(range) => self.evaluate_str_range(range),

            Selector::NumRange {
                prefix,
                range,
                width,
            } => Ok(self.evaluate_num_range(prefix, range, *width)),

            Selector::And(left, right) => {
                Ok(self.evaluate_node(left)?.intersect(&self.evaluate_node(right)?))
            }

            Selector::Or(left, right) => {
                Ok(self.evaluate_node(left)?.union(&self.evaluate_node(right)?))
            }

            Selector::Xor(left, right) => Ok(self
                .evaluate_node(left)?
                .symmetric_difference(&self.evaluate_node(right)?)),

            Selector::Minus(left, right) => {
                Ok(self.evaluate_node(left)?.difference(&self.evaluate_node(right)?))
            }

            Selector::Complement(inner) => {
                Ok(self.all_names().difference(&self.evaluate_node(inner)?))
            }

            Selector::Reverse(inner) => Ok(self.evaluate_node(inner)?.reversed()),
        }
    }

    /// Evaluate `one_of` / `all_of`
    fn evaluate_one_of(&self, requested: &[String], strict: bool) -> SelectResult<Names> {
        if strict {
            let missing: Names = requested
                .iter()
                .filter(|name| !self.positions.contains_key(name.as_str()))
                .cloned()
                .collect();
            if !missing.is_empty() {
                return Err(SelectError::MissingColumns {
                    selector: "all_of",
                    missing: missing.into_vec(),
                });
            }
        }

        Ok(self.filter_names(|name| requested.iter().any(|r| r == name)))
    }

    /// Evaluate a name pattern
    fn evaluate_pattern(&self, pattern: &NamePattern) -> SelectResult<Names> {
        tracing::trace!("Matching names with {} '{}'", pattern.kind(), pattern.text());
        let ignore_case = self.config.ignore_case;

        match pattern {
            NamePattern::StartsWith(prefix) => {
                let prefix = fold_case(prefix, ignore_case);
                Ok(self.filter_names(|name| fold_case(name, ignore_case).starts_with(&*prefix)))
            }
            NamePattern::EndsWith(suffix) => {
                let suffix = fold_case(suffix, ignore_case);
                Ok(self.filter_names(|name| fold_case(name, ignore_case).ends_with(&*suffix)))
            }
            NamePattern::Contains(part) => {
                let part = fold_case(part, ignore_case);
                Ok(self.filter_names(|name| fold_case(name, ignore_case).contains(&*part)))
            }
            NamePattern::Matches(source) => {
                let regex = RegexBuilder::new(source)
                    .case_insensitive(ignore_case)
                    .size_limit(self.config.regex_size_limit)
                    .build()
                    .map_err(|e| SelectError::InvalidPattern {
                        pattern: source.clone(),
                        message: e.to_string(),
                    })?;
                Ok(self.filter_names(|name| regex.is_match(name)))
            }
        }
    }

    /// Evaluate an inclusive position range
    fn evaluate_int_range(&self, range: &IntRange) -> SelectResult<Names> {
        let size = self.size();
        for index in [range.start, range.stop] {
            if index >= size {
                return Err(SelectError::OutOfBounds { index, size });
            }
        }
        Ok(self.slice(range.start, range.stop))
    }

    /// Evaluate an inclusive name range
    fn evaluate_str_range(&self, range: &StrRange) -> SelectResult<Names> {
        let start = self.position_of(&range.start)?;
        let stop = self.position_of(&range.stop)?;
        Ok(self.slice(start, stop))
    }

    /// Evaluate `prefix` + zero-padded number names
    ///
    /// Each schema name is parsed back into its number, so the cost follows
    /// the schema size rather than the width of the range.
    fn evaluate_num_range(&self, prefix: &str, range: &IntRange, width: usize) -> Names {
        self.filter_names(|name| {
            let Some(digits) = name.strip_prefix(prefix) else {
                return false;
            };
            match digits.parse::<usize>() {
                Ok(n) if range.start <= n && n <= range.stop => {
                    format!("{n:0width$}") == digits
                }
                _ => false,
            }
        })
    }

    /// All names in schema order
    fn all_names(&self) -> Names {
        self.names.iter().map(|name| name.to_string()).collect()
    }

    /// Names satisfying a test, in schema order
    fn filter_names<F>(&self, mut test: F) -> Names
    where
        F: FnMut(&str) -> bool,
    {
        self.names
            .iter()
            .filter(|name| test(**name))
            .map(|name| name.to_string())
            .collect()
    }

    /// Names at positions `start..=stop`; empty when `start > stop`
    fn slice(&self, start: usize, stop: usize) -> Names {
        if start > stop {
            return Names::new();
        }
        self.names[start..=stop]
            .iter()
            .map(|name| name.to_string())
            .collect()
    }

    /// Position of a name, or a lookup error
    fn position_of(&self, name: &str) -> SelectResult<usize> {
        self.positions
            .get(name)
            .copied()
            .ok_or_else(|| SelectError::ColumnNotFound(name.to_string()))
    }
}

/// Lowercase a name when matching ignores case, borrow it otherwise
fn fold_case(s: &str, ignore_case: bool) -> Cow<'_, str> {
    if ignore_case {
        Cow::Owned(s.to_lowercase())
    } else {
        Cow::Borrowed(s)
    }
}

/// Evaluate a selector against a schema view
pub fn evaluate<V: SchemaView + ?Sized>(selector: &Selector, view: &V) -> SelectResult<Names> {
    Evaluator::new(view).evaluate(selector)
}

/// Evaluate a rename against a schema view
pub fn evaluate_rename<V: SchemaView + ?Sized>(
    rename: &Rename,
    view: &V,
) -> SelectResult<RenamePairs> {
    Evaluator::new(view).evaluate_rename(rename)
}

/// Evaluate several selectors independently against the same view
pub fn evaluate_each<V: SchemaView + ?Sized>(
    view: &V,
    selectors: &[Selector],
) -> SelectResult<Vec<Vec<String>>> {
    let evaluator = Evaluator::new(view);
    selectors
        .iter()
        .map(|selector| evaluator.evaluate(selector).map(Names::into_vec))
        .collect()
}

/// Select column names from a table
pub fn select<V: SchemaView + ?Sized>(table: &V, selector: &Selector) -> SelectResult<Vec<String>> {
    evaluate(selector, table).map(Names::into_vec)
}

/// Select column names from a table with the union of several selectors
pub fn select_all<V, I>(table: &V, selectors: I) -> SelectResult<Vec<String>>
where
    V: SchemaView + ?Sized,
    I: IntoIterator<Item = Selector>,
{
    select(table, &Selector::reduce_or(selectors))
}
