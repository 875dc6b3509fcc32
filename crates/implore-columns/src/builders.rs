//! Constructor functions for selectors
//!
//! Each pattern constructor has a single-argument form and an `_any` form
//! taking a list. The list form is the left-to-right OR of the single form
//! applied to each argument.

use crate::ast::{
    ContentFn, ContentPredicate, IntRange, NamePattern, Rename, Selector, StrRange,
};
use crate::content::{ColumnType, DataColumn};

fn variadic<I, T, F>(args: I, single: F) -> Selector
where
    I: IntoIterator<Item = T>,
    F: Fn(T) -> Selector,
{
    Selector::reduce_or(args.into_iter().map(single))
}

fn owned<I, S>(names: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    names.into_iter().map(Into::into).collect()
}

/// All columns
pub fn everything() -> Selector {
    Selector::Everything
}

/// No columns
pub fn nothing() -> Selector {
    Selector::Nothing
}

/// A single column by exact name; fails at evaluation if absent
pub fn column(name: impl Into<String>) -> Selector {
    Selector::Column(name.into())
}

/// The named columns that exist, in schema order
pub fn one_of<I, S>(names: I) -> Selector
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    Selector::OneOf {
        names: owned(names),
        strict: false,
    }
}

/// Alias of [`one_of`]
pub fn any_of<I, S>(names: I) -> Selector
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    one_of(names)
}

/// The named columns, in schema order; fails listing every missing name
pub fn all_of<I, S>(names: I) -> Selector
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    Selector::OneOf {
        names: owned(names),
        strict: true,
    }
}

/// Names beginning with `prefix`
pub fn starts_with(prefix: impl Into<String>) -> Selector {
    Selector::Name(NamePattern::StartsWith(prefix.into()))
}

/// Names beginning with any of the prefixes
pub fn starts_with_any<I, S>(prefixes: I) -> Selector
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    variadic(prefixes, |prefix| starts_with(prefix))
}

/// Names ending with `suffix`
pub fn ends_with(suffix: impl Into<String>) -> Selector {
    Selector::Name(NamePattern::EndsWith(suffix.into()))
}

/// Names ending with any of the suffixes
pub fn ends_with_any<I, S>(suffixes: I) -> Selector
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    variadic(suffixes, |suffix| ends_with(suffix))
}

/// Names containing `part`
pub fn contains(part: impl Into<String>) -> Selector {
    Selector::Name(NamePattern::Contains(part.into()))
}

/// Names containing any of the parts
pub fn contains_any<I, S>(parts: I) -> Selector
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    variadic(parts, |part| contains(part))
}

/// Names in which the regex finds a match
///
/// The pattern is compiled at evaluation time.
pub fn matches(pattern: impl Into<String>) -> Selector {
    Selector::Name(NamePattern::Matches(pattern.into()))
}

/// Names matching any of the regexes
pub fn matches_any<I, S>(patterns: I) -> Selector
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    variadic(patterns, |pattern| matches(pattern))
}

/// Columns whose content satisfies `f(type, values)`
pub fn where_<F>(f: F) -> Selector
where
    F: Fn(ColumnType, &DataColumn) -> bool + Send + Sync + 'static,
{
    Selector::Where(ContentPredicate::Custom(ContentFn::new(f)))
}

/// Columns of the given declared type
pub fn where_type(ty: ColumnType) -> Selector {
    Selector::Where(ContentPredicate::Type(ty))
}

/// Columns of any numeric type
pub fn where_numeric() -> Selector {
    Selector::Where(ContentPredicate::Numeric)
}

/// The last column
pub fn last() -> Selector {
    Selector::Last(0)
}

/// The column `offset` positions before the last one
pub fn nth_last(offset: usize) -> Selector {
    Selector::Last(offset)
}

/// Columns at positions `start..=stop`
pub fn int_range(start: usize, stop: usize) -> Selector {
    Selector::IntRange(IntRange::new(start, stop))
}

/// Union of several position ranges
pub fn int_ranges<I>(ranges: I) -> Selector
where
    I: IntoIterator<Item = IntRange>,
{
    variadic(ranges, Selector::IntRange)
}

/// Columns from `start` to `stop` by name, inclusive
pub fn str_range(start: impl Into<String>, stop: impl Into<String>) -> Selector {
    Selector::StrRange(StrRange::new(start, stop))
}

/// Union of several name ranges
pub fn str_ranges<I>(ranges: I) -> Selector
where
    I: IntoIterator<Item = StrRange>,
{
    variadic(ranges, Selector::StrRange)
}

/// Columns named `prefix` + number, the number zero-padded to `width`
pub fn num_range(prefix: impl Into<String>, range: impl Into<IntRange>, width: usize) -> Selector {
    Selector::NumRange {
        prefix: prefix.into(),
        range: range.into(),
        width,
    }
}

/// The selection in reverse order
pub fn reverse(selector: Selector) -> Selector {
    selector.reversed()
}

/// A rename from `(old, new)` pairs
pub fn rename<I, K, V>(pairs: I) -> Rename
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    Rename::new(pairs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variadic_is_or_fold() {
        assert_eq!(
            starts_with_any(["a", "b", "c"]),
            starts_with("a") | starts_with("b") | starts_with("c")
        );
        assert_eq!(ends_with_any(["x"]), ends_with("x"));
        assert_eq!(contains_any(Vec::<String>::new()), nothing());
    }

    #[test]
    fn test_range_variadics() {
        assert_eq!(
            int_ranges([IntRange::new(0, 1), IntRange::new(3, 4)]),
            int_range(0, 1) | int_range(3, 4)
        );
        assert_eq!(
            str_ranges([StrRange::new("a", "b")]),
            str_range("a", "b")
        );
    }

    #[test]
    fn test_membership_strictness() {
        assert!(matches!(all_of(["a"]), Selector::OneOf { strict: true, .. }));
        assert!(matches!(one_of(["a"]), Selector::OneOf { strict: false, .. }));
        assert_eq!(any_of(["a", "b"]), one_of(["a", "b"]));
    }

    #[test]
    fn test_num_range_accepts_range_literal() {
        assert_eq!(
            num_range("x", 1..=3, 2),
            Selector::NumRange {
                prefix: "x".to_string(),
                range: IntRange::new(1, 3),
                width: 2,
            }
        );
    }
}
