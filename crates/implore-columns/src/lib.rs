//! implore-columns - Declarative column selection
//!
//! This crate resolves selector expressions against the ordered column
//! names of a table, producing an ordered, duplicate-free list of names:
//!
//! - **Name patterns**: `starts_with("x")`, `ends_with("_err")`, `matches("^v[0-9]+$")`
//! - **Positions**: `last()`, `int_range(0, 3)`, `str_range("a", "f")`
//! - **Numbered families**: `num_range("x", 1..=12, 2)` for `x01`..`x12`
//! - **Content**: `where_numeric()`, `where_type(ColumnType::Bool)`
//! - **Set algebra**: `A | B`, `A & B`, `A ^ B`, `A - B`, `-A`, `reverse(A)`
//! - **Renames**: `rename([("old", "new")])`
//!
//! Results follow the left-to-right order in which the set operations
//! produced them; complement always returns to schema order.
//!
//! # Examples
//!
//! ```
//! use implore_columns::*;
//!
//! let schema = vec!["id", "x01", "x02", "y", "note"];
//!
//! let picked = select(&schema, &(column("id") | num_range("x", 1..=3, 2))).unwrap();
//! assert_eq!(picked, vec!["id", "x01", "x02"]);
//!
//! let rest = select(&schema, &parse_selector("-starts_with(x) - last()").unwrap()).unwrap();
//! assert_eq!(rest, vec!["id", "y"]);
//! ```

pub mod ast;
pub mod builders;
pub mod config;
pub mod content;
pub mod error;
pub mod eval;
pub mod parser;
pub mod result_set;
pub mod schema;

pub use ast::*;
pub use builders::*;
pub use config::*;
pub use content::*;
pub use error::*;
pub use eval::*;
pub use parser::*;
pub use result_set::*;
pub use schema::*;
