//! Table-source extraction: locate the rendered odds table on a page,
//! name its columns, and keep only matchup rows.

pub mod columns;
pub mod extract;
pub mod filter;
pub mod locator;

pub use columns::ColumnResolver;
pub use extract::SourceExtractor;
pub use filter::RowFilter;
pub use locator::{CssTableLocator, TableLocator, TableSelector, WaitBudget};
