pub mod loaders;
pub mod locator;
pub mod locator_table;
pub mod row;

pub use loaders::{load_locator_table, resolve_locator_table, RowSource, SourceColumns};
pub use locator::{Locator, LocatorSet, Variant};
pub use locator_table::LocatorTable;
pub use row::Row;
