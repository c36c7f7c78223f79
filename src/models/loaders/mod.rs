pub mod row_loader;
pub mod toml_loader;

pub use row_loader::{RowSource, SourceColumns};
pub use toml_loader::{load_locator_table, parse_locator_table, resolve_locator_table};
