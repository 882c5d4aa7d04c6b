//! passbook-finance: transaction normalization, the statement pipeline, and CSV export

pub mod category_map;
pub mod export;
pub mod normalizer;
pub mod pipeline;

pub use category_map::CategoryMap;
pub use export::{ExportError, ExportSummary, export_cashew_csv, export_cashew_string};
pub use normalizer::{infer_direction, normalize};
pub use pipeline::{Pipeline, RunReport};
