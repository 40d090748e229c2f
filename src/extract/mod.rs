mod batch;
mod sheet;

pub use batch::{ExtractFailure, ExtractOptions, ExtractReport, extract_all, extract_one};
pub use sheet::{load_sheet, resolve_sheet_path};
