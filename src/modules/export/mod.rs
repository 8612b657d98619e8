mod sheet;

pub use sheet::{write_sheet, SheetRow};
