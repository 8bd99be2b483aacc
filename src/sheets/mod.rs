//! Sheet definitions and the pure helpers around them.

pub mod auxiliary;
pub mod filter;
pub mod registry;
pub mod shape;
pub mod title;

pub use filter::{filter_sheet_types, InvalidFilter, SelectionHints, SheetFilter};
pub use registry::{
    list_sheet_types, lookup, AuxiliarySource, Difficulty, SheetDefinition, SheetFamily, TitleRule,
    SHEETS,
};
pub use shape::DataShape;
pub use title::{extract_title, search_link};
