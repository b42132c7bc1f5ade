//! Domain module - marketplace module records and run outcomes
//!
//! Plain data types shared by the parsing infrastructure and the
//! application layer. Nothing in here touches the DOM.

pub mod extraction_result;
pub mod module_record;

pub use extraction_result::ExtractionResult;
pub use module_record::{AttributeSet, ModuleRecord, ModuleSchema, StatLine};
