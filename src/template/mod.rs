//! Report document templates
//!
//! Renders the placeholder map from `core` into a Word document.

mod docx;

pub use docx::DocxTemplate;
