pub mod comparison_app;
pub mod document_app;

pub use comparison_app::ComparisonApp;
pub use document_app::DocumentApp;
