//! Input processing module
//! Handles format detection and document text extraction

pub mod file_detector;
pub mod loader;
pub mod text_extractor;
