//! taskbook: extract tasks, chapters and answers from a math textbook
//!
//! This library reads a Word (.docx) problem book, reconstructs its chapter
//! tree and numbered tasks from the paragraph stream, attaches answers from
//! the book's answers section and exports everything as three tables.

pub mod config;
pub mod document;
pub mod export;

/// Export format options
#[derive(clap::ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExportFormat {
    /// Excel workbook with one sheet per table
    #[default]
    Xlsx,
    /// JSON document with one array per table
    Json,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Xlsx => "xlsx",
            ExportFormat::Json => "json",
        }
    }
}

// Re-export commonly used types
pub use config::Config;
pub use document::{load_paragraphs, parse_book, AuthorRecord, Book, Chapter, ParseError, Task};
