//! Textbook document loading and parsing
//!
//! This module reads a Word (.docx) textbook into paragraphs and parses
//! them into chapters, tasks and answers.

pub mod loader;
pub mod models;
pub mod parsing;

pub use loader::load_paragraphs;
pub use models::*;
pub use parsing::{parse_book, ParseError};
