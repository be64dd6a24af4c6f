//! Textbook structure parsing
//!
//! This module turns the flat paragraph list of a textbook into chapters,
//! tasks and answers. The structure pass runs first; answers are attached
//! afterwards from the collected answers section.

pub mod answers;
pub mod patterns;
pub mod structure;

use thiserror::Error;
use tracing::info;

use super::models::{Book, TaskDefaults};

pub use answers::reconcile_answers;
pub use patterns::{BookId, TaskMatch};
pub use structure::{parse_structure, ANSWERS_HEADING, CONTENTS_HEADING};

/// Fatal problems that abort a parse; no partial output is produced
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unrecognized structure at paragraph {index}: {text:?}")]
    UnrecognizedStructure { index: usize, text: String },

    #[error("task at paragraph {index} appears before any chapter: {text:?}")]
    TaskOutsideChapter { index: usize, text: String },

    #[error("task part at paragraph {index} has no numbered task to attach to: {text:?}")]
    OrphanContinuation { index: usize, text: String },

    #[error("task id {id:?} does not end in a task number")]
    MalformedBookId { id: String },

    #[error("number {number} is too large for a chapter or task number")]
    NumberOutOfRange { number: String },
}

/// Parse paragraphs into a book with answers attached
pub fn parse_book(paragraphs: &[String], defaults: &TaskDefaults) -> Result<Book, ParseError> {
    let extraction = parse_structure(paragraphs, defaults)?;
    let answers_text = extraction.answers_text();
    let mut tasks = extraction.tasks;

    if !extraction.answer_lines.is_empty() {
        reconcile_answers(&answers_text, &mut tasks)?;
    }

    let book = Book {
        tasks,
        chapters: extraction.chapters,
    };
    info!(
        chapters = book.chapters.len(),
        tasks = book.tasks.len(),
        answered = book.answered_count(),
        "parsed textbook"
    );
    Ok(book)
}
