//! Export of a parsed book as three tables
//!
//! Tables are rendered completely in memory and written to disk in a single
//! call, so a failed run never leaves a partial file behind.

use anyhow::{Context, Result};
use rust_xlsxwriter::Workbook;
use serde::Serialize;
use std::path::Path;

use crate::document::{AuthorRecord, Book, Chapter, Task};
use crate::ExportFormat;

pub const TASKS_SHEET: &str = "tasks";
pub const AUTHOR_SHEET: &str = "author";
pub const CHAPTERS_SHEET: &str = "table_of_contents";

pub const TASK_COLUMNS: [&str; 7] = [
    "id_in_book",
    "task",
    "answer",
    "classes",
    "chapter_id",
    "topic_id",
    "level",
];
pub const AUTHOR_COLUMNS: [&str; 4] = ["author", "description", "topic_id", "classes"];
pub const CHAPTER_COLUMNS: [&str; 3] = ["id", "name", "parent"];

#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(u32),
    Empty,
}

impl From<&str> for Cell {
    fn from(text: &str) -> Self {
        Cell::Text(text.to_string())
    }
}

impl From<u32> for Cell {
    fn from(number: u32) -> Self {
        Cell::Number(number)
    }
}

impl From<Option<&str>> for Cell {
    fn from(text: Option<&str>) -> Self {
        text.map_or(Cell::Empty, Cell::from)
    }
}

/// One named sheet with a header row
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub name: &'static str,
    pub columns: &'static [&'static str],
    pub rows: Vec<Vec<Cell>>,
}

/// Build the tasks, author and table of contents sheets, in that order
pub fn book_tables(book: &Book, author: &AuthorRecord) -> [Table; 3] {
    let tasks = Table {
        name: TASKS_SHEET,
        columns: &TASK_COLUMNS,
        rows: book.tasks.iter().map(task_row).collect(),
    };
    let authors = Table {
        name: AUTHOR_SHEET,
        columns: &AUTHOR_COLUMNS,
        rows: vec![vec![
            author.author.as_str().into(),
            author.description.as_str().into(),
            author.topic_id.into(),
            author.classes.as_str().into(),
        ]],
    };
    let chapters = Table {
        name: CHAPTERS_SHEET,
        columns: &CHAPTER_COLUMNS,
        rows: book.chapters.iter().map(chapter_row).collect(),
    };
    [tasks, authors, chapters]
}

fn task_row(task: &Task) -> Vec<Cell> {
    vec![
        task.id_in_book.as_str().into(),
        task.text.as_str().into(),
        task.answer.as_deref().into(),
        task.classes.as_str().into(),
        task.chapter_id.into(),
        task.topic_id.into(),
        task.level.into(),
    ]
}

fn chapter_row(chapter: &Chapter) -> Vec<Cell> {
    vec![
        chapter.id.into(),
        chapter.name.as_str().into(),
        chapter.parent.into(),
    ]
}

/// Render the book in the requested format and write it to `path`
pub fn write_book(
    book: &Book,
    author: &AuthorRecord,
    format: &ExportFormat,
    path: &Path,
) -> Result<()> {
    let bytes = match format {
        ExportFormat::Xlsx => export_to_xlsx(&book_tables(book, author))?,
        ExportFormat::Json => export_to_json(book, author)?.into_bytes(),
    };
    std::fs::write(path, bytes).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

#[derive(Serialize)]
struct JsonBook<'a> {
    tasks: &'a [Task],
    author: [&'a AuthorRecord; 1],
    table_of_contents: &'a [Chapter],
}

pub fn export_to_json(book: &Book, author: &AuthorRecord) -> Result<String> {
    let document = JsonBook {
        tasks: &book.tasks,
        author: [author],
        table_of_contents: &book.chapters,
    };
    Ok(serde_json::to_string_pretty(&document)?)
}

/// Render tables as an xlsx workbook, one sheet per table, header row first
pub fn export_to_xlsx(tables: &[Table]) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();

    for table in tables {
        let sheet = workbook.add_worksheet();
        sheet.set_name(table.name)?;

        for (col, &column) in table.columns.iter().enumerate() {
            sheet.write_string(0, u16::try_from(col)?, column)?;
        }
        for (row, cells) in table.rows.iter().enumerate() {
            let row = u32::try_from(row + 1)?;
            for (col, cell) in cells.iter().enumerate() {
                let col = u16::try_from(col)?;
                match cell {
                    Cell::Text(text) => {
                        sheet.write_string(row, col, text)?;
                    }
                    Cell::Number(number) => {
                        sheet.write_number(row, col, *number)?;
                    }
                    Cell::Empty => {}
                }
            }
        }
    }

    workbook
        .save_to_buffer()
        .context("Failed to render the xlsx workbook")
}
