//! Document loading
//!
//! Reads a .docx textbook into the ordered list of paragraph strings the
//! structure parser works on. Each paragraph is flattened to a single line:
//! the numbering patterns only look at the start of a paragraph, and a
//! soft line break inside a long task statement must not hide it.

use anyhow::{bail, ensure, Context, Result};
use docx_rs::{DocumentChild, InsertChild, Paragraph, ParagraphChild, Run, RunChild};
use std::io::Cursor;
use std::path::Path;
use tracing::{debug, warn};
use zip::ZipArchive;

const DOCUMENT_PART: &str = "word/document.xml";
const WORKBOOK_PART: &str = "xl/workbook.xml";

/// Load the non-empty paragraphs of a .docx body in document order
pub async fn load_paragraphs(file_path: &Path) -> Result<Vec<String>> {
    let is_docx = file_path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("docx"));
    ensure!(
        is_docx,
        "{} is not a .docx file; save the textbook from Word as .docx first",
        file_path.display()
    );

    let file_data = tokio::fs::read(file_path)
        .await
        .with_context(|| format!("Failed to read textbook {}", file_path.display()))?;
    check_textbook_archive(file_path, &file_data)?;

    let docx = docx_rs::read_docx(&file_data)
        .with_context(|| format!("Failed to parse textbook {}", file_path.display()))?;

    let paragraphs = body_paragraphs(&docx.document.children);
    debug!(
        path = %file_path.display(),
        paragraphs = paragraphs.len(),
        "loaded document"
    );
    Ok(paragraphs)
}

/// The bytes must be a Word package; a spreadsheet (often an earlier
/// export of this tool) is called out by name
fn check_textbook_archive(file_path: &Path, file_data: &[u8]) -> Result<()> {
    let archive = ZipArchive::new(Cursor::new(file_data))
        .with_context(|| format!("{} is not a Word document archive", file_path.display()))?;

    if archive.file_names().any(|name| name == DOCUMENT_PART) {
        return Ok(());
    }
    if archive.file_names().any(|name| name == WORKBOOK_PART) {
        bail!(
            "{} is a spreadsheet, not a textbook; pass the Word file the tasks were written in",
            file_path.display()
        );
    }
    bail!(
        "{} has no {DOCUMENT_PART}, so there is no textbook text to read",
        file_path.display()
    )
}

fn body_paragraphs(children: &[DocumentChild]) -> Vec<String> {
    let mut paragraphs = Vec::new();
    let mut skipped_tables = 0;

    for child in children {
        match child {
            DocumentChild::Paragraph(para) => {
                let line = paragraph_line(para);
                if !line.is_empty() {
                    paragraphs.push(line);
                }
            }
            DocumentChild::Table(_) => skipped_tables += 1,
            _ => {}
        }
    }

    if skipped_tables > 0 {
        warn!(tables = skipped_tables, "tables are not part of the task text and were skipped");
    }
    paragraphs
}

/// Visible text of a paragraph on one line.
///
/// Tracked insertions count and deletions do not. Soft breaks and tabs
/// become spaces, and whitespace runs collapse to one space.
fn paragraph_line(para: &Paragraph) -> String {
    let mut raw = String::new();
    for child in &para.children {
        match child {
            ParagraphChild::Run(run) => push_run(&mut raw, run),
            ParagraphChild::Insert(insert) => {
                for child in &insert.children {
                    if let InsertChild::Run(run) = child {
                        push_run(&mut raw, run);
                    }
                }
            }
            _ => {}
        }
    }
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn push_run(raw: &mut String, run: &Run) {
    for child in &run.children {
        match child {
            RunChild::Text(text) => raw.push_str(&text.text),
            RunChild::Tab(_) | RunChild::Break(_) => raw.push(' '),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docx_rs::{BreakType, Insert};

    #[test]
    fn test_runs_are_joined_on_one_line() {
        let para = Paragraph::new()
            .add_run(Run::new().add_text("  1.1.1. Из двух "))
            .add_run(Run::new().add_text("сёл вышли "))
            .add_run(Run::new().add_text("пешеходы.  "));

        assert_eq!(paragraph_line(&para), "1.1.1. Из двух сёл вышли пешеходы.");
    }

    #[test]
    fn test_soft_break_becomes_a_space() {
        let para = Paragraph::new().add_run(
            Run::new()
                .add_text("1.1.1. Первая строка")
                .add_break(BreakType::TextWrapping)
                .add_text("вторая строка"),
        );

        assert_eq!(paragraph_line(&para), "1.1.1. Первая строка вторая строка");
    }

    #[test]
    fn test_tabs_collapse_with_spaces() {
        let para = Paragraph::new().add_run(Run::new().add_text("а)").add_tab().add_text("  5 км"));
        assert_eq!(paragraph_line(&para), "а) 5 км");
    }

    #[test]
    fn test_tracked_insertion_is_kept() {
        let para = Paragraph::new()
            .add_run(Run::new().add_text("1.1.2. Найдите "))
            .add_insert(Insert::new(Run::new().add_text("сумму")));

        assert_eq!(paragraph_line(&para), "1.1.2. Найдите сумму");
    }

    #[test]
    fn test_empty_paragraph_yields_empty_line() {
        let para = Paragraph::new().add_run(Run::new().add_tab().add_text("   "));
        assert_eq!(paragraph_line(&para), "");
    }

    #[test]
    fn test_bytes_that_are_not_an_archive_are_rejected() {
        let err = check_textbook_archive(Path::new("book.docx"), b"plain text").unwrap_err();
        assert!(err.to_string().contains("not a Word document archive"));
    }
}
