//! Core data structures for the extracted textbook
//!
//! This module defines the records produced by parsing a textbook:
//! chapters of the table of contents, tasks with their answers, and the
//! static author record that accompanies every export.

use serde::{Deserialize, Serialize};

/// A heading in the two-level table of contents
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chapter {
    pub id: u32,
    pub name: String,
    /// Id of the enclosing supreme chapter, or 0 for a supreme chapter
    pub parent: u32,
}

impl Chapter {
    pub fn is_supreme(&self) -> bool {
        self.parent == 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Number as printed in the book, e.g. `1.2.3` or `14.а`
    pub id_in_book: String,
    #[serde(rename = "task")]
    pub text: String,
    /// `None` when the answers section has nothing for this task
    pub answer: Option<String>,
    pub classes: String,
    pub chapter_id: u32,
    pub topic_id: u32,
    pub level: u32,
}

/// Values stamped on every task record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskDefaults {
    pub classes: String,
    pub level: u32,
    pub topic_id: u32,
}

impl Default for TaskDefaults {
    fn default() -> Self {
        Self {
            classes: "5;6".to_string(),
            level: 1,
            topic_id: 1,
        }
    }
}

/// Bibliographic record exported as the single row of the author sheet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthorRecord {
    pub author: String,
    pub description: String,
    pub topic_id: u32,
    pub classes: String,
}

impl Default for AuthorRecord {
    fn default() -> Self {
        Self {
            author: "Текстовые задачи по математике. 5–6 классы / А. В. Шевкин. — 3-е изд., \
                     перераб. — М. : Илекса, 2024. — 160 с. : ил."
                .to_string(),
            description: "Сборник включает текстовые задачи по разделам школьной математики: \
                          натуральные числа, дроби, пропорции, проценты, уравнения. Ко многим \
                          задачам даны ответы или советы с чего начать решения. Решения \
                          некоторых задач приведены в качестве образцов в основном тексте книги \
                          или в разделе «Ответы, советы, решения». Материалы сборника можно \
                          использовать как дополнение к любому действующему учебнику. При \
                          подготовке этого издания добавлены новые задачи и решения некоторых \
                          задач. Пособие предназначено для учащихся 5–6 классов \
                          общеобразовательных школ, учителей, студентов педагогических вузов."
                .to_string(),
            topic_id: 1,
            classes: "5;6".to_string(),
        }
    }
}

/// Output of the structure pass, before answers are attached
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    pub tasks: Vec<Task>,
    pub chapters: Vec<Chapter>,
    /// Raw paragraphs of the answers section, in document order
    pub answer_lines: Vec<String>,
}

impl Extraction {
    /// The answers section as one searchable block
    pub fn answers_text(&self) -> String {
        self.answer_lines.join("\n")
    }
}

/// Fully parsed textbook: tasks with reconciled answers and chapters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub tasks: Vec<Task>,
    pub chapters: Vec<Chapter>,
}

impl Book {
    pub fn answered_count(&self) -> usize {
        self.tasks.iter().filter(|task| task.answer.is_some()).count()
    }
}
