//! Line classification patterns for the textbook numbering convention
//!
//! Headings and tasks are told apart purely by their leading numbers:
//!
//! - `1. Натуральные числа` is a supreme chapter
//! - `1.1. Сложение и вычитание` is a sub-chapter
//! - `1.1.1. Условие задачи.` is a fully numbered task
//! - `а) вторая часть условия` continues the previous numbered task
//!
//! The shapes overlap on purpose: anything starting with `N.` matches the
//! supreme chapter pattern, so sub-chapter and task lines do too. The
//! structure pass resolves the overlap by the chapter counter.
//!
//! Every number in the convention ends with a terminating mark (`.` or `)`)
//! that is not part of the id.

use once_cell::sync::Lazy;
use regex::Regex;
use unicode_segmentation::UnicodeSegmentation;

use super::ParseError;

static SUPREME_CHAPTER_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)^(?P<number>\d+\.)(?P<title>.+)$").unwrap());

static SUB_CHAPTER_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)^(?P<parent>\d+\.)(?P<number>\d+\.)(?P<title>\s+\S.*)$").unwrap()
});

static TASK_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"(?s)^(?:",
        r"(?P<prefix>\d+\.\d+\.)(?P<number>\d+\.)\s*(?P<text>\S.*)",
        r"|",
        r"(?P<part>[а-яёa-z]\))\s*(?P<part_text>\S.*)",
        r")$"
    ))
    .unwrap()
});

// Whole task number, optionally followed by a lettered sub-part
static BOOK_ID_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?P<whole>\d+)\.?(?P<part>[а-яёa-z])?$").unwrap());

/// A line starting with `N.`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupremeChapterMatch {
    /// Chapter number with its trailing mark, e.g. `3.`
    pub label: String,
    /// Everything after the label, leading whitespace included
    pub title: String,
}

impl SupremeChapterMatch {
    /// Heading as printed, used as the chapter name
    pub fn name(&self) -> String {
        format!("{}{}", self.label, self.title)
    }

    /// Leading number of the line
    pub fn number(&self) -> Result<u32, ParseError> {
        parse_number(strip_terminator(&self.label))
    }
}

/// A `N.M. Title` heading
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubChapterMatch {
    pub parent_label: String,
    pub label: String,
    pub title: String,
}

impl SubChapterMatch {
    pub fn name(&self) -> String {
        format!("{}{}{}", self.parent_label, self.label, self.title)
    }
}

/// How a task line states its number
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskMatch {
    /// `1.2.3. text`: the number is complete on the line
    Explicit {
        prefix: String,
        number: String,
        text: String,
    },
    /// `б) text`: the leading number comes from the previous numbered task
    Continuation { part: String, text: String },
    /// A `N. text` line that is not a chapter heading
    Exclusive { number: String, text: String },
}

impl TaskMatch {
    pub fn text(&self) -> &str {
        match self {
            TaskMatch::Explicit { text, .. }
            | TaskMatch::Continuation { text, .. }
            | TaskMatch::Exclusive { text, .. } => text,
        }
    }

    /// Build the book id of this task.
    ///
    /// `anchor` is the id of the most recent fully numbered task and is only
    /// consulted for continuations; `None` is returned when a continuation
    /// has nothing to attach to.
    pub fn book_id(&self, anchor: Option<&str>) -> Option<String> {
        let raw = match self {
            TaskMatch::Explicit { prefix, number, .. } => format!("{prefix}{number}"),
            TaskMatch::Exclusive { number, .. } => number.clone(),
            TaskMatch::Continuation { part, .. } => {
                let mut raw = anchor?.to_string();
                if !raw.ends_with('.') {
                    raw.push('.');
                }
                raw.push_str(part);
                raw
            }
        };
        Some(strip_terminator(&raw).to_string())
    }

    /// Whether this task can serve as the anchor for later continuations
    pub fn is_numbered(&self) -> bool {
        !matches!(self, TaskMatch::Continuation { .. })
    }
}

/// Parsed form of a task's book id as used by the answers section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookId {
    pub whole: u32,
    pub part: Option<String>,
}

impl BookId {
    pub fn parse(id: &str) -> Result<Self, ParseError> {
        let malformed = || ParseError::MalformedBookId { id: id.to_string() };
        let caps = BOOK_ID_PATTERN.captures(id).ok_or_else(malformed)?;
        let whole = caps.name("whole").ok_or_else(malformed)?.as_str();
        Ok(Self {
            whole: parse_number(whole)?,
            part: caps.name("part").map(|m| m.as_str().to_string()),
        })
    }
}

/// Digits captured by a pattern; the only way this fails is overflow
fn parse_number(digits: &str) -> Result<u32, ParseError> {
    digits.parse().map_err(|_| ParseError::NumberOutOfRange {
        number: digits.to_string(),
    })
}

pub fn match_supreme_chapter(text: &str) -> Option<SupremeChapterMatch> {
    let caps = SUPREME_CHAPTER_PATTERN.captures(text)?;
    Some(SupremeChapterMatch {
        label: caps.name("number")?.as_str().to_string(),
        title: caps.name("title")?.as_str().to_string(),
    })
}

pub fn match_sub_chapter(text: &str) -> Option<SubChapterMatch> {
    let caps = SUB_CHAPTER_PATTERN.captures(text)?;
    Some(SubChapterMatch {
        parent_label: caps.name("parent")?.as_str().to_string(),
        label: caps.name("number")?.as_str().to_string(),
        title: caps.name("title")?.as_str().to_string(),
    })
}

pub fn match_task(text: &str) -> Option<TaskMatch> {
    let caps = TASK_PATTERN.captures(text)?;
    if let Some(prefix) = caps.name("prefix") {
        return Some(TaskMatch::Explicit {
            prefix: prefix.as_str().to_string(),
            number: caps.name("number")?.as_str().to_string(),
            text: caps.name("text")?.as_str().to_string(),
        });
    }
    Some(TaskMatch::Continuation {
        part: caps.name("part")?.as_str().to_string(),
        text: caps.name("part_text")?.as_str().to_string(),
    })
}

/// Reinterpret a supreme-chapter line as a standalone task
pub fn exclusive_task(chapter: &SupremeChapterMatch) -> TaskMatch {
    TaskMatch::Exclusive {
        number: chapter.label.clone(),
        text: chapter.title.trim_start().to_string(),
    }
}

/// Drop the numbering terminator (the last grapheme) from an assembled id
pub fn strip_terminator(raw: &str) -> &str {
    match raw.grapheme_indices(true).next_back() {
        Some((start, _)) => &raw[..start],
        None => raw,
    }
}
