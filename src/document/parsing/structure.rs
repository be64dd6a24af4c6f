//! Sequential structure pass
//!
//! Walks the paragraph list with a cursor, classifying each paragraph as a
//! chapter heading, a task, or the start of the answers section, and
//! collects the chapter tree, the task list and the raw answer paragraphs.

use tracing::{debug, trace};

use super::super::models::*;
use super::patterns::{
    exclusive_task, match_sub_chapter, match_supreme_chapter, match_task, SubChapterMatch,
    SupremeChapterMatch, TaskMatch,
};
use super::ParseError;

/// Heading that opens the answers section
pub const ANSWERS_HEADING: &str = "Ответы и советы";

/// Heading that closes the answers section (compared case-insensitively)
pub const CONTENTS_HEADING: &str = "оглавление";

/// Run the structure pass over trimmed paragraphs
pub fn parse_structure(
    paragraphs: &[String],
    defaults: &TaskDefaults,
) -> Result<Extraction, ParseError> {
    StructureParser::new(paragraphs, defaults).run()
}

struct StructureParser<'a> {
    paragraphs: &'a [String],
    defaults: &'a TaskDefaults,
    cursor: usize,
    /// Number of the last supreme chapter as printed in the book
    current_chapter: u32,
    /// Record id of the last supreme chapter
    supreme_chapter_id: u32,
    next_chapter_id: u32,
    /// Id of the most recent fully numbered task
    anchor_id: Option<String>,
    extraction: Extraction,
}

impl<'a> StructureParser<'a> {
    fn new(paragraphs: &'a [String], defaults: &'a TaskDefaults) -> Self {
        Self {
            paragraphs,
            defaults,
            cursor: 0,
            current_chapter: 0,
            supreme_chapter_id: 0,
            next_chapter_id: 1,
            anchor_id: None,
            extraction: Extraction::default(),
        }
    }

    fn run(mut self) -> Result<Extraction, ParseError> {
        let paragraphs = self.paragraphs;
        while let Some(text) = paragraphs.get(self.cursor) {
            let text = text.as_str();
            if text.is_empty() {
                trace!(index = self.cursor, "skipping blank paragraph");
                self.cursor += 1;
                continue;
            }

            if let Some(chapter) = match_supreme_chapter(text) {
                self.on_supreme_chapter(text, chapter)?;
                continue;
            }

            if let Some(task) = match_task(text) {
                let chapter_id = self.current_chapter_id()?;
                self.consume_task_run(task, chapter_id)?;
                continue;
            }

            if text == ANSWERS_HEADING {
                self.cursor += 1;
                self.collect_answers();
                break;
            }

            return Err(ParseError::UnrecognizedStructure {
                index: self.cursor,
                text: text.to_string(),
            });
        }

        debug!(
            chapters = self.extraction.chapters.len(),
            tasks = self.extraction.tasks.len(),
            answer_lines = self.extraction.answer_lines.len(),
            "structure pass finished"
        );
        Ok(self.extraction)
    }

    /// Handle a line starting with `N.`: the next chapter heading, a
    /// sub-chapter heading, a task, or an exclusive task numbered like a
    /// chapter
    fn on_supreme_chapter(
        &mut self,
        text: &str,
        chapter: SupremeChapterMatch,
    ) -> Result<(), ParseError> {
        let number = chapter.number()?;
        let task = match_task(text);

        if number == self.current_chapter + 1 && task.is_none() {
            let sub_chapter = self
                .paragraphs
                .get(self.cursor + 1)
                .and_then(|next| match_sub_chapter(next));

            self.push_supreme_chapter(&chapter);
            match sub_chapter {
                Some(sub_chapter) => {
                    self.push_sub_chapter(&sub_chapter);
                    self.cursor += 2;
                }
                None => self.cursor += 1,
            }
            self.current_chapter = number;
            return Ok(());
        }

        if let Some(sub_chapter) = match_sub_chapter(text) {
            self.push_sub_chapter(&sub_chapter);
            self.cursor += 1;
            return Ok(());
        }

        let chapter_id = self.current_chapter_id()?;
        match task {
            Some(task) => self.consume_task_run(task, chapter_id),
            None => {
                self.push_task(exclusive_task(&chapter), chapter_id)?;
                self.cursor += 1;
                Ok(())
            }
        }
    }

    /// Emit the task at the cursor and every directly following task line.
    ///
    /// Continuation lines are taken here. A line that also starts with `N.`
    /// ends the run and goes back to the main loop, which checks it against
    /// the chapter counter first.
    fn consume_task_run(&mut self, first: TaskMatch, chapter_id: u32) -> Result<(), ParseError> {
        self.push_task(first, chapter_id)?;
        self.cursor += 1;

        let paragraphs = self.paragraphs;
        while let Some(text) = paragraphs.get(self.cursor) {
            if match_supreme_chapter(text).is_some() {
                trace!(index = self.cursor, "numbered line ends task run");
                break;
            }
            let Some(task) = match_task(text) else {
                break;
            };
            self.push_task(task, chapter_id)?;
            self.cursor += 1;
        }
        Ok(())
    }

    fn push_task(&mut self, task: TaskMatch, chapter_id: u32) -> Result<(), ParseError> {
        let id_in_book = task.book_id(self.anchor_id.as_deref()).ok_or_else(|| {
            ParseError::OrphanContinuation {
                index: self.cursor,
                text: self.paragraphs[self.cursor].clone(),
            }
        })?;
        if task.is_numbered() {
            self.anchor_id = Some(id_in_book.clone());
        }

        debug!(id = %id_in_book, chapter_id, "task");
        self.extraction.tasks.push(Task {
            id_in_book,
            text: task.text().to_string(),
            answer: None,
            classes: self.defaults.classes.clone(),
            chapter_id,
            topic_id: self.defaults.topic_id,
            level: self.defaults.level,
        });
        Ok(())
    }

    fn push_supreme_chapter(&mut self, chapter: &SupremeChapterMatch) {
        let id = self.push_chapter(chapter.name(), 0);
        self.supreme_chapter_id = id;
    }

    fn push_sub_chapter(&mut self, chapter: &SubChapterMatch) {
        self.push_chapter(chapter.name(), self.supreme_chapter_id);
    }

    fn push_chapter(&mut self, name: String, parent: u32) -> u32 {
        let id = self.next_chapter_id;
        self.next_chapter_id += 1;
        debug!(id, parent, name = %name, "chapter");
        self.extraction.chapters.push(Chapter { id, name, parent });
        id
    }

    /// Id of the most recently emitted chapter, which owns new tasks
    fn current_chapter_id(&self) -> Result<u32, ParseError> {
        self.extraction
            .chapters
            .last()
            .map(|chapter| chapter.id)
            .ok_or_else(|| ParseError::TaskOutsideChapter {
                index: self.cursor,
                text: self.paragraphs[self.cursor].clone(),
            })
    }

    fn collect_answers(&mut self) {
        let paragraphs = self.paragraphs;
        while let Some(text) = paragraphs.get(self.cursor) {
            if text.trim().to_lowercase() == CONTENTS_HEADING {
                break;
            }
            self.extraction.answer_lines.push(text.clone());
            self.cursor += 1;
        }
    }
}
