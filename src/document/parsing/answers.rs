//! Answer reconciliation
//!
//! The answers section lists one answer per task number (`12. 42 см`), with
//! lettered parts inside a single answer for multi-part tasks
//! (`14. а) 5; б) 7`). Reconciliation walks the extracted tasks in order
//! and attaches to each one the matching answer text, if any.

use regex::Regex;
use tracing::debug;

use super::super::models::Task;
use super::patterns::BookId;
use super::ParseError;

/// Assign an answer (or `None`) to every task.
///
/// Previously assigned answers are discarded first, so running this twice on
/// the same input yields the same result.
pub fn reconcile_answers(answers_text: &str, tasks: &mut [Task]) -> Result<(), ParseError> {
    let ids = tasks
        .iter()
        .map(|task| BookId::parse(&task.id_in_book))
        .collect::<Result<Vec<_>, _>>()?;

    for task in tasks.iter_mut() {
        task.answer = None;
    }

    let lookup = AnswerLookup::new(answers_text);
    // Highest whole task number already looked up
    let mut high_water = 0;
    let mut index = 0;

    while index < ids.len() {
        let current = &ids[index];

        if let Some(part) = &current.part {
            if current.whole >= high_water {
                high_water = current.whole;
                tasks[index].answer = lookup.part(current.whole, part);
            }
            index += 1;
            continue;
        }

        high_water = current.whole;
        let Some(next) = ids.get(index + 1) else {
            tasks[index].answer = lookup.whole(current.whole);
            break;
        };

        match &next.part {
            None => {
                tasks[index].answer = lookup.whole(current.whole);
                high_water = next.whole;
                tasks[index + 1].answer = lookup.whole(next.whole);
                index += 2;
            }
            Some(part) if next.whole > current.whole => {
                tasks[index].answer = lookup.whole(current.whole);
                high_water = next.whole;
                tasks[index + 1].answer = lookup.part(next.whole, part);
                index += 2;
            }
            // The next task holds the parts of this one; the bare statement
            // gets no answer of its own
            Some(part) if next.whole == current.whole => {
                tasks[index + 1].answer = lookup.part(next.whole, part);
                index += 2;
            }
            Some(_) => {
                tasks[index].answer = lookup.whole(current.whole);
                index += 1;
            }
        }
    }

    debug!(
        answered = tasks.iter().filter(|task| task.answer.is_some()).count(),
        total = tasks.len(),
        "answers reconciled"
    );
    Ok(())
}

struct AnswerLookup<'a> {
    text: &'a str,
}

impl<'a> AnswerLookup<'a> {
    fn new(text: &'a str) -> Self {
        Self { text }
    }

    /// Answer text for a whole task number
    fn whole(&self, whole: u32) -> Option<String> {
        let pattern = Regex::new(&format!(r"(?s)(?:\A|\n){whole}\.\s+(.*?)(?:\n\d+\.\s|\z)"))
            .expect("answer pattern only interpolates a decimal number");
        let answer = pattern.captures(self.text)?.get(1)?.as_str().trim();
        non_empty(answer)
    }

    /// Answer text for one lettered part of a task
    fn part(&self, whole: u32, part: &str) -> Option<String> {
        let answer = self.whole(whole)?;
        extract_part(&answer, part)
    }
}

/// Pull the `part)` fragment out of a whole answer such as `а) 5; б) 7`
fn extract_part(answer: &str, part: &str) -> Option<String> {
    let part = regex::escape(part);
    let pattern = Regex::new(&format!(
        r"(?s)(?:\A|[\s;,.]){part}\)\s*(.*?)(?:\s*[;,.]?\s+[а-яёa-z]\)|;|\z)"
    ))
    .expect("part pattern only interpolates an escaped literal");
    let fragment = pattern.captures(answer)?.get(1)?.as_str().trim();
    non_empty(fragment)
}

fn non_empty(text: &str) -> Option<String> {
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}
