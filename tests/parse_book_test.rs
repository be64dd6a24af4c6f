use taskbook::document::parsing::patterns::BookId;
use taskbook::document::parsing::{parse_structure, reconcile_answers};
use taskbook::document::TaskDefaults;
use taskbook::{parse_book, ParseError};

fn paragraphs(lines: &[&str]) -> Vec<String> {
    lines.iter().map(|line| line.to_string()).collect()
}

fn sample_book() -> Vec<String> {
    paragraphs(&[
        "1. Натуральные числа",
        "1.1. Сложение и вычитание",
        "1.1.1. В классе 12 девочек и 15 мальчиков. Сколько всего учеников?",
        "1.1.2. Найдите:",
        "а) сумму чисел 5 и 7;",
        "б) разность чисел 9 и 2.",
        "1.2. Умножение",
        "1.2.3. Тетрадь стоит 12 р. Сколько стоят 4 тетради?",
        "2. Дроби",
        "2.1. Обыкновенные дроби",
        "2.1.4. Какую часть часа составляют 20 мин?",
        "5. Лодка прошла 12 км за 3 ч. Найдите:",
        "а) скорость лодки;",
        "б) время на 20 км.",
        "Ответы и советы",
        "1. 27 учеников.",
        "2. а) 12; б) 7",
        "3. 48 р.",
        "4. 1/3",
        "5. а) 4 км/ч; б) 5 ч",
        "Оглавление",
        "1. Натуральные числа",
    ])
}

#[cfg(test)]
mod structure_tests {
    use super::*;

    #[test]
    fn test_chapter_tree() {
        let book = parse_book(&sample_book(), &TaskDefaults::default()).unwrap();

        let chapters: Vec<(u32, &str, u32)> = book
            .chapters
            .iter()
            .map(|c| (c.id, c.name.as_str(), c.parent))
            .collect();
        assert_eq!(
            chapters,
            vec![
                (1, "1. Натуральные числа", 0),
                (2, "1.1. Сложение и вычитание", 1),
                (3, "1.2. Умножение", 1),
                (4, "2. Дроби", 0),
                (5, "2.1. Обыкновенные дроби", 4),
            ]
        );
    }

    #[test]
    fn test_task_ids_and_chapters() {
        let book = parse_book(&sample_book(), &TaskDefaults::default()).unwrap();

        let tasks: Vec<(&str, u32)> = book
            .tasks
            .iter()
            .map(|t| (t.id_in_book.as_str(), t.chapter_id))
            .collect();
        assert_eq!(
            tasks,
            vec![
                ("1.1.1", 2),
                ("1.1.2", 2),
                ("1.1.2.а", 2),
                ("1.1.2.б", 2),
                ("1.2.3", 3),
                ("2.1.4", 5),
                ("5", 5),
                ("5.а", 5),
                ("5.б", 5),
            ]
        );
    }

    #[test]
    fn test_every_task_points_at_an_earlier_chapter() {
        let book = parse_book(&sample_book(), &TaskDefaults::default()).unwrap();
        let max_chapter = book.chapters.iter().map(|c| c.id).max().unwrap();

        for task in &book.tasks {
            assert!(task.chapter_id >= 1 && task.chapter_id <= max_chapter);
        }
        for chapter in &book.chapters {
            assert!(chapter.parent == 0 || chapter.parent < chapter.id);
        }
    }

    #[test]
    fn test_ids_never_keep_terminators() {
        let book = parse_book(&sample_book(), &TaskDefaults::default()).unwrap();
        for task in &book.tasks {
            assert!(!task.id_in_book.ends_with('.'), "{}", task.id_in_book);
            assert!(!task.id_in_book.ends_with(')'), "{}", task.id_in_book);
        }
    }

    #[test]
    fn test_parts_share_leading_number_of_numbered_sibling() {
        let book = parse_book(&sample_book(), &TaskDefaults::default()).unwrap();
        let parts: Vec<&str> = book
            .tasks
            .iter()
            .map(|t| t.id_in_book.as_str())
            .filter(|id| id.starts_with("1.1.2"))
            .collect();
        assert_eq!(parts, vec!["1.1.2", "1.1.2.а", "1.1.2.б"]);
    }

    #[test]
    fn test_custom_task_defaults() {
        let defaults = TaskDefaults {
            classes: "6".to_string(),
            level: 2,
            topic_id: 9,
        };
        let book = parse_book(&sample_book(), &defaults).unwrap();
        assert!(book
            .tasks
            .iter()
            .all(|t| t.classes == "6" && t.level == 2 && t.topic_id == 9));
    }
}

#[cfg(test)]
mod answer_tests {
    use super::*;

    #[test]
    fn test_answers_are_attached() {
        let book = parse_book(&sample_book(), &TaskDefaults::default()).unwrap();

        let answers: Vec<(&str, Option<&str>)> = book
            .tasks
            .iter()
            .map(|t| (t.id_in_book.as_str(), t.answer.as_deref()))
            .collect();
        assert_eq!(
            answers,
            vec![
                ("1.1.1", Some("27 учеников.")),
                ("1.1.2", Some("а) 12; б) 7")),
                ("1.1.2.а", Some("12")),
                ("1.1.2.б", Some("7")),
                ("1.2.3", Some("48 р.")),
                ("2.1.4", Some("1/3")),
                ("5", None),
                ("5.а", Some("4 км/ч")),
                ("5.б", Some("5 ч")),
            ]
        );
        assert_eq!(book.answered_count(), 8);
    }

    #[test]
    fn test_book_without_answers_section() {
        let book = parse_book(
            &paragraphs(&["1. Пункт", "1.1.1. Задача"]),
            &TaskDefaults::default(),
        )
        .unwrap();
        assert_eq!(book.tasks[0].answer, None);
    }

    #[test]
    fn test_reconciling_twice_changes_nothing() {
        let extraction = parse_structure(&sample_book(), &TaskDefaults::default()).unwrap();
        let text = extraction.answers_text();

        let mut once = extraction.tasks.clone();
        reconcile_answers(&text, &mut once).unwrap();
        let mut twice = once.clone();
        reconcile_answers(&text, &mut twice).unwrap();

        assert_eq!(once, twice);
    }

    #[test]
    fn test_every_extracted_id_is_a_book_id() {
        let extraction = parse_structure(&sample_book(), &TaskDefaults::default()).unwrap();
        for task in &extraction.tasks {
            assert!(BookId::parse(&task.id_in_book).is_ok(), "{}", task.id_in_book);
        }
    }
}

#[cfg(test)]
mod error_tests {
    use super::*;

    #[test]
    fn test_unrecognized_paragraph_aborts_parse() {
        let mut lines = sample_book();
        lines.insert(3, "Рисунок 1".to_string());

        let err = parse_book(&lines, &TaskDefaults::default()).unwrap_err();
        assert_eq!(
            err,
            ParseError::UnrecognizedStructure {
                index: 3,
                text: "Рисунок 1".to_string()
            }
        );
        let message = err.to_string();
        assert!(message.contains('3'));
        assert!(message.contains("Рисунок 1"));
    }

    #[test]
    fn test_oversized_task_number_is_reported() {
        let lines = paragraphs(&[
            "1. Пункт",
            "1.1.99999999999. Задача",
            "Ответы и советы",
            "1. 5",
        ]);

        let err = parse_book(&lines, &TaskDefaults::default()).unwrap_err();
        assert_eq!(
            err,
            ParseError::NumberOutOfRange {
                number: "99999999999".to_string()
            }
        );
        assert!(err.to_string().contains("too large"));
    }
}
