//! Practice mode drivers.
//!
//! One loop serves every mode: the builder picks the question shapes and the
//! driver only decides how to ask each shape. Input is line based. End of
//! input ends the session early.

use anyhow::Result;
use rand::Rng;
use std::io::{BufRead, Write};
use vocab_core::{
    compare_free_text, Answer, PracticeMode, Question, QuestionSetBuilder, QuestionShape, Score,
    Section, Session, SessionError,
};

/// Typed command that ends a session early.
const END_COMMAND: &str = ":end";

/// What the user asked for at a prompt.
enum Step {
    Answer(Answer),
    Back,
    End,
}

/// Run `mode` over `section` until the user stops retrying missed questions.
///
/// Returns the score of the last round, or `None` when the section has
/// nothing to practice.
pub fn practice<R, I, O>(
    section: &Section,
    mode: PracticeMode,
    builder: &mut QuestionSetBuilder<R>,
    input: &mut I,
    out: &mut O,
) -> Result<Option<Score>>
where
    R: Rng,
    I: BufRead,
    O: Write,
{
    let questions = builder.build(section, mode);
    let mut session = match Session::start(questions) {
        Ok(session) => session,
        Err(SessionError::NothingToPractice) => {
            writeln!(out, "Nothing to practice in {:?}.", section.title)?;
            return Ok(None);
        }
        Err(e) => return Err(e.into()),
    };

    tracing::info!(section = %section.id, mode = %mode, "starting practice");
    writeln!(out, "{} · {} · {} questions", section.title, mode, session.questions().len())?;

    loop {
        session = run_round(session, input, out)?;
        let score = session.score()?;
        print_score(&score, out)?;

        if score.missed.is_empty() || !confirm(input, out, "Retry missed questions?")? {
            return Ok(Some(score));
        }
        session = session.restart_with_missed(builder)?;
    }
}

fn run_round<I: BufRead, O: Write>(mut session: Session, input: &mut I, out: &mut O) -> Result<Session> {
    while let Some(question) = session.current().cloned() {
        let (position, total) = session.progress();
        writeln!(out)?;
        writeln!(out, "[{position}/{total}] {}", question.prompt())?;
        if let Some(word_class) = &question.card.word_class {
            writeln!(out, "  ({word_class})")?;
        }

        let step = match question.shape {
            QuestionShape::Flashcard => ask_recall(&question, input, out)?,
            QuestionShape::TermToDefinition | QuestionShape::DefinitionToTerm => {
                ask_choice(&question, input, out)?
            }
            QuestionShape::FreeText => ask_text(input, out)?,
        };

        session = match step {
            Step::Answer(answer) => {
                let answered = session.submit_answer(&question.id, answer)?;
                give_feedback(&answered, &question, out)?;
                answered.advance()?
            }
            Step::Back => session.go_back()?,
            Step::End => session.finish_early()?,
        };
    }
    Ok(session)
}

fn ask_recall<I: BufRead, O: Write>(question: &Question, input: &mut I, out: &mut O) -> Result<Step> {
    let Some(line) = prompt(input, out, "enter to reveal (b = back, q = end)")? else {
        return Ok(Step::End);
    };
    match line.to_lowercase().as_str() {
        "b" | "back" => return Ok(Step::Back),
        "q" | END_COMMAND => return Ok(Step::End),
        _ => writeln!(out, "  = {}", question.card.definition)?,
    }

    loop {
        let Some(line) = prompt(input, out, "remembered? (y/n, b = back, q = end)")? else {
            return Ok(Step::End);
        };
        match line.to_lowercase().as_str() {
            "y" | "yes" => return Ok(Step::Answer(Answer::Recall(true))),
            "n" | "no" => return Ok(Step::Answer(Answer::Recall(false))),
            "b" | "back" => return Ok(Step::Back),
            "q" | END_COMMAND => return Ok(Step::End),
            _ => writeln!(out, "  please answer y or n")?,
        }
    }
}

fn ask_choice<I: BufRead, O: Write>(question: &Question, input: &mut I, out: &mut O) -> Result<Step> {
    let options = question.options.as_deref().unwrap_or_default();
    for (i, option) in options.iter().enumerate() {
        writeln!(out, "  {}) {}", i + 1, option)?;
    }

    loop {
        let label = format!("choice (1-{}, {END_COMMAND} to finish)", options.len());
        let Some(line) = prompt(input, out, &label)? else {
            return Ok(Step::End);
        };
        if line == END_COMMAND {
            return Ok(Step::End);
        }
        match parse_choice(&line, options) {
            Some(selected) => return Ok(Step::Answer(Answer::Choice(selected.to_string()))),
            None => writeln!(out, "  pick a number between 1 and {}", options.len())?,
        }
    }
}

fn ask_text<I: BufRead, O: Write>(input: &mut I, out: &mut O) -> Result<Step> {
    let Some(line) = prompt(input, out, &format!("answer ({END_COMMAND} to finish)"))? else {
        return Ok(Step::End);
    };
    if line == END_COMMAND {
        return Ok(Step::End);
    }
    Ok(Step::Answer(Answer::Text(line)))
}

/// Map a 1-based option number to its text.
fn parse_choice<'a>(line: &str, options: &'a [String]) -> Option<&'a str> {
    let n: usize = line.trim().parse().ok()?;
    options.get(n.checked_sub(1)?).map(String::as_str)
}

fn give_feedback<O: Write>(session: &Session, question: &Question, out: &mut O) -> Result<()> {
    match (question.shape, session.answer(&question.id)) {
        (QuestionShape::Flashcard, _) => {}
        (QuestionShape::FreeText, Some(Answer::Text(typed))) if !session.is_correct(question) => {
            let result = compare_free_text(typed, &question.correct_answer);
            writeln!(
                out,
                "  ✗ you wrote {:?}, expected {:?}",
                result.typed_normalized, question.correct_answer
            )?
        }
        _ if session.is_correct(question) => writeln!(out, "  ✓ correct")?,
        _ => writeln!(out, "  ✗ answer: {}", question.correct_answer)?,
    }
    Ok(())
}

fn print_score<O: Write>(score: &Score, out: &mut O) -> Result<()> {
    writeln!(out)?;
    writeln!(
        out,
        "Score: {}/{} ({:.0}%)",
        score.correct,
        score.total,
        score.percent()
    )?;
    if !score.missed.is_empty() {
        writeln!(out, "To review:")?;
        for question in &score.missed {
            writeln!(out, "  {}: {}", question.card.term, question.card.definition)?;
        }
    }
    Ok(())
}

fn confirm<I: BufRead, O: Write>(input: &mut I, out: &mut O, label: &str) -> Result<bool> {
    let answer = prompt(input, out, &format!("{label} (y/n)"))?;
    Ok(matches!(
        answer.map(|a| a.to_lowercase()).as_deref(),
        Some("y" | "yes")
    ))
}

/// Print a prompt and read one trimmed line; `None` at end of input.
fn prompt<I: BufRead, O: Write>(input: &mut I, out: &mut O, label: &str) -> Result<Option<String>> {
    write!(out, "  {label} > ")?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        writeln!(out)?;
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::io::Cursor;
    use vocab_core::Card;

    fn section(n: usize) -> Section {
        let mut section = Section::new("Verbs", "");
        for i in 0..n {
            section
                .cards
                .push(Card::new(format!("word {i}"), format!("meaning {i}")));
        }
        section
    }

    fn run(section: &Section, mode: PracticeMode, script: &str) -> (Option<Score>, String) {
        let mut builder = QuestionSetBuilder::new(StdRng::seed_from_u64(17));
        let mut input = Cursor::new(script.as_bytes().to_vec());
        let mut out = Vec::new();
        let score = practice(section, mode, &mut builder, &mut input, &mut out).unwrap();
        (score, String::from_utf8(out).unwrap())
    }

    #[test]
    fn empty_section_declines_to_start() {
        let (score, text) = run(&section(0), PracticeMode::Quiz, "");
        assert!(score.is_none());
        assert!(text.contains("Nothing to practice"));
    }

    #[test]
    fn flashcards_all_remembered() {
        let (score, text) = run(&section(3), PracticeMode::Flashcard, "\ny\n\ny\n\ny\n");
        let score = score.unwrap();
        assert_eq!((score.correct, score.total), (3, 3));
        assert!(text.contains("Score: 3/3 (100%)"));
        assert!(!text.contains("Retry missed"));
    }

    #[test]
    fn flashcard_back_then_forget() {
        // back on the first card is a no-op, then forget every card
        let (score, text) = run(&section(2), PracticeMode::Flashcard, "b\n\nn\n\nn\nn\n");
        let score = score.unwrap();
        assert_eq!(score.correct, 0);
        assert_eq!(score.missed.len(), 2);
        assert!(text.contains("  = meaning 0"));
        assert!(text.contains("  = meaning 1"));
    }

    #[test]
    fn end_early_then_retry_missed() {
        let script = format!("{END_COMMAND}\ny\n{END_COMMAND}\nn\n");
        let (score, text) = run(&section(4), PracticeMode::Response, &script);
        let score = score.unwrap();
        assert_eq!((score.correct, score.total), (0, 4));
        assert_eq!(text.matches("Score: 0/4").count(), 2);
    }

    #[test]
    fn end_of_input_finishes_session() {
        let (score, _) = run(&section(5), PracticeMode::Test, "");
        let score = score.unwrap();
        assert_eq!(score.total, 7);
        assert_eq!(score.missed.len(), 7);
    }

    #[test]
    fn invalid_choice_reprompts() {
        let (_, text) = run(&section(4), PracticeMode::Quiz, "9\nabc\n");
        assert!(text.contains("pick a number between 1 and 4"));
    }

    #[test]
    fn confirm_ignores_case() {
        let cases = [
            ("YES\n", true),
            ("Yes\n", true),
            ("Y\n", true),
            ("No\n", false),
            ("", false),
        ];
        for (line, expected) in cases {
            let mut input = Cursor::new(line.as_bytes().to_vec());
            let mut out = Vec::new();
            assert_eq!(confirm(&mut input, &mut out, "Retry?").unwrap(), expected, "{line:?}");
        }
    }

    #[test]
    fn parse_choice_is_one_based() {
        let options = vec!["a".to_string(), "b".to_string()];
        assert_eq!(parse_choice("1", &options), Some("a"));
        assert_eq!(parse_choice(" 2 ", &options), Some("b"));
        assert_eq!(parse_choice("0", &options), None);
        assert_eq!(parse_choice("3", &options), None);
        assert_eq!(parse_choice("x", &options), None);
    }
}
