use std::io::{self, BufRead, Write};

use quiz_core::ANSWER_COUNT;
use services::{ImageSource, PlayError, PlaySession};

/// Drives `session` from line-based input until it completes, the input
/// ends, or the player types `q`.
///
/// Answers are entered 1-based. Anything that is not an answer number is
/// reported and asked again without touching the session.
pub fn run_session<R, W>(session: &mut PlaySession, input: R, out: &mut W) -> io::Result<()>
where
    R: BufRead,
    W: Write,
{
    writeln!(out, "Playing \"{}\"", session.quiz_title())?;
    let mut lines = input.lines();

    'questions: while let Some(question) = session.current_question().cloned() {
        let progress = session.progress();
        writeln!(out)?;
        writeln!(
            out,
            "Question {}/{}: {}",
            progress.answered + 1,
            progress.total,
            question.statement()
        )?;
        match session.current_image() {
            Some(ImageSource::File(path)) => writeln!(out, "  [image: {}]", path.display())?,
            Some(ImageSource::Placeholder(path)) => writeln!(out, "  [image: {path}]")?,
            None => {}
        }
        for (i, answer) in question.answers().iter().enumerate() {
            writeln!(out, "  {}) {answer}", i + 1)?;
        }

        loop {
            write!(out, "> ")?;
            out.flush()?;
            let Some(line) = lines.next().transpose()? else {
                break 'questions;
            };
            let line = line.trim();
            if line.eq_ignore_ascii_case("q") {
                break 'questions;
            }

            let Some(index) = line
                .parse::<usize>()
                .ok()
                .and_then(|n| n.checked_sub(1))
            else {
                writeln!(out, "Enter a number from 1 to {ANSWER_COUNT}, or q to quit.")?;
                continue;
            };

            match session.submit_answer(index) {
                Ok(outcome) if outcome.was_correct => {
                    writeln!(out, "Correct!")?;
                }
                Ok(outcome) => {
                    writeln!(
                        out,
                        "Wrong. The answer was {}) {}",
                        outcome.correct_answer_index + 1,
                        question.correct_answer()
                    )?;
                }
                Err(PlayError::AnswerOutOfRange { .. }) => {
                    writeln!(out, "Enter a number from 1 to {ANSWER_COUNT}, or q to quit.")?;
                    continue;
                }
                Err(err) => {
                    tracing::warn!(error = %err, "play session rejected an answer");
                    break 'questions;
                }
            }
            break;
        }
    }

    let progress = session.progress();
    writeln!(out)?;
    writeln!(
        out,
        "Score: {}/{} ({:.2}%)",
        progress.correct, progress.answered, progress.percentage_correct
    )?;
    if !progress.is_complete {
        writeln!(out, "Stopped with {} question(s) left.", progress.remaining)?;
    }
    Ok(())
}
