use quiz_core::Category;
use sqlx::Row;
use sqlx::sqlite::SqliteRow;

use crate::repository::{QuestionRecord, QuizRecord, StorageError};

pub(crate) fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

pub(crate) fn index_to_i64(field: &'static str, v: usize) -> Result<i64, StorageError> {
    i64::try_from(v).map_err(|_| StorageError::Serialization(format!("{field} overflow")))
}

fn i64_to_index(field: &'static str, v: i64) -> Result<usize, StorageError> {
    usize::try_from(v).map_err(|_| StorageError::Serialization(format!("{field} sign overflow")))
}

pub(crate) fn quiz_record_from_row(row: &SqliteRow) -> Result<(i64, QuizRecord), StorageError> {
    let position: i64 = row.try_get("position").map_err(ser)?;
    let record = QuizRecord {
        title: row.try_get("title").map_err(ser)?,
        questions: Vec::new(),
        is_default: Some(row.try_get::<i64, _>("is_default").map_err(ser)? != 0),
    };
    Ok((position, record))
}

pub(crate) fn question_record_from_row(
    row: &SqliteRow,
) -> Result<(i64, QuestionRecord), StorageError> {
    let quiz_position: i64 = row.try_get("quiz_position").map_err(ser)?;
    let category = row
        .try_get::<String, _>("category")
        .map_err(ser)?
        .parse::<Category>()
        .map_err(ser)?;

    let record = QuestionRecord {
        statement: row.try_get("statement").map_err(ser)?,
        answers: vec![
            row.try_get("answer_1").map_err(ser)?,
            row.try_get("answer_2").map_err(ser)?,
            row.try_get("answer_3").map_err(ser)?,
        ],
        correct_answer_index: i64_to_index(
            "correct_answer_index",
            row.try_get("correct_answer_index").map_err(ser)?,
        )?,
        image_path: Some(row.try_get("image_path").map_err(ser)?),
        category,
    };
    Ok((quiz_position, record))
}
