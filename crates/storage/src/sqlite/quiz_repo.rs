use chrono::Utc;
use quiz_core::Quiz;

use super::SqliteRepository;
use super::mapping::{index_to_i64, question_record_from_row, quiz_record_from_row};
use crate::repository::{
    QuizRecord, QuizRepository, StorageError, quizzes_from_records, records_from_quizzes,
};

fn conn<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Connection(e.to_string())
}

#[async_trait::async_trait]
impl QuizRepository for SqliteRepository {
    async fn save_quizzes(&self, quizzes: &[Quiz]) -> Result<(), StorageError> {
        let records = records_from_quizzes(quizzes);
        let mut tx = self.pool.begin().await.map_err(conn)?;

        // Questions go first through the cascade; clear both explicitly so
        // the overwrite does not depend on the foreign_keys pragma.
        sqlx::query("DELETE FROM questions")
            .execute(&mut *tx)
            .await
            .map_err(conn)?;
        sqlx::query("DELETE FROM quizzes")
            .execute(&mut *tx)
            .await
            .map_err(conn)?;

        for (quiz_position, quiz) in records.iter().enumerate() {
            let quiz_position = index_to_i64("quiz position", quiz_position)?;
            sqlx::query(
                r"
                INSERT INTO quizzes (position, title, is_default)
                VALUES (?1, ?2, ?3)
                ",
            )
            .bind(quiz_position)
            .bind(&quiz.title)
            .bind(i64::from(quiz.is_default.unwrap_or(false)))
            .execute(&mut *tx)
            .await
            .map_err(conn)?;

            for (position, question) in quiz.questions.iter().enumerate() {
                let [answer_1, answer_2, answer_3] = question.answers.as_slice() else {
                    return Err(StorageError::Serialization(format!(
                        "question {:?} does not have three answers",
                        question.statement
                    )));
                };

                sqlx::query(
                    r"
                    INSERT INTO questions (
                        quiz_position, position, statement, answer_1, answer_2, answer_3,
                        correct_answer_index, image_path, category
                    )
                    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
                    ",
                )
                .bind(quiz_position)
                .bind(index_to_i64("question position", position)?)
                .bind(&question.statement)
                .bind(answer_1)
                .bind(answer_2)
                .bind(answer_3)
                .bind(index_to_i64(
                    "correct_answer_index",
                    question.correct_answer_index,
                )?)
                .bind(question.image_path.as_deref().unwrap_or_default())
                .bind(question.category.name())
                .execute(&mut *tx)
                .await
                .map_err(conn)?;
            }
        }

        sqlx::query(
            r"
            INSERT INTO collection_state (id, saved_at)
            VALUES (1, ?1)
            ON CONFLICT(id) DO UPDATE SET saved_at = excluded.saved_at
            ",
        )
        .bind(Utc::now())
        .execute(&mut *tx)
        .await
        .map_err(conn)?;

        tx.commit().await.map_err(conn)?;
        tracing::debug!(count = records.len(), "saved quiz collection to sqlite");
        Ok(())
    }

    async fn load_quizzes(&self) -> Result<Vec<Quiz>, StorageError> {
        // One read transaction so the marker and both tables come from the
        // same snapshot.
        let mut tx = self.pool.begin().await.map_err(conn)?;

        let saved = sqlx::query("SELECT saved_at FROM collection_state WHERE id = 1")
            .fetch_optional(&mut *tx)
            .await
            .map_err(conn)?;
        if saved.is_none() {
            return Err(StorageError::NotFound);
        }

        let quiz_rows = sqlx::query(
            r"
            SELECT position, title, is_default
            FROM quizzes
            ORDER BY position ASC
            ",
        )
        .fetch_all(&mut *tx)
        .await
        .map_err(conn)?;

        let question_rows = sqlx::query(
            r"
            SELECT quiz_position, position, statement, answer_1, answer_2, answer_3,
                   correct_answer_index, image_path, category
            FROM questions
            ORDER BY quiz_position ASC, position ASC
            ",
        )
        .fetch_all(&mut *tx)
        .await
        .map_err(conn)?;
        tx.commit().await.map_err(conn)?;

        let mut quizzes: Vec<(i64, QuizRecord)> = quiz_rows
            .iter()
            .map(quiz_record_from_row)
            .collect::<Result<_, _>>()?;

        for row in &question_rows {
            let (quiz_position, question) = question_record_from_row(row)?;
            let (_, quiz) = quizzes
                .iter_mut()
                .find(|(position, _)| *position == quiz_position)
                .ok_or_else(|| {
                    StorageError::Serialization(format!(
                        "question references missing quiz {quiz_position}"
                    ))
                })?;
            quiz.questions.push(question);
        }

        let records = quizzes.into_iter().map(|(_, record)| record).collect();
        quizzes_from_records(records)
    }
}
