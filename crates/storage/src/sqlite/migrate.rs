use chrono::Utc;
use sqlx::SqlitePool;

use super::SqliteInitError;

/// Brings the schema up to date.
///
/// Version 1 creates the quiz and question tables plus the single-row
/// `collection_state` table that records whether a collection was ever
/// saved.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), SqliteInitError> {
    async fn is_applied(pool: &SqlitePool, version: i64) -> Result<bool, sqlx::Error> {
        let row = sqlx::query("SELECT 1 FROM schema_migrations WHERE version = ?1")
            .bind(version)
            .fetch_optional(pool)
            .await?;
        Ok(row.is_some())
    }

    sqlx::query(
        r"
            CREATE TABLE IF NOT EXISTS schema_migrations (
                version INTEGER PRIMARY KEY,
                applied_at TEXT NOT NULL
            );
            ",
    )
    .execute(pool)
    .await?;

    if !is_applied(pool, 1).await? {
        let mut tx = pool.begin().await?;

        sqlx::query(
            r"
                CREATE TABLE IF NOT EXISTS quizzes (
                    position INTEGER PRIMARY KEY,
                    title TEXT NOT NULL,
                    is_default INTEGER NOT NULL DEFAULT 0 CHECK (is_default IN (0, 1))
                );
            ",
        )
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r"
                CREATE TABLE IF NOT EXISTS questions (
                    quiz_position INTEGER NOT NULL,
                    position INTEGER NOT NULL,
                    statement TEXT NOT NULL,
                    answer_1 TEXT NOT NULL,
                    answer_2 TEXT NOT NULL,
                    answer_3 TEXT NOT NULL,
                    correct_answer_index INTEGER NOT NULL
                        CHECK (correct_answer_index BETWEEN 0 AND 2),
                    image_path TEXT NOT NULL DEFAULT '',
                    category TEXT NOT NULL,
                    PRIMARY KEY (quiz_position, position),
                    FOREIGN KEY (quiz_position) REFERENCES quizzes(position) ON DELETE CASCADE
                );
            ",
        )
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r"
                CREATE TABLE IF NOT EXISTS collection_state (
                    id INTEGER PRIMARY KEY CHECK (id = 1),
                    saved_at TEXT NOT NULL
                );
            ",
        )
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r"
                INSERT INTO schema_migrations (version, applied_at)
                VALUES (?1, ?2)
                ON CONFLICT(version) DO NOTHING
            ",
        )
        .bind(1_i64)
        .bind(Utc::now())
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
    }

    Ok(())
}
