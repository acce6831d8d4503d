use super::Dialect;

/// Postgres dialect implementation of the `Dialect` trait.
pub struct PostgresDialect;

impl Dialect for PostgresDialect {
    fn placeholder(idx: usize) -> String {
        format!("${idx}")
    }

    fn contains_clause(column: &str, idx: usize) -> String {
        format!("{column} ILIKE {}", Self::placeholder(idx))
    }

    fn migration() -> &'static [&'static str] {
        &[
            r#"CREATE TABLE IF NOT EXISTS quizzes (
                id BIGSERIAL PRIMARY KEY,
                title TEXT NOT NULL,
                description TEXT,
                created_at TEXT NOT NULL
            );"#,
            r#"CREATE TABLE IF NOT EXISTS questions (
                id BIGSERIAL PRIMARY KEY,
                text TEXT NOT NULL,
                correct_option BIGINT,
                quiz_id BIGINT REFERENCES quizzes(id)
            );"#,
            r#"CREATE TABLE IF NOT EXISTS question_options (
                question_id BIGINT NOT NULL REFERENCES questions(id) ON DELETE CASCADE,
                idx BIGINT NOT NULL,
                label TEXT NOT NULL,
                PRIMARY KEY (question_id, idx)
            );"#,
            r#"CREATE TABLE IF NOT EXISTS images (
                id BIGSERIAL PRIMARY KEY,
                title TEXT NOT NULL,
                payload BYTEA,
                content_type TEXT,
                question_id BIGINT REFERENCES questions(id)
            );"#,
            r#"CREATE INDEX IF NOT EXISTS idx_questions_quiz_id ON questions(quiz_id);"#,
            r#"CREATE INDEX IF NOT EXISTS idx_images_question_id ON images(question_id);"#,
        ]
    }
}
