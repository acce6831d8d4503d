use super::Dialect;

/// SQLite dialect implementation of the `Dialect` trait.
pub struct SqliteDialect;

impl Dialect for SqliteDialect {
    fn placeholder(_idx: usize) -> String {
        "?".to_string()
    }

    fn migration() -> &'static [&'static str] {
        &[
            r#"CREATE TABLE IF NOT EXISTS quizzes (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                description TEXT,
                created_at TEXT NOT NULL
            );"#,
            r#"CREATE TABLE IF NOT EXISTS questions (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                text TEXT NOT NULL,
                correct_option INTEGER,
                quiz_id INTEGER,
                FOREIGN KEY (quiz_id) REFERENCES quizzes(id)
            );"#,
            r#"CREATE TABLE IF NOT EXISTS question_options (
                question_id INTEGER NOT NULL,
                idx INTEGER NOT NULL,
                label TEXT NOT NULL,
                PRIMARY KEY (question_id, idx),
                FOREIGN KEY (question_id) REFERENCES questions(id) ON DELETE CASCADE
            );"#,
            r#"CREATE TABLE IF NOT EXISTS images (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                payload BLOB,
                content_type TEXT,
                question_id INTEGER,
                FOREIGN KEY (question_id) REFERENCES questions(id)
            );"#,
            r#"CREATE INDEX IF NOT EXISTS idx_questions_quiz_id ON questions(quiz_id);"#,
            r#"CREATE INDEX IF NOT EXISTS idx_images_question_id ON images(question_id);"#,
        ]
    }
}
