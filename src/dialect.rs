//! SQL dialect abstraction.
//!
//! The `Dialect` trait carries every piece of SQL the database layer needs:
//! placeholder syntax, per-entity statements and the migration DDL. Statement
//! bodies are shared as default implementations built on `placeholder`;
//! dialects override only where syntax actually differs (placeholders,
//! case-insensitive `LIKE`, DDL). The dialect in use is fixed at compile time
//! by feature flags, so higher-level code stays agnostic to the underlying
//! database.

#[cfg(feature = "sqlite")]
mod sqlite;

#[cfg(all(feature = "postgres", not(feature = "sqlite")))]
mod postgres;

/// The SQL dialect selected at compile time by feature flags.
#[cfg(feature = "sqlite")]
pub type CurrentDialect = sqlite::SqliteDialect;

#[cfg(feature = "sqlite")]
pub type Db = sqlx::Sqlite;

#[cfg(feature = "sqlite")]
pub type CurrentRow = sqlx::sqlite::SqliteRow;

#[cfg(all(feature = "postgres", not(feature = "sqlite")))]
pub type CurrentDialect = postgres::PostgresDialect;

#[cfg(all(feature = "postgres", not(feature = "sqlite")))]
pub type Db = sqlx::Postgres;

#[cfg(all(feature = "postgres", not(feature = "sqlite")))]
pub type CurrentRow = sqlx::postgres::PgRow;

/// A trait for SQL dialects to support database-specific statement
/// generation.
pub trait Dialect {
    /// Returns the SQL placeholder syntax for the given parameter index.
    ///
    /// - SQLite: `?`
    /// - PostgreSQL: `$1`, `$2`, ...
    fn placeholder(idx: usize) -> String;

    /// Returns a case-insensitive substring-match clause for a text column.
    ///
    /// The bound parameter is expected to already carry the `%` wildcards.
    /// SQLite's `LIKE` is case-insensitive for ASCII by default; Postgres
    /// overrides this with `ILIKE`.
    fn contains_clause(column: &str, idx: usize) -> String {
        format!("{column} LIKE {}", Self::placeholder(idx))
    }

    /// Returns the statement inserting an image and yielding its new id.
    fn insert_image_statement() -> String {
        format!(
            "INSERT INTO images (title, payload, content_type, question_id) \
             VALUES ({}, {}, {}, {}) RETURNING id",
            Self::placeholder(1),
            Self::placeholder(2),
            Self::placeholder(3),
            Self::placeholder(4),
        )
    }

    /// Returns the statement replacing every scalar column of an image.
    fn update_image_statement() -> String {
        format!(
            "UPDATE images SET title = {}, payload = {}, content_type = {}, question_id = {} \
             WHERE id = {}",
            Self::placeholder(1),
            Self::placeholder(2),
            Self::placeholder(3),
            Self::placeholder(4),
            Self::placeholder(5),
        )
    }

    fn insert_question_statement() -> String {
        format!(
            "INSERT INTO questions (text, correct_option, quiz_id) \
             VALUES ({}, {}, {}) RETURNING id",
            Self::placeholder(1),
            Self::placeholder(2),
            Self::placeholder(3),
        )
    }

    fn update_question_statement() -> String {
        format!(
            "UPDATE questions SET text = {}, correct_option = {}, quiz_id = {} WHERE id = {}",
            Self::placeholder(1),
            Self::placeholder(2),
            Self::placeholder(3),
            Self::placeholder(4),
        )
    }

    fn insert_quiz_statement() -> String {
        format!(
            "INSERT INTO quizzes (title, description, created_at) \
             VALUES ({}, {}, {}) RETURNING id",
            Self::placeholder(1),
            Self::placeholder(2),
            Self::placeholder(3),
        )
    }

    fn update_quiz_statement() -> String {
        format!(
            "UPDATE quizzes SET title = {}, description = {} WHERE id = {}",
            Self::placeholder(1),
            Self::placeholder(2),
            Self::placeholder(3),
        )
    }

    /// Returns the statement selecting one row by id.
    fn select_by_id_statement(select_list: &str, table: &str) -> String {
        format!(
            "SELECT {select_list} FROM {table} WHERE id = {}",
            Self::placeholder(1)
        )
    }

    /// Returns the statement deleting one row by id.
    fn delete_by_id_statement(table: &str) -> String {
        format!("DELETE FROM {table} WHERE id = {}", Self::placeholder(1))
    }

    /// Returns a full SELECT statement for rows matching the given tail
    /// (the WHERE / ORDER BY / LIMIT fragment built by the criteria and page
    /// modules).
    fn find_statement(select_list: &str, table: &str, tail: &str) -> String {
        format!("SELECT {select_list} FROM {table} {tail}")
            .trim_end()
            .to_string()
    }

    /// Returns the statement counting rows matching the given condition.
    fn count_statement(table: &str, condition: &str) -> String {
        format!("SELECT COUNT(id) FROM {table} {condition}")
            .trim_end()
            .to_string()
    }

    /// Returns the statement inserting one answer option of a question.
    fn insert_option_statement() -> String {
        format!(
            "INSERT INTO question_options (question_id, idx, label) VALUES ({}, {}, {})",
            Self::placeholder(1),
            Self::placeholder(2),
            Self::placeholder(3),
        )
    }

    /// Returns the statement removing every option of a question.
    fn delete_options_statement() -> String {
        format!(
            "DELETE FROM question_options WHERE question_id = {}",
            Self::placeholder(1)
        )
    }

    /// Returns the statement listing a question's options in order.
    fn options_by_question_statement() -> String {
        format!(
            "SELECT label FROM question_options WHERE question_id = {} ORDER BY idx",
            Self::placeholder(1)
        )
    }

    /// Returns the statement listing one page of a quiz's questions.
    fn questions_by_quiz_statement(select_list: &str) -> String {
        format!(
            "SELECT {select_list} FROM questions WHERE quiz_id = {} \
             ORDER BY id LIMIT {} OFFSET {}",
            Self::placeholder(1),
            Self::placeholder(2),
            Self::placeholder(3),
        )
    }

    /// Returns the DDL statements to set up the schema. Must be idempotent.
    fn migration() -> &'static [&'static str];
}
