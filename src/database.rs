//! Persistence layer over an SQLx connection pool.
//!
//! [`Database`] offers per-entity CRUD plus generic criteria-driven find and
//! count. SQL text comes from the active [`Dialect`]; each statement carries its
//! operation context into [`DatabaseError`] on failure.

use crate::{
    criteria::{Criteria, SqlValue},
    dialect::{CurrentDialect, CurrentRow, Dialect},
    entity::{IMAGE_SCHEMA, Image, QUESTION_SCHEMA, QUIZ_SCHEMA, Question, Quiz},
    page::PageRequest,
};
use chrono::DateTime;
pub use crate::dialect::Db;
pub use sqlx::Pool;
use sqlx::{FromRow, Row};
use std::str::FromStr;
use thiserror::Error;

/// Applies the dialect's DDL. Safe to run on every startup.
pub async fn run_migration(pool: &Pool<Db>) -> Result<(), sqlx::Error> {
    for stmt in CurrentDialect::migration() {
        sqlx::query(stmt).execute(pool).await?;
    }

    Ok(())
}

impl FromRow<'_, CurrentRow> for Image {
    fn from_row(row: &CurrentRow) -> Result<Self, sqlx::Error> {
        Ok(Image {
            id: row.try_get("id")?,
            title: row.try_get("title")?,
            payload: row.try_get("payload")?,
            content_type: row.try_get("content_type")?,
            question_id: row.try_get("question_id")?,
        })
    }
}

/// A `questions` row without its options; options live in the
/// `question_options` child table and are attached separately.
#[derive(Debug, Clone)]
struct QuestionRow {
    id: i64,
    text: String,
    correct_option: Option<i64>,
    quiz_id: Option<i64>,
}

impl QuestionRow {
    fn into_question(self, options: Vec<String>) -> Question {
        Question {
            id: self.id,
            text: self.text,
            options,
            correct_option: self.correct_option,
            quiz_id: self.quiz_id,
        }
    }
}

impl FromRow<'_, CurrentRow> for QuestionRow {
    fn from_row(row: &CurrentRow) -> Result<Self, sqlx::Error> {
        Ok(QuestionRow {
            id: row.try_get("id")?,
            text: row.try_get("text")?,
            correct_option: row.try_get("correct_option")?,
            quiz_id: row.try_get("quiz_id")?,
        })
    }
}

impl FromRow<'_, CurrentRow> for Quiz {
    fn from_row(row: &CurrentRow) -> Result<Self, sqlx::Error> {
        let created_at: String = row.try_get("created_at")?;
        let created_at = DateTime::from_str(&created_at).map_err(|e| sqlx::Error::ColumnDecode {
            index: "created_at".to_string(),
            source: Box::new(e),
        })?;

        Ok(Quiz {
            id: row.try_get("id")?,
            title: row.try_get("title")?,
            description: row.try_get("description")?,
            created_at,
        })
    }
}

/// A database abstraction for storing and querying quiz-practice entities.
///
/// This struct wraps an SQLx connection pool and provides high-level CRUD
/// and criteria-query methods. The implementation is SQL dialect agnostic
/// and delegates syntax to [`Dialect`]. Every call goes straight to the
/// store; there is no retrying and no caching.
#[derive(Debug, Clone)]
pub struct Database {
    pool: Pool<Db>,
}

impl Database {
    pub fn new(pool: Pool<Db>) -> Self {
        Self { pool }
    }

    /// Runs the schema migration before handing the pool back.
    pub async fn with_migration(pool: Pool<Db>) -> Result<Self, sqlx::Error> {
        run_migration(&pool).await?;

        Ok(Self { pool })
    }

    // ------------------------------------------------------------------
    // Criteria queries (shared by every entity)
    // ------------------------------------------------------------------

    /// Fetches one page of rows matching the criteria, ordered by the page
    /// request's sort spec.
    pub async fn find_by_criteria<T>(
        &self,
        criteria: &Criteria,
        page: &PageRequest,
    ) -> Result<Vec<T>, DatabaseError>
    where
        T: Send + Unpin + for<'r> FromRow<'r, CurrentRow>,
    {
        let schema = criteria.schema();
        let (condition, mut params) = criteria.to_sql();

        let mut tail = String::new();
        if !condition.is_empty() {
            tail.push_str(&condition);
            tail.push(' ');
        }
        tail.push_str(&page.order_by_sql());

        params.push(SqlValue::Int(page.size as i64));
        tail.push_str(&format!(
            " LIMIT {}",
            CurrentDialect::placeholder(params.len())
        ));
        params.push(SqlValue::Int(
            i64::try_from(page.offset()).unwrap_or(i64::MAX),
        ));
        tail.push_str(&format!(
            " OFFSET {}",
            CurrentDialect::placeholder(params.len())
        ));

        let stmt = CurrentDialect::find_statement(&schema.select_list(), schema.table, &tail);

        let mut query = sqlx::query_as::<Db, T>(&stmt);
        for param in &params {
            query = match param {
                SqlValue::Int(v) => query.bind(*v),
                SqlValue::Text(v) => query.bind(v.clone()),
            };
        }

        query
            .fetch_all(&self.pool)
            .await
            .map_err(query_failed(DbOperation::Query { table: schema.table }, &stmt))
    }

    /// Counts every row matching the criteria, ignoring pagination.
    pub async fn count_by_criteria(&self, criteria: &Criteria) -> Result<u64, DatabaseError> {
        let schema = criteria.schema();
        let (condition, params) = criteria.to_sql();
        let stmt = CurrentDialect::count_statement(schema.table, &condition);

        let mut query = sqlx::query_scalar::<Db, i64>(&stmt);
        for param in &params {
            query = match param {
                SqlValue::Int(v) => query.bind(*v),
                SqlValue::Text(v) => query.bind(v.clone()),
            };
        }

        let count = query
            .fetch_one(&self.pool)
            .await
            .map_err(query_failed(DbOperation::Count { table: schema.table }, &stmt))?;

        Ok(count.max(0) as u64)
    }

    // ------------------------------------------------------------------
    // Images
    // ------------------------------------------------------------------

    /// Inserts an image; the `id` field of the argument is ignored and the
    /// store-assigned id is returned.
    pub async fn insert_image(&self, image: &Image) -> Result<i64, DatabaseError> {
        let stmt = CurrentDialect::insert_image_statement();

        sqlx::query_scalar::<Db, i64>(&stmt)
            .bind(&image.title)
            .bind(image.payload.as_deref())
            .bind(image.content_type.as_deref())
            .bind(image.question_id)
            .fetch_one(&self.pool)
            .await
            .map_err(query_failed(DbOperation::Insert { table: "images" }, &stmt))
    }

    /// Replaces every scalar column of the stored image. Returns `false`
    /// when no row with that id exists.
    pub async fn update_image(&self, image: &Image) -> Result<bool, DatabaseError> {
        let stmt = CurrentDialect::update_image_statement();

        let result = sqlx::query(&stmt)
            .bind(&image.title)
            .bind(image.payload.as_deref())
            .bind(image.content_type.as_deref())
            .bind(image.question_id)
            .bind(image.id)
            .execute(&self.pool)
            .await
            .map_err(query_failed(
                DbOperation::Update {
                    table: "images",
                    id: image.id,
                },
                &stmt,
            ))?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn get_image(&self, id: i64) -> Result<Option<Image>, DatabaseError> {
        let stmt =
            CurrentDialect::select_by_id_statement(&IMAGE_SCHEMA.select_list(), IMAGE_SCHEMA.table);

        sqlx::query_as::<Db, Image>(&stmt)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(query_failed(
                DbOperation::SelectOne {
                    table: "images",
                    id,
                },
                &stmt,
            ))
    }

    /// Deletes the image if present. Deleting an absent id is a no-op.
    pub async fn delete_image(&self, id: i64) -> Result<(), DatabaseError> {
        let stmt = CurrentDialect::delete_by_id_statement(IMAGE_SCHEMA.table);

        sqlx::query(&stmt)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(query_failed(
                DbOperation::Delete {
                    table: "images",
                    id,
                },
                &stmt,
            ))?;

        Ok(())
    }

    // ------------------------------------------------------------------
    // Questions
    // ------------------------------------------------------------------

    /// Inserts a question together with its options in one transaction; the
    /// `id` field of the argument is ignored and the assigned id returned.
    pub async fn insert_question(&self, question: &Question) -> Result<i64, DatabaseError> {
        let stmt = CurrentDialect::insert_question_statement();
        let option_stmt = CurrentDialect::insert_option_statement();

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DatabaseError::TransactionFailed { source: e })?;

        let id = sqlx::query_scalar::<Db, i64>(&stmt)
            .bind(&question.text)
            .bind(question.correct_option)
            .bind(question.quiz_id)
            .fetch_one(&mut *tx)
            .await
            .map_err(query_failed(DbOperation::Insert { table: "questions" }, &stmt))?;

        for (idx, label) in question.options.iter().enumerate() {
            sqlx::query(&option_stmt)
                .bind(id)
                .bind(idx as i64)
                .bind(label)
                .execute(&mut *tx)
                .await
                .map_err(query_failed(
                    DbOperation::Insert {
                        table: "question_options",
                    },
                    &option_stmt,
                ))?;
        }

        tx.commit()
            .await
            .map_err(|e| DatabaseError::TransactionFailed { source: e })?;

        Ok(id)
    }

    /// Replaces the question row and its whole option list in one
    /// transaction. Returns `false` when no row with that id exists.
    pub async fn update_question(&self, question: &Question) -> Result<bool, DatabaseError> {
        let stmt = CurrentDialect::update_question_statement();
        let delete_stmt = CurrentDialect::delete_options_statement();
        let option_stmt = CurrentDialect::insert_option_statement();

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DatabaseError::TransactionFailed { source: e })?;

        let result = sqlx::query(&stmt)
            .bind(&question.text)
            .bind(question.correct_option)
            .bind(question.quiz_id)
            .bind(question.id)
            .execute(&mut *tx)
            .await
            .map_err(query_failed(
                DbOperation::Update {
                    table: "questions",
                    id: question.id,
                },
                &stmt,
            ))?;

        if result.rows_affected() == 0 {
            return Ok(false);
        }

        sqlx::query(&delete_stmt)
            .bind(question.id)
            .execute(&mut *tx)
            .await
            .map_err(query_failed(
                DbOperation::Delete {
                    table: "question_options",
                    id: question.id,
                },
                &delete_stmt,
            ))?;

        for (idx, label) in question.options.iter().enumerate() {
            sqlx::query(&option_stmt)
                .bind(question.id)
                .bind(idx as i64)
                .bind(label)
                .execute(&mut *tx)
                .await
                .map_err(query_failed(
                    DbOperation::Insert {
                        table: "question_options",
                    },
                    &option_stmt,
                ))?;
        }

        tx.commit()
            .await
            .map_err(|e| DatabaseError::TransactionFailed { source: e })?;

        Ok(true)
    }

    pub async fn get_question(&self, id: i64) -> Result<Option<Question>, DatabaseError> {
        let stmt = CurrentDialect::select_by_id_statement(
            &QUESTION_SCHEMA.select_list(),
            QUESTION_SCHEMA.table,
        );

        let row: Option<QuestionRow> = sqlx::query_as::<Db, QuestionRow>(&stmt)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(query_failed(
                DbOperation::SelectOne {
                    table: "questions",
                    id,
                },
                &stmt,
            ))?;

        match row {
            None => Ok(None),
            Some(row) => {
                let options = self.options_for(row.id).await?;
                Ok(Some(row.into_question(options)))
            }
        }
    }

    /// Fetches one page of questions matching the criteria, options
    /// attached.
    pub async fn find_questions(
        &self,
        criteria: &Criteria,
        page: &PageRequest,
    ) -> Result<Vec<Question>, DatabaseError> {
        let rows: Vec<QuestionRow> = self.find_by_criteria(criteria, page).await?;
        self.attach_options(rows).await
    }

    /// Lists one page of a quiz's questions ordered by id.
    pub async fn questions_by_quiz(
        &self,
        quiz_id: i64,
        limit: u32,
        offset: u64,
    ) -> Result<Vec<Question>, DatabaseError> {
        let stmt = CurrentDialect::questions_by_quiz_statement(&QUESTION_SCHEMA.select_list());

        let rows: Vec<QuestionRow> = sqlx::query_as::<Db, QuestionRow>(&stmt)
            .bind(quiz_id)
            .bind(limit as i64)
            .bind(i64::try_from(offset).unwrap_or(i64::MAX))
            .fetch_all(&self.pool)
            .await
            .map_err(query_failed(DbOperation::Query { table: "questions" }, &stmt))?;

        self.attach_options(rows).await
    }

    /// Deletes the question and its options in one transaction. Deleting an
    /// absent id is a no-op.
    pub async fn delete_question(&self, id: i64) -> Result<(), DatabaseError> {
        let delete_options = CurrentDialect::delete_options_statement();
        let delete_question = CurrentDialect::delete_by_id_statement(QUESTION_SCHEMA.table);

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DatabaseError::TransactionFailed { source: e })?;

        sqlx::query(&delete_options)
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(query_failed(
                DbOperation::Delete {
                    table: "question_options",
                    id,
                },
                &delete_options,
            ))?;

        sqlx::query(&delete_question)
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(query_failed(
                DbOperation::Delete {
                    table: "questions",
                    id,
                },
                &delete_question,
            ))?;

        tx.commit()
            .await
            .map_err(|e| DatabaseError::TransactionFailed { source: e })?;

        Ok(())
    }

    async fn options_for(&self, question_id: i64) -> Result<Vec<String>, DatabaseError> {
        let stmt = CurrentDialect::options_by_question_statement();

        sqlx::query_scalar::<Db, String>(&stmt)
            .bind(question_id)
            .fetch_all(&self.pool)
            .await
            .map_err(query_failed(
                DbOperation::Query {
                    table: "question_options",
                },
                &stmt,
            ))
    }

    async fn attach_options(
        &self,
        rows: Vec<QuestionRow>,
    ) -> Result<Vec<Question>, DatabaseError> {
        let mut questions = Vec::with_capacity(rows.len());
        for row in rows {
            let options = self.options_for(row.id).await?;
            questions.push(row.into_question(options));
        }

        Ok(questions)
    }

    // ------------------------------------------------------------------
    // Quizzes
    // ------------------------------------------------------------------

    /// Inserts a quiz; the `id` field of the argument is ignored and the
    /// store-assigned id is returned.
    pub async fn insert_quiz(&self, quiz: &Quiz) -> Result<i64, DatabaseError> {
        let stmt = CurrentDialect::insert_quiz_statement();

        sqlx::query_scalar::<Db, i64>(&stmt)
            .bind(&quiz.title)
            .bind(quiz.description.as_deref())
            .bind(quiz.created_at.to_rfc3339())
            .fetch_one(&self.pool)
            .await
            .map_err(query_failed(DbOperation::Insert { table: "quizzes" }, &stmt))
    }

    /// Replaces the quiz's mutable columns (`created_at` is write-once).
    /// Returns `false` when no row with that id exists.
    pub async fn update_quiz(&self, quiz: &Quiz) -> Result<bool, DatabaseError> {
        let stmt = CurrentDialect::update_quiz_statement();

        let result = sqlx::query(&stmt)
            .bind(&quiz.title)
            .bind(quiz.description.as_deref())
            .bind(quiz.id)
            .execute(&self.pool)
            .await
            .map_err(query_failed(
                DbOperation::Update {
                    table: "quizzes",
                    id: quiz.id,
                },
                &stmt,
            ))?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn get_quiz(&self, id: i64) -> Result<Option<Quiz>, DatabaseError> {
        let stmt =
            CurrentDialect::select_by_id_statement(&QUIZ_SCHEMA.select_list(), QUIZ_SCHEMA.table);

        sqlx::query_as::<Db, Quiz>(&stmt)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(query_failed(
                DbOperation::SelectOne {
                    table: "quizzes",
                    id,
                },
                &stmt,
            ))
    }

    /// Deletes the quiz if present. Deleting an absent id is a no-op.
    pub async fn delete_quiz(&self, id: i64) -> Result<(), DatabaseError> {
        let stmt = CurrentDialect::delete_by_id_statement(QUIZ_SCHEMA.table);

        sqlx::query(&stmt)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(query_failed(
                DbOperation::Delete {
                    table: "quizzes",
                    id,
                },
                &stmt,
            ))?;

        Ok(())
    }
}

fn query_failed(operation: DbOperation, sql: &str) -> impl FnOnce(sqlx::Error) -> DatabaseError {
    let sql = sql.to_string();
    move |source| DatabaseError::QueryFailed {
        operation,
        sql,
        source,
    }
}

/// Represents errors that can occur during database operations.
///
/// Each variant includes contextual information to assist with debugging and
/// error handling.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// A general SQL query failure, with full context including operation
    /// and SQL.
    #[error("Query failed during {operation:?}: sql={sql}")]
    QueryFailed {
        operation: DbOperation,
        sql: String,
        #[source]
        source: sqlx::Error,
    },

    /// A failure to begin or commit a transaction.
    #[error("Failed to operate transaction")]
    TransactionFailed {
        #[source]
        source: sqlx::Error,
    },
}

/// Enum representing the kind of database operation being performed, used
/// for attaching context to [`DatabaseError::QueryFailed`].
#[derive(Debug)]
pub enum DbOperation {
    Insert { table: &'static str },
    Update { table: &'static str, id: i64 },
    Delete { table: &'static str, id: i64 },
    SelectOne { table: &'static str, id: i64 },
    Query { table: &'static str },
    Count { table: &'static str },
}

#[cfg(test)]
mod tests {
    use super::{Database, Db, Pool, run_migration};
    use crate::{
        criteria::Criteria,
        entity::{IMAGE_SCHEMA, Image, Question, Quiz},
        page::PageRequest,
    };
    use chrono::Utc;

    /// Returns an in-memory SQLite connection pool for testing. A single
    /// connection keeps every query on the same in-memory database.
    async fn get_pool() -> Pool<Db> {
        sqlx::pool::PoolOptions::new()
            .max_connections(1)
            .connect(":memory:")
            .await
            .unwrap()
    }

    fn sample_image(title: &str) -> Image {
        Image {
            id: 0,
            title: title.to_string(),
            payload: Some(vec![0xde, 0xad, 0xbe, 0xef]),
            content_type: Some("image/png".to_string()),
            question_id: None,
        }
    }

    /// Verifies that the migration can be applied multiple times on the
    /// same pool without error.
    #[tokio::test]
    async fn test_migration_idempotency() {
        let pool = get_pool().await;

        run_migration(&pool).await.unwrap();
        run_migration(&pool).await.unwrap();
    }

    #[tokio::test]
    async fn test_image_crud_roundtrip() {
        let pool = get_pool().await;
        let db = Database::with_migration(pool).await.unwrap();

        let mut image = sample_image("cover");
        image.id = db.insert_image(&image).await.unwrap();

        assert_eq!(Some(image.clone()), db.get_image(image.id).await.unwrap());

        image.title = "back cover".to_string();
        image.content_type = None;
        assert!(db.update_image(&image).await.unwrap());
        assert_eq!(Some(image.clone()), db.get_image(image.id).await.unwrap());

        db.delete_image(image.id).await.unwrap();
        assert_eq!(None, db.get_image(image.id).await.unwrap());

        // deleting again is a silent no-op
        db.delete_image(image.id).await.unwrap();
    }

    #[tokio::test]
    async fn test_update_missing_image_touches_nothing() {
        let pool = get_pool().await;
        let db = Database::with_migration(pool).await.unwrap();

        let mut image = sample_image("ghost");
        image.id = 999;

        assert!(!db.update_image(&image).await.unwrap());
    }

    #[tokio::test]
    async fn test_find_by_criteria_contains() {
        let pool = get_pool().await;
        let db = Database::with_migration(pool).await.unwrap();

        for title in ["cover", "back", "discovery"] {
            db.insert_image(&sample_image(title)).await.unwrap();
        }

        let criteria =
            Criteria::from_params(&IMAGE_SCHEMA, vec![("title.contains", "cov")]).unwrap();

        let found: Vec<Image> = db
            .find_by_criteria(&criteria, &PageRequest::default())
            .await
            .unwrap();
        let titles: Vec<&str> = found.iter().map(|i| i.title.as_str()).collect();

        assert_eq!(vec!["cover", "discovery"], titles);
        assert_eq!(2, db.count_by_criteria(&criteria).await.unwrap());
    }

    #[tokio::test]
    async fn test_count_ignores_pagination() {
        let pool = get_pool().await;
        let db = Database::with_migration(pool).await.unwrap();

        for i in 0..5 {
            db.insert_image(&sample_image(&format!("img-{i}")))
                .await
                .unwrap();
        }

        let criteria = Criteria::for_schema(&IMAGE_SCHEMA);
        let page: Vec<Image> = db
            .find_by_criteria(&criteria, &PageRequest::new(0, 2))
            .await
            .unwrap();

        assert_eq!(2, page.len());
        assert_eq!(5, db.count_by_criteria(&criteria).await.unwrap());
    }

    /// Extreme page/size combinations must yield an empty page, never
    /// overflow.
    #[tokio::test]
    async fn test_find_with_extreme_page_returns_empty() {
        let pool = get_pool().await;
        let db = Database::with_migration(pool).await.unwrap();

        db.insert_image(&sample_image("cover")).await.unwrap();

        let criteria = Criteria::for_schema(&IMAGE_SCHEMA);
        let found: Vec<Image> = db
            .find_by_criteria(&criteria, &PageRequest::new(u32::MAX, 2))
            .await
            .unwrap();

        assert!(found.is_empty());
        assert_eq!(1, db.count_by_criteria(&criteria).await.unwrap());
    }

    #[tokio::test]
    async fn test_question_options_roundtrip() {
        let pool = get_pool().await;
        let db = Database::with_migration(pool).await.unwrap();

        let mut question = Question {
            id: 0,
            text: "What is the capital of France?".to_string(),
            options: vec!["Paris".to_string(), "Lyon".to_string()],
            correct_option: Some(0),
            quiz_id: None,
        };
        question.id = db.insert_question(&question).await.unwrap();

        assert_eq!(
            Some(question.clone()),
            db.get_question(question.id).await.unwrap()
        );

        // updating replaces the option list wholesale
        question.options = vec!["Paris".to_string(), "Marseille".to_string(), "Nice".to_string()];
        question.correct_option = Some(0);
        assert!(db.update_question(&question).await.unwrap());
        assert_eq!(
            Some(question.clone()),
            db.get_question(question.id).await.unwrap()
        );

        db.delete_question(question.id).await.unwrap();
        assert_eq!(None, db.get_question(question.id).await.unwrap());
        db.delete_question(question.id).await.unwrap();
    }

    #[tokio::test]
    async fn test_questions_by_quiz_pages_within_one_quiz() {
        let pool = get_pool().await;
        let db = Database::with_migration(pool).await.unwrap();

        let quiz = Quiz {
            id: 0,
            title: "Geography".to_string(),
            description: None,
            created_at: Utc::now(),
        };
        let quiz_id = db.insert_quiz(&quiz).await.unwrap();

        let other = Quiz {
            title: "History".to_string(),
            ..quiz.clone()
        };
        let other_id = db.insert_quiz(&other).await.unwrap();

        for i in 0..15 {
            db.insert_question(&Question {
                id: 0,
                text: format!("question {i}"),
                options: vec![],
                correct_option: None,
                quiz_id: Some(quiz_id),
            })
            .await
            .unwrap();
        }
        for i in 0..3 {
            db.insert_question(&Question {
                id: 0,
                text: format!("other {i}"),
                options: vec![],
                correct_option: None,
                quiz_id: Some(other_id),
            })
            .await
            .unwrap();
        }

        let page = db.questions_by_quiz(quiz_id, 10, 0).await.unwrap();

        assert_eq!(10, page.len());
        assert!(page.iter().all(|q| q.quiz_id == Some(quiz_id)));

        let rest = db.questions_by_quiz(quiz_id, 10, 10).await.unwrap();
        assert_eq!(5, rest.len());
    }

    #[tokio::test]
    async fn test_quiz_roundtrip_preserves_created_at() {
        let pool = get_pool().await;
        let db = Database::with_migration(pool).await.unwrap();

        let mut quiz = Quiz {
            id: 0,
            title: "Geography".to_string(),
            description: Some("capitals and rivers".to_string()),
            created_at: Utc::now(),
        };
        quiz.id = db.insert_quiz(&quiz).await.unwrap();

        assert_eq!(Some(quiz.clone()), db.get_quiz(quiz.id).await.unwrap());

        quiz.title = "World geography".to_string();
        assert!(db.update_quiz(&quiz).await.unwrap());
        assert_eq!(Some(quiz.clone()), db.get_quiz(quiz.id).await.unwrap());

        db.delete_quiz(quiz.id).await.unwrap();
        assert_eq!(None, db.get_quiz(quiz.id).await.unwrap());
    }
}
