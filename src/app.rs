//! Service layer for the quiz-practice entities.
//!
//! Thin orchestration over [`Database`]: save, update, partial update, find
//! and delete per entity, plus the criteria-driven page queries. Services are
//! free async functions and hold no state between calls; absence is reported
//! as `None` except for `update_*`, where a missing target is an error the
//! caller must see.
//!
//! Partial updates merge field by field: a field carried by the patch
//! overwrites the stored value, a field left out keeps it. They never replace
//! the whole record.

use crate::{
    criteria::Criteria,
    database::{Database, DatabaseError},
    entity::{
        Image, ImageInput, ImagePatch, Question, QuestionInput, QuestionPatch, Quiz, QuizInput,
        QuizPatch,
    },
    page::{Page, PageRequest},
};
use chrono::Utc;

/// Error types within the application.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("database error: {0}")]
    Database(#[from] DatabaseError),

    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    #[error("validation failed: {0}")]
    Validation(String),
}

fn validate_not_blank(field: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{field} must not be blank")));
    }

    Ok(())
}

// ----------------------------------------------------------------------
// Images
// ----------------------------------------------------------------------

/// Saves a new image and returns it with its store-assigned id.
pub async fn save_image(db: &Database, input: ImageInput) -> Result<Image, AppError> {
    validate_not_blank("title", &input.title)?;

    let mut image = Image {
        id: 0,
        title: input.title,
        payload: input.payload,
        content_type: input.content_type,
        question_id: input.question_id,
    };
    image.id = db.insert_image(&image).await?;

    Ok(image)
}

/// Replaces the stored image with the given id. Fails with
/// [`AppError::NotFound`] when the id is absent from the store.
pub async fn update_image(db: &Database, id: i64, input: ImageInput) -> Result<Image, AppError> {
    validate_not_blank("title", &input.title)?;

    let image = Image {
        id,
        title: input.title,
        payload: input.payload,
        content_type: input.content_type,
        question_id: input.question_id,
    };

    if db.update_image(&image).await? {
        Ok(image)
    } else {
        Err(AppError::NotFound { entity: "image", id })
    }
}

/// Merges the patch onto the stored image, returning `None` when the target
/// does not exist.
pub async fn partial_update_image(
    db: &Database,
    id: i64,
    patch: ImagePatch,
) -> Result<Option<Image>, AppError> {
    let Some(mut image) = db.get_image(id).await? else {
        return Ok(None);
    };

    if let Some(title) = patch.title {
        image.title = title;
    }
    if let Some(payload) = patch.payload {
        image.payload = Some(payload);
    }
    if let Some(content_type) = patch.content_type {
        image.content_type = Some(content_type);
    }
    if let Some(question_id) = patch.question_id {
        image.question_id = Some(question_id);
    }

    validate_not_blank("title", &image.title)?;
    db.update_image(&image).await?;

    Ok(Some(image))
}

pub async fn find_image(db: &Database, id: i64) -> Result<Option<Image>, AppError> {
    Ok(db.get_image(id).await?)
}

/// Fetches one page of images matching the criteria, together with the total
/// match count.
pub async fn find_images(
    db: &Database,
    criteria: &Criteria,
    page: &PageRequest,
) -> Result<Page<Image>, AppError> {
    let total = db.count_by_criteria(criteria).await?;
    let items = db.find_by_criteria(criteria, page).await?;

    Ok(Page {
        items,
        page: page.page,
        size: page.size,
        total,
    })
}

pub async fn count_images(db: &Database, criteria: &Criteria) -> Result<u64, AppError> {
    Ok(db.count_by_criteria(criteria).await?)
}

/// Deletes the image. Deleting an absent id succeeds as a no-op.
pub async fn delete_image(db: &Database, id: i64) -> Result<(), AppError> {
    Ok(db.delete_image(id).await?)
}

// ----------------------------------------------------------------------
// Questions
// ----------------------------------------------------------------------

/// Saves a new question with its options and returns it with its
/// store-assigned id.
pub async fn save_question(db: &Database, input: QuestionInput) -> Result<Question, AppError> {
    validate_not_blank("text", &input.text)?;

    let mut question = Question {
        id: 0,
        text: input.text,
        options: input.options,
        correct_option: input.correct_option,
        quiz_id: input.quiz_id,
    };
    question.id = db.insert_question(&question).await?;

    Ok(question)
}

/// Replaces the stored question (including its option list). Fails with
/// [`AppError::NotFound`] when the id is absent from the store.
pub async fn update_question(
    db: &Database,
    id: i64,
    input: QuestionInput,
) -> Result<Question, AppError> {
    validate_not_blank("text", &input.text)?;

    let question = Question {
        id,
        text: input.text,
        options: input.options,
        correct_option: input.correct_option,
        quiz_id: input.quiz_id,
    };

    if db.update_question(&question).await? {
        Ok(question)
    } else {
        Err(AppError::NotFound {
            entity: "question",
            id,
        })
    }
}

/// Merges the patch onto the stored question. A present `options` list
/// replaces the stored list wholesale; an absent one keeps it.
pub async fn partial_update_question(
    db: &Database,
    id: i64,
    patch: QuestionPatch,
) -> Result<Option<Question>, AppError> {
    let Some(mut question) = db.get_question(id).await? else {
        return Ok(None);
    };

    if let Some(text) = patch.text {
        question.text = text;
    }
    if let Some(options) = patch.options {
        question.options = options;
    }
    if let Some(correct_option) = patch.correct_option {
        question.correct_option = Some(correct_option);
    }
    if let Some(quiz_id) = patch.quiz_id {
        question.quiz_id = Some(quiz_id);
    }

    validate_not_blank("text", &question.text)?;
    db.update_question(&question).await?;

    Ok(Some(question))
}

pub async fn find_question(db: &Database, id: i64) -> Result<Option<Question>, AppError> {
    Ok(db.get_question(id).await?)
}

/// Fetches one page of questions matching the criteria, together with the
/// total match count.
pub async fn find_questions(
    db: &Database,
    criteria: &Criteria,
    page: &PageRequest,
) -> Result<Page<Question>, AppError> {
    let total = db.count_by_criteria(criteria).await?;
    let items = db.find_questions(criteria, page).await?;

    Ok(Page {
        items,
        page: page.page,
        size: page.size,
        total,
    })
}

pub async fn count_questions(db: &Database, criteria: &Criteria) -> Result<u64, AppError> {
    Ok(db.count_by_criteria(criteria).await?)
}

/// Lists one page of a quiz's questions; `index` is the zero-based page
/// number of the legacy listing endpoint.
pub async fn list_questions(
    db: &Database,
    quiz_id: i64,
    index: u32,
    page_size: u32,
) -> Result<Vec<Question>, AppError> {
    Ok(db
        .questions_by_quiz(quiz_id, page_size, index as u64 * page_size as u64)
        .await?)
}

/// Deletes the question and its options. Deleting an absent id succeeds as
/// a no-op.
pub async fn delete_question(db: &Database, id: i64) -> Result<(), AppError> {
    Ok(db.delete_question(id).await?)
}

// ----------------------------------------------------------------------
// Quizzes
// ----------------------------------------------------------------------

/// Saves a new quiz, stamping its creation time, and returns it with its
/// store-assigned id.
pub async fn save_quiz(db: &Database, input: QuizInput) -> Result<Quiz, AppError> {
    validate_not_blank("title", &input.title)?;

    let mut quiz = Quiz {
        id: 0,
        title: input.title,
        description: input.description,
        created_at: Utc::now(),
    };
    quiz.id = db.insert_quiz(&quiz).await?;

    Ok(quiz)
}

/// Replaces the stored quiz's title and description. Fails with
/// [`AppError::NotFound`] when the id is absent from the store.
pub async fn update_quiz(db: &Database, id: i64, input: QuizInput) -> Result<Quiz, AppError> {
    validate_not_blank("title", &input.title)?;

    let Some(mut quiz) = db.get_quiz(id).await? else {
        return Err(AppError::NotFound { entity: "quiz", id });
    };

    quiz.title = input.title;
    quiz.description = input.description;
    db.update_quiz(&quiz).await?;

    Ok(quiz)
}

/// Merges the patch onto the stored quiz, returning `None` when the target
/// does not exist.
pub async fn partial_update_quiz(
    db: &Database,
    id: i64,
    patch: QuizPatch,
) -> Result<Option<Quiz>, AppError> {
    let Some(mut quiz) = db.get_quiz(id).await? else {
        return Ok(None);
    };

    if let Some(title) = patch.title {
        quiz.title = title;
    }
    if let Some(description) = patch.description {
        quiz.description = Some(description);
    }

    validate_not_blank("title", &quiz.title)?;
    db.update_quiz(&quiz).await?;

    Ok(Some(quiz))
}

pub async fn find_quiz(db: &Database, id: i64) -> Result<Option<Quiz>, AppError> {
    Ok(db.get_quiz(id).await?)
}

/// Fetches one page of quizzes matching the criteria, together with the
/// total match count.
pub async fn find_quizzes(
    db: &Database,
    criteria: &Criteria,
    page: &PageRequest,
) -> Result<Page<Quiz>, AppError> {
    let total = db.count_by_criteria(criteria).await?;
    let items = db.find_by_criteria(criteria, page).await?;

    Ok(Page {
        items,
        page: page.page,
        size: page.size,
        total,
    })
}

pub async fn count_quizzes(db: &Database, criteria: &Criteria) -> Result<u64, AppError> {
    Ok(db.count_by_criteria(criteria).await?)
}

/// Deletes the quiz. Deleting an absent id succeeds as a no-op.
pub async fn delete_quiz(db: &Database, id: i64) -> Result<(), AppError> {
    Ok(db.delete_quiz(id).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        database::{Database, Db, Pool},
        entity::{IMAGE_SCHEMA, QUESTION_SCHEMA},
    };

    async fn get_db() -> Database {
        let pool: Pool<Db> = sqlx::pool::PoolOptions::new()
            .max_connections(1)
            .connect(":memory:")
            .await
            .unwrap();

        Database::with_migration(pool).await.unwrap()
    }

    fn image_input(title: &str) -> ImageInput {
        ImageInput {
            id: None,
            title: title.to_string(),
            payload: Some(vec![1, 2, 3]),
            content_type: Some("image/png".to_string()),
            question_id: None,
        }
    }

    #[tokio::test]
    async fn test_save_then_find_roundtrip() {
        let db = get_db().await;

        let saved = save_image(&db, image_input("cover")).await.unwrap();
        let found = find_image(&db, saved.id).await.unwrap();

        assert_eq!(Some(saved), found);
    }

    #[tokio::test]
    async fn test_blank_title_is_rejected() {
        let db = get_db().await;

        let result = save_image(&db, image_input("   ")).await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    /// Every field set in the patch takes the patch's value; every field
    /// left out keeps the stored value.
    #[tokio::test]
    async fn test_partial_update_merges_field_by_field() {
        let db = get_db().await;
        let saved = save_image(&db, image_input("cover")).await.unwrap();

        let merged = partial_update_image(
            &db,
            saved.id,
            ImagePatch {
                title: Some("front cover".to_string()),
                ..ImagePatch::default()
            },
        )
        .await
        .unwrap()
        .unwrap();

        assert_eq!("front cover", merged.title);
        assert_eq!(saved.payload, merged.payload);
        assert_eq!(saved.content_type, merged.content_type);
        assert_eq!(saved.question_id, merged.question_id);

        let merged = partial_update_image(
            &db,
            saved.id,
            ImagePatch {
                question_id: Some(42),
                ..ImagePatch::default()
            },
        )
        .await
        .unwrap()
        .unwrap();

        assert_eq!("front cover", merged.title);
        assert_eq!(Some(42), merged.question_id);
    }

    #[tokio::test]
    async fn test_partial_update_of_absent_target_is_none() {
        let db = get_db().await;

        let result = partial_update_image(&db, 999, ImagePatch::default())
            .await
            .unwrap();

        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_update_of_absent_target_is_an_error() {
        let db = get_db().await;

        let result = update_image(&db, 999, image_input("cover")).await;

        assert!(matches!(
            result,
            Err(AppError::NotFound {
                entity: "image",
                id: 999
            })
        ));
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let db = get_db().await;
        let saved = save_image(&db, image_input("cover")).await.unwrap();

        delete_image(&db, saved.id).await.unwrap();
        delete_image(&db, saved.id).await.unwrap();

        assert!(find_image(&db, saved.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_find_images_page_respects_size_and_total() {
        let db = get_db().await;

        for i in 0..5 {
            save_image(&db, image_input(&format!("img-{i}"))).await.unwrap();
        }

        let criteria = Criteria::for_schema(&IMAGE_SCHEMA);
        let page = find_images(&db, &criteria, &PageRequest::new(1, 2))
            .await
            .unwrap();

        assert_eq!(2, page.items.len());
        assert_eq!(5, page.total);
        assert_eq!(3, page.total_pages());
        assert!(page.has_next());
    }

    #[tokio::test]
    async fn test_question_criteria_by_quiz() {
        let db = get_db().await;

        let quiz = save_quiz(
            &db,
            QuizInput {
                id: None,
                title: "Geography".to_string(),
                description: None,
            },
        )
        .await
        .unwrap();

        for i in 0..3 {
            save_question(
                &db,
                QuestionInput {
                    id: None,
                    text: format!("q{i}"),
                    options: vec!["a".to_string(), "b".to_string()],
                    correct_option: Some(0),
                    quiz_id: Some(quiz.id),
                },
            )
            .await
            .unwrap();
        }
        save_question(
            &db,
            QuestionInput {
                id: None,
                text: "stray".to_string(),
                options: vec![],
                correct_option: None,
                quiz_id: None,
            },
        )
        .await
        .unwrap();

        let quiz_id = quiz.id.to_string();
        let criteria = Criteria::from_params(
            &QUESTION_SCHEMA,
            vec![("quiz_id.equals", quiz_id.as_str())],
        )
        .unwrap();

        let page = find_questions(&db, &criteria, &PageRequest::default())
            .await
            .unwrap();

        assert_eq!(3, page.items.len());
        assert_eq!(3, page.total);
        assert!(page.items.iter().all(|q| q.quiz_id == Some(quiz.id)));
        assert_eq!(3, count_questions(&db, &criteria).await.unwrap());
    }

    /// Fifteen questions for one quiz, pages of ten: the first page holds
    /// exactly ten questions, all belonging to that quiz.
    #[tokio::test]
    async fn test_list_questions_scenario() {
        let db = get_db().await;

        let quiz = save_quiz(
            &db,
            QuizInput {
                id: None,
                title: "Q1".to_string(),
                description: None,
            },
        )
        .await
        .unwrap();

        for i in 0..15 {
            save_question(
                &db,
                QuestionInput {
                    id: None,
                    text: format!("q{i}"),
                    options: vec![],
                    correct_option: None,
                    quiz_id: Some(quiz.id),
                },
            )
            .await
            .unwrap();
        }

        let first = list_questions(&db, quiz.id, 0, 10).await.unwrap();
        assert_eq!(10, first.len());
        assert!(first.iter().all(|q| q.quiz_id == Some(quiz.id)));

        let second = list_questions(&db, quiz.id, 1, 10).await.unwrap();
        assert_eq!(5, second.len());
    }

    #[tokio::test]
    async fn test_quiz_partial_update() {
        let db = get_db().await;

        let quiz = save_quiz(
            &db,
            QuizInput {
                id: None,
                title: "Geography".to_string(),
                description: Some("rivers".to_string()),
            },
        )
        .await
        .unwrap();

        let merged = partial_update_quiz(
            &db,
            quiz.id,
            QuizPatch {
                description: Some("rivers and capitals".to_string()),
                ..QuizPatch::default()
            },
        )
        .await
        .unwrap()
        .unwrap();

        assert_eq!("Geography", merged.title);
        assert_eq!(Some("rivers and capitals".to_string()), merged.description);
        assert_eq!(quiz.created_at, merged.created_at);
    }
}
