//! Entity records and their column schemas.
//!
//! Each persisted entity declares a static [`Schema`] listing its table and
//! typed columns. The criteria and page modules validate field names against
//! these schemas, so a filter or sort spec over an unknown column is rejected
//! before any SQL is built.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The SQL-level type of a column, used to parse and bind filter values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// 64-bit integer column (ids, foreign keys, indexes).
    Integer,

    /// Text column. RFC 3339 timestamps are stored as text and compare
    /// lexically.
    Text,

    /// Binary column. Only presence checks (`specified`) are meaningful.
    Bytes,
}

/// A single typed column of an entity table.
#[derive(Debug, Clone, Copy)]
pub struct Column {
    pub name: &'static str,
    pub kind: ColumnKind,
}

/// Static description of an entity table used for criteria validation and
/// SELECT list generation.
#[derive(Debug)]
pub struct Schema {
    pub table: &'static str,
    pub columns: &'static [Column],
}

impl Schema {
    /// Looks up a column by name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Returns the comma-separated SELECT list for this table.
    pub fn select_list(&self) -> String {
        self.columns
            .iter()
            .map(|c| c.name)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

pub const IMAGE_SCHEMA: Schema = Schema {
    table: "images",
    columns: &[
        Column { name: "id", kind: ColumnKind::Integer },
        Column { name: "title", kind: ColumnKind::Text },
        Column { name: "payload", kind: ColumnKind::Bytes },
        Column { name: "content_type", kind: ColumnKind::Text },
        Column { name: "question_id", kind: ColumnKind::Integer },
    ],
};

pub const QUESTION_SCHEMA: Schema = Schema {
    table: "questions",
    columns: &[
        Column { name: "id", kind: ColumnKind::Integer },
        Column { name: "text", kind: ColumnKind::Text },
        Column { name: "correct_option", kind: ColumnKind::Integer },
        Column { name: "quiz_id", kind: ColumnKind::Integer },
    ],
};

pub const QUIZ_SCHEMA: Schema = Schema {
    table: "quizzes",
    columns: &[
        Column { name: "id", kind: ColumnKind::Integer },
        Column { name: "title", kind: ColumnKind::Text },
        Column { name: "description", kind: ColumnKind::Text },
        Column { name: "created_at", kind: ColumnKind::Text },
    ],
};

/// A stored image attached to a question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Image {
    pub id: i64,
    pub title: String,
    pub payload: Option<Vec<u8>>,
    pub content_type: Option<String>,
    pub question_id: Option<i64>,
}

/// Request body for creating or replacing an image. The id, when present,
/// must match the path id on update and must be absent on create.
#[derive(Debug, Clone, Deserialize)]
pub struct ImageInput {
    #[serde(default)]
    pub id: Option<i64>,
    pub title: String,
    #[serde(default)]
    pub payload: Option<Vec<u8>>,
    #[serde(default)]
    pub content_type: Option<String>,
    #[serde(default)]
    pub question_id: Option<i64>,
}

/// Merge patch for an image. Fields left out (or null) keep the stored value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImagePatch {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub payload: Option<Vec<u8>>,
    #[serde(default)]
    pub content_type: Option<String>,
    #[serde(default)]
    pub question_id: Option<i64>,
}

/// A quiz question with its ordered answer options.
///
/// Options live in the `question_options` child table; `correct_option` is an
/// index into `options`. The quiz relation is a plain foreign-key id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: i64,
    pub text: String,
    pub options: Vec<String>,
    pub correct_option: Option<i64>,
    pub quiz_id: Option<i64>,
}

/// Request body for creating or replacing a question.
#[derive(Debug, Clone, Deserialize)]
pub struct QuestionInput {
    #[serde(default)]
    pub id: Option<i64>,
    pub text: String,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default)]
    pub correct_option: Option<i64>,
    #[serde(default)]
    pub quiz_id: Option<i64>,
}

/// Merge patch for a question. A present `options` list replaces the stored
/// list wholesale.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuestionPatch {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub options: Option<Vec<String>>,
    #[serde(default)]
    pub correct_option: Option<i64>,
    #[serde(default)]
    pub quiz_id: Option<i64>,
}

/// A quiz. Its questions are reached through `questions.quiz_id`, not
/// embedded here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quiz {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Request body for creating or replacing a quiz.
#[derive(Debug, Clone, Deserialize)]
pub struct QuizInput {
    #[serde(default)]
    pub id: Option<i64>,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Merge patch for a quiz.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuizPatch {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_lookup() {
        assert!(IMAGE_SCHEMA.column("title").is_some());
        assert!(IMAGE_SCHEMA.column("no_such_column").is_none());
        assert_eq!(
            ColumnKind::Integer,
            QUESTION_SCHEMA.column("quiz_id").unwrap().kind
        );
    }

    #[test]
    fn select_list_matches_declaration_order() {
        assert_eq!(
            "id, title, payload, content_type, question_id",
            IMAGE_SCHEMA.select_list()
        );
    }
}
