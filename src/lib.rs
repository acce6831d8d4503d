//! # Quiz Practice Backend
//!
//! This crate provides the storage and query core of a quiz-practice service:
//! quizzes, the questions that belong to them, and the images illustrating
//! those questions. Records are kept in an SQL database and looked up through
//! typed, field-validated filter criteria.
//!
//! ## Features
//!
//! - **Entity CRUD**: Save, replace, merge-patch and delete quizzes,
//!   questions and images through the service functions in [`app`].
//! - **Criteria Queries**: Translate `field.operator=value` query parameters
//!   into parameterized SQL predicates, validated against the entity schema
//!   before any SQL is built.
//! - **Pagination**: Page, size and sort handling with stable ordering and
//!   exact total counts.
//! - **Dialect Abstraction**: The same statements run against SQLite or
//!   PostgreSQL, selected by cargo feature.
//!
//! ## Usage
//!
//! The service functions in [`app`] are the main entry point. They operate on
//! a [`database::Database`] handle and return plain entity values.
//!
//! ```no_run
//! use quizbank::app;
//! use quizbank::database::Database;
//! use quizbank::entity::QuizInput;
//!
//! async fn create_quiz(db: &Database) {
//!     let input = QuizInput {
//!         id: None,
//!         title: "European capitals".to_string(),
//!         description: Some("one question per country".to_string()),
//!     };
//!
//!     match app::save_quiz(db, input).await {
//!         Ok(quiz) => println!("created quiz {}", quiz.id),
//!         Err(error) => eprintln!("failed to create quiz: {error}"),
//!     }
//! }
//! ```
//!

pub mod app;
pub mod criteria;
pub mod database;
mod dialect;
pub mod entity;
pub mod page;
