mod error;
mod image;
mod pagination;
mod question;
mod quiz;


use axum::{
    Router,
    routing::{delete, get, post},
};
use quizbank::database::{Database, Db, Pool};
use sqlx::migrate::MigrateDatabase;

#[derive(Clone)]
pub struct AppState {
    pub db: Database,
}

fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/images",
            post(image::create_image).get(image::get_all_images),
        )
        .route("/api/images/count", get(image::count_images))
        .route(
            "/api/images/{id}",
            get(image::get_image)
                .put(image::update_image)
                .patch(image::patch_image)
                .delete(image::delete_image),
        )
        .route(
            "/api/questions",
            post(question::create_question).get(question::get_all_questions),
        )
        .route("/api/questions/count", get(question::count_questions))
        .route(
            "/api/questions/{id}",
            get(question::get_question)
                .put(question::update_question)
                .patch(question::patch_question)
                .delete(question::delete_question),
        )
        .route(
            "/api/quizzes",
            post(quiz::create_quiz).get(quiz::get_all_quizzes),
        )
        .route("/api/quizzes/count", get(quiz::count_quizzes))
        .route(
            "/api/quizzes/{id}",
            get(quiz::get_quiz)
                .put(quiz::update_quiz)
                .patch(quiz::patch_quiz)
                .delete(quiz::delete_quiz),
        )
        .route("/api/getlistquestion", get(question::legacy_list_questions))
        .route("/api/getquestion/{qid}", get(question::legacy_get_question))
        .route("/api/addquestion", post(question::legacy_add_question))
        .route("/api/editquestion", post(question::legacy_edit_question))
        .route(
            "/api/deletequestion/{qid}",
            delete(question::legacy_delete_question),
        )
        .with_state(state)
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let url = std::env::var("DATABASE_URL")
        .unwrap_or_else(|_| "sqlite:./db/quizbank.db".to_string());

    if !Db::database_exists(&url).await.unwrap_or(false) {
        Db::create_database(&url).await.unwrap();
    }

    let db = Database::with_migration(Pool::connect(&url).await.unwrap())
        .await
        .unwrap();

    let app = router(AppState { db });

    let addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
    tracing::info!("listening on {addr}");
    axum::serve(listener, app).await.unwrap();
}
