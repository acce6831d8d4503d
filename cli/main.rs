use clap::{Parser, Subcommand};
use quizbank::{
    app::{self, AppError},
    database::{Database, Pool},
    entity::{QuestionInput, QuizInput},
};

#[derive(Parser)]
#[command(name = "quizbank")]
#[command(about = "Quiz-practice backend CLI", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    CreateQuiz {
        #[arg(help = "Quiz title")]
        title: String,

        #[arg(short, long, help = "Quiz description")]
        description: Option<String>,
    },

    AddQuestion {
        #[arg(help = "Id of the quiz the question belongs to")]
        quiz_id: i64,

        #[arg(help = "Question text")]
        text: String,

        #[arg(short, long, help = "Answer option (repeatable, in order)")]
        option: Vec<String>,

        #[arg(short, long, help = "Zero-based index of the correct option")]
        correct: Option<i64>,
    },

    ListQuestions {
        #[arg(help = "Id of the quiz to list")]
        quiz_id: i64,

        #[arg(short, long, default_value_t = 0, help = "Zero-based page number")]
        page: u32,

        #[arg(short, long, default_value_t = 20, help = "Questions per page")]
        size: u32,
    },
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let url = std::env::var("DATABASE_URL")
        .unwrap_or_else(|_| "sqlite:./db/quizbank.db".to_string());
    let db = Database::with_migration(Pool::connect(&url).await.unwrap())
        .await
        .unwrap();

    match cli.command {
        Commands::CreateQuiz { title, description } => {
            let input = QuizInput {
                id: None,
                title,
                description,
            };
            let quiz = app::save_quiz(&db, input).await?;

            println!("✅ Created quiz {}: {}", quiz.id, quiz.title);
        }
        Commands::AddQuestion {
            quiz_id,
            text,
            option,
            correct,
        } => {
            let input = QuestionInput {
                id: None,
                text,
                options: option,
                correct_option: correct,
                quiz_id: Some(quiz_id),
            };
            let question = app::save_question(&db, input).await?;

            println!("✅ Added question {} to quiz {}", question.id, quiz_id);
        }
        Commands::ListQuestions { quiz_id, page, size } => {
            let questions = app::list_questions(&db, quiz_id, page, size).await?;

            for question in questions {
                println!("{:>6}  {}", question.id, question.text);
            }
        }
    }

    Ok(())
}
