use async_trait::async_trait;
use clap::{Parser, Subcommand};
use compteur_tricot::{
    counter::Outcome,
    mutator::Delta,
    prompt::{Prompt, Question, StdinPrompt},
    router, AppState, Config, Counter, View,
};
use std::net::SocketAddr;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "compteur-tricot")]
#[command(about = "Knitting row counter stored in a GitHub repository")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the counter page (default)
    Serve,
    /// Print the current state
    Show,
    /// Add one row
    Plus,
    /// Remove one row
    Minus,
    /// Set the counter back to zero
    Reset,
    /// Rename the project; asks interactively when NAME is omitted
    Rename { name: Option<String> },
    /// Change the project link; asks interactively when URL is omitted
    Relink { url: Option<String> },
    /// Store a GitHub token; asks interactively when TOKEN is omitted
    Login { token: Option<String> },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?;
    let counter = Counter::from_config(&config)?;
    counter.restore_token().await;

    let mut view = View::full();
    let outcome = match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => return serve(counter, config.port).await,
        Command::Show => {
            if counter.load(&mut view).await.is_none() {
                return Err("failed to load data.json".into());
            }
            print!("{view}");
            return Ok(());
        }
        Command::Plus => counter.update_count(Delta::Plus, &StdinPrompt, &mut view).await?,
        Command::Minus => counter.update_count(Delta::Minus, &StdinPrompt, &mut view).await?,
        Command::Reset => counter.reset_count(&StdinPrompt, &mut view).await?,
        Command::Rename { name } => {
            counter
                .edit_project_name(&ArgPrompt(name), &mut view)
                .await?
        }
        Command::Relink { url } => {
            counter
                .edit_project_link(&ArgPrompt(url), &mut view)
                .await?
        }
        Command::Login { token } => {
            let token = match token {
                Some(token) => Some(token),
                None => StdinPrompt.ask(Question::Token, None).await,
            };
            counter.login(token.as_deref().unwrap_or_default()).await?;
            println!("Token enregistré.");
            return Ok(());
        }
    };

    match outcome {
        Outcome::Saved(_) => print!("{view}"),
        Outcome::Unchanged => println!("Aucun changement."),
        Outcome::Skipped => return Err("failed to load data.json".into()),
    }
    Ok(())
}

/// Answers edits from the command-line argument when one was given; the
/// token and any missing value are asked on stdin.
struct ArgPrompt(Option<String>);

#[async_trait]
impl Prompt for ArgPrompt {
    async fn ask(&self, question: Question, current: Option<&str>) -> Option<String> {
        match (question, &self.0) {
            (Question::ProjectName | Question::ProjectLink, Some(value)) => Some(value.clone()),
            _ => StdinPrompt.ask(question, current).await,
        }
    }
}

async fn serve(counter: Counter, port: u16) -> Result<(), Box<dyn std::error::Error>> {
    let app = router(AppState::new(counter));
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
