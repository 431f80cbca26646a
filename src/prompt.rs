use async_trait::async_trait;
use tokio::io::AsyncWriteExt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Question {
    Token,
    ProjectName,
    ProjectLink,
}

impl Question {
    pub fn text(self) -> &'static str {
        match self {
            Self::Token => "Entre ton token GitHub",
            Self::ProjectName => "Nom du projet :",
            Self::ProjectLink => "Lien du projet :",
        }
    }
}

/// Source of interactive answers. `None` means the user cancelled.
#[async_trait]
pub trait Prompt: Send + Sync {
    async fn ask(&self, question: Question, current: Option<&str>) -> Option<String>;
}

/// Answers known up front: form fields, command-line arguments, tests.
#[derive(Debug, Clone, Default)]
pub struct PresetPrompt {
    pub token: Option<String>,
    pub value: Option<String>,
}

impl PresetPrompt {
    pub fn with_value(value: Option<String>) -> Self {
        Self { token: None, value }
    }
}

#[async_trait]
impl Prompt for PresetPrompt {
    async fn ask(&self, question: Question, _current: Option<&str>) -> Option<String> {
        match question {
            Question::Token => self.token.clone(),
            Question::ProjectName | Question::ProjectLink => self.value.clone(),
        }
    }
}

/// Reads one line from stdin. An empty line or EOF counts as a cancel.
pub struct StdinPrompt;

#[async_trait]
impl Prompt for StdinPrompt {
    async fn ask(&self, question: Question, current: Option<&str>) -> Option<String> {
        let mut stdout = tokio::io::stdout();
        let label = match current {
            Some(current) if !current.is_empty() => format!("{} [{current}] ", question.text()),
            _ => format!("{} ", question.text()),
        };
        stdout.write_all(label.as_bytes()).await.ok()?;
        stdout.flush().await.ok()?;

        // Shared std buffer, so piped answers survive across prompts.
        let line = tokio::task::spawn_blocking(|| {
            let mut line = String::new();
            std::io::stdin().read_line(&mut line).map(|_| line)
        })
        .await
        .ok()?
        .ok()?;
        let answer = line.trim();
        (!answer.is_empty()).then(|| answer.to_string())
    }
}
