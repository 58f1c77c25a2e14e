use clap::Subcommand;
use studygram_core::assistant::{GeminiClient, StudyAssistant, DEFAULT_CHAT_CONTEXT};
use studygram_core::Config;

#[derive(Subcommand)]
pub enum AssistantAction {
    /// Ask for a short study tip
    Tip {
        /// Subject (defaults to general learning)
        #[arg(default_value = "")]
        subject: String,
    },
    /// Rewrite a post caption
    Caption {
        #[arg(long)]
        subject: String,
        /// Caption text to rewrite
        text: String,
    },
    /// Ask the study assistant a question
    Ask {
        /// Context the assistant should stay within
        #[arg(long)]
        context: Option<String>,
        question: String,
    },
}

pub async fn run(action: AssistantAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let client = GeminiClient::from_config(&config.assistant)?;
    let assistant = StudyAssistant::new(client, &config.assistant);

    match action {
        AssistantAction::Tip { subject } => {
            println!("{}", assistant.study_tip(&subject).await);
        }
        AssistantAction::Caption { subject, text } => {
            println!("{}", assistant.smart_caption(&subject, &text).await);
        }
        AssistantAction::Ask { context, question } => {
            let context = context.as_deref().unwrap_or(DEFAULT_CHAT_CONTEXT);
            println!("{}", assistant.ask(context, &question, &[]).await);
        }
    }
    Ok(())
}
