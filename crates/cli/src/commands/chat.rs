use anyhow::{Result, bail};
use clap::Subcommand;
use legalguard_core::{ChatMessage, ChatRole};
use legalguard_service::ChatSaveOutcome;

use super::cases::{format_timestamp, load_history};
use super::print_json;
use crate::app::App;

#[derive(Subcommand)]
pub(crate) enum ChatAction {
    /// Print the active transcript.
    Show,
    /// Discard the active transcript.
    New,
    /// Save the active transcript as a chat session.
    Save,
    /// Continue a saved chat session.
    Open { id: String },
}

fn print_transcript(messages: &[ChatMessage]) {
    if messages.is_empty() {
        println!("No messages yet. Ask a question with `legalguard ask`.");
        return;
    }
    for message in messages {
        let speaker = match message.role {
            ChatRole::User => "You",
            ChatRole::Assistant => "LegalGuard",
        };
        println!("{speaker} [{}]: {}", format_timestamp(message.timestamp), message.text);
    }
}

pub(crate) async fn run_ask(app: &App, question: &str, json: bool) -> Result<()> {
    let answer = app.chat_service().ask(question).await?;
    if json {
        return print_json(&answer);
    }
    println!("{}", answer.text);
    Ok(())
}

pub(crate) async fn run_chat(app: &App, action: ChatAction, json: bool) -> Result<()> {
    let chat = app.chat_service();
    match action {
        ChatAction::Show => {
            let messages = chat.messages().await;
            if json {
                return print_json(&messages);
            }
            print_transcript(&messages);
        },
        ChatAction::New => {
            chat.new_chat().await?;
            println!("Started a new chat.");
        },
        ChatAction::Save => {
            let outcome = chat.save_session().await?;
            if json {
                print_json(&outcome)?;
            }
            if let ChatSaveOutcome::Failed(_) = outcome {
                bail!("{outcome}");
            }
            if !json {
                println!("{outcome}");
            }
        },
        ChatAction::Open { id } => {
            if load_history(app).await.is_none() {
                bail!("history load cancelled");
            }
            let Some(item) = app.history.find_chat_session(&id).await else {
                bail!("no chat session with id {id}");
            };
            chat.open_session(&item.record).await?;
            if json {
                return print_json(&item);
            }
            println!("Opened \"{}\" ({} chat)", item.record.title, item.origin.as_str());
            print_transcript(&item.record.messages);
        },
    }
    Ok(())
}
