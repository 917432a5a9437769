/// Interactive assistant session over the current project list
use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};

use folio_ai::{portfolio_context, ChatSession, GoogleGenAiProvider, DEFAULT_MODEL, WELCOME_MESSAGE};
use folio_sync::ReadMode;

use super::helpers::open_reconciler;

pub async fn handle_chat(model: Option<&str>) -> Result<()> {
    let api_key = std::env::var("GEMINI_API_KEY")
        .context("GEMINI_API_KEY is not set; the assistant needs a Google AI key")?;

    let reconciler = open_reconciler()?;
    let projects = reconciler.get_projects(ReadMode::RemoteFirst).await;

    let provider = GoogleGenAiProvider::new(&api_key, model.unwrap_or(DEFAULT_MODEL));
    let mut session = ChatSession::new(Box::new(provider), &portfolio_context(&projects));

    println!("{WELCOME_MESSAGE}");
    println!("(answering with {}; type 'exit' to quit)\n", session.model_name());

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line == "exit" || line == "quit" {
            break;
        }

        match session.send(line).await {
            Ok(reply) => println!("\n{reply}\n"),
            Err(e) => {
                log::debug!("Chat provider error: {e:#}");
                println!("\nI'm having trouble connecting to the server right now. Please try again later.\n");
            }
        }
    }

    Ok(())
}
