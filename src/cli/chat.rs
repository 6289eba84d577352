use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use crate::ai::Dispatcher;
use crate::core::{AppConfig, AppError};
use crate::gemini::GeminiClient;
use crate::session::{Attachment, Exchange, Session};

const HELP: &str = "\
Type a prompt to analyze text, or use a command:
  /image <path>    attach a jpg, jpeg or png image
  /describe        describe the attached image
  /ask <question>  ask about the attached image
  /history         show this session's exchanges
  /clear           clear the history
  /quit            exit";

#[derive(Debug, PartialEq)]
enum Input<'a> {
    Image(&'a str),
    Describe,
    Ask(&'a str),
    Analyze(&'a str),
    History,
    Clear,
    Help,
    Quit,
    Unknown(&'a str),
}

fn parse(line: &str) -> Input<'_> {
    let Some(command) = line.trim_start().strip_prefix('/') else {
        return Input::Analyze(line);
    };
    let (name, rest) = command
        .split_once(char::is_whitespace)
        .map(|(n, r)| (n, r.trim()))
        .unwrap_or((command.trim_end(), ""));
    match name {
        "image" => Input::Image(rest),
        "describe" => Input::Describe,
        "ask" => Input::Ask(rest),
        "history" => Input::History,
        "clear" => Input::Clear,
        "help" => Input::Help,
        "quit" | "exit" => Input::Quit,
        other => Input::Unknown(other),
    }
}

async fn attach(session: &mut Session, path: &str) -> Result<String, AppError> {
    if path.is_empty() {
        return Err(AppError::validation("Usage: /image <path>"));
    }
    let path = Path::new(path);
    let data = tokio::fs::read(path).await.map_err(|e| {
        AppError::validation(format!("Unable to read {}: {}", path.display(), e))
    })?;
    let file_name = path
        .file_name()
        .map(|f| f.to_string_lossy().to_string())
        .unwrap_or_default();
    let attachment = Attachment::upload(&file_name, None, data)?;
    let summary = format!(
        "{} ({}, {} bytes)",
        attachment.file_name(),
        attachment.mime_type(),
        attachment.len()
    );
    if session.attach(attachment) {
        Ok(format!("Attached {}", summary))
    } else {
        Ok(format!("{} is already attached", file_name))
    }
}

fn print_outcome(heading: &str, result: Result<Exchange, AppError>) {
    match result {
        Ok(exchange) => println!("{}\n{}", heading, exchange.response),
        Err(e) => println!("{}", e.user_message()),
    }
}

pub async fn run(config: AppConfig) -> Result<()> {
    let mut rl = DefaultEditor::new()?;

    let client = GeminiClient::from_config(&config);
    let dispatcher = Dispatcher::new(Arc::new(client), &config.gemini_model);
    let mut session = Session::new();

    println!("{}", HELP);

    loop {
        let readline = rl.readline(">>> ");
        let line = match readline {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => break,
            Err(ReadlineError::Eof) => break,
            Err(err) => {
                println!("Error: {:?}", err);
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }
        let _ = rl.add_history_entry(line.as_str());

        match parse(&line) {
            Input::Image(path) => match attach(&mut session, path).await {
                Ok(msg) => println!("{}", msg),
                Err(e) => println!("{}", e.user_message()),
            },
            Input::Describe => {
                print_outcome("Description", dispatcher.describe(&mut session).await)
            }
            Input::Ask(question) => {
                print_outcome("Answer", dispatcher.ask(&mut session, question).await)
            }
            Input::Analyze(prompt) => {
                print_outcome("Response", dispatcher.analyze(&mut session, prompt).await)
            }
            Input::History => {
                if session.log().is_empty() {
                    println!("No history yet.");
                } else {
                    print!("{}", session.log());
                }
            }
            Input::Clear => {
                session.clear_history();
                println!("History cleared.");
            }
            Input::Help => println!("{}", HELP),
            Input::Quit => break,
            Input::Unknown(name) => println!("Unknown command /{}. Type /help.", name),
        }
    }

    Ok(())
}
