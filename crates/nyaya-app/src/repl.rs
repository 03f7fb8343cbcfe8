//! Interactive terminal front end.
//!
//! Presentation layer over the chat service: renders the history listing
//! and the active session's messages, and maps commands onto the service's
//! new-session / select / delete / submit callbacks.

use std::io::Write;

use tokio::io::{AsyncBufReadExt, BufReader};

use nyaya_chat::{ChatError, ChatService};
use nyaya_common::{Author, Message, NyayaError, StoreError};
use nyaya_store::SessionSummary;

const HELP: &str = "\
Commands:
  :new            start a new chat
  :history        list saved chats
  :open <n>       open chat <n> from the last :history listing
  :delete <n>     delete chat <n> from the last :history listing
  :attach <file>  attach a document by name to the next message
  :help           show this help
  :quit           exit
Anything else is sent to the assistant.";

pub async fn run(service: ChatService) -> Result<(), NyayaError> {
    println!("Welcome to Nyaya — your AI legal assistant for Indian law.");
    println!("Ask a question, or attach a document to get started. Type :help for commands.");

    if let Some(session) = service.current() {
        println!("\nResuming \"{}\".", session.title);
        for msg in &session.messages {
            render_message(msg);
        }
    }

    let mut listing: Vec<SessionSummary> = Vec::new();
    let mut attachment: Option<String> = None;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        prompt(attachment.as_deref())?;
        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim().to_string();
        if line.is_empty() {
            // An empty line still submits when a document is attached.
            if attachment.is_some() {
                submit(&service, &mut attachment, "").await?;
            }
            continue;
        }

        let Some(rest) = line.strip_prefix(':') else {
            submit(&service, &mut attachment, &line).await?;
            continue;
        };

        let mut parts = rest.splitn(2, ' ');
        let command = parts.next().unwrap_or_default();
        let arg = parts.next().map(str::trim);

        match command {
            "new" => {
                let session = service.new_session().map_err(into_fatal)?;
                println!("Started \"{}\".", session.title);
            }
            "history" => {
                listing = service.sessions();
                render_history(&listing);
            }
            "open" => match resolve(&listing, arg) {
                Some(id) => match service.select(&id) {
                    Ok(session) => {
                        println!("Opened \"{}\".", session.title);
                        for msg in &session.messages {
                            render_message(msg);
                        }
                    }
                    Err(ChatError::Store(StoreError::NotFound(_))) => {
                        println!("That chat no longer exists — run :history again.");
                    }
                    Err(e) => return Err(into_fatal(e)),
                },
                None => println!("Usage: :open <n> (run :history first)"),
            },
            "delete" => match resolve(&listing, arg) {
                Some(id) => {
                    service.delete(&id).map_err(into_fatal)?;
                    println!("Deleted.");
                }
                None => println!("Usage: :delete <n> (run :history first)"),
            },
            "attach" => match arg {
                Some(name) if !name.is_empty() => {
                    println!("Attached \"{name}\" to your next message.");
                    attachment = Some(name.to_string());
                }
                _ => println!("Usage: :attach <file>"),
            },
            "help" => println!("{HELP}"),
            "quit" | "q" => break,
            other => println!("Unknown command :{other} — type :help"),
        }
    }

    println!("Bye.");
    Ok(())
}

async fn submit(
    service: &ChatService,
    attachment: &mut Option<String>,
    input: &str,
) -> Result<(), NyayaError> {
    // Lazily create a session on the first message.
    let id = match service.current_id() {
        Some(id) => id,
        None => service.new_session().map_err(into_fatal)?.id,
    };

    println!("Nyaya is thinking…");
    match service.turn(&id, input, attachment.as_deref()).await {
        Ok(reply) => {
            attachment.take();
            render_message(&reply);
        }
        Err(ChatError::EmptyInput) => println!("Nothing to send."),
        Err(ChatError::Busy) => println!("Still waiting on the previous reply."),
        Err(e @ ChatError::Store(_)) => return Err(into_fatal(e)),
    }
    Ok(())
}

fn render_message(msg: &Message) {
    match msg.author {
        Author::User => println!("[{}] You: {}", msg.timestamp, msg.content),
        Author::Model => println!("[{}] Nyaya: {}", msg.timestamp, msg.content),
        Author::System => println!("[{}] System: {}", msg.timestamp, msg.content),
    }
}

fn render_history(listing: &[SessionSummary]) {
    if listing.is_empty() {
        println!("No chat history found. Start a new conversation to see it here.");
        return;
    }
    for (i, summary) in listing.iter().enumerate() {
        println!(
            "{}. {} — {} messages - last updated {}",
            i + 1,
            summary.title,
            summary.message_count,
            summary
                .last_updated
                .with_timezone(&chrono::Local)
                .format("%d %b %Y %H:%M")
        );
    }
}

/// Map a 1-based listing number onto a session id.
fn resolve(listing: &[SessionSummary], arg: Option<&str>) -> Option<nyaya_common::SessionId> {
    let n: usize = arg?.parse().ok()?;
    listing.get(n.checked_sub(1)?).map(|s| s.id.clone())
}

fn into_fatal(e: ChatError) -> NyayaError {
    match e {
        ChatError::Store(e) => NyayaError::Store(e),
        other => NyayaError::Other(other.to_string()),
    }
}

fn prompt(attachment: Option<&str>) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    match attachment {
        Some(name) => write!(stdout, "[{name}] > ")?,
        None => write!(stdout, "> ")?,
    }
    stdout.flush()
}
