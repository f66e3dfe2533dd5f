//! Interactive shell: reads commands, drives the session, prints screens.

use anyhow::Result;
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use crate::errors::AppError;
use crate::session::commands::{Command, HELP};
use crate::session::render::{render_draft, render_entry, render_screen, render_send_receipt};
use crate::session::{Screen, Session};

const PROMPT: &str = "outreach> ";
const BODY_PROMPT: &str = "... ";

enum Flow {
    Continue,
    Quit,
}

pub async fn run(mut session: Session) -> Result<()> {
    let mut editor = DefaultEditor::new()?;
    println!("{}\n", render_screen(&session));
    println!("{}", "Type `help` for commands.".dimmed());

    loop {
        let line = match editor.readline(PROMPT) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(err) => return Err(err.into()),
        };
        if !line.trim().is_empty() {
            editor.add_history_entry(line.as_str())?;
        }

        let command = match Command::parse(&line) {
            Ok(command) => command,
            Err(msg) => {
                println!("{}", msg.red());
                continue;
            }
        };

        match dispatch(&mut session, &mut editor, command).await {
            Ok(Flow::Continue) => {}
            Ok(Flow::Quit) => break,
            Err(err) => println!("{}", err.user_message().red()),
        }
    }

    Ok(())
}

fn show(session: &mut Session, screen: Screen) {
    session.set_screen(screen);
    println!("{}", render_screen(session));
}

fn print_notice(session: &mut Session) {
    if let Some(notice) = session.take_notice() {
        println!("{}", notice.yellow());
    }
}

async fn dispatch(
    session: &mut Session,
    editor: &mut DefaultEditor,
    command: Command,
) -> Result<Flow, AppError> {
    match command {
        Command::Empty => {}
        Command::Home => show(session, Screen::Dashboard),
        Command::Jobs => show(session, Screen::FindJobs),
        Command::History => show(session, Screen::History),
        Command::Profile => show(session, Screen::Profile),
        Command::Help => println!("{HELP}"),
        Command::Quit => return Ok(Flow::Quit),

        Command::Search(location) => {
            println!(
                "{}",
                "Verifying market leads... this can take a minute.".dimmed()
            );
            session.search(location.as_deref()).await?;
            print_notice(session);
            println!("{}", render_screen(session));
        }

        Command::Draft(number) => {
            let job_id = session
                .job_at(number)
                .map(|j| j.id.clone())
                .ok_or_else(|| AppError::NotFound(format!("No job number {number}")))?;
            println!("{}", "Drafting your application...".dimmed());
            session.start_draft(&job_id).await?;
            print_notice(session);
            print_draft(session)?;
        }

        Command::Subject(subject) => {
            session.edit_subject(&subject)?;
            print_draft(session)?;
        }

        Command::Body => {
            if session.open_draft().is_none() {
                return Err(AppError::NoDraft);
            }
            println!(
                "{}",
                "Enter the new body. Finish with a line containing only '.'".dimmed()
            );
            if let Some(body) = read_body(editor) {
                session.edit_body(&body)?;
                print_draft(session)?;
            } else {
                println!("{}", "Body unchanged.".dimmed());
            }
        }

        Command::Show => print_draft(session)?,

        Command::Send => {
            let no_contact = session
                .open_draft()
                .map(|d| d.job.contact_email.is_none())
                .ok_or(AppError::NoDraft)?;
            if no_contact {
                println!(
                    "{}",
                    "No verified contact: Gmail opens with an empty recipient.".yellow()
                );
            }

            let receipt = session.confirm_send()?;
            println!("{}", render_send_receipt(&receipt, session.account_slot()));
        }

        Command::Discard => {
            session.discard_draft()?;
            println!("Draft discarded.");
        }

        Command::View(number) => {
            let entry = session
                .history_at(number)
                .ok_or_else(|| AppError::NotFound(format!("No application number {number}")))?;
            println!("{}", render_entry(entry));
        }

        Command::Set(field, value) => {
            session.update_profile(field, &value)?;
            println!("Saved {}.", field.as_str());
            show(session, Screen::Profile);
        }
    }

    Ok(Flow::Continue)
}

fn print_draft(session: &Session) -> Result<(), AppError> {
    let draft = session.open_draft().ok_or(AppError::NoDraft)?;
    println!("{}", render_draft(draft, &session.profile().email));
    Ok(())
}

/// Reads body lines until a lone `.`; `None` if the user interrupts.
fn read_body(editor: &mut DefaultEditor) -> Option<String> {
    let mut lines = Vec::new();
    loop {
        match editor.readline(BODY_PROMPT) {
            Ok(line) if line.trim_end() == "." => return Some(lines.join("\n")),
            Ok(line) => lines.push(line),
            Err(_) => return None,
        }
    }
}
