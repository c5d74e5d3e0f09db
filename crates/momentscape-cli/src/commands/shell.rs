//! Interactive session: a line-oriented stand-in for the notes screen.
//!
//! Each command maps onto one session operation; the screen is re-rendered
//! from session state after every command.

use std::io::{self, BufRead, Write};

use momentscape_core::session::{Outcome, SubmitOutcome};
use momentscape_core::{ClientConfig, NoteSession, NotesApi, SessionStatus, Startup};

use crate::commands::common::{
    format_note_dates, open_session, resolve_note, short_id, EMPTY_NOTES_MESSAGE,
};
use crate::error::CliError;

const HELP: &str = "\
Commands:
  list | ls          show the notes screen
  new                start a new note (drops any edit in progress)
  title <text>       set the draft title
  body <text>        set the draft body
  save               save the draft (creates, or updates the note being edited)
  edit <id>          edit a note (full id or unique prefix)
  cancel             stop editing and clear the draft
  delete <id>        delete a note
  dismiss            hide the current error
  reload             fetch the notes again
  help               show this help
  quit | exit        leave";

#[derive(Debug, PartialEq, Eq)]
pub enum ShellCommand {
    List,
    New,
    Title(String),
    Body(String),
    Save,
    Edit(String),
    Cancel,
    Delete(String),
    Dismiss,
    Reload,
    Help,
    Quit,
}

#[derive(Debug, PartialEq, Eq)]
pub enum Step {
    /// Keep going, optionally showing a one-line notice before the screen
    Continue(Option<String>),
    Help,
    Quit,
}

pub async fn run_shell(config: ClientConfig) -> Result<(), CliError> {
    println!("Connecting to {} ...", config.base_url());
    let mut session = match open_session(config).await? {
        Startup::Unreachable(error) => return Err(CliError::Unreachable(error.to_string())),
        Startup::Connected(session) => session,
    };
    print_screen(&session);

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("> ");
        io::stdout().flush()?;
        let Some(line) = lines.next() else {
            break;
        };
        let command = match parse_command(&line?) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(message) => {
                println!("{message}");
                continue;
            }
        };

        match apply(&mut session, command).await {
            Step::Quit => break,
            Step::Help => println!("{HELP}"),
            Step::Continue(notice) => {
                if let Some(notice) = notice {
                    println!("{notice}");
                }
                print_screen(&session);
            }
        }
    }

    Ok(())
}

/// Parses one input line; blank lines yield `Ok(None)`.
pub fn parse_command(line: &str) -> Result<Option<ShellCommand>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (word, rest) = line
        .split_once(char::is_whitespace)
        .map_or((line, ""), |(word, rest)| (word, rest.trim()));

    let command = match (word.to_lowercase().as_str(), rest) {
        ("list" | "ls", _) => ShellCommand::List,
        ("new", _) => ShellCommand::New,
        ("title", text) => ShellCommand::Title(text.to_string()),
        ("body", text) => ShellCommand::Body(text.to_string()),
        ("save", _) => ShellCommand::Save,
        ("edit", "") | ("delete" | "rm", "") => {
            return Err(format!("Usage: {word} <id>"));
        }
        ("edit", id) => ShellCommand::Edit(id.to_string()),
        ("delete" | "rm", id) => ShellCommand::Delete(id.to_string()),
        ("cancel", _) => ShellCommand::Cancel,
        ("dismiss", _) => ShellCommand::Dismiss,
        ("reload", _) => ShellCommand::Reload,
        ("help" | "?", _) => ShellCommand::Help,
        ("quit" | "exit" | "q", _) => ShellCommand::Quit,
        _ => return Err(format!("Unknown command '{word}'. Type `help` for commands.")),
    };
    Ok(Some(command))
}

pub async fn apply<A: NotesApi>(session: &mut NoteSession<A>, command: ShellCommand) -> Step {
    match command {
        ShellCommand::List => Step::Continue(None),
        ShellCommand::New | ShellCommand::Cancel => {
            session.cancel_edit();
            Step::Continue(None)
        }
        ShellCommand::Title(title) => {
            session.set_draft_title(title);
            Step::Continue(None)
        }
        ShellCommand::Body(body) => {
            session.set_draft_body(body);
            Step::Continue(None)
        }
        ShellCommand::Save => {
            let notice = match session.submit_draft().await {
                SubmitOutcome::Created(id) => Some(format!("Saved note {}", short_id(&id))),
                SubmitOutcome::Updated(id) => Some(format!("Updated note {}", short_id(&id))),
                SubmitOutcome::Skipped if session.is_submit_pending() => {
                    Some("A save is already in progress".to_string())
                }
                SubmitOutcome::Skipped => {
                    Some("Nothing to save: title and body are both required".to_string())
                }
                SubmitOutcome::Failed | SubmitOutcome::Discarded => None,
            };
            Step::Continue(notice)
        }
        ShellCommand::Edit(query) => match resolve_note(&query, session) {
            Ok(note) => {
                session.begin_edit(&note);
                Step::Continue(None)
            }
            Err(error) => Step::Continue(Some(error.to_string())),
        },
        ShellCommand::Delete(query) => match resolve_note(&query, session) {
            Ok(note) => {
                let notice = (session.delete_note(&note.id).await == Outcome::Applied)
                    .then(|| format!("Deleted note {}", short_id(&note.id)));
                Step::Continue(notice)
            }
            Err(error) => Step::Continue(Some(error.to_string())),
        },
        ShellCommand::Dismiss => {
            session.dismiss_error();
            Step::Continue(None)
        }
        ShellCommand::Reload => {
            session.reload().await;
            Step::Continue(None)
        }
        ShellCommand::Help => Step::Help,
        ShellCommand::Quit => Step::Quit,
    }
}

fn print_screen<A>(session: &NoteSession<A>) {
    for line in render_screen(session) {
        println!("{line}");
    }
}

pub fn render_screen<A>(session: &NoteSession<A>) -> Vec<String> {
    let mut lines = vec![String::new(), "== MomentScape ==".to_string()];

    if let Some(error) = session.last_error() {
        lines.push(format!("! {error}  (`dismiss` to hide)"));
    }

    let edit = session.edit_session();
    match edit.target() {
        Some(id) => lines.push(format!("-- Edit Note ({}) --", short_id(id))),
        None => lines.push("-- New note --".to_string()),
    }
    lines.push(format!("Title: {}", edit.title()));
    lines.push(format!("Body:  {}", edit.body()));
    if edit.target().is_some() {
        lines.push("[save] Update Note   [cancel] Cancel".to_string());
    } else {
        lines.push("[save] Save Note".to_string());
    }
    lines.push(String::new());

    match session.status() {
        SessionStatus::Loading => lines.push("Loading notes...".to_string()),
        _ if session.notes().is_empty() => lines.push(EMPTY_NOTES_MESSAGE.to_string()),
        _ => {
            for note in session.notes() {
                let marker = if edit.is_editing(&note.id) { "*" } else { " " };
                lines.push(format!("{marker} {}  {}", short_id(&note.id), note.title));
                for body_line in note.body.lines() {
                    lines.push(format!("    {body_line}"));
                }
                lines.push(format!("    {}", format_note_dates(note)));
            }
        }
    }

    lines
}
