//! Command line parsing for the interactive loop.
//!
//! Each input line becomes a [`Command`]. Task row numbers are resolved against
//! the visible list of the current [`AppState`] while parsing, so a command
//! always refers to what the user saw on the last screen.

use crate::api::Credentials;
use crate::app::{AppState, Event};
use crate::domain::error::{Result, TaskdeckError};
use crate::domain::{parse_date, parse_tags, Priority, TaskDraft, TaskId, TaskPatch};
use crate::view::{SortKey, StatusFilter};

/// Usage text printed by `help`.
pub const HELP: &str = "\
commands:
  login <user> <password>            sign in
  signup <user> <password> <again>   create an account
  toggle                             switch between sign in and sign up
  logout                             sign out
  add <text> [| due=YYYY-MM-DD] [| priority=low|medium|high] [| tags=a,b] [| notes=..]
  done <n>                           toggle completion of row n
  edit <n> <field>=<value>           field: text, due, priority, notes, tags (due= clears)
  rm <n>                             delete row n
  search [term]                      filter by text, notes and tags
  filter all|completed|pending
  sort createdAt|dueDate|priority|text [asc|desc]
  dismiss <n>                        close notification n
  clear                              close all notifications
  list                               redraw
  help
  quit";

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Forward to the application.
    Dispatch(Event),
    /// Close the notification at this 1-based position.
    Dismiss(usize),
    /// Close every notification.
    Clear,
    /// Redraw without changing anything.
    List,
    Help,
    Quit,
}

/// Parses `line` against the current state.
///
/// Blank lines parse to [`Command::List`]. Missing login fields are passed
/// through empty so the form validation reports them.
///
/// # Errors
///
/// Returns [`TaskdeckError::Validation`] for unknown commands, malformed
/// arguments and row numbers outside the visible list.
///
/// # Example
///
/// ```rust
/// use taskdeck::app::{AppState, Event};
/// use taskdeck::cli::{parse_command, Command};
///
/// let state = AppState::new();
/// assert_eq!(parse_command("logout", &state)?, Command::Dispatch(Event::Logout));
/// assert!(parse_command("fly", &state).is_err());
/// # Ok::<(), taskdeck::TaskdeckError>(())
/// ```
pub fn parse_command(line: &str, state: &AppState) -> Result<Command> {
    let line = line.trim();
    let (name, rest) = line
        .split_once(char::is_whitespace)
        .map_or((line, ""), |(name, rest)| (name, rest.trim()));

    let command = match name.to_ascii_lowercase().as_str() {
        "" | "list" | "ls" => Command::List,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        "clear" => Command::Clear,
        "dismiss" => Command::Dismiss(parse_number(rest)?),
        "toggle" => Command::Dispatch(Event::ToggleAuthMode),
        "logout" => Command::Dispatch(Event::Logout),
        "login" => {
            let mut words = rest.split_whitespace();
            let username = words.next().unwrap_or_default();
            let password = words.next().unwrap_or_default();
            Command::Dispatch(Event::SubmitLogin(Credentials::new(username, password)))
        }
        "signup" => {
            let mut words = rest.split_whitespace();
            let username = words.next().unwrap_or_default();
            let password = words.next().unwrap_or_default();
            let confirm_password = words.next().unwrap_or_default().to_string();
            Command::Dispatch(Event::SubmitSignup {
                credentials: Credentials::new(username, password),
                confirm_password,
            })
        }
        "add" => Command::Dispatch(Event::SubmitDraft(parse_draft(rest)?)),
        "done" => {
            let id = row_id(state, rest)?;
            Command::Dispatch(Event::ToggleComplete(id))
        }
        "rm" | "delete" => {
            let id = row_id(state, rest)?;
            Command::Dispatch(Event::DeleteTask(id))
        }
        "edit" => {
            let (number, assignment) = rest
                .split_once(char::is_whitespace)
                .ok_or_else(|| usage("edit <n> <field>=<value>"))?;
            let id = row_id(state, number)?;
            let patch = parse_patch(assignment.trim())?;
            Command::Dispatch(Event::EditTask { id, patch })
        }
        "search" => Command::Dispatch(Event::SetSearch(rest.to_string())),
        "filter" => Command::Dispatch(Event::SetStatusFilter(rest.parse::<StatusFilter>()?)),
        "sort" => {
            let mut words = rest.split_whitespace();
            let key = words
                .next()
                .ok_or_else(|| usage("sort <key> [asc|desc]"))?
                .parse::<SortKey>()?;
            let order = match words.next() {
                Some(order) => order.parse()?,
                None => state.view.sort_order,
            };
            Command::Dispatch(Event::SetSort { key, order })
        }
        other => {
            return Err(TaskdeckError::validation(
                "command",
                format!("unknown command '{other}', try 'help'"),
            ))
        }
    };

    Ok(command)
}

fn usage(text: &str) -> TaskdeckError {
    TaskdeckError::validation("usage", text)
}

fn parse_number(raw: &str) -> Result<usize> {
    raw.trim()
        .parse::<usize>()
        .ok()
        .filter(|n| *n > 0)
        .ok_or_else(|| TaskdeckError::validation("row", format!("'{raw}' is not a row number")))
}

fn row_id(state: &AppState, raw: &str) -> Result<TaskId> {
    let number = parse_number(raw)?;
    state
        .visible_task(number)
        .map(|task| task.id.clone())
        .ok_or_else(|| TaskdeckError::validation("row", format!("no task in row {number}")))
}

fn parse_due(raw: &str) -> Result<Option<chrono::NaiveDate>> {
    if raw.trim().is_empty() {
        return Ok(None);
    }
    parse_date(raw)
        .map(Some)
        .ok_or_else(|| TaskdeckError::validation("due", format!("'{raw}' is not a YYYY-MM-DD date")))
}

/// `text | key=value | ...` into a draft. Text is left as typed; the handler
/// decides whether it is blank.
fn parse_draft(rest: &str) -> Result<TaskDraft> {
    let mut segments = rest.split('|');
    let mut draft = TaskDraft::new(segments.next().unwrap_or_default().trim());

    for segment in segments {
        let (key, value) = split_assignment(segment)?;
        match key.as_str() {
            "due" | "duedate" => draft.due_date = parse_due(value)?,
            "priority" => draft.priority = value.parse::<Priority>()?,
            "tags" => draft.tags = value.to_string(),
            "notes" => draft.notes = value.to_string(),
            other => {
                return Err(TaskdeckError::validation(
                    "add",
                    format!("unknown field '{other}'"),
                ))
            }
        }
    }

    Ok(draft)
}

fn parse_patch(assignment: &str) -> Result<TaskPatch> {
    let (key, value) = split_assignment(assignment)?;
    let mut patch = TaskPatch::default();
    match key.as_str() {
        "text" => patch.text = Some(value.to_string()),
        "due" | "duedate" => patch.due_date = Some(parse_due(value)?),
        "priority" => patch.priority = Some(value.parse::<Priority>()?),
        "notes" => patch.notes = Some(value.to_string()),
        "tags" => patch.tags = Some(parse_tags(value)),
        other => {
            return Err(TaskdeckError::validation(
                "edit",
                format!("unknown field '{other}'"),
            ))
        }
    }
    if patch.is_empty() {
        return Err(usage("edit <n> <field>=<value>"));
    }
    Ok(patch)
}

fn split_assignment(segment: &str) -> Result<(String, &str)> {
    segment
        .split_once('=')
        .map(|(key, value)| (key.trim().to_ascii_lowercase(), value.trim()))
        .ok_or_else(|| usage("expected <field>=<value>"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Task, User};
    use crate::view::SortOrder;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn signed_in() -> AppState {
        let mut state = AppState::new();
        state.user = Some(User::new("ada"));
        state.set_tasks(vec![Task::new("a", "Buy milk"), Task::new("b", "Write report")]);
        state
    }

    fn event(line: &str, state: &AppState) -> Event {
        match parse_command(line, state).unwrap() {
            Command::Dispatch(event) => event,
            other => panic!("expected an event, got {other:?}"),
        }
    }

    #[test]
    fn login_passes_missing_fields_through_empty() {
        let state = AppState::new();
        assert_eq!(
            event("login ada", &state),
            Event::SubmitLogin(Credentials::new("ada", ""))
        );
    }

    #[test]
    fn signup_carries_confirmation() {
        let state = AppState::new();
        assert_eq!(
            event("signup ada pw pw2", &state),
            Event::SubmitSignup {
                credentials: Credentials::new("ada", "pw"),
                confirm_password: "pw2".to_string(),
            }
        );
    }

    #[test]
    fn add_parses_optional_fields() {
        let state = signed_in();
        let Event::SubmitDraft(draft) = event(
            "add Pay rent | due=2024-05-01 | priority=high | tags=home, bills | notes=by card",
            &state,
        ) else {
            panic!("expected a draft");
        };

        assert_eq!(draft.text, "Pay rent");
        assert_eq!(draft.due_date, NaiveDate::from_ymd_opt(2024, 5, 1));
        assert_eq!(draft.priority, Priority::High);
        assert_eq!(draft.tags, "home, bills");
        assert_eq!(draft.notes, "by card");
    }

    #[test]
    fn add_rejects_bad_date() {
        let state = signed_in();
        assert!(parse_command("add x | due=tomorrow", &state).is_err());
    }

    #[test]
    fn rows_resolve_against_visible_list() {
        let state = signed_in();
        let second = state.visible_task(2).unwrap().id.clone();

        assert_eq!(event("done 2", &state), Event::ToggleComplete(second.clone()));
        assert_eq!(event("rm 2", &state), Event::DeleteTask(second));
        assert!(parse_command("done 3", &state).is_err());
        assert!(parse_command("done 0", &state).is_err());
    }

    #[test]
    fn edit_builds_single_field_patch() {
        let state = signed_in();
        let Event::EditTask { patch, .. } = event("edit 1 tags=a,,b", &state) else {
            panic!("expected an edit");
        };
        assert_eq!(
            patch,
            TaskPatch {
                tags: Some(vec!["a".to_string(), "b".to_string()]),
                ..TaskPatch::default()
            }
        );
        assert!(parse_command("edit 1 colour=red", &state).is_err());
    }

    #[test]
    fn edit_with_empty_due_clears_it() {
        let state = signed_in();
        let Event::EditTask { patch, .. } = event("edit 1 due=", &state) else {
            panic!("expected an edit");
        };
        assert_eq!(patch.due_date, Some(None));

        let Event::EditTask { patch, .. } = event("edit 1 due=2024-05-01", &state) else {
            panic!("expected an edit");
        };
        assert_eq!(patch.due_date, Some(NaiveDate::from_ymd_opt(2024, 5, 1)));
    }

    #[test]
    fn sort_keeps_current_order_when_omitted() {
        let state = signed_in();
        assert_eq!(
            event("sort priority", &state),
            Event::SetSort {
                key: SortKey::Priority,
                order: SortOrder::Desc,
            }
        );
        assert_eq!(
            event("sort due asc", &state),
            Event::SetSort {
                key: SortKey::DueDate,
                order: SortOrder::Asc,
            }
        );
    }

    #[test]
    fn local_commands() {
        let state = AppState::new();
        assert_eq!(parse_command("", &state).unwrap(), Command::List);
        assert_eq!(parse_command("dismiss 2", &state).unwrap(), Command::Dismiss(2));
        assert_eq!(parse_command("clear", &state).unwrap(), Command::Clear);
        assert_eq!(parse_command("quit", &state).unwrap(), Command::Quit);
        assert!(parse_command("dismiss x", &state).is_err());
    }
}
