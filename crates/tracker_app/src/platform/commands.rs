//! Line commands typed at the prompt.

use std::path::PathBuf;

use thiserror::Error;
use tracker_core::{BatchAction, Column, Credentials, FilterField, SearchCriteria};

pub const HELP: &str = "\
Commands:
  search <date posted> | <experience> | <job title> | <location>
  refresh                     reload the job list
  filter <field> [value]      title, company, location, status, salary, date-from, date-to
  clear                       reset all filters
  sort <column>               click a column header (again to flip direction)
  ignored on|off              show or hide jobs with status Ignored
  select remove|apply <row|url>
  unselect remove|apply <row|url>
  batch                       remove then apply the selected jobs
  login <email> <password>
  register <email> <password>
  logout
  session                     check whether the backend still knows us
  upload <path>               upload a resume
  show                        redraw the table
  help
  quit";

/// A row number as shown in the table (1-based) or a job URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowTarget {
    Row(usize),
    Url(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Search(SearchCriteria),
    Refresh,
    Filter { field: FilterField, value: String },
    ClearFilters,
    Sort(Column),
    ShowIgnored(bool),
    Select {
        action: BatchAction,
        target: RowTarget,
        selected: bool,
    },
    Batch,
    Login(Credentials),
    Register(Credentials),
    Logout,
    Session,
    Upload(PathBuf),
    Show,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command '{0}' (try 'help')")]
    Unknown(String),
    #[error("usage: {0}")]
    Usage(&'static str),
    #[error("unknown filter field '{0}'")]
    UnknownField(String),
    #[error("unknown column '{0}'")]
    UnknownColumn(String),
}

pub fn parse(line: &str) -> Result<Command, CommandError> {
    let line = line.trim();
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    match verb.to_ascii_lowercase().as_str() {
        "" => Err(CommandError::Empty),
        "search" => parse_search(rest),
        "refresh" | "r" => Ok(Command::Refresh),
        "filter" | "f" => parse_filter(rest),
        "clear" => Ok(Command::ClearFilters),
        "sort" | "s" => Column::parse(rest)
            .map(Command::Sort)
            .ok_or_else(|| CommandError::UnknownColumn(rest.to_string())),
        "ignored" => match rest.to_ascii_lowercase().as_str() {
            "on" | "show" | "yes" => Ok(Command::ShowIgnored(true)),
            "off" | "hide" | "no" => Ok(Command::ShowIgnored(false)),
            _ => Err(CommandError::Usage("ignored on|off")),
        },
        "select" => parse_select(rest, true),
        "unselect" => parse_select(rest, false),
        "batch" => Ok(Command::Batch),
        "login" => parse_credentials(rest)
            .map(Command::Login)
            .ok_or(CommandError::Usage("login <email> <password>")),
        "register" => parse_credentials(rest)
            .map(Command::Register)
            .ok_or(CommandError::Usage("register <email> <password>")),
        "logout" => Ok(Command::Logout),
        "session" => Ok(Command::Session),
        "upload" => {
            if rest.is_empty() {
                Err(CommandError::Usage("upload <path>"))
            } else {
                Ok(Command::Upload(PathBuf::from(rest)))
            }
        }
        "show" | "ls" => Ok(Command::Show),
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" | "q" => Ok(Command::Quit),
        other => Err(CommandError::Unknown(other.to_string())),
    }
}

// Blank parts are passed through; the core reports which fields are missing.
fn parse_search(rest: &str) -> Result<Command, CommandError> {
    let parts: Vec<&str> = rest.split('|').collect();
    if parts.len() > 4 {
        return Err(CommandError::Usage(
            "search <date posted> | <experience> | <job title> | <location>",
        ));
    }
    let part = |index: usize| parts.get(index).copied().unwrap_or("").to_string();
    Ok(Command::Search(SearchCriteria {
        date_posted: part(0),
        experience_level: part(1),
        job_title: part(2),
        location: part(3),
    }))
}

fn parse_filter(rest: &str) -> Result<Command, CommandError> {
    let (name, value) = match rest.split_once(char::is_whitespace) {
        Some((name, value)) => (name, value.trim()),
        None => (rest, ""),
    };
    if name.is_empty() {
        return Err(CommandError::Usage("filter <field> [value]"));
    }
    let field =
        FilterField::parse(name).ok_or_else(|| CommandError::UnknownField(name.to_string()))?;
    Ok(Command::Filter {
        field,
        value: value.to_string(),
    })
}

fn parse_select(rest: &str, selected: bool) -> Result<Command, CommandError> {
    const USAGE: &str = "select|unselect remove|apply <row|url>";
    let (action, target) = rest
        .split_once(char::is_whitespace)
        .ok_or(CommandError::Usage(USAGE))?;
    let action = match action.to_ascii_lowercase().as_str() {
        "remove" => BatchAction::Remove,
        "apply" => BatchAction::Apply,
        _ => return Err(CommandError::Usage(USAGE)),
    };
    let target = target.trim();
    let target = match target.parse::<usize>() {
        Ok(row) if row > 0 => RowTarget::Row(row),
        Ok(_) => return Err(CommandError::Usage(USAGE)),
        Err(_) => RowTarget::Url(target.to_string()),
    };
    Ok(Command::Select {
        action,
        target,
        selected,
    })
}

fn parse_credentials(rest: &str) -> Option<Credentials> {
    let mut parts = rest.split_whitespace();
    let email = parts.next()?;
    let password = parts.next()?;
    if parts.next().is_some() {
        return None;
    }
    Some(Credentials::new(email, password))
}
