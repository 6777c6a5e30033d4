use marquee_core::{AppState, ListingId, Msg, PageNumber, ValidationError};
use thiserror::Error;

pub const HELP: &str = "commands: search <text> | results | browse | clear | more | refresh | \
page <n> | detail <id> | retry | help | quit";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Dispatch(Msg),
    /// Jump to a page of whichever feed is shown when the command is handled.
    Page(PageNumber),
    /// Return to the retained search results without fetching again.
    Results,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("unknown command {0:?}")]
    Unknown(String),
    #[error("no search results to return to")]
    NoSearchResults,
    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

/// Turns one input line into a command. Nothing here depends on the current state.
pub fn parse_command(line: &str) -> Result<Option<Command>, CommandError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    let command = match verb.to_ascii_lowercase().as_str() {
        "search" | "s" => Command::Dispatch(Msg::SubmitSearch(rest.to_string())),
        "results" | "res" => Command::Results,
        "browse" | "b" => Command::Dispatch(Msg::SwitchToBrowse),
        "clear" | "c" => Command::Dispatch(Msg::ClearSearch),
        "more" | "m" => Command::Dispatch(Msg::RequestNextPage),
        "refresh" | "r" => Command::Dispatch(Msg::PullToRefresh),
        "page" | "p" => Command::Page(PageNumber::parse(rest)?),
        "detail" | "d" => Command::Dispatch(Msg::OpenDetail(ListingId::parse(rest)?)),
        "retry" => Command::Dispatch(Msg::RetryDetail),
        "help" | "?" => Command::Help,
        "quit" | "q" | "exit" => Command::Quit,
        _ => return Err(CommandError::Unknown(verb.to_string())),
    };
    Ok(Some(command))
}

impl Command {
    /// Resolves the command against the state the loop holds right now.
    /// `Help` and `Quit` carry no message.
    pub fn into_msg(self, state: &AppState) -> Result<Option<Msg>, CommandError> {
        let msg = match self {
            Command::Dispatch(msg) => msg,
            Command::Page(page) => Msg::RequestPage {
                feed: state.mode().kind(),
                page,
            },
            Command::Results => {
                let query = state
                    .search_query()
                    .ok_or(CommandError::NoSearchResults)?;
                Msg::SwitchToSearch(query.to_string())
            }
            Command::Help | Command::Quit => return Ok(None),
        };
        Ok(Some(msg))
    }
}
