//! The command-bar mini-language.
//!
//! `/pattern` and `?pattern` search the current page, `:q`/`:quit` quits and
//! `:label [add|remove] LABEL...` changes the labels of the active ticket.
//! Anything else is swallowed.

use super::navigator::Navigator;
use super::page::PageCtx;
use crate::tracker::LabelAction;

#[derive(Clone, Debug, PartialEq, Eq)]
pub(in crate::tui_shell) enum Command {
    /// Forward search; carries the whole buffer including the `/`.
    SearchDown(String),
    /// Backward search; carries the whole buffer including the `?`.
    SearchUp(String),
    Quit,
    Label(Vec<String>),
    Ignored,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(in crate::tui_shell) enum Outcome {
    Done,
    Quit,
    Failed(String),
}

pub(in crate::tui_shell) fn parse(buffer: &str) -> Command {
    let Some(mode) = buffer.chars().next() else {
        return Command::Ignored;
    };
    match mode {
        '/' => Command::SearchDown(buffer.to_string()),
        '?' => Command::SearchUp(buffer.to_string()),
        ':' => parse_colon(&buffer[1..]),
        _ => Command::Ignored,
    }
}

fn parse_colon(rest: &str) -> Command {
    let mut fields = rest.split_whitespace();
    let Some(action) = fields.next() else {
        return Command::Ignored;
    };
    let args: Vec<String> = fields.map(str::to_string).collect();
    match action {
        "q" | "quit" => Command::Quit,
        "label" | "labels" => Command::Label(args),
        _ => Command::Ignored,
    }
}

/// Resolve `:label` arguments into an action and label set. A leading
/// `add`/`remove` picks the action; otherwise every argument is a label to add.
pub(in crate::tui_shell) fn parse_label_args(args: &[String]) -> Option<(LabelAction, Vec<String>)> {
    let (first, rest) = args.split_first()?;
    Some(match first.as_str() {
        "add" => (LabelAction::Add, rest.to_vec()),
        "remove" => (LabelAction::Remove, rest.to_vec()),
        _ => (LabelAction::Add, args.to_vec()),
    })
}

/// Run a command-bar buffer against the current page.
pub(in crate::tui_shell) fn execute(
    buffer: &str,
    nav: &mut Navigator,
    ctx: &PageCtx<'_>,
) -> Outcome {
    let command = parse(buffer);
    tracing::debug!("command {:?} -> {:?}", buffer, command);
    match command {
        Command::SearchDown(text) | Command::SearchUp(text) => {
            if let Some(searcher) = nav.current_mut().searcher() {
                searcher.set_search(&text);
                searcher.search();
            }
            Outcome::Done
        }
        Command::Quit => Outcome::Quit,
        Command::Label(args) => run_label_command(&args, nav, ctx),
        Command::Ignored => Outcome::Done,
    }
}

fn run_label_command(args: &[String], nav: &mut Navigator, ctx: &PageCtx<'_>) -> Outcome {
    let Some(ticket_id) = nav
        .current()
        .ticket_commander()
        .map(|c| c.active_ticket_id())
    else {
        return Outcome::Done;
    };
    if ticket_id.is_empty() {
        return Outcome::Done;
    }
    let Some((action, labels)) = parse_label_args(args) else {
        return Outcome::Done;
    };

    let res = ctx.tracker.mutate_labels(&ticket_id, action, &labels);
    nav.refresh(ctx);
    match res {
        Ok(()) => Outcome::Done,
        Err(err) => {
            tracing::warn!("{} labels on {}: {:#}", action, ticket_id, err);
            Outcome::Failed(format!("{} labels on {}: {:#}", action, ticket_id, err))
        }
    }
}

#[cfg(test)]
#[path = "../tests/tui_shell/commands_tests.rs"]
mod tests;
