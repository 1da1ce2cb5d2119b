//! Interactive operator console.
//!
//! A rustyline REPL over the session controller: one command per line, one
//! blocking service call per command, full re-render of whatever the command
//! touched. Actions are serialized by the operator; nothing runs in the
//! background.

use std::collections::BTreeSet;

use anyhow::Result;
use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};

use crate::errors::AppError;
use crate::models::{Candidate, DeliveryDetail, DraftField, EmailDraft};
use crate::session::SessionController;

/// Pre-populated job description, editable with the `job` command.
const DEFAULT_JOB_DESCRIPTION: &str = "We are hiring a recruiter with 3-5 years experience.";

const COMMANDS: &[&str] = &[
    "drafts",
    "edit",
    "generate",
    "health",
    "help",
    "job",
    "list",
    "quit",
    "search",
    "select",
    "selection",
    "send",
];

// ────────────────────────────────────────────────────────────────────────────
// Command parsing
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
enum Selection {
    All,
    None,
    Emails(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Help,
    Quit,
    Health,
    Search,
    List,
    Select(Selection),
    Selection,
    /// `job` with no argument shows the current description.
    Job(Option<String>),
    Generate,
    Drafts,
    /// Zero-based index; the operator types 1-based draft numbers.
    Edit {
        index: usize,
        field: DraftField,
        value: String,
    },
    Send,
}

/// Splits off the first whitespace-delimited word, returning it and the
/// trimmed remainder.
fn split_word(s: &str) -> (&str, &str) {
    match s.find(char::is_whitespace) {
        Some(i) => (&s[..i], s[i..].trim_start()),
        None => (s, ""),
    }
}

fn parse_command(line: &str) -> Result<Command, String> {
    let (head, rest) = split_word(line);
    match head {
        "help" => Ok(Command::Help),
        "quit" | "exit" => Ok(Command::Quit),
        "health" => Ok(Command::Health),
        "search" => Ok(Command::Search),
        "list" => Ok(Command::List),
        "selection" => Ok(Command::Selection),
        "generate" => Ok(Command::Generate),
        "drafts" => Ok(Command::Drafts),
        "send" => Ok(Command::Send),
        "job" => Ok(Command::Job(if rest.is_empty() {
            None
        } else {
            Some(rest.to_string())
        })),
        "select" => match rest {
            "" => Err("usage: select all | none | <email> [email ...]".to_string()),
            "all" => Ok(Command::Select(Selection::All)),
            "none" => Ok(Command::Select(Selection::None)),
            emails => Ok(Command::Select(Selection::Emails(
                emails.split_whitespace().map(str::to_string).collect(),
            ))),
        },
        "edit" => {
            let (index_token, rest) = split_word(rest);
            let (field_token, value) = split_word(rest);
            if index_token.is_empty() || field_token.is_empty() {
                return Err("usage: edit <draft#> subject|body <text>".to_string());
            }
            let number: usize = index_token
                .parse()
                .map_err(|_| format!("'{index_token}' is not a draft number"))?;
            if number == 0 {
                return Err("draft numbers start at 1".to_string());
            }
            let field: DraftField = field_token.parse()?;
            Ok(Command::Edit {
                index: number - 1,
                field,
                value: value.to_string(),
            })
        }
        other => Err(format!("unknown command '{other}' (try 'help')")),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Readline helper
// ────────────────────────────────────────────────────────────────────────────

/// Completes and hints command names on the first word of the line.
#[derive(Clone)]
struct CommandHelper;

impl Helper for CommandHelper {}

impl Completer for CommandHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];
        if line.contains(' ') {
            return Ok((0, vec![]));
        }
        let candidates = COMMANDS
            .iter()
            .filter(|cmd| cmd.starts_with(line))
            .map(|cmd| Pair {
                display: cmd.to_string(),
                replacement: cmd.to_string(),
            })
            .collect();
        Ok((0, candidates))
    }
}

impl Hinter for CommandHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];
        if line.is_empty() || line.contains(' ') {
            return None;
        }
        COMMANDS
            .iter()
            .find(|cmd| cmd.starts_with(line) && cmd.len() > line.len())
            .map(|cmd| cmd[line.len()..].to_string())
    }
}

impl Highlighter for CommandHelper {}

impl Validator for CommandHelper {}

// ────────────────────────────────────────────────────────────────────────────
// REPL
// ────────────────────────────────────────────────────────────────────────────

pub struct Repl {
    controller: SessionController,
    job_description: String,
}

impl Repl {
    pub fn new(controller: SessionController) -> Self {
        Self {
            controller,
            job_description: DEFAULT_JOB_DESCRIPTION.to_string(),
        }
    }

    pub async fn run(mut self) -> Result<()> {
        let mut rl = Editor::new()?;
        rl.set_helper(Some(CommandHelper));

        println!("{}", "=== AI Candidate Outreach ===".bright_magenta().bold());
        println!(
            "{}",
            "Type 'help' for commands, 'quit' to exit.".bright_black()
        );
        println!();

        loop {
            match rl.readline("outreach> ") {
                Ok(line) => {
                    let trimmed = line.trim();
                    if trimmed.is_empty() {
                        continue;
                    }
                    let _ = rl.add_history_entry(&line);

                    match parse_command(trimmed) {
                        Ok(Command::Quit) => break,
                        Ok(command) => self.dispatch(command).await,
                        Err(message) => println!("{}", message.red()),
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("{}", "Ctrl-C — type 'quit' to exit.".yellow());
                }
                Err(ReadlineError::Eof) => break,
                Err(err) => {
                    eprintln!("{}", format!("Readline error: {err:?}").red());
                    break;
                }
            }
        }

        println!("{}", "Goodbye!".bright_green());
        Ok(())
    }

    async fn dispatch(&mut self, command: Command) {
        match command {
            Command::Help => print_help(),
            Command::Quit => unreachable!("handled by the loop"),
            Command::Health => {
                println!("{}", "Checking service health...".bright_black());
                match self.controller.check_health().await {
                    Ok(status) => {
                        let pretty = serde_json::to_string_pretty(&status)
                            .unwrap_or_else(|_| status.to_string());
                        println!("{pretty}");
                    }
                    Err(err) => report(&err),
                }
            }
            Command::Search => {
                let count = self.controller.load_candidates();
                println!("{}", format!("Loaded {count} candidates").green());
            }
            Command::List => {
                let session = self.controller.session();
                if session.candidates.is_empty() {
                    println!("{}", "No candidates loaded — run 'search' first.".yellow());
                } else {
                    print_candidates(&session.candidates, &session.selected);
                }
            }
            Command::Select(selection) => self.apply_selection(selection),
            Command::Selection => {
                let selected = &self.controller.session().selected;
                println!("{}", format!("Selected {} candidates", selected.len()).cyan());
                for email in selected {
                    println!("  {email}");
                }
            }
            Command::Job(None) => {
                println!("{}", "Current job description:".cyan());
                println!("  {}", self.job_description);
            }
            Command::Job(Some(text)) => {
                self.job_description = text;
                println!("{}", "Job description updated".green());
            }
            Command::Generate => {
                println!("{}", "Generating emails...".bright_black());
                match self.controller.create_drafts(&self.job_description).await {
                    Ok(count) => {
                        println!(
                            "{}",
                            format!("Generated {count} personalized emails").green()
                        );
                    }
                    Err(err) => report(&err),
                }
            }
            Command::Drafts => {
                let drafts = &self.controller.session().drafts;
                if drafts.is_empty() {
                    println!("{}", "No drafts — run 'generate' first.".yellow());
                } else {
                    print_drafts(drafts);
                }
            }
            Command::Edit {
                index,
                field,
                value,
            } => match self.controller.edit_draft(index, field, value) {
                Ok(()) => println!("{}", format!("Draft {} updated", index + 1).green()),
                Err(err) => report(&err),
            },
            Command::Send => {
                println!("{}", "Sending emails...".bright_black());
                match self.controller.send_emails().await {
                    Ok(report) => {
                        println!("{}", format!("Sent {} emails", report.sent).green());
                        if let Some(details) = &report.details {
                            print_delivery_report(details);
                        }
                    }
                    Err(err) => report(&err),
                }
            }
        }
    }

    /// Resolves the requested selection against known candidate emails
    /// (case-insensitively) and replaces the selected set wholesale.
    /// Unknown emails are skipped with a warning — the console is the only
    /// subset guard the controller relies on.
    fn apply_selection(&mut self, selection: Selection) {
        let known: Vec<String> = self
            .controller
            .session()
            .candidates
            .iter()
            .map(|c| c.email.clone())
            .collect();

        let resolved: BTreeSet<String> = match selection {
            Selection::All => known.iter().cloned().collect(),
            Selection::None => BTreeSet::new(),
            Selection::Emails(requested) => requested
                .into_iter()
                .filter_map(|requested| {
                    let found = known
                        .iter()
                        .find(|known| known.eq_ignore_ascii_case(&requested));
                    if found.is_none() {
                        println!(
                            "{}",
                            format!("Ignoring unknown email: {requested}").yellow()
                        );
                    }
                    found.cloned()
                })
                .collect(),
        };

        let count = resolved.len();
        self.controller.set_selection(resolved);
        println!("{}", format!("Selected {count} candidates").cyan());
    }
}

fn report(err: &AppError) {
    println!("{}", err.to_string().red());
}

fn print_help() {
    println!("{}", "Commands:".cyan());
    println!("  search                        load the candidate list");
    println!("  list                          show candidates ('*' marks selected)");
    println!("  select <email> [email ...]    select candidates to email");
    println!("  select all | none             select every candidate / clear selection");
    println!("  selection                     show the current selection");
    println!("  job [text]                    show or replace the job description");
    println!("  generate                      request AI drafts for the selection");
    println!("  drafts                        show the generated drafts");
    println!("  edit <draft#> subject <text>  replace a draft's subject");
    println!("  edit <draft#> body <text>     replace a draft's body");
    println!("  send                          send the (edited) drafts");
    println!("  health                        check the remote service");
    println!("  quit                          exit");
}

fn print_candidates(candidates: &[Candidate], selected: &BTreeSet<String>) {
    println!(
        "{}",
        format!(
            "   {:<4} {:<18} {:<38} {:<10} {:<9} {:<3} Summary",
            "ID", "Name", "Email", "Location", "Education", "Exp"
        )
        .cyan()
    );
    for candidate in candidates {
        let mark = if selected.contains(&candidate.email) {
            "*"
        } else {
            " "
        };
        println!(
            " {} {:<4} {:<18} {:<38} {:<10} {:<9} {:<3} {}",
            mark,
            candidate.id,
            truncate(&candidate.name, 18),
            truncate(&candidate.email, 38),
            truncate(&candidate.location_preference, 10),
            truncate(&candidate.educational_qualification, 9),
            candidate.work_experience,
            truncate(&candidate.summary, 48),
        );
    }
}

fn print_drafts(drafts: &[EmailDraft]) {
    for (i, draft) in drafts.iter().enumerate() {
        println!("{}", format!("[{}] {}", i + 1, draft.email).cyan());
        println!("  Subject: {}", draft.subject);
        for line in draft.body.lines() {
            println!("  {line}");
        }
        println!();
    }
}

fn print_delivery_report(details: &[DeliveryDetail]) {
    println!("{}", format!("{:<38} {:<10} Details", "Recipient", "Status").cyan());
    for detail in details {
        let extra = if detail.extra.is_empty() {
            String::new()
        } else {
            serde_json::Value::Object(detail.extra.clone()).to_string()
        };
        println!("{:<38} {:<10} {extra}", detail.email, detail.status);
    }
}

/// Truncates to `max` characters with an ellipsis marker.
fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{cut}…")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bare_commands() {
        assert_eq!(parse_command("search").unwrap(), Command::Search);
        assert_eq!(parse_command("generate").unwrap(), Command::Generate);
        assert_eq!(parse_command("send").unwrap(), Command::Send);
        assert_eq!(parse_command("exit").unwrap(), Command::Quit);
    }

    #[test]
    fn test_parse_select_variants() {
        assert_eq!(
            parse_command("select all").unwrap(),
            Command::Select(Selection::All)
        );
        assert_eq!(
            parse_command("select none").unwrap(),
            Command::Select(Selection::None)
        );
        assert_eq!(
            parse_command("select a@x.com b@y.com").unwrap(),
            Command::Select(Selection::Emails(vec![
                "a@x.com".to_string(),
                "b@y.com".to_string()
            ]))
        );
        assert!(parse_command("select").is_err());
    }

    #[test]
    fn test_parse_job_with_and_without_text() {
        assert_eq!(parse_command("job").unwrap(), Command::Job(None));
        assert_eq!(
            parse_command("job Senior recruiter, Mumbai").unwrap(),
            Command::Job(Some("Senior recruiter, Mumbai".to_string()))
        );
    }

    #[test]
    fn test_parse_edit_is_one_based_and_keeps_spaces() {
        assert_eq!(
            parse_command("edit 2 body Hello there, Ada").unwrap(),
            Command::Edit {
                index: 1,
                field: DraftField::Body,
                value: "Hello there, Ada".to_string()
            }
        );
    }

    #[test]
    fn test_parse_edit_rejects_bad_input() {
        assert!(parse_command("edit").is_err());
        assert!(parse_command("edit one body x").is_err());
        assert!(parse_command("edit 0 body x").is_err());
        assert!(parse_command("edit 1 recipient x").is_err());
    }

    #[test]
    fn test_parse_unknown_command() {
        assert!(parse_command("launch").is_err());
    }

    #[test]
    fn test_truncate_keeps_short_strings() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("exactly-ten", 11), "exactly-ten");
    }

    #[test]
    fn test_truncate_marks_long_strings() {
        let long = "a very long candidate summary that will not fit";
        let cut = truncate(long, 10);
        assert_eq!(cut.chars().count(), 10);
        assert!(cut.ends_with('…'));
    }
}
