//! Terminal rendering for the results screen and its accept/open prompt.

use std::io::{self, BufRead, IsTerminal, Write};

use colored::*;

use crate::models::ServiceStatus;
use crate::results::{Card, FeedbackSink, ResultsView, EMPTY_PLACEHOLDER};

pub fn print_header() {
    println!();
    println!("{}", "Study Program Recommender".blue().bold());
    println!(
        "{}",
        "Discover programs that match your Field, GPA, and Interests.".dimmed()
    );
    println!();
}

pub fn print_alert(message: &str) {
    eprintln!("{} {}", "!".yellow().bold(), message.yellow());
}

pub fn print_error_banner(message: &str) {
    eprintln!("{}", message.red().bold());
}

pub fn print_status(base_url: &str, status: &ServiceStatus) {
    println!(
        "{} {} ({} courses available)",
        base_url.bold(),
        status.status.green(),
        status.courses_available
    );
}

fn print_card(position: usize, card: &Card) {
    println!(
        "{} {}  {}",
        format!("[{position}]").dimmed(),
        card.program_name.bold(),
        format!("{}% Match", card.match_percent).green()
    );
    println!("    {}", card.explanation.italic());

    if !card.skills.is_empty() {
        println!("    {} {}", "Skills you'll develop:".dimmed(), card.skills.join(", "));
    }
    if !card.tags.is_empty() {
        println!("    {} {}", "Related topics:".dimmed(), card.tags.join(", "));
    }

    let action = if card.accepted {
        "Accepted".green().bold()
    } else {
        "I'm Interested".cyan()
    };
    println!("    [{action}]");
    println!();
}

pub fn print_results<F: FeedbackSink + ?Sized>(view: &ResultsView<'_, F>) {
    if view.is_empty() {
        println!("{}", EMPTY_PLACEHOLDER.dimmed());
        return;
    }

    for (index, card) in view.cards().iter().enumerate() {
        print_card(index + 1, card);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptCommand {
    Accept(usize),
    Open(usize),
    List,
    Quit,
    Unknown,
}

/// Parses one prompt line. Positions are 1-based as printed.
pub fn parse_command(line: &str) -> PromptCommand {
    let mut parts = line.split_whitespace();
    let verb = parts.next().unwrap_or_default();
    let position = parts
        .next()
        .and_then(|p| p.parse::<usize>().ok())
        .filter(|p| *p > 0);

    match (verb, position) {
        ("accept" | "a", Some(p)) => PromptCommand::Accept(p - 1),
        ("open" | "o", Some(p)) => PromptCommand::Open(p - 1),
        ("list" | "l", None) => PromptCommand::List,
        ("quit" | "q" | "back", None) | ("", None) => PromptCommand::Quit,
        _ => PromptCommand::Unknown,
    }
}

/// Runs the accept/open loop until the user leaves or stdin closes. Skipped
/// entirely when stdin is not a terminal.
pub fn run_results_prompt<F: FeedbackSink + ?Sized>(view: &mut ResultsView<'_, F>) -> io::Result<()> {
    if view.is_empty() || !io::stdin().is_terminal() {
        return Ok(());
    }

    println!(
        "{}",
        "Commands: accept <n>, open <n>, list, quit".dimmed()
    );

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("{} ", "results>".green().bold());
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            return Ok(());
        };
        let line = line?;

        match parse_command(line.trim()) {
            PromptCommand::Accept(index) => match view.program_id_at(index) {
                Some(program_id) => {
                    let already = view.is_accepted(program_id);
                    view.accept(program_id);
                    if already {
                        println!("{}", "Already accepted. Feedback noted again.".green());
                    } else {
                        println!("{}", "Feedback noted!".green());
                    }
                }
                None => print_alert("No recommendation at that position."),
            },
            PromptCommand::Open(index) => match view.program_id_at(index) {
                Some(program_id) => {
                    view.click(program_id);
                    if let Some(card) = view.cards().get(index) {
                        print_card(index + 1, card);
                    }
                }
                None => print_alert("No recommendation at that position."),
            },
            PromptCommand::List => print_results(view),
            PromptCommand::Quit => return Ok(()),
            PromptCommand::Unknown => print_alert("Unknown command."),
        }
    }
}
