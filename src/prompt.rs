use std::io::{self, BufRead, Write};

use colored::Colorize;

/// Blocking user interaction used by the controller and the shell.
pub trait Prompter {
    /// Ask a yes/no question. Anything but an explicit yes declines.
    fn confirm(&mut self, message: &str) -> bool;

    /// Ask for a line of text. `None` when cancelled or empty.
    fn prompt(&mut self, message: &str) -> Option<String>;

    /// Show an error the user has to see.
    fn alert(&mut self, message: &str);

    /// Show an acknowledgement.
    fn notify(&mut self, message: &str);
}

/// Prompts on stdin, alerts on stderr.
pub struct TerminalPrompter;

impl TerminalPrompter {
    /// Read one trimmed line; `None` on EOF or read error.
    /// The question goes to stderr so stdout stays clean for `--json`.
    pub fn read_line(&mut self, message: &str) -> Option<String> {
        ask(message, &mut io::stdin().lock(), &mut io::stderr())
    }
}

fn ask(message: &str, input: &mut impl BufRead, out: &mut impl Write) -> Option<String> {
    write!(out, "{message}").ok()?;
    out.flush().ok()?;

    let mut line = String::new();
    match input.read_line(&mut line) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(line.trim().to_string()),
    }
}

impl Prompter for TerminalPrompter {
    fn confirm(&mut self, message: &str) -> bool {
        self.read_line(&format!("{message} [y/N] "))
            .is_some_and(|answer| {
                answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes")
            })
    }

    fn prompt(&mut self, message: &str) -> Option<String> {
        self.read_line(&format!("{message} "))
            .filter(|answer| !answer.is_empty())
    }

    fn alert(&mut self, message: &str) {
        eprintln!("{} {message}", "!".red().bold());
    }

    fn notify(&mut self, message: &str) {
        crate::output::print_success(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ask_writes_question_and_trims_answer() {
        let mut input: &[u8] = b"  1.2.0 \n";
        let mut out = Vec::new();

        let answer = ask("Version number:", &mut input, &mut out);
        assert_eq!(answer.as_deref(), Some("1.2.0"));
        assert_eq!(String::from_utf8(out).unwrap(), "Version number:");
    }

    #[test]
    fn test_ask_eof() {
        let mut input: &[u8] = b"";
        let mut out = Vec::new();
        assert_eq!(ask("Delete? [y/N] ", &mut input, &mut out), None);
    }
}
