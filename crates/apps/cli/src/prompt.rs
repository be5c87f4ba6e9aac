use std::io::{self, BufRead, Write};

use views::Prompter;

/// Line-based confirm/alert over any reader and writer.
pub struct ConsolePrompter<R, W> {
    input: R,
    output: W,
    assume_yes: bool,
}

impl ConsolePrompter<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio(assume_yes: bool) -> Self {
        Self::new(io::stdin().lock(), io::stdout(), assume_yes)
    }
}

impl<R: BufRead, W: Write> ConsolePrompter<R, W> {
    pub fn new(input: R, output: W, assume_yes: bool) -> Self {
        Self {
            input,
            output,
            assume_yes,
        }
    }

    /// Print `label` and read one line, without the trailing newline.
    pub fn ask(&mut self, label: &str) -> io::Result<String> {
        write!(self.output, "{label}")?;
        self.output.flush()?;
        let mut line = String::new();
        self.input.read_line(&mut line)?;
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }
}

impl<R: BufRead, W: Write> Prompter for ConsolePrompter<R, W> {
    fn confirm(&mut self, message: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        match self.ask(&format!("{message} [y/N] ")) {
            Ok(answer) => matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
            Err(_) => false,
        }
    }

    fn alert(&mut self, message: &str) {
        let _ = writeln!(self.output, "{message}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Cursor;

    #[test]
    fn only_yes_confirms() {
        let cases = [
            ("y\n", true),
            ("YES\n", true),
            ("n\n", false),
            ("\n", false),
            ("", false),
        ];
        for (input, expected) in cases {
            let mut out = Vec::new();
            let mut p = ConsolePrompter::new(Cursor::new(input), &mut out, false);
            assert_eq!(p.confirm("Delete?"), expected, "input {input:?}");
        }
    }

    #[test]
    fn assume_yes_skips_the_question() {
        let mut out = Vec::new();
        let mut p = ConsolePrompter::new(Cursor::new(""), &mut out, true);
        assert!(p.confirm("Delete?"));
        assert!(out.is_empty());
    }

    #[test]
    fn ask_strips_line_ending() {
        let mut out = Vec::new();
        let mut p = ConsolePrompter::new(Cursor::new("hunter2\r\n"), &mut out, false);
        assert_eq!(p.ask("Password: ").unwrap(), "hunter2");
        p.alert("done");
        assert_eq!(String::from_utf8(out).unwrap(), "Password: done\n");
    }
}
