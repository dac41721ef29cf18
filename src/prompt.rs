use std::io::{self, BufRead, Write};

/// Answers accepted as "yes", compared case-insensitively.
pub const AFFIRMATIVE: &[&str] = &["y", "yes"];

/// A yes/no question asked before anything is removed.
pub trait Confirm {
    /// `true` only for an explicit affirmative answer.
    fn confirm(&mut self, question: &str) -> bool;
}

/// Line-based prompt over any reader/writer pair, usually stdin/stdout.
pub struct LinePrompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LinePrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        LinePrompt { input, output }
    }
}

impl LinePrompt<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        LinePrompt::new(io::stdin().lock(), io::stdout())
    }
}

impl LinePrompt<io::StdinLock<'static>, io::Stderr> {
    pub fn stdin_stderr() -> Self {
        LinePrompt::new(io::stdin().lock(), io::stderr())
    }
}

impl<R: BufRead, W: Write> Confirm for LinePrompt<R, W> {
    fn confirm(&mut self, question: &str) -> bool {
        if write!(self.output, "{} [y/N]: ", question)
            .and_then(|_| self.output.flush())
            .is_err()
        {
            return false;
        }

        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) => false,
            Ok(_) => is_affirmative(&line),
            Err(e) => {
                tracing::warn!("Failed to read confirmation: {}", e);
                false
            }
        }
    }
}

pub fn is_affirmative(answer: &str) -> bool {
    let answer = answer.trim().to_lowercase();
    AFFIRMATIVE.contains(&answer.as_str())
}

/// Fixed answer, for non-interactive callers and tests.
#[derive(Debug, Clone, Copy)]
pub struct Answer(pub bool);

impl Confirm for Answer {
    fn confirm(&mut self, _question: &str) -> bool {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn ask(input: &str) -> (bool, String) {
        let mut output = Vec::<u8>::new();
        let answer = LinePrompt::new(Cursor::new(input.as_bytes()), &mut output).confirm("Delete?");
        (answer, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_affirmative_answers() {
        for input in ["y\n", "Y\n", "yes\n", "YES\n", "  Yes  \n", "y"] {
            assert!(ask(input).0, "{:?} should confirm", input);
        }
    }

    #[test]
    fn test_everything_else_declines() {
        for input in ["n\n", "no\n", "\n", "", "yep\n", "ye\n", "sure\n"] {
            assert!(!ask(input).0, "{:?} should decline", input);
        }
    }

    #[test]
    fn test_prompt_is_written() {
        let (_, output) = ask("n\n");
        assert_eq!(output, "Delete? [y/N]: ");
    }

    #[test]
    fn test_read_failure_declines() {
        struct Broken;
        impl io::Read for Broken {
            fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
                Err(io::Error::other("tty gone"))
            }
        }
        let mut output = Vec::<u8>::new();
        let mut prompt = LinePrompt::new(io::BufReader::new(Broken), &mut output);
        assert!(!prompt.confirm("Delete?"));
    }
}
