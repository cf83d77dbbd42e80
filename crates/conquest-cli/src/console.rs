//! Line-oriented prompting over any reader/writer pair.

use std::io::{self, BufRead, Write};
use std::str::FromStr;

/// Errors from console interaction.
#[derive(Debug, thiserror::Error)]
pub enum ConsoleError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Input ended unexpectedly")]
    EndOfInput,
}

/// Prompts on `output` and reads answers from `input`.
#[derive(Debug)]
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Writer for rendering.
    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    /// Consume the console, returning the writer.
    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }

    /// Print one line.
    pub fn say(&mut self, text: impl std::fmt::Display) -> Result<(), ConsoleError> {
        writeln!(self.output, "{}", text)?;
        Ok(())
    }

    /// Print `prompt` and read one trimmed line.
    pub fn read_line(&mut self, prompt: &str) -> Result<String, ConsoleError> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(ConsoleError::EndOfInput);
        }
        Ok(line.trim().to_string())
    }

    /// Read a number, discarding unparsable answers and asking again.
    pub fn read_number<T: FromStr>(&mut self, prompt: &str) -> Result<T, ConsoleError> {
        loop {
            let answer = self.read_line(prompt)?;
            match answer.parse::<T>() {
                Ok(value) => return Ok(value),
                Err(_) => {
                    tracing::warn!(input = %answer, "discarding non-numeric input");
                    self.say(" Invalid input. Please enter a whole number.")?;
                }
            }
        }
    }
}
