//! Operator console
//!
//! The session talks to the operator only through [`Console`], so the
//! whole flow can run against a real terminal or a scripted transcript.

use crate::error::{Error, Result};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader, Stdin};

/// Input and output for an interactive session
#[async_trait]
pub trait Console: Send {
    /// Show `message` and read one line of input, without its line ending
    ///
    /// Fails with [`Error::Interrupted`] when input is closed.
    async fn prompt(&mut self, message: &str) -> Result<String>;

    /// Stream for results and banners
    fn out(&mut self) -> &mut (dyn Write + Send);

    /// Ask a yes/no question; only `y` (any case) counts as yes
    async fn confirm(&mut self, question: &str) -> Result<bool> {
        let answer = self.prompt(question).await?;
        Ok(answer.trim().eq_ignore_ascii_case("y"))
    }
}

/// Console on the process's stdin and stdout
pub struct StdinConsole {
    input: BufReader<Stdin>,
    output: std::io::Stdout,
}

impl StdinConsole {
    /// Create a console on the process streams
    pub fn new() -> Self {
        Self {
            input: BufReader::new(tokio::io::stdin()),
            output: std::io::stdout(),
        }
    }
}

impl Default for StdinConsole {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Console for StdinConsole {
    async fn prompt(&mut self, message: &str) -> Result<String> {
        write!(self.output, "{message}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line).await? == 0 {
            return Err(Error::Interrupted);
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    fn out(&mut self) -> &mut (dyn Write + Send) {
        &mut self.output
    }
}

/// Console that answers prompts from a fixed list
///
/// Used for unattended runs and tests. Running out of answers behaves like
/// a closed terminal.
#[derive(Debug, Default)]
pub struct ScriptedConsole {
    answers: VecDeque<String>,
    prompts: Vec<String>,
    output: Vec<u8>,
}

impl ScriptedConsole {
    /// Create a console that will give these answers in order
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            prompts: Vec::new(),
            output: Vec::new(),
        }
    }

    /// Prompts shown so far
    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }

    /// Everything written to the output stream
    pub fn output(&self) -> String {
        String::from_utf8_lossy(&self.output).into_owned()
    }

    /// Answers not consumed yet
    pub fn remaining(&self) -> usize {
        self.answers.len()
    }
}

#[async_trait]
impl Console for ScriptedConsole {
    async fn prompt(&mut self, message: &str) -> Result<String> {
        self.prompts.push(message.to_string());
        self.output.extend_from_slice(message.as_bytes());
        let answer = self.answers.pop_front().ok_or(Error::Interrupted)?;
        self.output.extend_from_slice(answer.as_bytes());
        self.output.push(b'\n');
        Ok(answer)
    }

    fn out(&mut self) -> &mut (dyn Write + Send) {
        &mut self.output
    }
}
