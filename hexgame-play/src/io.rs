//! Text input/output capability used by the game controller

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

/// Line-based user interaction
pub trait GameIo {
    /// Show a message to the user
    fn out(&mut self, message: &str);

    /// Block for one line of input, without the trailing newline
    ///
    /// End of input is reported as `io::ErrorKind::UnexpectedEof`.
    fn read_line(&mut self, prompt: Option<&str>) -> io::Result<String>;

    /// Read one line and pass it through `filter`
    fn read_with<T, F>(&mut self, prompt: Option<&str>, filter: F) -> io::Result<T>
    where
        Self: Sized,
        F: FnOnce(&str) -> T,
    {
        self.read_line(prompt).map(|line| filter(&line))
    }
}

fn end_of_input() -> io::Error {
    io::Error::new(io::ErrorKind::UnexpectedEof, "input closed")
}

/// Terminal interaction over stdin/stdout
#[derive(Debug, Default)]
pub struct ConsoleIo;

impl GameIo for ConsoleIo {
    fn out(&mut self, message: &str) {
        println!("{}", message);
    }

    fn read_line(&mut self, prompt: Option<&str>) -> io::Result<String> {
        if let Some(prompt) = prompt {
            let mut stdout = io::stdout().lock();
            write!(stdout, "{}", prompt)?;
            stdout.flush()?;
        }

        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            return Err(end_of_input());
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }
}

/// Pre-recorded input with captured output
#[derive(Debug, Default)]
pub struct ScriptedIo {
    inputs: VecDeque<String>,
    output: Vec<String>,
}

impl ScriptedIo {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            inputs: lines.into_iter().map(Into::into).collect(),
            output: Vec::new(),
        }
    }

    /// Everything written with `out`, in order
    pub fn output(&self) -> &[String] {
        &self.output
    }

    /// Output joined into one string
    pub fn transcript(&self) -> String {
        self.output.join("\n")
    }

    /// Inputs not consumed yet
    pub fn remaining(&self) -> usize {
        self.inputs.len()
    }
}

impl GameIo for ScriptedIo {
    fn out(&mut self, message: &str) {
        self.output.push(message.to_string());
    }

    fn read_line(&mut self, _prompt: Option<&str>) -> io::Result<String> {
        self.inputs.pop_front().ok_or_else(end_of_input)
    }
}
