//! Standard input as a swappable capability, so commands can be exercised
//! as if piped or interactive without a real terminal.

use std::io::{self, IsTerminal, Read};

use crate::error::{Error, Result};

pub trait Input {
    /// Whether the stream is attached to an interactive terminal.
    fn is_interactive(&self) -> bool;

    /// Reads the stream to its end.
    fn read_all(&mut self) -> Result<Vec<u8>>;

    /// The piped contents, or `None` when the stream is a terminal.
    fn piped(&mut self) -> Result<Option<Vec<u8>>> {
        if self.is_interactive() {
            return Ok(None);
        }
        self.read_all().map(Some)
    }
}

/// The process's real standard input.
#[derive(Debug, Default)]
pub struct Stdin;

impl Input for Stdin {
    fn is_interactive(&self) -> bool {
        io::stdin().is_terminal()
    }

    fn read_all(&mut self) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        io::stdin().lock().read_to_end(&mut buf).map_err(Error::Stdin)?;
        Ok(buf)
    }
}

/// In-memory input for tests and embedding.
#[derive(Debug, Clone)]
pub enum FakeInput {
    Interactive,
    Piped(Vec<u8>),
}

impl FakeInput {
    pub fn piped(data: impl Into<Vec<u8>>) -> Self {
        Self::Piped(data.into())
    }
}

impl Input for FakeInput {
    fn is_interactive(&self) -> bool {
        matches!(self, Self::Interactive)
    }

    fn read_all(&mut self) -> Result<Vec<u8>> {
        match self {
            Self::Interactive => Ok(Vec::new()),
            Self::Piped(data) => Ok(std::mem::take(data)),
        }
    }
}
