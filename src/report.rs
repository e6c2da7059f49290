//! Human-readable progress and result lines on stdout.

use crate::db::models::Book;
use std::io::{self, Write};

pub const SEPARATOR: &str = "---------------------------------";

pub struct Reporter<W: Write> {
    out: W,
}

impl Reporter<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Announced before every connection attempt.
    pub fn waiting(&mut self) -> io::Result<()> {
        writeln!(self.out, "Waiting for db... ")
    }

    /// Start a step whose completion is printed on the same line.
    pub fn begin(&mut self, what: &str) -> io::Result<()> {
        write!(self.out, "{what}")?;
        self.out.flush()
    }

    pub fn line(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out, "{text}")
    }

    pub fn done(&mut self) -> io::Result<()> {
        self.line("DONE")
    }

    /// Separator followed by one `- <id>: <title>` line per record.
    pub fn report(&mut self, books: &[Book]) -> io::Result<()> {
        writeln!(self.out, "{SEPARATOR}")?;
        for book in books {
            writeln!(self.out, "- {book}")?;
        }
        self.out.flush()
    }
}
