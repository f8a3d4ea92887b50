//! Miscellaneous utility functions.

use anyhow::Context as _;
use colored::Colorize;
use serde::Serialize;
use std::io::Write;
use std::io::{self, ErrorKind};

use crate::value::{JsonNode, Shape};

// ==============================================================================
// Colorized JSON Output
// ==============================================================================

/// Write a single search result as colorized JSON followed by a newline.
/// Silently returns `Ok(())` on broken pipe so that piping to tools like
/// `less` or `head` exits cleanly.
///
/// # Errors
///
/// Returns an error if writing to `writer` fails.
pub fn write_colored_result<W: Write, N: JsonNode + Serialize>(
    writer: &mut W,
    value: &N,
    pretty: bool,
) -> anyhow::Result<()> {
    let result = (|| -> io::Result<()> {
        write_colored_json(writer, value, 0, Layout { pretty })?;
        writeln!(writer)?;
        Ok(())
    })();

    match result {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == ErrorKind::BrokenPipe => Ok(()),
        Err(err) => Err(err).context("write colorized JSON to stdout"),
    }
}

/// Serialize a leaf or key to its JSON text.
fn to_json_text<T: Serialize + ?Sized>(value: &T) -> io::Result<String> {
    serde_json::to_string(value).map_err(io::Error::other)
}

/// Whitespace between tokens. Compact output has none; pretty output puts
/// each member on its own line, two spaces per nesting level.
#[derive(Clone, Copy)]
struct Layout {
    pretty: bool,
}

impl Layout {
    const INDENT: usize = 2;

    /// Writes the separator in front of a container member at `level`.
    fn member<W: Write>(
        self,
        writer: &mut W,
        level: usize,
        first: bool,
    ) -> io::Result<()> {
        if !first {
            writer.write_all(b",")?;
        }
        self.newline(writer, level)
    }

    /// Writes the break in front of a closing bracket, unless the container
    /// was empty.
    fn close<W: Write>(
        self,
        writer: &mut W,
        level: usize,
        empty: bool,
    ) -> io::Result<()> {
        if empty { Ok(()) } else { self.newline(writer, level) }
    }

    fn newline<W: Write>(self, writer: &mut W, level: usize) -> io::Result<()> {
        if self.pretty {
            write!(writer, "\n{:width$}", "", width = level * Self::INDENT)?;
        }
        Ok(())
    }

    const fn colon(self) -> &'static str {
        if self.pretty { ": " } else { ":" }
    }
}

/// Recursively write a JSON value with syntax highlighting. Strings, numbers,
/// and keys are re-serialized so escaping matches `serde_json`.
fn write_colored_json<W: Write, N: JsonNode + Serialize>(
    writer: &mut W,
    value: &N,
    level: usize,
    layout: Layout,
) -> io::Result<()> {
    match value.shape() {
        Shape::Null => write!(writer, "{}", "null".red().dimmed()),
        Shape::Boolean => {
            write!(writer, "{}", to_json_text(value)?.yellow().bold())
        }
        Shape::Number => write!(writer, "{}", to_json_text(value)?.yellow()),
        Shape::String => write!(writer, "{}", to_json_text(value)?.green()),
        Shape::Array(items) => {
            writer.write_all(b"[")?;
            for (i, item) in items.iter().enumerate() {
                layout.member(writer, level + 1, i == 0)?;
                write_colored_json(writer, item, level + 1, layout)?;
            }
            layout.close(writer, level, items.is_empty())?;
            writer.write_all(b"]")
        }
        Shape::Object(entries) => {
            writer.write_all(b"{")?;
            let mut empty = true;
            for (key, member) in entries {
                layout.member(writer, level + 1, empty)?;
                empty = false;
                let name = to_json_text(key)?;
                write!(writer, "{}{}", name.cyan(), layout.colon())?;
                write_colored_json(writer, member, level + 1, layout)?;
            }
            layout.close(writer, level, empty)?;
            writer.write_all(b"}")
        }
    }
}
