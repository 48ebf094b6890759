//! Terminal output: the metadata summary, the cover preview and status screens.
//!
//! Everything is written to a generic `Write` so the loop can target stdout
//! and tests can target a buffer. Only the cover preview is drawn by an
//! external program, which inherits the terminal directly.

use std::io::Write;
use std::path::Path;

use crossterm::{
    cursor::MoveTo,
    queue,
    style::{Print, Stylize},
    terminal::{self, Clear, ClearType},
};

use crate::error::CycleError;
use crate::metadata::{Field, MetadataRecord};
use crate::process::{CommandRunner, CommandSpec};

const LABEL_WIDTH: usize = 15;
const FALLBACK_WIDTH: usize = 80;

/// Fields in the upper block, in print order. Track position is printed
/// together with the total.
const PRIMARY: [Field; 5] = [
    Field::Title,
    Field::Album,
    Field::Artist,
    Field::Date,
    Field::Duration,
];

const TECHNICAL: [Field; 5] = [
    Field::Codec,
    Field::FileSize,
    Field::BitRate,
    Field::BitDepth,
    Field::SamplingRate,
];

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Tone {
    Error,
    Warning,
    Info,
}

/// One line of a status screen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatusLine {
    pub text: String,
    pub tone: Tone,
}

impl StatusLine {
    pub fn new(text: impl Into<String>, tone: Tone) -> Self {
        Self {
            text: text.into(),
            tone,
        }
    }
}

/// `"<label padded to 15>: <value>"`.
pub fn field_line(label: &str, value: &str) -> String {
    format!("{label:<width$}: {value}", width = LABEL_WIDTH)
}

/// Centered `title` between runs of `=`, or a plain run when `title` is empty.
pub fn rule(title: &str, width: usize) -> String {
    if title.is_empty() {
        return "=".repeat(width);
    }
    let inner = format!(" {title} ");
    let fill = width.saturating_sub(inner.chars().count());
    let left = fill / 2;
    format!("{}{}{}", "=".repeat(left), inner, "=".repeat(fill - left))
}

pub struct Renderer<'a, W: Write> {
    out: W,
    runner: &'a dyn CommandRunner,
    /// Base image command; `None` disables the preview.
    image: Option<CommandSpec>,
    /// Rule width; `None` asks the terminal each time.
    width: Option<usize>,
}

impl<'a, W: Write> Renderer<'a, W> {
    pub fn new(out: W, runner: &'a dyn CommandRunner, image: Option<CommandSpec>) -> Self {
        Self {
            out,
            runner,
            image,
            width: None,
        }
    }

    #[cfg(test)]
    pub fn with_width(mut self, width: usize) -> Self {
        self.width = Some(width);
        self
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }

    #[cfg(test)]
    pub fn writer(&self) -> &W {
        &self.out
    }

    fn width(&self) -> usize {
        self.width.unwrap_or_else(|| {
            terminal::size()
                .map(|(cols, _)| cols as usize)
                .unwrap_or(FALLBACK_WIDTH)
        })
    }

    fn clear(&mut self) -> std::io::Result<()> {
        queue!(self.out, Clear(ClearType::All), MoveTo(0, 0))
    }

    fn print_styled(&mut self, line: &StatusLine) -> std::io::Result<()> {
        let text = line.text.as_str();
        match line.tone {
            Tone::Error => queue!(self.out, Print(text.red().bold()), Print("\n")),
            Tone::Warning => queue!(self.out, Print(text.yellow()), Print("\n")),
            Tone::Info => queue!(self.out, Print(text.cyan()), Print("\n")),
        }
    }

    /// Replace the whole screen with `lines`.
    pub fn show_status(&mut self, lines: &[StatusLine]) -> Result<(), CycleError> {
        self.clear()?;
        for line in lines {
            self.print_styled(line)?;
        }
        self.out.flush()?;
        Ok(())
    }

    /// Clear the screen and print the summary for `record`, followed by the
    /// cover preview when `artwork` is known. Preview failures are printed, not
    /// returned; only terminal write errors escape.
    pub fn render(
        &mut self,
        record: &MetadataRecord,
        artwork: Option<&Path>,
    ) -> Result<(), CycleError> {
        let width = self.width();
        self.clear()?;

        writeln!(self.out, "{}", rule("METADATA", width).bold())?;
        writeln!(self.out)?;
        for field in PRIMARY {
            writeln!(self.out, "{}", field_line(field.name(), record.get(field)))?;
        }
        let position = format!(
            "{}/{}",
            record.get(Field::TrackPosition),
            record.get(Field::TrackTotal)
        );
        writeln!(self.out, "{}", field_line(Field::TrackPosition.name(), &position))?;
        writeln!(self.out)?;
        writeln!(self.out, "{}", rule("", width))?;
        writeln!(self.out)?;
        for field in TECHNICAL {
            writeln!(self.out, "{}", field_line(field.name(), record.get(field)))?;
        }
        writeln!(self.out)?;
        writeln!(self.out, "{}", rule("", width))?;
        writeln!(self.out)?;

        match artwork {
            Some(cover) => self.draw_cover(cover)?,
            None => self.print_styled(&StatusLine::new(
                CycleError::ArtworkMissing.to_string(),
                Tone::Warning,
            ))?,
        }
        self.out.flush()?;
        Ok(())
    }

    fn draw_cover(&mut self, cover: &Path) -> std::io::Result<()> {
        let Some(base) = &self.image else {
            return Ok(());
        };
        let cmd = base.clone().path_arg(cover);

        // The child writes to the terminal itself; get our text out first.
        self.out.flush()?;

        let problem = match self.runner.passthrough(&cmd) {
            Ok(out) if out.success => None,
            Ok(out) => Some(out.failure_reason()),
            Err(e) => Some(e.to_string()),
        };
        if let Some(reason) = problem {
            tracing::warn!(command = %cmd, %reason, "cover preview failed");
            self.print_styled(&StatusLine::new(
                format!("Could not draw album cover: {reason}"),
                Tone::Error,
            ))?;
        }
        Ok(())
    }
}
