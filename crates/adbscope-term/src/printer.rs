use std::io::{self, Write};

use crossterm::queue;
use crossterm::style::{Print, ResetColor, SetForegroundColor};

use adbscope_types::StyledLine;

use crate::Theme;

/// Writes styled lines to a terminal, one flush per line
pub struct Printer<W: Write> {
    out: W,
    color: bool,
}

impl Printer<io::Stdout> {
    /// Printer for the process stdout
    pub fn stdout(color: bool) -> Self {
        Self::new(io::stdout(), color)
    }
}

impl<W: Write> Printer<W> {
    pub fn new(out: W, color: bool) -> Self {
        Self { out, color }
    }

    /// Print the startup banner in the default style
    pub fn banner(&mut self, target: &str, filter: &str) -> io::Result<()> {
        writeln!(self.out, "Streaming logcat from {target}")?;
        writeln!(self.out, "Filter: {filter}")?;
        writeln!(self.out)?;
        self.out.flush()
    }

    /// Print one line in its style
    pub fn print(&mut self, line: &StyledLine) -> io::Result<()> {
        match Theme::color(line.style).filter(|_| self.color) {
            Some(color) => queue!(
                self.out,
                SetForegroundColor(color),
                Print(&line.text),
                ResetColor,
                Print('\n')
            )?,
            None => queue!(self.out, Print(&line.text), Print('\n'))?,
        }
        self.out.flush()
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use adbscope_types::LineStyle;

    fn render(line: StyledLine, color: bool) -> String {
        let mut printer = Printer::new(Vec::new(), color);
        printer.print(&line).unwrap();
        String::from_utf8(printer.into_inner()).unwrap()
    }

    #[test]
    fn test_default_style_is_plain() {
        let out = render(StyledLine::new("location ok", LineStyle::Default), true);
        assert_eq!(out, "location ok\n");
    }

    #[test]
    fn test_color_disabled_is_plain() {
        let out = render(StyledLine::new(" E location", LineStyle::Red), false);
        assert_eq!(out, " E location\n");
    }

    #[cfg(unix)]
    #[test]
    fn test_colored_style_is_wrapped_in_escapes() {
        let out = render(StyledLine::new("location true", LineStyle::Green), true);
        assert!(out.starts_with("\x1b["));
        assert!(out.contains("location true"));
        assert!(out.ends_with("\x1b[0m\n"));
    }

    #[test]
    fn test_banner() {
        let mut printer = Printer::new(Vec::new(), true);
        printer.banner("localhost", "location").unwrap();
        let out = String::from_utf8(printer.into_inner()).unwrap();
        assert_eq!(out, "Streaming logcat from localhost\nFilter: location\n\n");
    }
}
