//! Interactive entry point: pick what to run from stdin.

use colored::Colorize;
use std::io::{self, BufRead, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    FullSuite,
    SingleFlow,
    Fixture,
}

impl MenuChoice {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(Self::FullSuite),
            "2" => Some(Self::SingleFlow),
            "3" => Some(Self::Fixture),
            _ => None,
        }
    }
}

/// Print the menu and read one choice. Anything unrecognised, including end
/// of input, falls back to the full suite.
pub fn prompt<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> io::Result<MenuChoice> {
    writeln!(output, "{}", "Pet-store user API test harness".bold())?;
    writeln!(output, "Choose what to run:")?;
    writeln!(output, "1 - Run all tests")?;
    writeln!(output, "2 - Run the full user flow")?;
    writeln!(output, "3 - Generate test data")?;
    write!(output, "Enter a number (1-3): ")?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;

    match MenuChoice::parse(&line) {
        Some(choice) => Ok(choice),
        None => {
            writeln!(
                output,
                "{} Invalid choice, running all tests...",
                "⚠".yellow()
            )?;
            Ok(MenuChoice::FullSuite)
        }
    }
}
