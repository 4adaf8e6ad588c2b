//! The fixed model roster and the interactive selector.

use std::fmt;
use std::io::{self, Write};

use tokio::io::{AsyncBufRead, Lines};

use crate::ui::style;

/// Models offered at session start, in display order. The roster is fixed
/// at build time; selection is always validated against it.
pub const AVAILABLE_MODELS: [&str; 4] = ["gpt-4o", "gpt-4o-mini", "gpt-4.1", "o4-mini"];

#[derive(Debug, PartialEq, Eq)]
pub enum SelectionError {
    NotANumber,
    OutOfRange(usize),
}

impl fmt::Display for SelectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionError::NotANumber => write!(f, "Please enter a number."),
            SelectionError::OutOfRange(_) => {
                write!(f, "Invalid choice. Please select a valid model number.")
            }
        }
    }
}

impl std::error::Error for SelectionError {}

/// Parses a 1-based menu choice against a roster of `len` entries.
pub fn parse_choice(input: &str, len: usize) -> Result<usize, SelectionError> {
    let choice: usize = input
        .trim()
        .parse()
        .map_err(|_| SelectionError::NotANumber)?;
    if choice == 0 || choice > len {
        return Err(SelectionError::OutOfRange(choice));
    }
    Ok(choice)
}

/// Prompts until the user picks a valid model. Bad input re-prompts with no
/// retry bound. Returns `None` when the input reaches end-of-file, which the
/// caller treats like a graceful exit.
pub async fn select_model<R>(lines: &mut Lines<R>) -> io::Result<Option<&'static str>>
where
    R: AsyncBufRead + Unpin,
{
    println!(
        "{}",
        style::info("Please choose a model for the chat session:")
    );
    for (i, model) in AVAILABLE_MODELS.iter().enumerate() {
        println!("{}", style::listing(&format!("{}. {}", i + 1, model)));
    }

    loop {
        print!("{}", style::prompt("Enter the number of your choice: "));
        io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            return Ok(None);
        };
        match parse_choice(&line, AVAILABLE_MODELS.len()) {
            Ok(choice) => return Ok(Some(AVAILABLE_MODELS[choice - 1])),
            Err(err) => println!("{}", style::error(&err.to_string())),
        }
    }
}
