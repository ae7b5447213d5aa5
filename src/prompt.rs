//! Yes/no confirmation prompts.

use std::io::{self, BufRead, Write};

/// Asks `question` and reads one line from `input`.
///
/// `y` and `j` (either case) mean yes; anything else, including end of input,
/// means no.
///
/// # Errors
///
/// Returns I/O errors from writing the question or reading the answer.
pub fn confirm<R: BufRead, W: Write>(input: &mut R, out: &mut W, question: &str) -> io::Result<bool> {
    write!(out, "{question} (y/n): ")?;
    out.flush()?;

    let mut answer = String::new();
    if input.read_line(&mut answer)? == 0 {
        writeln!(out)?;
        return Ok(false);
    }
    Ok(is_yes(&answer))
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "j")
}
