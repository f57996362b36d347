//! Minimal stdin prompt helpers for the interactive commands.

use std::io::{self, Write};

/// Print `prompt` (no newline) and read one trimmed line.
///
/// Returns `None` on EOF so menu loops terminate when stdin closes.
pub fn read_line(prompt: &str) -> Option<String> {
    print!("{prompt}");
    if io::stdout().flush().is_err() {
        return None;
    }
    let mut line = String::new();
    match io::stdin().read_line(&mut line) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(line.trim().to_string()),
    }
}

/// Print a formatted section header.
pub fn print_header(title: &str) {
    println!("\n{}", "=".repeat(60));
    println!("  {title}");
    println!("{}", "=".repeat(60));
}
