//! Interactive confirmation on the terminal.

use std::io::{self, BufRead, Write};

use super::Confirmation;

/// Reads answers from stdin, blocking until a line arrives
#[derive(Debug, Default)]
pub struct StdinPrompt;

impl Confirmation for StdinPrompt {
    fn ask(&self, prompt: &str) -> Option<String> {
        print!("{}", prompt);
        // Prompt text must be visible before we block on input
        let _ = io::stdout().flush();

        let mut answer = String::new();
        match io::stdin().lock().read_line(&mut answer) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(answer),
        }
    }
}
