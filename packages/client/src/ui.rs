//! UI utilities for the client.

use std::io::Write;

/// Prompt shown before each input line
pub fn prompt(name: &str) -> String {
    format!("{}> ", name)
}

/// Redisplay the prompt after receiving a message
pub fn redisplay_prompt(name: &str) {
    print!("{}", prompt(name));
    std::io::stdout().flush().ok();
}
