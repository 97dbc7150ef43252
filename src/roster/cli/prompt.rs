use roster::table::{Confirm, Decision};
use std::io::{self, BufRead, Write};

/// Asks on the terminal. Anything but `y`/`yes` (including EOF) cancels.
pub struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&mut self, title: &str, description: &str) -> Decision {
        let mut stderr = io::stderr();
        let _ = write!(stderr, "{}\n{} [y/N] ", title, description);
        let _ = stderr.flush();

        let mut answer = String::new();
        match io::stdin().lock().read_line(&mut answer) {
            Ok(_) => parse_answer(&answer),
            Err(_) => Decision::Cancelled,
        }
    }
}

fn parse_answer(answer: &str) -> Decision {
    match answer.trim().to_lowercase().as_str() {
        "y" | "yes" => Decision::Confirmed,
        _ => Decision::Cancelled,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_yes_confirms() {
        assert_eq!(parse_answer("y\n"), Decision::Confirmed);
        assert_eq!(parse_answer(" YES "), Decision::Confirmed);
        assert_eq!(parse_answer(""), Decision::Cancelled);
        assert_eq!(parse_answer("n"), Decision::Cancelled);
        assert_eq!(parse_answer("sure"), Decision::Cancelled);
    }
}
