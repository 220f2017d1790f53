//! Number guessing game.

use std::cmp::Ordering;
use std::ops::RangeInclusive;

/// Range the hidden number is drawn from.
pub const TARGET_RANGE: RangeInclusive<u32> = 1..=100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessOutcome {
    TooLow,
    TooHigh,
    Correct { attempts: u32 },
    Invalid,
}

impl GuessOutcome {
    pub fn message(self) -> String {
        match self {
            GuessOutcome::TooLow => "Too low! Try again.".to_string(),
            GuessOutcome::TooHigh => "Too high! Try again.".to_string(),
            GuessOutcome::Correct { attempts: 1 } => {
                "Correct! You guessed it on the first try.".to_string()
            }
            GuessOutcome::Correct { attempts } => {
                format!("Correct! You guessed it in {attempts} tries.")
            }
            GuessOutcome::Invalid => "Please enter a valid number.".to_string(),
        }
    }

    pub fn is_win(self) -> bool {
        matches!(self, GuessOutcome::Correct { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuessingGame {
    target: u32,
    attempts: u32,
    last: Option<GuessOutcome>,
}

impl GuessingGame {
    /// Starts a game with the given hidden number. Out-of-range targets are
    /// pulled into [`TARGET_RANGE`].
    pub fn new(target: u32) -> Self {
        Self {
            target: target.clamp(*TARGET_RANGE.start(), *TARGET_RANGE.end()),
            attempts: 0,
            last: None,
        }
    }

    pub fn target(&self) -> u32 {
        self.target
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn last_outcome(&self) -> Option<GuessOutcome> {
        self.last
    }

    /// Scores a typed guess. Non-numeric input is not counted as an attempt.
    pub fn guess(&mut self, input: &str) -> GuessOutcome {
        let outcome = match compare_guess(input.trim(), self.target) {
            None => GuessOutcome::Invalid,
            Some(ordering) => {
                self.attempts += 1;
                match ordering {
                    Ordering::Less => GuessOutcome::TooLow,
                    Ordering::Greater => GuessOutcome::TooHigh,
                    Ordering::Equal => GuessOutcome::Correct {
                        attempts: self.attempts,
                    },
                }
            }
        };
        self.last = Some(outcome);
        outcome
    }
}

/// Orders a whole number against the target. Numbers too long for `i64`
/// still compare by their sign.
fn compare_guess(input: &str, target: u32) -> Option<Ordering> {
    if let Ok(value) = input.parse::<i64>() {
        return Some(value.cmp(&i64::from(target)));
    }

    let (negative, digits) = match input.strip_prefix('-') {
        Some(digits) => (true, digits),
        None => (false, input.strip_prefix('+').unwrap_or(input)),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    Some(if negative {
        Ordering::Less
    } else {
        Ordering::Greater
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_guess_wins() {
        let mut game = GuessingGame::new(50);
        let outcome = game.guess("50");
        assert!(outcome.is_win());
        assert!(outcome.message().starts_with("Correct!"));
    }

    #[test]
    fn low_and_high_guesses() {
        let mut game = GuessingGame::new(50);
        assert_eq!(game.guess("10"), GuessOutcome::TooLow);
        assert!(GuessOutcome::TooLow.message().to_lowercase().contains("too low"));
        assert_eq!(game.guess("90"), GuessOutcome::TooHigh);
        assert!(GuessOutcome::TooHigh.message().to_lowercase().contains("too high"));
        assert_eq!(game.guess(" 50 "), GuessOutcome::Correct { attempts: 3 });
        assert_eq!(
            GuessOutcome::Correct { attempts: 3 }.message(),
            "Correct! You guessed it in 3 tries."
        );
    }

    #[test]
    fn invalid_input_keeps_target_and_attempts() {
        let mut game = GuessingGame::new(50);
        let before = game.clone();
        assert_eq!(game.guess("fifty"), GuessOutcome::Invalid);
        assert_eq!(game.guess(""), GuessOutcome::Invalid);
        assert_eq!(game.target(), before.target());
        assert_eq!(game.attempts(), 0);
        assert!(
            GuessOutcome::Invalid
                .message()
                .to_lowercase()
                .contains("valid number")
        );
    }

    #[test]
    fn oversized_numbers_still_compare() {
        let mut game = GuessingGame::new(50);
        assert_eq!(game.guess("99999999999999999999"), GuessOutcome::TooHigh);
        assert_eq!(
            game.guess("-99999999999999999999"),
            GuessOutcome::TooLow
        );
        assert_eq!(game.guess("+7"), GuessOutcome::TooLow);
        assert_eq!(game.attempts(), 3);

        assert_eq!(game.guess("12e5"), GuessOutcome::Invalid);
        assert_eq!(game.guess("-"), GuessOutcome::Invalid);
        assert_eq!(game.attempts(), 3);
    }

    #[test]
    fn target_is_kept_in_range() {
        assert_eq!(GuessingGame::new(0).target(), 1);
        assert_eq!(GuessingGame::new(500).target(), 100);
    }
}
