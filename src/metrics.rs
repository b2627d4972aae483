//! Words-per-minute and accuracy, shared by every practice and game screen.

use std::time::Duration;

/// Elapsed time never counts as less than this many minutes when dividing.
pub const MIN_ELAPSED_MINUTES: f64 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Metrics {
    pub wpm: u32,
    pub accuracy: u8,
}

impl Default for Metrics {
    fn default() -> Self {
        Self {
            wpm: 0,
            accuracy: 100,
        }
    }
}

impl Metrics {
    pub fn compute(typed: &str, elapsed: Duration, total_keystrokes: u32, errors: u32) -> Self {
        Self {
            wpm: wpm(typed, elapsed),
            accuracy: accuracy(total_keystrokes, errors),
        }
    }
}

/// Number of whitespace-delimited tokens
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

pub fn wpm(typed: &str, elapsed: Duration) -> u32 {
    wpm_from_words(word_count(typed), elapsed)
}

pub fn wpm_from_words(words: usize, elapsed: Duration) -> u32 {
    let minutes = (elapsed.as_secs_f64() / 60.0).max(MIN_ELAPSED_MINUTES);
    (words as f64 / minutes).round() as u32
}

/// Percentage of keystrokes that were not errors; 100 before the first keystroke.
pub fn accuracy(total_keystrokes: u32, errors: u32) -> u8 {
    if total_keystrokes == 0 {
        return 100;
    }
    let good = total_keystrokes.saturating_sub(errors);
    ((good as f64 / total_keystrokes as f64) * 100.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn word_count_splits_on_any_whitespace() {
        assert_eq!(word_count(""), 0);
        assert_eq!(word_count("   "), 0);
        assert_eq!(word_count("cat"), 1);
        assert_eq!(word_count("  the quick\tbrown\nfox "), 4);
    }

    #[test]
    fn wpm_over_one_minute() {
        assert_eq!(wpm("one two three", Duration::from_secs(60)), 3);
        assert_eq!(wpm("one two three", Duration::from_secs(30)), 6);
    }

    #[test]
    fn wpm_floors_elapsed_time() {
        // 0.6s is exactly the floor
        assert_eq!(wpm("cat", Duration::ZERO), 100);
        assert_eq!(wpm("cat", Duration::from_millis(1)), 100);
        assert_eq!(wpm("", Duration::ZERO), 0);
    }

    #[test]
    fn wpm_rounds_to_nearest() {
        // 2 words in 45s = 2.666.. wpm
        assert_eq!(wpm("ab cd", Duration::from_secs(45)), 3);
    }

    #[test]
    fn accuracy_without_keystrokes_is_perfect() {
        assert_eq!(accuracy(0, 0), 100);
    }

    #[test]
    fn accuracy_rounds() {
        assert_eq!(accuracy(4, 1), 75);
        assert_eq!(accuracy(3, 1), 67);
        assert_eq!(accuracy(3, 3), 0);
    }

    #[test]
    fn accuracy_never_leaves_range() {
        for total in 0..50u32 {
            for errors in 0..=total {
                assert!(accuracy(total, errors) <= 100);
            }
        }
        assert_eq!(accuracy(2, 5), 0);
    }

    #[test]
    fn default_metrics() {
        assert_eq!(
            Metrics::default(),
            Metrics {
                wpm: 0,
                accuracy: 100
            }
        );
    }
}
