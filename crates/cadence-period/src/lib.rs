//! Minimal Repeating Unit
//!
//! Given an assembled message, find the length of the shortest unit `p` such
//! that the message is `p` repeated a **whole** number of times.
//!
//! # How
//!
//! The prefix function (KMP failure function) of the message gives, at the
//! last position, the longest proper border `b`. The candidate period is
//! `n - b`. It only counts if it divides `n`; otherwise the message is its
//! own unit.
//!
//! - `""`       → 0
//! - `"abab"`   → 2
//! - `"abcab"`  → 5 (period 3 exists, but it does not tile the string)
//! - `"aaaa"`   → 1
//!
//! Linear in the message length. Lengths are counted in chars.

mod prefix;

pub use prefix::prefix_function;

/// Length of the minimal repeating unit of a slice.
///
/// Returns 0 for an empty slice and `len` when no shorter unit tiles it.
pub fn period_of<T: Eq>(items: &[T]) -> usize {
    let n = items.len();
    if n == 0 {
        return 0;
    }
    let failure = prefix_function(items);
    let candidate = n - failure[n - 1];
    if n % candidate == 0 {
        candidate
    } else {
        n
    }
}

/// Length of the minimal repeating unit of a message, in chars.
///
/// # Examples
///
/// ```
/// use cadence_period::repeating_unit_length;
///
/// assert_eq!(repeating_unit_length(""), 0);
/// assert_eq!(repeating_unit_length("abcd"), 4);
/// assert_eq!(repeating_unit_length("abab"), 2);
/// assert_eq!(repeating_unit_length("aa"), 1);
/// ```
pub fn repeating_unit_length(message: &str) -> usize {
    let chars: Vec<char> = message.chars().collect();
    period_of(&chars)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Smallest k dividing n with s[i] == s[i mod k] for all i.
    fn brute_force(s: &[char]) -> usize {
        let n = s.len();
        (1..=n)
            .find(|&k| n % k == 0 && (0..n).all(|i| s[i] == s[i % k]))
            .unwrap_or(0)
    }

    #[test]
    fn empty_message_has_no_unit() {
        assert_eq!(repeating_unit_length(""), 0);
    }

    #[test]
    fn known_messages() {
        let cases = [
            ("a", 1),
            ("ab", 2),
            ("aa", 1),
            ("abcd", 4),
            ("abab", 2),
            ("abcabcabc", 3),
            ("abcab", 5),   // border "ab" gives 3, which doesn't divide 5
            ("aabaab", 3),
            ("abaaba", 3),
            ("abababab", 2),
            ("xyzxyzx", 7),
        ];

        for (message, expected) in cases {
            assert_eq!(
                repeating_unit_length(message),
                expected,
                "unit({:?}) should be {}",
                message,
                expected
            );
        }
    }

    #[test]
    fn counts_chars_not_bytes() {
        assert_eq!(repeating_unit_length("éé"), 1);
        assert_eq!(repeating_unit_length("日本日本"), 2);
    }

    #[test]
    fn generic_over_items() {
        assert_eq!(period_of(&[1, 2, 1, 2, 1, 2]), 2);
        assert_eq!(period_of::<u8>(&[]), 0);
    }

    #[test]
    fn long_single_char_run_is_linear() {
        let message = "z".repeat(1_000_000);
        assert_eq!(repeating_unit_length(&message), 1);
    }

    proptest! {
        #[test]
        fn matches_brute_force(s in "[ab]{0,40}") {
            let chars: Vec<char> = s.chars().collect();
            prop_assert_eq!(repeating_unit_length(&s), brute_force(&chars));
        }

        #[test]
        fn repetition_divides_unit(unit in "[abc]{1,6}", times in 1usize..8) {
            let message = unit.repeat(times);
            let found = repeating_unit_length(&message);
            let unit_len = unit.chars().count();
            prop_assert!(found <= unit_len);
            prop_assert_eq!(unit_len % found, 0);
        }

        #[test]
        fn unit_always_divides_length(s in "\\PC{1,30}") {
            let n = s.chars().count();
            let unit = repeating_unit_length(&s);
            prop_assert!(unit >= 1 && unit <= n);
            prop_assert_eq!(n % unit, 0);
        }
    }
}
