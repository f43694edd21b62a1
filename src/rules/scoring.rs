//! Accuracy scoring.
//!
//! `score = round(1000 * matches / total_flips)`, or 0 before the first flip.
//! A pure function of the two counters: recomputing it any number of times
//! yields the same value.

/// Score scale: a perfect game (one flip pair per match) scores `SCALE / 2`.
pub const SCALE: u32 = 1000;

/// Compute a player's score from their counters.
///
/// Rounds half up, using integer arithmetic.
///
/// ```
/// use rust_pairs::rules::scoring::score;
///
/// assert_eq!(score(0, 0), 0);
/// assert_eq!(score(4, 8), 500);
/// assert_eq!(score(1, 3), 333);
/// assert_eq!(score(2, 3), 667);
/// ```
#[must_use]
pub fn score(matches: u32, total_flips: u32) -> u32 {
    if total_flips == 0 {
        return 0;
    }
    let numerator = 2 * u64::from(SCALE) * u64::from(matches) + u64::from(total_flips);
    let denominator = 2 * u64::from(total_flips);
    u32::try_from(numerator / denominator).unwrap_or(u32::MAX)
}
