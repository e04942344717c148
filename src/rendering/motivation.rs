//! Rotating motivational tips.

use rand::prelude::IndexedRandom;

/// The tip pool. Selection is uniform per call.
pub const MOTIVATIONAL_TIPS: &[&str] = &[
    "Tip: Stack your habits together - do meditation right after your morning coffee!",
    "Remember: Progress beats perfection. Consistency is the real superpower!",
    "Small daily improvements lead to stunning yearly results!",
    "Your habits are votes for the person you're becoming!",
    "Champions aren't made in comfort zones - you're doing great!",
];

/// Picks one tip at random.
#[must_use]
pub fn random_tip() -> &'static str {
    let mut rng = rand::rng();
    MOTIVATIONAL_TIPS
        .choose(&mut rng)
        .copied()
        .unwrap_or(MOTIVATIONAL_TIPS[0])
}
