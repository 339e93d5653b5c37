//! Amount and description normalization rules.
//!
//! Every monetary value that leaves the core (stored amounts and converted
//! amounts alike) goes through [`round_to_cents`].

use rust_decimal::{Decimal, RoundingStrategy};

/// Number of fractional digits carried by every monetary amount.
pub const AMOUNT_SCALE: u32 = 2;

/// Longest description a transaction keeps, in characters.
pub const MAX_DESCRIPTION_LENGTH: usize = 50;

/// Rounds a value to cents, half-up (midpoints move away from zero).
///
/// The result always carries exactly [`AMOUNT_SCALE`] fractional digits,
/// so `1` becomes `1.00` and `15.8` becomes `15.80`. Returns `None` when the
/// value is too large to be held with that many digits.
pub fn round_to_cents(value: Decimal) -> Option<Decimal> {
    let mut rounded =
        value.round_dp_with_strategy(AMOUNT_SCALE, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(AMOUNT_SCALE);
    // rescale caps the scale instead of failing
    (rounded.scale() == AMOUNT_SCALE).then_some(rounded)
}

/// Keeps the first [`MAX_DESCRIPTION_LENGTH`] characters of a description.
pub fn truncate_description(description: &str) -> String {
    description.chars().take(MAX_DESCRIPTION_LENGTH).collect()
}
