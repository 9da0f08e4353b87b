//! Nearest-value snapping onto the story point scale.

/// The only story point values an estimate or cleaned row may carry.
pub const REFERENCE_SEQUENCE: [u32; 7] = [1, 2, 3, 5, 8, 13, 21];

/// Map any number to the closest member of [`REFERENCE_SEQUENCE`].
///
/// Values at or below zero map to the smallest member. When two members are
/// equally close the smaller one wins, so `4.0` snaps to `3`.
pub fn snap_to_fibonacci(value: f64) -> u32 {
    if value <= 0.0 || value.is_nan() {
        return REFERENCE_SEQUENCE[0];
    }
    if value.is_infinite() {
        return REFERENCE_SEQUENCE[REFERENCE_SEQUENCE.len() - 1];
    }

    let mut best = REFERENCE_SEQUENCE[0];
    let mut best_distance = (value - f64::from(best)).abs();

    for &candidate in &REFERENCE_SEQUENCE[1..] {
        let distance = (value - f64::from(candidate)).abs();
        // Strict comparison keeps the earlier (smaller) member on ties
        if distance < best_distance {
            best = candidate;
            best_distance = distance;
        }
    }

    best
}

/// Comma-joined rendering of the scale, e.g. for prompt headers.
pub fn reference_sequence_label() -> String {
    REFERENCE_SEQUENCE
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
