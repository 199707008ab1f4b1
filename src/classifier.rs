// Cube Timer — Face Classifier
//
// Maps one raw accelerometer reading to the face pointing up. Axes are
// checked in a fixed z, x, y order and the first axis past the threshold
// wins, so a sample with several saturated axes (mid-tumble) still yields
// a single answer.

use crate::events::{AccelSample, Face};

/// Classify `sample` against `threshold`.
///
/// Returns `None` when no axis magnitude exceeds the threshold; callers keep
/// their previous face in that case.
pub fn classify(sample: &AccelSample, threshold: i16) -> Option<Face> {
    // Negating i16::MIN overflows; such a threshold can never be exceeded anyway.
    let low = threshold.checked_neg().unwrap_or(i16::MIN);

    if sample.z > threshold {
        Some(Face::One)
    } else if sample.z < low {
        Some(Face::Two)
    } else if sample.x > threshold {
        Some(Face::Three)
    } else if sample.x < low {
        Some(Face::Four)
    } else if sample.y > threshold {
        Some(Face::Five)
    } else if sample.y < low {
        Some(Face::Six)
    } else {
        None
    }
}
