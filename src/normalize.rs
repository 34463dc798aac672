/// Sigmoid normalization of raw metric magnitudes onto the 0-100 score scale.
///
/// Every metric in the pipeline passes through the same curve:
///
/// ```text
/// round(100 / (1 + e^(-steepness * (value - midpoint))))
/// ```
///
/// `midpoint` is the domain judgment of "what counts as average" for the
/// metric — a value right at the midpoint scores exactly 50. `steepness`
/// controls how fast the score moves away from 50 as the value diverges.
/// The curve keeps small absolute differences at the extremes from producing
/// outsized score swings, and a project with "a lot" of some metric still
/// does not trivially saturate at 100.
///
/// Call sites pick a midpoint/steepness pair per metric; the pairs live as
/// named constants next to each scorer rather than inline literals.

/// Steepness used when a call site has no metric-specific preference.
pub const DEFAULT_STEEPNESS: f64 = 0.1;

/// Map a raw magnitude onto [0, 100] via a sigmoid centered on `midpoint`.
///
/// Returns an integer in [0, 100] for any finite input; the bounds are only
/// reached at floating-point rounding limits.
pub fn normalize(value: f64, midpoint: f64, steepness: f64) -> i32 {
    let score = 100.0 / (1.0 + (-steepness * (value - midpoint)).exp());
    (score.round() as i32).clamp(0, 100)
}
