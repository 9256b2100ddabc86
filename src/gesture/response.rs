//! Vertical drag distance to wheel delta.

/// Divisor applied to the quadratic term to keep wheel deltas in a usable range.
pub const QUADRATIC_DIVISOR: i32 = 64;

/// Maps the vertical drag from `reference_y` to `current_y` to a signed wheel delta.
///
/// Screen Y grows downward, so dragging up yields a positive delta (scroll up).
/// The quadratic term keeps the sign of the displacement and never flips the
/// direction. Arithmetic wraps on `i32` overflow; division truncates toward zero.
pub fn compute_magnitude(reference_y: i32, current_y: i32, linear: i32, quadratic: i32) -> i32 {
    let displacement = reference_y.wrapping_sub(current_y);
    let linear_term = displacement.wrapping_mul(linear);
    if quadratic == 0 {
        return linear_term;
    }

    let signed_square = displacement.wrapping_mul(displacement.wrapping_abs());
    let quadratic_term = signed_square.wrapping_mul(quadratic) / QUADRATIC_DIVISOR;
    linear_term.wrapping_add(quadratic_term)
}
