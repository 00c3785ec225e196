pub(crate) const fn div_ceil(lhs: usize, rhs: usize) -> usize {
    let d = lhs / rhs;
    let r = lhs % rhs;
    if r > 0 && rhs > 0 {
        d + 1
    } else {
        d
    }
}

/// Smallest multiple of `step` that is at least `value`.
pub(crate) const fn round_up(value: usize, step: usize) -> usize {
    div_ceil(value, step) * step
}
