/// Rounds `numer / denom` half away from zero to `decimals` places.
///
/// The rounding is done on the exact integer ratio, so ties like 4.25 always
/// go up to 4.3 regardless of how the quotient would look in binary floating
/// point. Returns 0.0 when `denom` is zero.
pub fn round_ratio(numer: u64, denom: u64, decimals: u32) -> f64 {
    if denom == 0 {
        return 0.0;
    }
    let scale = 10u64.pow(decimals);
    let scaled = (2 * numer * scale + denom) / (2 * denom);
    scaled as f64 / scale as f64
}

/// Whole-number percentage of `part` in `total`. Returns 0 for an empty total.
pub fn pct(part: usize, total: usize) -> u32 {
    round_ratio(part as u64 * 100, total as u64, 0) as u32
}

/// Mean of `count` values summing to `sum`, to one decimal place.
pub fn mean_tenths(sum: u64, count: usize) -> f64 {
    round_ratio(sum, count as u64, 1)
}
