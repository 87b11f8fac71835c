/// BT.709 red weight.
pub const LUMA_RED: f64 = 0.2126;
/// BT.709 green weight.
pub const LUMA_GREEN: f64 = 0.7152;
/// BT.709 blue weight.
pub const LUMA_BLUE: f64 = 0.0722;
/// Valeur maximale d'un canal 8 bits.
pub const MAX_CHANNEL: f64 = 255.0;

/// Luminance perceptuelle BT.709 d'un pixel, non normalisée (∈ [0.0, 255.0]).
///
/// # Example
/// ```
/// use lm_core::color::luma;
/// assert!((luma(255, 255, 255) - 255.0).abs() < 1e-9);
/// assert_eq!(luma(0, 0, 0), 0.0);
/// ```
#[inline(always)]
#[must_use]
pub fn luma(r: u8, g: u8, b: u8) -> f64 {
    f64::from(r) * LUMA_RED + f64::from(g) * LUMA_GREEN + f64::from(b) * LUMA_BLUE
}

/// Luminance BT.709 ramenée à [0.0, 1.0].
///
/// # Example
/// ```
/// use lm_core::color::normalized_luma;
/// let v = normalized_luma(0, 255, 0);
/// assert!((v - 0.7152).abs() < 1e-9);
/// ```
#[inline(always)]
#[must_use]
pub fn normalized_luma(r: u8, g: u8, b: u8) -> f64 {
    luma(r, g, b) / MAX_CHANNEL
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weights_sum_to_one() {
        assert!((LUMA_RED + LUMA_GREEN + LUMA_BLUE - 1.0).abs() < 1e-12);
    }

    #[test]
    fn green_dominates_red_and_blue() {
        let r = normalized_luma(255, 0, 0);
        let g = normalized_luma(0, 255, 0);
        let b = normalized_luma(0, 0, 255);
        assert!(g > r, "green {g} should outweigh red {r}");
        assert!(r > b, "red {r} should outweigh blue {b}");
    }

    #[test]
    fn grey_maps_linearly() {
        for v in (0..=255u8).step_by(51) {
            let expected = f64::from(v) / 255.0;
            let got = normalized_luma(v, v, v);
            assert!((got - expected).abs() < 1e-9, "grey {v}: {got} vs {expected}");
        }
    }
}
