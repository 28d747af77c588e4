use crate::domain::model::{Color, Factorization, PrimeColorTable};

/// Blends palette colors weighted by exponent.
///
/// The denominator is the total exponent of the whole factorization, so
/// primes missing from the palette pull every channel towards black. Each
/// channel is truncated, not rounded. An empty factorization (the number 1)
/// is white.
pub fn blend_colors(factors: &Factorization, palette: &PrimeColorTable) -> Color {
    if factors.is_empty() {
        return Color::WHITE;
    }

    let total = factors.total_exponent() as u64;
    let (mut r, mut g, mut b) = (0u64, 0u64, 0u64);

    for (prime, count) in factors.iter() {
        if let Some(color) = palette.get(prime) {
            let count = count as u64;
            r += color.r as u64 * count;
            g += color.g as u64 * count;
            b += color.b as u64 * count;
        }
    }

    // each sum is at most 255 * total
    Color::new((r / total) as u8, (g / total) as u8, (b / total) as u8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::factorize::factorize;

    fn blend(n: u64) -> Color {
        blend_colors(&factorize(n).unwrap(), &PrimeColorTable::standard())
    }

    #[test]
    fn test_blend_empty_is_white() {
        assert_eq!(
            blend_colors(&Factorization::new(), &PrimeColorTable::standard()),
            Color::WHITE
        );
        assert_eq!(blend(1), Color::WHITE);
    }

    #[test]
    fn test_blend_single_prime_power_matches_palette() {
        assert_eq!(blend(2), Color::new(255, 0, 0));
        assert_eq!(blend(8), Color::new(255, 0, 0));
        assert_eq!(blend(9), Color::new(0, 0, 255));
        assert_eq!(blend(25), Color::new(255, 0, 255));
        assert_eq!(blend(49), Color::new(255, 255, 0));
    }

    #[test]
    fn test_blend_truncates() {
        // (255 + 0) / 2 = 127.5 -> 127
        assert_eq!(blend(6), Color::new(127, 0, 127));
        // 2^2 * 3: (510, 0, 255) / 3
        assert_eq!(blend(12), Color::new(170, 0, 85));
        // 2 * 5 * 7: (765, 255, 255) / 3
        assert_eq!(blend(70), Color::new(255, 85, 85));
    }

    #[test]
    fn test_blend_non_palette_primes_darken() {
        assert_eq!(blend(11), Color::BLACK);
        assert_eq!(blend(22), Color::new(127, 0, 0));
        assert_eq!(blend(7 * 13), Color::new(127, 127, 0));
    }

    #[test]
    fn test_blend_uses_given_palette() {
        let palette = PrimeColorTable::new(vec![(11, Color::new(0, 200, 0))]);
        let color = blend_colors(&factorize(22).unwrap(), &palette);
        assert_eq!(color, Color::new(0, 100, 0));
    }
}
