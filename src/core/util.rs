use rand::Rng;

/// Linear interpolation from `a` to `b` by `t`.
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Uniform sample in `[-spread, spread)`. A zero or negative spread yields
/// zero rather than an empty sampling range.
pub fn jitter<R: Rng + ?Sized>(rng: &mut R, spread: f32) -> f32 {
    if spread > 0.0 {
        rng.random_range(-spread..spread)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn lerp_endpoints() {
        assert_eq!(lerp(2.0, 6.0, 0.0), 2.0);
        assert_eq!(lerp(2.0, 6.0, 1.0), 6.0);
        assert_eq!(lerp(2.0, 6.0, 0.5), 4.0);
    }

    #[test]
    fn jitter_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..1000 {
            let v = jitter(&mut rng, 2.5);
            assert!((-2.5..2.5).contains(&v));
        }
    }

    #[test]
    fn jitter_zero_spread_is_zero() {
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(jitter(&mut rng, 0.0), 0.0);
        assert_eq!(jitter(&mut rng, -1.0), 0.0);
    }
}
