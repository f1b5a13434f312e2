//! Courbe tonale : contraste, luminosité, gamma, dans cet ordre.

/// Contrast / brightness / gamma transform over a grayscale plane.
///
/// Intermediate values are kept as `f64` and are only clamped to [0, 255]
/// and rounded once, after the last step.
///
/// # Example
/// ```
/// use gt_ascii::tone::ToneCurve;
/// let curve = ToneCurve::new(2.0, 1.0, None);
/// assert_eq!(curve.apply(&[100, 200]), vec![50, 250]);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ToneCurve {
    /// Blend factor away from the mean. 1.0 = neutre.
    pub contrast: f64,
    /// Multiplicative factor. 1.0 = neutre.
    pub brightness: f64,
    /// Exponent, skipped when `None`.
    pub gamma: Option<f64>,
}

impl ToneCurve {
    /// Create a curve. Parameters are assumed validated (> 0).
    #[must_use]
    pub fn new(contrast: f64, brightness: f64, gamma: Option<f64>) -> Self {
        Self {
            contrast,
            brightness,
            gamma,
        }
    }

    /// Apply the curve to a whole plane.
    #[must_use]
    pub fn apply(&self, samples: &[u8]) -> Vec<u8> {
        let mean = rounded_mean(samples);
        samples
            .iter()
            .map(|&v| {
                let mut v = mean + (f64::from(v) - mean) * self.contrast;
                v *= self.brightness;
                if let Some(g) = self.gamma {
                    v = 255.0 * (v.max(0.0) / 255.0).powf(g);
                }
                v.clamp(0.0, 255.0).round() as u8
            })
            .collect()
    }
}

/// Moyenne du plan arrondie à l'entier le plus proche (0 pour un plan vide).
#[must_use]
pub fn rounded_mean(samples: &[u8]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    let sum: u64 = samples.iter().map(|&v| u64::from(v)).sum();
    (sum as f64 / samples.len() as f64 + 0.5).floor()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neutral_curve_is_identity() {
        let samples: Vec<u8> = (0..=255).collect();
        let curve = ToneCurve::new(1.0, 1.0, Some(1.0));
        assert_eq!(curve.apply(&samples), samples);
    }

    #[test]
    fn contrast_blends_around_rounded_mean() {
        // mean(0, 1) = 0.5 → 1
        let curve = ToneCurve::new(3.0, 1.0, None);
        assert_eq!(curve.apply(&[0, 1]), vec![0, 1]);
        assert_eq!(rounded_mean(&[0, 1]), 1.0);
    }

    #[test]
    fn low_contrast_pulls_toward_mean() {
        let curve = ToneCurve::new(0.5, 1.0, None);
        assert_eq!(curve.apply(&[100, 200]), vec![125, 175]);
    }

    #[test]
    fn brightness_scales_and_clamps_at_the_end() {
        let curve = ToneCurve::new(1.0, 1.5, None);
        assert_eq!(curve.apply(&[200, 100, 0]), vec![255, 150, 0]);
    }

    #[test]
    fn gamma_curve() {
        let curve = ToneCurve::new(1.0, 1.0, Some(2.0));
        // 255 × (64/255)² = 16.06
        assert_eq!(curve.apply(&[255, 0, 64]), vec![255, 0, 16]);
    }

    #[test]
    fn brightness_runs_before_gamma() {
        // 100 × 0.5 = 50 → 255 × (50/255)² = 9.8
        let curve = ToneCurve::new(1.0, 0.5, Some(2.0));
        assert_eq!(curve.apply(&[100]), vec![10]);
    }

    #[test]
    fn unclamped_intermediates_do_not_produce_nan() {
        // mean 128, ×3 → -256 and 509 before gamma
        let curve = ToneCurve::new(3.0, 1.0, Some(0.5));
        assert_eq!(curve.apply(&[0, 255]), vec![0, 255]);
    }

    #[test]
    fn empty_plane() {
        let curve = ToneCurve::new(1.7, 1.2, Some(1.0));
        assert!(curve.apply(&[]).is_empty());
    }
}
