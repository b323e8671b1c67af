//! Landmark Smoother - exponential moving average over landmark sets

use guardian_core::LandmarkSet;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Smoother configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmootherConfig {
    /// Weight of the incoming frame (0 = frozen, 1 = no smoothing)
    pub alpha: f32,
}

impl Default for SmootherConfig {
    fn default() -> Self {
        SmootherConfig { alpha: 0.35 }
    }
}

/// EMA filter holding exactly one baseline set
#[derive(Debug, Clone)]
pub struct LandmarkSmoother {
    alpha: f32,
    last: Option<LandmarkSet>,
}

impl LandmarkSmoother {
    pub fn new(alpha: f32) -> Self {
        let alpha = if alpha.is_finite() { alpha.clamp(0.0, 1.0) } else { 1.0 };
        LandmarkSmoother { alpha, last: None }
    }

    pub fn from_config(config: &SmootherConfig) -> Self {
        Self::new(config.alpha)
    }

    /// Smooth one frame.
    ///
    /// `None` (no person detected) clears the baseline so a reacquired
    /// subject is never blended with a stale one. A topology length change
    /// adopts the incoming set verbatim. A set holding NaN or infinite
    /// values is treated as no detection, so it never enters the baseline.
    pub fn smooth(&mut self, current: Option<&LandmarkSet>) -> Option<LandmarkSet> {
        let Some(current) = current else {
            if self.last.take().is_some() {
                debug!("person lost, smoothing baseline cleared");
            }
            return None;
        };
        if !current.is_finite() {
            self.last = None;
            debug!("non-finite landmarks dropped, smoothing baseline cleared");
            return None;
        }

        let result = match &self.last {
            Some(previous) if previous.len() == current.len() => LandmarkSet::new(
                current
                    .iter()
                    .zip(previous.iter())
                    .map(|(c, p)| c.blend(p, self.alpha))
                    .collect(),
            ),
            Some(previous) => {
                debug!(
                    previous = previous.len(),
                    current = current.len(),
                    "topology changed, adopting new baseline"
                );
                current.clone()
            }
            None => current.clone(),
        };

        self.last = Some(result.clone());
        Some(result)
    }

    /// Drop the baseline
    pub fn reset(&mut self) {
        self.last = None;
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    /// Current baseline, if any
    pub fn baseline(&self) -> Option<&LandmarkSet> {
        self.last.as_ref()
    }
}

impl Default for LandmarkSmoother {
    fn default() -> Self {
        Self::from_config(&SmootherConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use guardian_core::{Joint, Landmark};
    use proptest::prelude::*;

    fn uniform(n: usize, v: f32) -> LandmarkSet {
        LandmarkSet::new(vec![Landmark::new(v, v, v, v); n])
    }

    fn uniform_from(values: &[f32]) -> LandmarkSet {
        LandmarkSet::new(values.iter().map(|&v| Landmark::new(v, v, v, v)).collect())
    }

    #[test]
    fn test_first_frame_passes_through() {
        let mut smoother = LandmarkSmoother::default();
        let input = uniform(33, 0.4);

        let out = smoother.smooth(Some(&input)).unwrap();
        assert_eq!(out, input);
    }

    #[test]
    fn test_blend_uses_alpha() {
        let mut smoother = LandmarkSmoother::new(0.35);
        smoother.smooth(Some(&uniform(33, 0.0)));

        let out = smoother.smooth(Some(&uniform(33, 1.0))).unwrap();
        for lm in &out {
            assert!((lm.x - 0.35).abs() < 1e-6);
            assert!((lm.visibility - 0.35).abs() < 1e-6);
        }

        // Result becomes the next baseline
        let out = smoother.smooth(Some(&uniform(33, 1.0))).unwrap();
        let expected = 1.0 * 0.35 + 0.35 * 0.65;
        assert!((out.as_slice()[0].y - expected).abs() < 1e-6);
    }

    #[test]
    fn test_absent_frame_resets() {
        let mut smoother = LandmarkSmoother::default();
        smoother.smooth(Some(&uniform(33, 0.0)));

        assert!(smoother.smooth(None).is_none());
        assert!(smoother.baseline().is_none());

        let reacquired = uniform(33, 0.9);
        assert_eq!(smoother.smooth(Some(&reacquired)).unwrap(), reacquired);
    }

    #[test]
    fn test_length_change_adopts_verbatim() {
        let mut smoother = LandmarkSmoother::default();
        smoother.smooth(Some(&uniform(33, 0.0)));

        let short = uniform(17, 0.8);
        assert_eq!(smoother.smooth(Some(&short)).unwrap(), short);
    }

    #[test]
    fn test_alpha_is_clamped() {
        assert_eq!(LandmarkSmoother::new(3.0).alpha(), 1.0);
        assert_eq!(LandmarkSmoother::new(-1.0).alpha(), 0.0);
        assert_eq!(LandmarkSmoother::new(f32::NAN).alpha(), 1.0);
    }

    #[test]
    fn test_non_finite_frame_is_dropped() {
        let mut smoother = LandmarkSmoother::new(0.35);
        smoother.smooth(Some(&uniform(33, 0.2)));

        let mut bad = uniform(33, 0.4);
        bad.set_joint(Joint::LeftHip, Landmark::new(f32::NAN, 0.5, 0.0, 1.0));
        assert!(smoother.smooth(Some(&bad)).is_none());
        assert!(smoother.baseline().is_none());

        let mut inf = uniform(33, 0.4);
        inf.set_joint(Joint::Nose, Landmark::new(0.5, f32::INFINITY, 0.0, 1.0));
        assert!(smoother.smooth(Some(&inf)).is_none());

        let first = smoother.smooth(Some(&uniform(33, 0.6))).unwrap();
        assert_eq!(first, uniform(33, 0.6));
        let second = smoother.smooth(Some(&uniform(33, 0.8))).unwrap();
        assert!(second.is_finite());
        assert!(second.iter().all(|lm| lm.y > 0.6 && lm.y < 0.8));
    }

    proptest! {
        #[test]
        fn prop_output_is_convex_combination(
            prev in prop::collection::vec(0.0f32..1.0, 33),
            curr in prop::collection::vec(0.0f32..1.0, 33),
            alpha in 0.0f32..=1.0,
        ) {
            let mut smoother = LandmarkSmoother::new(alpha);
            let previous = uniform_from(&prev);
            let current = uniform_from(&curr);

            smoother.smooth(Some(&previous));
            let out = smoother.smooth(Some(&current)).unwrap();

            for ((o, c), p) in out.iter().zip(current.iter()).zip(previous.iter()) {
                let expected = c.x * alpha + p.x * (1.0 - alpha);
                prop_assert!((o.x - expected).abs() < 1e-5);
                prop_assert!(o.x >= c.x.min(p.x) - 1e-5 && o.x <= c.x.max(p.x) + 1e-5);
            }
        }

        #[test]
        fn prop_no_previous_means_identity(curr in prop::collection::vec(0.0f32..1.0, 1..40)) {
            let mut smoother = LandmarkSmoother::default();
            let current = LandmarkSet::new(
                curr.iter().map(|&v| Landmark::new(v, 1.0 - v, 0.0, v)).collect(),
            );
            prop_assert_eq!(smoother.smooth(Some(&current)).unwrap(), current);
        }
    }
}
