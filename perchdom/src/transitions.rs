use std::fmt;
use std::time::Duration;

/// Configuration for a single property transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionConfig {
    pub duration: Duration,
    pub easing: Easing,
}

impl TransitionConfig {
    pub fn new(duration: Duration, easing: Easing) -> Self {
        Self { duration, easing }
    }
}

impl Default for TransitionConfig {
    fn default() -> Self {
        Self::new(Duration::from_millis(150), Easing::EaseInOut)
    }
}

impl fmt::Display for TransitionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms {}", self.duration.as_millis(), self.easing)
    }
}

/// Easing function for transitions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Easing {
    #[default]
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
}

impl Easing {
    /// Apply easing to progress (0.0 to 1.0).
    pub fn apply(self, t: f64) -> f64 {
        match self {
            Easing::Linear => t,
            Easing::EaseIn => t * t,
            Easing::EaseOut => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
        }
    }
}

impl fmt::Display for Easing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Easing::Linear => "linear",
            Easing::EaseIn => "ease-in",
            Easing::EaseOut => "ease-out",
            Easing::EaseInOut => "ease-in-out",
        };
        f.write_str(name)
    }
}

/// A running transition of a single numeric property.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ActiveTransition {
    from: f64,
    to: f64,
    start: Duration,
    config: TransitionConfig,
}

impl ActiveTransition {
    pub(crate) fn new(from: f64, to: f64, start: Duration, config: TransitionConfig) -> Self {
        Self {
            from,
            to,
            start,
            config,
        }
    }

    pub(crate) fn is_finished(&self, now: Duration) -> bool {
        now.saturating_sub(self.start) >= self.config.duration
    }

    /// Interpolated value at `now`.
    pub(crate) fn value_at(&self, now: Duration) -> f64 {
        if self.config.duration.is_zero() || self.is_finished(now) {
            return self.to;
        }
        let elapsed = now.saturating_sub(self.start).as_secs_f64();
        let t = (elapsed / self.config.duration.as_secs_f64()).clamp(0.0, 1.0);
        let eased = self.config.easing.apply(t);
        self.from + (self.to - self.from) * eased
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_transition_interpolates_linearly() {
        let config = TransitionConfig::new(Duration::from_millis(100), Easing::Linear);
        let transition = ActiveTransition::new(0.0, 300.0, Duration::from_millis(10), config);

        assert_eq!(transition.value_at(Duration::from_millis(10)), 0.0);
        assert!((transition.value_at(Duration::from_millis(60)) - 150.0).abs() < 1e-9);
        assert_eq!(transition.value_at(Duration::from_millis(110)), 300.0);
        assert!(transition.is_finished(Duration::from_millis(110)));
    }

    #[test]
    fn test_zero_duration_jumps_to_target() {
        let config = TransitionConfig::new(Duration::ZERO, Easing::EaseInOut);
        let transition = ActiveTransition::new(300.0, 0.0, Duration::ZERO, config);
        assert_eq!(transition.value_at(Duration::ZERO), 0.0);
    }

    #[test]
    fn test_display_reads_like_css() {
        assert_eq!(TransitionConfig::default().to_string(), "150ms ease-in-out");
    }
}
