//! Demo configuration.

use std::str::FromStr;
use std::time::Duration;

use perch::OverlayConfig;
use perchdom::Easing;
use simplelog::LevelFilter;

use crate::shell::MenuAlignment;

/// Log level (`error` .. `trace`).
pub const LOG_LEVEL_VAR: &str = "PERCH_LOG";
/// Overlay height in rows.
pub const ROWS_VAR: &str = "PERCH_ROWS";
/// Starting menu alignment, by class name.
pub const ALIGN_VAR: &str = "PERCH_ALIGN";

/// Settings for the terminal demo.
///
/// One terminal cell is one document pixel, so the overlay height is given
/// in rows.
#[derive(Debug, Clone)]
pub struct DemoConfig {
    /// Height of the open overlay, in rows.
    pub overlay_rows: u16,
    /// Page height as a multiple of the viewport height.
    pub page_screens: u16,
    /// How often an open overlay re-measures its trigger.
    pub poll_interval: Duration,
    /// Expand/collapse animation length.
    pub transition: Duration,
    /// Redraw rate while an animation is running.
    pub animation_fps: u16,
    pub alignment: MenuAlignment,
    pub log_level: LevelFilter,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            overlay_rows: 8,
            page_screens: 3,
            poll_interval: Duration::from_millis(100),
            transition: Duration::from_millis(150),
            animation_fps: 60,
            alignment: MenuAlignment::default(),
            log_level: LevelFilter::Debug,
        }
    }
}

impl DemoConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults, overridden by [`LOG_LEVEL_VAR`], [`ROWS_VAR`] and
    /// [`ALIGN_VAR`] when they hold valid values.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::new();
        if let Some(level) = lookup(LOG_LEVEL_VAR).and_then(|v| parse_level(&v)) {
            config = config.log_level(level);
        }
        if let Some(rows) = lookup(ROWS_VAR).and_then(|v| v.trim().parse().ok()) {
            config = config.overlay_rows(rows);
        }
        if let Some(alignment) = lookup(ALIGN_VAR).and_then(|v| v.trim().parse().ok()) {
            config = config.alignment(alignment);
        }
        config
    }

    pub fn overlay_rows(mut self, rows: u16) -> Self {
        self.overlay_rows = rows;
        self
    }

    pub fn alignment(mut self, alignment: MenuAlignment) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn log_level(mut self, level: LevelFilter) -> Self {
        self.log_level = level;
        self
    }

    /// Overlay settings in terminal cells.
    pub fn overlay(&self) -> OverlayConfig {
        OverlayConfig::new()
            .height(f64::from(self.overlay_rows))
            .poll_interval(self.poll_interval)
            .transition(self.transition, Easing::EaseInOut)
    }

    pub fn frame_duration(&self) -> Duration {
        Duration::from_secs_f64(1.0 / f64::from(self.animation_fps.max(1)))
    }
}

fn parse_level(value: &str) -> Option<LevelFilter> {
    LevelFilter::from_str(value.trim()).ok()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_overlay_uses_rows_as_height() {
        let overlay = DemoConfig::new().overlay_rows(5).overlay();
        assert_eq!(overlay.height, 5.0);
        assert_eq!(overlay.poll_interval, Duration::from_millis(100));
        assert_eq!(overlay.transition.duration, Duration::from_millis(150));
        assert_eq!(overlay.class, "dropdown");
    }

    #[test]
    fn test_lookup_overrides() {
        let config = DemoConfig::from_lookup(lookup(&[
            (LOG_LEVEL_VAR, "trace"),
            (ROWS_VAR, " 4 "),
            (ALIGN_VAR, "bottom-left"),
        ]));
        assert_eq!(config.log_level, LevelFilter::Trace);
        assert_eq!(config.overlay_rows, 4);
        assert_eq!(config.alignment, MenuAlignment::BottomLeft);
    }

    #[test]
    fn test_invalid_values_keep_defaults() {
        let config = DemoConfig::from_lookup(lookup(&[
            (LOG_LEVEL_VAR, "loud"),
            (ROWS_VAR, "-3"),
            (ALIGN_VAR, "middle"),
        ]));
        assert_eq!(config.log_level, LevelFilter::Debug);
        assert_eq!(config.overlay_rows, 8);
        assert_eq!(config.alignment, MenuAlignment::Center);
    }

    #[test]
    fn test_frame_duration() {
        assert_eq!(
            DemoConfig::new().frame_duration(),
            Duration::from_secs_f64(1.0 / 60.0)
        );
    }
}
