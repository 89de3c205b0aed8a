//! Button configuration and injected display metrics.

use fab_animation::{AnimationSpec, Easing};
use fab_ui_graphics::{Color, Density, Dp, Shadow};

/// Recommended diameter of a regular floating action button.
pub const DEFAULT_SIZE: Dp = Dp(56.0);
/// Recommended diameter of a mini floating action button.
pub const MINI_SIZE: Dp = Dp(40.0);
pub const SETTLE_DURATION_MILLIS: u64 = 300;

/// Icon edge as a fraction of the button diameter.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IconRatio {
    pub numerator: f32,
    pub denominator: f32,
}

impl IconRatio {
    pub const fn new(numerator: f32, denominator: f32) -> Self {
        Self {
            numerator,
            denominator,
        }
    }

    /// Icon edge in whole pixels for a button of `diameter_px`.
    pub fn edge_px(&self, diameter_px: f32) -> u32 {
        if self.denominator <= 0.0 {
            return 0;
        }
        (diameter_px * self.numerator / self.denominator).max(0.0) as u32
    }
}

impl Default for IconRatio {
    /// A 20 unit icon on the reference 56 unit button.
    fn default() -> Self {
        Self::new(20.0, 56.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FloatingButtonConfig {
    pub size: Dp,
    pub icon_ratio: IconRatio,
    pub background: Color,
    pub shadow: Shadow,
    pub settle_animation: AnimationSpec,
}

impl FloatingButtonConfig {
    pub fn mini() -> Self {
        Self::default().with_size(MINI_SIZE)
    }

    pub fn with_size(mut self, size: Dp) -> Self {
        self.size = size;
        self
    }

    pub fn with_icon_ratio(mut self, icon_ratio: IconRatio) -> Self {
        self.icon_ratio = icon_ratio;
        self
    }

    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    pub fn with_shadow(mut self, shadow: Shadow) -> Self {
        self.shadow = shadow;
        self
    }

    pub fn with_settle_animation(mut self, settle_animation: AnimationSpec) -> Self {
        self.settle_animation = settle_animation;
        self
    }
}

impl Default for FloatingButtonConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            icon_ratio: IconRatio::default(),
            background: Color::WHITE,
            shadow: Shadow::default(),
            settle_animation: AnimationSpec::tween(
                SETTLE_DURATION_MILLIS,
                Easing::AccelerateDecelerate,
            ),
        }
    }
}

/// Display facts the button needs, supplied by the host.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DisplayMetrics {
    pub density: Density,
    /// Height of the display in pixels; the button hides by settling here.
    pub screen_height: f32,
}

impl DisplayMetrics {
    pub fn new(density: f32, screen_height: f32) -> Self {
        Self {
            density: Density(density),
            screen_height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_icon_is_twenty_of_fifty_six() {
        let config = FloatingButtonConfig::default();
        assert_eq!(config.icon_ratio.edge_px(56.0), 20);
        assert_eq!(config.icon_ratio.edge_px(112.0), 40);
        // 2.625x density: 147px button, 52.5px icon truncated.
        assert_eq!(config.icon_ratio.edge_px(147.0), 52);
    }

    #[test]
    fn mini_only_changes_size() {
        let mini = FloatingButtonConfig::mini();
        assert_eq!(mini.size, MINI_SIZE);
        assert_eq!(
            mini.with_size(DEFAULT_SIZE),
            FloatingButtonConfig::default()
        );
    }

    #[test]
    fn settle_defaults_to_three_hundred_millis() {
        let spec = FloatingButtonConfig::default().settle_animation;
        assert_eq!(spec.duration_millis, 300);
        assert_eq!(spec.easing, Easing::AccelerateDecelerate);
    }

    #[test]
    fn degenerate_ratio_yields_no_icon() {
        assert_eq!(IconRatio::new(1.0, 0.0).edge_px(56.0), 0);
    }
}
