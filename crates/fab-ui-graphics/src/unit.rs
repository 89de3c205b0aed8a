//! Unit types: Dp, Px, and density conversions

/// Density-independent pixels
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct Dp(pub f32);

impl Dp {
    pub fn to_px(&self, density: f32) -> f32 {
        self.0 * density
    }
}

/// Raw pixels
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct Px(pub f32);

/// Display density: device pixels per density-independent pixel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Density(pub f32);

impl Density {
    pub fn dp_to_px(&self, dp: Dp) -> Px {
        Px(dp.to_px(self.0))
    }
}

impl Default for Density {
    fn default() -> Self {
        Self(1.0)
    }
}
