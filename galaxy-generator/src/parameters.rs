use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Errors rejected by [`GalaxyParameters::validate`] before any buffer
/// allocation takes place. A zero radius would silently produce NaN
/// colours downstream; it is a hard failure instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParameterError {
    #[error("point count must be at least 1, got {0}")]
    InvalidCount(usize),

    #[error("radius must be positive and finite, got {0}")]
    InvalidRadius(f32),

    #[error("branch count must be at least 1, got {0}")]
    InvalidBranches(u32),

    #[error("randomness must be non-negative and finite, got {0}")]
    InvalidRandomness(f32),

    #[error("randomness power must be positive and finite, got {0}")]
    InvalidRandomnessPower(f32),

    #[error("invalid hex colour: {0:?}")]
    InvalidColour(String),
}

/// Linear RGB colour with components in [0, 1].
///
/// Serialised as a `#rrggbb` hex string, matching the preset format.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Parse a `#rrggbb` hex string, case-insensitive.
    pub fn from_hex(hex: &str) -> Result<Self, ParameterError> {
        // Byte-offset slicing below requires ASCII; multi-byte input must
        // fail here rather than hit a char boundary.
        let digits = hex
            .strip_prefix('#')
            .filter(|d| d.len() == 6 && d.is_ascii())
            .ok_or_else(|| ParameterError::InvalidColour(hex.to_string()))?;

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16)
                .map(|v| v as f32 / 255.0)
                .map_err(|_| ParameterError::InvalidColour(hex.to_string()))
        };

        Ok(Self {
            r: channel(0..2)?,
            g: channel(2..4)?,
            b: channel(4..6)?,
        })
    }

    pub fn to_hex(&self) -> String {
        let byte = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!("#{:02x}{:02x}{:02x}", byte(self.r), byte(self.g), byte(self.b))
    }

    /// Componentwise linear interpolation towards `other`.
    pub fn lerp(self, other: Self, t: f32) -> Self {
        Self {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
        }
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Rgb {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let hex = String::deserialize(deserializer)?;
        Rgb::from_hex(&hex).map_err(D::Error::custom)
    }
}

/// Full parameter set for one generation call.
///
/// The GUI layer is the sole writer; the generator reads it once per call.
/// Field names serialise in camelCase so preset manifests written for the
/// web front-end parse unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GalaxyParameters {
    /// Number of points, >= 1.
    pub count: usize,
    /// Point render size, passed through to the renderer untouched.
    pub size: f32,
    /// Maximum orbital radius, > 0.
    pub radius: f32,
    /// Number of spiral arms, >= 1.
    pub branches: u32,
    /// Radians-per-unit-radius twist factor, any sign.
    pub spin: f32,
    /// Jitter amplitude multiplier, >= 0.
    pub randomness: f32,
    /// Jitter concentration exponent, > 0. Higher concentrates jitter
    /// towards the spiral curve.
    pub randomness_power: f32,
    /// Colour at radius 0.
    pub inside_color: Rgb,
    /// Colour at the maximum radius.
    pub outside_color: Rgb,
}

impl Default for GalaxyParameters {
    fn default() -> Self {
        Self {
            count: 200_000,
            size: 0.005,
            radius: 5.0,
            branches: 3,
            spin: 1.0,
            randomness: 0.2,
            randomness_power: 3.0,
            inside_color: Rgb::new(1.0, 96.0 / 255.0, 48.0 / 255.0), // #ff6030
            outside_color: Rgb::new(27.0 / 255.0, 57.0 / 255.0, 132.0 / 255.0), // #1b3984
        }
    }
}

impl GalaxyParameters {
    /// Reject degenerate parameter sets up front. A radius of zero would
    /// otherwise make the colour ratio 0/0 and leak NaNs into rendering.
    pub fn validate(&self) -> Result<(), ParameterError> {
        if self.count < 1 {
            return Err(ParameterError::InvalidCount(self.count));
        }
        if !self.radius.is_finite() || self.radius <= 0.0 {
            return Err(ParameterError::InvalidRadius(self.radius));
        }
        if self.branches < 1 {
            return Err(ParameterError::InvalidBranches(self.branches));
        }
        if !self.randomness.is_finite() || self.randomness < 0.0 {
            return Err(ParameterError::InvalidRandomness(self.randomness));
        }
        if !self.randomness_power.is_finite() || self.randomness_power <= 0.0 {
            return Err(ParameterError::InvalidRandomnessPower(self.randomness_power));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_round_trip() {
        let c = Rgb::from_hex("#6e21ff").unwrap();
        assert_eq!(c.to_hex(), "#6e21ff");
        assert!((c.r - 0x6e as f32 / 255.0).abs() < 1e-6);
        assert!((c.g - 0x21 as f32 / 255.0).abs() < 1e-6);
        assert!((c.b - 1.0).abs() < 1e-6);
    }

    #[test]
    fn hex_uppercase_accepted() {
        assert_eq!(Rgb::from_hex("#FF6030").unwrap(), Rgb::from_hex("#ff6030").unwrap());
    }

    #[test]
    fn hex_rejects_malformed() {
        for bad in ["ff6030", "#ff603", "#ff60301", "#gg0000", ""] {
            assert!(matches!(Rgb::from_hex(bad), Err(ParameterError::InvalidColour(_))), "{bad}");
        }
    }

    #[test]
    fn hex_rejects_multibyte_without_panicking() {
        // Six bytes but not six ASCII digits; must error, not slice through
        // a char boundary.
        for bad in ["#1é234", "#ééé", "#ffff\u{e9}"] {
            assert!(matches!(Rgb::from_hex(bad), Err(ParameterError::InvalidColour(_))), "{bad}");
        }
    }

    #[test]
    fn lerp_endpoints_and_midpoint() {
        let inside = Rgb::new(1.0, 0.0, 0.0);
        let outside = Rgb::new(0.0, 0.0, 1.0);
        assert_eq!(inside.lerp(outside, 0.0), inside);
        assert_eq!(inside.lerp(outside, 1.0), outside);
        assert_eq!(inside.lerp(outside, 0.25), Rgb::new(0.75, 0.0, 0.25));
    }

    #[test]
    fn default_parameters_are_valid() {
        assert_eq!(GalaxyParameters::default().validate(), Ok(()));
    }

    #[test]
    fn validate_rejects_boundaries() {
        let base = GalaxyParameters::default();

        let p = GalaxyParameters { count: 0, ..base.clone() };
        assert_eq!(p.validate(), Err(ParameterError::InvalidCount(0)));

        let p = GalaxyParameters { radius: 0.0, ..base.clone() };
        assert_eq!(p.validate(), Err(ParameterError::InvalidRadius(0.0)));

        let p = GalaxyParameters { radius: f32::NAN, ..base.clone() };
        assert!(matches!(p.validate(), Err(ParameterError::InvalidRadius(_))));

        let p = GalaxyParameters { branches: 0, ..base.clone() };
        assert_eq!(p.validate(), Err(ParameterError::InvalidBranches(0)));

        let p = GalaxyParameters { randomness: -0.1, ..base.clone() };
        assert_eq!(p.validate(), Err(ParameterError::InvalidRandomness(-0.1)));

        let p = GalaxyParameters { randomness_power: 0.0, ..base };
        assert_eq!(p.validate(), Err(ParameterError::InvalidRandomnessPower(0.0)));
    }

    #[test]
    fn serde_uses_camel_case_field_names() {
        let json = serde_json::to_value(GalaxyParameters::default()).unwrap();
        assert_eq!(json["count"], 200_000);
        assert_eq!(json["randomnessPower"], 3.0);
        assert_eq!(json["insideColor"], "#ff6030");
        assert_eq!(json["outsideColor"], "#1b3984");

        let back: GalaxyParameters = serde_json::from_value(json).unwrap();
        assert_eq!(back, GalaxyParameters::default());
    }
}
