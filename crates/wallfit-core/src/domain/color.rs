//! RGB color with the HSL projections used for tie-breaking.

use std::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// An 8-bit-per-channel RGB color.
///
/// Serializes as a `#rrggbb` hex string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    const fn min_max(self) -> (u8, u8) {
        let mut min = self.r;
        let mut max = self.r;
        if self.g < min {
            min = self.g;
        }
        if self.g > max {
            max = self.g;
        }
        if self.b < min {
            min = self.b;
        }
        if self.b > max {
            max = self.b;
        }
        (min, max)
    }

    /// HSL saturation in `[0, 1]`.
    ///
    /// Uses the divisor switch at half lightness: `(max - min) / (max + min)`
    /// when `max + min <= 255`, otherwise `(max - min) / (510 - max - min)`.
    /// Grays report zero.
    #[must_use]
    pub fn saturation(self) -> f32 {
        let (min, max) = self.min_max();
        if min == max {
            return 0.0;
        }
        let sum = u16::from(min) + u16::from(max);
        let div = if sum > 255 { 510 - sum } else { sum };
        f32::from(max - min) / f32::from(div)
    }

    /// HSL lightness in `[0, 1]`: `(max + min) / 510`.
    #[must_use]
    pub fn lightness(self) -> f32 {
        let (min, max) = self.min_max();
        f32::from(u16::from(min) + u16::from(max)) / 510.0
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Rgb {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct RgbVisitor;

        impl Visitor<'_> for RgbVisitor {
            type Value = Rgb;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a #rrggbb hex color string")
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
                let hex = value.strip_prefix('#').unwrap_or(value);
                if hex.len() != 6 || !hex.is_ascii() {
                    return Err(E::custom(format!("invalid hex color: {value}")));
                }
                let parse = |range| {
                    u8::from_str_radix(&hex[range], 16)
                        .map_err(|_| E::custom(format!("invalid hex color: {value}")))
                };
                Ok(Rgb::new(parse(0..2)?, parse(2..4)?, parse(4..6)?))
            }
        }

        deserializer.deserialize_str(RgbVisitor)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn test_saturation_grays_are_zero() {
        assert!(close(Rgb::new(0, 0, 0).saturation(), 0.0));
        assert!(close(Rgb::new(128, 128, 128).saturation(), 0.0));
        assert!(close(Rgb::new(255, 255, 255).saturation(), 0.0));
    }

    #[test]
    fn test_saturation_pure_channels_are_full() {
        assert!(close(Rgb::new(255, 0, 0).saturation(), 1.0));
        assert!(close(Rgb::new(0, 255, 0).saturation(), 1.0));
        assert!(close(Rgb::new(0, 0, 255).saturation(), 1.0));
    }

    #[test]
    fn test_saturation_divisor_switch() {
        // Dark color: max + min = 100 <= 255, divisor is the sum.
        assert!(close(Rgb::new(100, 0, 0).saturation(), 1.0));
        // Light color: max + min = 455 > 255, divisor is 510 - 455 = 55.
        assert!(close(Rgb::new(255, 200, 200).saturation(), 1.0));
        // Mid: max + min = 150 + 50 = 200, sat = 100 / 200.
        assert!(close(Rgb::new(150, 50, 100).saturation(), 0.5));
    }

    #[test]
    fn test_lightness() {
        assert!(close(Rgb::new(0, 0, 0).lightness(), 0.0));
        assert!(close(Rgb::new(255, 255, 255).lightness(), 1.0));
        assert!(close(Rgb::new(255, 0, 0).lightness(), 0.5));
        assert!(close(Rgb::new(100, 100, 100).lightness(), 200.0 / 510.0));
    }

    #[test]
    fn test_display_hex() {
        assert_eq!(Rgb::new(0x1a, 0x2b, 0x3c).to_string(), "#1a2b3c");
        assert_eq!(Rgb::new(0, 0, 0).to_string(), "#000000");
        assert_eq!(Rgb::new(255, 255, 255).to_string(), "#ffffff");
    }

    #[test]
    fn test_serde_round_trip() {
        let color = Rgb::new(0x10, 0x14, 0x18);
        let json = serde_json::to_string(&color).unwrap();
        assert_eq!(json, "\"#101418\"");
        assert_eq!(serde_json::from_str::<Rgb>(&json).unwrap(), color);
        assert_eq!(
            serde_json::from_str::<Rgb>("\"a0b0c0\"").unwrap(),
            Rgb::new(0xa0, 0xb0, 0xc0)
        );
        assert!(serde_json::from_str::<Rgb>("\"#12345\"").is_err());
        assert!(serde_json::from_str::<Rgb>("\"#gggggg\"").is_err());
    }
}
