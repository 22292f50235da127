use serde::Deserialize;

use crate::error::{Error, Result};

/// Bits of a packed color that carry `0xRRGGBB`.
pub const PACKED_COLOR_MASK: u32 = 0x00FF_FFFF;

/// Per-point colors in one of two representations.
///
/// Exactly one representation is active per dataset; [`ColorMode`] tells the
/// shader which unpacking rule applies to the bound color buffer.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ColorSet {
    /// Parallel channel sequences in `[0, 1]`.
    Channels { r: Vec<f64>, g: Vec<f64>, b: Vec<f64> },
    /// `0xRRGGBB` per point.
    Packed(Vec<u32>),
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[repr(u32)]
pub enum ColorMode {
    Channels = 0,
    Packed = 1,
}

impl ColorMode {
    #[inline]
    pub fn as_u32(self) -> u32 {
        self as u32
    }
}

impl ColorSet {
    pub fn mode(&self) -> ColorMode {
        match self {
            ColorSet::Channels { .. } => ColorMode::Channels,
            ColorSet::Packed(_) => ColorMode::Packed,
        }
    }

    /// Number of points covered. Channel sequences must agree in length.
    pub fn len(&self) -> Result<usize> {
        match self {
            ColorSet::Channels { r, g, b } => {
                for (what, channel) in [("g", g), ("b", b)] {
                    if channel.len() != r.len() {
                        return Err(Error::DataShape {
                            what,
                            expected: r.len(),
                            found: channel.len(),
                        });
                    }
                }
                Ok(r.len())
            }
            ColorSet::Packed(values) => Ok(values.len()),
        }
    }

    /// One `[f32; 3]` per point for the color vertex buffer.
    ///
    /// Channel colors are clamped to `[0, 1]`. Packed values travel as
    /// `(v, 0, 0)`; masked to 24 bits they are exact in `f32` and the shader
    /// unpacks them.
    pub fn encode(&self) -> Vec<[f32; 3]> {
        match self {
            ColorSet::Channels { r, g, b } => r
                .iter()
                .zip(g)
                .zip(b)
                .map(|((&r, &g), &b)| [unit(r), unit(g), unit(b)])
                .collect(),
            ColorSet::Packed(values) => values
                .iter()
                .map(|&v| [(v & PACKED_COLOR_MASK) as f32, 0.0, 0.0])
                .collect(),
        }
    }
}

fn unit(v: f64) -> f32 {
    if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) as f32 }
}

/// CPU mirror of the shader's packed-color rule.
///
/// Each channel is its 8-bit value divided by 256, so a full channel reads
/// `255 / 256`.
pub fn unpack_packed_color(value: u32) -> [f32; 3] {
    let v = value & PACKED_COLOR_MASK;
    let r = v / 65_536;
    let g = (v - r * 65_536) / 256;
    let b = v - r * 65_536 - g * 256;
    [r as f32 / 256.0, g as f32 / 256.0, b as f32 / 256.0]
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn unpacks_orange() {
        let [r, g, b] = unpack_packed_color((255 << 16) | (128 << 8));
        assert_abs_diff_eq!(r, 1.0, epsilon = 1.0 / 256.0);
        assert_eq!(g, 128.0 / 256.0);
        assert_eq!(b, 0.0);
    }

    #[test]
    fn unpack_ignores_high_byte() {
        assert_eq!(unpack_packed_color(0xFF00_0001), unpack_packed_color(0x0000_0001));
    }

    #[test]
    fn packed_encoding_is_exact() {
        let set = ColorSet::Packed(vec![0x00FF_FFFF, 0x0012_3456]);
        assert_eq!(set.mode(), ColorMode::Packed);
        let enc = set.encode();
        assert_eq!(enc[0][0] as u32, 0x00FF_FFFF);
        assert_eq!(enc[1][0] as u32, 0x0012_3456);
    }

    #[test]
    fn channels_are_clamped() {
        let set = ColorSet::Channels {
            r: vec![1.5, 0.25],
            g: vec![-0.5, f64::NAN],
            b: vec![0.0, 1.0],
        };
        assert_eq!(set.encode(), vec![[1.0, 0.0, 0.0], [0.25, 0.0, 1.0]]);
        assert_eq!(set.len().unwrap(), 2);
    }

    #[test]
    fn channel_length_mismatch_is_reported() {
        let set = ColorSet::Channels { r: vec![0.0; 3], g: vec![0.0; 3], b: vec![0.0; 2] };
        assert_eq!(
            set.len().unwrap_err(),
            Error::DataShape { what: "b", expected: 3, found: 2 }
        );
    }

    #[test]
    fn deserializes_either_representation() {
        let packed: ColorSet = serde_json::from_str("[16711680, 255]").unwrap();
        assert_eq!(packed, ColorSet::Packed(vec![0xFF0000, 0xFF]));

        let channels: ColorSet = serde_json::from_str(r#"{"r":[1],"g":[0.5],"b":[0]}"#).unwrap();
        assert_eq!(channels.mode(), ColorMode::Channels);
    }
}
