// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Linear-light color, the iteration-count shaders, and the gamma
//! encoding used when the buffer is quantized for output.

use std::ops::{Add, Mul};
use std::str::FromStr;

/// Reciprocal of the display gamma used for 8-bit quantization.
pub const ONE_OVER_GAMMA: f32 = 1.0 / 2.2;

/// Iteration counts at or below this shade as gradient start; the
/// gradient proper begins one past it.
const GRADIENT_KNEE: u32 = 20;

/// The gradient's start anchor, a dark blue-violet, linear light.
pub const GRADIENT_START: Rgb = Rgb {
    r: 0.039947171001526,
    g: 0.098689197541096,
    b: 0.320381548791812,
};

/// The gradient's end anchor, near-white, linear light.
pub const GRADIENT_END: Rgb = Rgb {
    r: 0.819963705323531,
    g: 0.827725794455035,
    b: 0.851251645184511,
};

/// A linear-light RGB triple.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Rgb {
    /// Red channel.
    pub r: f32,
    /// Green channel.
    pub g: f32,
    /// Blue channel.
    pub b: f32,
}

impl Rgb {
    /// All channels zero.
    pub const BLACK: Rgb = Rgb {
        r: 0.0,
        g: 0.0,
        b: 0.0,
    };

    /// Clamps each channel to be non-negative.  A pixel whose only
    /// set hit lands in a negative filter lobe can accumulate below
    /// zero; the clamp keeps such pixels from quantizing to garbage.
    pub fn clamp_negative(self) -> Rgb {
        Rgb {
            r: self.r.max(0.0),
            g: self.g.max(0.0),
            b: self.b.max(0.0),
        }
    }

    /// Gamma-encodes each channel and truncates to 8 bits.
    pub fn encode_srgb8(self) -> [u8; 3] {
        [
            (self.r.powf(ONE_OVER_GAMMA) * 255.0) as u8,
            (self.g.powf(ONE_OVER_GAMMA) * 255.0) as u8,
            (self.b.powf(ONE_OVER_GAMMA) * 255.0) as u8,
        ]
    }
}

impl Add for Rgb {
    type Output = Rgb;

    fn add(self, other: Rgb) -> Rgb {
        Rgb {
            r: self.r + other.r,
            g: self.g + other.g,
            b: self.b + other.b,
        }
    }
}

impl Mul<f32> for Rgb {
    type Output = Rgb;

    fn mul(self, factor: f32) -> Rgb {
        Rgb {
            r: self.r * factor,
            g: self.g * factor,
            b: self.b * factor,
        }
    }
}

/// Maps an escape-iteration count to a color.  Two strategies exist
/// because two variants of this renderer did: the two-stop gradient
/// with a deep-interior cutoff is canonical, the grayscale ramp is
/// kept for comparison renders.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Shader {
    /// Linear blend from `GRADIENT_START` to `GRADIENT_END`, with
    /// counts of twenty or fewer pinned to the start color.
    Gradient,
    /// `count / limit` on all three channels, no cutoff.
    Grayscale,
}

impl Shader {
    /// Shades one escape count against the iteration cap.
    pub fn shade(&self, count: u32, limit: u32) -> Rgb {
        match *self {
            Shader::Gradient => {
                let v = if count <= GRADIENT_KNEE {
                    0.0
                } else {
                    (count - GRADIENT_KNEE - 1) as f32 / (limit - GRADIENT_KNEE - 1) as f32
                };

                let dist = Rgb {
                    r: GRADIENT_END.r - GRADIENT_START.r,
                    g: GRADIENT_END.g - GRADIENT_START.g,
                    b: GRADIENT_END.b - GRADIENT_START.b,
                };

                dist * v + GRADIENT_START
            }
            Shader::Grayscale => {
                let v = count as f32 / limit as f32;
                Rgb { r: v, g: v, b: v }
            }
        }
    }
}

impl FromStr for Shader {
    type Err = String;

    fn from_str(s: &str) -> Result<Shader, String> {
        match s {
            "gradient" => Ok(Shader::Gradient),
            "grayscale" => Ok(Shader::Grayscale),
            _ => Err(format!("Unknown shader '{}'", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_at_or_below_knee_pin_to_the_start_anchor() {
        for count in &[0u32, 1, 19, 20] {
            assert_eq!(Shader::Gradient.shade(*count, 256), GRADIENT_START);
        }
        // The first count past the knee still lands on the anchor:
        // its blend factor is zero.
        assert_eq!(Shader::Gradient.shade(21, 256), GRADIENT_START);
    }

    #[test]
    fn cap_count_lands_on_the_end_anchor() {
        let shaded = Shader::Gradient.shade(256, 256);
        assert!((shaded.r - GRADIENT_END.r).abs() < 1e-6);
        assert!((shaded.g - GRADIENT_END.g).abs() < 1e-6);
        assert!((shaded.b - GRADIENT_END.b).abs() < 1e-6);
    }

    #[test]
    fn gradient_is_monotone_between_the_anchors() {
        let low = Shader::Gradient.shade(60, 256);
        let high = Shader::Gradient.shade(200, 256);
        assert!(low.r < high.r);
        assert!(low.g < high.g);
        assert!(low.b < high.b);
    }

    #[test]
    fn grayscale_is_a_plain_ramp() {
        assert_eq!(
            Shader::Grayscale.shade(128, 256),
            Rgb {
                r: 0.5,
                g: 0.5,
                b: 0.5
            }
        );
        assert_eq!(
            Shader::Grayscale.shade(0, 256),
            Rgb::BLACK
        );
    }

    #[test]
    fn shader_parses_from_str() {
        assert_eq!("gradient".parse::<Shader>(), Ok(Shader::Gradient));
        assert_eq!("grayscale".parse::<Shader>(), Ok(Shader::Grayscale));
        assert!("sepia".parse::<Shader>().is_err());
    }

    #[test]
    fn negative_clamp_only_touches_negative_channels() {
        let c = Rgb {
            r: -0.25,
            g: 0.5,
            b: -0.0001,
        };
        let clamped = c.clamp_negative();
        assert_eq!(clamped.r, 0.0);
        assert_eq!(clamped.g, 0.5);
        assert_eq!(clamped.b, 0.0);
    }

    #[test]
    fn srgb_encoding_truncates() {
        assert_eq!(Rgb::BLACK.encode_srgb8(), [0, 0, 0]);
        assert_eq!(
            Rgb {
                r: 1.0,
                g: 1.0,
                b: 1.0
            }
            .encode_srgb8(),
            [255, 255, 255]
        );
        // 0.5^(1/2.2) * 255 = 186.5xx, truncated.
        assert_eq!(
            Rgb {
                r: 0.5,
                g: 0.5,
                b: 0.5
            }
            .encode_srgb8()[0],
            186
        );
    }
}
