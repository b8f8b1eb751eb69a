//! Color space conversions and perceptual color difference.
//!
//! Colors move through three spaces on their way to a distance:
//!
//! - [`Rgb`]: normalized sRGB components in `0.0..=1.0`
//! - [`Xyz`]: CIE 1931 XYZ (D65, 2° observer), scaled to `0..=100`
//! - [`Lab`]: CIE L\*a\*b\*, where [`Lab::delta_e_2000`] measures distance
//!
//! # Examples
//!
//! ```
//! use chat_text::color_space::{Lab, Rgb};
//!
//! let red = Rgb::from_u32(0xFF0000).to_lab();
//! let orange = Rgb::from_u32(0xFF8800).to_lab();
//!
//! assert!(red.delta_e_2000(&orange) > 0.0);
//! assert!(red.delta_e_2000(&red).abs() < 1e-9);
//! ```

use std::f64::consts::PI;

/// Normalized sRGB triplet with components in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rgb {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
}

impl Rgb {
    /// Create a triplet from normalized components.
    #[must_use]
    pub const fn new(red: f64, green: f64, blue: f64) -> Self {
        Self { red, green, blue }
    }

    /// Create a triplet from a `0x00RRGGBB` integer.
    #[must_use]
    pub fn from_u32(rgb: u32) -> Self {
        let channel = |shift: u32| f64::from((rgb >> shift) & 0xFF) / 255.0;
        Self::new(channel(16), channel(8), channel(0))
    }

    /// Convert back to a `0x00RRGGBB` integer, truncating each channel.
    #[must_use]
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "channels are clamped to 0..=255 before the cast"
    )]
    pub fn to_u32(&self) -> u32 {
        let channel = |value: f64| (value * 255.0).clamp(0.0, 255.0) as u32;
        (channel(self.red) << 16) | (channel(self.green) << 8) | channel(self.blue)
    }

    /// Convert to XYZ using the sRGB inverse transfer function.
    #[must_use]
    pub fn to_xyz(&self) -> Xyz {
        let r = 100.0 * srgb_to_linear(self.red);
        let g = 100.0 * srgb_to_linear(self.green);
        let b = 100.0 * srgb_to_linear(self.blue);

        Xyz::new(
            (r * 0.412_390_80) + (g * 0.357_584_34) + (b * 0.180_480_79),
            (r * 0.212_639_01) + (g * 0.715_168_68) + (b * 0.072_192_32),
            (r * 0.019_330_82) + (g * 0.119_194_78) + (b * 0.950_532_15),
        )
    }

    /// Convert to LAB relative to the D65 white point.
    #[must_use]
    pub fn to_lab(&self) -> Lab {
        self.to_xyz().to_lab(Xyz::REFERENCE_D65)
    }
}

fn srgb_to_linear(value: f64) -> f64 {
    if value > 0.040_45 {
        ((value + 0.055) / 1.055).powf(2.4)
    } else {
        value / 12.92
    }
}

/// CIE XYZ triplet scaled to `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Xyz {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Xyz {
    /// D65 standard illuminant (daylight, sRGB, Adobe RGB), 2° observer.
    pub const REFERENCE_D65: Self = Self::new(95.047, 100.000, 108.883);

    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Convert to LAB relative to a reference white.
    #[must_use]
    pub fn to_lab(&self, reference: Self) -> Lab {
        let fx = lab_f(self.x / reference.x);
        let fy = lab_f(self.y / reference.y);
        let fz = lab_f(self.z / reference.z);

        Lab::new((116.0 * fy) - 16.0, 500.0 * (fx - fy), 200.0 * (fy - fz))
    }
}

fn lab_f(t: f64) -> f64 {
    if t > 0.008_856 {
        t.cbrt()
    } else {
        (7.787 * t) + (16.0 / 116.0)
    }
}

/// CIE L\*a\*b\* triplet.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Lab {
    pub l: f64,
    pub a: f64,
    pub b: f64,
}

impl Lab {
    #[must_use]
    pub const fn new(l: f64, a: f64, b: f64) -> Self {
        Self { l, a, b }
    }

    /// CIEDE2000 color difference with unit weighting factors (kL = kC = kH = 1).
    ///
    /// The result is non-negative and symmetric, and zero for identical
    /// triplets. Non-finite inputs propagate NaN.
    #[must_use]
    pub fn delta_e_2000(&self, other: &Self) -> f64 {
        const KL: f64 = 1.0;
        const KC: f64 = 1.0;
        const KH: f64 = 1.0;
        let pow25_7 = 25.0_f64.powi(7);

        let l_mean = f64::midpoint(self.l, other.l);
        let c1 = self.a.hypot(self.b);
        let c2 = other.a.hypot(other.b);
        let c_mean = f64::midpoint(c1, c2);

        let g = (1.0 - (c_mean.powi(7) / (c_mean.powi(7) + pow25_7)).sqrt()) / 2.0;
        let a1_prime = self.a * (1.0 + g);
        let a2_prime = other.a * (1.0 + g);

        let c1_prime = a1_prime.hypot(self.b);
        let c2_prime = a2_prime.hypot(other.b);
        let c_mean_prime = f64::midpoint(c1_prime, c2_prime);

        let h1_prime = hue_angle(self.b, a1_prime);
        let h2_prime = hue_angle(other.b, a2_prime);
        let h_mean_prime = if (h1_prime - h2_prime).abs() > PI {
            (h1_prime + h2_prime + 2.0 * PI) / 2.0
        } else {
            f64::midpoint(h1_prime, h2_prime)
        };

        let t = 1.0 - 0.17 * (h_mean_prime - PI / 6.0).cos()
            + 0.24 * (2.0 * h_mean_prime).cos()
            + 0.32 * (3.0 * h_mean_prime + PI / 30.0).cos()
            - 0.20 * (4.0 * h_mean_prime - 21.0 * PI / 60.0).cos();

        let delta_h_small = if (h1_prime - h2_prime).abs() <= PI {
            h2_prime - h1_prime
        } else if h2_prime <= h1_prime {
            h2_prime - h1_prime + 2.0 * PI
        } else {
            h2_prime - h1_prime - 2.0 * PI
        };

        let delta_l_prime = other.l - self.l;
        let delta_c_prime = c2_prime - c1_prime;
        let delta_h_prime = 2.0 * (c1_prime * c2_prime).sqrt() * (delta_h_small / 2.0).sin();

        let l_offset = (l_mean - 50.0) * (l_mean - 50.0);
        let sl = 1.0 + 0.015 * l_offset / (20.0 + l_offset).sqrt();
        let sc = 1.0 + 0.045 * c_mean_prime;
        let sh = 1.0 + 0.015 * c_mean_prime * t;

        let hue_degrees = h_mean_prime.to_degrees();
        let delta_theta = 30.0_f64.to_radians() * (-((hue_degrees - 275.0) / 25.0).powi(2)).exp();
        let rc = 2.0 * (c_mean_prime.powi(7) / (c_mean_prime.powi(7) + pow25_7)).sqrt();
        let rt = -rc * (2.0 * delta_theta).sin();

        let dl = delta_l_prime / (KL * sl);
        let dc = delta_c_prime / (KC * sc);
        let dh = delta_h_prime / (KH * sh);

        (dl * dl + dc * dc + dh * dh + rt * dc * dh).sqrt()
    }
}

/// Hue angle in `0..2π`.
fn hue_angle(b: f64, a_prime: f64) -> f64 {
    let angle = b.atan2(a_prime);
    if angle < 0.0 { angle + 2.0 * PI } else { angle }
}
