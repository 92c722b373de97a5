//! Color-space encodings and their conversions to displayable 8-bit RGB.
//!
//! The supported encodings form a closed set; each conversion is a pure,
//! documented transform:
//! - sRGB transfer function per IEC 61966-2-1 (linear threshold 0.0031308,
//!   encoded threshold 0.04045, slope 12.92, gamma 2.4).
//! - XYZ <-> linear sRGB matrices per IEC 61966-2-1 (D65 white point).
//! - CIE L*a*b* per CIE 15:2004 with delta = 6/29 and the D65 2-degree
//!   white point (Xn = 0.95047, Yn = 1.0, Zn = 1.08883).
//!
//! Out-of-gamut results clamp channel-wise on the way to 8 bits.

use crate::core::Rgb8;

/// D65 2-degree white point.
pub const D65_WHITE: [f64; 3] = [0.95047, 1.0, 1.08883];

/// CIE 15:2004 delta = 6/29.
const LAB_DELTA: f64 = 6.0 / 29.0;

/// Linear sRGB -> XYZ (IEC 61966-2-1, D65), row-major.
const LINEAR_RGB_TO_XYZ: [[f64; 3]; 3] = [
    [0.4124564, 0.3575761, 0.1804375],
    [0.2126729, 0.7151522, 0.0721750],
    [0.0193339, 0.1191920, 0.9503041],
];

/// XYZ -> linear sRGB (IEC 61966-2-1, D65), row-major.
const XYZ_TO_LINEAR_RGB: [[f64; 3]; 3] = [
    [3.2404542, -1.5371385, -0.4985314],
    [-0.9692660, 1.8760108, 0.0415560],
    [0.0556434, -0.2040259, 1.0572252],
];

/// How a raw three-channel value maps to a displayable 8-bit RGB fill.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Encoding {
    /// Gamma-encoded sRGB, channels already 0..=255.
    Rgb8,
    /// Gamma-encoded sRGB, channels normalized 0..=1.
    RgbF,
    /// Linear-light RGB, channels 0..=1.
    LinearRgbF,
    /// CIE XYZ, D65 2-degree, Y in 0..=1.
    Xyz,
    /// CIE L*a*b*, D65 2-degree (L in 0..=100).
    Lab,
}

impl Encoding {
    /// Convert one raw triple to an exact 8-bit fill. Deterministic;
    /// out-of-range inputs clamp rather than fail.
    pub fn to_rgb8(self, value: [f64; 3]) -> Rgb8 {
        match self {
            Encoding::Rgb8 => Rgb8 {
                r: quantize(value[0] / 255.0),
                g: quantize(value[1] / 255.0),
                b: quantize(value[2] / 255.0),
            },
            Encoding::RgbF => Rgb8 {
                r: quantize(value[0]),
                g: quantize(value[1]),
                b: quantize(value[2]),
            },
            Encoding::LinearRgbF => Rgb8 {
                r: quantize(srgb_encode(value[0])),
                g: quantize(srgb_encode(value[1])),
                b: quantize(srgb_encode(value[2])),
            },
            Encoding::Xyz => {
                let [r, g, b] = mat_mul(&XYZ_TO_LINEAR_RGB, value);
                Rgb8 {
                    r: quantize(srgb_encode(r)),
                    g: quantize(srgb_encode(g)),
                    b: quantize(srgb_encode(b)),
                }
            }
            Encoding::Lab => Encoding::Xyz.to_rgb8(lab_to_xyz(value)),
        }
    }
}

fn quantize(x: f64) -> u8 {
    (x.clamp(0.0, 1.0) * 255.0).round() as u8
}

fn mat_mul(m: &[[f64; 3]; 3], v: [f64; 3]) -> [f64; 3] {
    [
        m[0][0] * v[0] + m[0][1] * v[1] + m[0][2] * v[2],
        m[1][0] * v[0] + m[1][1] * v[1] + m[1][2] * v[2],
        m[2][0] * v[0] + m[2][1] * v[1] + m[2][2] * v[2],
    ]
}

/// Linear light -> gamma-encoded sRGB (IEC 61966-2-1).
pub fn srgb_encode(v: f64) -> f64 {
    if v <= 0.0031308 {
        12.92 * v
    } else {
        1.055 * v.powf(1.0 / 2.4) - 0.055
    }
}

/// Gamma-encoded sRGB -> linear light (inverse of [`srgb_encode`]).
pub fn srgb_decode(v: f64) -> f64 {
    if v <= 0.04045 {
        v / 12.92
    } else {
        ((v + 0.055) / 1.055).powf(2.4)
    }
}

/// CIE L*a*b* -> XYZ (CIE 15:2004, D65).
pub fn lab_to_xyz([l, a, b]: [f64; 3]) -> [f64; 3] {
    fn f_inv(t: f64) -> f64 {
        if t > LAB_DELTA {
            t * t * t
        } else {
            3.0 * LAB_DELTA * LAB_DELTA * (t - 4.0 / 29.0)
        }
    }

    let fy = (l + 16.0) / 116.0;
    let fx = fy + a / 500.0;
    let fz = fy - b / 200.0;
    [
        D65_WHITE[0] * f_inv(fx),
        D65_WHITE[1] * f_inv(fy),
        D65_WHITE[2] * f_inv(fz),
    ]
}

/// XYZ -> CIE L*a*b* (inverse of [`lab_to_xyz`], used by round-trip tests).
pub fn xyz_to_lab([x, y, z]: [f64; 3]) -> [f64; 3] {
    fn f(t: f64) -> f64 {
        if t > LAB_DELTA * LAB_DELTA * LAB_DELTA {
            t.cbrt()
        } else {
            t / (3.0 * LAB_DELTA * LAB_DELTA) + 4.0 / 29.0
        }
    }

    let fx = f(x / D65_WHITE[0]);
    let fy = f(y / D65_WHITE[1]);
    let fz = f(z / D65_WHITE[2]);
    [116.0 * fy - 16.0, 500.0 * (fx - fy), 200.0 * (fy - fz)]
}

/// Linear sRGB -> XYZ (inverse direction of the display matrix, used by
/// round-trip tests).
pub fn linear_rgb_to_xyz(rgb: [f64; 3]) -> [f64; 3] {
    mat_mul(&LINEAR_RGB_TO_XYZ, rgb)
}

/// WCAG relative luminance of a fill: BT.709 weights on linearized
/// channels, 0.0 for black through 1.0 for white.
pub fn relative_luminance(c: Rgb8) -> f64 {
    let r = srgb_decode(f64::from(c.r) / 255.0);
    let g = srgb_decode(f64::from(c.g) / 255.0);
    let b = srgb_decode(f64::from(c.b) / 255.0);
    0.2126 * r + 0.7152 * g + 0.0722 * b
}

/// Luminance above which label text switches from white to black. 0.179
/// is the WCAG crossover where contrast against black overtakes contrast
/// against white.
pub const CONTRAST_LUMINANCE_THRESHOLD: f64 = 0.179;

/// Legible label color for the given fill: dark text on light patches,
/// light text on dark patches.
pub fn contrast_text_color(fill: Rgb8) -> Rgb8 {
    if relative_luminance(fill) > CONTRAST_LUMINANCE_THRESHOLD {
        Rgb8::BLACK
    } else {
        Rgb8::WHITE
    }
}
