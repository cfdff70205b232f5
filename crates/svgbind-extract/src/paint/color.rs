use crate::value::AttrValue;

/// Straight-alpha sRGB color.
///
/// Channels are bytes (`0`–`255`); alpha is a fraction in `[0, 1]`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const BLACK: Rgba = Rgba::new(0, 0, 0, 1.0);
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0.0);

    #[inline]
    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Unpacks a `0xAARRGGBB` integer.
    pub fn from_argb(argb: u32) -> Self {
        Self {
            r: (argb >> 16) as u8,
            g: (argb >> 8) as u8,
            b: argb as u8,
            a: (argb >> 24) as f32 / 255.0,
        }
    }

    /// `[r, g, b, a]` with every channel in `[0, 1]`.
    pub fn normalized(self) -> [f32; 4] {
        [self.r as f32 / 255.0, self.g as f32 / 255.0, self.b as f32 / 255.0, self.a]
    }

    /// Multiplies alpha by `opacity` (clamped to `[0, 1]`).
    pub fn with_opacity(self, opacity: f32) -> Self {
        Self { a: (self.a * opacity.clamp(0.0, 1.0)).clamp(0.0, 1.0), ..self }
    }
}

impl Default for Rgba {
    fn default() -> Self {
        Rgba::BLACK
    }
}

// ── Parsing ───────────────────────────────────────────────────────────────

/// Parses any accepted color literal.
///
/// Strings: any CSS color (hex, `rgb()`, `hsl()`, names). Numbers: packed
/// `0xAARRGGBB`. Lists: `[r, g, b]` or `[r, g, b, a]`.
pub fn parse_color(value: &AttrValue) -> Option<Rgba> {
    match value {
        AttrValue::Str(s) => parse_color_str(s),
        AttrValue::Number(n) => {
            let packed = (n.fract() == 0.0 && *n >= 0.0 && *n <= u32::MAX as f64).then_some(*n as u32)?;
            Some(Rgba::from_argb(packed))
        }
        AttrValue::List(items) => parse_color_list(items),
        _ => None,
    }
}

pub fn parse_color_str(src: &str) -> Option<Rgba> {
    let c = src.trim().parse::<csscolorparser::Color>().ok()?;
    Some(Rgba::new(
        to_byte(c.r as f32 * 255.0),
        to_byte(c.g as f32 * 255.0),
        to_byte(c.b as f32 * 255.0),
        (c.a as f32).clamp(0.0, 1.0),
    ))
}

fn to_byte(v: f32) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}

fn parse_color_list(items: &[AttrValue]) -> Option<Rgba> {
    if !(3..=4).contains(&items.len()) {
        return None;
    }
    let nums: Vec<f32> = items.iter().map(AttrValue::as_f32).collect::<Option<_>>()?;
    let a = nums.get(3).copied().unwrap_or(1.0).clamp(0.0, 1.0);
    Some(Rgba::new(to_byte(nums[0]), to_byte(nums[1]), to_byte(nums[2]), a))
}
