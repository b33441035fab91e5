//! Hex colors shared by the spreadsheet and document builders

/// A color in RGB format (0.0 to 1.0)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RgbColor {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl RgbColor {
    pub fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    pub fn from_u8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f64 / 255.0,
            g: g as f64 / 255.0,
            b: b as f64 / 255.0,
        }
    }

    pub fn black() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    pub fn white() -> Self {
        Self::new(1.0, 1.0, 1.0)
    }

    /// Parse `#RRGGBB`, `RRGGBB`, or the short `#RGB` form
    pub fn parse_hex(hex: &str) -> Option<Self> {
        let digits = hex.trim().trim_start_matches('#');
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let channel = |s: &str| u8::from_str_radix(s, 16).ok();
        match digits.len() {
            6 => Some(Self::from_u8(
                channel(&digits[0..2])?,
                channel(&digits[2..4])?,
                channel(&digits[4..6])?,
            )),
            3 => {
                let expand = |i: usize| channel(&digits[i..i + 1]).map(|v| v * 17);
                Some(Self::from_u8(expand(0)?, expand(1)?, expand(2)?))
            }
            _ => None,
        }
    }

    /// Parse a hex color, falling back to black
    pub fn from_hex(hex: &str) -> Self {
        Self::parse_hex(hex).unwrap_or_else(|| {
            tracing::warn!("invalid color {:?}, using black", hex);
            Self::black()
        })
    }

    /// 8-bit channels
    pub fn to_u8(&self) -> (u8, u8, u8) {
        let c = |v: f64| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        (c(self.r), c(self.g), c(self.b))
    }

    /// Opaque ARGB hex as used in spreadsheet styles (`FF1F4E79`)
    pub fn to_argb(&self) -> String {
        let (r, g, b) = self.to_u8();
        format!("FF{:02X}{:02X}{:02X}", r, g, b)
    }
}
