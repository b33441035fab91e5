//! PDF Content Stream Generation
//!
//! A builder for the graphics operators that draw one page.
//!
//! - `q`/`Q`: save and restore graphics state
//! - `rg`/`RG`: fill and stroke color
//! - `w`, `re`, `m`, `l`, `f`, `S`: line width and path painting
//! - `BT`/`ET`, `Tf`, `Td`, `Tm`, `Tj`: text objects

use super::fonts::{encode_win_ansi, StandardFont};
use super::objects::write_literal;
use crate::color::RgbColor;
use std::io::Write;

/// Content stream builder
#[derive(Debug, Default)]
pub struct ContentStream {
    data: Vec<u8>,
}

impl ContentStream {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Save the current graphics state (q)
    pub fn save_state(&mut self) -> &mut Self {
        self.write_line("q");
        self
    }

    /// Restore the graphics state (Q)
    pub fn restore_state(&mut self) -> &mut Self {
        self.write_line("Q");
        self
    }

    /// Set the line width (w)
    pub fn set_line_width(&mut self, width: f64) -> &mut Self {
        self.write_fmt(format_args!("{} w\n", fmt_num(width)));
        self
    }

    /// Set the fill color (rg)
    pub fn set_fill_color(&mut self, color: RgbColor) -> &mut Self {
        self.write_fmt(format_args!("{} rg\n", color_components(color)));
        self
    }

    /// Set the stroke color (RG)
    pub fn set_stroke_color(&mut self, color: RgbColor) -> &mut Self {
        self.write_fmt(format_args!("{} RG\n", color_components(color)));
        self
    }

    /// Move to a point (m)
    pub fn move_to(&mut self, x: f64, y: f64) -> &mut Self {
        self.write_fmt(format_args!("{} {} m\n", fmt_num(x), fmt_num(y)));
        self
    }

    /// Line to a point (l)
    pub fn line_to(&mut self, x: f64, y: f64) -> &mut Self {
        self.write_fmt(format_args!("{} {} l\n", fmt_num(x), fmt_num(y)));
        self
    }

    /// Rectangle (re)
    pub fn rect(&mut self, x: f64, y: f64, width: f64, height: f64) -> &mut Self {
        self.write_fmt(format_args!(
            "{} {} {} {} re\n",
            fmt_num(x),
            fmt_num(y),
            fmt_num(width),
            fmt_num(height)
        ));
        self
    }

    /// Fill the current path (f)
    pub fn fill(&mut self) -> &mut Self {
        self.write_line("f");
        self
    }

    /// Stroke the current path (S)
    pub fn stroke(&mut self) -> &mut Self {
        self.write_line("S");
        self
    }

    /// A filled rectangle
    pub fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) -> &mut Self {
        self.rect(x, y, width, height).fill()
    }

    /// A stroked rectangle
    pub fn stroke_rect(&mut self, x: f64, y: f64, width: f64, height: f64) -> &mut Self {
        self.rect(x, y, width, height).stroke()
    }

    /// A single stroked segment
    pub fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) -> &mut Self {
        self.move_to(x1, y1).line_to(x2, y2).stroke()
    }

    /// Begin a text object (BT)
    pub fn begin_text(&mut self) -> &mut Self {
        self.write_line("BT");
        self
    }

    /// End a text object (ET)
    pub fn end_text(&mut self) -> &mut Self {
        self.write_line("ET");
        self
    }

    /// Set the font and size (Tf)
    pub fn set_font(&mut self, font: StandardFont, size: f64) -> &mut Self {
        self.write_fmt(format_args!("/{} {} Tf\n", font.resource_name(), fmt_num(size)));
        self
    }

    /// Move text position (Td)
    pub fn move_text(&mut self, tx: f64, ty: f64) -> &mut Self {
        self.write_fmt(format_args!("{} {} Td\n", fmt_num(tx), fmt_num(ty)));
        self
    }

    /// Set the text matrix (Tm)
    pub fn set_text_matrix(&mut self, a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> &mut Self {
        self.write_fmt(format_args!(
            "{} {} {} {} {} {} Tm\n",
            fmt_num(a),
            fmt_num(b),
            fmt_num(c),
            fmt_num(d),
            fmt_num(e),
            fmt_num(f)
        ));
        self
    }

    /// Show a text string (Tj)
    pub fn show_text(&mut self, text: &str) -> &mut Self {
        let _ = write_literal(&mut self.data, &encode_win_ansi(text));
        self.write_line(" Tj");
        self
    }

    /// Position and show text in an isolated text object
    pub fn text(&mut self, font: StandardFont, size: f64, x: f64, y: f64, text: &str) -> &mut Self {
        self.begin_text()
            .set_font(font, size)
            .move_text(x, y)
            .show_text(text)
            .end_text()
    }

    /// Show text rotated counter-clockwise by `degrees` around its origin
    pub fn rotated_text(
        &mut self,
        font: StandardFont,
        size: f64,
        x: f64,
        y: f64,
        degrees: f64,
        text: &str,
    ) -> &mut Self {
        let (sin, cos) = degrees.to_radians().sin_cos();
        self.begin_text()
            .set_font(font, size)
            .set_text_matrix(cos, sin, -sin, cos, x, y)
            .show_text(text)
            .end_text()
    }

    fn write_line(&mut self, s: &str) {
        self.data.extend_from_slice(s.as_bytes());
        self.data.push(b'\n');
    }

    fn write_fmt(&mut self, args: std::fmt::Arguments<'_>) {
        let _ = self.data.write_fmt(args);
    }
}

/// Three color components, each clamped to [0, 1] with three decimals
pub fn color_components(color: RgbColor) -> String {
    let c = |v: f64| if v.is_finite() { v.clamp(0.0, 1.0) } else { 0.0 };
    format!("{:.3} {:.3} {:.3}", c(color.r), c(color.g), c(color.b))
}

/// Format a coordinate for PDF output
fn fmt_num(n: f64) -> String {
    if n.fract() == 0.0 {
        format!("{:.0}", n)
    } else {
        let s = format!("{:.4}", n);
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_stream_basic() {
        let mut cs = ContentStream::new();
        cs.save_state()
            .set_fill_color(RgbColor::from_hex("#FF0000"))
            .fill_rect(100.0, 100.0, 200.0, 50.0)
            .restore_state();

        let content = String::from_utf8(cs.into_bytes()).unwrap();
        assert_eq!(content, "q\n1.000 0.000 0.000 rg\n100 100 200 50 re\nf\nQ\n");
    }

    #[test]
    fn test_content_stream_text() {
        let mut cs = ContentStream::new();
        cs.text(StandardFont::Helvetica, 9.0, 76.0, 705.5, "Hello (World)");

        let content = String::from_utf8(cs.into_bytes()).unwrap();
        assert_eq!(content, "BT\n/F1 9 Tf\n76 705.5 Td\n(Hello \\(World\\)) Tj\nET\n");
    }

    #[test]
    fn test_content_stream_line() {
        let mut cs = ContentStream::new();
        cs.set_stroke_color(RgbColor::from_hex("#BFBFBF"))
            .set_line_width(0.5)
            .line(72.0, 700.0, 540.0, 700.0);

        let content = String::from_utf8(cs.into_bytes()).unwrap();
        assert!(content.contains("0.749 0.749 0.749 RG"));
        assert!(content.contains("0.5 w"));
        assert!(content.contains("72 700 m\n540 700 l\nS\n"));
    }

    #[test]
    fn test_rotated_text() {
        let mut cs = ContentStream::new();
        cs.rotated_text(StandardFont::HelveticaBold, 48.0, 100.0, 200.0, 45.0, "DRAFT");
        let content = String::from_utf8(cs.into_bytes()).unwrap();
        assert!(content.contains("0.7071 0.7071 -0.7071 0.7071 100 200 Tm"));
        assert!(content.contains("(DRAFT) Tj"));
    }

    #[test]
    fn test_show_text_encodes() {
        let mut cs = ContentStream::new();
        cs.show_text("5 €");
        assert_eq!(cs.as_bytes(), b"(5 \\200) Tj\n");
    }

    #[test]
    fn test_fmt_num() {
        assert_eq!(fmt_num(1.0), "1");
        assert_eq!(fmt_num(3.14159), "3.1416");
        assert_eq!(fmt_num(0.5), "0.5");
        assert_eq!(fmt_num(-12.0), "-12");
    }
}
