//! Color and visual style carried by shape nodes.
//!
//! Conversion never reads styles; the encoder only writes a default one.

/// 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const WHITE: Rgba8 = Rgba8::new_opaque(255, 255, 255);
    pub const BLACK: Rgba8 = Rgba8::new_opaque(0, 0, 0);
    pub const PINK: Rgba8 = Rgba8::new_opaque(255, 192, 203);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn new_opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }
}

/// Fill and stroke state of one shape node. `None` disables the paint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Style {
    pub fill: Option<Rgba8>,
    pub stroke: Option<Rgba8>,
    pub stroke_weight: f64,
}

impl Style {
    /// White fill with a pink 4-unit outline, applied to freshly encoded shapes.
    pub const fn highlight() -> Self {
        Self {
            fill: Some(Rgba8::WHITE),
            stroke: Some(Rgba8::PINK),
            stroke_weight: 4.0,
        }
    }
}

impl Default for Style {
    fn default() -> Self {
        Self {
            fill: Some(Rgba8::WHITE),
            stroke: Some(Rgba8::BLACK),
            stroke_weight: 1.0,
        }
    }
}
