use palette::{LinSrgb, Mix, Srgb};

// ---------------------------------------------------------------------------
// Palettes
// ---------------------------------------------------------------------------

/// Plotly's default qualitative palette, cycled by selection position.
const QUALITATIVE: [(u8, u8, u8); 10] = [
    (0x63, 0x6e, 0xfa),
    (0xef, 0x55, 0x3b),
    (0x00, 0xcc, 0x96),
    (0xab, 0x63, 0xfa),
    (0xff, 0xa1, 0x5a),
    (0x19, 0xd3, 0xf3),
    (0xff, 0x66, 0x92),
    (0xb6, 0xe8, 0x80),
    (0xff, 0x97, 0xff),
    (0xfe, 0xcb, 0x52),
];

/// Plasma stops, the default continuous scale for numeric colour columns.
const SEQUENTIAL: [(u8, u8, u8); 10] = [
    (0x0d, 0x08, 0x87),
    (0x46, 0x03, 0x9f),
    (0x72, 0x01, 0xa8),
    (0x9c, 0x17, 0x9e),
    (0xbd, 0x37, 0x86),
    (0xd8, 0x57, 0x6b),
    (0xed, 0x79, 0x53),
    (0xfb, 0x9f, 0x3a),
    (0xfd, 0xca, 0x26),
    (0xf0, 0xf9, 0x21),
];

fn srgb((r, g, b): (u8, u8, u8)) -> Srgb<u8> {
    Srgb::new(r, g, b)
}

/// Colour for the `index`-th entry of a selection; wraps after ten.
pub fn qualitative_color(index: usize) -> Srgb<u8> {
    srgb(QUALITATIVE[index % QUALITATIVE.len()])
}

/// Sample the sequential scale at `t` in `[0, 1]`, mixing neighbouring stops
/// in linear light. Out-of-range and NaN inputs clamp to the ends.
pub fn sequential_color(t: f32) -> Srgb<u8> {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    let last = SEQUENTIAL.len() - 1;
    let scaled = t * last as f32;
    let lo = (scaled.floor() as usize).min(last);
    let hi = (lo + 1).min(last);
    let factor = scaled - lo as f32;

    let a: LinSrgb<f32> = srgb(SEQUENTIAL[lo]).into_format::<f32>().into_linear();
    let b: LinSrgb<f32> = srgb(SEQUENTIAL[hi]).into_format::<f32>().into_linear();
    let mixed: Srgb<f32> = Srgb::from_linear(a.mix(b, factor));
    mixed.into_format()
}

/// `#rrggbb` form used by the chart front end.
pub fn to_hex(color: Srgb<u8>) -> String {
    format!("#{:02x}{:02x}{:02x}", color.red, color.green, color.blue)
}
