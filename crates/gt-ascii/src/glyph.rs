use gt_core::palette::Palette;

/// Index de glyphe pour une luminance `value` et une palette de `len` glyphes.
///
/// `floor(v' × len / 256)` borné à `[0, len − 1]`, avec `v' = 255 − value`
/// si `invert`. Les valeurs hors [0, 255] (bords tramés) sont acceptées.
///
/// # Example
/// ```
/// use gt_ascii::glyph::glyph_index;
/// assert_eq!(glyph_index(128, 32, false), 16);
/// assert_eq!(glyph_index(255, 32, false), 31);
/// assert_eq!(glyph_index(-40, 32, false), 0);
/// ```
#[inline(always)]
#[must_use]
pub fn glyph_index(value: i32, len: usize, invert: bool) -> usize {
    let len = len.max(1);
    let v = if invert { 255 - i64::from(value) } else { i64::from(value) };
    (v * len as i64).div_euclid(256).clamp(0, len as i64 - 1) as usize
}

/// Lookup table mapping luminance [0..255] → glyph, built once per render.
///
/// # Example
/// ```
/// use gt_core::palette::Palette;
/// use gt_ascii::glyph::GlyphMapper;
/// let palette = Palette::new(" .:#@").unwrap();
/// let mapper = GlyphMapper::new(&palette, false);
/// assert_eq!(mapper.map(0), ' ');
/// assert_eq!(mapper.map(255), '@');
/// ```
pub struct GlyphMapper {
    lut: [char; 256],
}

impl GlyphMapper {
    /// Build the table for `palette`, inversion folded in.
    #[must_use]
    pub fn new(palette: &Palette, invert: bool) -> Self {
        let mut lut = [' '; 256];
        for (v, slot) in (0i32..).zip(lut.iter_mut()) {
            *slot = palette.glyph(glyph_index(v, palette.len(), invert));
        }
        Self { lut }
    }

    /// Glyph for a luminance value. Out-of-range inputs land on the first or
    /// last table entry.
    #[inline(always)]
    #[must_use]
    pub fn map(&self, value: i32) -> char {
        self.lut[value.clamp(0, 255) as usize]
    }
}
