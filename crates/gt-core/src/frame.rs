/// Buffer de pixels RGBA, row-major, 4 bytes par pixel.
///
/// C'est l'image source telle que fournie par l'appelant. Le pipeline ne la
/// modifie jamais : le redimensionnement produit un nouveau buffer.
///
/// # Example
/// ```
/// use gt_core::frame::FrameBuffer;
/// let fb = FrameBuffer::new(10, 10);
/// assert_eq!(fb.data.len(), 400);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameBuffer {
    /// Pixels RGBA, row-major, 4 bytes par pixel.
    pub data: Vec<u8>,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl FrameBuffer {
    /// Crée un buffer noir transparent aux dimensions données.
    ///
    /// # Example
    /// ```
    /// use gt_core::frame::FrameBuffer;
    /// let fb = FrameBuffer::new(100, 50);
    /// assert_eq!(fb.width, 100);
    /// assert_eq!(fb.height, 50);
    /// assert_eq!(fb.data.len(), 100 * 50 * 4);
    /// ```
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            data: vec![0u8; width as usize * height as usize * 4],
            width,
            height,
        }
    }

    /// Buffer opaque rempli d'une couleur unie.
    ///
    /// # Example
    /// ```
    /// use gt_core::frame::FrameBuffer;
    /// let fb = FrameBuffer::filled(2, 2, (10, 20, 30));
    /// assert_eq!(fb.pixel(1, 1), (10, 20, 30, 255));
    /// ```
    #[must_use]
    pub fn filled(width: u32, height: u32, rgb: (u8, u8, u8)) -> Self {
        let (r, g, b) = rgb;
        let data = [r, g, b, 255].repeat(width as usize * height as usize);
        Self {
            data,
            width,
            height,
        }
    }

    /// Accès au pixel (x, y) → (r, g, b, a).
    #[inline(always)]
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> (u8, u8, u8, u8) {
        debug_assert!(x < self.width && y < self.height, "pixel out of bounds");
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        if idx + 3 >= self.data.len() {
            return (0, 0, 0, 0);
        }
        (
            self.data[idx],
            self.data[idx + 1],
            self.data[idx + 2],
            self.data[idx + 3],
        )
    }

    /// Écrit le pixel (x, y).
    #[inline(always)]
    pub fn set_pixel(&mut self, x: u32, y: u32, rgba: (u8, u8, u8, u8)) {
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        self.data[idx] = rgba.0;
        self.data[idx + 1] = rgba.1;
        self.data[idx + 2] = rgba.2;
        self.data[idx + 3] = rgba.3;
    }

    /// Plan de luminance complet, row-major : luma ITU-R 601-2
    /// (`L = R*299/1000 + G*587/1000 + B*114/1000`) en virgule fixe 16 bits
    /// arrondie. L'alpha est ignoré.
    ///
    /// # Example
    /// ```
    /// use gt_core::frame::FrameBuffer;
    /// let fb = FrameBuffer::filled(2, 1, (128, 128, 128));
    /// assert_eq!(fb.gray_plane(), vec![128, 128]);
    /// ```
    #[must_use]
    pub fn gray_plane(&self) -> Vec<u8> {
        self.data
            .chunks_exact(4)
            .map(|px| luma_601(px[0], px[1], px[2]))
            .collect()
    }
}

#[inline(always)]
fn luma_601(r: u8, g: u8, b: u8) -> u8 {
    ((u32::from(r) * 19595 + u32::from(g) * 38470 + u32::from(b) * 7471 + 0x8000) >> 16) as u8
}

/// Single cell in the ASCII grid.
///
/// # Example
/// ```
/// use gt_core::frame::AsciiCell;
/// let cell = AsciiCell::default();
/// assert_eq!(cell.ch, ' ');
/// assert!(cell.color.is_none());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AsciiCell {
    /// Caractère à afficher.
    pub ch: char,
    /// Couleur foreground (RGB). `None` en rendu monochrome.
    pub color: Option<(u8, u8, u8)>,
}

impl Default for AsciiCell {
    fn default() -> Self {
        Self {
            ch: ' ',
            color: None,
        }
    }
}

/// Grille de sortie ASCII, row-major. Produite entière à chaque rendu.
///
/// # Example
/// ```
/// use gt_core::frame::{AsciiGrid, AsciiCell};
/// let cells = vec![AsciiCell { ch: '@', color: Some((255, 0, 0)) }; 6];
/// let grid = AsciiGrid::from_stream(cells, 3);
/// assert_eq!(grid.get(2, 1).ch, '@');
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AsciiGrid {
    /// Flat array of cells, row-major.
    pub cells: Vec<AsciiCell>,
    /// Width in characters.
    pub width: u32,
    /// Height in characters.
    pub height: u32,
}

impl AsciiGrid {
    /// Build a grid from a flat cell stream, cutting it into rows of exactly
    /// `width` cells. A trailing partial row is discarded.
    ///
    /// # Example
    /// ```
    /// use gt_core::frame::{AsciiGrid, AsciiCell};
    /// let cells = vec![AsciiCell { ch: 'x', color: None }; 7];
    /// let grid = AsciiGrid::from_stream(cells, 3);
    /// assert_eq!((grid.width, grid.height), (3, 2));
    /// ```
    #[must_use]
    pub fn from_stream(mut cells: Vec<AsciiCell>, width: u32) -> Self {
        let w = width as usize;
        if w == 0 {
            return Self {
                cells: Vec::new(),
                width: 0,
                height: 0,
            };
        }
        let rows = cells.len() / w;
        cells.truncate(rows * w);
        Self {
            cells,
            width,
            height: rows as u32,
        }
    }

    /// Get a cell reference at position (x, y).
    #[inline(always)]
    #[must_use]
    pub fn get(&self, x: u32, y: u32) -> &AsciiCell {
        &self.cells[y as usize * self.width as usize + x as usize]
    }

    /// Iterate over rows, top to bottom.
    ///
    /// # Example
    /// ```
    /// use gt_core::frame::{AsciiGrid, AsciiCell};
    /// let grid = AsciiGrid::from_stream(vec![AsciiCell::default(); 12], 4);
    /// assert_eq!(grid.rows().count(), 3);
    /// assert!(grid.rows().all(|r| r.len() == 4));
    /// ```
    pub fn rows(&self) -> impl Iterator<Item = &[AsciiCell]> {
        self.cells.chunks_exact(self.width.max(1) as usize)
    }

    /// Whether any cell carries a color.
    #[must_use]
    pub fn is_colored(&self) -> bool {
        self.cells.iter().any(|c| c.color.is_some())
    }
}
