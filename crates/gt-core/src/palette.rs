use crate::error::CoreError;

/// 69 caractères — dense→clair, le jeu par défaut.
pub const PALETTE_STANDARD: &str =
    "@QB#NgWM8RDHdOKq9$6khEPXwmeZaoS2yjufF]}{tx1zv7lciL/\\|?*>r^;:_\"~,'.-` ";

/// 32 caractères — chiffres et ponctuation, quatre espaces en queue.
pub const PALETTE_SIMPLE: &str = "Ñ@#W$9876543210?!abc;:+=-,._    ";

/// Blocs Unicode — pseudo-pixels.
pub const PALETTE_BLOCKS: &str = "▓▒░:.";

/// 70 caractères — Paul Bourke, résolution maximale (dense→clair).
pub const PALETTE_DETAILED: &str =
    "$@B%8&WM#*oahkbdpqwmZO0QLCJUYXzcvunxrjft/\\|()1{}[]?-_+~<>i!lI;:,\"^`'. ";

/// Traits horizontaux et verticaux.
pub const PALETTE_LINES: &str = "||--__||--";

/// Built-in palettes, in display order. These names can never be redefined
/// or removed from a [`PaletteRegistry`].
pub const BUILTIN_PALETTES: &[(&str, &str)] = &[
    ("Standard", PALETTE_STANDARD),
    ("Simple", PALETTE_SIMPLE),
    ("Blocks", PALETTE_BLOCKS),
    ("Detailed", PALETTE_DETAILED),
    ("Lines", PALETTE_LINES),
];

/// Name of the palette selected when nothing else is configured.
pub const DEFAULT_PALETTE: &str = "Standard";

/// Ordered, non-empty character sequence.
///
/// Index 0 is the glyph of the lowest brightness bucket.
///
/// # Example
/// ```
/// use gt_core::palette::Palette;
/// let p = Palette::new(" .:#@").unwrap();
/// assert_eq!(p.len(), 5);
/// assert_eq!(p.glyph(4), '@');
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Palette {
    chars: Vec<char>,
}

impl Palette {
    /// Build a palette from its characters.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidConfig`] if `characters` is empty.
    pub fn new(characters: &str) -> Result<Self, CoreError> {
        let chars: Vec<char> = characters.chars().collect();
        if chars.is_empty() {
            return Err(CoreError::InvalidConfig(
                "une palette doit contenir au moins un caractère".into(),
            ));
        }
        Ok(Self { chars })
    }

    /// Number of glyphs. Always ≥ 1.
    #[must_use]
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// Always `false`; present for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Glyph at `index`, clamped to the last glyph.
    #[inline(always)]
    #[must_use]
    pub fn glyph(&self, index: usize) -> char {
        self.chars[index.min(self.chars.len() - 1)]
    }
}

impl std::fmt::Display for Palette {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.chars.iter().try_for_each(|c| write!(f, "{c}"))
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            chars: PALETTE_STANDARD.chars().collect(),
        }
    }
}

/// Name-keyed palette store: immutable built-ins plus user palettes.
///
/// # Example
/// ```
/// use gt_core::palette::PaletteRegistry;
/// let mut reg = PaletteRegistry::new();
/// reg.define("Dots", " .o0").unwrap();
/// assert_eq!(reg.names().last(), Some(&"Dots"));
/// assert!(reg.remove("Standard").is_err());
/// ```
#[derive(Clone, Debug)]
pub struct PaletteRegistry {
    entries: Vec<(String, Palette)>,
}

impl PaletteRegistry {
    /// Registry containing only the built-ins.
    #[must_use]
    pub fn new() -> Self {
        let entries = BUILTIN_PALETTES
            .iter()
            .map(|(name, chars)| {
                (
                    (*name).to_string(),
                    Palette {
                        chars: chars.chars().collect(),
                    },
                )
            })
            .collect();
        Self { entries }
    }

    /// Whether `name` is one of the fixed built-in names.
    #[must_use]
    pub fn is_builtin(name: &str) -> bool {
        BUILTIN_PALETTES.iter().any(|(n, _)| *n == name)
    }

    /// Look a palette up by name.
    ///
    /// # Errors
    /// Returns [`CoreError::UnknownPalette`] if nothing is registered under `name`.
    pub fn get(&self, name: &str) -> Result<&Palette, CoreError> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, p)| p)
            .ok_or_else(|| CoreError::UnknownPalette {
                name: name.to_string(),
            })
    }

    /// Names in display order: built-ins first, then user palettes in
    /// definition order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|(n, _)| n.as_str()).collect()
    }

    /// User-defined palettes only, in definition order.
    pub fn user_palettes(&self) -> impl Iterator<Item = (&str, &Palette)> {
        self.entries
            .iter()
            .filter(|(n, _)| !Self::is_builtin(n))
            .map(|(n, p)| (n.as_str(), p))
    }

    /// Create or replace a user palette.
    ///
    /// # Errors
    /// - [`CoreError::ReservedPalette`] for a built-in name.
    /// - [`CoreError::InvalidConfig`] for an empty name or empty characters.
    pub fn define(&mut self, name: &str, characters: &str) -> Result<(), CoreError> {
        if name.is_empty() {
            return Err(CoreError::InvalidConfig(
                "le nom de palette ne peut pas être vide".into(),
            ));
        }
        if Self::is_builtin(name) {
            return Err(CoreError::ReservedPalette {
                name: name.to_string(),
            });
        }
        let palette = Palette::new(characters)?;
        if let Some(slot) = self.entries.iter_mut().find(|(n, _)| n == name) {
            slot.1 = palette;
        } else {
            self.entries.push((name.to_string(), palette));
        }
        log::debug!("Palette définie : {name} ({} glyphes)", characters.chars().count());
        Ok(())
    }

    /// Remove a user palette.
    ///
    /// # Errors
    /// - [`CoreError::ReservedPalette`] for a built-in name.
    /// - [`CoreError::UnknownPalette`] if `name` is not registered.
    pub fn remove(&mut self, name: &str) -> Result<Palette, CoreError> {
        if Self::is_builtin(name) {
            return Err(CoreError::ReservedPalette {
                name: name.to_string(),
            });
        }
        let idx = self
            .entries
            .iter()
            .position(|(n, _)| n == name)
            .ok_or_else(|| CoreError::UnknownPalette {
                name: name.to_string(),
            })?;
        Ok(self.entries.remove(idx).1)
    }
}

impl Default for PaletteRegistry {
    fn default() -> Self {
        Self::new()
    }
}
