use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::error::CoreError;
use crate::palette::{DEFAULT_PALETTE, Palette, PaletteRegistry};

/// Paramètres complets d'un rendu. Le pipeline est une fonction pure de
/// (image, `RenderConfig`).
///
/// # Example
/// ```
/// use gt_core::config::RenderConfig;
/// let config = RenderConfig::default();
/// assert_eq!(config.target_width, 180);
/// assert!(config.validate().is_ok());
/// ```
#[allow(clippy::struct_excessive_bools)]
#[derive(Clone, Debug, PartialEq)]
pub struct RenderConfig {
    /// Largeur de sortie en caractères.
    pub target_width: u32,
    /// Facteur de contraste autour de la moyenne. 1.0 = neutre.
    pub contrast: f64,
    /// Facteur multiplicatif de luminosité. 1.0 = neutre.
    pub brightness: f64,
    /// Exposant gamma. 1.0 = neutre.
    pub gamma: f64,
    /// Correction de hauteur (les glyphes sont plus hauts que larges).
    pub aspect_factor: f64,
    /// Inverser la luminance avant le choix du glyphe.
    pub invert: bool,
    /// Tramage Floyd–Steinberg.
    pub dither: bool,
    /// Rendu couleur (une couleur RGB par cellule).
    pub color_enabled: bool,
    /// Applique aussi le gamma en rendu couleur. Désactivé par défaut :
    /// le rendu couleur historique ignore le gamma.
    pub color_gamma: bool,
    /// Glyphes, du premier palier de luminance au dernier.
    pub palette: Palette,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            target_width: 180,
            contrast: 1.7,
            brightness: 1.2,
            gamma: 1.0,
            aspect_factor: 0.5,
            invert: false,
            dither: false,
            color_enabled: false,
            color_gamma: false,
            palette: Palette::default(),
        }
    }
}

impl RenderConfig {
    /// Reject out-of-range values. Nothing is clamped.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidConfig`] naming the first offending field.
    ///
    /// # Example
    /// ```
    /// use gt_core::config::RenderConfig;
    /// let config = RenderConfig { gamma: 0.0, ..RenderConfig::default() };
    /// assert!(config.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.target_width < 1 {
            return Err(CoreError::InvalidConfig(
                "target_width doit être ≥ 1".into(),
            ));
        }
        for (name, value) in [
            ("contrast", self.contrast),
            ("brightness", self.brightness),
            ("gamma", self.gamma),
            ("aspect_factor", self.aspect_factor),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(CoreError::InvalidConfig(format!(
                    "{name} doit être > 0 (reçu {value})"
                )));
            }
        }
        if self.palette.is_empty() {
            return Err(CoreError::InvalidConfig("palette vide".into()));
        }
        Ok(())
    }
}

/// Configuration chargée depuis le disque : rendu + palettes connues.
#[derive(Clone, Debug)]
pub struct Settings {
    /// Paramètres de rendu, palette résolue.
    pub render: RenderConfig,
    /// Nom de la palette active.
    pub palette_name: String,
    /// Built-ins plus palettes utilisateur.
    pub palettes: PaletteRegistry,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            render: RenderConfig::default(),
            palette_name: DEFAULT_PALETTE.to_string(),
            palettes: PaletteRegistry::new(),
        }
    }
}

impl Settings {
    /// Switch the active palette.
    ///
    /// # Errors
    /// Returns [`CoreError::UnknownPalette`] if `name` is not registered.
    pub fn select_palette(&mut self, name: &str) -> Result<(), CoreError> {
        self.render.palette = self.palettes.get(name)?.clone();
        self.palette_name = name.to_string();
        Ok(())
    }
}

/// Structure TOML intermédiaire pour désérialisation avec valeurs optionnelles.
#[derive(Deserialize, Default)]
struct ConfigFile {
    #[serde(default)]
    render: RenderSection,
    /// Palettes utilisateur, dans l'ordre du fichier.
    #[serde(default)]
    palettes: toml::Table,
}

/// Render section of the TOML config, all fields optional for partial override.
#[derive(Deserialize, Default)]
struct RenderSection {
    width: Option<u32>,
    contrast: Option<f64>,
    brightness: Option<f64>,
    gamma: Option<f64>,
    aspect_factor: Option<f64>,
    invert: Option<bool>,
    dither: Option<bool>,
    color_enabled: Option<bool>,
    color_gamma: Option<bool>,
    palette: Option<String>,
}

/// Parse une configuration TOML et fusionne avec les valeurs par défaut.
///
/// # Errors
/// Returns an error on malformed TOML, an invalid palette definition, an
/// unknown palette name, or a value rejected by [`RenderConfig::validate`].
///
/// # Example
/// ```
/// use gt_core::config::parse_config;
/// let s = parse_config("[render]\nwidth = 40\npalette = \"Blocks\"\n").unwrap();
/// assert_eq!(s.render.target_width, 40);
/// assert_eq!(s.render.palette.len(), 5);
/// ```
pub fn parse_config(content: &str) -> Result<Settings> {
    let file: ConfigFile = toml::from_str(content).context("Erreur de parsing TOML")?;

    let mut settings = Settings::default();
    for (name, value) in &file.palettes {
        let chars = value
            .as_str()
            .with_context(|| format!("Palette [palettes].{name} : chaîne attendue"))?;
        settings
            .palettes
            .define(name, chars)
            .with_context(|| format!("Palette [palettes].{name} invalide"))?;
    }

    let r = file.render;
    let config = &mut settings.render;
    if let Some(v) = r.width {
        config.target_width = v;
    }
    if let Some(v) = r.contrast {
        config.contrast = v;
    }
    if let Some(v) = r.brightness {
        config.brightness = v;
    }
    if let Some(v) = r.gamma {
        config.gamma = v;
    }
    if let Some(v) = r.aspect_factor {
        config.aspect_factor = v;
    }
    if let Some(v) = r.invert {
        config.invert = v;
    }
    if let Some(v) = r.dither {
        config.dither = v;
    }
    if let Some(v) = r.color_enabled {
        config.color_enabled = v;
    }
    if let Some(v) = r.color_gamma {
        config.color_gamma = v;
    }
    if let Some(name) = r.palette {
        settings.select_palette(&name)?;
    }

    settings.render.validate()?;
    Ok(settings)
}

/// Charge un fichier TOML et fusionne avec les valeurs par défaut.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
///
/// # Example
/// ```no_run
/// use gt_core::config::load_config;
/// use std::path::Path;
/// let settings = load_config(Path::new("config/default.toml")).unwrap();
/// ```
pub fn load_config(path: &Path) -> Result<Settings> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Impossible de lire {}", path.display()))?;
    parse_config(&content).with_context(|| format!("Configuration invalide dans {}", path.display()))
}

/// Écrit les palettes utilisateur dans la table `[palettes]` du fichier,
/// en conservant le reste du document. Le fichier est créé s'il n'existe pas.
///
/// # Errors
/// Returns an error if the existing file is not valid TOML or cannot be written.
pub fn save_palettes(path: &Path, registry: &PaletteRegistry) -> Result<()> {
    let mut doc = if path.exists() {
        std::fs::read_to_string(path)
            .with_context(|| format!("Impossible de lire {}", path.display()))?
            .parse::<toml::Table>()
            .with_context(|| format!("Erreur de parsing TOML dans {}", path.display()))?
    } else {
        toml::Table::new()
    };

    let palettes: toml::Table = registry
        .user_palettes()
        .map(|(name, p)| (name.to_string(), toml::Value::String(p.to_string())))
        .collect();
    let count = palettes.len();
    doc.insert("palettes".into(), toml::Value::Table(palettes));

    let out = toml::to_string(&doc).context("Sérialisation TOML impossible")?;
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Impossible de créer {}", dir.display()))?;
    }
    std::fs::write(path, out).with_context(|| format!("Impossible d'écrire {}", path.display()))?;
    log::info!("{count} palette(s) utilisateur enregistrée(s) dans {}", path.display());
    Ok(())
}
