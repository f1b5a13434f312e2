use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use gt_core::config::Settings;

/// glyphtone — image → ASCII art, monochrome ou couleur.
#[allow(clippy::struct_excessive_bools)]
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Images sources (PNG, JPEG, BMP, GIF). Plusieurs images = mode batch.
    #[arg(required_unless_present_any = ["list_palettes", "define_palette", "remove_palette"])]
    pub images: Vec<PathBuf>,

    /// Fichier de configuration TOML. Ignoré s'il n'existe pas.
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: PathBuf,

    /// Largeur de sortie en caractères.
    #[arg(short, long)]
    pub width: Option<u32>,

    /// Contraste (> 0, 1.0 = neutre).
    #[arg(long)]
    pub contrast: Option<f64>,

    /// Luminosité (> 0, 1.0 = neutre).
    #[arg(long)]
    pub brightness: Option<f64>,

    /// Gamma (> 0, 1.0 = neutre).
    #[arg(long)]
    pub gamma: Option<f64>,

    /// Facteur de hauteur (compense des glyphes plus hauts que larges).
    #[arg(long)]
    pub aspect: Option<f64>,

    /// Inverser la luminance.
    #[arg(long, overrides_with = "no_invert")]
    pub invert: bool,

    /// Ne pas inverser, même si la config le demande.
    #[arg(long, overrides_with = "invert")]
    pub no_invert: bool,

    /// Tramage Floyd–Steinberg.
    #[arg(long, overrides_with = "no_dither")]
    pub dither: bool,

    /// Désactiver le tramage de la config.
    #[arg(long, overrides_with = "dither")]
    pub no_dither: bool,

    /// Rendu couleur.
    #[arg(long, overrides_with = "no_color")]
    pub color: bool,

    /// Rendu monochrome, même si la config active la couleur.
    #[arg(long, overrides_with = "color")]
    pub no_color: bool,

    /// Appliquer aussi le gamma en rendu couleur.
    #[arg(long, overrides_with = "no_color_gamma")]
    pub color_gamma: bool,

    /// Pas de gamma en rendu couleur.
    #[arg(long, overrides_with = "color_gamma")]
    pub no_color_gamma: bool,

    /// Palette de caractères (voir --list-palettes).
    #[arg(short, long)]
    pub palette: Option<String>,

    /// Format de sortie.
    #[arg(long, value_enum, default_value_t = Format::Text)]
    pub format: Format,

    /// Fichier de sortie (une seule image). Défaut : stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Dossier de sortie du mode batch.
    #[arg(long)]
    pub out_dir: Option<PathBuf>,

    /// Lister les palettes disponibles et quitter.
    #[arg(long, default_value_t = false)]
    pub list_palettes: bool,

    /// Définir (ou remplacer) une palette utilisateur, enregistrée dans le
    /// fichier de config. Répétable.
    #[arg(long, value_name = "NOM=CARACTÈRES")]
    pub define_palette: Vec<String>,

    /// Supprimer une palette utilisateur du fichier de config. Répétable.
    #[arg(long, value_name = "NOM")]
    pub remove_palette: Vec<String>,

    /// Aperçu terminal, re-rendu à chaque modification du fichier de config.
    #[arg(long, default_value_t = false)]
    pub watch: bool,

    /// Niveau de log : error, warn, info, debug, trace.
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

/// Output encodings.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    /// Texte brut UTF-8.
    Text,
    /// Document HTML avec une couleur par cellule.
    Html,
    /// Séquences ANSI truecolor.
    Ansi,
}

impl Format {
    /// File extension used in batch mode.
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Format::Text => "txt",
            Format::Html => "html",
            Format::Ansi => "ans",
        }
    }
}

/// Command-line values that win over the config file, re-applied after every
/// hot reload. `None` keeps the file's value.
#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub width: Option<u32>,
    pub contrast: Option<f64>,
    pub brightness: Option<f64>,
    pub gamma: Option<f64>,
    pub aspect: Option<f64>,
    pub invert: Option<bool>,
    pub dither: Option<bool>,
    pub color: Option<bool>,
    pub color_gamma: Option<bool>,
    pub palette: Option<String>,
}

impl Overrides {
    /// Apply onto loaded settings, then re-validate.
    ///
    /// # Errors
    /// Returns an error for an unknown palette or an invalid resulting config.
    pub fn apply(&self, settings: &mut Settings) -> Result<()> {
        let r = &mut settings.render;
        if let Some(v) = self.width {
            r.target_width = v;
        }
        if let Some(v) = self.contrast {
            r.contrast = v;
        }
        if let Some(v) = self.brightness {
            r.brightness = v;
        }
        if let Some(v) = self.gamma {
            r.gamma = v;
        }
        if let Some(v) = self.aspect {
            r.aspect_factor = v;
        }
        if let Some(v) = self.invert {
            r.invert = v;
        }
        if let Some(v) = self.dither {
            r.dither = v;
        }
        if let Some(v) = self.color {
            r.color_enabled = v;
        }
        if let Some(v) = self.color_gamma {
            r.color_gamma = v;
        }
        if let Some(ref name) = self.palette {
            settings.select_palette(name)?;
        }
        settings.render.validate()?;
        Ok(())
    }
}

impl Cli {
    /// Extract the overriding values.
    #[must_use]
    pub fn overrides(&self) -> Overrides {
        Overrides {
            width: self.width,
            contrast: self.contrast,
            brightness: self.brightness,
            gamma: self.gamma,
            aspect: self.aspect,
            invert: switch(self.invert, self.no_invert),
            dither: switch(self.dither, self.no_dither),
            color: switch(self.color, self.no_color),
            color_gamma: switch(self.color_gamma, self.no_color_gamma),
            palette: self.palette.clone(),
        }
    }

    /// Whether the registry must be edited and written back.
    #[must_use]
    pub fn edits_palettes(&self) -> bool {
        !self.define_palette.is_empty() || !self.remove_palette.is_empty()
    }

    /// Apply `--define-palette` / `--remove-palette` to `settings.palettes`.
    ///
    /// # Errors
    /// Returns an error for a malformed definition or a registry refusal
    /// (built-in name, unknown name, empty characters).
    pub fn edit_palettes(&self, settings: &mut Settings) -> Result<()> {
        for def in &self.define_palette {
            let (name, chars) = def
                .split_once('=')
                .with_context(|| format!("Définition de palette invalide : {def} (attendu NOM=CARACTÈRES)"))?;
            settings.palettes.define(name, chars)?;
        }
        for name in &self.remove_palette {
            settings.palettes.remove(name)?;
        }
        Ok(())
    }

    /// Validate the combination of sources and outputs.
    ///
    /// # Errors
    /// Returns an error if the flags contradict each other.
    pub fn validate_inputs(&self) -> Result<()> {
        if self.images.is_empty() && (self.list_palettes || self.edits_palettes()) {
            return Ok(());
        }
        if self.watch {
            if self.images.len() != 1 {
                anyhow::bail!("--watch demande exactement une image.");
            }
            if self.output.is_some() || self.out_dir.is_some() {
                anyhow::bail!("--watch affiche dans le terminal ; --output/--out-dir ne s'appliquent pas.");
            }
            return Ok(());
        }
        if self.images.len() > 1 {
            if self.output.is_some() {
                anyhow::bail!("--output n'accepte qu'une image. Utilisez --out-dir pour un batch.");
            }
            if self.out_dir.is_none() {
                anyhow::bail!("Plusieurs images : spécifiez --out-dir.");
            }
        }
        Ok(())
    }
}

/// `--x` / `--no-x` → valeur forcée, ou `None` si aucun des deux.
fn switch(on: bool, off: bool) -> Option<bool> {
    if on {
        Some(true)
    } else if off {
        Some(false)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("glyphtone").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn flags_map_onto_settings() {
        let cli = parse(&[
            "a.png", "-w", "64", "--gamma", "0.8", "--dither", "--color", "-p", "Blocks",
        ]);
        let mut settings = Settings::default();
        cli.overrides().apply(&mut settings).unwrap();
        assert_eq!(settings.render.target_width, 64);
        assert!((settings.render.gamma - 0.8).abs() < f64::EPSILON);
        assert!(settings.render.dither && settings.render.color_enabled);
        assert!(!settings.render.invert);
        assert_eq!(settings.palette_name, "Blocks");
        assert_eq!(settings.render.palette.len(), 5);
    }

    #[test]
    fn negative_flags_turn_config_switches_off() {
        let mut settings = Settings::default();
        settings.render.invert = true;
        settings.render.dither = true;
        settings.render.color_enabled = true;

        let cli = parse(&["a.png", "--no-invert", "--no-dither"]);
        cli.overrides().apply(&mut settings).unwrap();
        assert!(!settings.render.invert);
        assert!(!settings.render.dither);
        // absent des deux côtés : la valeur du fichier reste
        assert!(settings.render.color_enabled);

        let cli = parse(&["a.png", "--no-color"]);
        cli.overrides().apply(&mut settings).unwrap();
        assert!(!settings.render.color_enabled);
    }

    #[test]
    fn last_of_flag_pair_wins() {
        let cli = parse(&["a.png", "--invert", "--no-invert"]);
        assert_eq!(cli.overrides().invert, Some(false));
        let cli = parse(&["a.png", "--no-dither", "--dither"]);
        assert_eq!(cli.overrides().dither, Some(true));
        assert_eq!(cli.overrides().color, None);
    }

    #[test]
    fn invalid_override_is_rejected() {
        let cli = parse(&["a.png", "--contrast", "0"]);
        assert!(cli.overrides().apply(&mut Settings::default()).is_err());
        let cli = parse(&["a.png", "-p", "Nope"]);
        assert!(cli.overrides().apply(&mut Settings::default()).is_err());
    }

    #[test]
    fn input_combinations() {
        assert!(parse(&["a.png"]).validate_inputs().is_ok());
        assert!(parse(&["a.png", "b.png"]).validate_inputs().is_err());
        assert!(parse(&["a.png", "b.png", "--out-dir", "out"]).validate_inputs().is_ok());
        assert!(
            parse(&["a.png", "b.png", "--out-dir", "out", "-o", "x.txt"])
                .validate_inputs()
                .is_err()
        );
        assert!(parse(&["a.png", "--watch"]).validate_inputs().is_ok());
        assert!(parse(&["a.png", "b.png", "--watch"]).validate_inputs().is_err());
        assert!(parse(&["--list-palettes"]).validate_inputs().is_ok());
    }

    #[test]
    fn images_required_unless_listing() {
        assert!(Cli::try_parse_from(["glyphtone"]).is_err());
        assert!(Cli::try_parse_from(["glyphtone", "--list-palettes"]).is_ok());
        assert!(Cli::try_parse_from(["glyphtone", "--remove-palette", "X"]).is_ok());
    }

    #[test]
    fn palette_edits() {
        let cli = parse(&["--define-palette", "Dots= .o0", "--define-palette", "Bin=01"]);
        let mut settings = Settings::default();
        cli.edit_palettes(&mut settings).unwrap();
        assert_eq!(settings.palettes.get("Dots").unwrap().to_string(), " .o0");
        assert_eq!(settings.palettes.get("Bin").unwrap().len(), 2);

        let cli = parse(&["--remove-palette", "Bin"]);
        cli.edit_palettes(&mut settings).unwrap();
        assert!(settings.palettes.get("Bin").is_err());

        for args in [
            &["--define-palette", "NoEquals"][..],
            &["--define-palette", "Simple=ab"][..],
            &["--remove-palette", "Lines"][..],
            &["--remove-palette", "Ghost"][..],
        ] {
            assert!(parse(args).edit_palettes(&mut settings).is_err(), "{args:?}");
        }
    }

    #[test]
    fn format_parsing_and_extensions() {
        assert_eq!(parse(&["a.png", "--format", "html"]).format, Format::Html);
        assert_eq!(Format::Ansi.extension(), "ans");
        assert_eq!(parse(&["a.png"]).format.extension(), "txt");
    }
}
