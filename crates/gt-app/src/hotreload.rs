use std::ffi::OsStr;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use arc_swap::ArcSwap;
use gt_core::config::Settings;
use notify::{Event, EventKind, RecursiveMode, Watcher};

use crate::cli::Overrides;

/// Recharge le fichier de config et ré-applique les overrides CLI.
///
/// # Errors
/// Returns an error if the file is unreadable or yields an invalid config.
pub fn reload(config_path: &Path, overrides: &Overrides) -> Result<Settings> {
    let mut settings = gt_core::config::load_config(config_path)?;
    overrides.apply(&mut settings)?;
    Ok(settings)
}

/// Whether `event` touches the config file named `file_name`: a write in
/// place, or a new file created or renamed over it.
fn is_config_event(event: &Event, file_name: &OsStr) -> bool {
    matches!(event.kind, EventKind::Modify(_) | EventKind::Create(_))
        && event.paths.iter().any(|p| p.file_name() == Some(file_name))
}

/// Lance un watcher qui recharge la config à chaque modification, met à jour
/// l'ArcSwap et réveille la boucle d'aperçu via `wake`.
///
/// C'est le dossier parent qui est surveillé : les éditeurs qui enregistrent
/// par renommage remplacent le fichier et casseraient un watch direct.
///
/// Retourne le Watcher (doit rester vivant tant que l'aperçu tourne).
///
/// # Errors
/// Returns an error if the watcher cannot be created or the path cannot be watched.
pub fn spawn_config_watcher(
    config_path: &Path,
    settings: &Arc<ArcSwap<Settings>>,
    overrides: Overrides,
    wake: flume::Sender<()>,
) -> Result<impl Watcher + use<>> {
    let settings = Arc::clone(settings);
    let path = config_path.to_path_buf();
    let file_name = config_path
        .file_name()
        .with_context(|| format!("Chemin de config sans nom de fichier : {}", config_path.display()))?
        .to_os_string();
    let dir = match config_path.parent() {
        Some(d) if !d.as_os_str().is_empty() => d.to_path_buf(),
        _ => Path::new(".").to_path_buf(),
    };

    let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| {
        let Ok(event) = res else {
            return;
        };
        if !is_config_event(&event, &file_name) {
            return;
        }
        match reload(&path, &overrides) {
            Ok(new_settings) => {
                settings.store(Arc::new(new_settings));
                log::info!("Config rechargée depuis {}", path.display());
                let _ = wake.send(());
            }
            Err(e) => {
                // On garde l'ancienne config.
                log::warn!("Erreur de rechargement config : {e:#}");
            }
        }
    })?;

    watcher.watch(&dir, RecursiveMode::NonRecursive)?;
    Ok(watcher)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reload_applies_file_then_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cfg.toml");
        std::fs::write(&path, "[render]\nwidth = 50\ngamma = 2.0\n").unwrap();

        let overrides = Overrides {
            width: Some(12),
            invert: Some(true),
            ..Overrides::default()
        };
        let settings = reload(&path, &overrides).unwrap();
        assert_eq!(settings.render.target_width, 12);
        assert!((settings.render.gamma - 2.0).abs() < f64::EPSILON);
        assert!(settings.render.invert);
    }

    #[test]
    fn events_are_filtered_on_the_config_file_name() {
        use notify::event::{CreateKind, ModifyKind, RemoveKind, RenameMode};

        let name = OsStr::new("default.toml");
        let on = |kind, file: &str| Event::new(kind).add_path(Path::new("config").join(file));

        assert!(is_config_event(&on(EventKind::Modify(ModifyKind::Any), "default.toml"), name));
        // enregistrement par renommage (vim, IDE)
        assert!(is_config_event(
            &on(EventKind::Modify(ModifyKind::Name(RenameMode::To)), "default.toml"),
            name
        ));
        assert!(is_config_event(&on(EventKind::Create(CreateKind::File), "default.toml"), name));

        assert!(!is_config_event(&on(EventKind::Modify(ModifyKind::Any), "default.toml~"), name));
        assert!(!is_config_event(&on(EventKind::Modify(ModifyKind::Any), ".default.toml.swp"), name));
        assert!(!is_config_event(&on(EventKind::Remove(RemoveKind::File), "default.toml"), name));
    }

    #[test]
    fn watcher_survives_rename_over_the_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cfg.toml");
        std::fs::write(&path, "[render]\nwidth = 50\n").unwrap();

        let settings = Arc::new(ArcSwap::from_pointee(reload(&path, &Overrides::default()).unwrap()));
        let (tx, rx) = flume::unbounded();
        let _watcher = spawn_config_watcher(&path, &settings, Overrides::default(), tx).unwrap();

        for width in [60, 70] {
            let tmp = dir.path().join("cfg.toml.tmp");
            std::fs::write(&tmp, format!("[render]\nwidth = {width}\n")).unwrap();
            std::fs::rename(&tmp, &path).unwrap();

            let deadline = std::time::Instant::now() + std::time::Duration::from_secs(5);
            while settings.load().render.target_width != width {
                let left = deadline.saturating_duration_since(std::time::Instant::now());
                assert!(rx.recv_timeout(left).is_ok(), "pas de rechargement pour width = {width}");
            }
        }
    }

    #[test]
    fn broken_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cfg.toml");
        std::fs::write(&path, "[render\nwidth = ").unwrap();
        assert!(reload(&path, &Overrides::default()).is_err());
        std::fs::write(&path, "[render]\ngamma = -1.0\n").unwrap();
        assert!(reload(&path, &Overrides::default()).is_err());
    }
}
