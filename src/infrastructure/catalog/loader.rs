//! Startup catalog construction

use std::fs;
use std::path::Path;

use tracing::{info, warn};

use crate::config::CatalogConfig;
use crate::domain::catalog::{FontCatalog, FontCatalogBuilder, FontId};
use crate::domain::DomainError;

const STYLESHEET_EXTENSION: &str = "css";

/// Build the frozen catalog from the bundled fonts plus the configured directory
///
/// Each `<font-id>.css` file in the directory becomes a font, replacing a bundled
/// font of the same id. Files whose stem is not a valid font id are skipped.
pub fn load_catalog(config: &CatalogConfig) -> Result<FontCatalog, DomainError> {
    let mut builder = FontCatalog::builder().with_builtin();

    if let Some(directory) = &config.directory {
        builder = load_directory(builder, directory)?;
    }

    let catalog = builder.build(&config.default_font)?;

    info!(
        fonts = ?catalog.font_ids().iter().map(|id| id.as_str()).collect::<Vec<_>>(),
        default_font = %catalog.default_font(),
        "Font catalog loaded"
    );

    Ok(catalog)
}

fn load_directory(
    mut builder: FontCatalogBuilder,
    directory: &Path,
) -> Result<FontCatalogBuilder, DomainError> {
    let entries = fs::read_dir(directory).map_err(|e| {
        DomainError::configuration(format!(
            "Cannot read font directory '{}': {}",
            directory.display(),
            e
        ))
    })?;

    for entry in entries {
        let path = entry
            .map_err(|e| DomainError::configuration(format!("Cannot list font directory: {}", e)))?
            .path();

        if !path.is_file()
            || path.extension().and_then(|ext| ext.to_str()) != Some(STYLESHEET_EXTENSION)
        {
            continue;
        }

        let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) else {
            continue;
        };

        let id = match FontId::new(stem) {
            Ok(id) => id,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Skipping stylesheet with invalid font id");
                continue;
            }
        };

        let content = fs::read(&path).map_err(|e| {
            DomainError::configuration(format!("Cannot read '{}': {}", path.display(), e))
        })?;

        builder = builder.insert(id, content);
    }

    Ok(builder)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_builtin_only() {
        let catalog = load_catalog(&CatalogConfig::default()).unwrap();

        assert!(catalog.contains("july"));
        assert_eq!(catalog.default_font().as_str(), "july");
    }

    #[test]
    fn test_load_directory_merges_and_skips() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("june.css"), "@font-face { font-family: 'June'; }").unwrap();
        fs::write(dir.path().join("july.css"), "/* override */").unwrap();
        fs::write(dir.path().join("notes.txt"), "not a stylesheet").unwrap();
        fs::write(dir.path().join("bad name.css"), "/* skipped */").unwrap();

        let config = CatalogConfig {
            default_font: "june".to_string(),
            directory: Some(dir.path().to_path_buf()),
            ..CatalogConfig::default()
        };
        let catalog = load_catalog(&config).unwrap();

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.default_font().as_str(), "june");
        assert_eq!(catalog.lookup("july").unwrap().content().as_ref(), b"/* override */");
        assert!(catalog.lookup("notes").is_none());
    }

    #[test]
    fn test_missing_directory_is_configuration_error() {
        let config = CatalogConfig {
            directory: Some("/definitely/not/here".into()),
            ..CatalogConfig::default()
        };

        assert!(matches!(
            load_catalog(&config),
            Err(DomainError::Configuration { .. })
        ));
    }

    #[test]
    fn test_unknown_default_font_is_rejected() {
        let config = CatalogConfig {
            default_font: "arial".to_string(),
            ..CatalogConfig::default()
        };

        assert!(load_catalog(&config).is_err());
    }
}
