use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::ser::PrettyFormatter;
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

use crate::config::app::ConfigPaths;
use crate::config::buttons::{ButtonDescriptor, ButtonsDocument, ButtonsDocumentRef};
use crate::config::settings::DockSettings;
use crate::error::DockError;

const BYTE_ORDER_MARK: char = '\u{feff}';

/// Where a loaded document came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOrigin {
    File,
    /// The file was missing or unusable and defaults were substituted.
    Defaulted,
}

/// Result of a load. Loading never fails; problems become warnings.
#[derive(Debug)]
pub struct Loaded<T> {
    pub value: T,
    pub origin: LoadOrigin,
    pub warnings: Vec<DockError>,
}

/// Reads and writes the settings and button documents, always whole.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    paths: ConfigPaths,
}

impl ConfigStore {
    pub fn new(paths: ConfigPaths) -> Self {
        Self { paths }
    }

    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(ConfigPaths::in_dir(dir))
    }

    pub fn paths(&self) -> &ConfigPaths {
        &self.paths
    }

    /// Loads the settings with out-of-range values pulled back into bounds.
    /// A file that needed correcting is rewritten with the corrected values.
    pub fn load_settings(&self) -> Loaded<DockSettings> {
        let mut loaded: Loaded<DockSettings> = load_document(&self.paths.settings);
        let sanitized = loaded.value.clone().sanitized();
        if sanitized != loaded.value {
            info!(path = %self.paths.settings.display(), "out-of-range settings corrected");
            if let Err(err) = self.save_settings(&sanitized) {
                warn!(error = %err, "corrected settings not saved");
                loaded.warnings.push(err);
            }
            loaded.value = sanitized;
        }
        loaded
    }

    pub fn save_settings(&self, settings: &DockSettings) -> Result<(), DockError> {
        write_document(&self.paths.settings, settings)
    }

    pub fn load_buttons(&self) -> Loaded<Vec<ButtonDescriptor>> {
        let loaded: Loaded<ButtonsDocument> = load_document(&self.paths.buttons);
        Loaded {
            value: loaded.value.buttons,
            origin: loaded.origin,
            warnings: loaded.warnings,
        }
    }

    pub fn save_buttons(&self, buttons: &[ButtonDescriptor]) -> Result<(), DockError> {
        write_document(&self.paths.buttons, &ButtonsDocumentRef { buttons })
    }
}

fn load_document<T>(path: &Path) -> Loaded<T>
where
    T: DeserializeOwned + Serialize + Default,
{
    let mut warnings = Vec::new();

    match fs::read_to_string(path) {
        Ok(contents) => match serde_json::from_str(strip_bom(&contents)) {
            Ok(value) => {
                debug!(path = %path.display(), "loaded document");
                return Loaded {
                    value,
                    origin: LoadOrigin::File,
                    warnings,
                };
            }
            Err(source) => {
                warn!(path = %path.display(), error = %source, "malformed document, using defaults");
                warnings.push(DockError::ConfigParse {
                    path: path.to_path_buf(),
                    source,
                });
            }
        },
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            info!(path = %path.display(), "document not found, creating defaults");
        }
        Err(source) => {
            warn!(path = %path.display(), error = %source, "unreadable document, using defaults");
            warnings.push(DockError::ConfigRead {
                path: path.to_path_buf(),
                source,
            });
        }
    }

    let value = T::default();
    if let Err(err) = write_document(path, &value) {
        warnings.push(err);
    }
    Loaded {
        value,
        origin: LoadOrigin::Defaulted,
        warnings,
    }
}

/// Replaces the file atomically: a sibling temp file is written and renamed
/// over the target, so readers never see a half-written document.
fn write_document<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), DockError> {
    let write_err = |source: io::Error| DockError::ConfigWrite {
        path: path.to_path_buf(),
        source,
    };

    let mut bytes = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut bytes, PrettyFormatter::with_indent(b"    "));
    value
        .serialize(&mut serializer)
        .map_err(|e| write_err(io::Error::from(e)))?;
    bytes.push(b'\n');

    let parent = parent_dir(path);
    fs::create_dir_all(&parent).map_err(write_err)?;

    let mut tmp = NamedTempFile::new_in(&parent).map_err(write_err)?;
    tmp.write_all(&bytes).map_err(write_err)?;
    tmp.as_file().sync_all().map_err(write_err)?;
    tmp.persist(path).map_err(|e| write_err(e.error))?;

    debug!(path = %path.display(), bytes = bytes.len(), "wrote document");
    Ok(())
}

fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

fn strip_bom(contents: &str) -> &str {
    contents.strip_prefix(BYTE_ORDER_MARK).unwrap_or(contents)
}
