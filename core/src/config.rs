//! Profile configuration loading
//!
//! Archetype profiles are loaded from TOML files in two locations:
//! - **Builtin**: Shipped with the application (read-only)
//! - **Custom**: User-created overrides (editable)
//!
//! Custom profiles with the same ID replace builtins. Malformed files are
//! logged and skipped; only I/O on an explicitly requested file surfaces an
//! error. The engine itself never writes configuration.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use kolto_types::{ArchetypeProfile, ProfileConfig};
use thiserror::Error;

/// Loaded profiles keyed by ID.
#[derive(Debug, Clone)]
pub struct ProfileSet {
    profiles: HashMap<String, ArchetypeProfile>,
}

impl Default for ProfileSet {
    fn default() -> Self {
        Self::with_builtin()
    }
}

impl ProfileSet {
    /// An empty set (no builtin fallback).
    pub fn new() -> Self {
        Self {
            profiles: HashMap::new(),
        }
    }

    /// A set pre-populated with the builtin archetypes, so an engine can
    /// start with zero config files on disk.
    pub fn with_builtin() -> Self {
        let mut set = Self::new();
        let builtin = ArchetypeProfile::field_medic();
        set.profiles.insert(builtin.id.clone(), builtin);
        set
    }

    /// Add profiles from a parsed config, returns IDs that were replaced.
    pub fn add_config(&mut self, config: ProfileConfig) -> Vec<String> {
        let mut duplicates = Vec::new();

        for profile in config.profiles {
            if self.profiles.contains_key(&profile.id) {
                duplicates.push(profile.id.clone());
            }
            self.profiles.insert(profile.id.clone(), profile);
        }

        duplicates
    }

    /// Get a profile by ID.
    pub fn get(&self, id: &str) -> Option<&ArchetypeProfile> {
        self.profiles.get(id)
    }

    /// All loaded profiles.
    pub fn profiles(&self) -> impl Iterator<Item = &ArchetypeProfile> {
        self.profiles.values()
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

/// Load profiles from builtin and custom config directories.
///
/// Builtin definitions are loaded first, then custom definitions; custom
/// profiles with the same ID override builtins. Directories that do not
/// exist are skipped. The returned set always contains the compiled-in
/// defaults as a floor.
pub fn load_profiles(
    builtin_dir: Option<&Path>,
    custom_dir: Option<&Path>,
) -> Result<ProfileSet, ConfigError> {
    let mut set = ProfileSet::with_builtin();

    if let Some(dir) = builtin_dir
        && dir.exists()
    {
        load_directory(&mut set, dir, "builtin")?;
    }

    if let Some(dir) = custom_dir
        && dir.exists()
    {
        load_directory(&mut set, dir, "custom")?;
    }

    Ok(set)
}

/// Load all TOML files from a directory.
fn load_directory(set: &mut ProfileSet, dir: &Path, source: &str) -> Result<(), ConfigError> {
    let entries = fs::read_dir(dir).map_err(|e| ConfigError::Io {
        path: dir.to_path_buf(),
        source: e,
    })?;

    for entry in entries.flatten() {
        let path = entry.path();

        if path.extension().is_some_and(|ext| ext == "toml") {
            match load_file(&path) {
                Ok(config) => {
                    let duplicates = set.add_config(config);
                    if !duplicates.is_empty() {
                        tracing::warn!(
                            "[PROFILE] {} profile IDs overridden by {:?}: {:?}",
                            source,
                            path.file_name(),
                            duplicates
                        );
                    }
                }
                Err(e) => {
                    // Keep loading the remaining files
                    tracing::warn!("[PROFILE] failed to load {:?}: {}", path.file_name(), e);
                }
            }
        }
    }

    Ok(())
}

/// Load a single TOML profile file.
pub fn load_file(path: &Path) -> Result<ProfileConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|e| ConfigError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    toml::from_str(&contents).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Errors that can occur during profile loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Parse error in {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}
