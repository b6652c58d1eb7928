//! File-backed profile storage for the console front end.
use growordie_game::{Profile, ProfileStorage};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("failed to read profile {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write profile {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("profile {} is not valid JSON: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to encode profile: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Stores the profile as pretty JSON at a fixed path.
#[derive(Debug, Clone)]
pub struct JsonProfileStore {
    path: PathBuf,
}

impl JsonProfileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ProfileStorage for JsonProfileStore {
    type Error = ProfileError;

    fn load_profile(&self) -> Result<Option<Profile>, Self::Error> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(ProfileError::Read {
                    path: self.path.clone(),
                    source,
                });
            }
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| ProfileError::Parse {
                path: self.path.clone(),
                source,
            })
    }

    fn save_profile(&self, profile: &Profile) -> Result<(), Self::Error> {
        let write_err = |source| ProfileError::Write {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
        let payload = serde_json::to_vec_pretty(profile)?;
        fs::write(&self.path, payload).map_err(write_err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_profile(label: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "growordie-profile-{label}-{}/profile.json",
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap_or_default()
                .as_nanos()
        ))
    }

    #[test]
    fn missing_file_means_no_profile() {
        let store = JsonProfileStore::new(temp_profile("missing"));
        assert_eq!(store.load_profile().unwrap(), None);
    }

    #[test]
    fn saves_and_reloads_camel_case_json() {
        let store = JsonProfileStore::new(temp_profile("roundtrip"));
        let profile = Profile {
            high_score: 275,
            tips_used: true,
        };
        store.save_profile(&profile).unwrap();
        let raw = fs::read_to_string(store.path()).unwrap();
        assert!(raw.contains("\"highScore\": 275"));
        assert_eq!(store.load_profile().unwrap(), Some(profile));
    }

    #[test]
    fn corrupt_file_is_a_parse_error() {
        let path = temp_profile("corrupt");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "{ not json").unwrap();
        let err = JsonProfileStore::new(&path).load_profile().unwrap_err();
        assert!(matches!(err, ProfileError::Parse { .. }));
        assert!(err.to_string().contains("not valid JSON"));
    }
}
