use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::helpers::DEFAULT_MAX_LEN;
use crate::media::{
    ExtensionMatching, MediaKind, MediaMatcher, AUDIO_EXTENSIONS, IMAGE_EXTENSIONS,
    VIDEO_EXTENSIONS,
};
use crate::relay::RelayUrlPolicy;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config toml: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("empty extension in {kind} list")]
    EmptyExtension { kind: MediaKind },
    #[error("extension {extension:?} listed for both {first} and {second}")]
    DuplicateExtension {
        extension: String,
        first: MediaKind,
        second: MediaKind,
    },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtensionLists {
    pub image: Vec<String>,
    pub video: Vec<String>,
    pub audio: Vec<String>,
}

impl Default for ExtensionLists {
    fn default() -> Self {
        let owned = |list: &[&str]| -> Vec<String> {
            list.iter().map(|v| (*v).to_string()).collect()
        };
        Self {
            image: owned(IMAGE_EXTENSIONS),
            video: owned(VIDEO_EXTENSIONS),
            audio: owned(AUDIO_EXTENSIONS),
        }
    }
}

impl ExtensionLists {
    fn get(&self, kind: MediaKind) -> &[String] {
        match kind {
            MediaKind::Image => &self.image,
            MediaKind::Video => &self.video,
            MediaKind::Audio => &self.audio,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizerConfig {
    pub matching: ExtensionMatching,
    pub preview_max_len: usize,
    pub extensions: ExtensionLists,
    pub relay: RelayUrlPolicy,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            matching: ExtensionMatching::default(),
            preview_max_len: DEFAULT_MAX_LEN,
            extensions: ExtensionLists::default(),
            relay: RelayUrlPolicy::default(),
        }
    }
}

impl NormalizerConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&raw)?;
        tracing::info!(
            path = %path.display(),
            matching = ?config.matching,
            "loaded normalizer config"
        );
        Ok(config)
    }

    /// Every extension non-empty and owned by at most one media kind.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut owners: HashMap<String, MediaKind> = HashMap::new();
        for kind in MediaKind::ALL {
            for ext in self.extensions.get(kind) {
                if ext.trim().is_empty() {
                    return Err(ConfigError::EmptyExtension { kind });
                }
                let canonical = self.matching.canonical_extension(ext);
                match owners.get(&canonical) {
                    Some(first) if *first != kind => {
                        return Err(ConfigError::DuplicateExtension {
                            extension: canonical,
                            first: *first,
                            second: kind,
                        });
                    }
                    Some(_) => {}
                    None => {
                        owners.insert(canonical, kind);
                    }
                }
            }
        }
        Ok(())
    }

    pub fn media_matcher(&self) -> MediaMatcher {
        MediaMatcher::new(
            self.matching,
            self.extensions.image.as_slice(),
            self.extensions.video.as_slice(),
            self.extensions.audio.as_slice(),
        )
    }
}
