//! General behavior settings for skiff.

use serde::Deserialize;
use std::path::PathBuf;

/// `[general]` section of skiff.toml.
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct General {
    confirm_delete: bool,
    icons: bool,
    download_dir: Option<PathBuf>,
}

impl General {
    /// Whether delete asks for confirmation before any request is sent.
    #[inline]
    pub fn confirm_delete(&self) -> bool {
        self.confirm_delete
    }

    #[inline]
    pub fn icons(&self) -> bool {
        self.icons
    }

    /// Where downloads are saved. Falls back to the platform download
    /// directory, then to the working directory.
    pub fn download_dir(&self) -> PathBuf {
        if let Some(dir) = &self.download_dir {
            return dir.clone();
        }
        dirs::download_dir().unwrap_or_else(|| PathBuf::from("."))
    }
}

impl Default for General {
    fn default() -> Self {
        Self {
            confirm_delete: true,
            icons: true,
            download_dir: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_download_dir_wins() {
        let general = General {
            download_dir: Some(PathBuf::from("/tmp/saves")),
            ..General::default()
        };
        assert_eq!(general.download_dir(), PathBuf::from("/tmp/saves"));
    }
}
