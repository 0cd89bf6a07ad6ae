//! Manifest assembly and serialization.

use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::models::SpriteMap;

/// The manifest's `autoplay` value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Autoplay {
    /// Play the named sprite.
    Name(String),
    /// Play the synthetic silence track.
    Flag(bool),
}

/// Pick the autoplay value for a run.
///
/// An explicit name wins; otherwise a requested silence track autoplays;
/// otherwise the key is omitted.
pub fn resolve_autoplay(explicit: Option<&str>, has_silence: bool) -> Option<Autoplay> {
    match explicit {
        Some(name) if !name.is_empty() => Some(Autoplay::Name(name.to_string())),
        _ if has_silence => Some(Autoplay::Flag(true)),
        _ => None,
    }
}

/// `{urls, sprite, autoplay?}`
#[derive(Debug, Clone, Default, Serialize)]
pub struct Manifest {
    pub urls: Vec<String>,
    pub sprite: SpriteMap,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub autoplay: Option<Autoplay>,
}

impl Manifest {
    pub fn new(urls: Vec<String>, sprite: SpriteMap, autoplay: Option<Autoplay>) -> Self {
        Self {
            urls,
            sprite,
            autoplay,
        }
    }

    /// Pretty JSON with two-space indentation.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Write the manifest to `path`, creating its parent directory.
    pub fn write(&self, path: &Path) -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = self.to_json()?;
        fs::write(path, json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SpriteEntry;
    use serde_json::json;
    use tempfile::tempdir;

    fn sprite() -> SpriteMap {
        let mut map = SpriteMap::new();
        map.insert("beep", SpriteEntry::new(0, 1751));
        map.insert("boop", SpriteEntry::new(3000, 1270));
        map
    }

    #[test]
    fn explicit_autoplay_wins() {
        assert_eq!(
            resolve_autoplay(Some("boop"), true),
            Some(Autoplay::Name("boop".to_string()))
        );
    }

    #[test]
    fn silence_autoplays_when_no_name() {
        assert_eq!(resolve_autoplay(None, true), Some(Autoplay::Flag(true)));
        assert_eq!(resolve_autoplay(Some(""), true), Some(Autoplay::Flag(true)));
        assert_eq!(resolve_autoplay(None, false), None);
    }

    #[test]
    fn serializes_fields_in_order() {
        let manifest = Manifest::new(
            vec!["out.ogg".to_string()],
            sprite(),
            Some(Autoplay::Name("boop".to_string())),
        );
        let text = manifest.to_json().unwrap();

        assert!(text.starts_with("{\n  \"urls\""));
        let urls_at = text.find("\"urls\"").unwrap();
        let sprite_at = text.find("\"sprite\"").unwrap();
        let autoplay_at = text.find("\"autoplay\"").unwrap();
        assert!(urls_at < sprite_at && sprite_at < autoplay_at);

        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(
            value,
            json!({
                "urls": ["out.ogg"],
                "sprite": {"beep": [0, 1751], "boop": [3000, 1270]},
                "autoplay": "boop"
            })
        );
    }

    #[test]
    fn autoplay_flag_and_omission() {
        let flagged = Manifest::new(Vec::new(), SpriteMap::new(), Some(Autoplay::Flag(true)));
        assert!(flagged.to_json().unwrap().contains("\"autoplay\": true"));

        let plain = Manifest::new(Vec::new(), SpriteMap::new(), None);
        assert!(!plain.to_json().unwrap().contains("autoplay"));
    }

    #[test]
    fn write_creates_parent_directory() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("build/audio/sfx.json");
        Manifest::new(Vec::new(), sprite(), None).write(&path).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["sprite"]["boop"], json!([3000, 1270]));
    }
}
