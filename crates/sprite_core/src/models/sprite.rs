//! Sprite entries and the ordered sprite map.

use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Position of one named sound inside the sprite.
///
/// Serialized as `[offset_ms, duration_ms]`, or `[offset_ms, duration_ms, true]`
/// for looping entries (only the synthetic silence track loops).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpriteEntry {
    pub offset_ms: u64,
    pub duration_ms: u64,
    pub looped: bool,
}

impl SpriteEntry {
    pub fn new(offset_ms: u64, duration_ms: u64) -> Self {
        Self {
            offset_ms,
            duration_ms,
            looped: false,
        }
    }

    /// Build an entry from timeline seconds, rounding to whole milliseconds.
    pub fn from_secs(offset_secs: f64, duration_secs: f64) -> Self {
        Self::new(secs_to_ms(offset_secs), secs_to_ms(duration_secs))
    }

    /// Mark the entry as looping.
    pub fn looping(mut self) -> Self {
        self.looped = true;
        self
    }

    /// End of the entry in milliseconds.
    pub fn end_ms(&self) -> u64 {
        self.offset_ms + self.duration_ms
    }
}

fn secs_to_ms(secs: f64) -> u64 {
    (secs * 1000.0).round().max(0.0) as u64
}

impl Serialize for SpriteEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = if self.looped { 3 } else { 2 };
        let mut seq = serializer.serialize_seq(Some(len))?;
        seq.serialize_element(&self.offset_ms)?;
        seq.serialize_element(&self.duration_ms)?;
        if self.looped {
            seq.serialize_element(&true)?;
        }
        seq.end()
    }
}

impl<'de> Deserialize<'de> for SpriteEntry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Flagged(u64, u64, bool),
            Plain(u64, u64),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Flagged(offset_ms, duration_ms, looped) => Self {
                offset_ms,
                duration_ms,
                looped,
            },
            Raw::Plain(offset_ms, duration_ms) => Self::new(offset_ms, duration_ms),
        })
    }
}

/// Insertion-ordered map of sprite name to entry.
///
/// Keeps the order clips were added so the manifest reads in input order.
/// Inserting an existing name replaces its entry in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpriteMap {
    entries: Vec<(String, SpriteEntry)>,
}

impl SpriteMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an entry. Returns the previous entry for `name`.
    pub fn insert(&mut self, name: impl Into<String>, entry: SpriteEntry) -> Option<SpriteEntry> {
        let name = name.into();
        if let Some(slot) = self.entries.iter_mut().find(|(n, _)| *n == name) {
            return Some(std::mem::replace(&mut slot.1, entry));
        }
        self.entries.push((name, entry));
        None
    }

    pub fn get(&self, name: &str) -> Option<&SpriteEntry> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, e)| e)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SpriteEntry)> {
        self.entries.iter().map(|(n, e)| (n.as_str(), e))
    }

    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|(n, _)| n.as_str()).collect()
    }
}

impl Serialize for SpriteMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, entry) in &self.entries {
            map.serialize_entry(name, entry)?;
        }
        map.end()
    }
}
