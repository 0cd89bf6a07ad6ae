//! Known export formats and their default encoder arguments.

use crate::models::PcmFormat;

/// Format whose output feeds the secondary encoder.
pub const AIFF: &str = "aiff";

/// Extension of the secondary encoder's output.
pub const CAF: &str = "caf";

/// A registered format: identifier (also the extension) plus encoder args.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFormat {
    pub id: String,
    pub args: Vec<String>,
}

impl ExportFormat {
    fn new(id: &str, args: &[&str]) -> Self {
        Self {
            id: id.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }
}

/// Ordered format registry.
#[derive(Debug, Clone)]
pub struct FormatRegistry {
    formats: Vec<ExportFormat>,
}

impl FormatRegistry {
    /// The standard registry, in export order.
    pub fn default_for(pcm: PcmFormat, mp3_bitrate: &str) -> Self {
        let rate = pcm.sample_rate.to_string();
        Self {
            formats: vec![
                ExportFormat::new(AIFF, &[]),
                ExportFormat::new("ac3", &["-acodec", "ac3"]),
                ExportFormat::new("mp3", &["-ar", rate.as_str(), "-ab", mp3_bitrate, "-f", "mp3"]),
                ExportFormat::new("m4a", &[]),
                ExportFormat::new("ogg", &["-acodec", "libvorbis", "-f", "ogg"]),
            ],
        }
    }

    pub fn lookup(&self, id: &str) -> Option<&ExportFormat> {
        self.formats.iter().find(|f| f.id == id)
    }

    pub fn ids(&self) -> Vec<&str> {
        self.formats.iter().map(|f| f.id.as_str()).collect()
    }

    /// Formats to run for an allow-list.
    ///
    /// An empty list selects the whole registry in registry order. Otherwise
    /// the list's own order is kept; unknown and repeated ids are dropped.
    pub fn select(&self, allow: &[String]) -> Vec<&ExportFormat> {
        if allow.is_empty() {
            return self.formats.iter().collect();
        }

        let mut selected: Vec<&ExportFormat> = Vec::new();
        for id in allow {
            match self.lookup(id) {
                Some(format) if !selected.iter().any(|f| f.id == format.id) => {
                    selected.push(format)
                }
                Some(_) => {}
                None => tracing::debug!("Ignoring unknown export format '{}'", id),
            }
        }
        selected
    }
}
