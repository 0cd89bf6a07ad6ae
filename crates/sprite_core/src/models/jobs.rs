//! Run-related data structures (specs and export jobs).

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::pcm::PcmFormat;

/// Name of the synthetic looping silence track.
pub const SILENCE_TRACK: &str = "silence";

/// Specification for one sprite build.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSpec {
    /// Source files in input order, deduplicated.
    pub inputs: Vec<PathBuf>,
    /// Output base name; artifacts are written as `<output>.<ext>`.
    pub output: String,
    /// Format allow-list. Empty means every registered format.
    #[serde(default)]
    pub formats: Vec<String>,
    /// Formats for per-clip raw part exports.
    #[serde(default)]
    pub raw_parts: Vec<String>,
    /// Explicit autoplay sprite name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub autoplay: Option<String>,
    /// Duration of the synthetic silence track in seconds (0 = none).
    #[serde(default)]
    pub silence_secs: f64,
    /// Timeline PCM format.
    pub pcm: PcmFormat,
}

impl RunSpec {
    /// Create a spec for the given inputs with default options.
    ///
    /// Duplicate inputs are dropped, keeping the first occurrence.
    pub fn new(inputs: impl IntoIterator<Item = PathBuf>, output: impl Into<String>) -> Self {
        let mut unique: Vec<PathBuf> = Vec::new();
        for input in inputs {
            if !unique.contains(&input) {
                unique.push(input);
            }
        }

        Self {
            inputs: unique,
            output: output.into(),
            formats: Vec::new(),
            raw_parts: Vec::new(),
            autoplay: None,
            silence_secs: 0.0,
            pcm: PcmFormat::default(),
        }
    }

    /// Set the format allow-list from a comma separated string.
    pub fn with_formats(mut self, list: &str) -> Self {
        self.formats = parse_format_list(list);
        self
    }

    /// Set the raw part formats from a comma separated string.
    pub fn with_raw_parts(mut self, list: &str) -> Self {
        self.raw_parts = parse_format_list(list);
        self
    }

    pub fn with_autoplay(mut self, name: Option<String>) -> Self {
        self.autoplay = name.filter(|n| !n.is_empty());
        self
    }

    pub fn with_silence(mut self, secs: f64) -> Self {
        self.silence_secs = if secs.is_finite() && secs > 0.0 { secs } else { 0.0 };
        self
    }

    pub fn with_pcm(mut self, pcm: PcmFormat) -> Self {
        self.pcm = pcm;
        self
    }

    /// Whether a silence track was requested.
    pub fn has_silence(&self) -> bool {
        self.silence_secs > 0.0
    }

    /// Path of the manifest file.
    pub fn manifest_path(&self) -> PathBuf {
        PathBuf::from(format!("{}.json", self.output))
    }

    /// Short name used for log files.
    pub fn run_name(&self) -> String {
        Path::new(&self.output)
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| "audiosprite".to_string())
    }
}

/// Split a comma separated format list, dropping empty items.
pub fn parse_format_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}

/// One transcoder invocation producing a single artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportJob {
    /// Format identifier (also the file extension).
    pub format: String,
    /// Encoder arguments placed between the input and the output file.
    pub args: Vec<String>,
    /// Output base (without extension).
    pub base: String,
    /// Whether the artifact is listed in `manifest.urls`.
    pub register: bool,
}

impl ExportJob {
    /// Job for the full sprite: `<base>.<format>`, registered in the manifest.
    pub fn sprite(base: impl Into<String>, format: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            format: format.into(),
            args,
            base: base.into(),
            register: true,
        }
    }

    /// Job for one clip slice: `<base>_NNN.<format>`, never registered.
    pub fn raw_part(base: &str, sequence: usize, format: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            format: format.into(),
            args,
            base: format!("{}_{:03}", base, sequence),
            register: false,
        }
    }

    /// Output file for this job.
    pub fn output_path(&self) -> PathBuf {
        self.path_with_extension(&self.format)
    }

    /// Sibling path sharing the job's base with another extension.
    pub fn path_with_extension(&self, ext: &str) -> PathBuf {
        PathBuf::from(format!("{}.{}", self.base, ext))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inputs_are_deduplicated_in_order() {
        let spec = RunSpec::new(
            vec![
                PathBuf::from("b.wav"),
                PathBuf::from("a.wav"),
                PathBuf::from("b.wav"),
            ],
            "out",
        );
        assert_eq!(spec.inputs, vec![PathBuf::from("b.wav"), PathBuf::from("a.wav")]);
    }

    #[test]
    fn format_list_parsing() {
        assert_eq!(parse_format_list("mp3, ogg,,M4A"), vec!["mp3", "ogg", "m4a"]);
        assert!(parse_format_list("").is_empty());
    }

    #[test]
    fn silence_rejects_non_positive() {
        let spec = RunSpec::new(Vec::new(), "out").with_silence(-2.0);
        assert!(!spec.has_silence());
        let spec = RunSpec::new(Vec::new(), "out").with_silence(f64::NAN);
        assert!(!spec.has_silence());
        let spec = RunSpec::new(Vec::new(), "out").with_silence(5.0);
        assert!(spec.has_silence());
    }

    #[test]
    fn empty_autoplay_is_none() {
        let spec = RunSpec::new(Vec::new(), "out").with_autoplay(Some(String::new()));
        assert!(spec.autoplay.is_none());
    }

    #[test]
    fn manifest_and_run_names() {
        let spec = RunSpec::new(Vec::new(), "build/sfx");
        assert_eq!(spec.manifest_path(), PathBuf::from("build/sfx.json"));
        assert_eq!(spec.run_name(), "sfx");
    }

    #[test]
    fn export_job_paths() {
        let job = ExportJob::sprite("out", "mp3", Vec::new());
        assert_eq!(job.output_path(), PathBuf::from("out.mp3"));
        assert!(job.register);

        let part = ExportJob::raw_part("out", 7, "ogg", Vec::new());
        assert_eq!(part.output_path(), PathBuf::from("out_007.ogg"));
        assert_eq!(part.path_with_extension("caf"), PathBuf::from("out_007.caf"));
        assert!(!part.register);
    }
}
