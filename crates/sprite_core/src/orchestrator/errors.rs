//! Error types for the sprite pipeline.
//!
//! Errors carry context that chains through layers:
//! Run → Step → Operation → Detail

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::tools::ToolError;

/// Top-level pipeline error with run context.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// A step failed during execution.
    #[error("Run '{run_name}' failed at step '{step_name}': {source}")]
    StepFailed {
        run_name: String,
        step_name: String,
        #[source]
        source: StepError,
    },

    /// Failed to set up the run (work directory, logger, timeline).
    #[error("Run '{run_name}' setup failed: {message}")]
    SetupFailed { run_name: String, message: String },
}

impl PipelineError {
    /// Create a step failed error.
    pub fn step_failed(
        run_name: impl Into<String>,
        step_name: impl Into<String>,
        source: StepError,
    ) -> Self {
        Self::StepFailed {
            run_name: run_name.into(),
            step_name: step_name.into(),
            source,
        }
    }

    /// Create a setup failed error.
    pub fn setup_failed(run_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::SetupFailed {
            run_name: run_name.into(),
            message: message.into(),
        }
    }

    /// The step error behind this failure, if any.
    pub fn step_error(&self) -> Option<&StepError> {
        match self {
            PipelineError::StepFailed { source, .. } => Some(source),
            PipelineError::SetupFailed { .. } => None,
        }
    }
}

/// Error from a pipeline step with operation context.
#[derive(Error, Debug)]
pub enum StepError {
    /// No source files were given.
    #[error("No input files specified")]
    MissingInput,

    /// The transcoder could not be resolved at startup.
    #[error("{tool} was not found on your path")]
    TranscoderUnavailable { tool: String },

    /// A named input file does not exist.
    #[error("File does not exist: {}", .path.display())]
    SourceNotFound { path: PathBuf },

    /// The transcoder failed while converting a source to PCM.
    #[error("File could not be added: {} (exit code {}, signal {})", .file.display(), fmt_opt(.exit_code), fmt_opt(.signal))]
    DecodeFailed {
        file: PathBuf,
        exit_code: Option<i32>,
        signal: Option<i32>,
        #[source]
        source: ToolError,
    },

    /// The transcoder or secondary encoder failed during export.
    #[error("Error exporting {format} (exit code {}, signal {})", fmt_opt(.exit_code), fmt_opt(.signal))]
    ExportFailed {
        format: String,
        exit_code: Option<i32>,
        signal: Option<i32>,
        #[source]
        source: ToolError,
    },

    /// File I/O error.
    #[error("I/O error in {operation}: {source}")]
    IoError {
        operation: String,
        #[source]
        source: io::Error,
    },

    /// Output validation failed.
    #[error("Output validation failed: {0}")]
    InvalidOutput(String),
}

fn fmt_opt(value: &Option<i32>) -> String {
    value.map_or_else(|| "none".to_string(), |v| v.to_string())
}

impl StepError {
    /// Create a source not found error.
    pub fn source_not_found(path: impl AsRef<Path>) -> Self {
        Self::SourceNotFound {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Wrap a tool failure that happened while decoding `file`.
    pub fn decode_failed(file: impl AsRef<Path>, source: ToolError) -> Self {
        let (exit_code, signal) = source.exit_info();
        Self::DecodeFailed {
            file: file.as_ref().to_path_buf(),
            exit_code,
            signal,
            source,
        }
    }

    /// Wrap a tool failure that happened while exporting `format`.
    pub fn export_failed(format: impl Into<String>, source: ToolError) -> Self {
        let (exit_code, signal) = source.exit_info();
        Self::ExportFailed {
            format: format.into(),
            exit_code,
            signal,
            source,
        }
    }

    /// Create an I/O error with context.
    pub fn io_error(operation: impl Into<String>, source: io::Error) -> Self {
        Self::IoError {
            operation: operation.into(),
            source,
        }
    }

    /// Create an invalid output error.
    pub fn invalid_output(message: impl Into<String>) -> Self {
        Self::InvalidOutput(message.into())
    }
}

/// Result type for step operations.
pub type StepResult<T> = Result<T, StepError>;

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;
