//! Core error types

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Unknown chart variant '{name}'. Known variants: {known}")]
    UnknownVariant { name: String, known: String },

    #[error("Invalid property '{input}': expected key=value")]
    InvalidProperty { input: String },

    #[error("Project descriptor not found: {path}")]
    ProjectNotFound { path: PathBuf },

    #[error("Failed to parse project descriptor {path}: {source}")]
    ProjectParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Invalid project descriptor {path}: {message}")]
    InvalidProject { path: PathBuf, message: String },

    #[error("Failed to clean output directory {path}: {source}")]
    CleanOutput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(
        "Failed to copy manifest files from {source_dir} \
         to chart templates directory {destination}: {source}"
    )]
    CopyTemplates {
        source_dir: PathBuf,
        destination: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to save chart {path}: {source}")]
    WriteChart {
        path: PathBuf,
        #[source]
        source: ChartWriteError,
    },

    #[error("Failed to copy {source_file} to {destination}: {source}")]
    CopySupportFile {
        source_file: PathBuf,
        destination: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to archive {source_dir} into {destination}: {source}")]
    Archive {
        source_dir: PathBuf,
        destination: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to register artifact {path}: {message}")]
    Publish { path: PathBuf, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Cause of a failed `Chart.yaml` write
#[derive(Error, Debug)]
pub enum ChartWriteError {
    #[error("{0}")]
    Serialize(#[from] serde_yaml::Error),

    #[error("{0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CoreError>;
