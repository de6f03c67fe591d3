//! Application error types using thiserror
//!
//! Error hierarchy:
//! - ConfigError: Issues with CLI configuration and run inputs
//! - TrimError: Failures while pruning extracted class trees
//! - ArchiveError: Failures while packing or listing archives
//! - PublishError: Failures while deploying specialized artifacts
//! - ManifestError: Issues with dependency manifest parsing and rewriting

use std::path::PathBuf;
use thiserror::Error;

/// Application-level error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration related errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Class tree pruning errors
    #[error(transparent)]
    Trim(#[from] TrimError),

    /// Archive packing errors
    #[error(transparent)]
    Archive(#[from] ArchiveError),

    /// Artifact publishing errors
    #[error(transparent)]
    Publish(#[from] PublishError),

    /// Dependency manifest errors
    #[error(transparent)]
    Manifest(#[from] ManifestError),
}

/// Errors related to configuration and run inputs
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Usage report not found
    #[error("usage report not found: {path}")]
    UsageReportNotFound { path: PathBuf },

    /// Failed to read the usage report
    #[error("failed to read usage report {path}: {source}")]
    UsageReportRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Usage report is not valid JSON or names unknown scopes
    #[error("failed to parse usage report {path}: {message}")]
    UsageReportParse { path: PathBuf, message: String },

    /// Output directory could not be created
    #[error("failed to create output directory {path}: {source}")]
    OutputDirCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Too many specialized dependencies for power-set enumeration
    #[error(
        "{count} specialized dependencies would produce 2^{count} manifest combinations (limit is {limit})"
    )]
    TooManyCombinations { count: usize, limit: usize },
}

impl ConfigError {
    /// Creates a new UsageReportNotFound error
    pub fn usage_report_not_found(path: impl Into<PathBuf>) -> Self {
        ConfigError::UsageReportNotFound { path: path.into() }
    }

    /// Creates a new UsageReportRead error
    pub fn usage_report_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::UsageReportRead {
            path: path.into(),
            source,
        }
    }

    /// Creates a new UsageReportParse error
    pub fn usage_report_parse(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        ConfigError::UsageReportParse {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates a new OutputDirCreate error
    pub fn output_dir_create(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::OutputDirCreate {
            path: path.into(),
            source,
        }
    }

    /// Creates a new TooManyCombinations error
    pub fn too_many_combinations(count: usize, limit: usize) -> Self {
        ConfigError::TooManyCombinations { count, limit }
    }
}

/// Errors raised while pruning an extracted class tree
#[derive(Error, Debug)]
pub enum TrimError {
    /// Extracted class tree not found
    #[error("extracted class directory not found: {path}")]
    SourceMissing { path: PathBuf },

    /// Failed to create a directory in the pruned tree
    #[error("failed to create directory {path}: {source}")]
    CreateDirFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to delete a file or directory
    #[error("failed to delete {path}: {source}")]
    DeleteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl TrimError {
    /// Creates a new SourceMissing error
    pub fn source_missing(path: impl Into<PathBuf>) -> Self {
        TrimError::SourceMissing { path: path.into() }
    }

    /// Creates a new CreateDirFailed error
    pub fn create_dir_failed(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        TrimError::CreateDirFailed {
            path: path.into(),
            source,
        }
    }

    /// Creates a new DeleteFailed error
    pub fn delete_failed(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        TrimError::DeleteFailed {
            path: path.into(),
            source,
        }
    }
}

/// Errors raised while packing or listing archives
#[derive(Error, Debug)]
pub enum ArchiveError {
    /// File system failure while touching archive contents
    #[error("archive IO error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Archive container could not be written
    #[error("failed to write archive {path}: {message}")]
    WriteFailed { path: PathBuf, message: String },

    /// Archive container could not be read
    #[error("failed to read archive {path}: {message}")]
    ReadFailed { path: PathBuf, message: String },
}

impl ArchiveError {
    /// Creates a new Io error
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ArchiveError::Io {
            path: path.into(),
            source,
        }
    }

    /// Creates a new WriteFailed error
    pub fn write_failed(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        ArchiveError::WriteFailed {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates a new ReadFailed error
    pub fn read_failed(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        ArchiveError::ReadFailed {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Errors raised while publishing specialized artifacts
#[derive(Error, Debug)]
pub enum PublishError {
    /// Deploy command could not be started
    #[error("failed to run {command}: {source}")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Deploy command finished with a non-zero status
    #[error("publish of {coordinates} failed ({status}): {stderr}")]
    CommandFailed {
        coordinates: String,
        status: String,
        stderr: String,
    },

    /// Deploy command ran past the configured timeout
    #[error("publish of {coordinates} timed out after {seconds}s")]
    Timeout { coordinates: String, seconds: u64 },
}

impl PublishError {
    /// Creates a new SpawnFailed error
    pub fn spawn_failed(command: impl Into<String>, source: std::io::Error) -> Self {
        PublishError::SpawnFailed {
            command: command.into(),
            source,
        }
    }

    /// Creates a new CommandFailed error
    pub fn command_failed(
        coordinates: impl Into<String>,
        status: impl Into<String>,
        stderr: impl Into<String>,
    ) -> Self {
        PublishError::CommandFailed {
            coordinates: coordinates.into(),
            status: status.into(),
            stderr: stderr.into(),
        }
    }

    /// Creates a new Timeout error
    pub fn timeout(coordinates: impl Into<String>, seconds: u64) -> Self {
        PublishError::Timeout {
            coordinates: coordinates.into(),
            seconds,
        }
    }
}

/// Errors related to dependency manifest operations
#[derive(Error, Debug)]
pub enum ManifestError {
    /// Manifest file not found
    #[error("manifest file not found: {path}")]
    NotFound { path: PathBuf },

    /// Failed to read manifest file
    #[error("failed to read manifest file {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write manifest file
    #[error("failed to write manifest file {path}: {source}")]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// XML parsing error
    #[error("failed to parse XML in {path}: {message}")]
    ParseError { path: PathBuf, message: String },

    /// XML serialization error
    #[error("failed to serialize manifest {path}: {message}")]
    EmitError { path: PathBuf, message: String },

    /// Project-level element missing from the manifest
    #[error("manifest {path} has no <{element}> element for the project")]
    MissingProjectElement { path: PathBuf, element: String },

    /// Required child missing from a matched dependency element
    #[error("dependency {coordinates} in {path} has no <{element}> child")]
    MissingDependencyElement {
        path: PathBuf,
        element: String,
        coordinates: String,
    },
}

impl ManifestError {
    /// Creates a new NotFound error
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        ManifestError::NotFound { path: path.into() }
    }

    /// Creates a new ReadError
    pub fn read_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ManifestError::ReadError {
            path: path.into(),
            source,
        }
    }

    /// Creates a new WriteError
    pub fn write_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ManifestError::WriteError {
            path: path.into(),
            source,
        }
    }

    /// Creates a new ParseError
    pub fn parse_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        ManifestError::ParseError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates a new EmitError
    pub fn emit_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        ManifestError::EmitError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates a new MissingProjectElement error
    pub fn missing_project_element(path: impl Into<PathBuf>, element: impl Into<String>) -> Self {
        ManifestError::MissingProjectElement {
            path: path.into(),
            element: element.into(),
        }
    }

    /// Creates a new MissingDependencyElement error
    pub fn missing_dependency_element(
        path: impl Into<PathBuf>,
        element: impl Into<String>,
        coordinates: impl Into<String>,
    ) -> Self {
        ManifestError::MissingDependencyElement {
            path: path.into(),
            element: element.into(),
            coordinates: coordinates.into(),
        }
    }
}
