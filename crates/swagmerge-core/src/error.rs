use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to serialize document: {0}")]
    Serialize(serde_json::Error),
}

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("no opening \"`{{\" marker found in docs template")]
    MissingOpenMarker,

    #[error("no closing \"}}`\" marker found after the opening marker in docs template")]
    MissingCloseMarker,

    #[error(
        "docs template contains {0} `\"schemes\": {{{{ marshal .Schemes }}}}` expressions, expected at most one"
    )]
    AmbiguousTemplateExpression(usize),

    #[error("docs template already contains the placeholder value {0}")]
    PlaceholderCollision(&'static str),

    #[error("docs template is not a valid JSON object, check the constants in docs.go: {0}")]
    Parse(#[from] ParseError),
}

#[derive(Debug, Error)]
pub enum MergeError {
    #[error("failed to read extension file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse extension file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConventionError {
    #[error("description {description:?} has {segments} hyphen-separated segments, expected at least 3")]
    TooFewSegments { description: String, segments: usize },

    #[error("marker {marker:?} has no tag text, it would match every description")]
    EmptyMarker { marker: String },
}

#[derive(Debug, Error)]
pub enum RewriteError {
    #[error(
        "the third-party type description of response {status} on POST {path} is malformed: {source}"
    )]
    MalformedDescription {
        path: String,
        status: String,
        #[source]
        source: ConventionError,
    },

    #[error(
        "{name} type does not exist (referenced by POST {path}), add it to the extension file"
    )]
    UnknownType { name: String, path: String },

    #[error(transparent)]
    Convention(#[from] ConventionError),
}

#[derive(Debug, Error)]
pub enum BuildError {
    #[error("failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} exited with {status}")]
    Failed { program: String, status: String },
}

#[derive(Debug, Error)]
pub enum UpdateError {
    #[error("failed to read {}: {source}", .path.display())]
    ReadArtifact {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", .path.display())]
    WriteArtifact {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("spec build failed: {0}")]
    Build(#[from] BuildError),

    #[error("extract error: {0}")]
    Extract(#[from] ExtractError),

    #[error("merge error: {0}")]
    Merge(#[from] MergeError),

    #[error("rewrite error: {0}")]
    Rewrite(#[from] RewriteError),

    #[error("emit error: {0}")]
    Emit(#[from] ParseError),
}
