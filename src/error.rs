use thiserror::Error;

/// Errors that can occur while capturing a snapshot
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// A resource referenced by the subtree could not be fetched or decoded.
    ///
    /// This is never swallowed by the embedding pipeline: a broken-looking
    /// snapshot is worse than a loud failure, so callers of the top-level
    /// walk decide whether to retry, accept partial output, or abort.
    #[error("Failed to fetch resource '{url}': {reason}")]
    ResourceFetchFailed { url: String, reason: String },

    /// An embedded image source failed to load or decode after the swap
    #[error("Failed to load embedded image: {0}")]
    ImageLoadFailed(String),

    /// A nested iframe document was not accessible.
    ///
    /// Cross-origin access denial is an expected, unrecoverable case; the
    /// structural cloner recovers from it by degrading to a shallow clone,
    /// so this error never escapes the clone pipeline.
    #[error("Nested iframe document is not accessible")]
    FrameAccessDenied,

    /// A canvas or video pixel surface could not be encoded
    #[error("Failed to encode pixel surface: {reason}")]
    SurfaceEncodeFailed { reason: String },

    /// Rewriting a CSS property value failed
    #[error("Failed to rewrite CSS value of '{property}': {reason}")]
    CssRewriteFailed { property: String, reason: String },

    /// Exporting a snapshot to JSON failed
    #[error("Failed to serialize snapshot: {0}")]
    SerializationFailed(String),
}

/// Result type alias for snapshot operations
pub type Result<T> = std::result::Result<T, SnapshotError>;
