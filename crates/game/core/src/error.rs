//! Common error infrastructure for fight-core.
//!
//! Domain-specific errors (`CatalogError`, `NotationError`, `BuildError`) are
//! defined next to the data they validate. All of them describe
//! configuration problems discovered while content is loaded; nothing that
//! happens during live simulation is reported as an error.

/// Severity level of an error, used for categorization and recovery strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Invalid authored data; fix the content and reload.
    ///
    /// Examples: empty motion notation, frame data without a hitbox
    Validation,

    /// Inconsistent catalog; loading must abort.
    ///
    /// Examples: duplicate skill id, cancel edge pointing at an unknown skill
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if loading cannot continue past this error.
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::Fatal)
    }
}

/// Common trait for all fight-core errors.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity by whether the loader may skip the offending item
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Default implementation uses the error type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
