// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Seitenwerk.

use thiserror::Error;

/// Top-level error type for all Seitenwerk operations.
#[derive(Debug, Error)]
pub enum SeitenwerkError {
    // -- Document errors --
    #[error("PDF operation failed: {0}")]
    PdfError(String),

    #[error("failed to extract page {page}: {reason}")]
    PageExtraction { page: u32, reason: String },

    #[error("page {page} out of range (document has {total} pages)")]
    PageOutOfRange { page: u32, total: u32 },

    // -- Analysis errors --
    #[error("invalid {category} pattern `{pattern}`: {reason}")]
    InvalidPattern {
        category: String,
        pattern: String,
        reason: String,
    },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("analysis cancelled after {pages_done} of {total} pages")]
    Cancelled { pages_done: u32, total: u32 },

    // -- Editing --
    #[error("action not supported by the editor: {0}")]
    UnsupportedAction(String),

    #[error("invalid edit: {0}")]
    InvalidEdit(String),

    // -- Storage / persistence --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, SeitenwerkError>;
