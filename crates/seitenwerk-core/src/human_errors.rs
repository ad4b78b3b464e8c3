// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Human-readable error messages.
//
// Every technical error is mapped to plain English with a clear suggestion.
// The engine never retries on its own; `retriable` tells the caller whether
// running the same analysis again could succeed.

use crate::error::SeitenwerkError;

/// Severity of an error from the user's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Reading the file again may well work (file still being written, I/O blip).
    Transient,
    /// The user must fix something (config file, pattern table, page number).
    ActionRequired,
    /// Cannot be fixed by retrying; the document itself is unusable.
    Permanent,
}

/// A human-readable error with plain English message and actionable suggestion.
#[derive(Debug, Clone)]
pub struct HumanError {
    /// Plain English summary (shown as a heading).
    pub message: String,
    /// What the user should try (shown as body text).
    pub suggestion: String,
    /// Whether the caller may retry the same operation.
    pub retriable: bool,
    pub severity: Severity,
}

/// Convert a `SeitenwerkError` into a `HumanError`.
pub fn humanize_error(err: &SeitenwerkError) -> HumanError {
    match err {
        SeitenwerkError::PdfError(detail) => {
            if detail.contains("encrypt") || detail.contains("password") {
                HumanError {
                    message: "This PDF is password protected.".into(),
                    suggestion: "Remove the password in your PDF viewer, save a copy, and analyse that copy.".into(),
                    retriable: false,
                    severity: Severity::ActionRequired,
                }
            } else {
                HumanError {
                    message: "We couldn't open this PDF.".into(),
                    suggestion: "The file may be damaged or not a PDF at all. Try re-saving it from the program that created it.".into(),
                    retriable: false,
                    severity: Severity::Permanent,
                }
            }
        }

        SeitenwerkError::PageExtraction { page, .. } => HumanError {
            message: format!("We couldn't read page {page}."),
            suggestion: "Nothing was changed. Try the analysis again; if it keeps failing, the page is probably damaged.".into(),
            retriable: true,
            severity: Severity::Transient,
        },

        SeitenwerkError::PageOutOfRange { page, total } => HumanError {
            message: format!("Page {page} doesn't exist."),
            suggestion: format!("This document has {total} pages."),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        SeitenwerkError::InvalidPattern { category, .. } => HumanError {
            message: format!("One of the {category} patterns is not a valid regular expression."),
            suggestion: "Check the pattern table file, or run without it to use the built-in patterns.".into(),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        SeitenwerkError::Config(detail) => HumanError {
            message: "The configuration file has a problem.".into(),
            suggestion: format!("{detail}. Fix the value or delete the file to use the defaults."),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        SeitenwerkError::Cancelled { .. } => HumanError {
            message: "The analysis was stopped.".into(),
            suggestion: "Start it again whenever you're ready.".into(),
            retriable: true,
            severity: Severity::Transient,
        },

        SeitenwerkError::UnsupportedAction(action) => HumanError {
            message: format!("\"{action}\" can't be applied automatically."),
            suggestion: "Rearrange these pages by hand in your PDF editor.".into(),
            retriable: false,
            severity: Severity::Permanent,
        },

        SeitenwerkError::InvalidEdit(detail) => HumanError {
            message: "That change can't be made to this document.".into(),
            suggestion: format!("{detail}. Nothing was written."),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        SeitenwerkError::Io(io_err) => match io_err.kind() {
            std::io::ErrorKind::NotFound => HumanError {
                message: "We couldn't find that file.".into(),
                suggestion: "Check the path and try again.".into(),
                retriable: false,
                severity: Severity::ActionRequired,
            },
            std::io::ErrorKind::PermissionDenied => HumanError {
                message: "We aren't allowed to open that file.".into(),
                suggestion: "Check the file permissions, or copy it somewhere you own.".into(),
                retriable: false,
                severity: Severity::ActionRequired,
            },
            _ => HumanError {
                message: "Reading or writing a file failed.".into(),
                suggestion: "Try again. If the file is on a network drive, copy it locally first.".into(),
                retriable: true,
                severity: Severity::Transient,
            },
        },

        SeitenwerkError::Serialization(_) => HumanError {
            message: "A settings file isn't valid JSON.".into(),
            suggestion: "Fix the file or delete it to use the defaults.".into(),
            retriable: false,
            severity: Severity::ActionRequired,
        },
    }
}
