// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Analysis configuration. Every heuristic threshold lives here so that the
// detectors stay free of magic numbers and callers can tune them from JSON.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SeitenwerkError};

/// Digest used by the content fingerprinter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FingerprintAlgorithm {
    /// SHA-256 truncated to 8 bytes, hex-encoded.
    #[default]
    Sha256,
    /// Deterministic 32-bit rolling hash, hex-encoded.
    Rolling,
}

/// Tunable thresholds for the page classifier and aggregator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    // -- Blank detection --
    /// Pages with fewer trimmed characters than this are blank outright.
    pub blank_min_chars: usize,
    /// Characters per hundred square units below which a page is sparse.
    pub sparse_density_threshold: f32,
    /// Sparse pages are only blank when shorter than this.
    pub sparse_max_chars: usize,

    // -- Orientation --
    /// Fewer runs than this carry too little signal to judge orientation.
    pub orientation_min_runs: usize,
    /// Text box aspect ratio that marks text as running the wrong way.
    pub rotation_aspect_factor: f32,
    /// Portrait pages need more runs than this before suggesting 270°.
    pub portrait_min_runs: usize,

    // -- Headings --
    /// Fraction of the page, measured from the top, searched for headings.
    pub heading_region: f32,
    /// Heading font size relative to the page median.
    pub heading_size_ratio: f32,
    /// Ratio that qualifies a non-uppercase heading.
    pub heading_strong_ratio: f32,
    /// Absolute font size that qualifies as a heading on its own.
    pub heading_absolute_size: f32,
    pub title_min_chars: usize,
    /// Exclusive upper bound on title length.
    pub title_max_chars: usize,
    /// Leading text lines inspected by the chapter pattern matcher.
    pub pattern_lines: usize,

    // -- Table of contents / cover --
    /// A TOC needs more lines ending in a page number than this.
    pub toc_min_numbered_lines: usize,
    /// Page 1 is a cover only when shorter than this.
    pub cover_max_chars: usize,

    // -- Fingerprinting --
    /// Normalised characters fed to the digest.
    pub fingerprint_chars: usize,
    pub fingerprint_algorithm: FingerprintAlgorithm,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            blank_min_chars: 10,
            sparse_density_threshold: 0.01,
            sparse_max_chars: 50,
            orientation_min_runs: 5,
            rotation_aspect_factor: 2.0,
            portrait_min_runs: 20,
            heading_region: 0.4,
            heading_size_ratio: 1.3,
            heading_strong_ratio: 1.5,
            heading_absolute_size: 18.0,
            title_min_chars: 3,
            title_max_chars: 100,
            pattern_lines: 5,
            toc_min_numbered_lines: 5,
            cover_max_chars: 500,
            fingerprint_chars: 1000,
            fingerprint_algorithm: FingerprintAlgorithm::Sha256,
        }
    }
}

impl AnalysisConfig {
    /// Parse a configuration from JSON. Missing keys keep their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let data = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&data)
    }

    /// Reject values that would make the detectors meaningless.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.heading_region) || self.heading_region == 0.0 {
            return Err(SeitenwerkError::Config(format!(
                "heading_region must be in (0, 1], got {}",
                self.heading_region
            )));
        }
        if self.title_min_chars >= self.title_max_chars {
            return Err(SeitenwerkError::Config(format!(
                "title_min_chars ({}) must be below title_max_chars ({})",
                self.title_min_chars, self.title_max_chars
            )));
        }
        if self.rotation_aspect_factor <= 1.0 {
            return Err(SeitenwerkError::Config(format!(
                "rotation_aspect_factor must exceed 1.0, got {}",
                self.rotation_aspect_factor
            )));
        }
        if self.fingerprint_chars == 0 {
            return Err(SeitenwerkError::Config(
                "fingerprint_chars must be positive".into(),
            ));
        }
        Ok(())
    }
}
