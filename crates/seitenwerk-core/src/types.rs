// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the Seitenwerk structure analyser.
//
// Page-level inputs (`PageContent`, `TextRun`) come from a `PageSource`;
// everything else is produced by the analysis engine and is read-only to
// downstream consumers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for one analysis run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AnalysisId(pub Uuid);

impl AnalysisId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for AnalysisId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for AnalysisId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// -- Page source input --------------------------------------------------------

/// A positioned piece of text on a page.
///
/// Coordinates are PDF user space: the origin is the bottom-left corner, so
/// larger `y` values are higher up the page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextRun {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub font_size: f32,
    pub width: f32,
}

impl TextRun {
    pub fn new(text: impl Into<String>, x: f32, y: f32, font_size: f32, width: f32) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            font_size,
            width,
        }
    }
}

/// Everything the classifier needs to know about one page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageContent {
    /// 1-based page number.
    pub page_number: u32,
    /// Plain extracted text, possibly empty.
    pub text: String,
    pub runs: Vec<TextRun>,
    /// Page width in the same units as the run coordinates.
    pub width: f32,
    /// Page height in the same units as the run coordinates.
    pub height: f32,
    /// Whether the page paints at least one raster image.
    pub has_images: bool,
}

impl PageContent {
    pub fn area(&self) -> f32 {
        self.width * self.height
    }

    pub fn is_landscape(&self) -> bool {
        self.width > self.height
    }
}

// -- Per-page analysis --------------------------------------------------------

/// Clockwise rotation, in degrees, that would make a page read upright.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
pub enum Rotation {
    #[default]
    None,
    Quarter,
    Half,
    ThreeQuarter,
}

impl Rotation {
    pub fn degrees(self) -> u16 {
        match self {
            Self::None => 0,
            Self::Quarter => 90,
            Self::Half => 180,
            Self::ThreeQuarter => 270,
        }
    }
}

impl From<Rotation> for u16 {
    fn from(rotation: Rotation) -> Self {
        rotation.degrees()
    }
}

impl TryFrom<u16> for Rotation {
    type Error = String;

    fn try_from(degrees: u16) -> Result<Self, Self::Error> {
        match degrees {
            0 => Ok(Self::None),
            90 => Ok(Self::Quarter),
            180 => Ok(Self::Half),
            270 => Ok(Self::ThreeQuarter),
            other => Err(format!("rotation must be 0, 90, 180 or 270, got {other}")),
        }
    }
}

/// Diagnosis of a single page. Immutable once the aggregator has built it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageAnalysis {
    pub page_number: u32,
    pub is_blank: bool,
    /// Confidence in the blank verdict, 0.0 when the page is not blank.
    pub blank_confidence: f32,
    /// Character count of the trimmed extracted text.
    pub text_length: usize,
    pub has_images: bool,
    pub is_chapter_start: bool,
    /// Set only when `is_chapter_start` is true.
    pub chapter_title: Option<String>,
    #[serde(rename = "isTOC")]
    pub is_toc: bool,
    pub is_cover: bool,
    pub needs_rotation: bool,
    /// Always `Rotation::None` when `needs_rotation` is false.
    pub suggested_rotation: Rotation,
    pub is_landscape: bool,
    /// Text-to-area ratio clamped into [0, 1].
    pub text_density: f32,
    /// Similarity fingerprint of the normalised text. Equality only.
    pub content_hash: String,
}

// -- Document aggregate -------------------------------------------------------

/// Pages sharing identical normalised content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DuplicatePageGroup {
    /// At least two page numbers, ascending.
    pub pages: Vec<u32>,
    pub similarity: f32,
}

/// A detected chapter and the page range it spans.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChapterInfo {
    pub title: String,
    pub start_page: u32,
    /// Last page of the chapter; `None` means through the end of the document.
    pub end_page: Option<u32>,
}

/// The result of one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmartOrganizeAnalysis {
    pub id: AnalysisId,
    pub analyzed_at: DateTime<Utc>,
    pub total_pages: u32,
    pub pages: Vec<PageAnalysis>,
    pub blank_pages: Vec<u32>,
    pub duplicate_groups: Vec<DuplicatePageGroup>,
    pub rotation_needed: Vec<u32>,
    pub chapters: Vec<ChapterInfo>,
    pub toc_pages: Vec<u32>,
    pub cover_page: Option<u32>,
    pub issues_count: usize,
    /// Wall-clock duration of the run in milliseconds.
    #[serde(rename = "analysisTime")]
    pub analysis_time_ms: u64,
}

impl SmartOrganizeAnalysis {
    /// Look up the analysis for a 1-based page number.
    pub fn page(&self, page_number: u32) -> Option<&PageAnalysis> {
        page_number
            .checked_sub(1)
            .and_then(|index| self.pages.get(index as usize))
            .filter(|page| page.page_number == page_number)
    }
}

// -- Actions ------------------------------------------------------------------

/// The closed set of restructuring recommendations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SmartActionType {
    RemoveBlank,
    RemoveDuplicates,
    FixRotation,
    #[serde(rename = "move-toc-to-front")]
    MoveTocToFront,
    GroupChapters,
}

impl SmartActionType {
    pub const ALL: [SmartActionType; 5] = [
        Self::RemoveBlank,
        Self::RemoveDuplicates,
        Self::FixRotation,
        Self::MoveTocToFront,
        Self::GroupChapters,
    ];

    /// Stable kebab-case identifier, identical to the serialized form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RemoveBlank => "remove-blank",
            Self::RemoveDuplicates => "remove-duplicates",
            Self::FixRotation => "fix-rotation",
            Self::MoveTocToFront => "move-toc-to-front",
            Self::GroupChapters => "group-chapters",
        }
    }
}

impl std::fmt::Display for SmartActionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SmartActionType {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == value)
            .ok_or_else(|| format!("unknown action type: {value}"))
    }
}

/// An advisory, unapplied recommendation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmartAction {
    #[serde(rename = "type")]
    pub kind: SmartActionType,
    pub label: String,
    pub description: String,
    pub affected_pages: Vec<u32>,
    pub icon: String,
}
