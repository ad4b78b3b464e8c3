// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Multilingual pattern table for heading, table-of-contents and page-number
// recognition.
//
// The table is plain data (category, locale, regex source) so new locales can
// be shipped as JSON without touching detector code. `CompiledPatterns` is the
// compiled form owned by the classifier.

use std::path::Path;

use regex::Regex;
use seitenwerk_core::error::{Result, SeitenwerkError};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Current version of the built-in table.
pub const BUILTIN_TABLE_VERSION: u32 = 1;

/// What a pattern recognises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PatternCategory {
    Chapter,
    Part,
    Section,
    Introduction,
    Preface,
    Appendix,
    NumericHeading,
    /// A "Contents" / "Index" title line.
    TocTitle,
    /// A line ending in dot leaders or wide spacing before a page number.
    TocEntry,
    /// A line consisting only of a page number ("12", "- 12 -", "Page 3 of 9").
    PageNumber,
}

impl PatternCategory {
    /// Categories that mark the start of a chapter-like section.
    pub fn is_heading(self) -> bool {
        matches!(
            self,
            Self::Chapter
                | Self::Part
                | Self::Section
                | Self::Introduction
                | Self::Preface
                | Self::Appendix
                | Self::NumericHeading
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Chapter => "chapter",
            Self::Part => "part",
            Self::Section => "section",
            Self::Introduction => "introduction",
            Self::Preface => "preface",
            Self::Appendix => "appendix",
            Self::NumericHeading => "numeric-heading",
            Self::TocTitle => "toc-title",
            Self::TocEntry => "toc-entry",
            Self::PageNumber => "page-number",
        }
    }
}

impl std::fmt::Display for PatternCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One regular expression in the table.
///
/// Patterns are matched against a single trimmed line of page text and should
/// be anchored with `^` where they describe whole lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternEntry {
    pub category: PatternCategory,
    /// BCP 47-ish tag, or `"*"` for language-neutral patterns.
    pub locale: String,
    pub pattern: String,
}

impl PatternEntry {
    pub fn new(category: PatternCategory, locale: &str, pattern: &str) -> Self {
        Self {
            category,
            locale: locale.to_owned(),
            pattern: pattern.to_owned(),
        }
    }
}

/// A versioned, serialisable list of patterns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternTable {
    pub version: u32,
    pub entries: Vec<PatternEntry>,
}

impl PatternTable {
    /// The table shipped with Seitenwerk: Latin, Cyrillic and CJK scripts.
    pub fn builtin() -> Self {
        use PatternCategory::*;

        let rows: &[(PatternCategory, &str, &str)] = &[
            // -- Chapters --
            (Chapter, "en", r"(?i)^chapter\s+(\d+|[ivxlcdm]+|one|two|three|four|five|six|seven|eight|nine|ten|eleven|twelve)\b"),
            (Chapter, "de", r"(?i)^kapitel\s+(\d+|[ivxlcdm]+)\b"),
            (Chapter, "fr", r"(?i)^chapitre\s+(\d+|[ivxlcdm]+|premier|premi[eè]re)\b"),
            (Chapter, "es", r"(?i)^cap[ií]tulo\s+(\d+|[ivxlcdm]+|primero|uno)\b"),
            (Chapter, "it", r"(?i)^capitolo\s+(\d+|[ivxlcdm]+)\b"),
            (Chapter, "nl", r"(?i)^hoofdstuk\s+(\d+|[ivxlcdm]+)\b"),
            (Chapter, "pl", r"(?i)^rozdzia[łl]\s+(\d+|[ivxlcdm]+)\b"),
            (Chapter, "ru", r"(?i)^глава\s+(\d+|[ivxlcdm]+|[а-яё]+)"),
            (Chapter, "uk", r"(?i)^розділ\s+(\d+|[ivxlcdm]+)"),
            (Chapter, "zh", r"^第\s*[0-9０-９一二三四五六七八九十百千零〇]+\s*[章節节回]"),
            (Chapter, "ko", r"^제\s*[0-9]+\s*장"),
            // -- Parts --
            (Part, "en", r"(?i)^part\s+(\d+|[ivxlcdm]+|one|two|three|four|five|six|seven|eight|nine|ten)\b"),
            (Part, "de", r"(?i)^teil\s+(\d+|[ivxlcdm]+)\b"),
            (Part, "fr", r"(?i)^partie\s+(\d+|[ivxlcdm]+)\b"),
            (Part, "es", r"(?i)^parte\s+(\d+|[ivxlcdm]+)\b"),
            (Part, "ru", r"(?i)^часть\s+(\d+|[ivxlcdm]+|[а-яё]+)"),
            (Part, "zh", r"^第\s*[0-9０-９一二三四五六七八九十百千零〇]+\s*[部篇編编]"),
            // -- Sections --
            (Section, "en", r"(?i)^section\s+\d+(\.\d+)*\b"),
            (Section, "de", r"(?i)^abschnitt\s+\d+"),
            (Section, "es", r"(?i)^secci[oó]n\s+\d+"),
            (Section, "it", r"(?i)^sezione\s+\d+"),
            (Section, "ru", r"(?i)^раздел\s+\d+"),
            // -- Front and back matter --
            (Introduction, "*", r"(?i)^(introduction|einleitung|einführung|introducción|introduzione|introdução|inleiding|wstęp|введение|вступ)\s*$"),
            (Introduction, "cjk", r"^(はじめに|序論|序章|引言|导言|導言|서론|머리말)\s*$"),
            (Preface, "*", r"(?i)^(preface|foreword|prologue|vorwort|préface|avant-propos|prefacio|prólogo|prefazione|prefácio|voorwoord|przedmowa|предисловие|передмова)\s*$"),
            (Preface, "cjk", r"^(前言|序言|まえがき|서문)\s*$"),
            (Appendix, "*", r"(?i)^(appendix|anhang|annexe|ap[eé]ndice|appendice|bijlage|za[łl][aą]cznik|приложение|додаток)\b"),
            (Appendix, "cjk", r"^(付録|附录|附錄|부록)"),
            // "1. Introduction", "2.3 Related Work"
            (NumericHeading, "*", r"^\d{1,2}(\.\d{1,2}){0,2}\.?\s+\p{Lu}[^.]{2,80}$"),
            // -- Table of contents --
            (TocTitle, "en", r"(?i)^(table of contents|contents|index)\s*:?$"),
            (TocTitle, "de", r"(?i)^(inhaltsverzeichnis|inhalt)\s*:?$"),
            (TocTitle, "fr", r"(?i)^(table des mati[eè]res|sommaire)\s*:?$"),
            (TocTitle, "es", r"(?i)^([ií]ndice|contenido|sum[aá]rio)\s*:?$"),
            (TocTitle, "it", r"(?i)^(indice|sommario)\s*:?$"),
            (TocTitle, "nl", r"(?i)^inhoud(sopgave)?\s*:?$"),
            (TocTitle, "pl", r"(?i)^spis\s+tre[śs]ci\s*:?$"),
            (TocTitle, "ru", r"(?i)^(содержание|оглавление|зміст)\s*:?$"),
            (TocTitle, "cjk", r"^(目次|目录|目錄|차례|목차)\s*$"),
            (TocEntry, "*", r"(\.{3,}|…+|·{3,})\s*\d{1,4}\s*$"),
            (TocEntry, "*", r"\S\s{3,}\d{1,4}\s*$"),
            // -- Page numbers --
            (PageNumber, "*", r"^[-–—]?\s*\d{1,4}\s*[-–—]?$"),
            (PageNumber, "*", r"^\d{1,4}\s*/\s*\d{1,4}$"),
            (PageNumber, "*", r"(?i)^(page|p\.|seite|s\.|página|pág\.|pagina|pag\.|страница|стр\.)\s*\d{1,4}(\s*(of|/|von|de|di|из)\s*\d{1,4})?$"),
            (PageNumber, "*", r"(?i)^x{0,3}(ix|iv|v?i{0,3})$"),
        ];

        Self {
            version: BUILTIN_TABLE_VERSION,
            entries: rows
                .iter()
                .map(|(category, locale, pattern)| PatternEntry::new(*category, locale, pattern))
                .collect(),
        }
    }

    /// Parse a table from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a table from a JSON file.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let data = std::fs::read_to_string(path.as_ref())?;
        let table = Self::from_json(&data)?;
        info!(
            version = table.version,
            entries = table.entries.len(),
            "Pattern table loaded"
        );
        Ok(table)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Append entries from another table, keeping this table's version.
    pub fn extend(&mut self, other: PatternTable) {
        self.entries.extend(other.entries);
    }
}

impl Default for PatternTable {
    fn default() -> Self {
        Self::builtin()
    }
}

/// The compiled, ready-to-match form of a `PatternTable`.
#[derive(Debug, Clone)]
pub struct CompiledPatterns {
    patterns: Vec<(PatternCategory, Regex)>,
}

impl CompiledPatterns {
    /// Compile every entry. Fails on the first invalid regular expression.
    pub fn compile(table: &PatternTable) -> Result<Self> {
        let patterns = table
            .entries
            .iter()
            .map(|entry| {
                Regex::new(&entry.pattern)
                    .map(|regex| (entry.category, regex))
                    .map_err(|err| SeitenwerkError::InvalidPattern {
                        category: entry.category.to_string(),
                        pattern: entry.pattern.clone(),
                        reason: err.to_string(),
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        debug!(count = patterns.len(), version = table.version, "Patterns compiled");
        Ok(Self { patterns })
    }

    /// First category matching `line` among the given predicate's categories.
    fn find(&self, line: &str, wanted: impl Fn(PatternCategory) -> bool) -> Option<PatternCategory> {
        self.patterns
            .iter()
            .filter(|(category, _)| wanted(*category))
            .find(|(_, regex)| regex.is_match(line))
            .map(|(category, _)| *category)
    }

    /// The heading category of a line, if it looks like a section start.
    pub fn heading_category(&self, line: &str) -> Option<PatternCategory> {
        self.find(line, PatternCategory::is_heading)
    }

    pub fn is_toc_title(&self, line: &str) -> bool {
        self.find(line, |c| c == PatternCategory::TocTitle).is_some()
    }

    pub fn is_toc_entry(&self, line: &str) -> bool {
        self.find(line, |c| c == PatternCategory::TocEntry).is_some()
    }

    pub fn is_page_number(&self, line: &str) -> bool {
        self.find(line, |c| c == PatternCategory::PageNumber).is_some()
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}
