// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Content fingerprinting for duplicate detection.
//
// Text is lower-cased, whitespace runs collapse to one space, and only the
// first `max_chars` characters take part. Pages that differ only beyond that
// prefix therefore share a fingerprint. These digests are compared for
// equality only and carry no security guarantee.

use seitenwerk_core::FingerprintAlgorithm;
use sha2::{Digest, Sha256};

/// Number of digest bytes kept from SHA-256.
const SHA256_PREFIX_BYTES: usize = 8;

/// Lower-case, collapse whitespace, trim, and truncate to `max_chars`.
pub fn normalize_text(text: &str, max_chars: usize) -> String {
    let lowered = text.to_lowercase();
    let collapsed = lowered.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed.chars().take(max_chars).collect()
}

/// Fingerprint raw page text.
pub fn fingerprint(text: &str, algorithm: FingerprintAlgorithm, max_chars: usize) -> String {
    let normalized = normalize_text(text, max_chars);
    match algorithm {
        FingerprintAlgorithm::Sha256 => sha256_prefix(&normalized),
        FingerprintAlgorithm::Rolling => rolling_hash(&normalized),
    }
}

/// SHA-256 truncated to eight bytes, lowercase hex.
fn sha256_prefix(normalized: &str) -> String {
    let digest = Sha256::digest(normalized.as_bytes());
    hex::encode(&digest[..SHA256_PREFIX_BYTES])
}

/// 32-bit `h * 31 + c` hash over UTF-16 code units, as eight hex digits.
fn rolling_hash(normalized: &str) -> String {
    let hash = normalized.encode_utf16().fold(0i32, |hash, unit| {
        hash.wrapping_shl(5)
            .wrapping_sub(hash)
            .wrapping_add(i32::from(unit))
    });
    format!("{:08x}", hash as u32)
}
