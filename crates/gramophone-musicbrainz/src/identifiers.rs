// SPDX-License-Identifier: GPL-3.0-or-later

//! ISRC and ISWC validation.
//!
//! Codes are normalized before matching: hyphens, dots and spaces are
//! stripped and the result is uppercased, so `T-070.080.286-3` and
//! `t0700802863` are the same ISWC. The service performs its own validation;
//! these checks only avoid a round trip for input that can never match.

use crate::error::{MusicBrainzError, Result};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

lazy_static! {
    // country (2) + registrant (3) + year (2) + designation (5)
    static ref ISRC_PATTERN: Regex =
        Regex::new(r"^[A-Z]{2}[A-Z0-9]{3}[0-9]{2}[0-9]{5}$").expect("ISRC regex is valid");
    // "T" + 9 digits + check digit
    static ref ISWC_PATTERN: Regex =
        Regex::new(r"^T[0-9]{9}[0-9]$").expect("ISWC regex is valid");
}

/// Strip separators (`-`, `.`, ` `) and uppercase.
pub fn normalize(input: &str) -> String {
    input
        .chars()
        .filter(|c| !matches!(c, '-' | '.' | ' '))
        .collect::<String>()
        .to_uppercase()
}

pub fn is_valid_isrc(input: &str) -> bool {
    ISRC_PATTERN.is_match(&normalize(input))
}

pub fn is_valid_iswc(input: &str) -> bool {
    ISWC_PATTERN.is_match(&normalize(input))
}

fn parse_code(input: &str, kind: &'static str, pattern: &Regex) -> Result<String> {
    if input.is_empty() {
        return Err(MusicBrainzError::EmptyIdentifier(kind));
    }

    let normalized = normalize(input);
    if !pattern.is_match(&normalized) {
        return Err(MusicBrainzError::InvalidFormat {
            kind,
            value: input.to_string(),
        });
    }

    Ok(normalized)
}

/// A validated, normalized International Standard Recording Code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Isrc(String);

impl Isrc {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Isrc {
    type Err = MusicBrainzError;

    fn from_str(s: &str) -> Result<Self> {
        parse_code(s, "ISRC", &ISRC_PATTERN).map(Self)
    }
}

impl TryFrom<String> for Isrc {
    type Error = MusicBrainzError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Isrc> for String {
    fn from(value: Isrc) -> Self {
        value.0
    }
}

impl fmt::Display for Isrc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A validated, normalized International Standard Musical Work Code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Iswc(String);

impl Iswc {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Iswc {
    type Err = MusicBrainzError;

    fn from_str(s: &str) -> Result<Self> {
        parse_code(s, "ISWC", &ISWC_PATTERN).map(Self)
    }
}

impl TryFrom<String> for Iswc {
    type Error = MusicBrainzError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Iswc> for String {
    fn from(value: Iswc) -> Self {
        value.0
    }
}

impl fmt::Display for Iswc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
