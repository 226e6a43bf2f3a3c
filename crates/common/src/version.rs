//! Kubernetes API versions (`v1`, `v1beta2`, `v2alpha1`)

use crate::{ReferenceError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Maturity stage of an API version
///
/// Variants are declared from least to most mature so the derived ordering
/// ranks `GA > Beta > Alpha`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stage {
    Alpha,
    Beta,
    GA,
}

impl Stage {
    fn as_str(&self) -> &'static str {
        match self {
            Stage::Alpha => "alpha",
            Stage::Beta => "beta",
            Stage::GA => "",
        }
    }
}

/// A parsed Kubernetes API version
///
/// The derived ordering compares the major number, then the stage, then the
/// stage number, which is the Kubernetes notion of "newer".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct APIVersion {
    major: u32,
    stage: Stage,
    stage_number: Option<u32>,
}

impl APIVersion {
    /// Build a version, checking that only non-GA stages carry a stage number
    pub fn new(major: u32, stage: Stage, stage_number: Option<u32>) -> Result<Self> {
        let version = Self {
            major,
            stage,
            stage_number,
        };
        match (stage, stage_number) {
            (Stage::GA, None) | (Stage::Alpha, Some(_)) | (Stage::Beta, Some(_)) => Ok(version),
            _ => Err(ReferenceError::MalformedVersion(format!(
                "v{}{} (stage number {:?})",
                major,
                stage.as_str(),
                stage_number
            ))),
        }
    }

    /// Parse a version string of the form `v<N>[(alpha|beta)<M>]`
    ///
    /// # Examples
    /// ```
    /// use k8s_api_reference_common::{APIVersion, Stage};
    ///
    /// let version = APIVersion::parse("v2beta1").unwrap();
    /// assert_eq!(version.major(), 2);
    /// assert_eq!(version.stage(), Stage::Beta);
    /// assert_eq!(version.stage_number(), Some(1));
    /// assert!(APIVersion::parse("v1gamma1").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self> {
        let malformed = || ReferenceError::MalformedVersion(s.to_string());

        let rest = s.strip_prefix('v').ok_or_else(malformed)?;
        let digits_end = rest
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(rest.len());
        let (major, suffix) = rest.split_at(digits_end);
        let major = parse_number(major).ok_or_else(malformed)?;

        if suffix.is_empty() {
            return Ok(Self {
                major,
                stage: Stage::GA,
                stage_number: None,
            });
        }

        let (stage, number) = if let Some(number) = suffix.strip_prefix("alpha") {
            (Stage::Alpha, number)
        } else if let Some(number) = suffix.strip_prefix("beta") {
            (Stage::Beta, number)
        } else {
            return Err(malformed());
        };

        let stage_number = parse_number(number).ok_or_else(malformed)?;
        Ok(Self {
            major,
            stage,
            stage_number: Some(stage_number),
        })
    }

    pub fn major(&self) -> u32 {
        self.major
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn stage_number(&self) -> Option<u32> {
        self.stage_number
    }

    /// True if `self` is older than `other`
    pub fn less_than(&self, other: &APIVersion) -> bool {
        self < other
    }

    /// True if `self` supersedes `other` within the same major version
    pub fn replaces(&self, other: &APIVersion) -> bool {
        if self.major != other.major {
            return false;
        }
        self.stage > other.stage
            || (self.stage == other.stage && self.stage_number > other.stage_number)
    }
}

/// Parse a non-empty run of ASCII digits
/// Decimal number without sign or leading zeros, so that it prints back unchanged
fn parse_number(s: &str) -> Option<u32> {
    if s.is_empty() || !s.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    if s.len() > 1 && s.starts_with('0') {
        return None;
    }
    s.parse().ok()
}

impl fmt::Display for APIVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}{}", self.major, self.stage.as_str())?;
        if let Some(number) = self.stage_number {
            write!(f, "{}", number)?;
        }
        Ok(())
    }
}

impl FromStr for APIVersion {
    type Err = ReferenceError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for APIVersion {
    type Error = ReferenceError;

    fn try_from(s: String) -> Result<Self> {
        Self::parse(&s)
    }
}

impl From<APIVersion> for String {
    fn from(version: APIVersion) -> Self {
        version.to_string()
    }
}
