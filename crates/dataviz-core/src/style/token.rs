//! Style tokens and their categories

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;
use crate::highlight::{Method, Severity};

/// Rendering-style token carried in `Highlight::suggested_style`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StyleToken {
    HaloRing,
    ColorShift,
    SizeBoost,
    Glow,
    AnnotationArrow,
    BandShade,
    MarkerChange,
    /// Expands to an ordered list of component styles
    Combo,
}

/// Family a token belongs to; used to pick a fallback for unknown tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StyleCategory {
    Marker,
    Annotation,
    Band,
}

impl StyleCategory {
    /// Default token of the category
    pub fn default_token(&self) -> StyleToken {
        match self {
            StyleCategory::Marker => StyleToken::ColorShift,
            StyleCategory::Annotation => StyleToken::AnnotationArrow,
            StyleCategory::Band => StyleToken::BandShade,
        }
    }

    /// Guess the category of an unrecognized token from its spelling
    pub fn guess(token: &str) -> StyleCategory {
        let token = token.to_ascii_lowercase();
        if token.contains("band") || token.contains("span") || token.contains("shade") {
            StyleCategory::Band
        } else if ["marker", "ring", "halo", "color", "glow", "size", "dot"]
            .iter()
            .any(|hint| token.contains(hint))
        {
            StyleCategory::Marker
        } else {
            StyleCategory::Annotation
        }
    }
}

impl StyleToken {
    /// All concrete (non-combo) tokens
    pub const CONCRETE: [StyleToken; 7] = [
        StyleToken::HaloRing,
        StyleToken::ColorShift,
        StyleToken::SizeBoost,
        StyleToken::Glow,
        StyleToken::AnnotationArrow,
        StyleToken::BandShade,
        StyleToken::MarkerChange,
    ];

    /// Get the token spelling
    pub fn as_str(&self) -> &'static str {
        match self {
            StyleToken::HaloRing => "halo_ring",
            StyleToken::ColorShift => "color_shift",
            StyleToken::SizeBoost => "size_boost",
            StyleToken::Glow => "glow",
            StyleToken::AnnotationArrow => "annotation_arrow",
            StyleToken::BandShade => "band_shade",
            StyleToken::MarkerChange => "marker_change",
            StyleToken::Combo => "combo",
        }
    }

    /// Category of the token; `Combo` counts as an annotation
    pub fn category(&self) -> StyleCategory {
        match self {
            StyleToken::HaloRing
            | StyleToken::ColorShift
            | StyleToken::SizeBoost
            | StyleToken::Glow
            | StyleToken::MarkerChange => StyleCategory::Marker,
            StyleToken::AnnotationArrow | StyleToken::Combo => StyleCategory::Annotation,
            StyleToken::BandShade => StyleCategory::Band,
        }
    }

    /// Token a detector suggests for a highlight of the given method and severity
    pub fn suggested_for(method: Method, severity: Severity) -> StyleToken {
        match (method, severity) {
            (Method::ZScore, Severity::High) => StyleToken::HaloRing,
            (Method::ZScore, _) => StyleToken::ColorShift,
            (Method::Iqr, _) | (Method::MinMax, _) => StyleToken::AnnotationArrow,
            (Method::Changepoint, _) => StyleToken::BandShade,
        }
    }
}

impl fmt::Display for StyleToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StyleToken {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StyleToken::CONCRETE
            .into_iter()
            .chain(std::iter::once(StyleToken::Combo))
            .find(|t| t.as_str() == s.trim())
            .ok_or_else(|| ConfigError::UnknownStyle(s.to_string()))
    }
}
