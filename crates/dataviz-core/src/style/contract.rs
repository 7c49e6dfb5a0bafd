//! The highlight style contract
//!
//! Maps every style token to a rendering primitive and its default visual
//! parameters. The contract is built once (built-in defaults, optionally
//! overlaid by a JSON or TOML file) and then passed by reference to every
//! consumer; nothing mutates it afterwards.
//!
//! Style files use the same shape the contract serializes to:
//!
//! ```json
//! {
//!   "highlights": {
//!     "halo_ring": { "color": "#0072B2", "alpha": 0.6 },
//!     "combo": { "styles": ["glow", "annotation_arrow"] }
//!   }
//! }
//! ```
//!
//! The `highlights` wrapper is optional.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use super::token::{StyleCategory, StyleToken};
use crate::color::{self, Color};
use crate::error::{ConfigError, ConfigResult, VizResult};

/// Drawing primitive a renderer uses for a style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StylePrimitive {
    /// Unfilled ring around the point
    OpenRing,
    /// Point redrawn in the accent color
    FilledMarker,
    /// Point redrawn larger
    ScaledMarker,
    /// Large translucent disc behind the point
    GlowMarker,
    /// Offset text with an arrow pointing at the point
    Annotation,
    /// Translucent vertical band centred on the point
    VerticalBand,
    /// Point redrawn with a different marker glyph
    MarkerGlyph,
}

/// Visual parameters of one style
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleSpec {
    pub primitive: StylePrimitive,
    pub color: Color,
    pub alpha: f32,
    /// Drawing order; higher is drawn on top
    pub z_order: i32,
    /// Marker area in points²
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size_multiplier: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linewidth: Option<f32>,
    /// Text offset in points
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<[f32; 2]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fontsize: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arrowstyle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connectionstyle: Option<String>,
    /// Band width in x units
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marker: Option<String>,
}

impl StyleSpec {
    fn new(primitive: StylePrimitive, color: Color, alpha: f32, z_order: i32) -> Self {
        Self {
            primitive,
            color,
            alpha,
            z_order,
            size: None,
            size_multiplier: None,
            linewidth: None,
            offset: None,
            fontsize: None,
            arrowstyle: None,
            connectionstyle: None,
            width: None,
            marker: None,
        }
    }
}

/// Partial style read from a style file; absent fields keep their defaults
#[derive(Debug, Clone, Default, Deserialize)]
struct StyleOverride {
    color: Option<Color>,
    alpha: Option<f32>,
    z_order: Option<i32>,
    size: Option<f32>,
    size_multiplier: Option<f32>,
    linewidth: Option<f32>,
    offset: Option<[f32; 2]>,
    fontsize: Option<f32>,
    arrowstyle: Option<String>,
    connectionstyle: Option<String>,
    width: Option<f32>,
    marker: Option<String>,
}

impl StyleOverride {
    fn apply_to(self, spec: &mut StyleSpec) {
        if let Some(color) = self.color {
            spec.color = color;
        }
        if let Some(alpha) = self.alpha {
            spec.alpha = alpha;
        }
        if let Some(z_order) = self.z_order {
            spec.z_order = z_order;
        }
        spec.size = self.size.or(spec.size.take());
        spec.size_multiplier = self.size_multiplier.or(spec.size_multiplier.take());
        spec.linewidth = self.linewidth.or(spec.linewidth.take());
        spec.offset = self.offset.or(spec.offset.take());
        spec.fontsize = self.fontsize.or(spec.fontsize.take());
        spec.arrowstyle = self.arrowstyle.or(spec.arrowstyle.take());
        spec.connectionstyle = self.connectionstyle.or(spec.connectionstyle.take());
        spec.width = self.width.or(spec.width.take());
        spec.marker = self.marker.or(spec.marker.take());
    }
}

#[derive(Debug, Deserialize)]
struct ComboOverride {
    styles: Vec<String>,
}

/// Immutable mapping from style tokens to rendering instructions
#[derive(Debug, Clone, PartialEq)]
pub struct StyleContract {
    styles: BTreeMap<StyleToken, StyleSpec>,
    combo: Vec<StyleToken>,
}

impl StyleContract {
    /// The built-in contract
    pub fn builtin() -> Self {
        let mut styles = BTreeMap::new();

        let mut halo = StyleSpec::new(StylePrimitive::OpenRing, color::accent(), 0.4, 10);
        halo.size_multiplier = Some(3.0);
        halo.linewidth = Some(2.0);
        styles.insert(StyleToken::HaloRing, halo);

        let mut shift = StyleSpec::new(StylePrimitive::FilledMarker, color::accent(), 1.0, 10);
        shift.size = Some(80.0);
        styles.insert(StyleToken::ColorShift, shift);

        let mut boost = StyleSpec::new(StylePrimitive::ScaledMarker, color::accent(), 0.8, 10);
        boost.size_multiplier = Some(2.5);
        styles.insert(StyleToken::SizeBoost, boost);

        let mut glow = StyleSpec::new(StylePrimitive::GlowMarker, color::glow_yellow(), 0.3, 3);
        glow.size_multiplier = Some(5.0);
        styles.insert(StyleToken::Glow, glow);

        let mut arrow =
            StyleSpec::new(StylePrimitive::Annotation, color::annotation_grey(), 1.0, 15);
        arrow.offset = Some([30.0, 30.0]);
        arrow.fontsize = Some(9.0);
        arrow.arrowstyle = Some("->".to_string());
        arrow.connectionstyle = Some("arc3,rad=0.2".to_string());
        styles.insert(StyleToken::AnnotationArrow, arrow);

        let mut band = StyleSpec::new(StylePrimitive::VerticalBand, color::accent(), 0.1, 1);
        band.width = Some(0.5);
        styles.insert(StyleToken::BandShade, band);

        let mut glyph = StyleSpec::new(StylePrimitive::MarkerGlyph, color::accent(), 1.0, 10);
        glyph.size_multiplier = Some(1.8);
        glyph.marker = Some("D".to_string());
        styles.insert(StyleToken::MarkerChange, glyph);

        Self {
            styles,
            combo: vec![StyleToken::ColorShift, StyleToken::AnnotationArrow],
        }
    }

    /// Load the built-in contract overlaid with a JSON or TOML style file
    pub fn from_file(path: impl AsRef<Path>) -> VizResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(dataviz_io::IoError::FileNotFound(path.display().to_string()).into());
        }
        let text = fs::read_to_string(path)?;
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();

        let document: Value = match extension.as_str() {
            "json" => serde_json::from_str(&text)
                .map_err(|e| ConfigError::StyleFile(e.to_string()))?,
            "toml" => {
                let parsed: toml::Value =
                    toml::from_str(&text).map_err(|e| ConfigError::StyleFile(e.to_string()))?;
                serde_json::to_value(parsed).map_err(|e| ConfigError::StyleFile(e.to_string()))?
            }
            other => {
                return Err(ConfigError::StyleFile(format!(
                    "unsupported style file extension '{}' (expected json or toml)",
                    other
                ))
                .into())
            }
        };

        let contract = Self::with_overrides(&document)?;
        tracing::debug!(path = %path.display(), "loaded style overrides");
        Ok(contract)
    }

    /// Build a contract from the built-in defaults and an override document
    pub fn with_overrides(document: &Value) -> ConfigResult<Self> {
        let mut contract = Self::builtin();
        contract.apply_document(document)?;
        Ok(contract)
    }

    fn apply_document(&mut self, document: &Value) -> ConfigResult<()> {
        let section = match document.get("highlights") {
            Some(section) => section,
            None => document,
        };
        let Value::Object(entries) = section else {
            return Err(ConfigError::StyleFile(
                "expected an object of style entries".to_string(),
            ));
        };
        self.apply_entries(entries)
    }

    fn apply_entries(&mut self, entries: &Map<String, Value>) -> ConfigResult<()> {
        let accent_before = self.accent_color();
        let mut glyph_color_set = false;

        for (key, value) in entries {
            if key == StyleToken::Combo.as_str() {
                let combo: ComboOverride = serde_json::from_value(value.clone())
                    .map_err(|e| ConfigError::StyleFile(format!("combo: {}", e)))?;
                self.set_combo(&combo.styles);
                continue;
            }

            let Ok(token) = key.parse::<StyleToken>() else {
                tracing::warn!(style = %key, "ignoring unknown style in style file");
                continue;
            };
            let overrides: StyleOverride = serde_json::from_value(value.clone())
                .map_err(|e| ConfigError::StyleFile(format!("{}: {}", key, e)))?;
            if token == StyleToken::MarkerChange && overrides.color.is_some() {
                glyph_color_set = true;
            }
            if let Some(spec) = self.styles.get_mut(&token) {
                overrides.apply_to(spec);
            }
        }

        // The glyph marker follows the accent color unless given its own.
        let accent_after = self.accent_color();
        if let (false, Some(accent)) = (glyph_color_set, accent_after) {
            if accent_after != accent_before {
                if let Some(glyph) = self.styles.get_mut(&StyleToken::MarkerChange) {
                    glyph.color = accent;
                }
            }
        }
        Ok(())
    }

    fn accent_color(&self) -> Option<Color> {
        self.styles.get(&StyleToken::ColorShift).map(|s| s.color)
    }

    fn set_combo(&mut self, names: &[String]) {
        let tokens: Vec<StyleToken> = names
            .iter()
            .filter_map(|name| match name.parse::<StyleToken>() {
                Ok(StyleToken::Combo) | Err(_) => {
                    tracing::warn!(style = %name, "ignoring combo component");
                    None
                }
                Ok(token) => Some(token),
            })
            .collect();
        if !tokens.is_empty() {
            self.combo = tokens;
        }
    }

    /// Visual parameters of a concrete token
    pub fn spec(&self, token: StyleToken) -> Option<&StyleSpec> {
        self.styles.get(&token)
    }

    /// Component styles of the `combo` token, in drawing order
    pub fn combo(&self) -> &[StyleToken] {
        &self.combo
    }

    /// Resolve a suggested style into the concrete styles to draw
    ///
    /// `combo` expands to its components. An unknown token falls back to the
    /// default of its guessed category; resolution never fails.
    pub fn resolve(&self, token: &str) -> Vec<(StyleToken, &StyleSpec)> {
        let parsed = token.parse::<StyleToken>().unwrap_or_else(|_| {
            let fallback = StyleCategory::guess(token).default_token();
            tracing::warn!(token, fallback = %fallback, "unknown style token");
            fallback
        });

        let tokens = if parsed == StyleToken::Combo {
            self.combo.clone()
        } else {
            vec![parsed]
        };
        tokens
            .into_iter()
            .filter_map(|t| self.styles.get(&t).map(|spec| (t, spec)))
            .collect()
    }

    /// Serialize in the same shape style files use
    pub fn to_json(&self) -> Value {
        let mut entries = Map::new();
        for (token, spec) in &self.styles {
            entries.insert(
                token.as_str().to_string(),
                serde_json::to_value(spec).unwrap_or(Value::Null),
            );
        }
        entries.insert(
            StyleToken::Combo.as_str().to_string(),
            serde_json::json!({ "styles": self.combo.iter().map(|t| t.as_str()).collect::<Vec<_>>() }),
        );
        serde_json::json!({ "highlights": Value::Object(entries) })
    }
}

impl Default for StyleContract {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_builtin_covers_every_concrete_token() {
        let contract = StyleContract::builtin();
        for token in StyleToken::CONCRETE {
            assert!(contract.spec(token).is_some(), "missing {}", token);
        }
        assert_eq!(
            contract.combo(),
            &[StyleToken::ColorShift, StyleToken::AnnotationArrow]
        );
    }

    #[test]
    fn test_builtin_defaults() {
        let contract = StyleContract::builtin();
        let band = contract.spec(StyleToken::BandShade).unwrap();
        assert_eq!(band.primitive, StylePrimitive::VerticalBand);
        assert_eq!(band.width, Some(0.5));
        assert_eq!(band.color.to_hex(), "#D55E00");

        let arrow = contract.spec(StyleToken::AnnotationArrow).unwrap();
        assert_eq!(arrow.offset, Some([30.0, 30.0]));
        assert_eq!(arrow.arrowstyle.as_deref(), Some("->"));
    }

    #[test]
    fn test_resolve_combo_and_fallback() {
        let contract = StyleContract::builtin();

        let combo: Vec<StyleToken> = contract.resolve("combo").into_iter().map(|(t, _)| t).collect();
        assert_eq!(combo, vec![StyleToken::ColorShift, StyleToken::AnnotationArrow]);

        let band = contract.resolve("wide_band");
        assert_eq!(band[0].0, StyleToken::BandShade);

        let unknown = contract.resolve("sparkle");
        assert_eq!(unknown.len(), 1);
        assert_eq!(unknown[0].0, StyleToken::AnnotationArrow);
    }

    #[test]
    fn test_overrides_are_partial() {
        let doc = json!({
            "highlights": {
                "halo_ring": { "color": "#0072B2", "alpha": 0.6 },
                "combo": { "styles": ["glow", "combo", "annotation_arrow"] },
                "sparkle": { "color": "#000000" }
            }
        });
        let contract = StyleContract::with_overrides(&doc).unwrap();

        let halo = contract.spec(StyleToken::HaloRing).unwrap();
        assert_eq!(halo.color.to_hex(), "#0072B2");
        assert_eq!(halo.alpha, 0.6);
        assert_eq!(halo.linewidth, Some(2.0));
        assert_eq!(contract.combo(), &[StyleToken::Glow, StyleToken::AnnotationArrow]);
    }

    #[test]
    fn test_marker_change_follows_accent() {
        let doc = json!({ "color_shift": { "color": "#009E73" } });
        let contract = StyleContract::with_overrides(&doc).unwrap();
        assert_eq!(
            contract.spec(StyleToken::MarkerChange).unwrap().color.to_hex(),
            "#009E73"
        );
    }

    #[test]
    fn test_bad_override_is_an_error() {
        let doc = json!({ "band_shade": { "color": "not-a-color" } });
        assert!(StyleContract::with_overrides(&doc).is_err());
        assert!(StyleContract::with_overrides(&json!([1, 2])).is_err());
    }

    #[test]
    fn test_json_roundtrip_through_overrides() {
        let contract = StyleContract::builtin();
        let reloaded = StyleContract::with_overrides(&contract.to_json()).unwrap();
        assert_eq!(reloaded, contract);
    }

    #[test]
    fn test_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("styles.toml");
        fs::write(&path, "[band_shade]\nwidth = 0.8\nalpha = 0.2\n").unwrap();

        let contract = StyleContract::from_file(&path).unwrap();
        let band = contract.spec(StyleToken::BandShade).unwrap();
        assert_eq!(band.width, Some(0.8));
        assert_eq!(band.alpha, 0.2);
    }
}
