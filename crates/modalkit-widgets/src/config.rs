#![forbid(unsafe_code)]

//! Surface configuration loaded from TOML.
//!
//! Every table is optional; missing tables and missing keys fall back to the
//! surface defaults.
//!
//! ```toml
//! [bottom_sheet]
//! velocity_threshold = 800.0
//! heights.portrait = { unit = "fraction", min = 0.3, ideal = 0.5, max = 0.95 }
//! heights.landscape = { min = 0.9, ideal = 0.9, max = 0.9 }
//!
//! [notification]
//! timeout = 3000
//! ```
//!
//! Durations are integer milliseconds.

use std::path::Path;

use modalkit_core::ConfigError;

use crate::surface::{AlertConfig, BottomSheetConfig, ModalConfig, NotificationConfig, SideBarConfig};

/// Configuration for every built-in surface.
#[derive(Debug, Clone, Copy, PartialEq, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SurfaceConfigs {
    pub alert: AlertConfig,
    pub modal: ModalConfig,
    pub bottom_sheet: BottomSheetConfig,
    pub side_bar: SideBarConfig,
    pub notification: NotificationConfig,
}

impl SurfaceConfigs {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let configs: Self = toml::from_str(source).map_err(|err| ConfigError::Parse(err.to_string()))?;
        configs.validate()?;
        Ok(configs)
    }

    /// Read, parse, and validate a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)
            .map_err(|err| ConfigError::Parse(format!("{}: {err}", path.display())))?;
        tracing::debug!(path = %path.display(), "loading surface configuration");
        Self::from_toml_str(&source)
    }

    /// Serialize to TOML.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string(self).map_err(|err| ConfigError::Parse(err.to_string()))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.alert.validate()?;
        self.modal.validate()?;
        self.bottom_sheet.validate()?;
        self.side_bar.validate()?;
        self.notification.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gesture::{DetentUnit, Detents};
    use crate::modal::DismissMethods;
    use crate::surface::NotificationEdge;
    use modalkit_core::{Duration, Edge};

    #[test]
    fn empty_document_is_all_defaults() {
        assert_eq!(SurfaceConfigs::from_toml_str("").unwrap(), SurfaceConfigs::default());
    }

    #[test]
    fn partial_tables_override_defaults() {
        let configs = SurfaceConfigs::from_toml_str(
            r#"
            [bottom_sheet]
            velocity_threshold = 800.0
            heights.portrait = { unit = "points", min = 100.0, ideal = 300.0, max = 600.0 }
            heights.landscape = { min = 0.9, ideal = 0.9, max = 0.9 }

            [side_bar]
            edge = "trailing"

            [notification]
            edge = "bottom"
            timeout = 3000
            "#,
        )
        .unwrap();

        let sheet = &configs.bottom_sheet;
        assert_eq!(sheet.velocity_threshold, 800.0);
        assert_eq!(sheet.heights.portrait, Detents::points(100.0, 300.0, 600.0));
        assert_eq!(sheet.heights.landscape.unit, DetentUnit::Fraction);
        assert_eq!(
            sheet.dismiss_methods,
            DismissMethods::TRAILING_BUTTON | DismissMethods::PULL_DOWN
        );
        assert_eq!(configs.side_bar.edge, Edge::Trailing);
        assert_eq!(configs.notification.edge, NotificationEdge::Bottom);
        assert_eq!(configs.notification.timeout, Duration::from_secs(3));
        assert_eq!(configs.alert, crate::surface::AlertConfig::default());
    }

    #[test]
    fn misordered_detents_are_rejected() {
        let err = SurfaceConfigs::from_toml_str(
            r#"
            [bottom_sheet]
            heights.portrait = { min = 0.8, ideal = 0.5, max = 0.9 }
            heights.landscape = { min = 0.9, ideal = 0.9, max = 0.9 }
            "#,
        )
        .unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidDetents {
                min: 0.8,
                ideal: 0.5,
                max: 0.9
            }
        );
    }

    #[test]
    fn malformed_document_is_a_parse_error() {
        let err = SurfaceConfigs::from_toml_str("[bottom_sheet\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file_is_a_parse_error() {
        let err = SurfaceConfigs::load("/nonexistent/modalkit.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(msg) if msg.contains("modalkit.toml")));
    }

    #[test]
    fn defaults_survive_a_toml_round_trip() {
        let text = SurfaceConfigs::default().to_toml_string().unwrap();
        assert_eq!(SurfaceConfigs::from_toml_str(&text).unwrap(), SurfaceConfigs::default());
    }
}
