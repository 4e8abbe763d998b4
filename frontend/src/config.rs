use serde::{Deserialize, Serialize};

use crate::error::ThemeError;

/// Name of the optional global object pages can set before the module loads:
/// `window.__THEME_TOGGLE_CONFIG = { storage_key: "..." }`.
pub const WINDOW_CONFIG_KEY: &str = "__THEME_TOGGLE_CONFIG";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    pub storage_key: String,
    pub attribute: String,
    pub event_name: String,
    pub toggle_selector: String,
    pub light_icon_selector: String,
    pub dark_icon_selector: String,
    pub dimmed_opacity: f64,
    pub pressed_scale: f64,
    pub press_duration_ms: u32,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            storage_key: "theme".into(),
            attribute: "data-theme".into(),
            event_name: "themechange".into(),
            toggle_selector: "#theme-toggle".into(),
            light_icon_selector: ".theme-icon-light".into(),
            dark_icon_selector: ".theme-icon-dark".into(),
            dimmed_opacity: 0.5,
            pressed_scale: 0.95,
            press_duration_ms: 100,
        }
    }
}

impl ThemeConfig {
    pub fn from_json(raw: &str) -> Result<Self, ThemeError> {
        let cfg: ThemeConfig =
            serde_json::from_str(raw).map_err(|e| ThemeError::Config(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ThemeError> {
        let names = [
            ("storage_key", &self.storage_key),
            ("attribute", &self.attribute),
            ("event_name", &self.event_name),
        ];
        if let Some((field, _)) = names.iter().find(|(_, v)| v.trim().is_empty()) {
            return Err(ThemeError::Config(format!("{} must not be empty", field)));
        }
        if !(0.0..=1.0).contains(&self.dimmed_opacity) {
            return Err(ThemeError::Config(format!(
                "dimmed_opacity must be within 0..=1, got {}",
                self.dimmed_opacity
            )));
        }
        if self.pressed_scale <= 0.0 {
            return Err(ThemeError::Config(format!(
                "pressed_scale must be positive, got {}",
                self.pressed_scale
            )));
        }
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
mod wasm {
    use super::{ThemeConfig, WINDOW_CONFIG_KEY};
    use std::sync::OnceLock;

    // Snapshot is taken once; the page cannot reconfigure a running controller.
    static CONFIG: OnceLock<ThemeConfig> = OnceLock::new();

    fn read_window_config() -> Option<String> {
        let w = web_sys::window()?;
        let any = js_sys::Reflect::get(&w, &WINDOW_CONFIG_KEY.into()).ok()?;
        if any.is_undefined() || any.is_null() {
            return None;
        }
        js_sys::JSON::stringify(&any).ok()?.as_string()
    }

    fn load() -> ThemeConfig {
        match read_window_config() {
            Some(raw) => ThemeConfig::from_json(&raw).unwrap_or_else(|err| {
                log::warn!("{}; falling back to defaults", err);
                ThemeConfig::default()
            }),
            None => ThemeConfig::default(),
        }
    }

    pub fn current() -> ThemeConfig {
        CONFIG.get_or_init(load).clone()
    }
}

#[cfg(target_arch = "wasm32")]
pub use wasm::current;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_page_contract() {
        let cfg = ThemeConfig::default();
        assert_eq!(cfg.storage_key, "theme");
        assert_eq!(cfg.attribute, "data-theme");
        assert_eq!(cfg.event_name, "themechange");
        assert_eq!(cfg.press_duration_ms, 100);
        assert_eq!(cfg.dimmed_opacity, 0.5);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let cfg = ThemeConfig::from_json(r#"{"storage_key":"site-theme","press_duration_ms":250}"#)
            .unwrap();
        assert_eq!(cfg.storage_key, "site-theme");
        assert_eq!(cfg.press_duration_ms, 250);
        assert_eq!(cfg.attribute, "data-theme");
        assert_eq!(cfg.toggle_selector, "#theme-toggle");
    }

    #[test]
    fn rejects_empty_names() {
        let err = ThemeConfig::from_json(r#"{"event_name":"  "}"#).unwrap_err();
        assert_eq!(
            err,
            ThemeError::Config("event_name must not be empty".into())
        );
    }

    #[test]
    fn rejects_out_of_range_values() {
        assert!(ThemeConfig::from_json(r#"{"dimmed_opacity":1.5}"#).is_err());
        assert!(ThemeConfig::from_json(r#"{"pressed_scale":0}"#).is_err());
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(matches!(
            ThemeConfig::from_json("{not json"),
            Err(ThemeError::Config(_))
        ));
    }
}
