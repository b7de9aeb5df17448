use anyhow::{anyhow, bail, Result};
use serde::Deserialize;

/// Element id of the optional JSON block that overrides the defaults below.
pub const CONFIG_ELEMENT_ID: &str = "stud-config";

/// Site script settings.
///
/// Every field has a default, so pages that ship no config block (the common case)
/// get the stock behavior. A page may override any subset:
///
/// ```html
/// <script type="application/json" id="stud-config">{ "nav_breakpoint_px": 900 }</script>
/// ```
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Storage key for the light/dark preference
    pub theme_key: String,
    /// Storage key for the mobile drawer open flag
    pub menu_key: String,
    /// Viewports at or below this width are "narrow" (drawer layout)
    pub nav_breakpoint_px: u32,
    /// Delay before closing the drawer after one of its links is clicked
    pub nav_close_delay_ms: u32,
    /// Prefix for product and diagram images
    pub image_prefix: String,
    /// ScrollTrigger start position for reveal elements
    pub reveal_start: String,
    /// Console log level (error, warn, info, debug, trace)
    pub log_level: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            theme_key: "theme".to_string(),
            menu_key: "menuOpen".to_string(),
            nav_breakpoint_px: 760,
            nav_close_delay_ms: 50,
            image_prefix: "images/".to_string(),
            reveal_start: "top 85%".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl SiteConfig {
    /// Parse and validate a JSON override block.
    pub fn from_json(raw: &str) -> Result<Self> {
        let config: SiteConfig =
            serde_json::from_str(raw).map_err(|e| anyhow!("Invalid site config: {e}"))?;
        config.validate()?;
        Ok(config)
    }

    /// Like [`SiteConfig::from_json`], but never fails: a bad block is logged and
    /// the defaults are used instead.
    pub fn from_json_or_default(raw: Option<&str>) -> Self {
        match raw.map(str::trim).filter(|s| !s.is_empty()) {
            None => Self::default(),
            Some(raw) => Self::from_json(raw).unwrap_or_else(|e| {
                log::warn!("[stud] {e}; using defaults");
                Self::default()
            }),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.theme_key.trim().is_empty() {
            bail!("theme_key must not be empty");
        }
        if self.menu_key.trim().is_empty() {
            bail!("menu_key must not be empty");
        }
        if self.theme_key == self.menu_key {
            bail!("theme_key and menu_key must differ (both '{}')", self.theme_key);
        }
        if !(200..=4000).contains(&self.nav_breakpoint_px) {
            bail!(
                "nav_breakpoint_px must be between 200 and 4000 (got {})",
                self.nav_breakpoint_px
            );
        }
        if self.nav_close_delay_ms > 2000 {
            bail!(
                "nav_close_delay_ms must be at most 2000 (got {})",
                self.nav_close_delay_ms
            );
        }
        if self.image_prefix.is_empty() {
            bail!("image_prefix must not be empty");
        }
        self.level()?;
        Ok(())
    }

    /// Parsed log level.
    pub fn level(&self) -> Result<log::Level> {
        self.log_level
            .parse::<log::Level>()
            .map_err(|_| anyhow!("Invalid log_level '{}'. Valid options: error, warn, info, debug, trace", self.log_level))
    }

    /// Join an asset filename onto the image prefix.
    pub fn image_path(&self, file: &str) -> String {
        format!("{}{}", self.image_prefix, file)
    }

    /// True when `width` is at or below the drawer breakpoint.
    pub fn is_narrow(&self, width: f64) -> bool {
        width <= f64::from(self.nav_breakpoint_px)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_stock_site() {
        let c = SiteConfig::default();
        assert_eq!(c.theme_key, "theme");
        assert_eq!(c.menu_key, "menuOpen");
        assert_eq!(c.nav_breakpoint_px, 760);
        assert_eq!(c.image_path("a.png"), "images/a.png");
        assert!(c.validate().is_ok());
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let c = SiteConfig::from_json(r#"{"nav_breakpoint_px": 900}"#).unwrap();
        assert_eq!(c.nav_breakpoint_px, 900);
        assert_eq!(c.menu_key, "menuOpen");
    }

    #[test]
    fn breakpoint_is_inclusive() {
        let c = SiteConfig::default();
        assert!(c.is_narrow(760.0));
        assert!(!c.is_narrow(761.0));
    }

    #[test]
    fn invalid_values_rejected() {
        assert!(SiteConfig::from_json(r#"{"nav_breakpoint_px": 10}"#).is_err());
        assert!(SiteConfig::from_json(r#"{"theme_key": ""}"#).is_err());
        assert!(SiteConfig::from_json(r#"{"log_level": "loud"}"#).is_err());
        assert!(SiteConfig::from_json(r#"{"menu_key": "theme"}"#).is_err());
        assert!(SiteConfig::from_json(r#"{"unknown": 1}"#).is_err());
    }

    #[test]
    fn bad_block_falls_back_to_defaults() {
        assert_eq!(SiteConfig::from_json_or_default(Some("{nope")), SiteConfig::default());
        assert_eq!(SiteConfig::from_json_or_default(Some("   ")), SiteConfig::default());
        assert_eq!(SiteConfig::from_json_or_default(None), SiteConfig::default());
    }
}
