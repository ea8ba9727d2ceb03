use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuideSettings {
    /// Show the first visible step as soon as the guide opens. Default: true.
    #[serde(default = "default_auto_show_first")]
    pub auto_show_first: bool,
    /// Selector of the host's loading indicator. The guide becomes ready
    /// once this element is no longer shown. Default: `#loading`.
    #[serde(default = "default_loading_selector")]
    pub loading_selector: String,
    /// Caption of the open/close toggle. Default: "page guide".
    #[serde(default = "default_caption")]
    pub caption: String,
    /// Toggle title used when the page does not carry its own.
    #[serde(default = "default_tour_title")]
    pub tour_title: String,
    /// Interval between readiness checks (in ms). Default: 250.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    /// A target counts as on screen if its top is at least this many px
    /// above the bottom edge of the viewport. Default: 100.
    #[serde(default = "default_scroll_tolerance_px")]
    pub scroll_tolerance_px: f64,
    /// Space left above a target when scrolling to it. Default: 50.
    #[serde(default = "default_scroll_margin_px")]
    pub scroll_margin_px: f64,
    #[serde(default = "default_welcome_key_prefix")]
    pub welcome_key_prefix: String,
    /// The host wires its own open button, so no toggle is mounted.
    #[serde(default)]
    pub custom_open_button: bool,
}

fn default_auto_show_first() -> bool {
    true
}

fn default_loading_selector() -> String {
    "#loading".into()
}

fn default_caption() -> String {
    "page guide".into()
}

fn default_tour_title() -> String {
    "Open Page Guide for help".into()
}

fn default_poll_interval_ms() -> u64 {
    250
}

fn default_scroll_tolerance_px() -> f64 {
    100.0
}

fn default_scroll_margin_px() -> f64 {
    50.0
}

fn default_welcome_key_prefix() -> String {
    "pageguide_welcome_shown_".into()
}

impl Default for GuideSettings {
    fn default() -> Self {
        GuideSettings {
            auto_show_first: default_auto_show_first(),
            loading_selector: default_loading_selector(),
            caption: default_caption(),
            tour_title: default_tour_title(),
            poll_interval_ms: default_poll_interval_ms(),
            scroll_tolerance_px: default_scroll_tolerance_px(),
            scroll_margin_px: default_scroll_margin_px(),
            welcome_key_prefix: default_welcome_key_prefix(),
            custom_open_button: false,
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_yaml_uses_defaults() {
        let settings: GuideSettings = serde_yaml::from_str("{}").unwrap();
        assert_eq!(settings, GuideSettings::default());
        assert!(settings.auto_show_first);
        assert_eq!(settings.poll_interval_ms, 250);
        assert!(!settings.custom_open_button);
    }

    #[test]
    fn partial_yaml_overrides_only_named_fields() {
        let settings: GuideSettings =
            serde_yaml::from_str("auto_show_first: false\nloading_selector: '.spinner'\n").unwrap();
        assert!(!settings.auto_show_first);
        assert_eq!(settings.loading_selector, ".spinner");
        assert_eq!(settings.caption, "page guide");
        assert_eq!(settings.scroll_tolerance_px, 100.0);
    }
}
