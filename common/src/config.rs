use serde::{Deserialize, Serialize};
use tracing::{Level, debug, instrument};

use anyhow::{Context, Result};

use crate::selector::Selector;

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

// controller configuration
//
// one config covers every page variant of the site: the breakpoint, the two delays, and the
// selectors/class names that make up the contract with the page markup.  every field has a
// default matching the stock markup, so a config document only needs to list what differs
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct UiConfig {
    // widths at or below this are the narrow (mobile) layout
    pub breakpoint: u32,

    // how long to wait before closing a menu after one of its links was picked, so that the
    // navigation has a chance to start
    pub close_delay_ms: u32,

    // how long to wait for layout to settle before scrolling a newly shown section into view
    pub scroll_delay_ms: u32,

    pub theme: ThemeConfig,
    pub nav: NavConfig,
    pub tabs: TabConfig,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct ThemeConfig {
    pub storage_key: String,

    // element carrying the dark marker class
    pub root: String,
    pub dark_class: String,

    // toggle button, plus the icon and label inside it
    pub toggle: String,
    pub icon: String,
    pub label: String,

    // the icon and label describe what a click will switch to, so the dark theme shows the sun
    pub dark_icon: String,
    pub light_icon: String,
    pub dark_label: String,
    pub light_label: String,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct NavConfig {
    // hamburger menu
    pub container: String,
    pub hamburger: String,
    pub panel: String,
    pub open_class: String,

    // dropdowns, each container holding one trigger and one panel
    pub dropdown: String,
    pub dropdown_trigger: String,
    pub dropdown_panel: String,
    pub dropdown_open_class: String,

    // current page marking
    pub links: String,
    pub active_class: String,
    pub index_page: String,
    pub resources_page: String,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct TabConfig {
    pub links: String,
    pub sections: String,
    pub active_class: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            breakpoint: 768,
            close_delay_ms: 300,
            scroll_delay_ms: 100,
            theme: ThemeConfig::default(),
            nav: NavConfig::default(),
            tabs: TabConfig::default(),
        }
    }
}

impl Default for ThemeConfig {
    fn default() -> Self {
        ThemeConfig {
            storage_key: String::from("theme"),
            root: String::from("body"),
            dark_class: String::from("dark-mode"),
            toggle: String::from("#darkModeToggle"),
            icon: String::from("i"),
            label: String::from("span"),
            dark_icon: String::from("fas fa-sun"),
            light_icon: String::from("fas fa-moon"),
            dark_label: String::from("Light Mode"),
            light_label: String::from("Dark Mode"),
        }
    }
}

impl Default for NavConfig {
    fn default() -> Self {
        NavConfig {
            container: String::from("nav"),
            hamburger: String::from(".hamburger"),
            panel: String::from(".nav-links"),
            open_class: String::from("active"),
            dropdown: String::from(".resources-dropdown"),
            dropdown_trigger: String::from(".resources-btn"),
            dropdown_panel: String::from(".dropdown-content"),
            dropdown_open_class: String::from("show"),
            links: String::from(".nav-link"),
            active_class: String::from("active"),
            index_page: String::from("index.html"),
            resources_page: String::from("resources.html"),
        }
    }
}

impl Default for TabConfig {
    fn default() -> Self {
        TabConfig {
            links: String::from(".tab-link"),
            sections: String::from(".resource-section"),
            active_class: String::from("active"),
        }
    }
}

impl UiConfig {
    // reject configs that would make the controller misbehave quietly
    pub fn validate(&self) -> Result<()> {
        if self.breakpoint == 0 {
            return Err(anyhow::Error::msg("breakpoint must be positive"));
        }

        let selectors = [
            ("theme.root", &self.theme.root),
            ("theme.toggle", &self.theme.toggle),
            ("theme.icon", &self.theme.icon),
            ("theme.label", &self.theme.label),
            ("nav.container", &self.nav.container),
            ("nav.hamburger", &self.nav.hamburger),
            ("nav.panel", &self.nav.panel),
            ("nav.dropdown", &self.nav.dropdown),
            ("nav.dropdown_trigger", &self.nav.dropdown_trigger),
            ("nav.dropdown_panel", &self.nav.dropdown_panel),
            ("nav.links", &self.nav.links),
            ("tabs.links", &self.tabs.links),
            ("tabs.sections", &self.tabs.sections),
        ];

        for (field, selector) in selectors {
            Selector::parse(selector).with_context(|| format!("invalid selector for {field}"))?;
        }

        if self.theme.storage_key.is_empty() {
            return Err(anyhow::Error::msg("theme.storage_key must not be empty"));
        }

        let names = [
            ("theme.dark_class", &self.theme.dark_class),
            ("nav.open_class", &self.nav.open_class),
            ("nav.dropdown_open_class", &self.nav.dropdown_open_class),
            ("nav.active_class", &self.nav.active_class),
            ("nav.index_page", &self.nav.index_page),
            ("nav.resources_page", &self.nav.resources_page),
            ("tabs.active_class", &self.tabs.active_class),
        ];

        for (field, name) in names {
            if name.trim().is_empty() {
                return Err(anyhow::Error::msg(format!("{field} must not be empty")));
            }

            if name.chars().any(char::is_whitespace) {
                return Err(anyhow::Error::msg(format!("{field} must be a single name")));
            }
        }

        Ok(())
    }
}

// in order to extract the config table from a larger document, we need to specify it
// as a subtable of the root node, i.e. a substruct
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct TomlConfigFile {
    #[serde(default)]
    pub config: UiConfig,
}

#[instrument(level=Level::DEBUG, skip(doc))]
pub fn parse_config(doc: &str) -> Result<UiConfig> {
    debug!("parsing controller config");

    let data: TomlConfigFile = toml::from_str(doc).context("failed to parse config document")?;

    data.config.validate()?;

    debug!("successfully parsed controller config");
    Ok(data.config)
}

pub fn render_config(config: &UiConfig) -> Result<String> {
    let file = TomlConfigFile {
        config: config.clone(),
    };

    toml::to_string(&file).context("failed to render config document")
}
