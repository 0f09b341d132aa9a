use std::fmt;

use anyhow::Result;
use tracing::{debug, info};

use crate::{config::ThemeConfig, page::Page};

#[cfg(test)]
#[path = "theme_test.rs"]
mod theme_test;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn from_dark(dark: bool) -> Self {
        if dark { Theme::Dark } else { Theme::Light }
    }

    // the persisted slot only ever holds these two literals; anything else counts as unset
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "dark" => Some(Theme::Dark),
            "light" => Some(Theme::Light),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// theme manager
//
// the applied theme lives on the page (the dark class on the root), and the explicit user choice
// lives in the storage slot.  the icon and label are optional: a button without them still
// toggles, it just has nothing to relabel
#[derive(Clone, Debug)]
pub struct ThemeManager<N> {
    config: ThemeConfig,
    root: N,
    button: N,
    icon: Option<N>,
    label: Option<N>,
}

impl<N: Clone + fmt::Debug + PartialEq> ThemeManager<N> {
    pub fn locate<P: Page<Node = N>>(page: &P, config: &ThemeConfig) -> Result<Self> {
        let root = page.query(&config.root).ok_or_else(|| {
            anyhow::Error::msg(format!("theme root {} not found", config.root))
        })?;

        let button = page.query(&config.toggle).ok_or_else(|| {
            anyhow::Error::msg(format!("theme toggle {} not found", config.toggle))
        })?;

        let icon = page.query_in(&button, &config.icon);
        let label = page.query_in(&button, &config.label);

        Ok(ThemeManager {
            config: config.clone(),
            root,
            button,
            icon,
            label,
        })
    }

    // the explicit choice, if the user ever made one
    pub fn persisted<P: Page<Node = N>>(&self, page: &P) -> Option<Theme> {
        page.load(&self.config.storage_key)
            .as_deref()
            .and_then(Theme::parse)
    }

    pub fn current<P: Page<Node = N>>(&self, page: &P) -> Theme {
        Theme::from_dark(page.has_class(&self.root, &self.config.dark_class))
    }

    // startup: the persisted choice wins, otherwise follow the system color scheme.  nothing is
    // written back, so the system keeps control until the user toggles
    pub fn init<P: Page<Node = N>>(&self, page: &mut P) -> Theme {
        let theme = match self.persisted(page) {
            Some(theme) => theme,
            None => Theme::from_dark(page.prefers_dark()),
        };

        debug!(theme = %theme, "applying initial theme");
        self.apply(page, theme);
        theme
    }

    pub fn apply<P: Page<Node = N>>(&self, page: &mut P, theme: Theme) {
        page.set_class(&self.root, &self.config.dark_class, theme == Theme::Dark);

        let (icon, label) = match theme {
            Theme::Dark => (&self.config.dark_icon, &self.config.dark_label),
            Theme::Light => (&self.config.light_icon, &self.config.light_label),
        };

        if let Some(node) = &self.icon {
            page.set_class_name(node, icon);
        }

        if let Some(node) = &self.label {
            page.set_text(node, label);
        }
    }

    pub fn toggle<P: Page<Node = N>>(&self, page: &mut P) -> Theme {
        let theme = self.current(page).toggled();

        info!(theme = %theme, "theme toggled");
        self.apply(page, theme);
        page.store(&self.config.storage_key, theme.as_str());
        theme
    }

    // the system only gets a say while the user has not chosen explicitly
    pub fn on_system_change<P: Page<Node = N>>(&self, page: &mut P, dark: bool) -> Option<Theme> {
        if self.persisted(page).is_some() {
            debug!("ignoring system theme change, user choice is persisted");
            return None;
        }

        let theme = Theme::from_dark(dark);
        self.apply(page, theme);
        Some(theme)
    }

    pub fn owns<P: Page<Node = N>>(&self, page: &P, target: &N) -> bool {
        page.contains(&self.button, target)
    }
}
