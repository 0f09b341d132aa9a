use std::fmt::Debug;

use anyhow::Result;
use tracing::{Level, debug, info, instrument, warn};

use crate::{
    config::UiConfig,
    event::{Deferred, Response, UiEvent},
    nav::{NavController, mark_nav_links},
    page::Page,
    tabs::TabSwitcher,
    theme::ThemeManager,
};

#[cfg(test)]
#[path = "controller_test.rs"]
mod controller_test;

// view-state controller
//
// owns the three features for the lifetime of the page.  each one is located independently at
// startup; a feature whose markup is missing is logged once and left out, and the others carry on
// without it
#[derive(Clone, Debug)]
pub struct Controller<N> {
    config: UiConfig,
    theme: Option<ThemeManager<N>>,
    nav: Option<NavController<N>>,
    tabs: Option<TabSwitcher<N>>,
}

fn enabled<T>(feature: &str, located: Result<T>) -> Option<T> {
    match located {
        Ok(val) => Some(val),
        Err(err) => {
            warn!("{feature} disabled: {err:#}");
            None
        }
    }
}

impl<N: Clone + Debug + PartialEq> Controller<N> {
    #[instrument(level=Level::DEBUG, skip_all)]
    pub fn init<P: Page<Node = N>>(page: &mut P, config: UiConfig) -> (Self, Response) {
        let theme = enabled("theme toggle", ThemeManager::locate(page, &config.theme));

        let nav = enabled(
            "navigation menus",
            NavController::locate(page, &config.nav, config.breakpoint, config.close_delay_ms),
        );

        let tabs = enabled(
            "resource tabs",
            TabSwitcher::locate(
                page,
                &config.tabs,
                config.breakpoint,
                config.scroll_delay_ms,
            ),
        );

        if let Some(theme) = &theme {
            theme.init(page);
        }

        // menu state is never carried over, every page load starts closed
        match &nav {
            Some(nav) => {
                nav.close_all(page);
                nav.mark_current_page(page);
            }
            None => mark_nav_links(page, &config.nav),
        }

        let response = match &tabs {
            Some(tabs) => tabs.sync_with_location(page),
            None => Response::default(),
        };

        info!(
            theme = theme.is_some(),
            nav = nav.is_some(),
            tabs = tabs.is_some(),
            "view controller ready"
        );

        let controller = Controller {
            config,
            theme,
            nav,
            tabs,
        };

        (controller, response)
    }

    pub fn config(&self) -> &UiConfig {
        &self.config
    }

    pub fn theme(&self) -> Option<&ThemeManager<N>> {
        self.theme.as_ref()
    }

    pub fn nav(&self) -> Option<&NavController<N>> {
        self.nav.as_ref()
    }

    pub fn tabs(&self) -> Option<&TabSwitcher<N>> {
        self.tabs.as_ref()
    }

    pub fn handle<P: Page<Node = N>>(&self, page: &mut P, event: UiEvent<N>) -> Response {
        match event {
            UiEvent::Click(target) => self.on_click(page, &target),
            UiEvent::TouchStart(target) => {
                if let Some(nav) = &self.nav {
                    nav.on_pointer(page, &target, false);
                }
                Response::default()
            }
            UiEvent::Resize => {
                if let Some(nav) = &self.nav {
                    nav.on_resize(page);
                }
                Response::default()
            }
            UiEvent::PopState => match &self.tabs {
                Some(tabs) => tabs.sync_with_location(page),
                None => Response::default(),
            },
            UiEvent::SystemTheme { dark } => {
                if let Some(theme) = &self.theme {
                    theme.on_system_change(page, dark);
                }
                Response::default()
            }
            UiEvent::Deferred(task) => {
                self.run_deferred(page, task);
                Response::default()
            }
        }
    }

    // one document-level handler sees every click and decides per region
    fn on_click<P: Page<Node = N>>(&self, page: &mut P, target: &N) -> Response {
        let mut response = Response::default();

        if let Some(nav) = &self.nav {
            response.merge(nav.on_pointer(page, target, true));
        }

        if let Some(theme) = &self.theme {
            if theme.owns(page, target) {
                theme.toggle(page);
            }
        }

        if let Some(tabs) = &self.tabs {
            response.merge(tabs.on_click(page, target));
        }

        response
    }

    fn run_deferred<P: Page<Node = N>>(&self, page: &mut P, task: Deferred) {
        debug!(?task, "running deferred task");

        match task {
            Deferred::CloseMenu(id) => {
                if let Some(nav) = &self.nav {
                    nav.close(page, id);
                }
            }
            Deferred::Reveal(target) => {
                if let Some(tabs) = &self.tabs {
                    tabs.reveal(page, &target);
                }
            }
        }
    }
}
