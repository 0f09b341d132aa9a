use std::fmt::Debug;

use anyhow::Result;
use tracing::{debug, warn};

use crate::{
    config::NavConfig,
    event::{Deferred, Response},
    page::{Page, page_name},
};

#[cfg(test)]
#[path = "nav_test.rs"]
mod nav_test;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MenuId {
    Hamburger,
    Dropdown(usize),
}

// a menu is a container (clicks inside it don't count as "outside"), a trigger that toggles it,
// and a panel whose open class is the only record of its state
#[derive(Clone, Debug)]
struct Menu<N> {
    container: N,
    trigger: N,
    panel: N,
    open_class: String,
}

impl<N: Clone + Debug + PartialEq> Menu<N> {
    fn is_open<P: Page<Node = N>>(&self, page: &P) -> bool {
        page.has_class(&self.panel, &self.open_class)
    }

    // returns whether anything changed
    fn set_open<P: Page<Node = N>>(&self, page: &mut P, open: bool) -> bool {
        if self.is_open(page) == open {
            return false;
        }

        page.set_class(&self.panel, &self.open_class, open);
        true
    }
}

// navigation menus
//
// the hamburger panel and the dropdowns are independent state machines (closed <-> open) that
// happen to share the same close rules: click or touch outside, picking a link inside, or the
// viewport growing past the breakpoint.  only dropdowns know about each other, since opening one
// closes the rest
#[derive(Clone, Debug)]
pub struct NavController<N> {
    config: NavConfig,
    breakpoint: u32,
    close_delay_ms: u32,
    hamburger: Option<Menu<N>>,
    dropdowns: Vec<Menu<N>>,
}

impl<N: Clone + Debug + PartialEq> NavController<N> {
    // the hamburger and each dropdown are located separately so that broken markup for one of
    // them only takes that one out
    pub fn locate<P: Page<Node = N>>(
        page: &P,
        config: &NavConfig,
        breakpoint: u32,
        close_delay_ms: u32,
    ) -> Result<Self> {
        let hamburger = Self::locate_hamburger(page, config);

        let mut dropdowns = Vec::new();

        for (idx, container) in page.query_all(&config.dropdown).into_iter().enumerate() {
            let trigger = page.query_in(&container, &config.dropdown_trigger);
            let panel = page.query_in(&container, &config.dropdown_panel);

            match (trigger, panel) {
                (Some(trigger), Some(panel)) => dropdowns.push(Menu {
                    container,
                    trigger,
                    panel,
                    open_class: config.dropdown_open_class.clone(),
                }),
                _ => warn!(
                    "dropdown {idx} disabled: {} needs both {} and {}",
                    config.dropdown, config.dropdown_trigger, config.dropdown_panel
                ),
            }
        }

        // with nothing usable at all the caller reports the whole feature, once
        let hamburger = match hamburger {
            Ok(menu) => Some(menu),
            Err(err) if dropdowns.is_empty() => {
                return Err(err.context("no usable menus found"));
            }
            Err(err) => {
                warn!("hamburger menu disabled: {err}");
                None
            }
        };

        debug!(
            hamburger = hamburger.is_some(),
            dropdowns = dropdowns.len(),
            "located navigation menus"
        );

        Ok(NavController {
            config: config.clone(),
            breakpoint,
            close_delay_ms,
            hamburger,
            dropdowns,
        })
    }

    fn locate_hamburger<P: Page<Node = N>>(page: &P, config: &NavConfig) -> Result<Menu<N>> {
        let container = page.query(&config.container).ok_or_else(|| {
            anyhow::Error::msg(format!("nav container {} not found", config.container))
        })?;

        let trigger = page.query_in(&container, &config.hamburger).ok_or_else(|| {
            anyhow::Error::msg(format!("hamburger {} not found", config.hamburger))
        })?;

        let panel = page.query_in(&container, &config.panel).ok_or_else(|| {
            anyhow::Error::msg(format!("links panel {} not found", config.panel))
        })?;

        Ok(Menu {
            container,
            trigger,
            panel,
            open_class: config.open_class.clone(),
        })
    }

    fn menu(&self, id: MenuId) -> Option<&Menu<N>> {
        match id {
            MenuId::Hamburger => self.hamburger.as_ref(),
            MenuId::Dropdown(idx) => self.dropdowns.get(idx),
        }
    }

    fn menus(&self) -> impl Iterator<Item = (MenuId, &Menu<N>)> {
        self.hamburger
            .iter()
            .map(|menu| (MenuId::Hamburger, menu))
            .chain(
                self.dropdowns
                    .iter()
                    .enumerate()
                    .map(|(idx, menu)| (MenuId::Dropdown(idx), menu)),
            )
    }

    pub fn dropdown_count(&self) -> usize {
        self.dropdowns.len()
    }

    pub fn is_open<P: Page<Node = N>>(&self, page: &P, id: MenuId) -> bool {
        self.menu(id).is_some_and(|menu| menu.is_open(page))
    }

    pub fn open_menus<P: Page<Node = N>>(&self, page: &P) -> Vec<MenuId> {
        self.menus()
            .filter(|(_, menu)| menu.is_open(page))
            .map(|(id, _)| id)
            .collect()
    }

    pub fn is_narrow<P: Page<Node = N>>(&self, page: &P) -> bool {
        page.viewport_width() <= self.breakpoint
    }

    // closing a closed (or unknown) menu is a no-op
    pub fn close<P: Page<Node = N>>(&self, page: &mut P, id: MenuId) -> bool {
        let closed = self.menu(id).is_some_and(|menu| menu.set_open(page, false));

        if closed {
            debug!(?id, "menu closed");
        }
        closed
    }

    pub fn close_all<P: Page<Node = N>>(&self, page: &mut P) {
        for (id, menu) in self.menus() {
            if menu.set_open(page, false) {
                debug!(?id, "menu closed");
            }
        }
    }

    // flips one menu and returns its new state.  opening a dropdown closes its siblings
    pub fn toggle<P: Page<Node = N>>(&self, page: &mut P, id: MenuId) -> bool {
        let Some(menu) = self.menu(id) else {
            return false;
        };

        let open = !menu.is_open(page);

        if open {
            if let MenuId::Dropdown(current) = id {
                for (idx, other) in self.dropdowns.iter().enumerate() {
                    if idx != current {
                        other.set_open(page, false);
                    }
                }
            }
        }

        menu.set_open(page, open);
        debug!(?id, open, "menu toggled");
        open
    }

    // every click goes through here (touches too, minus the trigger handling).  the target is
    // classified against each menu's regions directly, so nothing depends on the order in which
    // listeners happen to run
    pub fn on_pointer<P: Page<Node = N>>(&self, page: &mut P, target: &N, click: bool) -> Response {
        let mut response = Response::default();

        let hit = if click { self.trigger_hit(page, target) } else { None };

        if let Some(id) = hit {
            // the hamburger is only visible in the narrow layout
            if id != MenuId::Hamburger || self.is_narrow(page) {
                self.toggle(page, id);
            }
            response.prevent_default = true;
        }

        for (id, menu) in self.menus() {
            if Some(id) == hit || !menu.is_open(page) {
                continue;
            }

            if !page.contains(&menu.container, target) {
                menu.set_open(page, false);
                debug!(?id, "menu closed by outside pointer");
                continue;
            }

            // picking a link closes the menu once the navigation has had time to start
            if click && hit.is_none() && page.contains(&menu.panel, target) {
                let on_link = page
                    .closest(target, "a")
                    .is_some_and(|link| page.contains(&menu.panel, &link));

                if on_link {
                    response.schedule(self.close_delay_ms, Deferred::CloseMenu(id));
                }
            }
        }

        response
    }

    fn trigger_hit<P: Page<Node = N>>(&self, page: &P, target: &N) -> Option<MenuId> {
        self.menus()
            .find(|(_, menu)| page.contains(&menu.trigger, target))
            .map(|(id, _)| id)
    }

    pub fn on_resize<P: Page<Node = N>>(&self, page: &mut P) {
        if !self.is_narrow(page) {
            self.close_all(page);
        }
    }

    // mark the links pointing at the page we are on
    pub fn mark_current_page<P: Page<Node = N>>(&self, page: &mut P) {
        mark_nav_links(page, &self.config);

        if page_name(&page.path()) == self.config.resources_page {
            for menu in &self.dropdowns {
                page.set_class(&menu.trigger, &self.config.active_class, true);
            }
        }
    }
}

// usable without any menus, since plain nav links still deserve their active marker
pub fn mark_nav_links<P: Page>(page: &mut P, config: &NavConfig) {
    let path = page.path();
    let current = page_name(&path);

    for link in page.query_all(&config.links) {
        let href = page.attribute(&link, "href").unwrap_or_default();

        let active = href == current
            || (current == config.index_page && (href == config.index_page || href == "#"))
            || (current == config.resources_page && href.contains(config.resources_page.as_str()));

        page.set_class(&link, &config.active_class, active);
    }
}
