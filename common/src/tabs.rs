use std::fmt::Debug;

use anyhow::Result;
use tracing::{debug, info, warn};

use crate::{
    config::TabConfig,
    event::{Deferred, Response},
    page::{Page, href_fragment},
};

#[cfg(test)]
#[path = "tabs_test.rs"]
mod tabs_test;

#[derive(Clone, Debug)]
struct Tab<N> {
    node: N,
    target: String,
}

// resource tabs
//
// tab links and sections are paired by name: a link's href fragment equals the id of the section
// it shows.  both lists are captured once at startup, links without a fragment and sections
// without an id are not part of the tab set
#[derive(Clone, Debug)]
pub struct TabSwitcher<N> {
    active_class: String,
    breakpoint: u32,
    scroll_delay_ms: u32,
    links: Vec<Tab<N>>,
    sections: Vec<Tab<N>>,
}

impl<N: Clone + Debug + PartialEq> TabSwitcher<N> {
    pub fn locate<P: Page<Node = N>>(
        page: &P,
        config: &TabConfig,
        breakpoint: u32,
        scroll_delay_ms: u32,
    ) -> Result<Self> {
        let sections: Vec<_> = page
            .query_all(&config.sections)
            .into_iter()
            .filter_map(|node| {
                let target = page.attribute(&node, "id").filter(|id| !id.is_empty())?;
                Some(Tab { node, target })
            })
            .collect();

        if sections.is_empty() {
            return Err(anyhow::Error::msg(format!(
                "no {} elements with an id found",
                config.sections
            )));
        }

        let links: Vec<_> = page
            .query_all(&config.links)
            .into_iter()
            .filter_map(|node| {
                let href = page.attribute(&node, "href")?;
                let target = href_fragment(&href)?.to_owned();
                Some(Tab { node, target })
            })
            .collect();

        // sections can still be picked through the address bar without any links
        if links.is_empty() {
            warn!("no {} elements with a fragment href found", config.links);
        }

        debug!(
            links = links.len(),
            sections = sections.len(),
            "located resource tabs"
        );

        Ok(TabSwitcher {
            active_class: config.active_class.clone(),
            breakpoint,
            scroll_delay_ms,
            links,
            sections,
        })
    }

    pub fn active<P: Page<Node = N>>(&self, page: &P) -> Option<String> {
        self.sections
            .iter()
            .find(|section| page.has_class(&section.node, &self.active_class))
            .map(|section| section.target.clone())
    }

    // show the named section and highlight its link.  an unknown name leaves the page as it was
    pub fn switch_tab<P: Page<Node = N>>(&self, page: &mut P, target: &str) -> Response {
        let mut response = Response::default();

        if !self.sections.iter().any(|section| section.target == target) {
            debug!(section = target, "no section to switch to");
            return response;
        }

        for link in &self.links {
            page.set_class(&link.node, &self.active_class, link.target == target);
        }

        for section in &self.sections {
            page.set_class(&section.node, &self.active_class, section.target == target);
        }

        info!(section = target, "switched resource tab");

        // in the narrow layout the section usually starts below the fold
        if page.viewport_width() <= self.breakpoint {
            response.schedule(self.scroll_delay_ms, Deferred::Reveal(target.to_owned()));
        }

        response
    }

    pub fn reveal<P: Page<Node = N>>(&self, page: &mut P, target: &str) {
        if let Some(section) = self.sections.iter().find(|section| section.target == target) {
            page.scroll_into_view(&section.node);
        }
    }

    // tab link clicks stay on the page: switch, then record the fragment in history
    pub fn on_click<P: Page<Node = N>>(&self, page: &mut P, target: &N) -> Response {
        let Some(link) = self
            .links
            .iter()
            .find(|link| page.contains(&link.node, target))
        else {
            return Response::default();
        };

        let fragment = link.target.clone();

        let mut response = self.switch_tab(page, &fragment);
        response.prevent_default = true;
        page.push_fragment(&fragment);
        response
    }

    // both the initial load and back/forward navigation just follow the address bar
    pub fn sync_with_location<P: Page<Node = N>>(&self, page: &mut P) -> Response {
        match page.fragment() {
            Some(fragment) => self.switch_tab(page, &fragment),
            None => Response::default(),
        }
    }
}
