use common::page::Page;
use tracing::{error, warn};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Document, Element, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition, Window,
};

use crate::storage::{get_local_storage, set_local_storage};

const DARK_QUERY: &str = "(prefers-color-scheme: dark)";

// the live document
//
// lookups that fail inside the browser (bad selector, detached history) are logged and treated
// as "not there", which is how the controller already handles missing markup
pub struct BrowserPage {
    window: Window,
    document: Document,
}

impl BrowserPage {
    pub fn new(window: Window, document: Document) -> Self {
        BrowserPage { window, document }
    }

    pub fn dark_query(&self) -> Option<web_sys::MediaQueryList> {
        self.window.match_media(DARK_QUERY).ok().flatten()
    }
}

fn log_query_error(selector: &str, err: JsValue) {
    error!("query for {selector} failed: {err:?}");
}

impl Page for BrowserPage {
    type Node = Element;

    fn query(&self, selector: &str) -> Option<Element> {
        self.document
            .query_selector(selector)
            .unwrap_or_else(|err| {
                log_query_error(selector, err);
                None
            })
    }

    fn query_all(&self, selector: &str) -> Vec<Element> {
        let list = match self.document.query_selector_all(selector) {
            Ok(list) => list,
            Err(err) => {
                log_query_error(selector, err);
                return Vec::new();
            }
        };

        (0..list.length())
            .filter_map(|idx| list.get(idx))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }

    fn query_in(&self, scope: &Element, selector: &str) -> Option<Element> {
        scope.query_selector(selector).unwrap_or_else(|err| {
            log_query_error(selector, err);
            None
        })
    }

    fn contains(&self, ancestor: &Element, node: &Element) -> bool {
        ancestor.contains(Some(node.as_ref()))
    }

    fn closest(&self, node: &Element, selector: &str) -> Option<Element> {
        node.closest(selector).unwrap_or_else(|err| {
            log_query_error(selector, err);
            None
        })
    }

    fn attribute(&self, node: &Element, name: &str) -> Option<String> {
        node.get_attribute(name)
    }

    fn has_class(&self, node: &Element, class: &str) -> bool {
        node.class_list().contains(class)
    }

    fn set_class(&mut self, node: &Element, class: &str, on: bool) {
        let list = node.class_list();

        let res = if on {
            list.add_1(class)
        } else {
            list.remove_1(class)
        };

        if let Err(err) = res {
            warn!("failed to update class {class}: {err:?}");
        }
    }

    fn set_class_name(&mut self, node: &Element, value: &str) {
        node.set_class_name(value);
    }

    fn set_text(&mut self, node: &Element, text: &str) {
        node.set_text_content(Some(text));
    }

    fn scroll_into_view(&mut self, node: &Element) {
        let options = ScrollIntoViewOptions::new();
        options.set_behavior(ScrollBehavior::Smooth);
        options.set_block(ScrollLogicalPosition::Start);

        node.scroll_into_view_with_scroll_into_view_options(&options);
    }

    fn viewport_width(&self) -> u32 {
        // if the width is somehow unavailable, behave like the wide layout
        self.window
            .inner_width()
            .ok()
            .and_then(|width| width.as_f64())
            .map_or(u32::MAX, |width| width as u32)
    }

    fn prefers_dark(&self) -> bool {
        self.dark_query().is_some_and(|query| query.matches())
    }

    fn fragment(&self) -> Option<String> {
        let hash = self.window.location().hash().ok()?;
        let fragment = hash.strip_prefix('#').unwrap_or(&hash);

        if fragment.is_empty() {
            None
        } else {
            Some(fragment.to_owned())
        }
    }

    fn path(&self) -> String {
        self.window.location().pathname().unwrap_or_default()
    }

    fn push_fragment(&mut self, fragment: &str) {
        let url = format!("#{fragment}");

        let res = self
            .window
            .history()
            .and_then(|history| history.push_state_with_url(&JsValue::NULL, "", Some(&url)));

        if let Err(err) = res {
            warn!("failed to push {url} onto history: {err:?}");
        }
    }

    fn load(&self, key: &str) -> Option<String> {
        get_local_storage(key)
    }

    fn store(&mut self, key: &str, value: &str) {
        set_local_storage(key, value)
    }
}
