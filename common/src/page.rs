use std::fmt::Debug;

// page access
//
// everything the controller reads or writes on the page goes through this trait: the document
// tree, the window (viewport, url, history, color scheme), and the persisted storage slot.  the
// webapp implements it over web-sys, and the tests implement it over an in-memory tree, so every
// handler takes the page explicitly instead of reaching for globals
//
// selectors passed in here are the compound selectors from the config (see selector.rs)
pub trait Page {
    type Node: Clone + Debug + PartialEq;

    // document queries
    fn query(&self, selector: &str) -> Option<Self::Node>;

    fn query_all(&self, selector: &str) -> Vec<Self::Node>;

    // first descendant of scope (not scope itself) matching the selector
    fn query_in(&self, scope: &Self::Node, selector: &str) -> Option<Self::Node>;

    // inclusive, like Node.contains()
    fn contains(&self, ancestor: &Self::Node, node: &Self::Node) -> bool;

    // inclusive, like Element.closest()
    fn closest(&self, node: &Self::Node, selector: &str) -> Option<Self::Node>;

    fn attribute(&self, node: &Self::Node, name: &str) -> Option<String>;

    fn has_class(&self, node: &Self::Node, class: &str) -> bool;

    // document mutation
    fn set_class(&mut self, node: &Self::Node, class: &str, on: bool);

    fn set_class_name(&mut self, node: &Self::Node, value: &str);

    fn set_text(&mut self, node: &Self::Node, text: &str);

    fn scroll_into_view(&mut self, node: &Self::Node);

    // window
    fn viewport_width(&self) -> u32;

    fn prefers_dark(&self) -> bool;

    // url fragment without the leading '#', None when empty
    fn fragment(&self) -> Option<String>;

    fn path(&self) -> String;

    // add an entry to the session history without navigating
    fn push_fragment(&mut self, fragment: &str);

    // persisted storage
    fn load(&self, key: &str) -> Option<String>;

    fn store(&mut self, key: &str, value: &str);
}

// a link's target section, i.e. everything after the '#' in its href
pub fn href_fragment(href: &str) -> Option<&str> {
    href.split_once('#')
        .map(|(_, fragment)| fragment)
        .filter(|fragment| !fragment.is_empty())
}

// the current page's file name, which is what nav links refer to
pub fn page_name(path: &str) -> &str {
    match path.rsplit('/').next() {
        Some(name) if !name.is_empty() => name,
        _ => "index.html",
    }
}
