// in-memory page for tests
//
// a flat arena of elements with parent links.  nodes are created parent-first, so arena order is
// document order, which is all querySelector semantics need here

use std::collections::HashMap;

use crate::{page::Page, selector::Selector};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NodeRef(usize);

#[derive(Clone, Debug, Default)]
struct FakeNode {
    tag: String,
    id: Option<String>,
    classes: Vec<String>,
    attributes: HashMap<String, String>,
    text: String,
    parent: Option<usize>,
    scrolls: usize,
}

#[derive(Clone, Debug)]
pub struct FakePage {
    nodes: Vec<FakeNode>,
    pub width: u32,
    pub prefers_dark: bool,
    pub path: String,
    pub fragment: Option<String>,
    pub history: Vec<String>,
    pub storage: HashMap<String, String>,
}

impl FakePage {
    pub fn new() -> Self {
        let body = FakeNode {
            tag: String::from("body"),
            ..Default::default()
        };

        FakePage {
            nodes: vec![body],
            width: 1280,
            prefers_dark: false,
            path: String::from("/index.html"),
            fragment: None,
            history: Vec::new(),
            storage: HashMap::new(),
        }
    }

    pub fn body(&self) -> NodeRef {
        NodeRef(0)
    }

    // element described as a compound selector, e.g. "a.tab-link#first"
    pub fn add(&mut self, parent: NodeRef, spec: &str) -> NodeRef {
        let selector = Selector::parse(spec).expect("valid element spec");

        self.nodes.push(FakeNode {
            tag: selector.tag.unwrap_or_else(|| String::from("div")),
            id: selector.id,
            classes: selector.classes,
            parent: Some(parent.0),
            ..Default::default()
        });

        NodeRef(self.nodes.len() - 1)
    }

    pub fn add_link(&mut self, parent: NodeRef, spec: &str, href: &str) -> NodeRef {
        let link = self.add(parent, spec);
        self.nodes[link.0]
            .attributes
            .insert(String::from("href"), href.to_owned());
        link
    }

    pub fn find(&self, selector: &str) -> NodeRef {
        self.query(selector)
            .unwrap_or_else(|| panic!("no element matches {selector}"))
    }

    pub fn text(&self, node: NodeRef) -> &str {
        &self.nodes[node.0].text
    }

    pub fn class_name(&self, node: NodeRef) -> String {
        self.nodes[node.0].classes.join(" ")
    }

    pub fn scrolls(&self, node: NodeRef) -> usize {
        self.nodes[node.0].scrolls
    }

    // what the user sees in the address bar after a back/forward step
    pub fn navigate_to(&mut self, fragment: Option<&str>) {
        self.fragment = fragment.map(str::to_owned);
    }

    fn matches(&self, idx: usize, selector: &str) -> bool {
        let Ok(selector) = Selector::parse(selector) else {
            return false;
        };
        let node = &self.nodes[idx];
        selector.matches(&node.tag, node.id.as_deref(), &node.classes)
    }

    fn is_ancestor(&self, ancestor: usize, mut idx: usize) -> bool {
        while let Some(parent) = self.nodes[idx].parent {
            if parent == ancestor {
                return true;
            }
            idx = parent;
        }
        false
    }

    // the stock page: nav with hamburger and two dropdowns, theme toggle, three resource tabs
    pub fn site() -> Self {
        let mut page = FakePage::new();
        let body = page.body();

        let nav = page.add(body, "nav");
        page.add(nav, "button.hamburger");
        let links = page.add(nav, "ul.nav-links");
        page.add_link(links, "a.nav-link", "index.html");
        page.add_link(links, "a.nav-link", "about.html");

        let resources = page.add(links, "div.resources-dropdown#resources");
        let trigger = page.add(resources, "button.resources-btn");
        page.add(trigger, "span.caret");
        let panel = page.add(resources, "div.dropdown-content");
        let install = page.add_link(panel, "a", "resources.html#install");
        page.add(install, "strong");
        page.add(panel, "p.note");

        let community = page.add(links, "div.resources-dropdown#community");
        page.add(community, "button.resources-btn");
        let panel = page.add(community, "div.dropdown-content");
        page.add_link(panel, "a", "forum.html");

        let toggle = page.add(body, "button#darkModeToggle");
        page.add(toggle, "i.fas.fa-moon");
        page.add(toggle, "span");

        let main = page.add(body, "main");
        let tabs = page.add(main, "div.tabs");
        for name in ["install", "usage", "faq"] {
            let link = page.add_link(tabs, "a.tab-link", &format!("#{name}"));
            page.add(link, "span");
        }
        for name in ["install", "usage", "faq"] {
            page.add(main, &format!("section.resource-section#{name}"));
        }
        page.add(main, "p#outside");

        page
    }
}

impl Page for FakePage {
    type Node = NodeRef;

    fn query(&self, selector: &str) -> Option<NodeRef> {
        (0..self.nodes.len())
            .find(|&idx| self.matches(idx, selector))
            .map(NodeRef)
    }

    fn query_all(&self, selector: &str) -> Vec<NodeRef> {
        (0..self.nodes.len())
            .filter(|&idx| self.matches(idx, selector))
            .map(NodeRef)
            .collect()
    }

    fn query_in(&self, scope: &NodeRef, selector: &str) -> Option<NodeRef> {
        (0..self.nodes.len())
            .find(|&idx| self.is_ancestor(scope.0, idx) && self.matches(idx, selector))
            .map(NodeRef)
    }

    fn contains(&self, ancestor: &NodeRef, node: &NodeRef) -> bool {
        ancestor == node || self.is_ancestor(ancestor.0, node.0)
    }

    fn closest(&self, node: &NodeRef, selector: &str) -> Option<NodeRef> {
        let mut idx = Some(node.0);

        while let Some(current) = idx {
            if self.matches(current, selector) {
                return Some(NodeRef(current));
            }
            idx = self.nodes[current].parent;
        }
        None
    }

    fn attribute(&self, node: &NodeRef, name: &str) -> Option<String> {
        let node = &self.nodes[node.0];

        match name {
            "id" => node.id.clone(),
            _ => node.attributes.get(name).cloned(),
        }
    }

    fn has_class(&self, node: &NodeRef, class: &str) -> bool {
        self.nodes[node.0].classes.iter().any(|have| have == class)
    }

    fn set_class(&mut self, node: &NodeRef, class: &str, on: bool) {
        let classes = &mut self.nodes[node.0].classes;
        let present = classes.iter().any(|have| have == class);

        if on && !present {
            classes.push(class.to_owned());
        } else if !on {
            classes.retain(|have| have != class);
        }
    }

    fn set_class_name(&mut self, node: &NodeRef, value: &str) {
        self.nodes[node.0].classes = value.split_whitespace().map(str::to_owned).collect();
    }

    fn set_text(&mut self, node: &NodeRef, text: &str) {
        self.nodes[node.0].text = text.to_owned();
    }

    fn scroll_into_view(&mut self, node: &NodeRef) {
        self.nodes[node.0].scrolls += 1;
    }

    fn viewport_width(&self) -> u32 {
        self.width
    }

    fn prefers_dark(&self) -> bool {
        self.prefers_dark
    }

    fn fragment(&self) -> Option<String> {
        self.fragment.clone().filter(|fragment| !fragment.is_empty())
    }

    fn path(&self) -> String {
        self.path.clone()
    }

    fn push_fragment(&mut self, fragment: &str) {
        self.fragment = Some(fragment.to_owned());
        self.history.push(format!("#{fragment}"));
    }

    fn load(&self, key: &str) -> Option<String> {
        self.storage.get(key).cloned()
    }

    fn store(&mut self, key: &str, value: &str) {
        self.storage.insert(key.to_owned(), value.to_owned());
    }
}
