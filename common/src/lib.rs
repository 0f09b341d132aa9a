// client-side view state for the site: theme toggle, navigation menus, and resource tabs
//
// nothing in this crate touches the browser directly.  the webapp implements page::Page over the
// real document and forwards events to controller::Controller, which keeps this crate testable
// against the in-memory page in fake.rs

pub mod config;
pub mod controller;
pub mod event;
pub mod nav;
pub mod page;
pub mod selector;
pub mod tabs;
pub mod theme;

#[cfg(test)]
mod fake;
