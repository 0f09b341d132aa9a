use crate::nav::MenuId;

#[cfg(test)]
#[path = "event_test.rs"]
mod event_test;

// events the host forwards to the controller
//
// node-carrying events use the element the browser reported as the event target
#[derive(Clone, Debug, PartialEq)]
pub enum UiEvent<N> {
    Click(N),
    TouchStart(N),
    Resize,
    PopState,
    SystemTheme { dark: bool },
    Deferred(Deferred),
}

// work that has to happen a little later than the event that caused it
//
// the host runs these on a timer and feeds them back in as UiEvent::Deferred.  nothing cancels
// them, so running one must be harmless if the page has already moved on
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Deferred {
    CloseMenu(MenuId),
    Reveal(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Scheduled {
    pub delay_ms: u32,
    pub task: Deferred,
}

// what the host has to do on the controller's behalf after an event
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Response {
    pub prevent_default: bool,
    pub scheduled: Vec<Scheduled>,
}

impl Response {
    pub fn schedule(&mut self, delay_ms: u32, task: Deferred) {
        self.scheduled.push(Scheduled { delay_ms, task });
    }

    pub fn merge(&mut self, other: Response) {
        self.prevent_default |= other.prevent_default;
        self.scheduled.extend(other.scheduled);
    }
}
