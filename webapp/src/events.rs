use std::{cell::RefCell, rc::Rc};

use common::{
    controller::Controller,
    event::{Response, UiEvent},
};
use gloo_timers::callback::Timeout;
use tracing::{debug, error, info};
use wasm_bindgen::{JsCast, closure::Closure};
use web_sys::{
    AddEventListenerOptions, Document, Element, Event, EventTarget, MediaQueryListEvent, Window,
};

use crate::{config::page_config, page::BrowserPage};

struct App {
    page: BrowserPage,
    controller: Controller<Element>,
}

// everything runs on the ui thread, so the shared state is a plain RefCell.  a borrow is only
// held for the duration of one controller call and never across a timer or a listener
type SharedApp = Rc<RefCell<App>>;

pub fn boot() {
    let Some(window) = web_sys::window() else {
        error!("no window, not starting");
        return;
    };

    let Some(document) = window.document() else {
        error!("no document, not starting");
        return;
    };

    if still_loading(&document.ready_state()) {
        debug!("waiting for DOMContentLoaded");

        let target: EventTarget = document.clone().into();
        let mut pending = Some((window, document));

        listen(&target, "DOMContentLoaded", false, false, move |_| {
            if let Some((window, document)) = pending.take() {
                start(window, document);
            }
        });
    } else {
        start(window, document);
    }
}

// document.readyState is "loading" until the parser is done, then "interactive" and "complete"
fn still_loading(ready_state: &str) -> bool {
    ready_state == "loading"
}

fn start(window: Window, document: Document) {
    let config = page_config(&document);

    let mut page = BrowserPage::new(window.clone(), document.clone());
    let (controller, response) = Controller::init(&mut page, config);

    let app = Rc::new(RefCell::new(App { page, controller }));
    apply(&app, response, None);

    let document: EventTarget = document.into();
    let window_target: EventTarget = window.clone().into();

    // a single capture-phase listener sees every click before any page script can stop it
    {
        let app = app.clone();
        listen(&document, "click", true, false, move |event| {
            if let Some(target) = event_element(&event) {
                let response = dispatch(&app, UiEvent::Click(target));
                apply(&app, response, Some(&event));
            }
        });
    }

    {
        let app = app.clone();
        listen(&document, "touchstart", true, true, move |event| {
            if let Some(target) = event_element(&event) {
                let response = dispatch(&app, UiEvent::TouchStart(target));
                apply(&app, response, None);
            }
        });
    }

    {
        let app = app.clone();
        listen(&window_target, "resize", false, true, move |_| {
            let response = dispatch(&app, UiEvent::Resize);
            apply(&app, response, None);
        });
    }

    {
        let app = app.clone();
        listen(&window_target, "popstate", false, false, move |_| {
            let response = dispatch(&app, UiEvent::PopState);
            apply(&app, response, None);
        });
    }

    let dark_query = app.borrow().page.dark_query();
    match dark_query {
        Some(query) => {
            let app = app.clone();
            listen(query.as_ref(), "change", false, false, move |event| {
                let Some(change) = event.dyn_ref::<MediaQueryListEvent>() else {
                    return;
                };
                let response = dispatch(&app, UiEvent::SystemTheme { dark: change.matches() });
                apply(&app, response, None);
            });
        }
        None => debug!("color scheme queries unsupported, not following system theme"),
    }

    info!("listeners installed");
}

fn event_element(event: &Event) -> Option<Element> {
    event.target()?.dyn_into::<Element>().ok()
}

fn dispatch(app: &SharedApp, event: UiEvent<Element>) -> Response {
    let mut app = app.borrow_mut();
    let App { page, controller } = &mut *app;

    controller.handle(page, event)
}

// carry out what the controller asked for; deferred work comes back in through dispatch()
fn apply(app: &SharedApp, response: Response, event: Option<&Event>) {
    if response.prevent_default {
        if let Some(event) = event {
            event.prevent_default();
        }
    }

    for scheduled in response.scheduled {
        let app = app.clone();

        Timeout::new(scheduled.delay_ms, move || {
            let response = dispatch(&app, UiEvent::Deferred(scheduled.task));
            apply(&app, response, None);
        })
        .forget();
    }
}

// listeners live as long as the page, so the closures are leaked on purpose
fn listen<F>(target: &EventTarget, kind: &str, capture: bool, passive: bool, handler: F)
where
    F: FnMut(Event) + 'static,
{
    let closure = Closure::<dyn FnMut(Event)>::new(handler);

    let options = AddEventListenerOptions::new();
    options.set_capture(capture);
    options.set_passive(passive);

    if let Err(err) = target.add_event_listener_with_callback_and_add_event_listener_options(
        kind,
        closure.as_ref().unchecked_ref(),
        &options,
    ) {
        error!("failed to listen for {kind}: {err:?}");
    }

    closure.forget();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boots_immediately_once_parsing_is_done() {
        assert!(still_loading("loading"));
        assert!(!still_loading("interactive"));
        assert!(!still_loading("complete"));
    }
}
