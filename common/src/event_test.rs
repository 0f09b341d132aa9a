use super::*;

#[test]
fn default_response_asks_for_nothing() {
    let response = Response::default();

    assert!(!response.prevent_default);
    assert!(response.scheduled.is_empty());
}

#[test]
fn merge_keeps_prevent_default_and_timer_order() {
    let mut response = Response::default();
    response.schedule(300, Deferred::CloseMenu(MenuId::Hamburger));

    let mut other = Response {
        prevent_default: true,
        ..Response::default()
    };
    other.schedule(100, Deferred::Reveal(String::from("pricing")));

    response.merge(other);
    response.merge(Response::default());

    assert!(response.prevent_default);
    assert_eq!(
        response.scheduled,
        vec![
            Scheduled {
                delay_ms: 300,
                task: Deferred::CloseMenu(MenuId::Hamburger),
            },
            Scheduled {
                delay_ms: 100,
                task: Deferred::Reveal(String::from("pricing")),
            },
        ]
    );
}
