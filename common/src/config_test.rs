use super::*;

#[test]
fn empty_document_yields_defaults() {
    let config = parse_config("").unwrap();
    assert_eq!(config, UiConfig::default());
    assert_eq!(config.breakpoint, 768);
    assert_eq!(config.close_delay_ms, 300);
    assert_eq!(config.theme.storage_key, "theme");
}

#[test]
fn partial_tables_keep_remaining_defaults() {
    let doc = r#"
        [config]
        breakpoint = 900

        [config.nav]
        dropdown_open_class = "open"
    "#;

    let config = parse_config(doc).unwrap();
    assert_eq!(config.breakpoint, 900);
    assert_eq!(config.nav.dropdown_open_class, "open");
    assert_eq!(config.nav.dropdown_trigger, ".resources-btn");
    assert_eq!(config.tabs, TabConfig::default());
}

#[test]
fn rendered_defaults_parse_back() {
    let doc = render_config(&UiConfig::default()).unwrap();
    assert!(doc.contains("[config.theme]"));
    assert_eq!(parse_config(&doc).unwrap(), UiConfig::default());
}

#[test]
fn rejects_bad_values() {
    assert!(parse_config("[config]\nbreakpoint = 0\n").is_err());
    assert!(parse_config("[config.tabs]\nlinks = \"nav a\"\n").is_err());
    assert!(parse_config("[config.nav]\nopen_class = \"\"\n").is_err());
    assert!(parse_config("[config.nav]\nopen_class = \"is open\"\n").is_err());
    assert!(parse_config("[config]\nbreakpoint = \"wide\"\n").is_err());
}

#[test]
fn invalid_selector_error_names_the_field() {
    let err = parse_config("[config.theme]\ntoggle = \"#a > b\"\n").unwrap_err();
    assert!(format!("{err:#}").contains("theme.toggle"));
}
