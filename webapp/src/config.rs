use common::config::{UiConfig, parse_config};
use tracing::{debug, warn};
use web_sys::Document;

// pages can carry overrides in <script type="application/toml" id="site-ui-config">
const CONFIG_ELEMENT: &str = "site-ui-config";

pub fn page_config(document: &Document) -> UiConfig {
    let Some(doc) = document
        .get_element_by_id(CONFIG_ELEMENT)
        .and_then(|element| element.text_content())
    else {
        debug!("no inline config, using defaults");
        return UiConfig::default();
    };

    match parse_config(&doc) {
        Ok(config) => config,
        Err(err) => {
            warn!("ignoring inline config: {err:#}");
            UiConfig::default()
        }
    }
}
