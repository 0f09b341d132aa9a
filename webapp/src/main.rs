use tracing::Level;

mod config;
mod events;
mod page;
mod storage;

fn main() {
    dioxus_logger::init(Level::DEBUG).expect("failed to init logger");
    events::boot();
}
