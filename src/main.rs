#![allow(non_snake_case)]

use dioxus::prelude::*;

// Modules
mod components;
mod hooks;
mod services;
mod stores;
mod utils;

use components::ThreadView;

fn main() {
    // Initialize panic hook for better error messages in browser console
    #[cfg(target_arch = "wasm32")]
    {
        console_error_panic_hook::set_once();
        wasm_logger::init(wasm_logger::Config::new(log::Level::Info));
    }

    log::info!("Starting melly web client");

    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    use_effect(|| {
        // Outside-click dismissal ships disabled (it used to close the
        // popover during in-menu pagination); the listener is only wired
        // when the flag is turned back on.
        #[cfg(target_family = "wasm")]
        if stores::popover_store::OUTSIDE_CLICK_DISMISS_ENABLED {
            stores::popover_store::install_outside_click_listener();
        }
    });

    rsx! {
        ThreadView {}
    }
}
