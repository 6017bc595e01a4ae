use crate::{landing_route, use_api};
use dioxus::prelude::*;

/// `/` has no screen of its own.
#[component]
pub fn Home() -> Element {
    let client = use_api();
    navigator().replace(landing_route(client.session()));

    rsx! {
        div { class: "loading", "Loading..." }
    }
}
