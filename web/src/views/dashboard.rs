use crate::Route;
use dioxus::prelude::*;

#[component]
pub fn Dashboard() -> Element {
    rsx! {
        div {
            div { class: "page-header",
                h1 { class: "page-title", "Dashboard" }
                p { class: "page-subtitle", "Welcome back. Pick an area to work in." }
            }
            div { class: "dashboard-grid",
                Link {
                    to: Route::Employees {},
                    class: "dashboard-card",
                    h3 { class: "dashboard-card-title", "Manage Employees" }
                    p { class: "dashboard-card-desc",
                        "Search the staff directory, add new hires, and keep records up to date."
                    }
                }
            }
        }
    }
}
