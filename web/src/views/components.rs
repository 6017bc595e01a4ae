use dioxus::prelude::*;
use types::EmployeeStatus;

/// Centered card shared by the sign-in, registration and password screens.
#[component]
pub fn AuthCard(subtitle: String, children: Element) -> Element {
    rsx! {
        div { class: "login-page",
            div { class: "login-card",
                div { class: "login-header",
                    h1 { class: "login-title", "Employee Manager" }
                    p { class: "login-subtitle", "{subtitle}" }
                }
                {children}
            }
        }
    }
}

/// A labelled input that reports every keystroke.
#[component]
pub fn Field(
    id: String,
    label: String,
    value: String,
    oninput: EventHandler<String>,
    #[props(default = "text".to_string())] kind: String,
    #[props(default)] placeholder: String,
    #[props(default)] autocomplete: String,
) -> Element {
    rsx! {
        div { class: "form-group",
            label { class: "form-label", r#for: "{id}", "{label}" }
            input {
                id: "{id}",
                class: "form-input",
                r#type: "{kind}",
                placeholder: "{placeholder}",
                autocomplete: "{autocomplete}",
                value: "{value}",
                oninput: move |e| oninput.call(e.value()),
            }
        }
    }
}

/// Inline error under a form. Renders nothing when there is no message.
#[component]
pub fn FormMessage(message: Option<String>, #[props(default)] success: bool) -> Element {
    let Some(message) = message else {
        return rsx! {};
    };

    rsx! {
        div {
            class: if success { "form-message form-message-success" } else { "form-message form-message-error" },
            role: "alert",
            "{message}"
        }
    }
}

#[component]
pub fn StatusBadge(status: EmployeeStatus) -> Element {
    rsx! {
        span { class: "badge badge-{status.as_str()}", "{status.label()}" }
    }
}
