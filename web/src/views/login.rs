use crate::{Route, use_api};
use dioxus::prelude::*;

use super::components::{AuthCard, Field, FormMessage};

const LOGIN_FAILED: &str = "Sign in failed, please try again.";

#[component]
pub fn Login(message: Option<String>) -> Element {
    let client = use_api();
    let mut username = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error = use_signal(|| None::<String>);
    let mut submitting = use_signal(|| false);

    let can_submit = !username.read().is_empty() && !password.read().is_empty();

    let submit = move |e: FormEvent| {
        e.prevent_default();
        let client = client.clone();
        let name = username.read().clone();
        let secret = password.read().clone();
        spawn(async move {
            submitting.set(true);
            error.set(None);
            let result = client.login(&name, &secret).await;
            submitting.set(false);

            match result {
                Ok(()) => {
                    navigator().push(Route::Dashboard {});
                }
                Err(e) => {
                    tracing::warn!(error = %e, "login failed");
                    error.set(Some(e.server_message().unwrap_or(LOGIN_FAILED).to_string()));
                }
            }
        });
    };

    rsx! {
        AuthCard { subtitle: "Sign in to continue",
            FormMessage { message: message.clone(), success: true }
            form { onsubmit: submit,
                Field {
                    id: "username",
                    label: "Username",
                    value: username(),
                    autocomplete: "username",
                    oninput: move |v| username.set(v),
                }
                Field {
                    id: "password",
                    label: "Password",
                    kind: "password",
                    value: password(),
                    autocomplete: "current-password",
                    oninput: move |v| password.set(v),
                }
                FormMessage { message: error() }
                button {
                    r#type: "submit",
                    class: "btn btn-primary login-btn",
                    disabled: !can_submit || submitting(),
                    if submitting() { "Signing in..." } else { "Sign in" }
                }
            }
            div { class: "login-links",
                Link { to: Route::Register {}, "Create an account" }
                Link { to: Route::ResetPassword {}, "Forgot password?" }
            }
        }
    }
}
