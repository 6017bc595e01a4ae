use crate::{Route, use_api};
use dioxus::prelude::*;

use super::new_password::NewPasswordForm;

const REGISTERED: &str = "Registration successful, please sign in.";

#[component]
pub fn Register() -> Element {
    let client = use_api();
    let mut error = use_signal(|| None::<String>);
    let mut submitting = use_signal(|| false);

    let register = move |(username, password): (String, String)| {
        let client = client.clone();
        spawn(async move {
            submitting.set(true);
            error.set(None);
            let result = client.register(&username, &password).await;
            submitting.set(false);

            match result {
                Ok(ack) => {
                    tracing::info!(%username, "registered");
                    let message = ack.message.unwrap_or_else(|| REGISTERED.to_string());
                    navigator().push(Route::login_with(message));
                }
                Err(e) => {
                    tracing::warn!(error = %e, "registration failed");
                    error.set(Some(e.user_message()));
                }
            }
        });
    };

    rsx! {
        NewPasswordForm {
            subtitle: "Create an account",
            password_label: "Password",
            submit_label: "Register",
            busy_label: "Registering...",
            submitting: submitting(),
            error: error(),
            on_submit: register,
            Link { to: Route::login(), "Already have an account? Sign in" }
        }
    }
}
