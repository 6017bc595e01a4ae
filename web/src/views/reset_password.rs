use crate::{Route, use_api};
use dioxus::prelude::*;

use super::new_password::NewPasswordForm;

const PASSWORD_RESET: &str = "Password updated, please sign in with the new password.";

#[component]
pub fn ResetPassword() -> Element {
    let client = use_api();
    let mut error = use_signal(|| None::<String>);
    let mut submitting = use_signal(|| false);

    let reset = move |(username, new_password): (String, String)| {
        let client = client.clone();
        spawn(async move {
            submitting.set(true);
            error.set(None);
            let result = client.reset_password(&username, &new_password).await;
            submitting.set(false);

            match result {
                Ok(ack) => {
                    tracing::info!(%username, "password reset");
                    let message = ack.message.unwrap_or_else(|| PASSWORD_RESET.to_string());
                    navigator().push(Route::login_with(message));
                }
                Err(e) => {
                    tracing::warn!(error = %e, "password reset failed");
                    error.set(Some(e.user_message()));
                }
            }
        });
    };

    rsx! {
        NewPasswordForm {
            subtitle: "Reset your password",
            password_label: "New Password",
            submit_label: "Reset Password",
            busy_label: "Saving...",
            submitting: submitting(),
            error: error(),
            on_submit: reset,
            Link { to: Route::login(), "Back to sign in" }
        }
    }
}
