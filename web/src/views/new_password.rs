use dioxus::prelude::*;
use types::auth::check_new_password;

use super::components::{AuthCard, Field, FormMessage};

/// Username plus a new password typed twice, as used by registration and
/// password reset.
///
/// The mismatch and length checks run here; `on_submit` only receives
/// `(username, password)` pairs that passed them. Server-side failures come
/// back in through `error`.
#[component]
pub fn NewPasswordForm(
    subtitle: String,
    password_label: String,
    submit_label: String,
    busy_label: String,
    submitting: bool,
    error: Option<String>,
    on_submit: EventHandler<(String, String)>,
    children: Element,
) -> Element {
    let mut username = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut confirmation = use_signal(String::new);
    let mut rejected = use_signal(|| None::<String>);

    let can_submit = !username.read().is_empty() && !password.read().is_empty();
    let message = rejected().or(error);

    let submit = move |e: FormEvent| {
        e.prevent_default();
        let checked = check_new_password(&password.read(), &confirmation.read());
        match checked {
            Ok(()) => {
                rejected.set(None);
                on_submit.call((username(), password()));
            }
            Err(problem) => rejected.set(Some(problem.to_string())),
        }
    };

    rsx! {
        AuthCard { subtitle,
            form { onsubmit: submit,
                Field {
                    id: "username",
                    label: "Username",
                    value: username(),
                    autocomplete: "username",
                    oninput: move |v| username.set(v),
                }
                Field {
                    id: "new_password",
                    label: "{password_label}",
                    kind: "password",
                    value: password(),
                    autocomplete: "new-password",
                    oninput: move |v| password.set(v),
                }
                Field {
                    id: "confirm_password",
                    label: "Confirm {password_label}",
                    kind: "password",
                    value: confirmation(),
                    autocomplete: "new-password",
                    oninput: move |v| confirmation.set(v),
                }
                FormMessage { message }
                button {
                    r#type: "submit",
                    class: "btn btn-primary login-btn",
                    disabled: !can_submit || submitting,
                    if submitting { "{busy_label}" } else { "{submit_label}" }
                }
            }
            div { class: "login-links", {children} }
        }
    }
}
