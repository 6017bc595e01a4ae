use api::{ApiClient, Config, Error, Session};
use dioxus::prelude::*;

mod views;

use views::{Dashboard, Employees, Home, Login, Register, ResetPassword};

pub const SESSION_EXPIRED: &str = "Your session has expired, please sign in again.";

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[route("/")]
    Home {},
    #[route("/login?:message")]
    Login { message: Option<String> },
    #[route("/register")]
    Register {},
    #[route("/reset-password")]
    ResetPassword {},
    #[layout(AuthenticatedLayout)]
        #[route("/dashboard")]
        Dashboard {},
        #[route("/employees")]
        Employees {},
}

impl Route {
    pub fn login() -> Self {
        Route::Login { message: None }
    }

    pub fn login_with(message: impl Into<String>) -> Self {
        Route::Login {
            message: Some(message.into()),
        }
    }
}

/// Where a visitor to a protected screen has to go instead, if anywhere.
pub fn protected_redirect(session: &Session) -> Option<Route> {
    (!session.is_authenticated()).then(Route::login)
}

/// Target of the bare `/` route.
pub fn landing_route(session: &Session) -> Route {
    if session.is_authenticated() {
        Route::Dashboard {}
    } else {
        Route::login()
    }
}

fn main() {
    dioxus::logger::initialize_default();

    #[cfg(feature = "web")]
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    use_context_provider(connect);

    rsx! {
        document::Title { "Employee Manager" }
        document::Link { rel: "icon", href: asset!("/assets/favicon.svg") }
        document::Link { rel: "stylesheet", href: asset!("/assets/main.css") }

        Router::<Route> {}
    }
}

fn connect() -> ApiClient {
    let config = Config::from_env().unwrap_or_else(|error| {
        tracing::error!(%error, "invalid API address, using {}", api::DEFAULT_API_URL);
        Config::default()
    });
    tracing::info!(base_url = %config.base_url, "using employee API");

    ApiClient::new(config, Session::local())
}

/// The shared API client. Its session is the one every screen checks.
pub fn use_api() -> ApiClient {
    use_context::<ApiClient>()
}

#[component]
fn NavLink(to: Route, children: Element) -> Element {
    let current_route: Route = use_route();
    let is_active = matches!(
        (&current_route, &to),
        (Route::Dashboard {}, Route::Dashboard {}) | (Route::Employees {}, Route::Employees {})
    );

    rsx! {
        Link {
            to,
            class: if is_active { "active" },
            {children}
        }
    }
}

/// What the error banner shows.
#[derive(Clone, Debug, PartialEq)]
pub struct ErrorInfo {
    pub context: String,
    pub message: String,
    pub status: Option<u16>,
}

impl ErrorInfo {
    pub fn new(context: &str, error: &Error) -> Self {
        Self {
            context: context.to_string(),
            message: error.user_message(),
            status: error.status(),
        }
    }
}

/// Error sink for the protected screens - use `use_error()` to access.
#[derive(Clone, Copy)]
pub struct ErrorState(Signal<Option<ErrorInfo>>);

impl ErrorState {
    /// Surface a failed call. A rejected session goes straight back to the
    /// login screen; anything else is shown in the banner.
    pub fn report(&mut self, context: &str, error: &Error) {
        if error.is_unauthorized() {
            tracing::info!("session rejected, returning to login");
            navigator().push(Route::login_with(SESSION_EXPIRED));
            return;
        }

        tracing::error!(%error, "{context}");
        self.0.set(Some(ErrorInfo::new(context, error)));
    }

    pub fn clear(&mut self) {
        self.0.set(None);
    }
}

pub fn use_error() -> ErrorState {
    use_context::<ErrorState>()
}

#[component]
fn ErrorBanner() -> Element {
    let mut error_state = use_error();
    let Some(err) = error_state.0.read().clone() else {
        return rsx! {};
    };

    rsx! {
        div { class: "error-banner", role: "alert",
            div { class: "error-banner-content",
                div { class: "error-banner-header",
                    span { class: "error-banner-message", "{err.context}" }
                    div { class: "error-banner-actions",
                        if let Some(status) = err.status {
                            span { class: "error-banner-status", "HTTP {status}" }
                        }
                        button {
                            class: "error-banner-close",
                            onclick: move |_| error_state.clear(),
                            "×"
                        }
                    }
                }
                p { class: "error-banner-detail", "{err.message}" }
            }
        }
    }
}

#[component]
fn AuthenticatedLayout() -> Element {
    let client = use_api();
    use_context_provider(|| ErrorState(Signal::new(None)));

    if let Some(route) = protected_redirect(client.session()) {
        navigator().push(route);
        return rsx! {
            div { class: "loading", "Redirecting to login..." }
        };
    }

    let session = client.session().clone();

    rsx! {
        div { class: "app-layout",
            // Sidebar
            aside { class: "sidebar",
                div { class: "sidebar-header",
                    span { class: "sidebar-logo", "Employee Manager" }
                }
                nav { class: "sidebar-nav",
                    NavLink { to: Route::Dashboard {}, "Dashboard" }
                    NavLink { to: Route::Employees {}, "Employees" }
                }
                div { class: "sidebar-footer",
                    div { class: "sidebar-user",
                        div { class: "sidebar-avatar", "A" }
                        div { class: "sidebar-user-info",
                            div { class: "sidebar-user-name", "Administrator" }
                            div { class: "sidebar-user-role", "Signed in" }
                        }
                    }
                    button {
                        class: "sidebar-logout",
                        onclick: move |_| {
                            if session.sign_out().is_ok() {
                                tracing::info!("signed out");
                            }
                            navigator().push(Route::login());
                        },
                        "Sign out"
                    }
                }
            }
            // Main content
            main { class: "main-content",
                ErrorBanner {}
                Outlet::<Route> {}
            }
        }
    }
}
