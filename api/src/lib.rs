mod client;
mod config;
pub mod listing;
mod session;

pub use client::ApiClient;
pub use config::{API_URL_VAR, Config, DEFAULT_API_URL};
pub use listing::{EmployeeListing, Fetch, FetchPhase, Ticket};
#[cfg(target_arch = "wasm32")]
pub use session::BrowserTokenStore;
pub use session::{MemoryTokenStore, Session, StoreError, TOKEN_KEY, TokenStore};
pub use types::{Error, Result};
