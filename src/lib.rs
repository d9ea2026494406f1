//! Client core for the yoga session booking app.
//!
//! ARCHITECTURE
//! ============
//! - `state`: the logged-in user container every other layer observes.
//! - `net`: wire types and the `reqwest` client behind narrow service traits.
//! - `util`: guards, navigation/notification seams and form validators.
//! - `routes`: the path table and guard activation.
//! - `pages`: one controller per screen, driving services and navigation.
//! - `app`: wiring of the above plus the nav bar.
//!
//! Everything is single-threaded. Handles are `Rc`-based and the service
//! traits produce `!Send` futures, so drive them from a current-thread
//! executor or a `LocalSet`.

pub mod app;
pub mod config;
pub mod net;
pub mod pages;
pub mod routes;
pub mod state;
pub mod util;

#[cfg(test)]
mod test_helpers;

pub use app::{AppContext, NavBar, NavLink};
pub use config::{ClientConfig, ConfigError};
pub use net::api::{ApiClient, ApiError};
pub use net::types::SessionInformation;
pub use pages::PageError;
pub use state::session::SessionState;
