//! Shared client-side state.
//!
//! DESIGN
//! ======
//! One focused model per concern. Today that is only the logged-in user.

pub mod session;
