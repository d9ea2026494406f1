//! Helpers shared across page controllers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate routing, notification and validation concerns
//! from page logic so each page stays a thin orchestration layer.

pub mod auth;
pub mod form;
pub mod nav;
