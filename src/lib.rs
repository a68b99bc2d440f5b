//! Waypost: location-based reminders in the terminal.
//!
//! A thin client over a remote place/user API. The pieces:
//! - [`session`]: the versioned local session store (who is logged in).
//! - [`location`]: the continuous position watch behind a pluggable source.
//! - [`cache`]: the owner-keyed place cache and its fetch-or-reuse rules.
//! - [`nav`]: the page state machine and its transition side effects.
//! - [`events`] and [`ui`]: keyboard handling and rendering.
//! - [`app`]: the event loop tying it all together.

pub mod api;
pub mod app;
pub mod args;
pub mod cache;
pub mod config;
pub mod error;
pub mod events;
pub mod geo;
pub mod location;
pub mod nav;
pub mod session;
pub mod state;
pub mod ui;
pub mod util;
