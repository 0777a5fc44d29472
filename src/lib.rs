//! Engine-independent core of a side-scrolling shooting gallery.
//!
//! A host (game engine, terminal front end, or test harness) owns rendering,
//! physics and input devices.  It drives a [`session::Session`] with frame
//! times, inputs and collisions, and reacts to the [`entities::HostEvent`]s
//! the session emits.

pub mod compute;
pub mod config;
pub mod entities;
pub mod error;
pub mod lottery;
pub mod session;
pub mod slowmo;
pub mod stats;
pub mod timer;
pub mod upgrade;
pub mod wall;
