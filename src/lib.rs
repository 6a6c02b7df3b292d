//! Voice skill for a Brennan B2 music player.
//!
//! Skill events are dispatched to the device over its CGI interface. Album
//! requests load the device's album catalog and pick the closest title to
//! what the user said.

pub mod backends;
pub mod catalog;
pub mod config;
pub mod config_persistence;
pub mod error;
pub mod protocol;
pub mod resolver;
pub mod skill_handler;
pub mod speech;
