//! Single-room chat demo with a simulated audience.
//!
//! The local user logs in with any name, chats in one room, and a background
//! simulation plays the other participants. Session and history live in a
//! small SQLite key-value file.

pub mod chat;
pub mod common;
pub mod config;
pub mod simulation;
pub mod storage;
pub mod ui;
