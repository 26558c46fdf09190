//! Core domain types and poll logic for the deploygate CI gate.
//!
//! This crate is infrastructure-free: the queue and status store are
//! trait seams ([`queue::MessageQueue`], [`store::StatusStore`]) so the
//! poll loop can be exercised against scripted implementations.  The AWS
//! implementations live in `deploygate-cloud`.

pub mod config;
pub mod poll;
pub mod queue;
pub mod record;
pub mod store;
