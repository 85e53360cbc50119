//! # Storage Module
//!
//! Reservations live in an external document store. This module defines the
//! seam the calendar reads them through and ships an in-memory store that
//! implements it.
//!
//! ## Key Responsibilities
//!
//! - **Snapshot Reads**: One-shot listing of reservations by listing, guest or host
//! - **Live Subscriptions**: Push a full snapshot after every matching change
//! - **Storage Abstraction**: The domain never sees a concrete backend
//!
//! ## Current Implementation
//!
//! - **InMemoryReservationStore**: `Vec` behind a mutex with `tokio::sync::watch`
//!   channels per subscriber

pub mod memory;
pub mod traits;

pub use memory::InMemoryReservationStore;
pub use traits::{ReservationSource, ReservationSubscription};
