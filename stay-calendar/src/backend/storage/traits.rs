//! # Storage Traits
//!
//! The reservation store is an external collaborator. This trait is the only
//! way the calendar core reaches it, so any hosted document database can sit
//! behind it.

use anyhow::Result;
use async_trait::async_trait;
use shared::Reservation;
use tokio::sync::watch;

use crate::backend::domain::ReservationFilter;

/// Push stream of full reservation snapshots. Each value replaces the last.
/// The sender side being dropped means the source is gone.
pub type ReservationSubscription = watch::Receiver<Vec<Reservation>>;

/// Read access to reservations
#[async_trait]
pub trait ReservationSource: Send + Sync {
    /// One-shot read of every reservation matching `filter`
    async fn list_reservations(&self, filter: &ReservationFilter) -> Result<Vec<Reservation>>;

    /// Live subscription; the receiver starts with the current snapshot and
    /// is updated after every insert, update or delete matching `filter`
    async fn subscribe(&self, filter: ReservationFilter) -> Result<ReservationSubscription>;
}
