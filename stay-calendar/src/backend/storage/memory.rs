//! # In-Memory Reservation Store
//!
//! A [`ReservationSource`] that keeps reservations in a `Vec` and pushes a
//! fresh filtered snapshot to every live subscriber after each change. Used
//! by tests and demos in place of the hosted document store.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use log::{debug, info};
use shared::Reservation;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::watch;
use uuid::Uuid;

use super::traits::{ReservationSource, ReservationSubscription};
use crate::backend::domain::ReservationFilter;

#[derive(Default)]
struct StoreInner {
    reservations: Vec<Reservation>,
    subscribers: Vec<(ReservationFilter, watch::Sender<Vec<Reservation>>)>,
    closed: bool,
}

impl StoreInner {
    fn snapshot(&self, filter: &ReservationFilter) -> Vec<Reservation> {
        self.reservations
            .iter()
            .filter(|reservation| filter.matches(reservation))
            .cloned()
            .collect()
    }

    /// Push snapshots to subscribers whose filter matches `changed`, dropping
    /// subscribers that went away
    fn notify(&mut self, changed: &Reservation) {
        self.subscribers.retain(|(_, sender)| !sender.is_closed());

        let mut notified = 0;
        for (filter, sender) in &self.subscribers {
            if filter.matches(changed) {
                let snapshot: Vec<Reservation> = self
                    .reservations
                    .iter()
                    .filter(|reservation| filter.matches(reservation))
                    .cloned()
                    .collect();
                // send only fails when every receiver is gone, pruned next time
                let _ = sender.send(snapshot);
                notified += 1;
            }
        }
        debug!("Notified {} subscribers about reservation {}", notified, changed.id);
    }
}

#[derive(Clone, Default)]
pub struct InMemoryReservationStore {
    inner: Arc<Mutex<StoreInner>>,
}

impl InMemoryReservationStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, StoreInner>> {
        self.inner
            .lock()
            .map_err(|_| anyhow!("Reservation store lock poisoned"))
    }

    fn lock_open(&self) -> Result<MutexGuard<'_, StoreInner>> {
        let inner = self.lock()?;
        if inner.closed {
            return Err(anyhow!("Reservation store is closed"));
        }
        Ok(inner)
    }

    /// Store a reservation, assigning an id when it has none. Returns the id.
    pub fn insert(&self, mut reservation: Reservation) -> Result<String> {
        let mut inner = self.lock_open()?;

        if reservation.id.is_empty() {
            reservation.id = format!("reservation::{}", Uuid::new_v4());
        }
        if inner.reservations.iter().any(|r| r.id == reservation.id) {
            return Err(anyhow!("Reservation {} already exists", reservation.id));
        }

        let id = reservation.id.clone();
        inner.reservations.push(reservation.clone());
        inner.notify(&reservation);
        info!("📥 Stored reservation {}", id);
        Ok(id)
    }

    /// Change the status of an existing reservation
    pub fn update_status(&self, reservation_id: &str, status: &str) -> Result<()> {
        let mut inner = self.lock_open()?;

        let reservation = inner
            .reservations
            .iter_mut()
            .find(|r| r.id == reservation_id)
            .ok_or_else(|| anyhow!("Reservation {} not found", reservation_id))?;
        reservation.status = status.to_string();
        let changed = reservation.clone();

        inner.notify(&changed);
        info!("🔄 Reservation {} is now {}", reservation_id, status);
        Ok(())
    }

    /// Remove a reservation. Returns false when it did not exist.
    pub fn delete(&self, reservation_id: &str) -> Result<bool> {
        let mut inner = self.lock_open()?;

        let Some(position) = inner.reservations.iter().position(|r| r.id == reservation_id) else {
            return Ok(false);
        };
        let removed = inner.reservations.remove(position);
        inner.notify(&removed);
        info!("🗑️ Deleted reservation {}", reservation_id);
        Ok(true)
    }

    /// Simulate the backend going away: every subscription ends and further
    /// writes fail
    pub fn close(&self) -> Result<()> {
        let mut inner = self.lock()?;
        inner.closed = true;
        inner.subscribers.clear();
        info!("🔌 Reservation store closed");
        Ok(())
    }

    pub fn subscriber_count(&self) -> Result<usize> {
        let mut inner = self.lock()?;
        inner.subscribers.retain(|(_, sender)| !sender.is_closed());
        Ok(inner.subscribers.len())
    }
}

#[async_trait]
impl ReservationSource for InMemoryReservationStore {
    async fn list_reservations(&self, filter: &ReservationFilter) -> Result<Vec<Reservation>> {
        let inner = self.lock_open()?;
        Ok(inner.snapshot(filter))
    }

    async fn subscribe(&self, filter: ReservationFilter) -> Result<ReservationSubscription> {
        let mut inner = self.lock_open()?;
        let (sender, receiver) = watch::channel(inner.snapshot(&filter));
        debug!("New reservation subscription for {:?}", filter);
        inner.subscribers.push((filter, sender));
        Ok(receiver)
    }
}
