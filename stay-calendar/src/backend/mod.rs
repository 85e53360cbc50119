//! # Backend Module
//!
//! Contains all non-UI logic for the stay booking calendar.
//!
//! This module brings together:
//! - **Domain**: Availability, calendar and range-selection rules
//! - **Storage**: The reservation source seam and an in-memory implementation
//!
//! ## Architecture
//!
//! ```text
//! Reservation source (subscription)
//!     ↓  Vec<Reservation> snapshot
//! AvailabilityFeed (rebuilds the index on every snapshot)
//!     ↓  Arc<AvailabilityIndex>
//! CalendarNavigator / RangePicker / conflict checks
//! ```

pub mod domain;
pub mod storage;

use anyhow::Result;
use log::{info, warn};
use shared::{CalendarConfig, Reservation};
use std::sync::Arc;

pub use domain::*;
pub use storage::*;

/// Keeps an [`AvailabilityIndex`] in step with a reservation subscription.
///
/// Every snapshot replaces the index wholesale. When the source goes away the
/// last index stays available through [`AvailabilityFeed::current`].
pub struct AvailabilityFeed {
    filter: ReservationFilter,
    receiver: ReservationSubscription,
    index: Arc<AvailabilityIndex>,
    config: CalendarConfig,
    source_closed: bool,
}

impl AvailabilityFeed {
    /// Subscribe to `source` and build the index from its first snapshot
    pub async fn subscribe(
        source: &dyn ReservationSource,
        filter: ReservationFilter,
        config: CalendarConfig,
    ) -> Result<Self> {
        info!("📡 Subscribing to reservations for {:?}", filter);
        let mut receiver = source.subscribe(filter.clone()).await?;

        let snapshot: Vec<Reservation> = receiver.borrow_and_update().clone();
        let index = Arc::new(AvailabilityIndex::build_with_config(&snapshot, &config));
        info!(
            "📅 Initial availability for {:?}: {} blocked days",
            filter,
            index.blocked_days().len()
        );

        Ok(Self {
            filter,
            receiver,
            index,
            config,
            source_closed: false,
        })
    }

    pub fn filter(&self) -> &ReservationFilter {
        &self.filter
    }

    /// Latest index; after the source closes this is the last one built
    pub fn current(&self) -> Arc<AvailabilityIndex> {
        Arc::clone(&self.index)
    }

    pub fn is_source_closed(&self) -> bool {
        self.source_closed
    }

    /// Wait for the next snapshot and rebuild the index from it.
    ///
    /// Returns `None` once the source is unavailable; the last index is kept.
    pub async fn changed(&mut self) -> Option<Arc<AvailabilityIndex>> {
        if self.source_closed {
            return None;
        }

        if self.receiver.changed().await.is_err() {
            warn!(
                "⚠️ Reservation source for {:?} is unavailable, keeping last known availability",
                self.filter
            );
            self.source_closed = true;
            return None;
        }

        let snapshot: Vec<Reservation> = self.receiver.borrow_and_update().clone();
        self.index = Arc::new(AvailabilityIndex::build_with_config(&snapshot, &self.config));
        info!(
            "🔄 Availability rebuilt for {:?}: {} reservations, {} blocked days",
            self.filter,
            snapshot.len(),
            self.index.blocked_days().len()
        );
        Some(self.current())
    }
}
