//! # Reservation View State
//!
//! One explicit state record per reservation-management screen (host
//! dashboard or guest trips), changed only through [`ReservationViewState::apply`].
//!
//! ## Responsibilities:
//! - Latest reservation snapshot and the index/overlay derived from it
//! - Day filter driven by calendar clicks
//! - Selected reservation and modal visibility
//! - Feedback form for finished stays

use chrono::NaiveDate;
use log::{info, warn};
use shared::{CalendarConfig, Reservation};
use std::sync::Arc;

use super::availability::AvailabilityIndex;
use super::booked_dates::BookedDateOverlay;
use super::commands::reservations::ReservationFilter;
use super::date_utils::stay_dates;
use crate::error::{CalendarError, CalendarResult};

const MAX_FEEDBACK_LENGTH: usize = 1000;

/// Who is looking at the screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewerRole {
    Host,
    Guest,
}

/// Which modal, if any, is open. The view owns show/hide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalVisibility {
    Hidden,
    ReservationDetails,
    CancelConfirmation,
    Feedback,
    PhotoLightbox { photo_index: usize },
}

/// Feedback form state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedbackForm {
    pub rating: Option<u8>,
    pub comment: String,
    pub submitted: bool,
}

impl FeedbackForm {
    fn validate(&self) -> CalendarResult<()> {
        match self.rating {
            Some(1..=5) => {}
            Some(other) => {
                return Err(CalendarError::InvalidFeedback(format!(
                    "rating must be between 1 and 5, got {}",
                    other
                )))
            }
            None => return Err(CalendarError::InvalidFeedback("rating is required".to_string())),
        }

        let comment = self.comment.trim();
        if comment.is_empty() {
            return Err(CalendarError::InvalidFeedback("comment cannot be empty".to_string()));
        }
        if comment.chars().count() > MAX_FEEDBACK_LENGTH {
            return Err(CalendarError::InvalidFeedback(format!(
                "comment cannot exceed {} characters",
                MAX_FEEDBACK_LENGTH
            )));
        }
        Ok(())
    }
}

/// Transitions accepted by [`ReservationViewState::apply`]
#[derive(Debug, Clone, PartialEq)]
pub enum ViewAction {
    /// Full replacement snapshot from the subscription
    ReservationsReceived(Vec<Reservation>),
    /// Calendar click, month is 1-based as delivered by the navigator callback
    DayClicked { day: u32, month: u32, year: i32 },
    ClearDayFilter,
    SelectReservation(String),
    ClearSelection,
    ShowModal(ModalVisibility),
    HideModal,
    SetFeedbackRating(u8),
    SetFeedbackComment(String),
    SubmitFeedback,
}

#[derive(Debug, Clone)]
pub struct ReservationViewState {
    role: ViewerRole,
    owner_id: String,
    config: CalendarConfig,
    reservations: Vec<Reservation>,
    index: Arc<AvailabilityIndex>,
    overlay: BookedDateOverlay,
    selected_reservation: Option<String>,
    day_filter: Option<NaiveDate>,
    modal: ModalVisibility,
    feedback: FeedbackForm,
}

impl ReservationViewState {
    pub fn new(role: ViewerRole, owner_id: impl Into<String>, config: CalendarConfig) -> Self {
        Self {
            role,
            owner_id: owner_id.into(),
            config,
            reservations: Vec::new(),
            index: Arc::new(AvailabilityIndex::default()),
            overlay: BookedDateOverlay::default(),
            selected_reservation: None,
            day_filter: None,
            modal: ModalVisibility::Hidden,
            feedback: FeedbackForm::default(),
        }
    }

    /// Subscription filter for this screen
    pub fn filter(&self) -> ReservationFilter {
        match self.role {
            ViewerRole::Host => ReservationFilter::Host(self.owner_id.clone()),
            ViewerRole::Guest => ReservationFilter::Guest(self.owner_id.clone()),
        }
    }

    pub fn role(&self) -> ViewerRole {
        self.role
    }

    pub fn reservations(&self) -> &[Reservation] {
        &self.reservations
    }

    pub fn index(&self) -> Arc<AvailabilityIndex> {
        Arc::clone(&self.index)
    }

    pub fn overlay(&self) -> &BookedDateOverlay {
        &self.overlay
    }

    pub fn day_filter(&self) -> Option<NaiveDate> {
        self.day_filter
    }

    pub fn modal(&self) -> ModalVisibility {
        self.modal
    }

    pub fn feedback(&self) -> &FeedbackForm {
        &self.feedback
    }

    pub fn selected_reservation(&self) -> Option<&Reservation> {
        let id = self.selected_reservation.as_deref()?;
        self.reservations.iter().find(|r| r.id == id)
    }

    /// Reservations to list, narrowed to the clicked day when a filter is set
    pub fn visible_reservations(&self) -> Vec<&Reservation> {
        match self.day_filter {
            None => self.reservations.iter().collect(),
            Some(day) => self
                .reservations
                .iter()
                .filter(|reservation| match stay_dates(reservation) {
                    Ok((start, end)) => start <= day && day < end,
                    Err(_) => false,
                })
                .collect(),
        }
    }

    pub fn apply(&mut self, action: ViewAction) -> CalendarResult<()> {
        match action {
            ViewAction::ReservationsReceived(reservations) => {
                self.index = Arc::new(AvailabilityIndex::build_with_config(&reservations, &self.config));
                self.overlay = BookedDateOverlay::build(&reservations);
                self.reservations = reservations;
                info!("📋 Reservation view refreshed with {} reservations", self.reservations.len());

                if self.selected_reservation.is_some() && self.selected_reservation().is_none() {
                    warn!("⚠️ Selected reservation disappeared from snapshot, clearing selection");
                    self.selected_reservation = None;
                    self.modal = ModalVisibility::Hidden;
                }
            }
            ViewAction::DayClicked { day, month, year } => {
                let date = NaiveDate::from_ymd_opt(year, month, day)
                    .ok_or(CalendarError::InvalidDay { day, month, year })?;
                self.day_filter = Some(date);
            }
            ViewAction::ClearDayFilter => self.day_filter = None,
            ViewAction::SelectReservation(id) => {
                if self.reservations.iter().any(|r| r.id == id) {
                    self.selected_reservation = Some(id);
                } else {
                    warn!("⚠️ Ignoring selection of unknown reservation {}", id);
                }
            }
            ViewAction::ClearSelection => {
                self.selected_reservation = None;
                self.modal = ModalVisibility::Hidden;
            }
            ViewAction::ShowModal(modal) => {
                if modal == ModalVisibility::Feedback {
                    self.feedback = FeedbackForm::default();
                }
                self.modal = modal;
            }
            ViewAction::HideModal => self.modal = ModalVisibility::Hidden,
            ViewAction::SetFeedbackRating(rating) => self.feedback.rating = Some(rating),
            ViewAction::SetFeedbackComment(comment) => self.feedback.comment = comment,
            ViewAction::SubmitFeedback => {
                self.feedback.validate()?;
                self.feedback.submitted = true;
                self.modal = ModalVisibility::Hidden;
                info!("📝 Feedback ready for reservation {:?}", self.selected_reservation);
            }
        }
        Ok(())
    }
}
