//! Domain-level query types.
//! These are used by the domain layer and the storage seam; they are not part
//! of the serialized DTOs in the `shared` crate.

pub mod reservations {
    use shared::Reservation;

    /// Which reservations a view subscribes to
    #[derive(Debug, Clone, PartialEq, Eq, Hash)]
    pub enum ReservationFilter {
        /// Every reservation of one listing (listing detail / booking view)
        Listing(String),
        /// Reservations made by one guest
        Guest(String),
        /// Reservations on any listing owned by one host
        Host(String),
    }

    impl ReservationFilter {
        pub fn matches(&self, reservation: &Reservation) -> bool {
            match self {
                ReservationFilter::Listing(id) => reservation.listing_id == *id,
                ReservationFilter::Guest(id) => reservation.guest_id == *id,
                ReservationFilter::Host(id) => reservation.host_id == *id,
            }
        }
    }

}
