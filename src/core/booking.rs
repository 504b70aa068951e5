use crate::core::pricing;
use crate::domain::model::{
    AccommodationType, Booking, BookingDraft, BookingStatus, BookingUpdate, StayRequest,
};
use crate::domain::ports::{BookingStore, RateResolver};
use crate::utils::error::{HotelError, Result};
use crate::utils::validation::{validate_email, validate_non_empty_string, Validate};

/// Booking CRUD over explicit ports. The rate resolver and the store are
/// collaborators passed in at construction, not ambient state.
pub struct BookingService<R: RateResolver, S: BookingStore> {
    resolver: R,
    store: S,
}

impl<R: RateResolver, S: BookingStore> BookingService<R, S> {
    pub fn new(resolver: R, store: S) -> Self {
        Self { resolver, store }
    }

    async fn resolve_rate(&self, kind: AccommodationType, id: i64) -> Result<f64> {
        // 查不到價格直接回錯誤，不會默默以 0 計價
        self.resolver
            .nightly_rate(kind, id)
            .await?
            .ok_or_else(|| HotelError::UnknownAccommodation {
                kind: kind.to_string(),
                id,
            })
    }

    pub async fn create(&self, draft: BookingDraft) -> Result<Booking> {
        draft.validate()?;

        let rate = self
            .resolve_rate(draft.accommodation_type, draft.accommodation_id)
            .await?;
        let quote = pricing::quote(&StayRequest {
            check_in: draft.check_in,
            check_out: draft.check_out,
            nightly_rate: rate,
        })?;

        let booking = Booking {
            id: 0, // assigned by the store
            guest_name: draft.guest_name,
            guest_email: draft.guest_email,
            phone: draft.phone,
            check_in: draft.check_in,
            check_out: draft.check_out,
            accommodation_type: draft.accommodation_type,
            accommodation_id: draft.accommodation_id,
            nights: quote.nights,
            total_price: quote.total,
            status: BookingStatus::Pending,
            created_at: chrono::Utc::now().naive_utc(),
        };

        let stored = self.store.insert(booking).await?;
        tracing::info!(
            "Created booking {} for {} ({} nights, total {})",
            stored.id,
            stored.guest_email,
            stored.nights,
            stored.total_price
        );
        Ok(stored)
    }

    pub async fn get(&self, id: i64) -> Result<Booking> {
        self.store
            .get(id)
            .await?
            .ok_or(HotelError::BookingNotFound { id })
    }

    pub async fn list(&self, skip: usize, limit: usize) -> Result<Vec<Booking>> {
        self.store.list(skip, limit).await
    }

    /// Applies a partial update. Any change to the dates or the accommodation
    /// re-resolves the rate and recomputes nights/total; an update that would
    /// produce an invalid date range fails without touching the store.
    pub async fn update(&self, id: i64, patch: BookingUpdate) -> Result<Booking> {
        let mut booking = self.get(id).await?;
        let recompute = patch.affects_quote();

        if let Some(guest_name) = patch.guest_name {
            booking.guest_name = guest_name;
        }
        if let Some(guest_email) = patch.guest_email {
            booking.guest_email = guest_email;
        }
        if let Some(phone) = patch.phone {
            booking.phone = Some(phone);
        }
        if let Some(check_in) = patch.check_in {
            booking.check_in = check_in;
        }
        if let Some(check_out) = patch.check_out {
            booking.check_out = check_out;
        }
        if let Some(accommodation_type) = patch.accommodation_type {
            booking.accommodation_type = accommodation_type;
        }
        if let Some(accommodation_id) = patch.accommodation_id {
            booking.accommodation_id = accommodation_id;
        }
        if let Some(status) = patch.status {
            booking.status = status;
        }

        validate_non_empty_string("guest_name", &booking.guest_name)?;
        validate_email("guest_email", &booking.guest_email)?;

        if recompute {
            let rate = self
                .resolve_rate(booking.accommodation_type, booking.accommodation_id)
                .await?;
            let quote = pricing::quote(&StayRequest {
                check_in: booking.check_in,
                check_out: booking.check_out,
                nightly_rate: rate,
            })?;
            booking.nights = quote.nights;
            booking.total_price = quote.total;
            tracing::debug!(
                "Recomputed quote for booking {}: {} nights, total {}",
                id,
                quote.nights,
                quote.total
            );
        }

        self.store.update(booking).await
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        self.store.delete(id).await?;
        tracing::info!("Deleted booking {}", id);
        Ok(())
    }
}
