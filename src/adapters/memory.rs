use crate::domain::model::{AccommodationType, Booking};
use crate::domain::ports::{BookingStore, RateResolver};
use crate::utils::error::{HotelError, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

/// HashMap-backed booking store for tests and the demo binaries. Ids are
/// assigned sequentially starting at 1.
#[derive(Clone, Default)]
pub struct InMemoryBookingStore {
    inner: Arc<Mutex<StoreInner>>,
}

#[derive(Default)]
struct StoreInner {
    bookings: HashMap<i64, Booking>,
    next_id: i64,
}

impl InMemoryBookingStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BookingStore for InMemoryBookingStore {
    async fn insert(&self, mut booking: Booking) -> Result<Booking> {
        let mut inner = self.inner.lock().await;
        inner.next_id += 1;
        booking.id = inner.next_id;
        inner.bookings.insert(booking.id, booking.clone());
        Ok(booking)
    }

    async fn get(&self, id: i64) -> Result<Option<Booking>> {
        let inner = self.inner.lock().await;
        Ok(inner.bookings.get(&id).cloned())
    }

    async fn list(&self, skip: usize, limit: usize) -> Result<Vec<Booking>> {
        let inner = self.inner.lock().await;
        let mut all: Vec<Booking> = inner.bookings.values().cloned().collect();
        all.sort_by_key(|b| b.id);
        Ok(all.into_iter().skip(skip).take(limit).collect())
    }

    async fn update(&self, booking: Booking) -> Result<Booking> {
        let mut inner = self.inner.lock().await;
        if !inner.bookings.contains_key(&booking.id) {
            return Err(HotelError::BookingNotFound { id: booking.id });
        }
        inner.bookings.insert(booking.id, booking.clone());
        Ok(booking)
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let mut inner = self.inner.lock().await;
        inner
            .bookings
            .remove(&id)
            .map(|_| ())
            .ok_or(HotelError::BookingNotFound { id })
    }
}

/// Fixed rate table keyed by accommodation type and id.
#[derive(Clone, Default)]
pub struct StaticRateResolver {
    rates: HashMap<(AccommodationType, i64), f64>,
}

impl StaticRateResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rate(mut self, kind: AccommodationType, id: i64, rate: f64) -> Self {
        self.rates.insert((kind, id), rate);
        self
    }
}

#[async_trait]
impl RateResolver for StaticRateResolver {
    async fn nightly_rate(&self, kind: AccommodationType, id: i64) -> Result<Option<f64>> {
        Ok(self.rates.get(&(kind, id)).copied())
    }
}
