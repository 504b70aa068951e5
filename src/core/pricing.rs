use crate::domain::model::{PriceQuote, StayRequest};
use crate::utils::error::{HotelError, Result};

/// Computes nights and total price for a stay. Pure function, no I/O; the
/// nightly rate must already be resolved by the caller.
///
/// Zero-night stays and inverted ranges are both rejected with
/// `InvalidDateRange` rather than clamped to a zero total.
pub fn quote(stay: &StayRequest) -> Result<PriceQuote> {
    if stay.nightly_rate < 0.0 || !stay.nightly_rate.is_finite() {
        return Err(HotelError::NegativeNightlyRate {
            rate: stay.nightly_rate,
        });
    }

    // 整天差值，不考慮時區與半天 (與原始資料模型一致)
    let nights = (stay.check_out - stay.check_in).num_days();
    if nights <= 0 {
        return Err(HotelError::InvalidDateRange {
            check_in: stay.check_in,
            check_out: stay.check_out,
        });
    }

    Ok(PriceQuote {
        nights: nights as u32,
        total: nights as f64 * stay.nightly_rate,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn stay(check_in: (i32, u32, u32), check_out: (i32, u32, u32), rate: f64) -> StayRequest {
        StayRequest {
            check_in: NaiveDate::from_ymd_opt(check_in.0, check_in.1, check_in.2).unwrap(),
            check_out: NaiveDate::from_ymd_opt(check_out.0, check_out.1, check_out.2).unwrap(),
            nightly_rate: rate,
        }
    }

    #[test]
    fn test_three_night_stay() {
        let result = quote(&stay((2024, 6, 1), (2024, 6, 4), 100.0)).unwrap();
        assert_eq!(result.nights, 3);
        assert_eq!(result.total, 300.0);
    }

    #[test]
    fn test_single_night_stay() {
        let result = quote(&stay((2024, 6, 1), (2024, 6, 2), 75.5)).unwrap();
        assert_eq!(result.nights, 1);
        assert_eq!(result.total, 75.5);
    }

    #[test]
    fn test_inverted_range_is_rejected() {
        let err = quote(&stay((2024, 6, 4), (2024, 6, 1), 100.0)).unwrap_err();
        assert!(matches!(err, HotelError::InvalidDateRange { .. }));
    }

    #[test]
    fn test_zero_night_stay_is_rejected() {
        let err = quote(&stay((2024, 6, 1), (2024, 6, 1), 100.0)).unwrap_err();
        assert!(matches!(err, HotelError::InvalidDateRange { .. }));
    }

    #[test]
    fn test_negative_rate_is_rejected() {
        let err = quote(&stay((2024, 6, 1), (2024, 6, 4), -10.0)).unwrap_err();
        assert!(matches!(err, HotelError::NegativeNightlyRate { .. }));
    }

    #[test]
    fn test_zero_rate_gives_zero_total() {
        let result = quote(&stay((2024, 6, 1), (2024, 6, 3), 0.0)).unwrap();
        assert_eq!(result.nights, 2);
        assert_eq!(result.total, 0.0);
    }

    #[test]
    fn test_quote_is_idempotent() {
        let input = stay((2024, 12, 28), (2025, 1, 2), 120.0);
        let first = quote(&input).unwrap();
        let second = quote(&input).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.nights, 5);
        assert_eq!(first.total, 600.0);
    }

    #[test]
    fn test_cross_month_boundary() {
        let result = quote(&stay((2024, 1, 30), (2024, 2, 2), 50.0)).unwrap();
        assert_eq!(result.nights, 3);
        assert_eq!(result.total, 150.0);
    }
}
