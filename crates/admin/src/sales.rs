//! Synthetic sales data for the dashboard chart.

use chrono::{Days, NaiveDate};
use rand::Rng;
use rust_decimal::Decimal;

use crate::models::SalesPoint;

/// Daily revenue bounds, in cents.
const REVENUE_CENTS: std::ops::RangeInclusive<i64> = 50_000..=500_000;
const ORDERS: std::ops::RangeInclusive<u32> = 5..=60;
/// Visitors per order, so the implied conversion rate stays between 2.5% and 10%.
const VISITORS_PER_ORDER: std::ops::RangeInclusive<u32> = 10..=40;

/// One point per day for the `days` days ending on `end_date`, oldest first.
///
/// Pass a seeded RNG for reproducible output.
pub fn generate_sales_series<R: Rng + ?Sized>(
    days: u32,
    end_date: NaiveDate,
    rng: &mut R,
) -> Vec<SalesPoint> {
    (0..days)
        .rev()
        .filter_map(|offset| end_date.checked_sub_days(Days::new(u64::from(offset))))
        .map(|date| {
            let orders = rng.random_range(ORDERS);
            SalesPoint {
                date,
                revenue: Decimal::new(rng.random_range(REVENUE_CENTS), 2),
                orders,
                visitors: orders.saturating_mul(rng.random_range(VISITORS_PER_ORDER)),
            }
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    fn end() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 31).unwrap()
    }

    #[test]
    fn test_series_covers_days_in_order() {
        let series = generate_sales_series(30, end(), &mut StdRng::seed_from_u64(7));
        assert_eq!(series.len(), 30);
        assert_eq!(series.first().unwrap().date, NaiveDate::from_ymd_opt(2026, 3, 2).unwrap());
        assert_eq!(series.last().unwrap().date, end());
        assert!(series.iter().zip(series.iter().skip(1)).all(|(a, b)| a.date < b.date));
    }

    #[test]
    fn test_values_within_bounds() {
        for point in generate_sales_series(60, end(), &mut StdRng::seed_from_u64(1)) {
            assert!(point.revenue >= Decimal::new(500, 0));
            assert!(point.revenue <= Decimal::new(5_000, 0));
            assert!(ORDERS.contains(&point.orders));
            assert!(point.visitors >= point.orders * 10);
        }
    }

    #[test]
    fn test_same_seed_same_series() {
        let a = generate_sales_series(10, end(), &mut StdRng::seed_from_u64(42));
        let b = generate_sales_series(10, end(), &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn test_zero_days_is_empty() {
        assert!(generate_sales_series(0, end(), &mut StdRng::seed_from_u64(0)).is_empty());
    }
}
