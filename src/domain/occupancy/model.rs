//! Occupancy domain entity

use chrono::{DateTime, Utc};

use super::billing::BillingPolicy;

/// Pricing terms agreed when a vehicle is parked.
///
/// Exactly one rate applies to a record, so a record can never carry
/// both an hourly and a fixed price.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pricing {
    /// Charged per started hour (smallest currency unit)
    Hourly(i64),
    /// Flat price regardless of duration (smallest currency unit)
    Fixed(i64),
}

impl Pricing {
    pub fn hourly_rate(&self) -> Option<i64> {
        match self {
            Self::Hourly(rate) => Some(*rate),
            Self::Fixed(_) => None,
        }
    }

    pub fn fixed_rate(&self) -> Option<i64> {
        match self {
            Self::Fixed(rate) => Some(*rate),
            Self::Hourly(_) => None,
        }
    }

    /// Rebuild pricing from the optional-field form used by storage.
    /// A positive fixed rate wins, mirroring the billing rule.
    pub fn from_rates(hourly_rate: Option<i64>, fixed_rate: Option<i64>) -> Option<Self> {
        match (hourly_rate, fixed_rate) {
            (_, Some(fixed)) if fixed > 0 => Some(Self::Fixed(fixed)),
            (Some(hourly), _) if hourly > 0 => Some(Self::Hourly(hourly)),
            _ => None,
        }
    }
}

impl std::fmt::Display for Pricing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Hourly(rate) => write!(f, "{}/hour", rate),
            Self::Fixed(rate) => write!(f, "{} fixed", rate),
        }
    }
}

/// One vehicle's occupation of one slot
#[derive(Debug, Clone)]
pub struct OccupancyRecord {
    /// Unique record ID (assigned by storage)
    pub id: i32,
    pub slot_id: String,
    /// Slot code at the time of parking
    pub slot_code: String,
    pub vehicle_id: String,
    /// Vehicle plate at the time of parking
    pub vehicle_plate: String,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub pricing: Pricing,
    /// Amount owed; zero until the record is closed
    pub total_price: i64,
    pub closed: bool,
}

impl OccupancyRecord {
    pub fn new(
        slot_id: impl Into<String>,
        slot_code: impl Into<String>,
        vehicle_id: impl Into<String>,
        vehicle_plate: impl Into<String>,
        start_time: DateTime<Utc>,
        pricing: Pricing,
    ) -> Self {
        Self {
            id: 0,
            slot_id: slot_id.into(),
            slot_code: slot_code.into(),
            vehicle_id: vehicle_id.into(),
            vehicle_plate: vehicle_plate.into(),
            start_time,
            end_time: None,
            pricing,
            total_price: 0,
            closed: false,
        }
    }

    pub fn hourly_rate(&self) -> Option<i64> {
        self.pricing.hourly_rate()
    }

    pub fn fixed_rate(&self) -> Option<i64> {
        self.pricing.fixed_rate()
    }

    pub fn is_open(&self) -> bool {
        !self.closed
    }

    /// Close the record at `end_time` and compute what is owed.
    ///
    /// Closing is terminal: a closed record is left untouched and
    /// `None` is returned.
    pub fn close(&mut self, end_time: DateTime<Utc>, policy: &BillingPolicy) -> Option<i64> {
        if self.closed {
            return None;
        }
        self.end_time = Some(end_time);
        self.closed = true;
        self.total_price = policy.compute_total(self);
        Some(self.total_price)
    }

    /// Elapsed seconds between start and end (or `now` while open)
    pub fn elapsed_seconds(&self, now: DateTime<Utc>) -> i64 {
        (self.end_time.unwrap_or(now) - self.start_time).num_seconds()
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 10, h, m, 0).unwrap()
    }

    fn sample(pricing: Pricing) -> OccupancyRecord {
        OccupancyRecord::new("slot-1", "A01", "veh-1", "ABC1D23", at(10, 0), pricing)
    }

    #[test]
    fn new_record_is_open_with_zero_total() {
        let r = sample(Pricing::Hourly(10));
        assert!(r.is_open());
        assert_eq!(r.total_price, 0);
        assert!(r.end_time.is_none());
        assert_eq!(r.hourly_rate(), Some(10));
        assert_eq!(r.fixed_rate(), None);
    }

    #[test]
    fn close_sets_end_time_and_total() {
        let mut r = sample(Pricing::Hourly(10));
        let total = r.close(at(12, 0), &BillingPolicy::default());
        assert_eq!(total, Some(20));
        assert!(r.closed);
        assert_eq!(r.end_time, Some(at(12, 0)));
        assert_eq!(r.total_price, 20);
    }

    #[test]
    fn close_is_terminal() {
        let mut r = sample(Pricing::Hourly(10));
        r.close(at(11, 0), &BillingPolicy::default());
        assert_eq!(r.close(at(15, 0), &BillingPolicy::default()), None);
        assert_eq!(r.end_time, Some(at(11, 0)));
        assert_eq!(r.total_price, 10);
    }

    #[test]
    fn elapsed_uses_now_while_open() {
        let r = sample(Pricing::Fixed(50));
        assert_eq!(r.elapsed_seconds(at(10, 0) + Duration::minutes(5)), 300);
    }

    #[test]
    fn from_rates_prefers_positive_fixed() {
        assert_eq!(Pricing::from_rates(None, Some(50)), Some(Pricing::Fixed(50)));
        assert_eq!(Pricing::from_rates(Some(10), None), Some(Pricing::Hourly(10)));
        assert_eq!(Pricing::from_rates(Some(10), Some(0)), Some(Pricing::Hourly(10)));
        assert_eq!(Pricing::from_rates(Some(0), Some(0)), None);
        assert_eq!(Pricing::from_rates(None, None), None);
    }

    #[test]
    fn pricing_display() {
        assert_eq!(Pricing::Hourly(10).to_string(), "10/hour");
        assert_eq!(Pricing::Fixed(50).to_string(), "50 fixed");
    }
}
