//! Pricing input with mutually exclusive rate fields
//!
//! Entering a positive hourly price disables (and clears) the fixed
//! price field and vice versa. Clearing a field, or setting it to zero,
//! re-enables the other one.

use super::model::Pricing;
use crate::shared::errors::DomainError;

pub const MISSING_RATE_MESSAGE: &str = "Fill in at least one of: hourly price or fixed price.";

/// Upper bound for either rate, in the smallest currency unit
pub const MAX_RATE: i64 = 100_000_000;

/// A single rate input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateField {
    value: Option<i64>,
    enabled: bool,
}

impl RateField {
    fn new() -> Self {
        Self {
            value: None,
            enabled: true,
        }
    }

    pub fn value(&self) -> Option<i64> {
        self.value
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn positive(&self) -> Option<i64> {
        self.value.filter(|v| self.enabled && *v > 0)
    }

    fn disable(&mut self) {
        self.enabled = false;
        self.value = None;
    }

    fn enable(&mut self) {
        self.enabled = true;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rate {
    Hourly,
    Fixed,
}

impl Rate {
    fn label(self) -> &'static str {
        match self {
            Self::Hourly => "hourly price",
            Self::Fixed => "fixed price",
        }
    }
}

/// The pair of rate fields on the parking form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateForm {
    hourly: RateField,
    fixed: RateField,
}

impl Default for RateForm {
    fn default() -> Self {
        Self::new()
    }
}

impl RateForm {
    pub fn new() -> Self {
        Self {
            hourly: RateField::new(),
            fixed: RateField::new(),
        }
    }

    /// Build a form the way a client fills it: hourly first, then fixed.
    /// Fails when both carry a positive value.
    pub fn from_inputs(hourly: Option<i64>, fixed: Option<i64>) -> Result<Self, DomainError> {
        let mut form = Self::new();
        if hourly.is_some() {
            form.set_hourly_rate(hourly)?;
        }
        if fixed.is_some() {
            form.set_fixed_rate(fixed)?;
        }
        Ok(form)
    }

    pub fn hourly(&self) -> RateField {
        self.hourly
    }

    pub fn fixed(&self) -> RateField {
        self.fixed
    }

    pub fn set_hourly_rate(&mut self, value: Option<i64>) -> Result<(), DomainError> {
        self.set(Rate::Hourly, value)
    }

    pub fn set_fixed_rate(&mut self, value: Option<i64>) -> Result<(), DomainError> {
        self.set(Rate::Fixed, value)
    }

    fn set(&mut self, which: Rate, value: Option<i64>) -> Result<(), DomainError> {
        let (field, other, other_kind) = match which {
            Rate::Hourly => (&mut self.hourly, &mut self.fixed, Rate::Fixed),
            Rate::Fixed => (&mut self.fixed, &mut self.hourly, Rate::Hourly),
        };

        if !field.enabled {
            if value.unwrap_or(0) > 0 {
                return Err(DomainError::Validation(format!(
                    "{} is disabled while a {} is set",
                    which.label(),
                    other_kind.label()
                )));
            }
            return Ok(());
        }

        if let Some(v) = value {
            if v < 0 {
                return Err(DomainError::Validation(format!(
                    "{} must not be negative",
                    which.label()
                )));
            }
            if v > MAX_RATE {
                return Err(DomainError::Validation(format!(
                    "{} must not exceed {}",
                    which.label(),
                    MAX_RATE
                )));
            }
        }

        field.value = value;
        if value.unwrap_or(0) > 0 {
            other.disable();
        } else {
            other.enable();
        }
        Ok(())
    }

    /// Validate the form and produce the pricing terms
    pub fn submit(&self) -> Result<Pricing, DomainError> {
        if let Some(rate) = self.hourly.positive() {
            return Ok(Pricing::Hourly(rate));
        }
        if let Some(rate) = self.fixed.positive() {
            return Ok(Pricing::Fixed(rate));
        }
        Err(DomainError::Validation(MISSING_RATE_MESSAGE.to_string()))
    }
}

// ── Tests ──────────────────────────────────────────────────────
