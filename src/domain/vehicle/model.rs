//! Vehicle domain entity

use chrono::{DateTime, Utc};

use crate::shared::errors::DomainError;

/// Maximum plate length after normalisation (Mercosul and legacy formats)
pub const MAX_PLATE_LEN: usize = 7;

/// Vehicle manufacturer, as picked from the brand catalogue
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VehicleBrand {
    pub id: i32,
    pub name: String,
}

/// Vehicle category (car, motorcycle, pickup...)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VehicleType {
    pub id: i32,
    pub name: String,
}

/// A registered vehicle
#[derive(Debug, Clone)]
pub struct Vehicle {
    pub id: String,
    pub model: String,
    pub brand: VehicleBrand,
    pub kind: VehicleType,
    /// Upper-case plate without whitespace
    pub plate: String,
    pub color: String,
    pub owner_name: String,
    /// Owner phone, formatted as `(dd) nnnnn-nnnn`
    pub owner_contact: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Vehicle {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        model: impl Into<String>,
        brand: VehicleBrand,
        kind: VehicleType,
        plate: &str,
        color: impl Into<String>,
        owner_name: impl Into<String>,
        owner_contact: &str,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            model: model.into(),
            brand,
            kind,
            plate: normalize_plate(plate),
            color: color.into(),
            owner_name: owner_name.into(),
            owner_contact: format_owner_contact(owner_contact),
            created_at: now,
            updated_at: now,
        }
    }

    /// Check the field rules a registration must satisfy
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.brand.id <= 0 {
            return Err(DomainError::Validation("Select a valid brand.".into()));
        }
        if self.kind.id <= 0 {
            return Err(DomainError::Validation("Select a valid type.".into()));
        }
        if self.plate.is_empty() {
            return Err(DomainError::Validation("plate is required".into()));
        }
        if self.plate.chars().count() > MAX_PLATE_LEN {
            return Err(DomainError::Validation(format!(
                "plate must have at most {} characters",
                MAX_PLATE_LEN
            )));
        }
        for (field, value) in [
            ("model", &self.model),
            ("color", &self.color),
            ("owner_name", &self.owner_name),
            ("owner_contact", &self.owner_contact),
        ] {
            if value.trim().is_empty() {
                return Err(DomainError::Validation(format!("{} is required", field)));
            }
        }
        Ok(())
    }
}

/// Upper-case a plate and strip all whitespace
pub fn normalize_plate(plate: &str) -> String {
    plate
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_uppercase)
        .collect()
}

/// Format a phone number as `(dd) nnnnn-nnnn`.
///
/// Non-digits are dropped. The dash is only inserted once nine
/// subscriber digits are present; shorter input (including eight-digit
/// landlines) keeps the area code prefix without a dash.
pub fn format_owner_contact(raw: &str) -> String {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() <= 2 {
        return digits;
    }

    let mut formatted = format!("({}) {}", &digits[..2], &digits[2..]);

    // nnnnn-nnnn over the last nine subscriber digits
    if digits.len() - 2 >= 9 {
        let dash_at = formatted.len() - 4;
        formatted.insert(dash_at, '-');
    }
    formatted
}

// ── Tests ──────────────────────────────────────────────────────
