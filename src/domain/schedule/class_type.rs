//! Class type entity: the catalogue entry sessions are scheduled from.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    normalize_optional, ClassTypeId, DomainError, Price, Timestamp, ValidationError,
};

/// Maximum length for a class type name.
pub const MAX_NAME_LENGTH: usize = 120;

/// A kind of class the studio offers, with its default price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassType {
    id: ClassTypeId,
    name: String,
    description: Option<String>,
    default_price: Price,
    created_at: Timestamp,
}

impl ClassType {
    /// Create a new class type.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if the name is blank or too long
    pub fn new(
        id: ClassTypeId,
        name: impl Into<String>,
        description: Option<String>,
        default_price: Price,
    ) -> Result<Self, DomainError> {
        Ok(Self {
            id,
            name: Self::validate_name(name.into())?,
            description: normalize_optional(description),
            default_price,
            created_at: Timestamp::now(),
        })
    }

    /// Reconstitute from persistence (no validation).
    pub fn reconstitute(
        id: ClassTypeId,
        name: String,
        description: Option<String>,
        default_price: Price,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            name,
            description,
            default_price,
            created_at,
        }
    }

    pub fn id(&self) -> &ClassTypeId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn default_price(&self) -> &Price {
        &self.default_price
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    /// Replace the editable fields.
    pub fn update(
        &mut self,
        name: impl Into<String>,
        description: Option<String>,
        default_price: Price,
    ) -> Result<(), DomainError> {
        self.name = Self::validate_name(name.into())?;
        self.description = normalize_optional(description);
        self.default_price = default_price;
        Ok(())
    }

    fn validate_name(name: String) -> Result<String, ValidationError> {
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(ValidationError::empty_field("name"));
        }
        if name.chars().count() > MAX_NAME_LENGTH {
            return Err(ValidationError::out_of_range(
                "name",
                1,
                MAX_NAME_LENGTH as i64,
                name.chars().count() as i64,
            ));
        }
        Ok(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{Currency, ErrorCode};

    fn price(pence: i64) -> Price {
        Price::new(pence, Currency::gbp()).unwrap()
    }

    #[test]
    fn new_trims_name_and_blank_description() {
        let ct = ClassType::new(
            ClassTypeId::new(),
            "  Reformer Pilates ",
            Some("   ".to_string()),
            price(1800),
        )
        .unwrap();

        assert_eq!(ct.name(), "Reformer Pilates");
        assert!(ct.description().is_none());
        assert_eq!(ct.default_price().label(), "£18.00");
    }

    #[test]
    fn new_rejects_blank_name() {
        let err = ClassType::new(ClassTypeId::new(), " ", None, price(0)).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert_eq!(err.field(), Some("name"));
    }

    #[test]
    fn update_replaces_fields() {
        let mut ct = ClassType::new(ClassTypeId::new(), "Barre", None, price(1200)).unwrap();
        ct.update("Barre Burn", Some("Low impact".to_string()), price(1400))
            .unwrap();

        assert_eq!(ct.name(), "Barre Burn");
        assert_eq!(ct.description(), Some("Low impact"));
        assert_eq!(ct.default_price().minor_units(), 1400);
    }

    #[test]
    fn update_keeps_state_on_invalid_name() {
        let mut ct = ClassType::new(ClassTypeId::new(), "Barre", None, price(1200)).unwrap();
        assert!(ct.update("", None, price(1)).is_err());
        assert_eq!(ct.name(), "Barre");
    }
}
