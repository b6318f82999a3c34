//! Product Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Product entity (soft-deleted through `is_active`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    /// Distributor-facing product code (SKU)
    pub code: String,
    pub name: String,
    pub price: Decimal,
    pub unit: Option<String>,
    pub is_active: bool,
}

/// Create product payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ProductCreate {
    #[validate(length(min = 1, max = 50, message = "product code is required"))]
    pub code: String,
    #[validate(length(min = 1, max = 150, message = "product name is required"))]
    pub name: String,
    #[validate(custom(function = "positive_amount"))]
    pub price: Decimal,
    pub unit: Option<String>,
}

/// Update product payload
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ProductUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 50, message = "product code cannot be empty"))]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 150, message = "product name cannot be empty"))]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "positive_amount"))]
    pub price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

/// Activation toggle payload (soft delete / restore)
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ProductStatusUpdate {
    pub is_active: bool,
}

/// Rejects zero and negative money amounts
pub fn positive_amount(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_positive() && !value.is_zero() {
        Ok(())
    } else {
        Err(ValidationError::new("positive_amount")
            .with_message("amount must be greater than zero".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_price_must_be_positive() {
        let mut product = ProductCreate {
            code: "SKU-1".to_string(),
            name: "Tea 500g".to_string(),
            price: Decimal::ZERO,
            unit: None,
        };
        assert!(product.validate().is_err());

        product.price = Decimal::new(-150, 2);
        assert!(product.validate().is_err());

        product.price = Decimal::new(1250, 2);
        assert!(product.validate().is_ok());
    }

    #[test]
    fn test_product_update_validates_only_present_fields() {
        let update = ProductUpdate::default();
        assert!(update.validate().is_ok());

        let update = ProductUpdate {
            price: Some(Decimal::ZERO),
            ..Default::default()
        };
        assert!(update.validate().is_err());
    }
}
