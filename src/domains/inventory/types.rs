use crate::errors::{DomainResult, ValidationError};
use crate::validation::{Validate, ValidationBuilder};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One inventory movement row as the backend reports it
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryRecord {
    pub id: i64,
    pub product_id: i64,
    pub product_name: String,
    pub quantity: i64,
    pub unit_price: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub reserve1: Option<String>,
    #[serde(default)]
    pub reserve2: Option<String>,
    #[serde(default)]
    pub reserve3: Option<String>,
}

/// Payload for recording fresh stock
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewInventoryEntry {
    pub product_id: i64,
    pub product_name: String,
    pub quantity: i64,
    pub unit_price: Decimal,
}

impl Validate for NewInventoryEntry {
    fn validate(&self) -> DomainResult<()> {
        ValidationBuilder::new("productId", Some(self.product_id))
            .required()
            .validate()?;

        ValidationBuilder::new("productName", Some(self.product_name.clone()))
            .required()
            .validate()?;

        ValidationBuilder::new("quantity", Some(self.quantity))
            .min(1)
            .validate()?;

        ValidationBuilder::new("unitPrice", Some(self.unit_price))
            .validate_with(|price| {
                if *price > Decimal::ZERO {
                    Ok(())
                } else {
                    Err(ValidationError::invalid_value(
                        "unitPrice",
                        "must be greater than zero",
                    ))
                }
            })
            .validate()?;

        Ok(())
    }
}

/// Response shape of the last-unit-price lookup
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitPriceInfo {
    pub unit_price: Decimal,
}
