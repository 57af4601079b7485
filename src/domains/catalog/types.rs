use crate::errors::DomainResult;
use crate::validation::{Validate, ValidationBuilder};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Product reference used by the order and inventory forms
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
}

/// Distributor reference returned by the salesperson-facing listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributorRef {
    pub id: i64,
    pub name: String,
}

/// Reference lists loaded together before an order form renders
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferenceData {
    pub products: Vec<Product>,
    pub distributors: Vec<DistributorRef>,
}

/// Full distributor profile from the admin listing
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Distributor {
    pub id: String,
    pub name: String,
    pub address: String,
    pub phone_number: String,
    pub gst_number: String,
    pub pan: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Full salesperson profile from the admin listing
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Salesperson {
    pub id: String,
    pub name: String,
    pub phone_number: String,
    pub email: String,
    pub employee_id: String,
    pub pan: String,
    pub address: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Changed-fields-only payload for distributor updates
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistributorUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gst_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pan: Option<String>,
}

impl DistributorUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.address.is_none()
            && self.phone_number.is_none()
            && self.gst_number.is_none()
            && self.pan.is_none()
    }
}

impl Validate for DistributorUpdate {
    fn validate(&self) -> DomainResult<()> {
        if let Some(name) = &self.name {
            ValidationBuilder::new("name", Some(name.clone()))
                .min_length(2)
                .max_length(100)
                .validate()?;
        }

        if let Some(phone) = &self.phone_number {
            ValidationBuilder::new("phoneNumber", Some(phone.clone()))
                .phone()
                .validate()?;
        }

        Ok(())
    }
}

/// Changed-fields-only payload for salesperson updates
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalespersonUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pan: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl SalespersonUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.phone_number.is_none()
            && self.email.is_none()
            && self.employee_id.is_none()
            && self.pan.is_none()
            && self.address.is_none()
    }
}

impl Validate for SalespersonUpdate {
    fn validate(&self) -> DomainResult<()> {
        if let Some(name) = &self.name {
            ValidationBuilder::new("name", Some(name.clone()))
                .min_length(2)
                .max_length(100)
                .validate()?;
        }

        if let Some(phone) = &self.phone_number {
            ValidationBuilder::new("phoneNumber", Some(phone.clone()))
                .phone()
                .validate()?;
        }

        if let Some(email) = &self.email {
            ValidationBuilder::new("email", Some(email.clone()))
                .email()
                .validate()?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distributor_deserializes_from_camel_case() {
        let json = r#"{
            "id": "42",
            "name": "Acme Distribution",
            "address": "12 Market Road",
            "phoneNumber": "9876543210",
            "gstNumber": "29ABCDE1234F1Z5",
            "pan": "ABCDE1234F",
            "createdAt": "2025-11-03T08:15:00.000Z",
            "updatedAt": "2025-11-04T09:00:00.000Z"
        }"#;

        let distributor: Distributor = serde_json::from_str(json).unwrap();
        assert_eq!(distributor.id, "42");
        assert_eq!(distributor.phone_number, "9876543210");
        assert_eq!(distributor.gst_number, "29ABCDE1234F1Z5");
    }

    #[test]
    fn test_update_serializes_changed_fields_only() {
        let update = DistributorUpdate {
            phone_number: Some("9876543210".to_string()),
            ..Default::default()
        };

        let json = serde_json::to_value(&update).unwrap();
        let object = json.as_object().unwrap();
        assert_eq!(object.len(), 1);
        assert_eq!(object["phoneNumber"], "9876543210");
    }

    #[test]
    fn test_distributor_update_validation() {
        let valid = DistributorUpdate {
            name: Some("Acme Distribution".to_string()),
            phone_number: Some("9876543210".to_string()),
            ..Default::default()
        };
        assert!(valid.validate().is_ok());

        let bad_phone = DistributorUpdate {
            phone_number: Some("123".to_string()),
            ..Default::default()
        };
        assert!(bad_phone.validate().is_err());

        assert!(DistributorUpdate::default().is_empty());
    }

    #[test]
    fn test_salesperson_update_validation() {
        let bad_email = SalespersonUpdate {
            email: Some("not-an-email".to_string()),
            ..Default::default()
        };
        assert!(bad_email.validate().is_err());

        let valid = SalespersonUpdate {
            email: Some("rep@example.com".to_string()),
            employee_id: Some("EMP-104".to_string()),
            ..Default::default()
        };
        assert!(valid.validate().is_ok());
        assert!(!valid.is_empty());
    }
}
