//! Client-side validation of the inventory create/edit form.
//!
//! Validation runs before any request is built; a form that fails it never
//! reaches the transport.

use crate::domain::{InventoryItem, InventoryItemPayload, InventoryStatus};
use crate::error::{ApiError, ValidationErrors};

/// Raw text inputs, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InventoryForm {
    pub product_name: String,
    pub sku: String,
    pub category: String,
    pub location: String,
    pub description: String,
    pub image_url: String,
    pub qr_code_value: String,
    pub quantity: String,
    pub unit_price: String,
    pub status: String,
}

impl InventoryForm {
    /// Pre-fills the form for editing an existing item.
    pub fn from_item(item: &InventoryItem) -> Self {
        Self {
            product_name: item.product_name.clone(),
            sku: item.sku.clone(),
            category: item.category.clone(),
            location: item.location.clone(),
            description: item.description.clone(),
            image_url: item.image_url.clone(),
            qr_code_value: item.qr_code_value.clone(),
            quantity: item.quantity.to_string(),
            unit_price: item.unit_price.to_string(),
            status: item.status.clone(),
        }
    }

    /// Checks every field and builds a create payload (no id). Use
    /// [`InventoryItemPayload::with_id`] for updates.
    pub fn validate(&self) -> Result<InventoryItemPayload, ApiError> {
        let mut errors = ValidationErrors::new();

        require(&mut errors, "ProductName", &self.product_name, "Product name is required");
        require(&mut errors, "Sku", &self.sku, "SKU is required");
        require(&mut errors, "Category", &self.category, "Category is required");
        require(&mut errors, "Location", &self.location, "Location is required");

        let quantity = match non_negative(&self.quantity) {
            Field::Missing => {
                errors.add("Quantity", "Quantity is required");
                None
            }
            Field::Invalid => {
                errors.add("Quantity", "Quantity must be 0 or higher");
                None
            }
            Field::Value(n) if n.fract() != 0.0 => {
                errors.add("Quantity", "Quantity must be a whole number");
                None
            }
            Field::Value(n) => Some(n as i64),
        };

        let unit_price = match non_negative(&self.unit_price) {
            Field::Missing => {
                errors.add("UnitPrice", "Unit price is required");
                None
            }
            Field::Invalid => {
                errors.add("UnitPrice", "Unit price must be 0 or higher");
                None
            }
            Field::Value(n) => Some(n),
        };

        let status = if self.status.trim().is_empty() {
            errors.add("Status", "Status is required");
            None
        } else {
            let status = InventoryStatus::from_code(&self.status);
            if status.is_none() {
                errors.add("Status", "Status is not recognised");
            }
            status
        };

        // A field left unset has already recorded its error.
        let (Some(quantity), Some(unit_price), Some(status)) = (quantity, unit_price, status) else {
            return Err(ApiError::Validation(errors));
        };
        errors.into_result()?;

        Ok(InventoryItemPayload {
            id: None,
            product_name: self.product_name.trim().to_string(),
            description: optional(&self.description),
            quantity,
            unit_price,
            qr_code_value: optional(&self.qr_code_value),
            image_url: optional(&self.image_url),
            category: self.category.trim().to_string(),
            location: self.location.trim().to_string(),
            sku: self.sku.trim().to_string(),
            status: status.as_number(),
        })
    }
}

enum Field {
    Missing,
    Invalid,
    Value(f64),
}

fn require(errors: &mut ValidationErrors, field: &'static str, value: &str, message: &str) {
    if value.trim().is_empty() {
        errors.add(field, message);
    }
}

fn non_negative(value: &str) -> Field {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Field::Missing;
    }
    match trimmed.parse::<f64>() {
        Ok(n) if n.is_finite() && n >= 0.0 => Field::Value(n),
        _ => Field::Invalid,
    }
}

fn optional(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() { None } else { Some(trimmed.to_string()) }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> InventoryForm {
        InventoryForm {
            product_name: "  Cordless Drill ".into(),
            sku: "DR-100".into(),
            category: "Tools".into(),
            location: "A1".into(),
            description: "   ".into(),
            quantity: "12".into(),
            unit_price: "89.90".into(),
            status: "5".into(),
            ..Default::default()
        }
    }

    #[test]
    fn valid_form_builds_trimmed_payload() {
        let payload = filled().validate().unwrap();
        assert_eq!(payload.id, None);
        assert_eq!(payload.product_name, "Cordless Drill");
        assert_eq!(payload.description, None);
        assert_eq!(payload.quantity, 12);
        assert_eq!(payload.unit_price, 89.9);
        assert_eq!(payload.status, 5);
    }

    #[test]
    fn missing_fields_are_all_reported() {
        let err = InventoryForm::default().validate().unwrap_err();
        let ApiError::Validation(errors) = err else {
            panic!("Expected validation error, got {:?}", err);
        };
        assert_eq!(errors.len(), 7);
        assert_eq!(errors.get("Sku"), Some("SKU is required"));
        assert_eq!(errors.get("Quantity"), Some("Quantity is required"));
        assert_eq!(errors.get("Status"), Some("Status is required"));
    }

    #[test]
    fn negative_and_garbage_numbers_are_rejected() {
        let form = InventoryForm {
            quantity: "-1".into(),
            unit_price: "cheap".into(),
            status: "3".into(),
            ..filled()
        };
        let Err(ApiError::Validation(errors)) = form.validate() else {
            panic!("Expected validation error");
        };
        assert_eq!(errors.get("Quantity"), Some("Quantity must be 0 or higher"));
        assert_eq!(errors.get("UnitPrice"), Some("Unit price must be 0 or higher"));
        assert_eq!(errors.get("Status"), Some("Status is not recognised"));
    }

    #[test]
    fn single_bad_number_reports_only_that_field() {
        let form = InventoryForm { unit_price: "-3".into(), ..filled() };
        let Err(ApiError::Validation(errors)) = form.validate() else {
            panic!("Expected validation error");
        };
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get("UnitPrice"), Some("Unit price must be 0 or higher"));
    }

    #[test]
    fn text_only_errors_are_reported_with_valid_numbers() {
        let form = InventoryForm { location: "  ".into(), ..filled() };
        let Err(ApiError::Validation(errors)) = form.validate() else {
            panic!("Expected validation error");
        };
        assert_eq!(errors.iter().collect::<Vec<_>>(), vec![("Location", "Location is required")]);
    }

    #[test]
    fn fractional_quantity_is_rejected() {
        let form = InventoryForm { quantity: "2.5".into(), ..filled() };
        let Err(ApiError::Validation(errors)) = form.validate() else {
            panic!("Expected validation error");
        };
        assert_eq!(errors.get("Quantity"), Some("Quantity must be a whole number"));
    }

    #[test]
    fn edit_form_round_trips_an_item() {
        let item = InventoryItem {
            id: "inv-1".into(),
            product_name: "Gloves".into(),
            description: String::new(),
            quantity: 40,
            unit_price: 3.5,
            qr_code_value: "QR-1".into(),
            image_url: String::new(),
            category: "Safety".into(),
            location: "B2".into(),
            sku: "GL-1".into(),
            status: "2".into(),
        };
        let payload = InventoryForm::from_item(&item).validate().unwrap().with_id("inv-1");
        assert_eq!(Some(payload), item.to_payload());
    }
}
