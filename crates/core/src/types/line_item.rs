//! Cart rows and add requests.

use serde::{Deserialize, Serialize};

use super::{CartKey, Price, ProductId, Quantity, Size};

/// One cart row, unique per `(id, size)`.
///
/// Serialized with the field names the site's pages share in local storage:
///
/// ```json
/// { "id": "1", "name": "Home Jersey", "price": 25000, "size": "M",
///   "quantity": 2, "customName": "", "customNumber": "" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    pub size: Size,
    pub quantity: Quantity,
    #[serde(default)]
    pub custom_name: String,
    #[serde(default)]
    pub custom_number: String,
}

impl LineItem {
    /// The identity key of this row.
    #[must_use]
    pub const fn key(&self) -> CartKey<'_> {
        CartKey::new(&self.id, &self.size)
    }

    /// Whether the shopper personalized this row.
    #[must_use]
    pub fn is_customized(&self) -> bool {
        !self.custom_name.is_empty() || !self.custom_number.is_empty()
    }
}

/// A request to add a product to the cart.
///
/// The store performs no validation beyond defaulting: `quantity` becomes 1
/// when unset or non-positive and missing customization becomes empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLineItem {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    pub size: Size,
    pub quantity: Option<i64>,
    pub custom_name: Option<String>,
    pub custom_number: Option<String>,
}

impl NewLineItem {
    /// A request for a single unit with no personalization.
    #[must_use]
    pub fn new(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        price: Price,
        size: impl Into<Size>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            size: size.into(),
            quantity: None,
            custom_name: None,
            custom_number: None,
        }
    }

    /// Set the requested quantity.
    #[must_use]
    pub const fn with_quantity(mut self, quantity: i64) -> Self {
        self.quantity = Some(quantity);
        self
    }

    /// Set the personalization text.
    #[must_use]
    pub fn with_customization(
        mut self,
        custom_name: impl Into<String>,
        custom_number: impl Into<String>,
    ) -> Self {
        self.custom_name = Some(custom_name.into());
        self.custom_number = Some(custom_number.into());
        self
    }
}

impl From<NewLineItem> for LineItem {
    fn from(request: NewLineItem) -> Self {
        Self {
            id: request.id,
            name: request.name,
            price: request.price,
            size: request.size,
            quantity: Quantity::from_request(request.quantity),
            custom_name: request.custom_name.unwrap_or_default(),
            custom_number: request.custom_number.unwrap_or_default(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_with_camel_case_fields() {
        let item = LineItem::from(
            NewLineItem::new("1", "Home Jersey", Price::new(25_000), "M")
                .with_quantity(2)
                .with_customization("ADE", "9"),
        );
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": "1",
                "name": "Home Jersey",
                "price": 25000,
                "size": "M",
                "quantity": 2,
                "customName": "ADE",
                "customNumber": "9"
            })
        );
    }

    #[test]
    fn test_missing_customization_defaults_to_empty() {
        let item: LineItem = serde_json::from_str(
            r#"{"id":"3","name":"Scarf","price":5000,"size":"One Size","quantity":1}"#,
        )
        .unwrap();
        assert_eq!(item.custom_name, "");
        assert_eq!(item.custom_number, "");
        assert!(!item.is_customized());
    }

    #[test]
    fn test_schema_mismatch_is_rejected() {
        // Numeric id, zero quantity and negative price are all outside the schema.
        assert!(serde_json::from_str::<LineItem>(
            r#"{"id":1,"name":"x","price":1,"size":"M","quantity":1}"#
        )
        .is_err());
        assert!(serde_json::from_str::<LineItem>(
            r#"{"id":"1","name":"x","price":1,"size":"M","quantity":0}"#
        )
        .is_err());
        assert!(serde_json::from_str::<LineItem>(
            r#"{"id":"1","name":"x","price":-1,"size":"M","quantity":1}"#
        )
        .is_err());
    }

    #[test]
    fn test_request_defaults() {
        let item = LineItem::from(
            NewLineItem::new("1", "Home Jersey", Price::new(100), "S").with_quantity(0),
        );
        assert_eq!(item.quantity, Quantity::ONE);
        assert!(!item.is_customized());
    }
}
