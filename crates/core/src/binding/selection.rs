//! Product page form state and validation.

use thiserror::Error;

use crate::types::{NewLineItem, Price, Quantity};

/// Why a product page submission was rejected.
///
/// The `Display` text is the message shown to the shopper.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SelectionError {
    #[error("Please select a size")]
    MissingSize,
    #[error("This product is unavailable")]
    MissingProductId,
    #[error("This product has no price")]
    InvalidPrice,
    #[error("Quantity must be at least 1")]
    InvalidQuantity,
}

/// The size buttons on a product page. At most one is active.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SizeSelector {
    options: Vec<String>,
    active: Option<usize>,
}

impl SizeSelector {
    #[must_use]
    pub fn new<I, S>(options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            options: options.into_iter().map(Into::into).collect(),
            active: None,
        }
    }

    /// Activate a size, deactivating any other. Labels are compared after
    /// trimming; an unknown label leaves the selection unchanged and returns
    /// `false`.
    pub fn select(&mut self, label: &str) -> bool {
        let label = label.trim();
        match self.options.iter().position(|o| o.trim() == label) {
            Some(index) => {
                self.active = Some(index);
                true
            }
            None => false,
        }
    }

    pub fn deselect(&mut self) {
        self.active = None;
    }

    /// The active size label, trimmed.
    #[must_use]
    pub fn selected(&self) -> Option<&str> {
        self.active
            .and_then(|index| self.options.get(index))
            .map(|label| label.trim())
    }

    #[must_use]
    pub fn is_active(&self, label: &str) -> bool {
        self.selected() == Some(label.trim())
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }
}

/// Raw values read from the product page when "Add to cart" is pressed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductSelection {
    /// `id` query parameter of the page URL.
    pub product_id: Option<String>,
    /// Product title text.
    pub name: String,
    /// Rendered price text, e.g. `"₦25,000"`.
    pub price_text: String,
    /// Active size button label.
    pub size: Option<String>,
    /// Raw quantity input value.
    pub quantity: String,
    /// First personalization input (name on shirt).
    pub custom_name: Option<String>,
    /// Second personalization input (number on shirt).
    pub custom_number: Option<String>,
}

impl ProductSelection {
    /// Validate the form and build an add request.
    ///
    /// The quantity input is read by its leading digits, so `"3abc"` is 3 and
    /// `"2.5"` is 2. Input with no leading digits means 1. A zero, negative or
    /// out-of-range quantity is rejected.
    ///
    /// A page opened without an `?id=` parameter is rejected with
    /// [`SelectionError::MissingProductId`]. The old product page fell back to
    /// product `"1"` in that case, which put the wrong product in the cart.
    ///
    /// # Errors
    ///
    /// Returns the first problem found, checked in the order the shopper
    /// would fix them: size, product, price, quantity.
    pub fn into_line_item(self) -> Result<NewLineItem, SelectionError> {
        let size = non_blank(self.size).ok_or(SelectionError::MissingSize)?;
        let product_id = non_blank(self.product_id).ok_or(SelectionError::MissingProductId)?;
        let price = Price::parse_display(&self.price_text).ok_or(SelectionError::InvalidPrice)?;
        let quantity = parse_quantity(&self.quantity)?;

        Ok(NewLineItem {
            id: product_id.into(),
            name: self.name.trim().to_owned(),
            price,
            size: size.into(),
            quantity: Some(quantity),
            custom_name: Some(non_blank(self.custom_name).unwrap_or_default()),
            custom_number: Some(non_blank(self.custom_number).unwrap_or_default()),
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

fn parse_quantity(raw: &str) -> Result<i64, SelectionError> {
    let raw = raw.trim();
    let (negative, unsigned) = match raw.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, raw.strip_prefix('+').unwrap_or(raw)),
    };
    let end = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());
    let (digits, _) = unsigned.split_at(end);
    if digits.is_empty() {
        return Ok(1);
    }

    let magnitude = digits
        .parse::<i64>()
        .map_err(|_| SelectionError::InvalidQuantity)?;
    let value = if negative { -magnitude } else { magnitude };
    let quantity = Quantity::new(value).map_err(|_| SelectionError::InvalidQuantity)?;
    Ok(i64::from(quantity.get()))
}
