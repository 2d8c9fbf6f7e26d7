use super::domain::{Item, Receipt};

/// Reasons a receipt is rejected before scoring. Messages are returned to callers verbatim.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid receipt: retailer field is required")]
    MissingRetailer,
    #[error("Invalid purchaseDate. Expected format: YYYY-MM-DD")]
    InvalidPurchaseDate(String),
    #[error("Invalid purchaseTime. Expected format: HH:MM")]
    InvalidPurchaseTime(String),
    #[error("Invalid receipt: items list must contain at least one item")]
    NoItems,
    #[error("Invalid receipt: all items must have a valid shortDescription")]
    MissingItemDescription { index: usize },
    #[error("Invalid receipt: all items must have a valid price in the format '0.00'")]
    InvalidItemPrice { index: usize, price: String },
}

impl ValidationError {
    /// Field name the rejection refers to, for structured logging.
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::MissingRetailer => "retailer",
            ValidationError::InvalidPurchaseDate(_) => "purchaseDate",
            ValidationError::InvalidPurchaseTime(_) => "purchaseTime",
            ValidationError::NoItems => "items",
            ValidationError::MissingItemDescription { .. } => "items.shortDescription",
            ValidationError::InvalidItemPrice { .. } => "items.price",
        }
    }
}

/// Runs every check in a fixed order and reports the first failure.
pub fn validate_receipt(receipt: &Receipt) -> Result<(), ValidationError> {
    if receipt.retailer.trim().is_empty() {
        return Err(ValidationError::MissingRetailer);
    }

    if !is_valid_date(&receipt.purchase_date) {
        return Err(ValidationError::InvalidPurchaseDate(
            receipt.purchase_date.clone(),
        ));
    }

    if !is_valid_time(&receipt.purchase_time) {
        return Err(ValidationError::InvalidPurchaseTime(
            receipt.purchase_time.clone(),
        ));
    }

    if receipt.items.is_empty() {
        return Err(ValidationError::NoItems);
    }

    receipt
        .items
        .iter()
        .enumerate()
        .try_for_each(|(index, item)| validate_item(index, item))
}

fn validate_item(index: usize, item: &Item) -> Result<(), ValidationError> {
    if item.trimmed_description().is_empty() {
        return Err(ValidationError::MissingItemDescription { index });
    }

    if item.parsed_price().is_none() {
        return Err(ValidationError::InvalidItemPrice {
            index,
            price: item.price.clone(),
        });
    }

    Ok(())
}

/// `YYYY-MM-DD` with coarse range checks only; day-of-month is not checked against the month.
pub fn is_valid_date(date: &str) -> bool {
    let bytes = date.as_bytes();
    if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
        return false;
    }

    let (Some(year), Some(month), Some(day)) = (
        parse_field(date, 0..4),
        parse_field(date, 5..7),
        parse_field(date, 8..10),
    ) else {
        return false;
    };

    year >= 1 && (1..=12).contains(&month) && (1..=31).contains(&day)
}

/// `HH:MM` on a 24-hour clock.
pub fn is_valid_time(time: &str) -> bool {
    let bytes = time.as_bytes();
    if bytes.len() != 5 || bytes[2] != b':' {
        return false;
    }

    let (Some(hour), Some(minute)) = (parse_field(time, 0..2), parse_field(time, 3..5)) else {
        return false;
    };

    (0..=23).contains(&hour) && (0..=59).contains(&minute)
}

fn parse_field(raw: &str, range: std::ops::Range<usize>) -> Option<i64> {
    raw.get(range)?.parse::<i64>().ok()
}
