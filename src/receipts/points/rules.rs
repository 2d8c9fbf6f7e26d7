use super::super::domain::{parse_amount, Item};

const ROUND_DOLLAR_BONUS: u64 = 50;
const QUARTER_MULTIPLE_BONUS: u64 = 25;
const POINTS_PER_ITEM_PAIR: u64 = 5;
const DESCRIPTION_PRICE_MULTIPLIER: f64 = 0.2;
const ODD_DAY_BONUS: u64 = 6;
const AFTERNOON_BONUS: u64 = 10;

/// One point per ASCII letter or digit in the untrimmed name.
pub(crate) fn retailer_alphanumeric(retailer: &str) -> u64 {
    retailer
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .count() as u64
}

pub(crate) fn round_dollar_total(total: &str) -> u64 {
    match parse_amount(total) {
        Some(value) if value % 1.0 == 0.0 => ROUND_DOLLAR_BONUS,
        _ => 0,
    }
}

pub(crate) fn quarter_multiple_total(total: &str) -> u64 {
    match parse_amount(total) {
        Some(value) if value % 0.25 == 0.0 => QUARTER_MULTIPLE_BONUS,
        _ => 0,
    }
}

pub(crate) fn item_pairs(items: &[Item]) -> u64 {
    (items.len() / 2) as u64 * POINTS_PER_ITEM_PAIR
}

/// An empty trimmed description counts as length zero, which divides by three.
pub(crate) fn description_length(items: &[Item]) -> u64 {
    items
        .iter()
        .filter(|item| item.trimmed_description().len() % 3 == 0)
        .filter_map(Item::parsed_price)
        .map(|price| ceil_points(price * DESCRIPTION_PRICE_MULTIPLIER))
        .fold(0u64, u64::saturating_add)
}

/// Reads the last two bytes of the date, whatever field they fall in.
pub(crate) fn odd_purchase_day(date: &str) -> u64 {
    if date.len() < 10 {
        return 0;
    }

    match date.get(date.len() - 2..).and_then(parse_int) {
        Some(day) if day % 2 != 0 => ODD_DAY_BONUS,
        _ => 0,
    }
}

/// Awards any minute within hours 14 and 15.
pub(crate) fn afternoon_purchase(time: &str) -> u64 {
    if time.len() < 5 {
        return 0;
    }

    let hour = time.get(..2).and_then(parse_int);
    let minute = time.get(3..).and_then(parse_int);
    let (Some(hour), Some(minute)) = (hour, minute) else {
        return 0;
    };

    let in_window = (hour == 14 && minute >= 0) || (hour == 15 && minute < 60);
    if in_window {
        AFTERNOON_BONUS
    } else {
        0
    }
}

fn parse_int(raw: &str) -> Option<i64> {
    raw.parse::<i64>().ok()
}

fn ceil_points(value: f64) -> u64 {
    let rounded = value.ceil();
    if rounded.is_finite() && rounded > 0.0 {
        rounded as u64
    } else {
        0
    }
}
