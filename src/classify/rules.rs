//! Ordered classification rule list.
//!
//! Maps a table name to a display event type. Rules are tested in a fixed
//! priority order and the first case-insensitive pattern match wins:
//! transaction, website engagement, product browse, cart update, cart item,
//! order. Names that match no rule but look like profile/identity/insight
//! tables are excluded from the timeline; everything else falls back to a
//! generic "Event" classification.

use lazy_static::lazy_static;
use regex::Regex;

use crate::discovery::tables::RowRecord;
use crate::extraction::fields::{first_number, first_string};

/// Generic label for unrecognized but event-shaped tables.
pub const GENERIC_EVENT_LABEL: &str = "Event";

/// Generic summary for unrecognized but event-shaped tables.
pub const GENERIC_EVENT_SUMMARY: &str = "Activity";

/// One classification rule: name pattern, preferred datetime field, display
/// label and a per-row summary function.
pub struct EventRule {
    pub label: &'static str,
    pub pattern: Regex,
    pub date_field: &'static str,
    pub summarize: fn(&RowRecord) -> String,
}

/// Classification outcome for a table name.
pub enum TableKind {
    /// Matched a known rule.
    Event(&'static EventRule),
    /// Unrecognized but event-shaped; surfaces with the generic label.
    Generic,
    /// Profile/identity/insight table; excluded from the timeline.
    NonEvent,
}

// Field alias vocabulary. Data Cloud mappings surface the same attribute
// as snake_case `__c`, camelCase `__c`, or an ssot-prefixed canonical name.
pub const SESSION_ALIASES: &[&str] = &["session_id__c", "sessionId__c", "session_id", "sessionId"];
pub const DEVICE_ALIASES: &[&str] = &["device_type__c", "deviceType__c", "device_type", "deviceType"];
pub const CART_ALIASES: &[&str] = &["cart_id__c", "cartId__c", "cart_id", "cartId"];

const MERCHANT_ALIASES: &[&str] = &["merchant_name__c", "merchantName__c", "merchant__c", "merchant"];
const AMOUNT_ALIASES: &[&str] = &["amount__c", "transaction_amount__c", "amount"];
const EVENT_TYPE_ALIASES: &[&str] = &["event_type__c", "eventType__c", "event_type", "eventType"];
const PAGE_ALIASES: &[&str] = &["page_title__c", "pageTitle__c", "page_url__c", "pageUrl__c"];
const PRODUCT_ALIASES: &[&str] = &["product_name__c", "productName__c", "product__c", "product"];
const QUANTITY_ALIASES: &[&str] = &["quantity__c", "qty__c", "quantity"];
const ORDER_TOTAL_ALIASES: &[&str] = &["order_total__c", "orderTotal__c", "total_amount__c"];
const ORDER_STATUS_ALIASES: &[&str] = &["order_status__c", "orderStatus__c", "status__c", "status"];

lazy_static! {
    /// Classification rules in priority order; first match wins.
    pub static ref EVENT_RULES: Vec<EventRule> = vec![
        EventRule {
            label: "Transaction",
            pattern: Regex::new(r"(?i)transaction").unwrap(),
            date_field: "transaction_date_time__c",
            summarize: summarize_transaction,
        },
        EventRule {
            label: "Website Engagement",
            pattern: Regex::new(r"(?i)engagement").unwrap(),
            date_field: "event_date_time__c",
            summarize: summarize_engagement,
        },
        EventRule {
            label: "Product Browse",
            pattern: Regex::new(r"(?i)browse").unwrap(),
            date_field: "event_date_time__c",
            summarize: summarize_browse,
        },
        EventRule {
            label: "Cart Update",
            pattern: Regex::new(r"(?i)cart.?update").unwrap(),
            date_field: "event_date_time__c",
            summarize: summarize_cart_update,
        },
        EventRule {
            label: "Cart Item",
            pattern: Regex::new(r"(?i)cart.?item").unwrap(),
            date_field: "created_date__c",
            summarize: summarize_cart_item,
        },
        EventRule {
            label: "Order",
            pattern: Regex::new(r"(?i)order").unwrap(),
            date_field: "order_date_time__c",
            summarize: summarize_order,
        },
    ];

    /// Tables matching none of the rules and this pattern feed the
    /// profile/insights view instead of the timeline.
    static ref NON_EVENT_PATTERN: Regex =
        Regex::new(r"(?i)individual|profile|identity|link|insight").unwrap();
}

/// Classify a table name; first matching rule wins.
pub fn classify_table(name: &str) -> TableKind {
    for rule in EVENT_RULES.iter() {
        if rule.pattern.is_match(name) {
            return TableKind::Event(rule);
        }
    }

    if NON_EVENT_PATTERN.is_match(name) {
        return TableKind::NonEvent;
    }

    TableKind::Generic
}

fn summarize_transaction(row: &RowRecord) -> String {
    let merchant = first_string(row, MERCHANT_ALIASES);
    let amount = first_number(row, AMOUNT_ALIASES);

    match (amount, merchant) {
        (Some(amount), Some(merchant)) => format!("${:.2} at {}", amount, merchant),
        (Some(amount), None) => format!("${:.2} transaction", amount),
        (None, Some(merchant)) => format!("Transaction at {}", merchant),
        (None, None) => "Transaction".to_string(),
    }
}

fn summarize_engagement(row: &RowRecord) -> String {
    let action = first_string(row, EVENT_TYPE_ALIASES).unwrap_or_else(|| "Page view".to_string());

    match first_string(row, PAGE_ALIASES) {
        Some(page) => format!("{}: {}", action, page),
        None => action,
    }
}

fn summarize_browse(row: &RowRecord) -> String {
    match first_string(row, PRODUCT_ALIASES) {
        Some(product) => format!("Browsed {}", product),
        None => "Product browse".to_string(),
    }
}

fn summarize_cart_update(row: &RowRecord) -> String {
    let action = first_string(row, EVENT_TYPE_ALIASES).unwrap_or_else(|| "Cart update".to_string());

    match first_string(row, PRODUCT_ALIASES) {
        Some(product) => format!("{}: {}", action, product),
        None => action,
    }
}

fn summarize_cart_item(row: &RowRecord) -> String {
    let product = first_string(row, PRODUCT_ALIASES);
    let quantity = first_number(row, QUANTITY_ALIASES);

    match (quantity, product) {
        (Some(quantity), Some(product)) => format!("{} x {}", quantity, product),
        (None, Some(product)) => product,
        _ => "Cart item".to_string(),
    }
}

fn summarize_order(row: &RowRecord) -> String {
    let total = first_number(row, ORDER_TOTAL_ALIASES);
    let status = first_string(row, ORDER_STATUS_ALIASES);

    match (total, status) {
        (Some(total), Some(status)) => format!("${:.2} order ({})", total, status),
        (Some(total), None) => format!("${:.2} order", total),
        (None, Some(status)) => format!("Order ({})", status),
        (None, None) => "Order".to_string(),
    }
}
