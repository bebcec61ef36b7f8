//! Records returned by the storefront API.
//!
//! The API is loose about shapes: lists arrive under `data` or `items`,
//! counters may be missing and ids come back as numbers or strings. Everything
//! is accepted here and normalised once, so downstream code can rely on the
//! invariants documented on each type.

use std::fmt;

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};

use crate::pagination::{page_count, PageCursor};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntityId(pub u64);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for EntityId {
    fn from(value: u64) -> Self {
        EntityId(value)
    }
}

impl Serialize for EntityId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(self.0)
    }
}

impl<'de> Deserialize<'de> for EntityId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct EntityIdVisitor;

        impl<'de> Visitor<'de> for EntityIdVisitor {
            type Value = EntityId;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("a non-negative integer id")
            }

            fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(EntityId(value))
            }

            fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                u64::try_from(value)
                    .map(EntityId)
                    .map_err(|_| E::custom("id must be non-negative"))
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                value
                    .trim()
                    .parse::<u64>()
                    .map(EntityId)
                    .map_err(|_| E::custom("id must be a u64"))
            }
        }

        deserializer.deserialize_any(EntityIdVisitor)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Branch {
    pub id: EntityId,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderShift {
    pub id: EntityId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub start: Option<String>,
    #[serde(default)]
    pub end: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedRef {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(default)]
    pub id: Option<EntityId>,
    #[serde(default)]
    pub order_number: Option<String>,
    #[serde(default)]
    pub total_with_fee: Option<f64>,
    #[serde(default)]
    pub branch: Option<NamedRef>,
    #[serde(default)]
    pub order_shift: Option<OrderShiftRef>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderShiftRef {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub start: Option<String>,
    #[serde(default)]
    pub end: Option<String>,
}

impl Order {
    /// The order total, counting a missing or non-finite amount as zero.
    pub fn amount(&self) -> f64 {
        self.total_with_fee
            .filter(|value| value.is_finite())
            .unwrap_or(0.0)
    }

    pub fn branch_name(&self) -> Option<&str> {
        self.branch.as_ref().and_then(|branch| branch.name.as_deref())
    }

    pub fn shift(&self) -> Option<&OrderShiftRef> {
        self.order_shift.as_ref()
    }
}

/// Sum of the order totals shown at the foot of a report.
pub fn orders_total(orders: &[Order]) -> f64 {
    orders.iter().map(Order::amount).sum()
}

/// A page of orders as sent by the paged orders endpoint.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderPage {
    #[serde(default, alias = "items")]
    pub data: Vec<Order>,
    #[serde(default)]
    pub page_number: u32,
    #[serde(default)]
    pub page_size: u32,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_items: u64,
    #[serde(default)]
    pub total_price: Option<f64>,
}

impl OrderPage {
    /// Fills in counters the API left out and clamps the page number so that
    /// `1 <= page_number <= total_pages` holds afterwards.
    pub fn normalized(mut self, requested_page_size: u32) -> Self {
        if self.page_size == 0 {
            self.page_size = requested_page_size.max(1);
        }
        if self.total_items == 0 {
            self.total_items = self.data.len() as u64;
        }
        if self.total_pages == 0 {
            self.total_pages = page_count(self.total_items, self.page_size);
        }
        let cursor = PageCursor::new(self.page_number, self.total_pages);
        self.page_number = cursor.current();
        self.total_pages = cursor.total();
        self
    }

    pub fn cursor(&self) -> PageCursor {
        PageCursor::new(self.page_number, self.total_pages)
    }

    /// The reported grand total, or the sum of this page when the API omits it.
    pub fn total_price(&self) -> f64 {
        self.total_price
            .filter(|value| value.is_finite())
            .unwrap_or_else(|| orders_total(&self.data))
    }
}

/// Order lists come back either bare or wrapped like a page.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum OrderList {
    Bare(Vec<Order>),
    Wrapped(OrderPage),
}

impl OrderList {
    pub fn into_orders(self) -> Vec<Order> {
        match self {
            OrderList::Bare(orders) => orders,
            OrderList::Wrapped(page) => page.data,
        }
    }
}

/// A saved shift export: orders plus optional labels for the report header.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct ShiftExport {
    #[serde(default)]
    pub branch: Option<String>,
    #[serde(default)]
    pub shift: Option<String>,
    #[serde(default)]
    pub day: Option<String>,
    pub orders: Vec<Order>,
}

/// Input accepted by the report renderer: a shift export, or any order list
/// as the API returns it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ReportInput {
    Export(ShiftExport),
    List(OrderList),
}

impl ReportInput {
    pub fn into_export(self) -> ShiftExport {
        match self {
            ReportInput::Export(export) => export,
            ReportInput::List(list) => ShiftExport {
                orders: list.into_orders(),
                ..Default::default()
            },
        }
    }
}
