use chrono::NaiveDate;
use serde::Serialize;

use crate::models::EntityId;

pub const SHIFT_FILTER_PROPERTY: &str = "orderShift.id";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyFilter {
    pub property_name: String,
    pub property_value: String,
    pub range: bool,
}

impl PropertyFilter {
    pub fn equals(property_name: &str, value: impl ToString) -> Self {
        Self {
            property_name: property_name.to_string(),
            property_value: value.to_string(),
            range: false,
        }
    }
}

/// Body of a paged list request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrdersQuery {
    pub page_number: u32,
    pub page_size: u32,
    pub filters: Vec<PropertyFilter>,
}

impl OrdersQuery {
    pub fn new(page_number: u32, page_size: u32) -> Self {
        Self {
            page_number: page_number.max(1),
            page_size: page_size.max(1),
            filters: Vec::new(),
        }
    }

    pub fn with_shift(mut self, shift_id: Option<EntityId>) -> Self {
        if let Some(shift_id) = shift_id {
            self.filters
                .push(PropertyFilter::equals(SHIFT_FILTER_PROPERTY, shift_id));
        }
        self
    }

    pub fn to_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Query string for the shifts of one branch on one day.
pub fn shifts_query(branch_id: EntityId, day: NaiveDate) -> String {
    format!("branchId={branch_id}&day={}", day.format("%Y-%m-%d"))
}

/// Query string for every order of a shift, used when printing.
pub fn print_orders_query(shift_id: EntityId) -> String {
    format!("shiftId={shift_id}")
}

/// Joins an API base URL, an endpoint path and an optional query string.
pub fn endpoint_url(base: &str, path: &str, query: Option<&str>) -> String {
    let base = base.trim_end_matches('/');
    match query {
        Some(query) if !query.is_empty() => format!("{base}{path}?{query}"),
        _ => format!("{base}{path}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orders_query_serializes_camel_case_with_shift_filter() {
        let query = OrdersQuery::new(2, 10).with_shift(Some(EntityId(7)));
        let value: serde_json::Value = serde_json::from_str(&query.to_json().unwrap()).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "pageNumber": 2,
                "pageSize": 10,
                "filters": [
                    {"propertyName": "orderShift.id", "propertyValue": "7", "range": false}
                ]
            })
        );
    }

    #[test]
    fn orders_query_without_shift_has_no_filters() {
        let query = OrdersQuery::new(0, 0).with_shift(None);
        assert_eq!(query.page_number, 1);
        assert_eq!(query.page_size, 1);
        assert!(query.filters.is_empty());
    }

    #[test]
    fn query_strings_use_api_parameter_names() {
        let day = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(shifts_query(EntityId(4), day), "branchId=4&day=2024-03-09");
        assert_eq!(print_orders_query(EntityId(15)), "shiftId=15");
    }

    #[test]
    fn endpoint_url_joins_parts() {
        assert_eq!(
            endpoint_url("https://api.example.com/", "/api/Orders/GetAll", Some("shiftId=1")),
            "https://api.example.com/api/Orders/GetAll?shiftId=1"
        );
        assert_eq!(
            endpoint_url("https://api.example.com", "/api/Branches/GetList", None),
            "https://api.example.com/api/Branches/GetList"
        );
    }
}
