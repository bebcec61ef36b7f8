use num_format::{CustomFormat, Grouping, Locale, ToFormattedString};

pub const ARABIC_DIGITS: [char; 10] = ['٠', '١', '٢', '٣', '٤', '٥', '٦', '٧', '٨', '٩'];
pub const THOUSANDS_SEPARATOR: &str = "\u{066C}";
pub const DECIMAL_SEPARATOR: &str = "\u{066B}";
pub const CURRENCY_SUFFIX: &str = " ج.م";
pub const ZERO_CURRENCY: &str = "٠٫٠٠ ج.م";
pub const ZERO_NUMBER: &str = "٠";
/// Largest magnitude the formatters group; beyond it they render the zero
/// fallbacks. Kept well inside `i128`.
pub const MAX_FORMATTED_AMOUNT: f64 = 1e36;

pub const PAGINATION_DELTA: u32 = 2;
pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const DEFAULT_UTC_OFFSET_HOURS: i32 = 2;
pub const DEFAULT_RESTAURANT_NAME: &str = "Chicken One";
pub const DEFAULT_OUTPUT_DIR: &str = "reports";
pub const DEFAULT_SETTINGS_FILE: &str = "report.yaml";

pub const SETTINGS_PATH_ENV_VAR: &str = "STOREFRONT_REPORT_SETTINGS";
pub const API_TOKEN_ENV_VAR: &str = "STOREFRONT_API_TOKEN";

pub const BRANCHES_PATH: &str = "/api/Branches/GetList";
pub const ORDER_SHIFTS_PATH: &str = "/api/OrderShifts/GetAll";
pub const ORDERS_PATH: &str = "/api/Orders/GetAll";
pub const ORDERS_PAGED_PATH: &str = "/api/Orders/GetAllWithPagination";

/// Groups an integer in threes with the Arabic thousands separator. Digits are
/// left in Western form; callers substitute them afterwards.
pub fn group_thousands(value: i128) -> String {
    match arabic_grouping() {
        Some(format) => value.to_formatted_string(&format),
        None => value.to_string(),
    }
}

fn arabic_grouping() -> Option<CustomFormat> {
    CustomFormat::builder()
        .grouping(Grouping::Standard)
        .minus_sign("-")
        .separator(THOUSANDS_SEPARATOR)
        .build()
        .ok()
}

pub fn format_number(value: u64) -> String {
    value.to_formatted_string(&Locale::en)
}
