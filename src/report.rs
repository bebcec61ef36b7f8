//! Printable shift report.
//!
//! The report is a self-contained right-to-left HTML page: a header naming
//! the shift and branch, a summary block, one row per invoice and a footer
//! stamped with the generation time. All numbers use Arabic-Indic digits.

use std::fmt::Write as _;

use chrono::{Datelike, NaiveDate, NaiveDateTime};

use crate::arabic::{format_currency_arabic, format_number_arabic, to_arabic_digits};
use crate::models::{orders_total, Order};
use crate::theme::ThemeProvider;
use crate::time_format::{format_date_arabic, format_timestamp_arabic};

pub const FALLBACK_BRANCH_NAME: &str = "الفرع المحدد";
pub const ALL_SHIFTS_NAME: &str = "جميع الورديات";
/// Label for a report restricted to one shift whose name is unknown.
pub const SELECTED_SHIFT_NAME: &str = "الوردية المحددة";

#[derive(Debug, Clone, PartialEq)]
pub struct ShiftReport {
    pub restaurant_name: String,
    pub branch_name: Option<String>,
    pub shift_name: Option<String>,
    pub day: Option<NaiveDate>,
    pub generated_at: NaiveDateTime,
    pub orders: Vec<Order>,
}

impl ShiftReport {
    pub fn branch_label(&self) -> &str {
        non_blank(self.branch_name.as_deref()).unwrap_or(FALLBACK_BRANCH_NAME)
    }

    pub fn shift_label(&self) -> &str {
        non_blank(self.shift_name.as_deref()).unwrap_or(ALL_SHIFTS_NAME)
    }

    pub fn total(&self) -> f64 {
        orders_total(&self.orders)
    }

    pub fn order_count(&self) -> usize {
        self.orders.len()
    }

    /// Renders the full document. Print output is always black on white; the
    /// on-screen preview follows `theme`.
    pub fn render_html(&self, theme: &dyn ThemeProvider) -> String {
        let restaurant = escape_html(&self.restaurant_name);
        let branch = escape_html(self.branch_label());
        let shift = escape_html(self.shift_label());
        let total = format_currency_arabic(Some(self.total()));

        let mut html = String::with_capacity(4096 + self.orders.len() * 160);
        html.push_str("<!DOCTYPE html>\n<html dir=\"rtl\" lang=\"ar\">\n<head>\n");
        html.push_str("<meta charset=\"UTF-8\">\n");
        html.push_str(
            "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n",
        );
        let _ = writeln!(html, "<title>تقرير الورديات - {restaurant}</title>");
        html.push_str("<style>\n");
        html.push_str(PRINT_STYLES);
        html.push_str(if theme.dark_mode() {
            DARK_SCREEN_STYLES
        } else {
            LIGHT_SCREEN_STYLES
        });
        html.push_str("</style>\n</head>\n<body>\n\n");

        let _ = write!(
            html,
            "<div class=\"print-header\">\n  <h1>تقرير الورديات - {restaurant}</h1>\n  \
             <h2>{shift} - {branch}</h2>\n  <p>نظام إدارة المطاعم - تقرير حسب الورديات</p>\n</div>\n\n"
        );

        html.push_str("<div class=\"print-info\">\n");
        let _ = writeln!(
            html,
            "  <div>تاريخ التقرير: {}</div>",
            format_date_arabic(self.generated_at.date())
        );
        if let Some(day) = self.day {
            let _ = writeln!(html, "  <div>اليوم: {}</div>", format_date_arabic(day));
        }
        let _ = writeln!(html, "  <div>الفرع: {branch}</div>");
        let _ = writeln!(html, "  <div>الوردية: {shift}</div>");
        let _ = writeln!(
            html,
            "  <div>عدد السجلات: {}</div>",
            format_number_arabic(Some(self.order_count() as f64))
        );
        let _ = writeln!(html, "  <div>الإجمالي الكلي: {total}</div>");
        html.push_str("</div>\n\n");

        if self.orders.is_empty() {
            html.push_str(
                "<div class=\"no-data\">\n  <h3>لا توجد طلبات في اليوم المحدد</h3>\n</div>\n",
            );
        } else {
            self.write_table(&mut html, &total);
        }

        let _ = write!(
            html,
            "\n<div class=\"print-footer\">\n  <p>تم الإنشاء في: {}</p>\n  <p>{restaurant} © {}</p>\n</div>\n\n</body>\n</html>\n",
            format_timestamp_arabic(self.generated_at),
            to_arabic_digits(self.generated_at.year())
        );
        html
    }

    fn write_table(&self, html: &mut String, total: &str) {
        html.push_str("<table class=\"print-table\">\n  <thead>\n    <tr>\n");
        html.push_str("      <th width=\"50%\">رقم الفاتورة</th>\n");
        html.push_str("      <th width=\"50%\">الإجمالي</th>\n");
        html.push_str("    </tr>\n  </thead>\n  <tbody>\n");
        for order in &self.orders {
            let number = order
                .order_number
                .as_deref()
                .map(|number| escape_html(&to_arabic_digits(number)))
                .unwrap_or_default();
            let _ = write!(
                html,
                "    <tr>\n      <td>{number}</td>\n      <td class=\"total-amount\">{}</td>\n    </tr>\n",
                format_currency_arabic(Some(order.amount()))
            );
        }
        let _ = write!(
            html,
            "    <tr class=\"total-row\">\n      <td style=\"text-align: left; padding-right: 20px;\">المجموع الكلي لجميع الفواتير:</td>\n      \
             <td class=\"total-amount\" style=\"text-align: center;\">{total}</td>\n    </tr>\n"
        );
        html.push_str("  </tbody>\n</table>\n");
    }
}

/// Escapes text for use inside HTML element content and attribute values.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

const PRINT_STYLES: &str = r#"  @media print {
    @page { margin: 0; size: A4 portrait; }
    body {
      margin: 0; padding: 15px;
      font-family: 'Arial', sans-serif;
      background: white !important;
      color: black !important;
      direction: rtl;
      font-size: 15px;
    }
    * {
      -webkit-print-color-adjust: exact !important;
      print-color-adjust: exact !important;
    }
  }
  body {
    margin: 0; padding: 15px;
    font-family: 'Arial', sans-serif;
    direction: rtl;
    font-size: 11px;
  }
  .print-header { text-align: center; margin-bottom: 20px; padding-bottom: 10px; border-bottom: 2px solid #000; }
  .print-header h1 { margin: 0 0 5px 0; font-size: 22px; font-weight: bold; }
  .print-header h2 { margin: 0 0 10px 0; font-size: 16px; }
  .print-header p { margin: 0; font-size: 14px; }
  .print-info { margin: 15px 0; padding: 10px; border: 1px solid #ccc; border-radius: 5px; }
  .print-info div { margin: 5px 0; }
  .print-table { width: 100%; border-collapse: collapse; margin: 15px 0; font-size: 9px; table-layout: fixed; }
  .print-table th { padding: 6px 3px; text-align: center; border: 1px solid #ccc; font-weight: bold; font-size: 9px; }
  .print-table td { padding: 5px 3px; border: 1px solid #ddd; text-align: center; font-size: 8px; }
  .total-amount { font-weight: bold; }
  .total-row { font-weight: bold; }
  .print-footer { margin-top: 20px; text-align: center; font-size: 9px; padding-top: 10px; border-top: 1px solid #ddd; }
  .no-data { text-align: center; padding: 40px; }
"#;

const LIGHT_SCREEN_STYLES: &str = r#"  @media screen {
    body { background: white; color: black; }
    .print-header h2 { color: #333; }
    .print-header p, .print-footer, .no-data { color: #666; }
    .print-info { background: #f9f9f9; }
    .print-table th, .total-row { background-color: #f0f0f0; }
    .print-table tr:nth-child(even) { background-color: #f9f9f9; }
  }
"#;

const DARK_SCREEN_STYLES: &str = r#"  @media screen {
    body { background: #111827; color: #f9fafb; }
    .print-header { border-bottom-color: #f9fafb; }
    .print-header h2 { color: #e5e7eb; }
    .print-header p, .print-footer, .no-data { color: #9ca3af; }
    .print-info { background: #1f2937; border-color: #374151; }
    .print-table th, .total-row { background-color: #374151; }
    .print-table tr:nth-child(even) { background-color: #1f2937; }
  }
"#;
