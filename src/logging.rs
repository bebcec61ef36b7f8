use std::path::Path;

use crate::arabic::{format_currency_arabic, to_arabic_digits};
use crate::constants::format_number;
use crate::models::OrderPage;
use crate::pagination::{render_markers, PageCursor};
use crate::report::ShiftReport;
use crate::time_format::format_time_12_hour;

pub fn log_report_summary(report: &ShiftReport, output: &Path) {
    for line in report_summary_lines(report, output) {
        println!("{line}");
    }
}

pub fn log_order_page(page: &OrderPage, utc_offset_hours: i32) {
    for line in order_page_lines(page, utc_offset_hours) {
        println!("{line}");
    }
}

pub fn log_pagination(current: u32, total: u32) {
    for line in pagination_lines(current, total) {
        println!("{line}");
    }
}

fn pagination_lines(current: u32, total: u32) -> Vec<String> {
    let cursor = PageCursor::new(current, total);
    let rendered = render_markers(&cursor.markers(), cursor.current());
    vec![
        format!("Page {} of {}", cursor.current(), cursor.total()),
        format!("  {rendered}"),
        format!("  {}", to_arabic_digits(&rendered)),
    ]
}

fn report_summary_lines(report: &ShiftReport, output: &Path) -> Vec<String> {
    vec![
        String::new(),
        format!("Report for {} / {}", report.shift_label(), report.branch_label()),
        format!(
            "  Day: {}",
            report
                .day
                .map(|day| day.format("%Y-%m-%d").to_string())
                .unwrap_or_else(|| "not set".to_string())
        ),
        format!("  Orders: {}", format_number(report.order_count() as u64)),
        format!("  Total: {:.2}", report.total()),
        format!("  Written to: {}", output.display()),
    ]
}

fn order_page_lines(page: &OrderPage, utc_offset_hours: i32) -> Vec<String> {
    let cursor = page.cursor();
    let mut lines = vec![
        String::new(),
        format!(
            "Page {} of {} ({} orders)",
            cursor.current(),
            cursor.total(),
            format_number(page.total_items)
        ),
    ];
    for order in &page.data {
        let shift = order.shift();
        let time = |value: Option<&String>| {
            format_time_12_hour(value.map(String::as_str).unwrap_or(""), utc_offset_hours)
        };
        lines.push(format!(
            "  {} | {} | {} | {} | {} - {}",
            order.order_number.as_deref().unwrap_or("-"),
            format_currency_arabic(order.total_with_fee),
            order.branch_name().unwrap_or("غير محدد"),
            shift
                .and_then(|shift| shift.name.as_deref())
                .unwrap_or("غير محدد"),
            time(shift.and_then(|shift| shift.start.as_ref())),
            time(shift.and_then(|shift| shift.end.as_ref())),
        ));
    }
    lines.push(format!(
        "  Total: {}",
        format_currency_arabic(Some(page.total_price()))
    ));
    let markers = render_markers(&cursor.markers(), cursor.current());
    lines.push(format!("  Pages: {markers}"));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Order, OrderShiftRef};
    use chrono::NaiveDate;
    use std::path::PathBuf;

    #[test]
    fn summary_lines_include_expected_fields() {
        let report = ShiftReport {
            restaurant_name: "Chicken One".to_string(),
            branch_name: Some("Downtown".to_string()),
            shift_name: Some("Night".to_string()),
            day: NaiveDate::from_ymd_opt(2024, 2, 1),
            generated_at: NaiveDate::from_ymd_opt(2024, 2, 2)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
            orders: vec![
                Order {
                    total_with_fee: Some(1500.0),
                    ..Default::default()
                };
                1_200
            ],
        };

        let lines = summary_lines_for(&report);
        assert_eq!(lines[1], "Report for Night / Downtown");
        assert!(lines.iter().any(|line| line.contains("2024-02-01")));
        assert!(lines.iter().any(|line| line.contains("1,200")));
        assert!(lines.iter().any(|line| line.contains("1800000.00")));
        assert!(lines.iter().any(|line| line.contains("out/report.html")));
    }

    fn summary_lines_for(report: &ShiftReport) -> Vec<String> {
        report_summary_lines(report, &PathBuf::from("out/report.html"))
    }

    #[test]
    fn order_page_lines_show_rows_and_markers() {
        let page = OrderPage {
            data: vec![Order {
                order_number: Some("A-1".to_string()),
                total_with_fee: Some(12.5),
                order_shift: Some(OrderShiftRef {
                    name: Some("Morning".to_string()),
                    start: Some("08:00".to_string()),
                    end: None,
                }),
                ..Default::default()
            }],
            page_number: 2,
            page_size: 1,
            total_pages: 6,
            total_items: 6,
            total_price: Some(75.0),
        };

        let lines = order_page_lines(&page, 2);
        assert_eq!(lines[1], "Page 2 of 6 (6 orders)");
        assert_eq!(
            lines[2],
            "  A-1 | ١٢٫٥٠ ج.م | غير محدد | Morning | ١٠:٠٠ ص - غير محدد"
        );
        assert!(lines.iter().any(|line| line.contains("٧٥٫٠٠ ج.م")));
        assert_eq!(lines.last().unwrap(), "  Pages: 1 [2] 3 4 ... 6");
    }

    #[test]
    fn pagination_lines_clamp_and_render_both_scripts() {
        let lines = pagination_lines(25, 20);
        assert_eq!(lines[0], "Page 20 of 20");
        assert_eq!(lines[1], "  1 ... 18 19 [20]");
        assert_eq!(lines[2], "  ١ ... ١٨ ١٩ [٢٠]");
    }
}
