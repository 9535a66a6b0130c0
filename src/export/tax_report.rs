//! Plain-text tax report export.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::{DeductionKind, IncomePeriod, TaxBreakdown, TaxMethod};

use super::ExportFile;
use super::currency::{format_fixed, format_yen};

/// Renders the tax report for `breakdown` shown for `period`.
///
/// Amounts are the stored yearly figures divided for `period`; the rates are
/// effective rates against gross income. `generated` is printed in the
/// header and used in the file name.
///
/// # Example
///
/// ```no_run
/// use shift_pay::calculation::calculate_tax;
/// use shift_pay::config::ConfigLoader;
/// use shift_pay::export::tax_report;
/// use shift_pay::models::{IncomePeriod, TaxInput, TaxMethod};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let loader = ConfigLoader::load("./config/jp").unwrap();
/// let input = TaxInput::new(Decimal::from(300_000), IncomePeriod::Monthly);
/// let breakdown = calculate_tax(&input, TaxMethod::Flat, loader.config().tax()).unwrap();
///
/// let today = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
/// let file = tax_report(&breakdown, IncomePeriod::Monthly, today);
/// assert_eq!(file.filename, "tax-report-monthly-2025-01-15.txt");
/// assert!(file.content.contains("Take-Home Pay: ¥233,100"));
/// ```
pub fn tax_report(breakdown: &TaxBreakdown, period: IncomePeriod, generated: NaiveDate) -> ExportFile {
    let view = breakdown.view(period);
    let take_home_rate = breakdown.take_home_percentage();
    let deduction_rate = breakdown.deduction_percentage();

    let mut report = String::new();
    push_line(&mut report, "JAPANESE TAX CALCULATION REPORT");
    push_line(&mut report, "==============================");
    push_line(&mut report, "");
    push_line(&mut report, &format!("Generated: {}", generated.format("%A, %B %-d, %Y")));
    push_line(&mut report, &format!("Period: {}", period));
    push_line(&mut report, &format!("Method: {}", method_label(breakdown.method)));
    push_line(&mut report, "");

    push_line(&mut report, "INCOME INFORMATION");
    push_line(&mut report, "------------------");
    push_line(&mut report, &format!("Gross Income: {}", format_yen(view.gross)));
    if let Some(taxable) = breakdown.taxable_income {
        push_line(
            &mut report,
            &format!("Taxable Income: {}", format_yen(taxable / period.divisor())),
        );
    }
    push_line(&mut report, &format!("Take-Home Pay: {}", format_yen(view.take_home)));
    push_line(&mut report, &format!("Take-Home Rate: {}%", format_fixed(take_home_rate, 1)));
    push_line(&mut report, "");

    push_line(&mut report, "DEDUCTIONS BREAKDOWN");
    push_line(&mut report, "-------------------");
    for kind in DeductionKind::ALL {
        push_line(
            &mut report,
            &format!(
                "{} ({}%): {}",
                kind.label(),
                format_fixed(breakdown.effective_rate(kind), 2),
                format_yen(view.deductions.get(kind))
            ),
        );
    }
    push_line(&mut report, "------------------");
    push_line(
        &mut report,
        &format!(
            "Total Deductions: {} ({}%)",
            format_yen(view.total_deductions),
            format_fixed(deduction_rate, 1)
        ),
    );
    push_line(&mut report, "");

    let multiplier = (take_home_rate / Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(3, RoundingStrategy::MidpointAwayFromZero);
    push_line(&mut report, "QUICK REFERENCE");
    push_line(&mut report, "---------------");
    push_line(
        &mut report,
        &format!("Formula: Take-home = Gross Income × {}", format_fixed(multiplier, 3)),
    );
    push_line(&mut report, &format!("Total Tax Rate: {}%", format_fixed(deduction_rate, 1)));
    push_line(&mut report, &format!("Net Income Rate: {}%", format_fixed(take_home_rate, 1)));
    push_line(&mut report, "");

    push_line(&mut report, "NOTE: This calculation uses standard Japanese tax rates.");
    push_line(&mut report, "Actual amounts may vary based on individual circumstances.");
    push_line(&mut report, "Please consult with a tax professional for detailed advice.");

    ExportFile {
        filename: format!(
            "tax-report-{}-{}.txt",
            period.as_str(),
            generated.format("%Y-%m-%d")
        ),
        content: report,
    }
}

fn push_line(report: &mut String, line: &str) {
    report.push_str(line);
    report.push('\n');
}

fn method_label(method: TaxMethod) -> &'static str {
    match method {
        TaxMethod::Flat => "Flat rate",
        TaxMethod::Progressive => "Progressive brackets",
    }
}
