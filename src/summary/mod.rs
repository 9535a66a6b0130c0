//! Calendar views and earnings summaries.
//!
//! Everything here is derived from the shift records on demand; nothing is
//! cached between calls.

mod calendar;
mod earnings;
mod heatmap;

pub use calendar::{
    CalendarDay, MONTH_GRID_CELLS, MonthView, WeekView, month_view, shift_month, shift_week,
    week_view,
};
pub use earnings::{
    DailyEarnings, MonthlyComparison, PeriodIncome, PeriodSummary, WEEKS_PER_MONTH, WeeklySummary,
    daily_earnings, income_for_period, monthly_comparison, summarize, summarize_range,
    weekly_summaries,
};
pub use heatmap::{ShiftHeatmap, shift_heatmap};
