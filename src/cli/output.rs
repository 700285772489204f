use std::fmt::Write;

use chrono::NaiveDateTime;
use colored::{ColoredString, Colorize};

use cadence_core::{
    BudgetPeriodConfig, BudgetPeriodSummary, BudgetStatus, CommitmentSummary, Overview,
    PeriodWindow, RecurrenceConfig, RecurrenceStatus, UrgencyTier,
};

const SEPARATOR: &str = "----------------------------------------";

pub fn format_instant(instant: NaiveDateTime) -> String {
    instant.format("%Y-%m-%d %H:%M:%S%.3f").to_string()
}

fn plural_days(days: i64) -> String {
    if days.abs() == 1 {
        format!("{days} day")
    } else {
        format!("{days} days")
    }
}

fn section(title: &str) -> ColoredString {
    format!("=== {title} ===").bold()
}

pub fn styled_tier(tier: UrgencyTier) -> ColoredString {
    match tier {
        UrgencyTier::Overdue => tier.label().red().bold(),
        UrgencyTier::DueSoon => tier.label().yellow(),
        UrgencyTier::ThisWeek => tier.label().cyan(),
        UrgencyTier::Upcoming => tier.label().green(),
    }
}

pub fn styled_budget_status(status: BudgetStatus) -> ColoredString {
    let label = status.to_string();
    match status {
        BudgetStatus::OverBudget => label.red().bold(),
        BudgetStatus::OnTrack => label.yellow(),
        BudgetStatus::UnderBudget => label.green(),
    }
}

fn due_phrase(days_until_due: i64) -> String {
    match days_until_due {
        0 => "due today".to_string(),
        days if days < 0 => format!("{} overdue", plural_days(-days)),
        days => format!("due in {}", plural_days(days)),
    }
}

pub fn render_window(config: &BudgetPeriodConfig, window: &PeriodWindow) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", section(&config.to_string()));
    let _ = writeln!(out, "Start: {}", format_instant(window.period_start));
    let _ = writeln!(out, "End:   {}", format_instant(window.period_end));
    let _ = write!(
        out,
        "Resets in {} (on {})",
        plural_days(window.days_until_reset),
        window.reset_date()
    );
    out
}

pub fn render_status(config: &RecurrenceConfig, status: &RecurrenceStatus) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{}",
        section(&format!("{} payment of {:.2}", config.frequency, config.amount))
    );
    let _ = writeln!(
        out,
        "Next expected: {} ({})",
        config.next_expected_date,
        due_phrase(status.days_until_due)
    );
    let _ = writeln!(out, "Urgency:       {}", styled_tier(status.urgency_tier));
    let _ = writeln!(out, "Progress:      {:.1}%", status.period_progress_percent);
    let _ = write!(
        out,
        "Cost:          {:.2}/year, {:.2}/month, {:.2}/week, {:.2}/day",
        status.costs.annual_cost,
        status.costs.monthly_average,
        status.costs.weekly_average,
        status.costs.daily_average
    );
    out
}

fn render_budget(out: &mut String, summary: &BudgetPeriodSummary) {
    let _ = writeln!(
        out,
        "{} [{}]: {}",
        summary.name.bold(),
        summary.config,
        styled_budget_status(summary.status)
    );
    let _ = writeln!(
        out,
        "  {} to {}, resets in {}",
        summary.window.period_start.date(),
        summary.window.period_end.date(),
        plural_days(summary.window.days_until_reset)
    );
    let _ = write!(
        out,
        "  spent {:.2} of {:.2}",
        summary.spent, summary.available
    );
    if summary.rollover_in > 0.0 {
        let _ = write!(out, " (incl. {:.2} rollover)", summary.rollover_in);
    }
    let _ = writeln!(
        out,
        ", remaining {:.2}, {:.2}/day",
        summary.remaining, summary.daily_allowance
    );
}

fn render_commitments(out: &mut String, commitments: &CommitmentSummary) {
    let counts = UrgencyTier::ALL
        .iter()
        .map(|tier| format!("{} {}", commitments.count_for(*tier), tier.label().to_lowercase()))
        .collect::<Vec<_>>()
        .join(", ");
    let _ = writeln!(out, "{} active: {}", commitments.active_count, counts);
    if commitments.overdue_amount > 0.0 {
        let _ = writeln!(
            out,
            "{}",
            format!("Outstanding now: {:.2}", commitments.overdue_amount).red()
        );
    }
    let _ = write!(
        out,
        "Projected: {:.2}/year, {:.2}/month, {:.2}/week",
        commitments.costs.annual_cost,
        commitments.costs.monthly_average,
        commitments.costs.weekly_average
    );
}

pub fn render_overview(overview: &Overview) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Generated at {}", format_instant(overview.generated_at));

    let _ = writeln!(out, "{}", section("Budgets"));
    if overview.budgets.is_empty() {
        let _ = writeln!(out, "No budgets.");
    }
    for summary in &overview.budgets {
        render_budget(&mut out, summary);
    }

    let _ = writeln!(out, "{}", section("Bills"));
    if overview.agenda.is_empty() {
        let _ = writeln!(out, "No active recurring expenses.");
    }
    for entry in &overview.agenda {
        let _ = writeln!(
            out,
            "{:<10} {} {:>10.2}  {} ({})",
            styled_tier(entry.status.urgency_tier),
            entry.name.bold(),
            entry.amount,
            entry.next_expected_date,
            due_phrase(entry.status.days_until_due)
        );
    }
    let _ = writeln!(out, "{SEPARATOR}");
    render_commitments(&mut out, &overview.commitments);
    out
}
