use tally_core::catalog::catalog;

use crate::cli::context::{CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::dashboard::DashboardView;

use super::CommandDefinition;

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new(
            "dashboard",
            "Show today's metrics, tips and recent entries",
            "dashboard [--json]",
            cmd_dashboard,
        ),
        CommandDefinition::new(
            "add",
            "Record an income entry for today",
            "add <income> [note...]",
            cmd_add,
        ),
    ]
}

fn cmd_dashboard(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let tenant = context.require_session()?;
    let json = match args {
        [] => false,
        ["--json"] => true,
        _ => {
            return Err(CommandError::InvalidArguments(
                "dashboard [--json]".into(),
            ))
        }
    };

    let view = context.dashboard.view(&tenant, context.locale)?;
    if json {
        output::raw(serde_json::to_string_pretty(&view)?);
    } else {
        render(&view);
    }
    Ok(())
}

fn render(view: &DashboardView) {
    let messages = catalog(view.locale);
    let report = &view.report;

    output::section(format!("{} | {}", view.tenant, report.today));
    output::info(&view.plan_message);
    if report.quota.reached {
        output::warning(messages.quota_reached(report.quota.limit));
    }
    output::info(format!(
        "{}: {:.2}",
        messages.today_income_label, report.today_total
    ));
    output::info(format!("{}: {:.2}", messages.average_7_label, report.average_7));
    output::info(format!(
        "{}: {:.2}",
        messages.average_30_label, report.average_30
    ));
    if let (Some(weak), Some(label)) = (&report.weakest_bucket, &view.weak_label) {
        output::info(format!(
            "{}: {} ({:.2})",
            messages.weak_time_label, label, weak.total
        ));
    }

    output::section(messages.tips_label);
    for tip in &view.suggestions {
        output::raw(format!("  - {tip}"));
    }

    output::section(messages.recent_label);
    for entry in &view.recent {
        output::raw(format!(
            "  {} {:<5} {:>10.2}  {}",
            entry.date_label(),
            entry.time.as_deref().unwrap_or("--:--"),
            entry.income,
            entry.note
        ));
    }
    output::separator();
}

fn cmd_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let tenant = context.require_session()?;
    let Some((income, note)) = args.split_first() else {
        return Err(CommandError::InvalidArguments(
            "add <income> [note...]".into(),
        ));
    };
    let note = note.join(" ");

    let entry = context.dashboard.record_income(&tenant, income, &note)?;
    let quota = context.dashboard.quota_status(&tenant)?;
    let tier = context.dashboard.tenant(&tenant)?.tier;
    let messages = catalog(context.locale);

    output::success(format!(
        "{}: {} {} {:.2}",
        messages.entry_saved,
        entry.date_label(),
        entry.time.as_deref().unwrap_or_default(),
        entry.income
    ));
    output::info(messages.plan_status(&tier, &quota));
    Ok(())
}
