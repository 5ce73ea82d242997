//! Terminal output formatting.

use colored::{ColoredString, Colorize};
use homebuy_core::catalog::{self, DocumentDefinition};
use homebuy_core::deadline::{days_until_text, DeadlineItem};
use homebuy_core::progress::{OverallProgress, PhaseState, ProgressStatus, StageState};
use homebuy_core::records::{
    CommunicationLog, SavedDocument, SavedPdf, Snippet, SnippetCategory, Stakeholder,
};
use homebuy_core::task::model::{Task, TaskType};
use homebuy_core::task::TaskBuckets;
use homebuy_core::transaction::Transaction;
use std::collections::BTreeMap;
use unicode_width::UnicodeWidthStr;

/// Get terminal width, defaulting to 80.
fn term_width() -> usize {
    terminal_size::terminal_size()
        .map(|(w, _)| w.0 as usize)
        .unwrap_or(80)
}

/// Pad a plain string to a given visual width (right-padded).
fn pad_right(s: &str, width: usize) -> String {
    let visual = UnicodeWidthStr::width(s);
    if visual >= width {
        s.to_string()
    } else {
        format!("{}{}", s, " ".repeat(width - visual))
    }
}

/// Truncate a string respecting visual width.
fn truncate_visual(s: &str, max_width: usize) -> String {
    if UnicodeWidthStr::width(s) <= max_width {
        return s.to_string();
    }
    if max_width <= 3 {
        return ".".repeat(max_width);
    }
    let mut result = String::new();
    let mut current_width = 0;
    for ch in s.chars() {
        let ch_width = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
        if current_width + ch_width > max_width - 2 {
            break;
        }
        result.push(ch);
        current_width += ch_width;
    }
    result.push_str("..");
    result
}

/// First eight characters of a record id.
pub fn short_id(id: &str) -> &str {
    id.get(..8).unwrap_or(id)
}

fn status_label(status: ProgressStatus) -> ColoredString {
    match status {
        ProgressStatus::Complete => "complete".green(),
        ProgressStatus::Active => "active".yellow(),
        ProgressStatus::Pending => "pending".dimmed(),
    }
}

fn progress_bar(percent: u8, width: usize) -> String {
    let filled = (percent as usize * width) / 100;
    format!(
        "{}{}",
        "█".repeat(filled).green(),
        "░".repeat(width - filled).dimmed()
    )
}

fn type_marker(task_type: TaskType) -> ColoredString {
    match task_type {
        TaskType::Action => "▸".blue(),
        TaskType::Paperwork => "▤".cyan(),
        TaskType::Payment => "$".yellow(),
        TaskType::Waiting => "◷".magenta(),
    }
}

fn money(amount: f64) -> String {
    let whole = amount.round() as i64;
    let digits = whole.abs().to_string();
    let mut grouped = String::new();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if whole < 0 {
        format!("-${}", grouped)
    } else {
        format!("${}", grouped)
    }
}

fn or_dash(s: &str) -> String {
    if s.is_empty() {
        "-".to_string()
    } else {
        s.to_string()
    }
}

/// Print the transaction details.
pub fn print_transaction(tx: &Transaction) {
    let address = if tx.property_address.is_empty() {
        "(no address yet)".to_string()
    } else {
        tx.property_address.clone()
    };
    println!("{} {}", address.cyan().bold(), format!("({})", short_id(&tx.id)).dimmed());
    println!();
    println!("{}: {}", "Status".bold(), tx.status.as_str().yellow());
    println!("{}: {}", "Price".bold(), money(tx.purchase_price));
    println!(
        "{}: {}",
        "Effective date".bold(),
        tx.effective_date
            .map(|d| d.to_string())
            .unwrap_or_else(|| "not set".to_string())
    );
    println!(
        "{}: {}",
        "Closing date".bold(),
        tx.closing_date
            .map(|d| d.to_string())
            .unwrap_or_else(|| "not set".to_string())
    );
    if !tx.legal_description.is_empty() {
        println!("{}: {}", "Legal description".bold(), tx.legal_description);
    }

    let flag = |on: bool| if on { "yes".green() } else { "no".dimmed() };
    println!(
        "{}: loan {} · HOA {} · new construction {}",
        "Flags".bold(),
        flag(tx.has_loan),
        flag(tx.has_hoa),
        flag(tx.is_new_construction)
    );
}

/// Print the overall progress line.
pub fn print_overall(progress: &OverallProgress) {
    println!(
        " {} {} {}/{} tasks ({}%)",
        "■".cyan(),
        progress_bar(progress.percent, 30),
        progress.completed.to_string().green(),
        progress.enabled,
        progress.percent
    );
}

/// Print phase progress as a table.
pub fn print_phase_states(states: &[PhaseState]) {
    println!("{}", "Phases".bold());
    println!();

    let name_width = term_width().saturating_sub(40).clamp(16, 32);
    for state in states {
        let Some(phase) = catalog::phase(&state.phase_id) else {
            continue;
        };
        let name = truncate_visual(&phase.name, name_width);
        let skipped = if state.skipped_tasks > 0 {
            format!(" · {} skipped", state.skipped_tasks).yellow()
        } else {
            "".normal()
        };
        println!(
            "  {:>2}. {} {} {:>2}/{:<2} {}{}",
            phase.number,
            pad_right(&name, name_width),
            progress_bar(state.percent(), 10),
            state.completed_tasks,
            state.enabled_tasks,
            status_label(state.status),
            skipped
        );
    }
}

/// Print stage progress.
pub fn print_stage_states(states: &[StageState]) {
    println!("{}", "Stages".bold());
    println!();

    for state in states {
        let Some(stage) = catalog::stage(state.stage_id) else {
            continue;
        };
        let indicator = match state.status {
            ProgressStatus::Complete => "✓".green(),
            ProgressStatus::Active => "●".yellow(),
            ProgressStatus::Pending => "○".dimmed(),
        };
        println!(
            "  {} {} {} {}%",
            indicator,
            pad_right(&stage.name, 18),
            progress_bar(state.percent(), 20),
            state.percent()
        );
        println!("    {}", stage.description.dimmed());
    }
}

/// One-line task summary.
fn task_line(task: &Task) -> String {
    let title_width = term_width().saturating_sub(40).max(20);
    let title = truncate_visual(&task.title, title_width);
    let title = if task.completed {
        title.green().dimmed()
    } else if !task.is_enabled {
        title.dimmed().strikethrough()
    } else {
        title.normal()
    };
    let badge = task
        .condition
        .as_ref()
        .map(|c| format!(" [{}]", c.label()).magenta().to_string())
        .unwrap_or_default();

    format!(
        "{} {}{} {}",
        type_marker(task.task_type),
        title,
        badge,
        task.id.dimmed()
    )
}

/// Print tasks grouped into checklist sections.
pub fn print_task_buckets(heading: &str, buckets: &TaskBuckets) {
    println!("{}", heading.bold());

    let sections: [(&str, &Vec<&Task>, fn(&str) -> ColoredString); 4] = [
        ("To do", &buckets.todo, |s| s.blue().bold()),
        ("Skipped for later", &buckets.skipped, |s| s.yellow().bold()),
        ("Completed", &buckets.completed, |s| s.green().bold()),
        ("Not applicable", &buckets.not_applicable, |s| s.dimmed()),
    ];

    let mut printed = false;
    for (name, tasks, paint) in sections {
        if tasks.is_empty() {
            continue;
        }
        printed = true;
        println!();
        println!(" {} {}", paint(name), tasks.len().to_string().dimmed());
        for task in tasks {
            println!("   {}", task_line(task));
        }
    }

    if !printed {
        println!("{}", "No tasks found.".dimmed());
    }
}

/// Print one task with its instructions and open dependencies.
pub fn print_task(task: &Task, blocking: &[&Task]) {
    println!("{} {}", task.title.cyan().bold(), format!("({})", task.id).dimmed());
    println!();

    if !task.description.is_empty() {
        println!("{}", task.description);
        println!();
    }

    let state = if task.completed {
        "completed".green()
    } else if task.skipped {
        "skipped".yellow()
    } else if !task.is_enabled {
        "not applicable".dimmed()
    } else {
        "to do".normal()
    };
    println!("{}: {}", "Status".bold(), state);
    println!("{}: {}", "Type".bold(), task.task_type.as_str());
    if let Some(phase) = catalog::phase(&task.phase_id) {
        println!("{}: {}", "Phase".bold(), phase.name);
    }
    if let Some(condition) = &task.condition {
        println!("{}: {}", "Condition".bold(), condition.label().magenta());
    }
    if !task.user_time_estimate.is_empty() {
        println!(
            "{}: {} (wait: {})",
            "Time".bold(),
            task.user_time_estimate,
            or_dash(&task.external_wait_time)
        );
    }
    if let Some(external) = &task.external_dependency {
        println!("{}: {}", "Waiting on".bold(), external);
    }
    if let Some(role) = task.related_stakeholder_role {
        println!("{}: {}", "Contact".bold(), catalog::role_label(role));
    }
    match (task.deadline_date, task.deadline_days) {
        (Some(date), _) => println!("{}: {}", "Due".bold(), date),
        (None, Some(days)) => println!("{}: {} days after effective date", "Due".bold(), days),
        (None, None) => {}
    }

    if !task.instructions.is_empty() {
        println!();
        println!("{}", "Steps".bold());
        for (i, step) in task.instructions.iter().enumerate() {
            println!("  {}. {}", i + 1, step);
        }
    }

    if !blocking.is_empty() {
        println!();
        println!("{}", "Waiting on tasks".bold());
        for dep in blocking {
            println!("  {} {} {}", "○".yellow(), dep.title, dep.id.dimmed());
        }
    }

    if !task.depended_on_by.is_empty() {
        println!();
        println!("{}: {}", "Unblocks".bold(), task.depended_on_by.join(", ").dimmed());
    }

    if !task.related_documents.is_empty() {
        println!();
        println!("{}", "Documents".bold());
        for doc in task.related_documents.iter().filter_map(|id| catalog::document(id)) {
            println!("  {} {}", "▤".cyan(), doc.name);
        }
    }

    if !task.notes.is_empty() {
        println!();
        println!("{}", "Notes".bold());
        println!("  {}", task.notes);
    }
}

/// Print deadlines, soonest first.
pub fn print_deadlines(items: &[DeadlineItem]) {
    if items.is_empty() {
        println!("{}", "No upcoming deadlines.".dimmed());
        return;
    }

    for item in items {
        let when = pad_right(&days_until_text(item.days_until), 16);
        let when = if item.is_urgent {
            when.red().bold()
        } else if item.is_upcoming {
            when.yellow()
        } else {
            when.normal()
        };
        println!(
            "  {} {} {} {}",
            item.deadline_date.to_string().dimmed(),
            pad_right(&truncate_visual(&item.task_title, 40), 40),
            when,
            item.stage_name.dimmed()
        );
    }
}

/// Print snippets grouped by category.
pub fn print_snippets(snippets: &[&Snippet]) {
    if snippets.is_empty() {
        println!("{}", "No snippets found.".dimmed());
        return;
    }

    for category in SnippetCategory::ALL {
        let in_category: Vec<&&Snippet> =
            snippets.iter().filter(|s| s.category == category).collect();
        if in_category.is_empty() {
            continue;
        }
        println!("{}", category.label().bold());
        for snippet in in_category {
            let value = if snippet.value.is_empty() {
                "(empty)".dimmed()
            } else {
                snippet.value.as_str().normal()
            };
            println!(
                "  {} {} {}",
                short_id(&snippet.id).dimmed(),
                pad_right(&snippet.label, 22),
                value
            );
        }
        println!();
    }
}

/// Print stakeholders as a table.
pub fn print_stakeholders(stakeholders: &[Stakeholder]) {
    if stakeholders.is_empty() {
        println!("{}", "No stakeholders added.".dimmed());
        return;
    }

    println!("{:<10} {:<18} {:<22} {:<16} {}", "ID", "Role", "Name", "Phone", "Email");
    println!("{}", "─".repeat(term_width().min(90)));
    for s in stakeholders {
        println!(
            "{:<10} {:<18} {:<22} {:<16} {}",
            short_id(&s.id),
            catalog::role_label(s.role),
            truncate_visual(&s.display_name(), 20),
            or_dash(&s.phone),
            or_dash(&s.email)
        );
    }
}

/// Print communication log entries.
pub fn print_logs(logs: &[&CommunicationLog], stakeholders: &[Stakeholder]) {
    if logs.is_empty() {
        println!("{}", "No communication logged.".dimmed());
        return;
    }

    for log in logs {
        let who = stakeholders
            .iter()
            .find(|s| s.id == log.stakeholder_id)
            .map(|s| s.display_name())
            .unwrap_or_else(|| "unknown".to_string());
        println!(
            "  {} {} {} {}",
            short_id(&log.id).dimmed(),
            log.date.to_string().dimmed(),
            log.kind.label().cyan(),
            who.bold()
        );
        println!("    {}", log.summary);
        if log.follow_up_needed {
            let due = log
                .follow_up_date
                .map(|d| format!(" by {}", d))
                .unwrap_or_default();
            println!("    {}", format!("↻ follow up{}", due).yellow());
        }
    }
}

/// Print uploaded documents.
pub fn print_documents(documents: &[SavedDocument]) {
    if documents.is_empty() {
        println!("{}", "No documents uploaded.".dimmed());
        return;
    }

    println!("{:<10} {:<28} {:<14} {}", "ID", "Name", "Category", "File");
    println!("{}", "─".repeat(term_width().min(80)));
    for doc in documents {
        println!(
            "{:<10} {:<28} {:<14} {}",
            short_id(&doc.id),
            truncate_visual(&doc.name, 26),
            doc.category.as_str(),
            doc.file_name.dimmed()
        );
    }
}

/// Print saved PDFs.
pub fn print_saved_pdfs(saved: &[&SavedPdf]) {
    if saved.is_empty() {
        println!("{}", "No saved PDFs.".dimmed());
        return;
    }

    for pdf in saved {
        let document = catalog::document(&pdf.document_id)
            .map(|d| d.name.as_str())
            .unwrap_or(pdf.document_id.as_str());
        println!(
            "  {} {} {} {} {}",
            short_id(&pdf.id).dimmed(),
            format!("v{}", pdf.version).cyan(),
            pdf.name.bold(),
            document.dimmed(),
            pdf.saved_at.dimmed()
        );
    }
}

/// Print a document's form fields with the values snippets would supply.
pub fn print_form_fields(document: &DocumentDefinition, values: &BTreeMap<String, String>) {
    println!("{} {}", document.name.cyan().bold(), format!("({})", document.id).dimmed());
    if let Some(form) = &document.trec_form_number {
        println!("{}: {}", "Form".bold(), form);
    }
    println!("{}: {}", "Official".bold(), document.official_url);
    println!();

    for field in &document.form_fields {
        let value = match values.get(&field.pdf_field_name) {
            Some(v) => v.as_str().green(),
            None => "(no value)".dimmed(),
        };
        println!(
            "  {} {} {}",
            pad_right(&field.pdf_field_name, 20),
            pad_right(
                &format!("{} / {}", field.snippet_category.as_str(), field.snippet_label),
                32
            )
            .dimmed(),
            value
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_visual() {
        assert_eq!(truncate_visual("short", 10), "short");
        assert_eq!(truncate_visual("a longer title", 8), "a long..");
        assert_eq!(truncate_visual("abc", 2), "..");
    }

    #[test]
    fn test_money() {
        assert_eq!(money(325000.0), "$325,000");
        assert_eq!(money(999.4), "$999");
        assert_eq!(money(1234567.0), "$1,234,567");
        assert_eq!(money(0.0), "$0");
    }

    #[test]
    fn test_short_id() {
        assert_eq!(short_id("0123456789abcdef"), "01234567");
        assert_eq!(short_id("abc"), "abc");
    }
}
