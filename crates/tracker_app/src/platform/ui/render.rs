use tracker_core::{AppViewModel, BatchPhase, Notice, NoticeLevel, SortDirection, TableView};

const MAX_CELL_WIDTH: usize = 32;
const COLUMN_GAP: &str = "  ";

/// Renders the jobs table as fixed-width text, with a leading row-number column.
pub fn render_table(table: &TableView) -> String {
    let mut header: Vec<String> = vec!["#".to_string()];
    header.extend(table.headers.iter().map(|h| {
        let marker = match h.sorted {
            Some(SortDirection::Ascending) => " ^",
            Some(SortDirection::Descending) => " v",
            None => "",
        };
        format!("{}{}", h.label, marker)
    }));

    let body: Vec<Vec<String>> = table
        .rows
        .iter()
        .enumerate()
        .map(|(index, row)| {
            let mut cells = vec![(index + 1).to_string()];
            cells.extend(row.cells.iter().map(|cell| truncate(cell, MAX_CELL_WIDTH)));
            cells
        })
        .collect();

    let mut widths: Vec<usize> = header.iter().map(|cell| cell.chars().count()).collect();
    for row in &body {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_line(&mut out, &header, &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_line(&mut out, &rule, &widths);
    for row in &body {
        push_line(&mut out, row, &widths);
    }
    if let Some(message) = &table.empty_message {
        out.push_str(message);
        out.push('\n');
    }
    out
}

/// One-line summary below the table.
pub fn render_status(view: &AppViewModel) -> String {
    let mut parts = vec![format!("Jobs: {} of {}", view.visible_count, view.job_count)];

    if let Some(header) = view.table.headers.iter().find(|h| h.sorted.is_some()) {
        let direction = match header.sorted {
            Some(SortDirection::Descending) => "desc",
            _ => "asc",
        };
        parts.push(format!("Sort: {} {}", header.label, direction));
    }
    if !view.filter.is_empty() {
        parts.push("Filtered".to_string());
    }
    if !view.show_ignored {
        parts.push("Ignored hidden".to_string());
    }
    if view.selected_for_removal + view.selected_for_apply > 0 {
        parts.push(format!(
            "Selected: {} remove, {} apply",
            view.selected_for_removal, view.selected_for_apply
        ));
    }
    match &view.user_email {
        Some(email) => parts.push(format!("Logged in as {email}")),
        None if view.logged_in => parts.push("Logged in".to_string()),
        None => parts.push("Not logged in".to_string()),
    }
    if let Some(op) = view.busy {
        parts.push(format!("Busy: {op}"));
    }
    if let Some(phase) = batch_label(&view.batch) {
        parts.push(phase.to_string());
    }
    parts.join(" | ")
}

pub fn render_notice(notice: &Notice) -> String {
    let tag = match notice.level {
        NoticeLevel::Info => "info",
        NoticeLevel::Success => "ok",
        NoticeLevel::Warning => "warn",
        NoticeLevel::Error => "error",
    };
    format!("[{tag}] {}", notice.message)
}

fn batch_label(phase: &BatchPhase) -> Option<&'static str> {
    match phase {
        BatchPhase::Idle => None,
        BatchPhase::Removing { .. } => Some("Removing selected jobs"),
        BatchPhase::Applying => Some("Applying to selected jobs"),
        BatchPhase::Refreshing => Some("Refreshing"),
    }
}

fn push_line(out: &mut String, cells: &[String], widths: &[usize]) {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join(COLUMN_GAP);
    out.push_str(line.trim_end());
    out.push('\n');
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(3)).collect();
    format!("{kept}...")
}
