use crate::state::{OpKind, PendingKey};
use crate::{DraftForm, Field, UserRecord};
use std::fmt::Write;

const HEADERS: [&str; 5] = ["ID", "Name", "Email", "Department", "Actions"];
const ACTIONS: &str = "[Edit] [Delete]";

/// The add/edit form: heading, the four inputs and the submit label.
pub fn render_form(draft: &DraftForm) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "== {} ==", draft.heading());
    if let (true, Some(id)) = (draft.is_editing, draft.id) {
        let _ = writeln!(out, "  (user {})", id);
    }
    for field in Field::ALL {
        let value = draft.get(field);
        let shown = if value.is_empty() { "-" } else { value };
        let _ = writeln!(out, "  {:<12} {:<12} {}", field.name(), field.placeholder(), shown);
    }
    let _ = writeln!(out, "  [{}]", draft.submit_label());
    out
}

/// The user table with one row per record, in list order.
pub fn render_table(users: &[UserRecord]) -> String {
    let rows: Vec<[String; 5]> = users
        .iter()
        .map(|user| {
            [
                user.id.to_string(),
                user.full_name(),
                user.email.clone(),
                user.department.clone(),
                ACTIONS.to_string(),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::from("== User List ==\n");
    push_row(&mut out, &HEADERS.map(str::to_string), &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    let _ = writeln!(out, "{}", rule.join("-+-"));
    for row in &rows {
        push_row(&mut out, row, &widths);
    }
    if rows.is_empty() {
        out.push_str("(no users)\n");
    }
    out
}

fn push_row(out: &mut String, cells: &[String; 5], widths: &[usize; 5]) {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
        .collect();
    let _ = writeln!(out, "{}", padded.join(" | ").trim_end());
}

pub fn render_pending(pending: &[(PendingKey, OpKind)]) -> String {
    if pending.is_empty() {
        return "idle\n".to_string();
    }
    pending
        .iter()
        .map(|(key, kind)| format!("pending: {:?} {}\n", kind, key))
        .collect()
}
