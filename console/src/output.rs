//! Plain-text and JSON rendering of command results on stdout.

use std::fmt::Write as _;

use anyhow::Result;
use entity::{EmployeeRecord, LeaveRecord, Reminder};
use products_hr::{
    Candidate,
    dashboard::DashboardSnapshot,
    directory::display_name,
    leave::LeaveSummary,
    letterhead::Letterhead,
    tracking::{Coordinates, TrackedLocation},
};
use serde::Serialize;

#[derive(Clone, Copy, Debug)]
pub struct Output {
    json: bool,
}

impl Output {
    pub fn new(json: bool) -> Self {
        Self { json }
    }

    /// Prints `value` as JSON, or the text produced by `text`.
    pub fn emit<T>(&self, value: &T, text: impl FnOnce(&T) -> String) -> Result<()>
    where
        T: Serialize + ?Sized,
    {
        if self.json {
            println!("{}", serde_json::to_string_pretty(value)?);
        } else {
            let rendered = text(value);
            if !rendered.is_empty() {
                println!("{}", rendered.trim_end());
            }
        }
        Ok(())
    }
}

pub fn employees(records: &[EmployeeRecord]) -> String {
    let mut out = String::new();
    for record in records {
        let _ = writeln!(
            out,
            "{:<10} {:<28} {:<10} {}",
            record.identifier(),
            display_name(record),
            record.status.as_deref().unwrap_or("-"),
            record.job_role.as_deref().unwrap_or("-"),
        );
    }
    let _ = write!(out, "{} employee(s)", records.len());
    out
}

pub fn candidates(candidates: &[&Candidate]) -> String {
    if candidates.is_empty() {
        return "no matches".to_string();
    }
    candidates
        .iter()
        .map(|candidate| format!("{:<10} {}", candidate.id, candidate.name))
        .collect::<Vec<_>>()
        .join("\n")
}

fn coordinates(at: &Coordinates) -> String {
    format!("{:.6}, {:.6}", at.latitude, at.longitude)
}

pub fn location(location: &TrackedLocation) -> String {
    let mut out = format!("{} ({})\n", location.employee.name, location.employee.id);
    let _ = writeln!(out, "current:    {}", coordinates(&location.current));
    if !location.address.is_empty() {
        let _ = writeln!(out, "            {}", location.address);
    }
    if let Some(last) = &location.last_known {
        let _ = writeln!(out, "last known: {}", coordinates(last));
        if !location.last_address.is_empty() {
            let _ = writeln!(out, "            {}", location.last_address);
        }
    }
    out
}

pub fn leaves(summary: &LeaveSummary, records: &[&LeaveRecord]) -> String {
    let mut out = format!(
        "total {} | approved {} | rejected {} | pending {}\n",
        summary.total, summary.approved, summary.rejected, summary.pending
    );
    for record in records {
        let _ = writeln!(out, "{}", leave(record));
    }
    out
}

pub fn leave(record: &LeaveRecord) -> String {
    format!(
        "{:<8} {:<24} {} .. {}  {:<8} {}",
        record.id,
        record.employee_name(),
        record.start_date.as_deref().unwrap_or("?"),
        record.end_date.as_deref().unwrap_or("?"),
        record.status,
        record.reason.as_deref().unwrap_or(""),
    )
}

pub fn reminder(reminder: &Option<Reminder>) -> String {
    match reminder {
        Some(reminder) => format!(
            "Reminder due today: {}",
            reminder.function_name.as_deref().unwrap_or("(untitled)")
        ),
        None => "No reminder due today".to_string(),
    }
}

pub fn dashboard(snapshot: &DashboardSnapshot) -> String {
    let stats = &snapshot.stats;
    let mut out = format!("{}\n", snapshot.company);
    let _ = writeln!(
        out,
        "employees: {} total, {} active, {} inactive",
        stats.total_employees, stats.active_employees, stats.inactive_employees
    );
    let _ = writeln!(
        out,
        "salary:    {:.2} total ({:.2} active, {:.2} inactive)",
        stats.total_salary, stats.active_salary, stats.inactive_salary
    );
    let _ = writeln!(
        out,
        "{}:    {:.2}",
        if stats.profitable { "profit" } else { "loss  " },
        stats.profit_loss.abs()
    );
    let _ = writeln!(
        out,
        "expenses:  {:.2} over {} entries",
        snapshot.expense_total, snapshot.expense_count
    );
    if !snapshot.roles.is_empty() {
        let _ = writeln!(out, "roles:");
        for role in &snapshot.roles {
            let _ = writeln!(
                out,
                "  {:<24} {} active, {} inactive",
                role.role, role.active, role.inactive
            );
        }
    }
    if !snapshot.birthdays.is_empty() {
        let names: Vec<&str> = snapshot
            .birthdays
            .iter()
            .map(|candidate| candidate.name.as_str())
            .collect();
        let _ = writeln!(out, "birthdays today: {}", names.join(", "));
    }
    let _ = writeln!(out, "{}", reminder(&snapshot.due_reminder));
    out
}

pub fn letterhead(letterhead: &Letterhead) -> String {
    let mut out = format!("{}\n{}\n", letterhead.company_name, letterhead.tagline);
    if let Some(logo) = &letterhead.logo_url {
        let _ = writeln!(out, "logo: {logo}");
    }
    for line in &letterhead.details {
        let _ = writeln!(out, "{line}");
    }
    let _ = writeln!(out, "---");
    for line in &letterhead.footer {
        let _ = writeln!(out, "{line}");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use entity::LeaveStatus;

    #[test]
    fn empty_suggestions_say_so() {
        assert_eq!(candidates(&[]), "no matches");
        let ann = Candidate::new("E1", "Ann Lee");
        assert_eq!(candidates(&[&ann]), "E1         Ann Lee");
    }

    #[test]
    fn leave_table_starts_with_summary() {
        let record = LeaveRecord {
            id: "7".into(),
            employee_name: Some("John Cena".into()),
            start_date: Some("2025-05-26".into()),
            end_date: Some("2025-05-28".into()),
            status: LeaveStatus::Approved,
            ..LeaveRecord::default()
        };
        let summary = LeaveSummary {
            total: 1,
            approved: 1,
            ..LeaveSummary::default()
        };
        let text = leaves(&summary, &[&record]);
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("total 1 | approved 1 | rejected 0 | pending 0")
        );
        let row = lines.next().unwrap();
        assert!(row.contains("John Cena"));
        assert!(row.contains("2025-05-26 .. 2025-05-28"));
        assert!(row.contains("Approved"));
    }

    #[test]
    fn location_omits_missing_last_known() {
        let text = location(&TrackedLocation {
            employee: Candidate::new("E1", "Ann Lee"),
            current: Coordinates::from((18.5, 73.8)),
            last_known: None,
            address: "Pune, Maharashtra".into(),
            last_address: String::new(),
        });
        assert!(text.contains("current:    18.500000, 73.800000"));
        assert!(text.contains("Pune, Maharashtra"));
        assert!(!text.contains("last known"));
    }
}
