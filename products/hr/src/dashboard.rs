//! Figures shown on the subadmin dashboard.

use std::{collections::HashMap, time::Duration};

use chrono::{Datelike, NaiveDate, NaiveDateTime, TimeDelta};
use entity::{EmployeeRecord, ExpenseRecord, Reminder};
use platform_session::Session;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::{Candidate, HrBackend, HrResult};

/// Budget the profit/loss figure is measured against.
pub const DEFAULT_BUDGET: f64 = 1_000_000.0;

pub const UNASSIGNED_ROLE: &str = "Unassigned";

const DAY: Duration = Duration::from_secs(24 * 60 * 60);

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct DashboardStats {
    pub total_employees: usize,
    pub active_employees: usize,
    pub inactive_employees: usize,
    pub total_salary: f64,
    pub active_salary: f64,
    pub inactive_salary: f64,
    pub profit_loss: f64,
    pub profitable: bool,
}

impl DashboardStats {
    /// Headcount and payroll. Employees whose status is neither active nor
    /// inactive count towards the total only.
    pub fn compute(employees: &[EmployeeRecord], budget: f64) -> Self {
        let mut stats = Self {
            total_employees: employees.len(),
            ..Self::default()
        };
        for employee in employees {
            if employee.is_active() {
                stats.active_employees += 1;
                stats.active_salary += employee.salary_or_zero();
            } else if employee.is_inactive() {
                stats.inactive_employees += 1;
                stats.inactive_salary += employee.salary_or_zero();
            }
        }
        stats.total_salary = stats.active_salary + stats.inactive_salary;
        stats.profit_loss = budget - stats.total_salary;
        stats.profitable = stats.profit_loss > 0.0;
        stats
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RoleHeadcount {
    pub role: String,
    pub active: usize,
    pub inactive: usize,
}

/// Active vs. everyone else per job role, roles in first-seen order.
pub fn job_role_summary(employees: &[EmployeeRecord]) -> Vec<RoleHeadcount> {
    let mut summary: Vec<RoleHeadcount> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();
    for employee in employees {
        let role = employee
            .job_role
            .as_deref()
            .filter(|role| !role.trim().is_empty())
            .unwrap_or(UNASSIGNED_ROLE);
        let slot = *index.entry(role).or_insert_with(|| {
            summary.push(RoleHeadcount {
                role: role.to_string(),
                active: 0,
                inactive: 0,
            });
            summary.len() - 1
        });
        if employee.is_active() {
            summary[slot].active += 1;
        } else {
            summary[slot].inactive += 1;
        }
    }
    summary
}

pub fn birthdays_on(employees: &[EmployeeRecord], today: NaiveDate) -> Vec<&EmployeeRecord> {
    employees
        .iter()
        .filter(|employee| {
            employee
                .birth_date()
                .is_some_and(|born| born.month() == today.month() && born.day() == today.day())
        })
        .collect()
}

/// First reminder scheduled for `today`.
pub fn due_reminder(reminders: &[Reminder], today: NaiveDate) -> Option<&Reminder> {
    reminders
        .iter()
        .find(|reminder| reminder.date() == Some(today))
}

pub fn expense_total(expenses: &[ExpenseRecord]) -> f64 {
    expenses.iter().map(ExpenseRecord::amount_or_zero).sum()
}

/// Time left until the next local midnight after `now`.
pub fn until_next_midnight(now: NaiveDateTime) -> Duration {
    let tomorrow = now.date() + TimeDelta::days(1);
    let midnight = tomorrow.and_time(chrono::NaiveTime::MIN);
    (midnight - now).to_std().unwrap_or(DAY)
}

/// Reminder due today for the session's tenant, if any.
///
/// Without a subadmin id there is nothing to check, and a failing backend is
/// logged and treated as "nothing due".
pub async fn check_due_reminder<B: HrBackend>(
    backend: &B,
    session: &Session,
    today: NaiveDate,
) -> Option<Reminder> {
    let Ok(subadmin_id) = session.subadmin_id() else {
        debug!("no subadmin session; skipping reminder check");
        return None;
    };
    match backend.reminders(subadmin_id).await {
        Ok(reminders) => due_reminder(&reminders, today).cloned(),
        Err(err) => {
            warn!(error = %err, "reminder check failed");
            None
        }
    }
}

/// Checks now, at the next local midnight, then every 24 hours. Never returns.
pub async fn watch_reminders<B, F>(backend: &B, session: &Session, mut on_due: F)
where
    B: HrBackend,
    F: FnMut(&Reminder),
{
    report_due(backend, session, &mut on_due).await;
    let wait = until_next_midnight(chrono::Local::now().naive_local());
    debug!(seconds = wait.as_secs(), "next reminder check at midnight");
    tokio::time::sleep(wait).await;

    let mut ticker = tokio::time::interval(DAY);
    loop {
        ticker.tick().await;
        report_due(backend, session, &mut on_due).await;
    }
}

async fn report_due<B, F>(backend: &B, session: &Session, on_due: &mut F)
where
    B: HrBackend,
    F: FnMut(&Reminder),
{
    let today = chrono::Local::now().date_naive();
    if let Some(reminder) = check_due_reminder(backend, session, today).await {
        info!(reminder = ?reminder.function_name, "reminder due today");
        on_due(&reminder);
    }
}

/// Everything the dashboard landing page shows, fetched concurrently.
#[derive(Clone, Debug, Serialize)]
pub struct DashboardSnapshot {
    pub company: String,
    pub stats: DashboardStats,
    pub roles: Vec<RoleHeadcount>,
    pub birthdays: Vec<Candidate>,
    pub due_reminder: Option<Reminder>,
    pub expense_count: usize,
    pub expense_total: f64,
}

impl DashboardSnapshot {
    /// Individual fetch failures degrade to empty figures.
    pub async fn load<B: HrBackend>(
        backend: &B,
        session: &Session,
        budget: f64,
        today: NaiveDate,
    ) -> HrResult<Self> {
        let subadmin_id = session.subadmin_id()?;
        let (employees, reminder, expenses) = tokio::join!(
            backend.employees(subadmin_id),
            check_due_reminder(backend, session, today),
            backend.expenses(subadmin_id),
        );
        let employees = employees.unwrap_or_else(|err| {
            warn!(error = %err, "employee list unavailable");
            Vec::new()
        });
        let expenses = expenses.unwrap_or_else(|err| {
            warn!(error = %err, "expenses unavailable");
            Vec::new()
        });

        Ok(Self {
            company: session.company_name().to_string(),
            stats: DashboardStats::compute(&employees, budget),
            roles: job_role_summary(&employees),
            birthdays: birthdays_on(&employees, today)
                .into_iter()
                .map(Candidate::from_record)
                .collect(),
            due_reminder: reminder,
            expense_count: expenses.len(),
            expense_total: expense_total(&expenses),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeBackend, session};

    fn employee(status: &str, salary: f64, role: Option<&str>) -> EmployeeRecord {
        EmployeeRecord {
            status: Some(status.to_string()),
            salary: Some(salary),
            job_role: role.map(str::to_string),
            ..EmployeeRecord::default()
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn stats_split_payroll_by_status() {
        let employees = vec![
            employee("Active", 400_000.0, Some("Engineer")),
            employee("active", 350_000.0, Some("Engineer")),
            employee("Inactive", 100_000.0, Some("Sales")),
            employee("Probation", 90_000.0, None),
        ];
        let stats = DashboardStats::compute(&employees, DEFAULT_BUDGET);
        assert_eq!(stats.total_employees, 4);
        assert_eq!(stats.active_employees, 2);
        assert_eq!(stats.inactive_employees, 1);
        assert_eq!(stats.active_salary, 750_000.0);
        assert_eq!(stats.inactive_salary, 100_000.0);
        assert_eq!(stats.total_salary, 850_000.0);
        assert_eq!(stats.profit_loss, 150_000.0);
        assert!(stats.profitable);
    }

    #[test]
    fn break_even_is_not_profitable() {
        let employees = vec![employee("Active", DEFAULT_BUDGET, None)];
        let stats = DashboardStats::compute(&employees, DEFAULT_BUDGET);
        assert_eq!(stats.profit_loss, 0.0);
        assert!(!stats.profitable);
    }

    #[test]
    fn roles_keep_first_seen_order() {
        let employees = vec![
            employee("Active", 0.0, Some("Sales")),
            employee("Inactive", 0.0, None),
            employee("On Leave", 0.0, Some("Sales")),
            employee("active", 0.0, Some(" ")),
            employee("Active", 0.0, Some("Engineer")),
        ];
        let summary = job_role_summary(&employees);
        let rows: Vec<(&str, usize, usize)> = summary
            .iter()
            .map(|row| (row.role.as_str(), row.active, row.inactive))
            .collect();
        assert_eq!(
            rows,
            [("Sales", 1, 1), (UNASSIGNED_ROLE, 1, 1), ("Engineer", 1, 0)]
        );
    }

    #[test]
    fn birthdays_match_month_and_day() {
        let mut born_today = employee("Active", 0.0, None);
        born_today.birth_date = Some("1990-05-20".into());
        let mut born_other = employee("Active", 0.0, None);
        born_other.birth_date = Some("1990-05-21T00:00:00Z".into());
        let undated = employee("Active", 0.0, None);
        let employees = vec![born_today, born_other, undated];
        assert_eq!(birthdays_on(&employees, date(2025, 5, 20)).len(), 1);
    }

    #[test]
    fn due_reminder_picks_first_for_today() {
        let reminders = vec![
            Reminder {
                function_name: Some("Holi".into()),
                reminder_date: Some("2025-03-14".into()),
                ..Reminder::default()
            },
            Reminder {
                function_name: Some("Diwali".into()),
                reminder_date: Some("2025-10-20T00:00:00".into()),
                ..Reminder::default()
            },
            Reminder {
                function_name: Some("Diwali party".into()),
                reminder_date: Some("2025-10-20".into()),
                ..Reminder::default()
            },
        ];
        let due = due_reminder(&reminders, date(2025, 10, 20)).unwrap();
        assert_eq!(due.function_name.as_deref(), Some("Diwali"));
        assert!(due_reminder(&reminders, date(2025, 1, 1)).is_none());
    }

    #[test]
    fn expense_total_skips_unparseable_amounts() {
        let expenses = vec![
            ExpenseRecord {
                amount: Some(1200.5),
                ..ExpenseRecord::default()
            },
            ExpenseRecord::default(),
            ExpenseRecord {
                amount: Some(299.5),
                ..ExpenseRecord::default()
            },
        ];
        assert_eq!(expense_total(&expenses), 1500.0);
        assert_eq!(expense_total(&[]), 0.0);
    }

    #[test]
    fn midnight_countdown() {
        let now = date(2025, 5, 20).and_hms_opt(23, 30, 0).unwrap();
        assert_eq!(until_next_midnight(now), Duration::from_secs(30 * 60));
        let start = date(2025, 5, 20).and_hms_opt(0, 0, 0).unwrap();
        assert_eq!(until_next_midnight(start), DAY);
    }

    #[tokio::test]
    async fn reminder_check_without_session_is_skipped() {
        let backend = FakeBackend::default();
        let due = check_due_reminder(&backend, &Default::default(), date(2025, 1, 1)).await;
        assert!(due.is_none());
        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn snapshot_degrades_failed_sources() {
        let mut backend = FakeBackend::failing(&["expenses", "reminders"]);
        let mut star = employee("Active", 50_000.0, Some("Engineer"));
        star.first_name = Some("Ann".into());
        star.last_name = Some("Lee".into());
        star.emp_id = Some("101".into());
        star.birth_date = Some("1992-05-20".into());
        backend.employees = vec![star];

        let today = date(2025, 5, 20);
        let snapshot = DashboardSnapshot::load(&backend, &session("7"), DEFAULT_BUDGET, today)
            .await
            .unwrap();
        assert_eq!(snapshot.company, platform_session::DEFAULT_COMPANY_NAME);
        assert_eq!(snapshot.stats.active_employees, 1);
        assert_eq!(snapshot.birthdays, [Candidate::new("101", "Ann Lee")]);
        assert!(snapshot.due_reminder.is_none());
        assert_eq!(snapshot.expense_count, 0);
        assert_eq!(snapshot.expense_total, 0.0);
    }
}
