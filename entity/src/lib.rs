//! Records exchanged with the HR backend.
//!
//! The backend is loose about JSON types: ids and amounts show up as numbers in
//! some tenants and as strings in others. Fields are decoded through [`lenient`]
//! so a single odd value never fails a whole list.

pub mod employees;
pub mod expenses;
pub mod leaves;
pub mod lenient;
pub mod locations;
pub mod reminders;
pub mod subadmins;

pub use employees::EmployeeRecord;
pub use expenses::ExpenseRecord;
pub use leaves::{LeaveRecord, LeaveStatus};
pub use locations::LocationRecord;
pub use reminders::Reminder;
pub use subadmins::SubadminRecord;
