pub mod notification;
pub mod schedule;
pub mod spt_report;

pub use notification::{Notifications, SummaryKind, SystemSummary, TaxSummaryNotice};
pub use schedule::{DeadlineReminder, ObligationKind, PaymentScheduleEntry, Priority};
pub use spt_report::{EmployeeSummary, IncomeSummary, SptReport, TaxCalculation};
