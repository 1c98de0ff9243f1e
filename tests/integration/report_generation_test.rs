//! Annual SPT report, payment schedule and deadline reminders over a
//! populated ledger.

mod test_support;

use actix_web::{http::StatusCode, test, App};
use chrono::NaiveDate;
use pajak::employees::{EmployeeRequest, EmploymentStatus};
use pajak::modules::settings::UpdateSettingsRequest;
use pajak::reports::models::{ObligationKind, Priority, SummaryKind};
use pajak::transactions::{TransactionKind, TransactionRequest};
use pajak::AppState;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::Value;
use test_support::{decimal, test_state};

async fn seed_ledger(state: &AppState) {
    for (name, salary) in [("Budi Santoso", dec!(10000000)), ("Dewi Lestari", dec!(4000000))] {
        state
            .employees
            .create_employee(EmployeeRequest {
                name: name.to_string(),
                status: EmploymentStatus::Permanent,
                monthly_salary: salary,
                allowances: Decimal::ZERO,
                npwp: None,
            })
            .await
            .unwrap();
    }

    let entries = [
        (TransactionKind::Sale, dec!(200000000), "2026-02-10", None),
        (
            TransactionKind::Purchase,
            dec!(80000000),
            "2026-06-18",
            Some("010.000-26.00000077"),
        ),
        (TransactionKind::Sale, dec!(30000000), "2025-11-30", None),
    ];
    for (kind, amount, date, invoice) in entries {
        state
            .transactions
            .create_transaction(TransactionRequest {
                kind,
                description: format!("{} {}", kind, date),
                amount,
                amount_includes_vat: false,
                transaction_date: Some(date.to_string()),
                invoice_number: invoice.map(str::to_string),
            })
            .await
            .unwrap();
    }
}

#[actix_web::test]
async fn test_spt_report_endpoint() {
    let state = test_state().await;
    seed_ledger(&state).await;
    let app = test::init_service(App::new().configure(|cfg| state.register(cfg))).await;

    let report: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get().uri("/reports/spt/2026").to_request(),
    )
    .await;

    assert_eq!(report["year"], 2026);
    assert_eq!(decimal(&report["income_summary"]["total_sales"]), dec!(200000000));
    assert_eq!(decimal(&report["income_summary"]["total_purchases"]), dec!(80000000));
    assert_eq!(decimal(&report["income_summary"]["net_income"]), dec!(120000000));

    assert_eq!(report["employee_summary"]["total_employees"], 2);
    assert_eq!(
        decimal(&report["employee_summary"]["total_pph21_withheld"]),
        dec!(3000000)
    );

    assert_eq!(decimal(&report["ppn_summary"]["output_tax"]), dec!(22000000));
    assert_eq!(decimal(&report["ppn_summary"]["input_tax"]), dec!(8800000));
    assert_eq!(decimal(&report["ppn_summary"]["net_payable"]), dec!(13200000));

    // 25% of 120M, less 3M withheld
    assert_eq!(
        decimal(&report["tax_calculation"]["corporate_tax_payable"]),
        dec!(30000000)
    );
    assert_eq!(
        decimal(&report["tax_calculation"]["net_tax_payable"]),
        dec!(27000000)
    );
}

#[actix_web::test]
async fn test_report_uses_current_settings() {
    let state = test_state().await;
    seed_ledger(&state).await;

    state
        .settings
        .update(UpdateSettingsRequest {
            corporate_tax_rate: Some(dec!(0.22)),
            ..Default::default()
        })
        .await
        .unwrap();

    let report = state.reports.annual_report(2026).await.unwrap();
    assert_eq!(report.tax_calculation.corporate_tax_rate, dec!(0.22));
    assert_eq!(report.tax_calculation.corporate_tax_payable, dec!(26400000));

    let previous = state.reports.annual_report(2025).await.unwrap();
    assert_eq!(previous.income_summary.total_sales, dec!(30000000));
    assert_eq!(previous.ppn_summary.transaction_count, 1);
}

#[actix_web::test]
async fn test_schedule_endpoint() {
    let state = test_state().await;
    let app = test::init_service(App::new().configure(|cfg| state.register(cfg))).await;

    let schedule: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get().uri("/reports/schedule/2026").to_request(),
    )
    .await;
    let entries = schedule.as_array().unwrap();
    assert_eq!(entries.len(), 25);
    assert_eq!(entries[0]["kind"], "pph21");
    assert_eq!(entries[0]["due_date"], "2026-01-20");
    assert_eq!(entries[24]["kind"], "annual_spt");
    assert_eq!(entries[24]["due_date"], "2027-03-31");

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/reports/schedule/1999").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/reports/spt/not-a-year").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_deadlines_endpoint_window() {
    let state = test_state().await;
    let app = test::init_service(App::new().configure(|cfg| state.register(cfg))).await;

    let reminders: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get()
            .uri("/reports/deadlines?days_ahead=40")
            .to_request(),
    )
    .await;
    let reminders = reminders.as_array().unwrap();
    // every 40-day window holds at least one monthly PPN and PPh 21 date
    assert!(reminders.len() >= 2);
    for reminder in reminders {
        let days = reminder["days_until"].as_i64().unwrap();
        assert!((0..=40).contains(&days));
    }

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/reports/deadlines?days_ahead=400")
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_reminder_days_setting_sets_priority() {
    let state = test_state().await;
    let today = NaiveDate::from_ymd_opt(2026, 3, 10).unwrap();

    let reminders = state.reports.upcoming_deadlines_from(today, 25).await.unwrap();
    let high: Vec<ObligationKind> = reminders
        .iter()
        .filter(|r| r.priority == Priority::High)
        .map(|r| r.kind)
        .collect();
    assert_eq!(high, vec![ObligationKind::Ppn]);

    state
        .settings
        .update(UpdateSettingsRequest {
            reminder_days: Some(30),
            ..Default::default()
        })
        .await
        .unwrap();

    let reminders = state.reports.upcoming_deadlines_from(today, 25).await.unwrap();
    assert!(reminders.iter().all(|r| r.priority == Priority::High));
    assert_eq!(reminders.len(), 3);
}

#[actix_web::test]
async fn test_notifications_combine_deadlines_and_summaries() {
    let state = test_state().await;
    seed_ledger(&state).await;
    let today = NaiveDate::from_ymd_opt(2026, 3, 10).unwrap();

    let notifications = state.reports.notifications_from(today, 25).await.unwrap();
    assert_eq!(notifications.deadlines.len(), 3);
    assert_eq!(notifications.deadlines[0].priority, Priority::High);

    let summaries: Vec<(SummaryKind, Decimal)> = notifications
        .summaries
        .iter()
        .map(|n| (n.kind, n.amount))
        .collect();
    assert_eq!(
        summaries,
        vec![
            (SummaryKind::Pph21Withheld, dec!(3000000)),
            (SummaryKind::PpnPayable, dec!(13200000)),
        ]
    );

    let app = test::init_service(App::new().configure(|cfg| state.register(cfg))).await;
    let body: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get()
            .uri("/reports/notifications?days_ahead=40")
            .to_request(),
    )
    .await;
    assert!(!body["deadlines"].as_array().unwrap().is_empty());
    let summaries = body["summaries"].as_array().unwrap();
    assert_eq!(summaries.len(), 2);
    assert!(summaries.iter().all(|n| n["priority"] == "info"));

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/reports/notifications?days_ahead=400")
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_system_summary_endpoint() {
    let state = test_state().await;
    let app = test::init_service(App::new().configure(|cfg| state.register(cfg))).await;

    let empty: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get().uri("/reports/system-summary").to_request(),
    )
    .await;
    assert_eq!(empty["counts"]["employees"], 0);
    assert_eq!(empty["counts"]["transactions"], 0);

    seed_ledger(&state).await;
    state
        .settings
        .update(UpdateSettingsRequest {
            ppn_rate: Some(dec!(0.12)),
            ..Default::default()
        })
        .await
        .unwrap();

    let summary: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get().uri("/reports/system-summary").to_request(),
    )
    .await;
    assert_eq!(summary["counts"]["employees"], 2);
    assert_eq!(summary["counts"]["transactions"], 3);
    assert_eq!(summary["counts"]["tax_records"], 0);
    assert_eq!(summary["company_name"], "Perusahaan Saya");
    assert_eq!(decimal(&summary["ppn_rate"]), dec!(0.12));
    assert_eq!(decimal(&summary["corporate_tax_rate"]), dec!(0.25));
}
