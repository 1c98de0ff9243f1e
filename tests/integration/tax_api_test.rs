//! End-to-end API tests: employees and PPh 21, transactions and PPN,
//! tax records, settings, backups and the middleware around them.

mod test_support;

use actix_web::{http::StatusCode, test, App};
use pajak::middleware::{RequestId, REQUEST_ID_HEADER};
use pajak::modules::AppState;
use rust_decimal_macros::dec;
use serde_json::{json, Value};
use test_support::{decimal, memory_pool, test_config, test_state};

#[actix_web::test]
async fn test_health_and_readiness() {
    let state = test_state().await;
    let app = test::init_service(
        App::new()
            .wrap(RequestId)
            .configure(|cfg| state.register(cfg)),
    )
    .await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers().contains_key(REQUEST_ID_HEADER));
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "pajak");

    let resp = test::call_service(&app, test::TestRequest::get().uri("/ready").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["ready"], true);
    assert_eq!(body["checks"]["schema"], true);
}

#[actix_web::test]
async fn test_employee_pph21_flow() {
    let state = test_state().await;
    let app = test::init_service(App::new().configure(|cfg| state.register(cfg))).await;

    let req = test::TestRequest::post()
        .uri("/employees")
        .set_json(json!({
            "name": "Andi Pratama",
            "status": "tetap",
            "monthly_salary": "10000000",
            "npwp": "12.345.678.9-012.345"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let employee: Value = test::read_body_json(resp).await;
    let id = employee["id"].as_i64().unwrap();
    assert_eq!(employee["status"], "permanent");

    // preview only
    let req = test::TestRequest::post()
        .uri(&format!("/employees/{}/pph21", id))
        .set_json(json!({}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let calc: Value = test::read_body_json(resp).await;
    assert_eq!(decimal(&calc["result"]["taxable_income"]), dec!(60000000));
    assert_eq!(decimal(&calc["result"]["tax_amount"]), dec!(3000000));
    assert_eq!(decimal(&calc["result"]["discount"]), dec!(150000));
    assert_eq!(decimal(&calc["result"]["final_tax"]), dec!(2850000));
    assert_eq!(calc["result"]["method"], "progressive");
    assert!(calc["record"].is_null());

    // married with two dependents, saved for March
    let req = test::TestRequest::post()
        .uri(&format!("/employees/{}/pph21", id))
        .set_json(json!({
            "married": true,
            "dependents": 2,
            "apply_npwp_discount": false,
            "save": true,
            "period": "2026-03"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let calc: Value = test::read_body_json(resp).await;
    // 114M net less 67.5M PTKP
    assert_eq!(decimal(&calc["result"]["taxable_income"]), dec!(46500000));
    assert_eq!(decimal(&calc["result"]["final_tax"]), dec!(2325000));
    assert_eq!(calc["record"]["period"], "2026-03");
    assert_eq!(calc["record"]["tax_kind"], "pph21");

    let req = test::TestRequest::get()
        .uri(&format!("/employees/{}/tax-records", id))
        .to_request();
    let records: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(records.as_array().unwrap().len(), 1);

    // joint filing without married is rejected
    let req = test::TestRequest::post()
        .uri(&format!("/employees/{}/pph21", id))
        .set_json(json!({ "joint_filing": true }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::post()
        .uri("/employees/999/pph21")
        .set_json(json!({}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::delete()
        .uri(&format!("/employees/{}", id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let req = test::TestRequest::get()
        .uri(&format!("/employees/{}", id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_employee_validation_errors() {
    let state = test_state().await;
    let app = test::init_service(App::new().configure(|cfg| state.register(cfg))).await;

    let req = test::TestRequest::post()
        .uri("/employees")
        .set_json(json!({ "name": "  ", "monthly_salary": "1000000" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["code"], 400);

    let req = test::TestRequest::post()
        .uri("/employees")
        .set_json(json!({ "name": "Rugi", "monthly_salary": "-5" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // amounts past the cap are refused before any arithmetic runs
    let req = test::TestRequest::post()
        .uri("/employees")
        .set_json(json!({ "name": "Sultan", "monthly_salary": "79228162514264337593543950335" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .contains("monthly_salary cannot exceed"));

    // malformed body goes through the JSON extractor config
    let req = test::TestRequest::post()
        .uri("/employees")
        .insert_header(("content-type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .contains("Invalid JSON body"));
}

#[actix_web::test]
async fn test_transactions_and_ppn_summary() {
    let state = test_state().await;
    let app = test::init_service(App::new().configure(|cfg| state.register(cfg))).await;

    let sale = json!({
        "kind": "penjualan",
        "description": "Jasa konsultasi",
        "amount": "10000000",
        "transaction_date": "2026-03-05"
    });
    let resp = test::call_service(
        &app,
        test::TestRequest::post().uri("/transactions").set_json(sale).to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let sale: Value = test::read_body_json(resp).await;
    assert_eq!(sale["kind"], "sale");
    assert_eq!(decimal(&sale["ppn_amount"]), dec!(1100000));

    let purchase = json!({
        "kind": "purchase",
        "description": "Laptop kantor",
        "amount": "5550000",
        "amount_includes_vat": true,
        "transaction_date": "2026-03-12",
        "invoice_number": " 010.000-26.00000123 "
    });
    let purchase: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::post().uri("/transactions").set_json(purchase).to_request(),
    )
    .await;
    assert_eq!(decimal(&purchase["amount"]), dec!(5000000));
    assert_eq!(decimal(&purchase["ppn_amount"]), dec!(550000));
    assert_eq!(purchase["invoice_number"], "010.000-26.00000123");

    let uninvoiced = json!({
        "kind": "purchase",
        "description": "ATK",
        "amount": "100000",
        "transaction_date": "2026-04-01"
    });
    let uninvoiced: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::post().uri("/transactions").set_json(uninvoiced).to_request(),
    )
    .await;

    let listed: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get()
            .uri("/transactions?period=2026-03")
            .to_request(),
    )
    .await;
    assert_eq!(listed.as_array().unwrap().len(), 2);

    let invoiced: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get()
            .uri("/transactions?invoiced=true")
            .to_request(),
    )
    .await;
    let invoiced = invoiced.as_array().unwrap();
    assert_eq!(invoiced.len(), 1);
    assert_eq!(invoiced[0]["invoice_number"], "010.000-26.00000123");

    let without_invoice: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get()
            .uri("/transactions?period=2026-03&invoiced=false")
            .to_request(),
    )
    .await;
    let without_invoice = without_invoice.as_array().unwrap();
    assert_eq!(without_invoice.len(), 1);
    assert_eq!(without_invoice[0]["kind"], "sale");

    let summary: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get()
            .uri("/taxes/ppn/summary?period=2026-03")
            .to_request(),
    )
    .await;
    assert_eq!(summary["period"], "2026-03");
    assert_eq!(summary["transaction_count"], 2);
    assert_eq!(decimal(&summary["output_tax"]), dec!(1100000));
    assert_eq!(decimal(&summary["input_tax"]), dec!(550000));
    assert_eq!(decimal(&summary["net_payable"]), dec!(550000));

    let eligible: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get()
            .uri(&format!(
                "/transactions/{}/credit-eligibility",
                purchase["id"].as_i64().unwrap()
            ))
            .to_request(),
    )
    .await;
    assert_eq!(eligible["eligible"], true);

    let not_eligible: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get()
            .uri(&format!(
                "/transactions/{}/credit-eligibility",
                uninvoiced["id"].as_i64().unwrap()
            ))
            .to_request(),
    )
    .await;
    assert_eq!(not_eligible["eligible"], false);

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/transactions?period=2026-13")
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/transactions")
            .set_json(json!({
                "kind": "sale",
                "description": "Tanggal salah",
                "amount": "1000",
                "transaction_date": "2026-02-30"
            }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/transactions")
            .set_json(json!({
                "kind": "sale",
                "description": "Terlalu besar",
                "amount": "79228162514264337593543950335",
                "transaction_date": "2026-03-20"
            }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_ppn_calculators_follow_settings() {
    let state = test_state().await;
    let app = test::init_service(App::new().configure(|cfg| state.register(cfg))).await;

    let breakdown: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::post()
            .uri("/taxes/ppn/from-base")
            .set_json(json!({ "amount": "1000000" }))
            .to_request(),
    )
    .await;
    assert_eq!(decimal(&breakdown["ppn_amount"]), dec!(110000));
    assert_eq!(decimal(&breakdown["total_amount"]), dec!(1110000));

    let settings: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::put()
            .uri("/settings")
            .set_json(json!({ "ppn_rate": "0.12", "company_name": "PT Sinar Terang" }))
            .to_request(),
    )
    .await;
    assert_eq!(decimal(&settings["ppn_rate"]), dec!(0.12));
    assert_eq!(settings["company_name"], "PT Sinar Terang");

    let breakdown: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::post()
            .uri("/taxes/ppn/from-total")
            .set_json(json!({ "amount": "1120000" }))
            .to_request(),
    )
    .await;
    assert_eq!(decimal(&breakdown["base_amount"]), dec!(1000000));
    assert_eq!(decimal(&breakdown["ppn_amount"]), dec!(120000));

    let resp = test::call_service(
        &app,
        test::TestRequest::put()
            .uri("/settings")
            .set_json(json!({ "ppn_rate": "1.5" }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/taxes/ppn/from-base")
            .set_json(json!({ "amount": "-1" }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let reset: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::post().uri("/settings/reset").to_request(),
    )
    .await;
    assert_eq!(decimal(&reset["ppn_rate"]), dec!(0.11));
    assert_eq!(reset["company_name"], "Perusahaan Saya");
}

#[actix_web::test]
async fn test_tax_record_crud() {
    let state = test_state().await;
    let app = test::init_service(App::new().configure(|cfg| state.register(cfg))).await;

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/taxes/records")
            .set_json(json!({
                "period": "2026-02",
                "tax_amount": "1650000",
                "tax_kind": "ppn",
                "description": "PPN Februari"
            }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let record: Value = test::read_body_json(resp).await;
    let id = record["id"].as_i64().unwrap();

    let updated: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::put()
            .uri(&format!("/taxes/records/{}", id))
            .set_json(json!({
                "period": "2026-02",
                "tax_amount": "1700000",
                "tax_kind": "ppn",
                "description": "PPN Februari (revisi)"
            }))
            .to_request(),
    )
    .await;
    assert_eq!(decimal(&updated["tax_amount"]), dec!(1700000));

    let listed: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get()
            .uri("/taxes/records?period=2026-02")
            .to_request(),
    )
    .await;
    assert_eq!(listed.as_array().unwrap().len(), 1);

    // unknown employee reference
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/taxes/records")
            .set_json(json!({
                "employee_id": 42,
                "period": "2026",
                "tax_amount": "1",
                "tax_kind": "pph21"
            }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = test::call_service(
        &app,
        test::TestRequest::delete()
            .uri(&format!("/taxes/records/{}", id))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/taxes/records/{}", id))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/taxes/records/abc").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_backup_endpoints() {
    let dir = tempfile::tempdir().unwrap();
    let pool = memory_pool().await;
    let state = AppState::with_backup_dir(
        pool,
        &test_config(dir.path().to_path_buf()),
        dir.path().to_path_buf(),
    );
    let app = test::init_service(App::new().configure(|cfg| state.register(cfg))).await;

    let listed: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get().uri("/backups").to_request(),
    )
    .await;
    assert!(listed.as_array().unwrap().is_empty());

    let resp = test::call_service(
        &app,
        test::TestRequest::post().uri("/backups").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let backup: Value = test::read_body_json(resp).await;
    let name = backup["name"].as_str().unwrap().to_string();
    assert!(dir.path().join(&name).exists());

    let resp = test::call_service(
        &app,
        test::TestRequest::delete()
            .uri("/backups/..%2Fpajak.db")
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = test::call_service(
        &app,
        test::TestRequest::delete()
            .uri(&format!("/backups/{}", name))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert!(!dir.path().join(&name).exists());
}
