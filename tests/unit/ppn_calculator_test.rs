// PPN engine: forward and reverse VAT, period summaries and input tax
// crediting.

use pajak::core::AppError;
use pajak::taxes::PpnCalculator;
use pajak::transactions::{Transaction, TransactionKind};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn transaction(
    kind: TransactionKind,
    amount: Decimal,
    ppn_amount: Decimal,
    date: &str,
    invoice_number: Option<&str>,
) -> Transaction {
    Transaction {
        id: None,
        kind,
        description: format!("{} on {}", kind, date),
        amount,
        ppn_amount,
        transaction_date: date.to_string(),
        invoice_number: invoice_number.map(str::to_string),
        created_at: None,
    }
}

fn ledger() -> Vec<Transaction> {
    vec![
        transaction(
            TransactionKind::Sale,
            dec!(10000000),
            dec!(1100000),
            "2026-03-02",
            Some("010.000-26.00000001"),
        ),
        transaction(
            TransactionKind::Purchase,
            dec!(4000000),
            dec!(440000),
            "2026-03-10",
            Some("010.000-26.00000002"),
        ),
        transaction(
            TransactionKind::Purchase,
            dec!(1000000),
            dec!(110000),
            "2026-03-21",
            None,
        ),
        transaction(
            TransactionKind::Sale,
            dec!(2000000),
            dec!(220000),
            "2026-04-01",
            None,
        ),
    ]
}

#[test]
fn test_tax_from_base_at_default_rate() {
    let calculator = PpnCalculator::default();
    let breakdown = calculator.tax_from_base(dec!(1000000)).unwrap();

    assert_eq!(breakdown.ppn_rate, dec!(0.11));
    assert_eq!(breakdown.ppn_amount, dec!(110000));
    assert_eq!(breakdown.total_amount, dec!(1110000));
}

#[test]
fn test_base_from_total_reverses_inclusive_price() {
    let calculator = PpnCalculator::default();
    let breakdown = calculator.base_from_total(dec!(1110000)).unwrap();

    assert_eq!(breakdown.base_amount, dec!(1000000));
    assert_eq!(breakdown.ppn_amount, dec!(110000));
}

#[test]
fn test_custom_rate_and_invalid_rates() {
    let calculator = PpnCalculator::new(dec!(0.12)).unwrap();
    assert_eq!(calculator.tax_from_base(dec!(500000)).unwrap().ppn_amount, dec!(60000));

    assert!(matches!(PpnCalculator::new(dec!(-0.01)), Err(AppError::Validation(_))));
    assert!(matches!(PpnCalculator::new(dec!(1.5)), Err(AppError::Validation(_))));
}

#[test]
fn test_negative_amounts_rejected() {
    let calculator = PpnCalculator::default();
    assert!(calculator.tax_from_base(dec!(-1)).is_err());
    assert!(calculator.base_from_total(dec!(-1)).is_err());
}

#[test]
fn test_zero_amount_is_zero_tax() {
    let calculator = PpnCalculator::default();
    let breakdown = calculator.tax_from_base(Decimal::ZERO).unwrap();
    assert_eq!(breakdown.ppn_amount, Decimal::ZERO);
    assert_eq!(breakdown.total_amount, Decimal::ZERO);
}

#[test]
fn test_period_summary_for_month() {
    let calculator = PpnCalculator::default();
    let summary = calculator.period_summary(&ledger(), Some("2026-03"));

    assert_eq!(summary.period.as_deref(), Some("2026-03"));
    assert_eq!(summary.transaction_count, 3);
    assert_eq!(summary.total_transactions, dec!(15000000));
    assert_eq!(summary.output_tax, dec!(1100000));
    assert_eq!(summary.input_tax, dec!(550000));
    assert_eq!(summary.creditable_input_tax, dec!(440000));
    assert_eq!(summary.net_payable, dec!(550000));
}

#[test]
fn test_period_summary_without_filter_counts_everything() {
    let calculator = PpnCalculator::default();
    let summary = calculator.period_summary(&ledger(), None);

    assert_eq!(summary.period, None);
    assert_eq!(summary.transaction_count, 4);
    assert_eq!(summary.output_tax, dec!(1320000));
    assert_eq!(summary.net_payable, dec!(770000));
}

#[test]
fn test_purchases_exceeding_sales_give_negative_net() {
    let calculator = PpnCalculator::default();
    let purchases = vec![transaction(
        TransactionKind::Purchase,
        dec!(3000000),
        dec!(330000),
        "2026-05-05",
        Some("010.000-26.00000009"),
    )];

    let summary = calculator.period_summary(&purchases, Some("2026"));
    assert_eq!(summary.net_payable, dec!(-330000));
}

#[test]
fn test_empty_period() {
    let calculator = PpnCalculator::default();
    let summary = calculator.period_summary(&ledger(), Some("2025"));
    assert_eq!(summary.transaction_count, 0);
    assert_eq!(summary.net_payable, Decimal::ZERO);
}

#[test]
fn test_credit_eligibility_rules() {
    let ledger = ledger();
    assert!(!PpnCalculator::credit_eligibility(&ledger[0]), "sales are never credited");
    assert!(PpnCalculator::credit_eligibility(&ledger[1]));
    assert!(!PpnCalculator::credit_eligibility(&ledger[2]), "no tax invoice");

    let zero_vat = transaction(
        TransactionKind::Purchase,
        dec!(100000),
        Decimal::ZERO,
        "2026-03-03",
        Some("010.000-26.00000003"),
    );
    assert!(!PpnCalculator::credit_eligibility(&zero_vat));

    let blank_invoice = transaction(
        TransactionKind::Purchase,
        dec!(100000),
        dec!(11000),
        "2026-03-03",
        Some("   "),
    );
    assert!(!PpnCalculator::credit_eligibility(&blank_invoice));

    let report = PpnCalculator::credit_report(&ledger[1]);
    assert!(report.eligible);
    assert_eq!(report.ppn_amount, dec!(440000));

    let summary = PpnCalculator::default().period_summary(&ledger, None);
    assert_eq!(summary.creditable_input_tax, dec!(440000));
}

proptest! {
    #[test]
    fn test_reverse_split_adds_back_to_total(total in 0u64..10_000_000_000u64, rate_pct in 0u32..=25) {
        let calculator = PpnCalculator::new(Decimal::new(i64::from(rate_pct), 2)).unwrap();
        let total = Decimal::from(total);
        let breakdown = calculator.base_from_total(total).unwrap();

        prop_assert_eq!(breakdown.base_amount + breakdown.ppn_amount, total);
        prop_assert!(breakdown.base_amount <= total);
        prop_assert!(breakdown.ppn_amount >= Decimal::ZERO);
    }

    #[test]
    fn test_forward_then_reverse_recovers_base(base in 0u64..10_000_000_000u64, rate_pct in 0u32..=25) {
        let calculator = PpnCalculator::new(Decimal::new(i64::from(rate_pct), 2)).unwrap();
        let base = Decimal::from(base);
        let forward = calculator.tax_from_base(base).unwrap();
        let reverse = calculator.base_from_total(forward.total_amount).unwrap();

        prop_assert!((reverse.base_amount - base).abs() <= dec!(0.000001));
        prop_assert!((reverse.ppn_amount - forward.ppn_amount).abs() <= dec!(0.000001));
    }

    #[test]
    fn test_sales_only_net_equals_output(amounts in prop::collection::vec(0u64..10_000_000u64, 0..20)) {
        let calculator = PpnCalculator::default();
        let sales: Vec<Transaction> = amounts
            .iter()
            .map(|&amount| {
                let amount = Decimal::from(amount);
                transaction(TransactionKind::Sale, amount, amount * dec!(0.11), "2026-08-08", None)
            })
            .collect();

        let summary = calculator.period_summary(&sales, None);
        prop_assert_eq!(summary.net_payable, summary.output_tax);
        prop_assert_eq!(summary.input_tax, Decimal::ZERO);
    }

    #[test]
    fn test_forward_tax_is_rate_times_base(base in 0u64..100_000_000_000u64) {
        let calculator = PpnCalculator::default();
        let base = Decimal::from(base);
        let breakdown = calculator.tax_from_base(base).unwrap();

        prop_assert_eq!(breakdown.ppn_amount, base * dec!(0.11));
        prop_assert_eq!(breakdown.total_amount, base + breakdown.ppn_amount);
    }

    #[test]
    fn test_creditable_never_exceeds_input(amounts in prop::collection::vec((0u64..10_000_000u64, any::<bool>()), 0..20)) {
        let calculator = PpnCalculator::default();
        let transactions: Vec<Transaction> = amounts
            .iter()
            .map(|&(amount, invoiced)| {
                let amount = Decimal::from(amount);
                transaction(
                    TransactionKind::Purchase,
                    amount,
                    amount * dec!(0.11),
                    "2026-06-01",
                    invoiced.then_some("010.000-26.00000010"),
                )
            })
            .collect();

        let summary = calculator.period_summary(&transactions, Some("2026-06"));
        prop_assert!(summary.creditable_input_tax <= summary.input_tax);
        prop_assert_eq!(summary.net_payable, -summary.input_tax);
    }
}
