mod common;

use cashq_core::repositories::transaction_repository::TransactionRepository;
use cashq_core::repositories::wallet_repository::WalletRepository;
use cashq_core::services::LedgerService;
use cashq_primitives::error::CoreError;
use cashq_primitives::models::dtos::ledger_dto::LedgerRefs;
use cashq_primitives::models::entities::enum_types::CurrencyCode;
use uuid::Uuid;

fn refs() -> LedgerRefs {
    LedgerRefs::with_reference(format!("test-{}", Uuid::new_v4()))
}

#[test]
fn ensure_wallet_is_lazy_and_idempotent() {
    let Some(state) = common::try_test_state() else {
        eprintln!("TEST_DATABASE_URL not set; skipping");
        return;
    };
    let mut conn = common::conn(&state);
    let vendor_id = Uuid::new_v4();

    let first = LedgerService::ensure_wallet(&mut conn, vendor_id, CurrencyCode::INR).unwrap();
    let second = LedgerService::ensure_wallet(&mut conn, vendor_id, CurrencyCode::INR).unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(first.balance, 0);
    assert_eq!(first.locked_balance, 0);
}

#[test]
fn fee_lock_spend_walkthrough() {
    let Some(state) = common::try_test_state() else {
        eprintln!("TEST_DATABASE_URL not set; skipping");
        return;
    };
    let vendor_id = common::vendor_with_balance(&state, 100_000);
    let mut conn = common::conn(&state);

    // chargeFee(50) -> balance 950
    let m = LedgerService::charge_fee(&mut conn, vendor_id, 5_000, refs()).unwrap();
    assert_eq!(m.wallet.balance, 95_000);

    // lock(500) -> locked 500, available 450
    let m = LedgerService::lock(&mut conn, vendor_id, 50_000, refs()).unwrap();
    assert_eq!(m.wallet.locked_balance, 50_000);
    assert_eq!(m.wallet.available_balance(), 45_000);

    // spendLocked(500) on redemption -> balance 450, locked 0
    let m = LedgerService::spend_locked(&mut conn, vendor_id, 50_000, refs()).unwrap();
    assert_eq!(m.wallet.balance, 45_000);
    assert_eq!(m.wallet.locked_balance, 0);
}

#[test]
fn cancel_before_spend_restores_available() {
    let Some(state) = common::try_test_state() else {
        eprintln!("TEST_DATABASE_URL not set; skipping");
        return;
    };
    let vendor_id = common::vendor_with_balance(&state, 100_000);
    let mut conn = common::conn(&state);

    LedgerService::charge_fee(&mut conn, vendor_id, 5_000, refs()).unwrap();
    let before = WalletRepository::find_by_vendor(&mut conn, vendor_id)
        .unwrap()
        .unwrap();

    LedgerService::lock(&mut conn, vendor_id, 50_000, refs()).unwrap();
    let m = LedgerService::unlock_refund(&mut conn, vendor_id, 50_000, refs()).unwrap();

    // balance unchanged, available restored
    assert_eq!(m.wallet.balance, before.balance);
    assert_eq!(m.wallet.locked_balance, 0);
    assert_eq!(m.wallet.available_balance(), before.available_balance());
}

#[test]
fn lock_beyond_available_is_rejected_without_effect() {
    let Some(state) = common::try_test_state() else {
        eprintln!("TEST_DATABASE_URL not set; skipping");
        return;
    };
    let vendor_id = common::vendor_with_balance(&state, 10_000);
    let mut conn = common::conn(&state);

    LedgerService::lock(&mut conn, vendor_id, 8_000, refs()).unwrap();

    let err = LedgerService::lock(&mut conn, vendor_id, 3_000, refs()).unwrap_err();
    assert!(matches!(
        err,
        CoreError::InsufficientAvailableBalance {
            requested: 3_000,
            available: 2_000
        }
    ));

    let wallet = WalletRepository::find_by_vendor(&mut conn, vendor_id)
        .unwrap()
        .unwrap();
    assert_eq!(wallet.balance, 10_000);
    assert_eq!(wallet.locked_balance, 8_000);
}

#[test]
fn charge_fee_never_touches_locked_funds() {
    let Some(state) = common::try_test_state() else {
        eprintln!("TEST_DATABASE_URL not set; skipping");
        return;
    };
    let vendor_id = common::vendor_with_balance(&state, 10_000);
    let mut conn = common::conn(&state);

    LedgerService::lock(&mut conn, vendor_id, 8_000, refs()).unwrap();

    let err = LedgerService::charge_fee(&mut conn, vendor_id, 2_500, refs()).unwrap_err();
    assert!(matches!(
        err,
        CoreError::InsufficientAvailableBalance { .. }
    ));

    // Exactly the available part can be charged.
    let m = LedgerService::charge_fee(&mut conn, vendor_id, 2_000, refs()).unwrap();
    assert_eq!(m.wallet.balance, 8_000);
    assert_eq!(m.wallet.locked_balance, 8_000);
}

#[test]
fn spend_beyond_locked_is_rejected() {
    let Some(state) = common::try_test_state() else {
        eprintln!("TEST_DATABASE_URL not set; skipping");
        return;
    };
    let vendor_id = common::vendor_with_balance(&state, 10_000);
    let mut conn = common::conn(&state);

    LedgerService::lock(&mut conn, vendor_id, 4_000, refs()).unwrap();

    let err = LedgerService::spend_locked(&mut conn, vendor_id, 4_001, refs()).unwrap_err();
    assert!(matches!(
        err,
        CoreError::InsufficientLockedBalance {
            requested: 4_001,
            locked: 4_000
        }
    ));
}

#[test]
fn nonpositive_amounts_are_rejected_everywhere() {
    let Some(state) = common::try_test_state() else {
        eprintln!("TEST_DATABASE_URL not set; skipping");
        return;
    };
    let vendor_id = common::vendor_with_balance(&state, 10_000);
    let mut conn = common::conn(&state);

    assert!(matches!(
        LedgerService::credit(&mut conn, vendor_id, 0, CurrencyCode::INR, refs()),
        Err(CoreError::Validation(_))
    ));
    assert!(matches!(
        LedgerService::lock(&mut conn, vendor_id, -5, refs()),
        Err(CoreError::Validation(_))
    ));
}

#[test]
fn balance_equals_signed_sum_of_settled_entries() {
    let Some(state) = common::try_test_state() else {
        eprintln!("TEST_DATABASE_URL not set; skipping");
        return;
    };
    let vendor_id = common::vendor_with_balance(&state, 100_000);
    let mut conn = common::conn(&state);

    LedgerService::charge_fee(&mut conn, vendor_id, 7_500, refs()).unwrap();
    LedgerService::lock(&mut conn, vendor_id, 20_000, refs()).unwrap();
    LedgerService::spend_locked(&mut conn, vendor_id, 12_000, refs()).unwrap();
    LedgerService::unlock_refund(&mut conn, vendor_id, 8_000, refs()).unwrap();
    let wallet = LedgerService::credit(&mut conn, vendor_id, 3_000, CurrencyCode::INR, refs())
        .unwrap()
        .wallet;

    let entries = TransactionRepository::find_all_by_wallet(&mut conn, wallet.id).unwrap();
    let signed_sum: i64 = entries.iter().map(|e| e.balance_delta()).sum();

    assert_eq!(wallet.balance, signed_sum);
    assert!(wallet.holds_invariant());
}

#[test]
fn standalone_credit_creates_wallet_in_requested_currency() {
    let Some(state) = common::try_test_state() else {
        eprintln!("TEST_DATABASE_URL not set; skipping");
        return;
    };
    let mut conn = common::conn(&state);
    let vendor_id = Uuid::new_v4();

    let m = LedgerService::credit(&mut conn, vendor_id, 1_000, CurrencyCode::USD, refs()).unwrap();
    assert_eq!(m.wallet.currency, CurrencyCode::USD);
    assert_eq!(m.wallet.balance, 1_000);
}

#[test]
fn operations_on_missing_wallet_fail_typed() {
    let Some(state) = common::try_test_state() else {
        eprintln!("TEST_DATABASE_URL not set; skipping");
        return;
    };
    let mut conn = common::conn(&state);
    let vendor_id = Uuid::new_v4();

    let err = LedgerService::lock(&mut conn, vendor_id, 1_000, refs()).unwrap_err();
    assert!(matches!(err, CoreError::WalletNotFound(_)));
}
