use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::sync::Arc;

use kantor_core::accounts::AccountRepositoryTrait;
use kantor_core::ledger::{
    ConversionPlan, ConversionRequest, DepositRequest, HistoryAction, LedgerError,
    LedgerRepositoryTrait,
};
use kantor_core::constants::MAX_MONEY;
use kantor_core::Error;

use super::LedgerRepository;
use crate::test_utils::{setup, TestDb};

async fn funded_user(db: &TestDb) -> String {
    let user = db.create_user("alice").await;
    db.open_account(&user.id, "PLN").await;
    db.open_account(&user.id, "USD").await;
    db.fund(&user.id, "PLN", dec!(1000)).await;
    user.id
}

fn plan(user_id: &str, from: &str, to: &str, amount: Decimal, rate: Decimal) -> ConversionPlan {
    ConversionPlan::new(
        &ConversionRequest {
            user_id: user_id.to_string(),
            from_currency: from.to_string(),
            to_currency: to.to_string(),
            amount,
        },
        rate,
    )
    .unwrap()
}

fn deposit(user_id: &str, currency: &str, amount: Decimal) -> DepositRequest {
    DepositRequest {
        user_id: user_id.to_string(),
        currency_code: currency.to_string(),
        amount,
    }
}

fn shared_ledger(db: &TestDb) -> Arc<LedgerRepository> {
    Arc::new(LedgerRepository::new(
        Arc::clone(&db.pool),
        db.writer.clone(),
    ))
}

#[tokio::test]
async fn test_deposit_credits_account_and_records_history() {
    let db = setup().await;
    let user = db.create_user("alice").await;
    let account = db.open_account(&user.id, "PLN").await;

    let record = db
        .ledger
        .apply_deposit(DepositRequest {
            user_id: user.id.clone(),
            currency_code: "PLN".to_string(),
            amount: dec!(250.5),
        })
        .await
        .unwrap();

    assert_eq!(record.account_id, account.id);
    assert_eq!(record.currency_code, "PLN");
    assert_eq!(record.amount, dec!(250.50));
    assert_eq!(db.balance(&user.id, "PLN"), dec!(250.50));

    let deposits = db.ledger.list_deposits(&user.id, None).unwrap();
    assert_eq!(deposits, vec![record]);
}

#[tokio::test]
async fn test_deposit_into_missing_account_fails() {
    let db = setup().await;
    let user = db.create_user("alice").await;

    let result = db
        .ledger
        .apply_deposit(DepositRequest {
            user_id: user.id.clone(),
            currency_code: "EUR".to_string(),
            amount: dec!(10),
        })
        .await;
    assert!(matches!(
        result,
        Err(Error::Ledger(LedgerError::NotFound(msg))) if msg == "EUR account not found."
    ));
}

#[tokio::test]
async fn test_conversion_moves_balances_and_writes_history() {
    let db = setup().await;
    let user_id = funded_user(&db).await;

    let transaction = db
        .ledger
        .apply_conversion(plan(&user_id, "PLN", "USD", dec!(100), dec!(4.0)))
        .await
        .unwrap();

    assert_eq!(transaction.from_currency, "PLN");
    assert_eq!(transaction.to_currency, "USD");
    assert_eq!(transaction.amount, dec!(100.00));
    assert_eq!(db.balance(&user_id, "PLN"), dec!(600.00));
    assert_eq!(db.balance(&user_id, "USD"), dec!(100.00));

    assert_eq!(db.ledger.list_transactions(&user_id).unwrap(), vec![transaction]);

    let history = db.ledger.list_account_history(&user_id).unwrap();
    assert_eq!(history.len(), 2);
    let expense = history
        .iter()
        .find(|h| h.action == HistoryAction::Expense)
        .unwrap();
    assert_eq!(expense.currency, "PLN");
    assert_eq!(expense.amount, dec!(400.00));
    let income = history
        .iter()
        .find(|h| h.action == HistoryAction::Income)
        .unwrap();
    assert_eq!(income.currency, "USD");
    assert_eq!(income.amount, dec!(100.00));
}

#[tokio::test]
async fn test_insufficient_balance_writes_nothing() {
    let db = setup().await;
    let user_id = funded_user(&db).await;

    let result = db
        .ledger
        .apply_conversion(plan(&user_id, "PLN", "USD", dec!(300), dec!(4.0)))
        .await;

    assert!(matches!(
        result,
        Err(Error::Ledger(LedgerError::InsufficientBalance(_)))
    ));
    assert_eq!(db.balance(&user_id, "PLN"), dec!(1000.00));
    assert_eq!(db.balance(&user_id, "USD"), dec!(0.00));
    assert!(db.ledger.list_transactions(&user_id).unwrap().is_empty());
    assert!(db.ledger.list_account_history(&user_id).unwrap().is_empty());
}

#[tokio::test]
async fn test_conversion_requires_destination_account() {
    let db = setup().await;
    let user_id = funded_user(&db).await;

    let result = db
        .ledger
        .apply_conversion(plan(&user_id, "PLN", "EUR", dec!(10), dec!(4.5)))
        .await;

    assert!(matches!(result, Err(Error::Ledger(LedgerError::NotFound(_)))));
    assert_eq!(db.balance(&user_id, "PLN"), dec!(1000.00));
}

#[tokio::test]
async fn test_list_deposits_filters_by_currency() {
    let db = setup().await;
    let user_id = funded_user(&db).await;
    db.fund(&user_id, "USD", dec!(20)).await;
    db.fund(&user_id, "PLN", dec!(5)).await;

    let all = db.ledger.list_deposits(&user_id, None).unwrap();
    assert_eq!(all.len(), 3);

    let usd = db.ledger.list_deposits(&user_id, Some("USD")).unwrap();
    assert_eq!(usd.len(), 1);
    assert_eq!(usd[0].amount, dec!(20.00));

    let pln = db.ledger.list_deposits(&user_id, Some("PLN")).unwrap();
    assert_eq!(pln.len(), 2);
    assert!(pln[0].created_at >= pln[1].created_at);
}

#[tokio::test]
async fn test_delete_account_rules() {
    let db = setup().await;
    let user_id = funded_user(&db).await;
    let eur = db.open_account(&user_id, "EUR").await;
    db.fund(&user_id, "USD", dec!(1)).await;

    let home = db
        .accounts
        .find_by_user_and_currency(&user_id, "PLN")
        .unwrap()
        .unwrap();
    assert!(matches!(
        db.ledger.delete_account(&home.id).await,
        Err(Error::Ledger(LedgerError::Forbidden(_)))
    ));

    let usd = db
        .accounts
        .find_by_user_and_currency(&user_id, "USD")
        .unwrap()
        .unwrap();
    assert!(matches!(
        db.ledger.delete_account(&usd.id).await,
        Err(Error::Ledger(LedgerError::NonZeroBalance(_)))
    ));

    db.ledger.delete_account(&eur.id).await.unwrap();
    assert!(db
        .accounts
        .find_by_user_and_currency(&user_id, "EUR")
        .unwrap()
        .is_none());

    assert!(matches!(
        db.ledger.delete_account(&eur.id).await,
        Err(Error::Ledger(LedgerError::NotFound(_)))
    ));
}

#[tokio::test]
async fn test_deposit_over_limit_is_rejected() {
    let db = setup().await;
    let user = db.create_user("alice").await;
    db.open_account(&user.id, "PLN").await;

    let result = db
        .ledger
        .apply_deposit(deposit(&user.id, "PLN", dec!(50000000000000000000000000000)))
        .await;
    assert!(matches!(
        result,
        Err(Error::Ledger(LedgerError::InvalidAmount(_)))
    ));

    db.fund(&user.id, "PLN", MAX_MONEY).await;
    let result = db
        .ledger
        .apply_deposit(deposit(&user.id, "PLN", dec!(0.01)))
        .await;
    assert!(matches!(
        result,
        Err(Error::Ledger(LedgerError::InvalidAmount(msg)))
            if msg == "Balance of PLN account would exceed 99999999.99."
    ));
    assert_eq!(db.balance(&user.id, "PLN"), MAX_MONEY);
    assert_eq!(db.ledger.list_deposits(&user.id, None).unwrap().len(), 1);

    // Later writes still go through.
    db.open_account(&user.id, "USD").await;
    db.fund(&user.id, "USD", dec!(10)).await;
    assert_eq!(db.balance(&user.id, "USD"), dec!(10.00));
}

#[tokio::test]
async fn test_conversion_over_destination_limit_rolls_back() {
    let db = setup().await;
    let user = db.create_user("alice").await;
    db.open_account(&user.id, "PLN").await;
    db.open_account(&user.id, "USD").await;
    db.fund(&user.id, "PLN", MAX_MONEY).await;
    db.fund(&user.id, "USD", dec!(10)).await;

    let result = db
        .ledger
        .apply_conversion(plan(&user.id, "USD", "PLN", dec!(10), dec!(4.0)))
        .await;

    assert!(matches!(
        result,
        Err(Error::Ledger(LedgerError::InvalidAmount(_)))
    ));
    assert_eq!(db.balance(&user.id, "USD"), dec!(10.00));
    assert_eq!(db.balance(&user.id, "PLN"), MAX_MONEY);
    assert!(db.ledger.list_transactions(&user.id).unwrap().is_empty());
    assert!(db.ledger.list_account_history(&user.id).unwrap().is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_writes_do_not_lose_updates() {
    let db = setup().await;
    let user_id = funded_user(&db).await;
    let ledger = shared_ledger(&db);

    let mut handles = Vec::new();
    for _ in 0..10 {
        let ledger = Arc::clone(&ledger);
        let user_id = user_id.clone();
        handles.push(tokio::spawn(async move {
            ledger
                .apply_conversion(plan(&user_id, "PLN", "USD", dec!(10), dec!(4.0)))
                .await
                .map(|_| ())
        }));
    }
    for _ in 0..20 {
        let ledger = Arc::clone(&ledger);
        let user_id = user_id.clone();
        handles.push(tokio::spawn(async move {
            ledger
                .apply_deposit(deposit(&user_id, "USD", dec!(5)))
                .await
                .map(|_| ())
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    // 1000 - 10 * 40 and 10 * 10 + 20 * 5
    assert_eq!(db.balance(&user_id, "PLN"), dec!(600.00));
    assert_eq!(db.balance(&user_id, "USD"), dec!(200.00));
    assert_eq!(db.ledger.list_transactions(&user_id).unwrap().len(), 10);
    assert_eq!(db.ledger.list_account_history(&user_id).unwrap().len(), 20);
    assert_eq!(
        db.ledger.list_deposits(&user_id, Some("USD")).unwrap().len(),
        20
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_conversions_never_overdraw() {
    let db = setup().await;
    let user_id = funded_user(&db).await;
    let ledger = shared_ledger(&db);

    let handles: Vec<_> = (0..30)
        .map(|_| {
            let ledger = Arc::clone(&ledger);
            let user_id = user_id.clone();
            tokio::spawn(async move {
                ledger
                    .apply_conversion(plan(&user_id, "PLN", "USD", dec!(10), dec!(4.0)))
                    .await
            })
        })
        .collect();

    let mut succeeded = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => succeeded += 1,
            Err(err) => assert!(matches!(
                err,
                Error::Ledger(LedgerError::InsufficientBalance(_))
            )),
        }
    }

    // Each conversion costs 40 PLN out of 1000.
    assert_eq!(succeeded, 25);
    assert_eq!(db.balance(&user_id, "PLN"), dec!(0.00));
    assert_eq!(db.balance(&user_id, "USD"), dec!(250.00));
    assert_eq!(db.ledger.list_transactions(&user_id).unwrap().len(), 25);
    assert_eq!(db.ledger.list_account_history(&user_id).unwrap().len(), 50);
}
