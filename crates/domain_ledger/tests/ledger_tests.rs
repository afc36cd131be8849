//! Scenario tests for the ledger core against the in-memory stores

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::sync::Arc;

use domain_customer::{CustomerStore, InMemoryCustomerStore};
use domain_ledger::{
    EntryType, InMemoryLedger, LedgerConfig, LedgerError, LedgerService, LedgerStore,
    NewTransaction, PayRecordRequest, PaymentMethod, RecordStatus, RecordStore, ReverseRequest,
    TransactionFilter, TreasuryStore,
};
use test_utils::{
    day, TestCustomerBuilder, TestRecordBuilder, TestTransactionBuilder, TestTreasuryBuilder,
};

struct Harness {
    customers: Arc<InMemoryCustomerStore>,
    store: Arc<InMemoryLedger>,
    service: LedgerService,
}

fn harness() -> Harness {
    let customers = Arc::new(InMemoryCustomerStore::new());
    let store = Arc::new(InMemoryLedger::new());
    let service = LedgerService::new(
        customers.clone(),
        store.clone(),
        store.clone(),
        store.clone(),
    );
    Harness {
        customers,
        store,
        service,
    }
}

impl Harness {
    async fn seed_customer(&self, builder: TestCustomerBuilder) -> domain_customer::Customer {
        self.customers.insert(builder.build()).await.unwrap()
    }

    async fn seed_treasury(&self) -> domain_ledger::Treasury {
        TreasuryStore::insert(self.store.as_ref(), TestTreasuryBuilder::new().build())
            .await
            .unwrap()
    }

    fn debit(
        &self,
        treasury: &domain_ledger::Treasury,
        customer: &domain_customer::Customer,
        amount: Decimal,
    ) -> NewTransaction {
        NewTransaction {
            treasury_id: treasury.id,
            customer_id: Some(customer.id),
            entry_type: EntryType::Debit,
            amount,
            payment_method: PaymentMethod::Cash,
            description: "Cash advance".into(),
        }
    }
}

// ============================================================================
// Balance Calculator
// ============================================================================

#[tokio::test]
async fn test_balance_is_ledger_plus_unpaid_records() {
    let h = harness();
    let customer = h.seed_customer(TestCustomerBuilder::new()).await;
    let treasury = h.seed_treasury().await;

    h.service
        .record_transaction(h.debit(&treasury, &customer, dec!(500)))
        .await
        .unwrap();
    h.service
        .record_transaction(NewTransaction {
            entry_type: EntryType::Credit,
            amount: dec!(200),
            ..h.debit(&treasury, &customer, dec!(200))
        })
        .await
        .unwrap();
    RecordStore::insert(
        h.store.as_ref(),
        TestRecordBuilder::for_customer(customer.id)
            .with_total(dec!(300))
            .with_paid(dec!(100))
            .build(),
    )
    .await
    .unwrap();

    let balance = h.service.calculate_balance(customer.id).await.unwrap();
    assert_eq!(balance.ledger, dec!(300));
    assert_eq!(balance.unpaid_records, dec!(200));
    assert_eq!(balance.total, balance.ledger + balance.unpaid_records);
}

#[tokio::test]
async fn test_settled_records_do_not_count() {
    let h = harness();
    let customer = h.seed_customer(TestCustomerBuilder::new()).await;

    RecordStore::insert(
        h.store.as_ref(),
        TestRecordBuilder::for_customer(customer.id)
            .with_total(dec!(300))
            .with_paid(dec!(300))
            .build(),
    )
    .await
    .unwrap();

    let balance = h.service.calculate_balance(customer.id).await.unwrap();
    assert_eq!(balance.unpaid_records, Decimal::ZERO);
    assert_eq!(balance.total, Decimal::ZERO);
}

#[tokio::test]
async fn test_balance_for_unknown_customer_is_not_found() {
    let h = harness();
    let result = h
        .service
        .calculate_balance(core_kernel::CustomerId::new())
        .await;
    assert!(matches!(result, Err(LedgerError::NotFound { .. })));
}

// ============================================================================
// Customer summary
// ============================================================================

#[tokio::test]
async fn test_summary_lists_newest_first() {
    let h = harness();
    let customer = h.seed_customer(TestCustomerBuilder::new()).await;
    let treasury = h.seed_treasury().await;

    LedgerStore::insert(
        h.store.as_ref(),
        TestTransactionBuilder::debit(treasury.id, dec!(100))
            .for_customer(customer.id)
            .with_description("Older")
            .created_at(day(1))
            .build(),
    )
    .await
    .unwrap();
    LedgerStore::insert(
        h.store.as_ref(),
        TestTransactionBuilder::credit(treasury.id, dec!(25))
            .for_customer(customer.id)
            .with_description("Newer")
            .created_at(day(2))
            .build(),
    )
    .await
    .unwrap();

    let summary = h.service.customer_summary(customer.id).await.unwrap();
    assert_eq!(summary.customer.id, customer.id);
    assert_eq!(summary.balance.total, dec!(75));
    assert_eq!(summary.transactions.len(), 2);
    assert_eq!(summary.transactions[0].description, "Newer");
    assert_eq!(summary.transactions[1].description, "Older");
}

// ============================================================================
// Credit Limit Guard
// ============================================================================

#[tokio::test]
async fn test_credit_limit_boundary() {
    let h = harness();
    let customer = h
        .seed_customer(TestCustomerBuilder::new().with_credit_limit(dec!(1000)))
        .await;
    let treasury = h.seed_treasury().await;

    // Bring the balance to 900.
    h.service
        .record_transaction(h.debit(&treasury, &customer, dec!(900)))
        .await
        .unwrap();

    // 900 + 150 breaches the limit of 1000.
    let rejected = h
        .service
        .record_transaction(h.debit(&treasury, &customer, dec!(150)))
        .await;
    match rejected {
        Err(LedgerError::CreditLimitExceeded { limit, projected }) => {
            assert_eq!(limit, dec!(1000));
            assert_eq!(projected, dec!(1050));
        }
        other => panic!("expected CreditLimitExceeded, got {other:?}"),
    }

    // The rejected write left nothing behind.
    let balance = h.service.calculate_balance(customer.id).await.unwrap();
    assert_eq!(balance.total, dec!(900));

    // 900 + 50 fits exactly.
    h.service
        .record_transaction(h.debit(&treasury, &customer, dec!(50)))
        .await
        .unwrap();
    assert!(h.service.check_credit_limit(customer.id, dec!(50)).await.unwrap());
    assert!(!h.service.check_credit_limit(customer.id, dec!(51)).await.unwrap());
}

#[tokio::test]
async fn test_zero_limit_means_unlimited() {
    let h = harness();
    let customer = h.seed_customer(TestCustomerBuilder::new()).await;
    let treasury = h.seed_treasury().await;

    h.service
        .record_transaction(h.debit(&treasury, &customer, dec!(1_000_000)))
        .await
        .unwrap();
    assert!(h
        .service
        .check_credit_limit(customer.id, dec!(1_000_000))
        .await
        .unwrap());
}

#[tokio::test]
async fn test_credits_bypass_the_guard() {
    let h = harness();
    let customer = h
        .seed_customer(TestCustomerBuilder::new().with_credit_limit(dec!(100)))
        .await;
    let treasury = h.seed_treasury().await;

    // A credit entry reduces debt and is never limit-checked.
    h.service
        .record_transaction(NewTransaction {
            entry_type: EntryType::Credit,
            ..h.debit(&treasury, &customer, dec!(500))
        })
        .await
        .unwrap();
}

#[tokio::test]
async fn test_serialized_checks_enforce_the_same_limit() {
    let customers = Arc::new(InMemoryCustomerStore::new());
    let store = Arc::new(InMemoryLedger::new());
    let service = LedgerService::with_config(
        customers.clone(),
        store.clone(),
        store.clone(),
        store.clone(),
        LedgerConfig {
            serialize_credit_checks: true,
        },
    );

    let customer = customers
        .insert(
            TestCustomerBuilder::new()
                .with_credit_limit(dec!(100))
                .build(),
        )
        .await
        .unwrap();
    let treasury = TreasuryStore::insert(store.as_ref(), TestTreasuryBuilder::new().build())
        .await
        .unwrap();

    let debit = |amount: Decimal| NewTransaction {
        treasury_id: treasury.id,
        customer_id: Some(customer.id),
        entry_type: EntryType::Debit,
        amount,
        payment_method: PaymentMethod::Cash,
        description: "Advance".into(),
    };

    service.record_transaction(debit(dec!(80))).await.unwrap();
    let rejected = service.record_transaction(debit(dec!(30))).await;
    assert!(matches!(
        rejected,
        Err(LedgerError::CreditLimitExceeded { .. })
    ));
    service.record_transaction(debit(dec!(20))).await.unwrap();
}

#[tokio::test]
async fn test_inactive_entities_are_refused() {
    let h = harness();
    let customer = h.seed_customer(TestCustomerBuilder::new().inactive()).await;
    let treasury = h.seed_treasury().await;

    let result = h
        .service
        .record_transaction(h.debit(&treasury, &customer, dec!(10)))
        .await;
    assert!(matches!(result, Err(LedgerError::InactiveEntity { .. })));

    let mut closed = TestTreasuryBuilder::new().with_name("Closed safe").build();
    closed.close();
    let closed = TreasuryStore::insert(h.store.as_ref(), closed).await.unwrap();
    let active_customer = h.seed_customer(TestCustomerBuilder::new().with_name("B")).await;
    let result = h
        .service
        .record_transaction(h.debit(&closed, &active_customer, dec!(10)))
        .await;
    assert!(matches!(result, Err(LedgerError::InactiveEntity { .. })));
}

// ============================================================================
// Statement Builder
// ============================================================================

#[tokio::test]
async fn test_opening_balance_only_statement() {
    let h = harness();
    let customer = h
        .seed_customer(TestCustomerBuilder::new().with_opening_balance(dec!(500)))
        .await;

    let statement = h.service.generate_statement(customer.id).await.unwrap();

    assert_eq!(statement.entries.len(), 1);
    let entry = &statement.entries[0];
    assert_eq!(entry.title, "Opening balance");
    assert_eq!(entry.debit, dec!(500));
    assert_eq!(entry.credit, Decimal::ZERO);
    assert_eq!(entry.balance, dec!(500));
    assert_eq!(statement.current_balance, dec!(500));
}

#[tokio::test]
async fn test_negative_opening_balance_is_a_credit_line() {
    let h = harness();
    let customer = h
        .seed_customer(TestCustomerBuilder::new().with_opening_balance(dec!(-200)))
        .await;

    let statement = h.service.generate_statement(customer.id).await.unwrap();

    let entry = &statement.entries[0];
    assert_eq!(entry.debit, Decimal::ZERO);
    assert_eq!(entry.credit, dec!(200));
    assert_eq!(statement.current_balance, dec!(-200));
}

#[tokio::test]
async fn test_record_then_partial_payment_statement() {
    let h = harness();
    let customer = h.seed_customer(TestCustomerBuilder::new()).await;
    let treasury = h.seed_treasury().await;

    let record = h
        .service
        .create_record(
            TestRecordBuilder::for_customer(customer.id)
                .with_title("Stock invoice")
                .with_total(dec!(1000))
                .created_at(day(1))
                .build(),
        )
        .await
        .unwrap();

    h.service
        .pay_record(PayRecordRequest {
            record_id: record.id,
            amount: dec!(400),
            treasury_id: treasury.id,
            payment_method: PaymentMethod::Cash,
            description: None,
        })
        .await
        .unwrap();

    let stored = RecordStore::get(h.store.as_ref(), record.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.status, RecordStatus::Partial);
    assert_eq!(stored.paid_amount, dec!(400));

    let balance = h.service.calculate_balance(customer.id).await.unwrap();
    assert_eq!(balance.total, dec!(600));

    let statement = h.service.generate_statement(customer.id).await.unwrap();
    assert_eq!(statement.entries.len(), 2);
    assert_eq!(statement.entries[0].debit, dec!(1000));
    assert_eq!(statement.entries[0].balance, dec!(1000));
    assert_eq!(statement.entries[1].credit, dec!(400));
    assert_eq!(statement.entries[1].balance, dec!(600));
    assert_eq!(statement.current_balance, dec!(600));
}

#[tokio::test]
async fn test_statement_last_balance_equals_current() {
    let h = harness();
    let customer = h
        .seed_customer(TestCustomerBuilder::new().with_opening_balance(dec!(120)))
        .await;
    let treasury = h.seed_treasury().await;

    for (entry_type, amount, offset) in [
        (EntryType::Debit, dec!(75), 2),
        (EntryType::Credit, dec!(30), 3),
        (EntryType::Debit, dec!(10), 4),
    ] {
        let builder = match entry_type {
            EntryType::Debit => TestTransactionBuilder::debit(treasury.id, amount),
            EntryType::Credit => TestTransactionBuilder::credit(treasury.id, amount),
        };
        LedgerStore::insert(
            h.store.as_ref(),
            builder.for_customer(customer.id).created_at(day(offset)).build(),
        )
        .await
        .unwrap();
    }

    let statement = h.service.generate_statement(customer.id).await.unwrap();
    assert_eq!(
        statement.entries.last().unwrap().balance,
        statement.current_balance
    );
    assert_eq!(statement.current_balance, dec!(175));
}

#[tokio::test]
async fn test_statement_is_deterministic() {
    let h = harness();
    let customer = h
        .seed_customer(TestCustomerBuilder::new().with_opening_balance(dec!(50)))
        .await;
    let treasury = h.seed_treasury().await;

    LedgerStore::insert(
        h.store.as_ref(),
        TestTransactionBuilder::debit(treasury.id, dec!(80))
            .for_customer(customer.id)
            .created_at(day(3))
            .build(),
    )
    .await
    .unwrap();

    let first = h.service.generate_statement(customer.id).await.unwrap();
    let second = h.service.generate_statement(customer.id).await.unwrap();

    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[tokio::test]
async fn test_equal_timestamps_keep_input_order() {
    let h = harness();
    // Customer created on the same instant as every event.
    let customer = h
        .seed_customer(
            TestCustomerBuilder::new()
                .with_opening_balance(dec!(100))
                .created_at(day(5)),
        )
        .await;
    let treasury = h.seed_treasury().await;

    // Transactions land in the store before the records, yet the
    // statement must still order: opening, records, transactions.
    LedgerStore::insert(
        h.store.as_ref(),
        TestTransactionBuilder::credit(treasury.id, dec!(40))
            .for_customer(customer.id)
            .with_description("Repayment")
            .created_at(day(5))
            .build(),
    )
    .await
    .unwrap();
    RecordStore::insert(
        h.store.as_ref(),
        TestRecordBuilder::for_customer(customer.id)
            .with_title("First invoice")
            .with_total(dec!(60))
            .created_at(day(5))
            .build(),
    )
    .await
    .unwrap();
    RecordStore::insert(
        h.store.as_ref(),
        TestRecordBuilder::for_customer(customer.id)
            .with_title("Second invoice")
            .with_total(dec!(20))
            .created_at(day(5))
            .build(),
    )
    .await
    .unwrap();

    let statement = h.service.generate_statement(customer.id).await.unwrap();
    let titles: Vec<&str> = statement.entries.iter().map(|e| e.title.as_str()).collect();
    assert_eq!(
        titles,
        vec!["Opening balance", "First invoice", "Second invoice", "Repayment"]
    );
    assert_eq!(statement.current_balance, dec!(140));
}

#[tokio::test]
async fn test_statement_for_unknown_customer_is_not_found() {
    let h = harness();
    let result = h
        .service
        .generate_statement(core_kernel::CustomerId::new())
        .await;
    assert!(matches!(result, Err(LedgerError::NotFound { .. })));
}

// ============================================================================
// Payment Allocator
// ============================================================================

#[tokio::test]
async fn test_overpayment_leaves_everything_unchanged() {
    let h = harness();
    let customer = h.seed_customer(TestCustomerBuilder::new()).await;
    let treasury = h.seed_treasury().await;
    let record = h
        .service
        .create_record(
            TestRecordBuilder::for_customer(customer.id)
                .with_total(dec!(1000))
                .with_paid(dec!(900))
                .build(),
        )
        .await
        .unwrap();

    let result = h
        .service
        .pay_record(PayRecordRequest {
            record_id: record.id,
            amount: dec!(200),
            treasury_id: treasury.id,
            payment_method: PaymentMethod::Transfer,
            description: None,
        })
        .await;
    assert!(matches!(result, Err(LedgerError::InvalidAmount { .. })));

    let stored = RecordStore::get(h.store.as_ref(), record.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.paid_amount, dec!(900));
    assert_eq!(stored.status, RecordStatus::Partial);

    let transactions = h
        .service
        .transactions(TransactionFilter::for_customer(customer.id))
        .await
        .unwrap();
    assert!(transactions.is_empty());
}

#[tokio::test]
async fn test_exact_payment_settles_record() {
    let h = harness();
    let customer = h.seed_customer(TestCustomerBuilder::new()).await;
    let treasury = h.seed_treasury().await;
    let record = h
        .service
        .create_record(
            TestRecordBuilder::for_customer(customer.id)
                .with_total(dec!(500))
                .build(),
        )
        .await
        .unwrap();

    let txn = h
        .service
        .pay_record(PayRecordRequest {
            record_id: record.id,
            amount: dec!(500),
            treasury_id: treasury.id,
            payment_method: PaymentMethod::Cash,
            description: Some("Settled in full".into()),
        })
        .await
        .unwrap();

    assert_eq!(txn.entry_type, EntryType::Credit);
    assert_eq!(txn.customer_id, Some(customer.id));
    assert_eq!(txn.reference_id, Some(*record.id.as_uuid()));

    let stored = RecordStore::get(h.store.as_ref(), record.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.status, RecordStatus::Paid);
    assert!(stored.paid_amount <= stored.total_amount);
}

#[tokio::test]
async fn test_payment_into_inactive_treasury_is_refused() {
    let h = harness();
    let customer = h.seed_customer(TestCustomerBuilder::new()).await;
    let inactive = TreasuryStore::insert(
        h.store.as_ref(),
        TestTreasuryBuilder::new().with_name("Retired till").inactive().build(),
    )
    .await
    .unwrap();
    let record = h
        .service
        .create_record(
            TestRecordBuilder::for_customer(customer.id)
                .with_total(dec!(100))
                .build(),
        )
        .await
        .unwrap();

    let result = h
        .service
        .pay_record(PayRecordRequest {
            record_id: record.id,
            amount: dec!(50),
            treasury_id: inactive.id,
            payment_method: PaymentMethod::Cash,
            description: None,
        })
        .await;
    assert!(matches!(result, Err(LedgerError::InactiveEntity { .. })));
}

#[tokio::test]
async fn test_payment_to_unknown_record_is_not_found() {
    let h = harness();
    let treasury = h.seed_treasury().await;

    let result = h
        .service
        .pay_record(PayRecordRequest {
            record_id: core_kernel::RecordId::new(),
            amount: dec!(10),
            treasury_id: treasury.id,
            payment_method: PaymentMethod::Cash,
            description: None,
        })
        .await;
    assert!(matches!(result, Err(LedgerError::NotFound { .. })));
}

// ============================================================================
// Reversal Handler
// ============================================================================

#[tokio::test]
async fn test_reversal_restores_the_balance() {
    let h = harness();
    let customer = h.seed_customer(TestCustomerBuilder::new()).await;
    let treasury = h.seed_treasury().await;

    h.service
        .record_transaction(h.debit(&treasury, &customer, dec!(120)))
        .await
        .unwrap();
    let before = h.service.calculate_balance(customer.id).await.unwrap();

    let txn = h
        .service
        .record_transaction(h.debit(&treasury, &customer, dec!(250)))
        .await
        .unwrap();
    let reversal = h
        .service
        .reverse_transaction(ReverseRequest {
            transaction_id: txn.id,
            reason: "entered twice".into(),
        })
        .await
        .unwrap();

    assert_eq!(reversal.entry_type, EntryType::Credit);
    assert_eq!(reversal.amount, txn.amount);
    assert!(reversal.is_reversal());

    let after = h.service.calculate_balance(customer.id).await.unwrap();
    assert_eq!(after, before);

    // The original is still in the history, untouched.
    let original = LedgerStore::get(h.store.as_ref(), txn.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(original.amount, txn.amount);
    assert_eq!(original.entry_type, EntryType::Debit);
}

#[tokio::test]
async fn test_second_reversal_is_rejected() {
    let h = harness();
    let customer = h.seed_customer(TestCustomerBuilder::new()).await;
    let treasury = h.seed_treasury().await;

    let txn = h
        .service
        .record_transaction(h.debit(&treasury, &customer, dec!(75)))
        .await
        .unwrap();
    h.service
        .reverse_transaction(ReverseRequest {
            transaction_id: txn.id,
            reason: "wrong amount".into(),
        })
        .await
        .unwrap();

    let second = h
        .service
        .reverse_transaction(ReverseRequest {
            transaction_id: txn.id,
            reason: "again".into(),
        })
        .await;
    assert!(matches!(second, Err(LedgerError::AlreadyReversed { .. })));
}

#[tokio::test]
async fn test_reversing_unknown_transaction_is_not_found() {
    let h = harness();
    let result = h
        .service
        .reverse_transaction(ReverseRequest {
            transaction_id: core_kernel::TransactionId::new(),
            reason: "nothing there".into(),
        })
        .await;
    assert!(matches!(result, Err(LedgerError::NotFound { .. })));
}

// ============================================================================
// Treasury balance derivation
// ============================================================================

#[tokio::test]
async fn test_closed_treasury_refuses_new_entries() {
    let h = harness();
    let customer = h.seed_customer(TestCustomerBuilder::new()).await;
    let treasury = h.seed_treasury().await;

    h.service
        .record_transaction(h.debit(&treasury, &customer, dec!(10)))
        .await
        .unwrap();

    let closed = h.service.close_treasury(treasury.id).await.unwrap();
    assert!(!closed.is_active);
    assert!(closed.closed_at.is_some());

    let result = h
        .service
        .record_transaction(h.debit(&treasury, &customer, dec!(10)))
        .await;
    assert!(matches!(result, Err(LedgerError::InactiveEntity { .. })));

    // Closing twice is itself an inactive-entity refusal.
    let again = h.service.close_treasury(treasury.id).await;
    assert!(matches!(again, Err(LedgerError::InactiveEntity { .. })));

    // History and the derived balance survive the close.
    let balance = h.service.treasury_balance(treasury.id).await.unwrap();
    assert_eq!(balance, dec!(-10));
}

#[tokio::test]
async fn test_treasury_balance_is_derived_from_the_stream() {
    let h = harness();
    let customer = h.seed_customer(TestCustomerBuilder::new()).await;
    let treasury = TreasuryStore::insert(
        h.store.as_ref(),
        TestTreasuryBuilder::new()
            .with_name("Seeded till")
            .with_initial_balance(dec!(1000))
            .build(),
    )
    .await
    .unwrap();

    // Debit hands cash out, credit brings cash in.
    h.service
        .record_transaction(h.debit(&treasury, &customer, dec!(300)))
        .await
        .unwrap();
    h.service
        .record_transaction(NewTransaction {
            entry_type: EntryType::Credit,
            amount: dec!(100),
            customer_id: None,
            ..h.debit(&treasury, &customer, dec!(100))
        })
        .await
        .unwrap();

    let balance = h.service.treasury_balance(treasury.id).await.unwrap();
    assert_eq!(balance, dec!(800));
}
