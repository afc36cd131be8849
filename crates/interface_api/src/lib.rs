//! HTTP API Layer
//!
//! REST routes over the domain services using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: one module per resource, thin wrappers over the services
//! - **DTOs**: request bodies that don't map one-to-one onto domain inputs
//! - **Error handling**: domain taxonomies mapped onto HTTP statuses
//!
//! There is no authentication layer; the application fronts a single
//! trusted operator.
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::{build_state, create_router};
//!
//! let state = build_state(pool, config);
//! let app = create_router(state);
//! axum::serve(listener, app).await?;
//! ```

pub mod advice;
pub mod config;
pub mod dto;
pub mod error;
pub mod handlers;

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use domain_customer::CustomerStore;
use domain_insights::{AdviceService, InMemoryAdviceCache, InsightsAssembler};
use domain_ledger::{LedgerConfig, LedgerService, TreasuryStore};
use domain_obligation::ObligationService;
use infra_db::{
    CustomerRepository, DatabasePool, LedgerRepository, ObligationRepository, RecordRepository,
    TreasuryRepository,
};

use crate::advice::TemplateAdviceGenerator;
use crate::config::ApiConfig;
use crate::handlers::{customers, health, insights, obligations, records, transactions, treasuries};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub customers: Arc<dyn CustomerStore>,
    pub treasuries: Arc<dyn TreasuryStore>,
    pub ledger: Arc<LedgerService>,
    pub obligations: Arc<ObligationService>,
    pub insights: InsightsAssembler,
    pub advice: Arc<AdviceService>,
    pub config: ApiConfig,
}

/// Wires the PostgreSQL repositories and domain services into one state
pub fn build_state(pool: DatabasePool, config: ApiConfig) -> AppState {
    let customers: Arc<dyn CustomerStore> = Arc::new(CustomerRepository::new(pool.clone()));
    let ledger_store = Arc::new(LedgerRepository::new(pool.clone()));
    let records = Arc::new(RecordRepository::new(pool.clone()));
    let treasuries: Arc<dyn TreasuryStore> = Arc::new(TreasuryRepository::new(pool.clone()));
    let obligations = Arc::new(ObligationRepository::new(pool));

    let ledger = Arc::new(LedgerService::with_config(
        customers.clone(),
        ledger_store.clone(),
        records,
        treasuries.clone(),
        LedgerConfig {
            serialize_credit_checks: config.serialize_credit_checks,
        },
    ));

    let insights = InsightsAssembler::new(treasuries.clone(), ledger_store);
    let advice = Arc::new(AdviceService::new(
        insights.clone(),
        Arc::new(TemplateAdviceGenerator),
        Arc::new(InMemoryAdviceCache::new(Duration::from_secs(
            config.advice_cache_ttl_secs,
        ))),
    ));

    AppState {
        customers,
        treasuries,
        ledger,
        obligations: Arc::new(ObligationService::new(obligations)),
        insights,
        advice,
        config,
    }
}

/// Creates the main API router
pub fn create_router(state: AppState) -> Router {
    let customer_routes = Router::new()
        .route("/", post(customers::create_customer))
        .route("/", get(customers::list_customers))
        .route("/:id", get(customers::get_customer))
        .route("/:id", put(customers::update_customer))
        .route("/:id", delete(customers::delete_customer))
        .route("/:id/balance", get(customers::get_balance))
        .route("/:id/summary", get(customers::get_summary))
        .route("/:id/statement", get(customers::get_statement));

    let treasury_routes = Router::new()
        .route("/", post(treasuries::create_treasury))
        .route("/", get(treasuries::list_treasuries))
        .route("/:id", get(treasuries::get_treasury))
        .route("/:id/close", post(treasuries::close_treasury))
        .route("/:id/snapshot", get(insights::get_snapshot))
        .route("/:id/advice", get(insights::get_advice));

    let transaction_routes = Router::new()
        .route("/", post(transactions::create_transaction))
        .route("/", get(transactions::list_transactions))
        .route("/:id/reverse", post(transactions::reverse_transaction));

    let record_routes = Router::new()
        .route("/", post(records::create_record))
        .route("/:id/pay", post(records::pay_record));

    let obligation_routes = Router::new()
        .route("/", post(obligations::create_obligation))
        .route("/", get(obligations::list_obligations))
        .route("/:id", get(obligations::get_obligation))
        .route("/:id", delete(obligations::delete_obligation))
        .route("/:id/done", post(obligations::mark_done))
        .route("/:id/reopen", post(obligations::reopen));

    let api_routes = Router::new()
        .nest("/customers", customer_routes)
        .nest("/treasuries", treasury_routes)
        .nest("/transactions", transaction_routes)
        .nest("/records", record_routes)
        .nest("/obligations", obligation_routes);

    Router::new()
        .route("/health", get(health::health_check))
        .nest("/api/v1", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
