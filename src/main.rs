//! Genesis Checkout server binary.

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use genesis_checkout::adapters::chain::AlloyContractReader;
use genesis_checkout::adapters::http::{app_router, CheckoutAppState};
use genesis_checkout::adapters::price_feed::CoinGeckoPriceFeed;
use genesis_checkout::adapters::stripe::{StripeConfig, StripePaymentAdapter};
use genesis_checkout::application::handlers::pricing::{GetCurrentPriceHandler, PriceConverter};
use genesis_checkout::config::AppConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    init_tracing(&config);

    if let Err(e) = config.validate() {
        tracing::error!(error = %e, "Invalid configuration");
        return Err(e.into());
    }

    let addr = config.server.socket_addr()?;
    let network = config.chain.network()?;
    let contract_address = config.chain.contract_address()?;

    let contract = AlloyContractReader::connect(&config.chain.rpc_url()?, contract_address)?;
    let feed = CoinGeckoPriceFeed::from_config(&config.pricing);
    let pricing = GetCurrentPriceHandler::new(
        Arc::new(contract),
        PriceConverter::new(Arc::new(feed)),
    );

    let stripe = StripePaymentAdapter::new(
        StripeConfig::from_payment_config(&config.payment)
            .with_require_livemode(config.is_production()),
    );

    let state = CheckoutAppState {
        payment_provider: Arc::new(stripe),
        pricing: Arc::new(pricing),
        publishable_key: config.payment.stripe_publishable_key.clone(),
        static_dir: config.server.static_dir.clone(),
    };

    let index = config.server.index_path();
    if !index.exists() {
        tracing::warn!(path = %index.display(), "Checkout page missing; GET / will return 404");
    }

    let app = app_router(state, &config.server.cors_origins_list());

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(
        %addr,
        ?network,
        chain_id = network.chain_id(),
        contract = %contract_address,
        environment = ?config.server.environment,
        test_mode = config.payment.is_test_mode(),
        "Checkout server listening on port {}",
        addr.port()
    );

    axum::serve(listener, app).await?;

    Ok(())
}

/// JSON logs in production, human-readable output elsewhere.
///
/// `RUST_LOG` overrides the configured filter.
fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    let registry = tracing_subscriber::registry().with(filter);

    if config.is_production() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}
