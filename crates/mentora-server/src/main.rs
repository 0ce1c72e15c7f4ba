use crate::auth::SessionConfig;
use crate::opt::{Commands, Db, Run};
use anyhow::Result;
use axum::routing::get;
use axum::serve;
use axum_prometheus::PrometheusMetricLayerBuilder;
use clap::Parser;
use mentora_db::schema::setup_schema;
use mentora_db::sea_orm::{ConnectOptions, Database};
use mentora_utils::net::create_listener;
use mentora_utils::tracing::TracingConfig;
use std::env;
use std::net::{IpAddr, Ipv4Addr};

mod app;
mod auth;
mod cookie;
mod opt;
mod password;
mod permissions;
mod routes;
mod user;

const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::LOCALHOST);
const DEFAULT_PORT: u16 = 3030;

async fn run(opt: Run) -> Result<()> {
    let _guard = mentora_utils::tracing::setup(
        TracingConfig::builder()
            .package(env!("CARGO_PKG_NAME"))
            .version(env!("CARGO_PKG_VERSION"))
            .sentry_dsn(opt.sentry_dsn)
            .env(opt.env)
            .build(),
    )?;

    let conn = Database::connect(build_connect_options(&opt.db, opt.database_url)).await?;
    setup_schema(&conn)
        .await
        .inspect_err(|error| tracing::error!(error = error as &dyn std::error::Error, "failed to set up schema"))?;

    let session = SessionConfig::from(opt.session);
    tracing::info!(ttl = %session.token_ttl, secure = session.cookie_secure, "session settings");

    let (prometheus_layer, metric_handle) = PrometheusMetricLayerBuilder::new()
        .with_prefix("api")
        .with_default_metrics()
        .build_pair();

    let app = app::create_app(conn, &session, &opt.origins)?
        .route("/metrics", get(|| async move { metric_handle.render() }))
        .layer(prometheus_layer);

    let listener = create_listener((opt.host, opt.port), (DEFAULT_HOST, DEFAULT_PORT)).await?;

    let service = app.into_make_service();
    tracing::info!(local_addr = %listener.local_addr()?, "starting app");
    serve::serve(listener, service).await?;
    Ok(())
}

fn build_connect_options(db_options: &Db, db_url: String) -> ConnectOptions {
    let mut options = ConnectOptions::new(db_url);
    if let Some(min_connections) = db_options.db_min_connections {
        options.min_connections(min_connections);
    }
    if let Some(max_connections) = db_options.db_max_connections {
        options.max_connections(max_connections);
    }
    options.sqlx_logging(false);
    options
}

fn main() -> Result<()> {
    unsafe { env::set_var("RUST_BACKTRACE", "1") };

    let main = async {
        let opt = opt::Cli::parse();

        match opt.command {
            Commands::Run(o) => run(o).await?,
        }
        Ok(())
    };

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(main)
}
