use anyhow::Context;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use dex_router::orchestrator::{get_quote, load_snapshot, QuoteError};
use dex_router::snapshot::Snapshot;
use dex_router::types::{DexConfig, QuoteRequest, QuoteResponse, RouteHop, RouteQuote};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

// Configuration plus the pair snapshot every quote is routed against
#[derive(Clone)]
struct AppState {
    config: Arc<DexConfig>,
    snapshot: Arc<RwLock<Snapshot>>,
}

#[derive(OpenApi)]
#[openapi(
    paths(get_quotes, reload_snapshot),
    components(schemas(QuoteResponse, RouteQuote, RouteHop)),
    tags(
        (name = "quotes", description = "Trade quotes for a token pair"),
        (name = "snapshot", description = "Pair reserve snapshot")
    )
)]
struct ApiDoc;

fn error_response(err: QuoteError) -> (StatusCode, String) {
    match err {
        QuoteError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
        QuoteError::Internal(err) => {
            error!("quote failed: {err:#}");
            (StatusCode::INTERNAL_SERVER_ERROR, format!("{err:#}"))
        }
    }
}

#[utoipa::path(
    get,
    path = "/quotes",
    params(QuoteRequest),
    responses(
        (status = 200, description = "Best route for the trade, or an empty quote", body = QuoteResponse),
        (status = 400, description = "Invalid quote request"),
        (status = 500, description = "Routing failed")
    ),
    tag = "quotes"
)]
async fn get_quotes(
    State(state): State<AppState>,
    Query(params): Query<QuoteRequest>,
) -> Result<Json<QuoteResponse>, (StatusCode, String)> {
    let snapshot = state.snapshot.read().await;
    get_quote(state.config.as_ref(), &snapshot, &params)
        .map(Json)
        .map_err(error_response)
}

#[utoipa::path(
    post,
    path = "/snapshot/reload",
    responses(
        (status = 200, description = "Snapshot reloaded from disk"),
        (status = 500, description = "Snapshot files could not be loaded")
    ),
    tag = "snapshot"
)]
async fn reload_snapshot(State(state): State<AppState>) -> Result<StatusCode, (StatusCode, String)> {
    let config = state.config.clone();
    let loaded = tokio::task::spawn_blocking(move || load_snapshot(&config))
        .await
        .map_err(|err| (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()))?;
    match loaded {
        Ok(snapshot) => {
            *state.snapshot.write().await = snapshot;
            info!("snapshot reloaded");
            Ok(StatusCode::OK)
        }
        Err(err) => {
            warn!("snapshot reload failed, keeping the previous one: {err:#}");
            Err((StatusCode::INTERNAL_SERVER_ERROR, format!("{err:#}")))
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = DexConfig::load_from(PathBuf::from("dex_config.toml"))?;
    let snapshot = load_snapshot(&config)?;
    let listen_addr = config.listen_addr.clone();

    let state = AppState {
        config: Arc::new(config),
        snapshot: Arc::new(RwLock::new(snapshot)),
    };
    let app = Router::new()
        .route("/quotes", get(get_quotes))
        .route("/snapshot/reload", post(reload_snapshot))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&listen_addr)
        .await
        .with_context(|| format!("Couldn't bind {listen_addr}"))?;
    info!("server running on http://{listen_addr}");
    info!("swagger UI available at http://{listen_addr}/swagger-ui/");
    axum::serve(listener, app).await?;
    Ok(())
}
