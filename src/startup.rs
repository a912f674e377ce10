use axum::{
    extract::{FromRef, MatchedPath},
    http::Request,
    routing::get,
    Router,
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::configuration::Settings;
use crate::registry_client::RegistryClient;
use crate::routes::{check_health, fetch_studies};

#[derive(Clone)]
pub struct AppState {
    pub registry_client: RegistryClient,
}

impl FromRef<AppState> for RegistryClient {
    fn from_ref(state: &AppState) -> Self {
        state.registry_client.clone()
    }
}

pub fn get_app_state(configuration: &Settings) -> Result<AppState, anyhow::Error> {
    let registry = &configuration.registry;
    let registry_client =
        RegistryClient::new(&registry.base_url, registry.page_size, registry.timeout())?;

    Ok(AppState { registry_client })
}

pub struct Application {
    port: u16,
    listener: TcpListener,
    app_state: AppState,
}

impl Application {
    pub async fn build(configuration: Settings) -> Result<Self, anyhow::Error> {
        let app_state = get_app_state(&configuration)?;

        let address = format!(
            "{}:{}",
            configuration.application.host, configuration.application.port
        );
        let listener = TcpListener::bind(address).await?;
        let port = listener.local_addr()?.port();

        Ok(Self {
            port,
            listener,
            app_state,
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        tracing::info!(port = self.port, "Serving study lookups");
        run(self.listener, self.app_state).await
    }
}

pub async fn run(listener: TcpListener, app_state: AppState) -> Result<(), std::io::Error> {
    axum::serve(listener, router(app_state)).await
}

pub fn router(app_state: AppState) -> Router {
    Router::new()
        .route("/fetch-studies", get(fetch_studies))
        .route("/health_check", get(check_health))
        .with_state(app_state)
        .layer(
            // Refer to https://github.com/tokio-rs/axum/blob/main/examples/tracing-aka-logging/Cargo.toml
            TraceLayer::new_for_http().make_span_with(|request: &Request<_>| {
                let path = request
                    .extensions()
                    .get::<MatchedPath>()
                    .map(MatchedPath::as_str);
                tracing::info_span!(
                    "Starting HTTP request",
                    method = ?request.method(),
                    path,
                    request_id = %Uuid::new_v4(),
                )
            }),
        )
}
