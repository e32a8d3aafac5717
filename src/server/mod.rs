mod handlers;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::Extension,
    routing::{get, post},
    Router,
};
use tracing::Span;
use uuid::Uuid;

use crate::api::API;
use crate::error::{unexpected_error, Error};
use crate::server::handlers::{deep_links, estimates, geocode};

pub type DynAPI = Arc<dyn API + Send + Sync>;

pub fn router<T: API + Sync + Send + 'static>(api: T) -> Router {
    let api = Arc::new(api) as DynAPI;

    Router::new()
        .route("/estimates", post(estimates::create))
        .route("/estimates/coordinates", post(estimates::create_from_coordinates))
        .route("/geocode", post(geocode::resolve))
        .route("/deep_links/:provider", get(deep_links::find))
        .layer(Extension(api))
}

pub async fn serve<T: API + Sync + Send + 'static>(api: T, addr: SocketAddr) -> Result<(), Error> {
    let app = router(api);

    tracing::info!("listening on {}", addr);

    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .await
        .map_err(|err| {
            tracing::error!(error = %err, "server stopped");
            unexpected_error()
        })
}

fn request_span(route: &'static str) -> Span {
    tracing::info_span!("request", route, request_id = %Uuid::new_v4())
}
