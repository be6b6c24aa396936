//! Reservation server creation and serving.
use axum::{routing::get, Router};
use reservation_services::ReservationService;
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

#[derive(Clone)]
pub struct ServerState {
    pub reservations: ReservationService,
}

impl ServerState {
    pub fn new(reservations: ReservationService) -> Self {
        Self { reservations }
    }
}

pub(crate) fn make_app() -> Router<ServerState> {
    Router::new()
        .route("/healthcheck", get(|| async { "ok" }))
        .nest("/api", crate::api::router())
        .layer(TraceLayer::new_for_http())
}

pub struct Server;

impl Server {
    /// Serves the reservation server on the given listener until a shutdown
    /// signal is received.
    pub async fn serve(
        listener: std::net::TcpListener,
        state: ServerState,
    ) -> Result<(), crate::Error> {
        listener.set_nonblocking(true)?;
        let listener = tokio::net::TcpListener::from_std(listener)?;

        info!("starting server on {:?}", listener.local_addr()?);

        axum::serve(listener, make_app().with_state(state))
            .with_graceful_shutdown(shutdown())
            .await?;

        Ok(())
    }
}

async fn shutdown() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("cannot install ctrl-c handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("cannot install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("shutting down the server");
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use reservation_store::InMemoryReservationRepository;
    use tower::ServiceExt;

    use super::*;

    fn make_state() -> ServerState {
        ServerState::new(ReservationService::new(Arc::new(
            InMemoryReservationRepository::new(),
        )))
    }

    #[tokio::test]
    async fn test_healthcheck() {
        let response = make_app()
            .with_state(make_state())
            .oneshot(Request::get("/healthcheck").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unknown_route_is_not_found() {
        let response = make_app()
            .with_state(make_state())
            .oneshot(Request::get("/api/v2/rooms").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
