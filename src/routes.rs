use axum::{
    Router,
    routing::{get, put},
};
use tower_http::trace::TraceLayer;

use crate::AppState;
use crate::handlers::reservation;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(reservation::root))
        .route(
            "/reservations",
            get(reservation::index).post(reservation::store),
        )
        .route("/reservations/create", get(reservation::create))
        .route(
            "/reservations/{id}",
            put(reservation::update)
                .patch(reservation::update)
                .delete(reservation::destroy)
                .post(reservation::method_override),
        )
        .route("/reservations/{id}/edit", get(reservation::edit))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
