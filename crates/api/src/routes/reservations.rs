use axum::{
    routing::{get, put},
    Router,
};
use std::sync::Arc;

use crate::{handlers::reservations, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/reservations",
            get(reservations::list_reservations).post(reservations::create_reservation),
        )
        .route(
            "/reservations/:id",
            get(reservations::get_reservation)
                .put(reservations::update_reservation)
                .patch(reservations::patch_reservation)
                .delete(reservations::delete_reservation),
        )
        .route("/reservations/:id/cancel", put(reservations::cancel_reservation))
}
