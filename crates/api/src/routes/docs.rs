use axum::{routing::get, Router};
use std::sync::Arc;

use crate::{openapi, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new().route("/openapi.json", get(openapi::openapi_json))
}
