use axum::{
    Router, middleware,
    routing::{delete, get, post, put},
};
use storage::Database;

use super::handlers::{
    batch_import, create_participant, delete_participant, get_participant, list_participants,
    update_participant,
};
use crate::middleware::auth::{ApiKeys, require_auth};

pub fn routes(api_keys: ApiKeys) -> Router<Database> {
    let protected = Router::new()
        .route("/", post(create_participant))
        .route("/batch", post(batch_import))
        .route("/:id", put(update_participant))
        .route("/:id", delete(delete_participant))
        .route_layer(middleware::from_fn_with_state(api_keys, require_auth));

    Router::new()
        .route("/", get(list_participants))
        .route("/:id", get(get_participant))
        .merge(protected)
}
