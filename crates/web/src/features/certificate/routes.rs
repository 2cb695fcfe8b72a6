use axum::{Router, routing::get};
use storage::Database;

use super::handlers::check_certificate;

pub fn routes() -> Router<Database> {
    Router::new().route("/", get(check_certificate))
}
