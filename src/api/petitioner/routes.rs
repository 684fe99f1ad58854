/*
 * Responsibility
 * - URL layout of the /petitioner namespace
 * - Public: /, /signin. Behind the gate: /dashboard, /dashboard/edit
 */
use axum::{Router, routing::get};

use crate::middleware::auth::access;
use crate::state::AppState;

use crate::api::petitioner::handlers::{
    dashboard::{dashboard, edit_form, update_profile},
    signin::{entry, sign_in, sign_in_status},
};

pub fn routes(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/dashboard", get(dashboard))
        .route("/dashboard/edit", get(edit_form).post(update_profile));
    let protected = access::apply(protected, state);

    Router::new()
        .route("/", get(entry))
        .route("/signin", get(sign_in_status).post(sign_in))
        .merge(protected)
}
