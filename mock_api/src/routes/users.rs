use axum::{middleware::from_fn_with_state, routing::get, Router};

use crate::handlers::users_handlers::{create_user, delete_user, get_user, list_users, update_user};
use crate::middleware::outage_middleware::outage_middleware;
use crate::state::MockState;

pub fn users_routes(state: MockState) -> Router {
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route(
            "/users/{id}",
            get(get_user).put(update_user).delete(delete_user),
        )
        .layer(from_fn_with_state(state.clone(), outage_middleware))
        .with_state(state)
}
