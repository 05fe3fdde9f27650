use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::{json, Map, Value};

use crate::models::user::StoredUser;
use crate::state::MockState;

pub async fn list_users(State(state): State<MockState>) -> Json<Vec<StoredUser>> {
    Json(state.list())
}

pub async fn get_user(
    State(state): State<MockState>,
    Path(id): Path<u64>,
) -> Result<Json<StoredUser>, (StatusCode, Json<Value>)> {
    state
        .users
        .get(&id)
        .map(|user| Json(user.value().clone()))
        .ok_or_else(|| not_found(id))
}

/// Stores the user under a fresh id and echoes the body with that id.
pub async fn create_user(
    State(state): State<MockState>,
    Json(mut body): Json<Map<String, Value>>,
) -> impl IntoResponse {
    let id = state.allocate_id();
    state.users.insert(id, StoredUser::from_body(id, &body));
    log::info!("created user {}", id);

    body.insert("id".to_string(), json!(id));
    (StatusCode::CREATED, Json(body))
}

pub async fn update_user(
    State(state): State<MockState>,
    Path(id): Path<u64>,
    Json(mut body): Json<Map<String, Value>>,
) -> Result<impl IntoResponse, (StatusCode, Json<Value>)> {
    let mut entry = state.users.get_mut(&id).ok_or_else(|| not_found(id))?;
    *entry = StoredUser::from_body(id, &body);
    drop(entry);
    log::info!("updated user {}", id);

    body.insert("id".to_string(), json!(id));
    Ok((StatusCode::OK, Json(body)))
}

/// Always succeeds, whether or not the id exists.
pub async fn delete_user(State(state): State<MockState>, Path(id): Path<u64>) -> impl IntoResponse {
    if state.users.remove(&id).is_some() {
        log::info!("deleted user {}", id);
    }
    (StatusCode::OK, Json(json!({})))
}

fn not_found(id: u64) -> (StatusCode, Json<Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "message": format!("User {} not found", id) })),
    )
}
