use mock_api::{spawn, state::MockState};
use reqwest::StatusCode;
use serde_json::{json, Value};

async fn base_url(state: MockState) -> String {
    let addr = spawn(state).await.unwrap();
    format!("http://{}", addr)
}

#[tokio::test]
async fn lists_seeded_users() {
    let base = base_url(MockState::seeded()).await;

    let users: Vec<Value> = reqwest::get(format!("{}/users", base))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(users.len(), 10);
    assert_eq!(users[0], json!({ "id": 1, "name": "Leanne Graham", "email": "Sincere@april.biz" }));
}

#[tokio::test]
async fn create_echoes_body_with_new_id() {
    let state = MockState::seeded();
    let base = base_url(state.clone()).await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/users", base))
        .json(&json!({
            "firstName": "Bob",
            "lastName": "X",
            "email": "b@x.com",
            "department": "Eng"
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["id"], 11);
    assert_eq!(body["department"], "Eng");
    assert_eq!(state.users.get(&11).unwrap().name, "Bob X");
}

#[tokio::test]
async fn update_of_unknown_user_is_not_found() {
    let base = base_url(MockState::new()).await;

    let response = reqwest::Client::new()
        .put(format!("{}/users/5", base))
        .json(&json!({ "id": 5, "firstName": "Nobody" }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_replaces_stored_user() {
    let state = MockState::seeded();
    let base = base_url(state.clone()).await;

    let response = reqwest::Client::new()
        .put(format!("{}/users/2", base))
        .json(&json!({
            "id": 2,
            "firstName": "Ervin",
            "lastName": "Howell",
            "email": "ervin@x.com",
            "department": "Ops"
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let stored = state.users.get(&2).unwrap().clone();
    assert_eq!(stored.email, "ervin@x.com");
    assert_eq!(stored.extra["department"], "Ops");
}

#[tokio::test]
async fn delete_succeeds_for_any_id() {
    let state = MockState::seeded();
    let base = base_url(state.clone()).await;
    let client = reqwest::Client::new();

    for id in [3, 3, 404] {
        let response = client
            .delete(format!("{}/users/{}", base, id))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
    assert_eq!(state.list().len(), 9);
}

#[tokio::test]
async fn outage_switch_fails_every_route() {
    let state = MockState::seeded();
    let base = base_url(state.clone()).await;
    state.set_failing(true);

    let response = reqwest::get(format!("{}/users", base)).await.unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    state.set_failing(false);
    let response = reqwest::get(format!("{}/users/1", base)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
