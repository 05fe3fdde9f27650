use futures::future::join_all;
use mock_api::state::MockState;
use std::sync::Arc;
use tokio::sync::broadcast;
use url::Url;
use users_dashboard::api::{ApiError, HttpUsersApi, UsersApi};
use users_dashboard::controller::UserListController;
use users_dashboard::notify::{Notification, NotificationBus, NotificationEvent};
use users_dashboard::state::OpStatus;
use users_dashboard::{DraftForm, Field, NewUser, UserRecord};

async fn controller_for(state: MockState) -> UserListController<HttpUsersApi> {
    let addr = mock_api::spawn(state).await.unwrap();
    let base = Url::parse(&format!("http://{}", addr)).unwrap();
    let api = HttpUsersApi::new(base, Some(std::time::Duration::from_secs(5))).unwrap();
    UserListController::new(api, NotificationBus::new(16))
}

fn drain(rx: &mut broadcast::Receiver<NotificationEvent>) -> Vec<Notification> {
    let mut seen = Vec::new();
    while let Ok(event) = rx.try_recv() {
        seen.push(event.notification);
    }
    seen
}

fn bob() -> NewUser {
    NewUser {
        first_name: "Bob".into(),
        last_name: "X".into(),
        email: "b@x.com".into(),
        department: "Eng".into(),
    }
}

#[tokio::test]
async fn mount_splits_names_and_fills_department() {
    let controller = controller_for(MockState::seeded()).await;

    assert_eq!(controller.mount().await, Ok(OpStatus::Committed));

    let users = controller.users().await;
    assert_eq!(users.len(), 10);
    assert_eq!(
        users[0],
        UserRecord {
            id: 1,
            first_name: "Leanne".into(),
            last_name: "Graham".into(),
            email: "Sincere@april.biz".into(),
            department: "N/A".into(),
        }
    );
    assert_eq!(users[5].first_name, "Mrs.");
    assert_eq!(users[5].last_name, "Dennis");
}

#[tokio::test]
async fn full_crud_cycle() {
    let controller = controller_for(MockState::seeded()).await;
    controller.mount().await.unwrap();
    let mut rx = controller.notifications().subscribe();

    controller.set_field(Field::FirstName, "Bob").await;
    controller.set_field(Field::LastName, "X").await;
    controller.set_field(Field::Email, "b@x.com").await;
    controller.set_field(Field::Department, "Eng").await;
    controller.submit().await.unwrap();

    let users = controller.users().await;
    assert_eq!(users.len(), 11);
    assert_eq!(users[10], UserRecord::from_new(11, bob()));
    assert_eq!(controller.draft().await, DraftForm::default());

    let created = controller.find(11).await.unwrap();
    controller.edit(&created).await;
    controller.set_field(Field::Department, "Research").await;
    controller.submit().await.unwrap();
    assert_eq!(controller.find(11).await.unwrap().department, "Research");
    assert!(!controller.draft().await.is_editing);

    controller.delete(11).await.unwrap();
    assert!(controller.find(11).await.is_none());
    assert_eq!(controller.users().await.len(), 10);

    assert_eq!(
        drain(&mut rx),
        vec![Notification::Created, Notification::Updated, Notification::Deleted]
    );
}

#[tokio::test]
async fn outage_turns_every_call_into_a_failure_notification() {
    let state = MockState::seeded();
    state.set_failing(true);
    let controller = controller_for(state).await;
    let mut rx = controller.notifications().subscribe();

    assert!(matches!(controller.mount().await, Ok(OpStatus::Failed { .. })));
    assert!(controller.users().await.is_empty());

    controller.set_field(Field::FirstName, "Bob").await;
    controller.submit().await.unwrap();
    assert_eq!(controller.draft().await.first_name, "Bob");

    controller.delete(1).await.unwrap();

    assert_eq!(
        drain(&mut rx),
        vec![
            Notification::FetchFailed,
            Notification::CreateFailed,
            Notification::DeleteFailed,
        ]
    );
}

#[tokio::test]
async fn update_of_record_missing_remotely_fails() {
    let state = MockState::seeded();
    let controller = controller_for(state.clone()).await;
    controller.mount().await.unwrap();
    let mut rx = controller.notifications().subscribe();
    state.users.remove(&4);

    let record = controller.find(4).await.unwrap();
    controller.edit(&record).await;
    controller.set_field(Field::Email, "changed@x.com").await;
    controller.submit().await.unwrap();

    assert_eq!(controller.find(4).await, Some(record));
    assert!(controller.draft().await.is_editing);
    assert_eq!(drain(&mut rx), vec![Notification::UpdateFailed]);
}

#[tokio::test]
async fn concurrent_deletes_on_different_ids_all_commit() {
    let controller = Arc::new(controller_for(MockState::seeded()).await);
    controller.mount().await.unwrap();

    let results = join_all((1..=4).map(|id| {
        let controller = controller.clone();
        async move { controller.delete(id).await }
    }))
    .await;

    assert!(results.into_iter().all(|r| r == Ok(OpStatus::Committed)));
    let ids: Vec<u64> = controller.users().await.iter().map(|u| u.id).collect();
    assert_eq!(ids, vec![5, 6, 7, 8, 9, 10]);
}

#[tokio::test]
async fn unreachable_service_is_a_transport_error() {
    let api = HttpUsersApi::new(
        Url::parse("http://127.0.0.1:9").unwrap(),
        Some(std::time::Duration::from_secs(2)),
    )
    .unwrap();

    assert!(matches!(
        api.list_users().await,
        Err(ApiError::Transport { .. })
    ));
}
