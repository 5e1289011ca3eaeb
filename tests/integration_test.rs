//! Integration tests for Sentinel
//!
//! Exercise the full core pipeline the way the server wires it:
//! Service -> Repository -> SQLite, plus Service -> EventBus -> Observer.

use std::sync::Arc;

use sentinel_core::{
    topics, Database, EventBus, NewUser, NotificationKind, NotificationManagement,
    NotificationRepository, NotificationService, Role, UserManagement, UserRepository,
    UserService, WelcomeObserver,
};
use tempfile::TempDir;

struct Harness {
    users: UserService,
    notifications: NotificationService,
    _dir: TempDir,
}

async fn wire() -> Harness {
    let dir = TempDir::new().unwrap();
    let db = Database::from_path(&dir.path().join("sentinel.db"))
        .await
        .unwrap();

    let user_repo = UserRepository::new(&db);
    let notification_repo = NotificationRepository::new(&db);

    let observer_notifications = Arc::new(NotificationService::new(
        notification_repo.clone(),
        user_repo.clone(),
        Arc::new(EventBus::default()),
    ));
    let bus = Arc::new(
        EventBus::builder()
            .subscribe(
                topics::USER_CREATED,
                Arc::new(WelcomeObserver::new(observer_notifications)),
            )
            .build(),
    );

    Harness {
        users: UserService::new(user_repo.clone(), bus.clone()),
        notifications: NotificationService::new(notification_repo, user_repo, bus),
        _dir: dir,
    }
}

fn driver(name: &str, email: &str) -> NewUser {
    NewUser {
        name: name.to_string(),
        email: email.to_string(),
        password: "secret".to_string(),
        role: Some(Role::Driver),
    }
}

#[tokio::test]
async fn test_signup_pipeline_produces_welcome_notification() {
    let harness = wire().await;

    let user = harness
        .users
        .create_user(driver("Alice", "alice@x.com"))
        .await
        .unwrap();

    let inbox = harness.notifications.list_for_user(user.id).await.unwrap();
    assert_eq!(inbox.len(), 1);
    assert_eq!(inbox[0].kind, NotificationKind::Success);
    assert_eq!(inbox[0].user_id, user.id);
    assert!(inbox[0].message.contains("Alice"));
}

#[tokio::test]
async fn test_each_signup_gets_its_own_welcome() {
    let harness = wire().await;

    let alice = harness
        .users
        .create_user(driver("Alice", "alice@x.com"))
        .await
        .unwrap();
    let bob = harness
        .users
        .create_user(driver("Bob", "bob@x.com"))
        .await
        .unwrap();

    let alice_inbox = harness.notifications.list_for_user(alice.id).await.unwrap();
    let bob_inbox = harness.notifications.list_for_user(bob.id).await.unwrap();

    assert_eq!(alice_inbox.len(), 1);
    assert_eq!(bob_inbox.len(), 1);
    assert!(bob_inbox[0].message.contains("Bob"));
}

#[tokio::test]
async fn test_user_removal_leaves_no_orphan_notifications() {
    let harness = wire().await;

    let alice = harness
        .users
        .create_user(driver("Alice", "alice@x.com"))
        .await
        .unwrap();
    let bob = harness
        .users
        .create_user(driver("Bob", "bob@x.com"))
        .await
        .unwrap();

    harness.users.delete_user(alice.id).await.unwrap();

    let remaining = harness.notifications.list_notifications().await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].user_id, bob.id);
}

#[tokio::test]
async fn test_read_tracking_across_the_stack() {
    let harness = wire().await;

    let user = harness
        .users
        .create_user(driver("Alice", "alice@x.com"))
        .await
        .unwrap();

    // Welcome notification starts unread
    let count = harness.notifications.mark_all_read(user.id).await.unwrap();
    assert_eq!(count, 1);

    let inbox = harness.notifications.list_for_user(user.id).await.unwrap();
    assert!(inbox.iter().all(|n| n.is_read));
}
