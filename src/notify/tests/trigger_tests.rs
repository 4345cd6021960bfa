//! Tests for the overtime notification trigger.

use std::sync::Arc;

use crate::notify::{
    adapters::RecordingDelivery,
    domain::{Notification, NotificationSettings, OVERTIME_TITLE},
    ports::DeliveryError,
    services::NotificationTrigger,
};
use crate::task::domain::{Task, TaskId};
use crate::timer::ports::OvertimeTrigger;
use rstest::{fixture, rstest};

#[fixture]
fn delivery() -> Arc<RecordingDelivery> {
    Arc::new(RecordingDelivery::new())
}

async fn settle() {
    for _ in 0..10 {
        tokio::task::yield_now().await;
    }
}

#[rstest]
#[tokio::test]
async fn overtime_is_delivered_with_task_title(delivery: Arc<RecordingDelivery>) {
    let trigger = NotificationTrigger::new(Arc::clone(&delivery), NotificationSettings::default());
    trigger.remember_titles([&Task::new("t1", "Write report")]);

    trigger.notify_overtime(&TaskId::from("t1"));
    settle().await;

    let delivered = delivery.delivered();
    assert_eq!(delivered.len(), 1);
    let notice = delivered.first().expect("one notification");
    assert_eq!(notice.title, OVERTIME_TITLE);
    assert!(notice.body.contains("Write report"));
    assert!(!notice.silent);
}

#[rstest]
#[tokio::test]
async fn muted_sound_delivers_silently(delivery: Arc<RecordingDelivery>) {
    let settings = NotificationSettings {
        enable_overtime_sound: false,
        ..NotificationSettings::default()
    };
    let trigger = NotificationTrigger::new(Arc::clone(&delivery), settings);

    trigger.notify_overtime(&TaskId::from("t1"));
    settle().await;

    assert_eq!(
        delivery.delivered(),
        vec![Notification::overtime(&TaskId::from("t1"), None, true)]
    );
}

#[rstest]
#[case(NotificationSettings {
    enable_overtime_notifications: false,
    ..NotificationSettings::default()
})]
#[case(NotificationSettings {
    enable_system_notifications: false,
    ..NotificationSettings::default()
})]
#[tokio::test]
async fn disabled_notifications_deliver_nothing(
    #[case] settings: NotificationSettings,
    delivery: Arc<RecordingDelivery>,
) {
    let trigger = NotificationTrigger::new(Arc::clone(&delivery), settings);
    trigger.notify_overtime(&TaskId::from("t1"));
    settle().await;
    assert!(delivery.delivered().is_empty());
}

#[rstest]
#[tokio::test]
async fn delivery_failure_is_swallowed(delivery: Arc<RecordingDelivery>) {
    delivery.fail_with(DeliveryError::Unavailable("headless".to_owned()));
    let trigger = NotificationTrigger::new(Arc::clone(&delivery), NotificationSettings::default());

    trigger.notify_overtime(&TaskId::from("t1"));
    settle().await;

    assert!(delivery.delivered().is_empty());
}

#[rstest]
fn trigger_outside_runtime_drops_notification(delivery: Arc<RecordingDelivery>) {
    let trigger = NotificationTrigger::new(Arc::clone(&delivery), NotificationSettings::default());
    trigger.notify_overtime(&TaskId::from("t1"));
    assert!(delivery.delivered().is_empty());
}
