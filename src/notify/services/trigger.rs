//! Overtime trigger that hands notifications to a delivery channel.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tokio::runtime::Handle;

use crate::notify::{
    domain::{Notification, NotificationSettings},
    ports::NotificationDelivery,
};
use crate::task::domain::{Task, TaskId};
use crate::timer::ports::OvertimeTrigger;

/// Turns overtime crossings into fire-and-forget deliveries.
///
/// Deliveries run on the tokio runtime captured at construction, so the
/// timer engine never waits on the channel. Delivery failures are logged.
pub struct NotificationTrigger<D>
where
    D: NotificationDelivery + 'static,
{
    delivery: Arc<D>,
    settings: NotificationSettings,
    handle: Option<Handle>,
    titles: RwLock<HashMap<TaskId, String>>,
}

impl<D> NotificationTrigger<D>
where
    D: NotificationDelivery + 'static,
{
    /// Creates a trigger bound to the current tokio runtime, if any.
    #[must_use]
    pub fn new(delivery: Arc<D>, settings: NotificationSettings) -> Self {
        Self {
            delivery,
            settings,
            handle: Handle::try_current().ok(),
            titles: RwLock::new(HashMap::new()),
        }
    }

    /// Binds deliveries to `handle`.
    #[must_use]
    pub fn with_handle(mut self, handle: Handle) -> Self {
        self.handle = Some(handle);
        self
    }

    /// Returns the active settings.
    #[must_use]
    pub const fn settings(&self) -> &NotificationSettings {
        &self.settings
    }

    /// Records task titles so notifications can name tasks.
    pub fn remember_titles<'a>(&self, tasks: impl IntoIterator<Item = &'a Task>) {
        let mut titles = self.titles.write();
        for task in tasks {
            titles.insert(task.id().clone(), task.title().to_owned());
        }
    }
}

impl<D> OvertimeTrigger for NotificationTrigger<D>
where
    D: NotificationDelivery + 'static,
{
    fn notify_overtime(&self, task_id: &TaskId) {
        if !self.settings.delivers() {
            tracing::debug!(task_id = %task_id, "overtime notifications disabled");
            return;
        }
        let Some(handle) = self.handle.as_ref() else {
            tracing::warn!(task_id = %task_id, "no async runtime; overtime notification dropped");
            return;
        };
        let notification = Notification::overtime(
            task_id,
            self.titles.read().get(task_id).map(String::as_str),
            self.settings.silent(),
        );
        let delivery = Arc::clone(&self.delivery);
        let task_id = task_id.clone();
        handle.spawn(async move {
            if let Err(err) = delivery.deliver(&notification).await {
                tracing::warn!(task_id = %task_id, error = %err, "overtime notification failed");
            }
        });
    }
}
