//! Event observers
//!
//! Handlers registered on the bus at startup. Currently one: the welcome
//! notification created in reaction to `user.created`.

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use tracing::info;

use crate::entities::{NewNotification, NotificationKind};
use crate::error::{Error, Result};
use crate::event_bus::EventHandler;
use crate::services::NotificationManagement;

/// Title of the signup welcome notification.
pub const WELCOME_TITLE: &str = "¡Bienvenido a Sentinel!";

/// Body of the signup welcome notification.
pub fn welcome_message(username: &str) -> String {
    format!(
        "Hola {}, tu cuenta ha sido creada exitosamente. \
         Estamos felices de tenerte en nuestro sistema de gestión de flotas.",
        username
    )
}

/// Creates a welcome notification for every `user.created` event.
pub struct WelcomeObserver {
    notifications: Arc<dyn NotificationManagement>,
}

impl WelcomeObserver {
    /// Create an observer writing through `notifications`.
    pub fn new(notifications: Arc<dyn NotificationManagement>) -> Self {
        Self { notifications }
    }
}

#[async_trait]
impl EventHandler for WelcomeObserver {
    fn name(&self) -> &str {
        "welcome_notification"
    }

    async fn handle(&self, payload: &Value) -> Result<()> {
        let user_id = payload
            .get("user_id")
            .and_then(Value::as_i64)
            .ok_or(Error::Payload("user_id"))?;
        let username = payload
            .get("username")
            .and_then(Value::as_str)
            .ok_or(Error::Payload("username"))?;

        self.notifications
            .create_notification(NewNotification {
                user_id,
                title: WELCOME_TITLE.to_string(),
                message: welcome_message(username),
                kind: NotificationKind::Success,
            })
            .await?;

        info!(user_id, "welcome notification sent");
        Ok(())
    }
}
