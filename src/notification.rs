//! Desktop notifications over the freedesktop D-Bus interface.
//!
//! The command-line host uses these to surface render failures where an
//! interactive embedding would show a blocking alert.

use std::collections::HashMap;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use zbus::{Connection, proxy};

const APP_NAME: &str = "Flowboard";
const EXPIRE_TIMEOUT_MS: i32 = 5000;

#[proxy(
    interface = "org.freedesktop.Notifications",
    default_service = "org.freedesktop.Notifications",
    default_path = "/org/freedesktop/Notifications"
)]
trait Notifications {
    /// Returns the id assigned to the notification.
    fn notify(
        &self,
        app_name: &str,
        replaces_id: u32,
        app_icon: &str,
        summary: &str,
        body: &str,
        actions: Vec<&str>,
        hints: HashMap<&str, zbus::zvariant::Value<'_>>,
        expire_timeout: i32,
    ) -> zbus::Result<u32>;
}

/// Posts a notification on the session bus.
pub async fn send_notification(summary: &str, body: &str, icon: &str) -> zbus::Result<u32> {
    let connection = Connection::session().await?;
    let proxy = NotificationsProxy::new(&connection).await?;
    proxy
        .notify(
            APP_NAME,
            0,
            icon,
            summary,
            body,
            Vec::new(),
            HashMap::new(),
            EXPIRE_TIMEOUT_MS,
        )
        .await
}

/// Reports a failed flowchart render without blocking the caller.
///
/// Only the generic message is shown; renderer details stay in the log.
/// Delivery problems are logged. Await the handle before shutting the
/// runtime down so the message is not lost.
pub fn notify_render_failure(runtime_handle: &Handle, message: &str) -> JoinHandle<()> {
    let body = message.to_string();
    runtime_handle.spawn(async move {
        match send_notification("Flowchart unavailable", &body, "dialog-error").await {
            Ok(id) => log::debug!("Posted render failure notification {}", id),
            Err(err) => log::warn!("Failed to send notification: {}", err),
        }
    })
}

/// Waits for notification tasks before shutdown.
///
/// Tasks that panicked or were cancelled are logged. Returns how many did not
/// finish cleanly.
pub async fn wait_for_deliveries(handles: Vec<JoinHandle<()>>) -> usize {
    let mut failed = 0;
    for handle in handles {
        if let Err(err) = handle.await {
            log::warn!("Notification task failed: {}", err);
            failed += 1;
        }
    }
    failed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn cancelled_deliveries_are_counted() {
        let delivered = tokio::spawn(async {});
        let cancelled = tokio::spawn(std::future::pending::<()>());
        cancelled.abort();

        assert_eq!(wait_for_deliveries(vec![delivered, cancelled]).await, 1);
    }

    #[tokio::test]
    async fn no_deliveries_is_clean() {
        assert_eq!(wait_for_deliveries(Vec::new()).await, 0);
    }
}
