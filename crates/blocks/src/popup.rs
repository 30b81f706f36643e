//! Block popups shown as desktop notifications.
//!
//! Opening sends `Notify` with no expiry, refreshing re-sends it with the
//! same `replaces_id`, closing calls `CloseNotification`.

use bar_core::{BarError, Popup, Result};
use futures::future::BoxFuture;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;
use zbus::zvariant::Value;

const APP_NAME: &str = "blockbar";

/// Never expire; the popup stays until its block toggles it off.
const NO_EXPIRY: i32 = 0;

#[zbus::proxy(
    interface = "org.freedesktop.Notifications",
    default_service = "org.freedesktop.Notifications",
    default_path = "/org/freedesktop/Notifications"
)]
trait Notifications {
    fn notify(
        &self,
        app_name: &str,
        replaces_id: u32,
        app_icon: &str,
        summary: &str,
        body: &str,
        actions: &[&str],
        hints: HashMap<&str, Value<'_>>,
        expire_timeout: i32,
    ) -> zbus::Result<u32>;

    fn close_notification(&self, id: u32) -> zbus::Result<()>;
}

/// What a popup shows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PopupBody {
    pub summary: String,
    pub body: String,
}

/// Produces fresh popup content on open and on every refresh.
pub type Render = Arc<dyn Fn() -> BoxFuture<'static, Result<PopupBody>> + Send + Sync>;

fn dbus_err(e: zbus::Error) -> BarError {
    BarError::Action(format!("notification: {e}"))
}

/// A popup backed by one notification on the session bus.
pub struct NotificationPopup {
    proxy: NotificationsProxy<'static>,
    id: u32,
    render: Render,
}

impl NotificationPopup {
    /// Render once and show the notification.
    pub async fn open(render: Render) -> Result<Box<dyn Popup>> {
        let conn = zbus::Connection::session().await.map_err(dbus_err)?;
        let proxy = NotificationsProxy::new(&conn).await.map_err(dbus_err)?;
        let content = render().await?;
        let id = send(&proxy, 0, &content).await?;
        debug!(id, "popup opened");
        Ok(Box::new(Self { proxy, id, render }))
    }
}

async fn send(proxy: &NotificationsProxy<'_>, replaces: u32, content: &PopupBody) -> Result<u32> {
    proxy
        .notify(
            APP_NAME,
            replaces,
            "",
            &content.summary,
            &content.body,
            &[],
            HashMap::new(),
            NO_EXPIRY,
        )
        .await
        .map_err(dbus_err)
}

impl Popup for NotificationPopup {
    fn refresh(&self) -> BoxFuture<'_, Result<()>> {
        Box::pin(async move {
            let content = (self.render)().await?;
            send(&self.proxy, self.id, &content).await.map(drop)
        })
    }

    fn destroy(self: Box<Self>) -> BoxFuture<'static, Result<()>> {
        Box::pin(async move {
            debug!(id = self.id, "popup closed");
            self.proxy
                .close_notification(self.id)
                .await
                .map_err(dbus_err)
        })
    }
}
