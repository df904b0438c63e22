//! Built-in event subscribers for notification and audit side effects.
//!
//! These are fire-and-forget: each logs the side effect it stands in for.
//! A deployment replaces them with real integrations (mail, audit store)
//! by subscribing its own handlers at composition time.

use async_trait::async_trait;

use crate::domain::events::{DomainEvent, EventHandler, EventPayload};

/// Sends a welcome notification when a user is created.
pub struct WelcomeNotificationHandler;

#[async_trait]
impl EventHandler for WelcomeNotificationHandler {
    fn name(&self) -> &'static str {
        "welcome_notification"
    }

    async fn handle(&self, event: &DomainEvent) -> anyhow::Result<()> {
        if let EventPayload::UserCreated { username, email } = &event.payload {
            tracing::info!(%username, %email, "user created, sending welcome notification");
        }
        Ok(())
    }
}

/// Records profile changes for audit.
pub struct AuditLogHandler;

#[async_trait]
impl EventHandler for AuditLogHandler {
    fn name(&self) -> &'static str {
        "audit_log"
    }

    async fn handle(&self, event: &DomainEvent) -> anyhow::Result<()> {
        if let EventPayload::UserUpdated {
            user_id,
            updated_fields,
        } = &event.payload
        {
            tracing::info!(user_id, ?updated_fields, "user updated");
        }
        Ok(())
    }
}

/// Notifies the account owner after a password change.
pub struct PasswordChangedNotificationHandler;

#[async_trait]
impl EventHandler for PasswordChangedNotificationHandler {
    fn name(&self) -> &'static str {
        "password_changed_notification"
    }

    async fn handle(&self, event: &DomainEvent) -> anyhow::Result<()> {
        if let EventPayload::PasswordChanged { user_id } = &event.payload {
            tracing::info!(user_id, "password changed, sending notification");
        }
        Ok(())
    }
}
