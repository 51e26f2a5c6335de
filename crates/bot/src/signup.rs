//! Stage sign-up and payment reconciliation: the only part of the
//! system with real ordering concerns. All registration writes for a
//! stage run under that stage's lock (see [`crate::locks`]).

use storage::StorageError;
use storage::models::{PayStatus, Registration, Role};
use storage::repository::{ParticipantRepository, RegistrationRepository, StageRepository};

use crate::engine::Engine;
use crate::error::BotError;
use crate::gateway::{Button, Keyboard};
use crate::texts;

/// Team capacity for the `main` role, per stage.
pub const MAX_MAINS_PER_TEAM: usize = 3;

/// Outcome of a processed payment callback, echoed to the caller.
#[derive(Debug, Clone)]
pub struct WebhookReceipt {
    pub stage_id: String,
    pub user_id: i64,
    pub pay_status: PayStatus,
}

impl Engine {
    /// Join a stage. The role decision is point-in-time: `main` iff
    /// the participant's team still has a main slot free on this
    /// stage, and it is never re-evaluated afterwards.
    pub async fn join_stage(&self, user_id: i64, stage_id: &str) -> Result<(), BotError> {
        let stage_lock = self.stage_locks.for_stage(stage_id).await;
        let _guard = stage_lock.lock().await;

        let stage = StageRepository::new(self.store())
            .find(stage_id)
            .await?
            .ok_or(BotError::StageNotFound)?;
        if !stage.is_reg_open() {
            return Err(BotError::RegistrationClosed);
        }

        let registrations = RegistrationRepository::new(self.store());
        if registrations.exists(stage_id, user_id).await? {
            return Err(BotError::AlreadyRegistered);
        }

        let (participant, _) = ParticipantRepository::new(self.store())
            .find(user_id)
            .await?
            .ok_or(BotError::ParticipantNotRegistered)?;

        let mains = registrations
            .count_main_for_team(stage_id, &participant.team_name)
            .await?;
        let role = if mains < MAX_MAINS_PER_TEAM {
            Role::Main
        } else {
            Role::Reserve
        };

        registrations
            .create(&Registration {
                stage_id: stage_id.to_string(),
                user_id,
                team_name: participant.team_name.clone(),
                role,
                pay_status: PayStatus::Unpaid,
                created_at: storage::now_rfc3339(),
            })
            .await?;

        let text = match role {
            Role::Main => texts::JOINED_AS_MAIN,
            Role::Reserve => texts::JOINED_AS_RESERVE,
        };
        let keyboard = Keyboard::new(vec![vec![Button::new(
            texts::PAY_BUTTON,
            format!("u:pay:{stage_id}"),
        )]]);
        self.gateway.send_keyboard(user_id, text, keyboard).await?;
        Ok(())
    }

    pub async fn start_payment(&self, user_id: i64, stage_id: &str) -> Result<(), BotError> {
        let stage = StageRepository::new(self.store())
            .find(stage_id)
            .await?
            .ok_or(BotError::StageNotFound)?;

        let amount = stage.price_or_zero();
        let link = self
            .payments
            .create_payment(stage_id, user_id, &amount)
            .await?;

        let text = format!(
            "Payment for stage {} (id: {stage_id})\nAmount: {amount}\n\nFollow the link:\n{}\n\nThe bot confirms the status automatically after payment.",
            stage.title, link.url
        );
        self.gateway.send_text(user_id, &text).await?;
        Ok(())
    }

    /// Verify and apply one payment callback.
    ///
    /// The pay-status write is a blind overwrite of one cell, so
    /// re-delivery of the same payload lands on the same value; never
    /// creates a registration that the webhook cannot find.
    pub async fn reconcile_webhook(
        &self,
        body: &[u8],
        signature: Option<&str>,
    ) -> Result<WebhookReceipt, BotError> {
        let event = self.payments.handle_webhook(body, signature).await?;

        // Gateway status vocabulary to stored vocabulary: `cancelled`
        // survives, everything else (empty included) means paid.
        let pay_status = if event.status == "cancelled" {
            PayStatus::Cancelled
        } else {
            PayStatus::Paid
        };

        let stage_lock = self.stage_locks.for_stage(&event.stage_id).await;
        {
            let _guard = stage_lock.lock().await;
            RegistrationRepository::new(self.store())
                .update_pay_status(&event.stage_id, event.user_id, pay_status)
                .await
                .map_err(|e| match e {
                    StorageError::NotFound => BotError::RegistrationNotFound,
                    other => BotError::Storage(other),
                })?;
        }

        self.notify_payment(event.user_id, pay_status);

        Ok(WebhookReceipt {
            stage_id: event.stage_id,
            user_id: event.user_id,
            pay_status,
        })
    }

    /// Fire-and-forget: the HTTP response does not wait for the chat
    /// notification; a failed send is logged and not retried.
    fn notify_payment(&self, user_id: i64, status: PayStatus) {
        let gateway = self.gateway.clone();
        tokio::spawn(async move {
            let text = match status {
                PayStatus::Cancelled => texts::PAYMENT_CANCELLED,
                _ => texts::PAYMENT_CONFIRMED,
            };
            if let Err(err) = gateway.send_text(user_id, text).await {
                tracing::error!(user_id, error = %err, "payment notification failed");
            }
        });
    }
}
