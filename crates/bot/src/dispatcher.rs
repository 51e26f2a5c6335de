use storage::StorageError;
use storage::repository::{ParticipantRepository, StageRepository};

use crate::engine::Engine;
use crate::error::BotError;
use crate::flows;
use crate::gateway::{ChatEvent, EventKind};
use crate::session::{AfterTeamCreate, Flow, ParticipantDraft, RegStep, StageDraft, StageStep};
use crate::texts;
use crate::token::export_token;

impl Engine {
    /// Route one inbound event. Every handled event produces exactly
    /// one outbound message or keyboard; failures degrade to a
    /// user-visible message and are never retried.
    pub async fn handle_event(&self, event: ChatEvent) {
        let user_id = event.user_id;
        let result = match event.kind {
            EventKind::Command(cmd) => self.on_command(user_id, &cmd).await,
            EventKind::Text(text) => self.on_text(user_id, text.trim()).await,
            EventKind::Button(payload) => self.on_button(user_id, &payload).await,
        };
        if let Err(err) = result {
            self.report_error(user_id, err).await;
        }
    }

    async fn report_error(&self, user_id: i64, err: BotError) {
        if let BotError::Transport(e) = &err {
            tracing::error!(user_id, error = %e, "outbound send failed");
            return;
        }
        let text = match err.user_message() {
            Some(msg) => msg,
            None => {
                tracing::error!(user_id, error = %err, "event handling failed");
                texts::SOMETHING_WENT_WRONG
            }
        };
        if let Err(e) = self.gateway.send_text(user_id, text).await {
            tracing::error!(user_id, error = %e, "outbound send failed");
        }
    }

    async fn on_command(&self, user_id: i64, command: &str) -> Result<(), BotError> {
        match command {
            "start" => self.cmd_start(user_id).await,
            "admin" => self.cmd_admin(user_id).await,
            _ => self.show_main_menu(user_id).await,
        }
    }

    /// `/start`: explicit reset. Unregistered users drop into the
    /// registration flow, everyone else gets their profile.
    async fn cmd_start(&self, user_id: i64) -> Result<(), BotError> {
        self.sessions.clear(user_id).await;
        let repo = ParticipantRepository::new(self.store());
        match repo.find(user_id).await? {
            None => {
                self.sessions
                    .put(
                        user_id,
                        Flow::Registration {
                            step: RegStep::FirstName,
                            draft: ParticipantDraft::default(),
                        },
                    )
                    .await;
                self.gateway
                    .send_text(user_id, texts::GREETING_ASK_FIRST_NAME)
                    .await?;
                Ok(())
            }
            Some((participant, _)) => self.show_profile(user_id, &participant).await,
        }
    }

    async fn cmd_admin(&self, user_id: i64) -> Result<(), BotError> {
        if !self.is_admin(user_id) {
            self.gateway.send_text(user_id, texts::ACCESS_DENIED).await?;
            return Ok(());
        }
        self.sessions.clear(user_id).await;
        self.show_admin_menu(user_id).await
    }

    /// Free text goes to the active flow; without one it falls back to
    /// menu navigation. On failure the flow state is restored so the
    /// user can retry the same step.
    async fn on_text(&self, user_id: i64, text: &str) -> Result<(), BotError> {
        let Some(flow) = self.sessions.take(user_id).await else {
            return self.show_main_menu(user_id).await;
        };
        let original = flow.clone();
        let result = match flow {
            Flow::Registration { step, draft } => {
                flows::registration::on_text(self, user_id, text, step, draft).await
            }
            Flow::TeamCreate { then } => flows::team::on_text(self, user_id, text, then).await,
            Flow::CreateStage { step, draft } => {
                flows::create_stage::on_text(self, user_id, text, step, draft).await
            }
            Flow::Broadcast => flows::broadcast::on_text(self, user_id, text).await,
        };
        if result.is_err() {
            self.sessions.put(user_id, original).await;
        }
        result
    }

    async fn on_button(&self, user_id: i64, payload: &str) -> Result<(), BotError> {
        if let Some(action) = payload.strip_prefix("u:") {
            self.on_user_button(user_id, action).await
        } else if let Some(action) = payload.strip_prefix("a:") {
            if !self.is_admin(user_id) {
                self.gateway.send_text(user_id, texts::ACCESS_DENIED).await?;
                return Ok(());
            }
            self.on_admin_button(user_id, action).await
        } else {
            // Unknown namespace: stale keyboard from another build.
            Ok(())
        }
    }

    async fn on_user_button(&self, user_id: i64, action: &str) -> Result<(), BotError> {
        match action {
            "stages" => return self.show_stages(user_id, true).await,
            "calendar" => return self.show_stages(user_id, false).await,
            "change_team" => return self.show_team_picker(user_id).await,
            "results" => return self.show_results_picker(user_id).await,
            "photos" => return self.show_photos_picker(user_id).await,
            _ => {}
        }

        if let Some(team) = action.strip_prefix("reg_team:") {
            return flows::registration::on_team_selected(self, user_id, team).await;
        }
        if let Some(team) = action.strip_prefix("pick_team:") {
            return self.pick_team(user_id, team).await;
        }
        if let Some(stage_id) = action.strip_prefix("stage_join:") {
            return self.join_stage(user_id, stage_id).await;
        }
        if let Some(stage_id) = action.strip_prefix("pay:") {
            return self.start_payment(user_id, stage_id).await;
        }
        if let Some(stage_id) = action.strip_prefix("result_stage:") {
            return self.show_result(user_id, stage_id).await;
        }
        if let Some(stage_id) = action.strip_prefix("photo_stage:") {
            return self.show_photo(user_id, stage_id).await;
        }
        Ok(())
    }

    /// Team switch from the profile menu.
    async fn pick_team(&self, user_id: i64, team: &str) -> Result<(), BotError> {
        if team == flows::team::CREATE_NEW {
            self.sessions
                .put(
                    user_id,
                    Flow::TeamCreate {
                        then: AfterTeamCreate::UpdateProfile,
                    },
                )
                .await;
            self.gateway.send_text(user_id, texts::ASK_TEAM_NAME).await?;
            return Ok(());
        }
        let repo = ParticipantRepository::new(self.store());
        repo.update_team(user_id, team).await.map_err(|e| match e {
            StorageError::NotFound => BotError::ParticipantNotRegistered,
            other => BotError::Storage(other),
        })?;
        self.gateway
            .send_text(user_id, &format!("✅ Team updated: {team}. Press /start"))
            .await?;
        Ok(())
    }

    async fn on_admin_button(&self, user_id: i64, action: &str) -> Result<(), BotError> {
        match action {
            "menu" => return self.show_admin_menu(user_id).await,
            "list_stages" => return self.show_stages(user_id, false).await,
            "create_stage" => {
                self.sessions
                    .put(
                        user_id,
                        Flow::CreateStage {
                            step: StageStep::Id,
                            draft: StageDraft::default(),
                        },
                    )
                    .await;
                self.gateway.send_text(user_id, texts::ASK_STAGE_ID).await?;
                return Ok(());
            }
            "broadcast" => {
                self.sessions.put(user_id, Flow::Broadcast).await;
                self.gateway
                    .send_text(user_id, texts::ASK_BROADCAST_TEXT)
                    .await?;
                return Ok(());
            }
            _ => {}
        }

        if let Some(stage_id) = action.strip_prefix("toggle_reg:") {
            return self.toggle_registration(user_id, stage_id).await;
        }
        if let Some(stage_id) = action.strip_prefix("export:") {
            return self.send_export_link(user_id, stage_id).await;
        }
        Ok(())
    }

    async fn toggle_registration(&self, user_id: i64, stage_id: &str) -> Result<(), BotError> {
        let repo = StageRepository::new(self.store());
        let stage = repo.find(stage_id).await?.ok_or(BotError::StageNotFound)?;
        let open = !stage.is_reg_open();
        repo.set_reg_open(stage_id, open).await?;
        let text = if open {
            format!("✅ Registration opened for stage {stage_id}")
        } else {
            format!("✅ Registration closed for stage {stage_id}")
        };
        self.gateway.send_text(user_id, &text).await?;
        Ok(())
    }

    /// Issue a capability-token-gated CSV export link.
    async fn send_export_link(&self, user_id: i64, stage_id: &str) -> Result<(), BotError> {
        let token = export_token(&self.options.webhook_secret, stage_id);
        let base = if self.options.base_public_url.is_empty() {
            format!("http://localhost{}", self.options.http_addr)
        } else {
            self.options.base_public_url.clone()
        };
        let url = format!("{base}/export/stage.csv?stage_id={stage_id}&token={token}");
        self.gateway
            .send_text(user_id, &format!("📤 CSV export link: {url}"))
            .await?;
        Ok(())
    }
}
