//! Menu and list rendering: profile, stage lists, pickers, results,
//! photos.

use storage::models::Participant;
use storage::repository::{
    ParticipantRepository, PhotoRepository, ResultRepository, StageRepository, TeamRepository,
};

use crate::engine::Engine;
use crate::error::BotError;
use crate::flows::team::CREATE_NEW;
use crate::gateway::{Button, Keyboard};
use crate::texts;

impl Engine {
    pub(crate) async fn show_main_menu(&self, user_id: i64) -> Result<(), BotError> {
        let repo = ParticipantRepository::new(self.store());
        match repo.find(user_id).await? {
            None => {
                self.gateway
                    .send_text(user_id, texts::NOT_REGISTERED_YET)
                    .await?;
                Ok(())
            }
            Some((participant, _)) => self.show_profile(user_id, &participant).await,
        }
    }

    pub(crate) async fn show_profile(
        &self,
        user_id: i64,
        p: &Participant,
    ) -> Result<(), BotError> {
        let text = format!(
            "👤 Profile:\n Name: {} {}\n Nick: {}\n Team: {}",
            p.first_name, p.last_name, p.nick, p.team_name
        );
        let keyboard = Keyboard::new(vec![
            vec![Button::new("🏁 Join a stage", "u:stages")],
            vec![
                Button::new("👥 Change team", "u:change_team"),
                Button::new("📅 Calendar", "u:calendar"),
            ],
            vec![
                Button::new("🏆 Results", "u:results"),
                Button::new("📸 Photos", "u:photos"),
            ],
        ]);
        self.gateway.send_keyboard(user_id, &text, keyboard).await?;
        Ok(())
    }

    pub(crate) async fn show_admin_menu(&self, user_id: i64) -> Result<(), BotError> {
        let keyboard = Keyboard::new(vec![
            vec![
                Button::new("➕ Create stage", "a:create_stage"),
                Button::new("📋 List stages", "a:list_stages"),
            ],
            vec![Button::new("📢 Broadcast", "a:broadcast")],
            vec![Button::new("🏠 Main menu", "u:calendar")],
        ]);
        self.gateway
            .send_keyboard(user_id, texts::ADMIN_MENU_TITLE, keyboard)
            .await?;
        Ok(())
    }

    /// Stage cards plus join buttons; admins additionally get the
    /// toggle-registration and CSV-export controls per stage.
    pub(crate) async fn show_stages(&self, user_id: i64, only_open: bool) -> Result<(), BotError> {
        let repo = StageRepository::new(self.store());
        let stages = repo.list(!only_open).await?;
        if stages.is_empty() {
            let text = if only_open {
                texts::NO_OPEN_STAGES
            } else {
                texts::NO_STAGES
            };
            self.gateway.send_text(user_id, text).await?;
            return Ok(());
        }

        let mut text = String::from("🏁 Stages\n");
        for s in &stages {
            let open = if s.is_reg_open() { "open" } else { "closed" };
            text.push_str(&format!(
                "\n{} (id: {})\n 📅 {} {}\n 📍 {}\n Registration: {}\n Price: {}\n",
                s.title, s.stage_id, s.date, s.time, s.place, open, s.price
            ));
            if !s.address.trim().is_empty() {
                text.push_str(&format!(" Address: {}\n", s.address));
            }
        }

        let mut keyboard = Keyboard::default();
        for s in &stages {
            if only_open && !s.is_reg_open() {
                continue;
            }
            keyboard.push_row(vec![Button::new(
                format!("🏁 Join: {}", s.title),
                format!("u:stage_join:{}", s.stage_id),
            )]);
            if self.is_admin(user_id) {
                keyboard.push_row(vec![
                    Button::new("🔓/🔒 Registration", format!("a:toggle_reg:{}", s.stage_id)),
                    Button::new("📤 CSV", format!("a:export:{}", s.stage_id)),
                ]);
            }
        }
        keyboard.push_row(vec![Button::new("🏠 Profile", "u:calendar")]);

        self.gateway.send_keyboard(user_id, &text, keyboard).await?;
        Ok(())
    }

    /// Keyboard of every team plus the create-new option, with the
    /// given payload prefix (`u:pick_team:` or `u:reg_team:`).
    pub(crate) async fn team_keyboard(&self, payload_prefix: &str) -> Result<Keyboard, BotError> {
        let repo = TeamRepository::new(self.store());
        let mut keyboard = Keyboard::default();
        for team in repo.list().await? {
            keyboard.push_row(vec![Button::new(
                team.team_name.clone(),
                format!("{payload_prefix}{}", team.team_name),
            )]);
        }
        keyboard.push_row(vec![Button::new(
            texts::CREATE_TEAM_BUTTON,
            format!("{payload_prefix}{CREATE_NEW}"),
        )]);
        Ok(keyboard)
    }

    pub(crate) async fn show_team_picker(&self, user_id: i64) -> Result<(), BotError> {
        let keyboard = self.team_keyboard("u:pick_team:").await?;
        self.gateway
            .send_keyboard(user_id, texts::PICK_TEAM, keyboard)
            .await?;
        Ok(())
    }

    async fn stage_picker(&self, user_id: i64, prompt: &str, prefix: &str) -> Result<(), BotError> {
        let repo = StageRepository::new(self.store());
        let stages = repo.list(true).await?;
        if stages.is_empty() {
            self.gateway.send_text(user_id, texts::NO_STAGES).await?;
            return Ok(());
        }
        let mut keyboard = Keyboard::default();
        for s in stages {
            keyboard.push_row(vec![Button::new(
                s.title,
                format!("{prefix}{}", s.stage_id),
            )]);
        }
        self.gateway.send_keyboard(user_id, prompt, keyboard).await?;
        Ok(())
    }

    pub(crate) async fn show_results_picker(&self, user_id: i64) -> Result<(), BotError> {
        self.stage_picker(user_id, texts::PICK_STAGE_FOR_RESULTS, "u:result_stage:")
            .await
    }

    pub(crate) async fn show_result(&self, user_id: i64, stage_id: &str) -> Result<(), BotError> {
        let repo = ResultRepository::new(self.store());
        let Some(result) = repo.find(stage_id, user_id).await? else {
            self.gateway.send_text(user_id, texts::NO_RESULTS).await?;
            return Ok(());
        };
        let season_total = repo.sum_points(user_id).await?;
        let text = format!(
            "🏆 Results (stage {stage_id})\n Best time: {}\n Position: {}\n Stage points: {}\n Season points (total): {season_total}",
            result.best_time, result.position, result.points
        );
        self.gateway.send_text(user_id, &text).await?;
        Ok(())
    }

    pub(crate) async fn show_photos_picker(&self, user_id: i64) -> Result<(), BotError> {
        self.stage_picker(user_id, texts::PICK_STAGE_FOR_PHOTOS, "u:photo_stage:")
            .await
    }

    pub(crate) async fn show_photo(&self, user_id: i64, stage_id: &str) -> Result<(), BotError> {
        let repo = PhotoRepository::new(self.store());
        match repo.find(stage_id).await? {
            Some(photo) if !photo.url.trim().is_empty() => {
                self.gateway
                    .send_text(user_id, &format!("📸 Stage photo: {}", photo.url))
                    .await?;
            }
            _ => {
                self.gateway.send_text(user_id, texts::NO_PHOTO).await?;
            }
        }
        Ok(())
    }
}
