use certvault_api::{UpdateProfileRequest, UserProfile};
use crossterm::event::KeyEvent;

use super::{ViewController, unexpected};
use crate::message::{Effect, Job, JobOutput, JobResult};
use crate::model::PAGE_CHROME;
use crate::model::state::{ProfileOp, ProfileState, profile_field as field};
use crate::model::widgets::{Form, FormOutcome};

impl ViewController for ProfileState {
    fn init(&mut self) -> Effect {
        self.error = None;
        let seq = self.spinner.start("Loading profile...", ProfileOp::Load);
        Effect::spawn(seq, Job::Profile)
    }

    fn handle_key(&mut self, key: KeyEvent) -> Effect {
        if self.spinner.is_active() {
            return Effect::None;
        }
        match self.form.handle_key(&key) {
            FormOutcome::Submit => self.submit(),
            FormOutcome::Consumed | FormOutcome::Ignored => Effect::None,
        }
    }

    fn handle_result(&mut self, seq: u64, result: JobResult) -> Effect {
        let Some(op) = self.spinner.finish(seq) else {
            return Effect::None;
        };
        match result {
            Ok(JobOutput::Profile(user)) => {
                self.reset(user.clone());
                match op {
                    ProfileOp::Load => Effect::ProfileUpdated(user),
                    ProfileOp::Save => {
                        Effect::ProfileUpdated(user).and(Effect::success("Profile updated"))
                    }
                }
            }
            Ok(_) => unexpected(&mut self.error),
            Err(err) => Effect::failure(err, &mut self.error),
        }
    }

    fn is_editing(&self) -> bool {
        true
    }

    fn resize(&mut self, _width: u16, height: u16) {
        self.form.set_height(height.saturating_sub(PAGE_CHROME));
    }

    fn tick(&mut self) {
        self.spinner.tick();
    }
}

impl ProfileState {
    /// 用服务端返回的资料重建表单（清空密码字段）
    fn reset(&mut self, user: UserProfile) {
        let height = self.form.height();
        self.form = ProfileState::form_for(&user);
        self.form.set_height(height);
        self.user = user;
        self.error = None;
    }

    fn submit(&mut self) -> Effect {
        match build_request(&self.form) {
            Ok(request) => {
                self.error = None;
                let seq = self.spinner.start("Saving profile...", ProfileOp::Save);
                Effect::spawn(seq, Job::UpdateProfile(request).then(Job::Profile))
            }
            Err(message) => {
                self.error = Some(message);
                Effect::None
            }
        }
    }
}

fn build_request(form: &Form) -> Result<UpdateProfileRequest, String> {
    let old_password = form.value(field::OLD_PASSWORD);
    let new_password = form.value(field::NEW_PASSWORD);
    if !new_password.is_empty() {
        if old_password.is_empty() {
            return Err("Old password is required to set a new one".to_string());
        }
        if new_password != form.value(field::CONFIRM_PASSWORD) {
            return Err("New passwords do not match".to_string());
        }
    }
    Ok(UpdateProfileRequest {
        display_name: form.trimmed(field::DISPLAY_NAME),
        email: form.trimmed(field::EMAIL),
        old_password: if new_password.is_empty() {
            String::new()
        } else {
            old_password
        },
        new_password,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};

    fn ctrl_s() -> KeyEvent {
        KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL)
    }

    fn loaded() -> ProfileState {
        let user = UserProfile {
            username: "alice".into(),
            display_name: "Alice".into(),
            ..UserProfile::default()
        };
        let mut state = ProfileState::new(user.clone());
        let Effect::Spawn { seq, .. } = state.init() else {
            panic!("expected a job");
        };
        state.handle_result(seq, Ok(JobOutput::Profile(user)));
        state
    }

    #[test]
    fn mismatched_passwords_are_rejected() {
        let mut state = loaded();
        state.form.set_text(field::OLD_PASSWORD, "old");
        state.form.set_text(field::NEW_PASSWORD, "new-1");
        state.form.set_text(field::CONFIRM_PASSWORD, "new-2");
        assert!(state.handle_key(ctrl_s()).is_none());
        assert_eq!(state.error.as_deref(), Some("New passwords do not match"));
    }

    #[test]
    fn new_password_needs_old_password() {
        let mut state = loaded();
        state.form.set_text(field::NEW_PASSWORD, "new");
        state.form.set_text(field::CONFIRM_PASSWORD, "new");
        assert!(state.handle_key(ctrl_s()).is_none());
        assert!(state.error.is_some());
    }

    #[test]
    fn save_reloads_and_clears_passwords() {
        let mut state = loaded();
        state.form.set_text(field::DISPLAY_NAME, "Alice B");
        state.form.set_text(field::OLD_PASSWORD, "old");
        let Effect::Spawn { seq, job } = state.handle_key(ctrl_s()) else {
            panic!("expected a job");
        };
        let Job::Then(first, _) = job else {
            panic!("expected a chained job");
        };
        let Job::UpdateProfile(request) = *first else {
            panic!("wrong job");
        };
        assert_eq!(request.display_name, "Alice B");
        // 不改密码时不发送旧密码
        assert!(request.old_password.is_empty());

        let updated = UserProfile {
            username: "alice".into(),
            display_name: "Alice B".into(),
            ..UserProfile::default()
        };
        let effect = state.handle_result(seq, Ok(JobOutput::Profile(updated)));
        assert!(matches!(effect, Effect::Batch(_)));
        assert_eq!(state.form.value(field::OLD_PASSWORD), "");
        assert_eq!(state.user.display_name, "Alice B");
    }
}
