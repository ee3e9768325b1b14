use crossterm::event::{KeyCode, KeyEvent};

use super::{ViewController, unexpected};
use crate::message::{Effect, Job, JobOutput, JobResult, TaskError};
use crate::model::state::{LoginFocus, LoginState};

impl ViewController for LoginState {
    fn init(&mut self) -> Effect {
        self.spinner.cancel();
        self.error = None;
        Effect::None
    }

    fn handle_key(&mut self, key: KeyEvent) -> Effect {
        if self.spinner.is_active() {
            return Effect::None;
        }
        match key.code {
            KeyCode::Tab | KeyCode::Down => self.focus = self.focus.next(),
            KeyCode::BackTab | KeyCode::Up => self.focus = self.focus.prev(),
            KeyCode::Enter => match self.focus {
                LoginFocus::Username => self.focus = LoginFocus::Password,
                LoginFocus::Password | LoginFocus::Button => return self.submit(),
            },
            _ => match self.focus {
                LoginFocus::Username => {
                    self.username.handle_key(&key);
                }
                LoginFocus::Password => {
                    self.password.handle_key(&key);
                }
                LoginFocus::Button => {}
            },
        }
        Effect::None
    }

    fn handle_result(&mut self, seq: u64, result: JobResult) -> Effect {
        if self.spinner.finish(seq).is_none() {
            return Effect::None;
        }
        match result {
            Ok(JobOutput::Profile(profile)) => {
                self.password.clear();
                self.error = None;
                Effect::LoginSucceeded(profile)
            }
            Ok(_) => unexpected(&mut self.error),
            // 登录请求上的 401 就是凭据错误
            Err(TaskError::SessionExpired) => {
                self.error = Some("Invalid username or password".to_string());
                Effect::None
            }
            Err(TaskError::Failed(message)) => {
                self.error = Some(message);
                Effect::None
            }
        }
    }

    fn is_editing(&self) -> bool {
        self.focus != LoginFocus::Button
    }

    fn tick(&mut self) {
        self.spinner.tick();
    }
}

impl LoginState {
    fn submit(&mut self) -> Effect {
        let username = self.username.value().trim().to_string();
        let password = self.password.value().to_string();
        if username.is_empty() || password.is_empty() {
            self.error = Some("Username and password are required".to_string());
            return Effect::None;
        }
        self.error = None;
        log::info!("Logging in as {username}");
        let seq = self.spinner.start("Logging in...", ());
        Effect::spawn(seq, Job::Login { username, password }.then(Job::Profile))
    }
}

#[cfg(test)]
mod tests {
    use certvault_api::UserProfile;

    use super::*;
    use crate::update::tests::{ch, key};

    fn typed(state: &mut LoginState, text: &str) {
        for c in text.chars() {
            state.handle_key(ch(c));
        }
    }

    #[test]
    fn empty_credentials_are_rejected_locally() {
        let mut state = LoginState::new("http://localhost:1888");
        typed(&mut state, "alice");
        let effect = state.handle_key(key(KeyCode::Enter));
        assert!(effect.is_none());
        assert_eq!(state.focus, LoginFocus::Password);

        let effect = state.handle_key(key(KeyCode::Enter));
        assert!(effect.is_none());
        assert!(state.error.is_some());
        assert!(!state.spinner.is_active());
    }

    #[test]
    fn submit_logs_in_then_loads_profile() {
        let mut state = LoginState::new("http://localhost:1888");
        typed(&mut state, " alice ");
        state.handle_key(key(KeyCode::Tab));
        typed(&mut state, "secret");
        let Effect::Spawn { seq, job } = state.handle_key(key(KeyCode::Enter)) else {
            panic!("expected a job");
        };
        let Job::Then(first, second) = job else {
            panic!("expected a chained job");
        };
        assert!(matches!(*first, Job::Login { ref username, .. } if username == "alice"));
        assert_eq!(second.name(), "profile");

        // 等待期间的按键被忽略
        state.handle_key(ch('x'));
        assert_eq!(state.password.value(), "secret");

        let effect = state.handle_result(seq, Ok(JobOutput::Profile(UserProfile::default())));
        assert!(matches!(effect, Effect::LoginSucceeded(_)));
        assert_eq!(state.password.value(), "");
    }

    #[test]
    fn rejected_credentials_show_inline_error() {
        let mut state = LoginState::new("http://localhost:1888");
        typed(&mut state, "alice");
        state.handle_key(key(KeyCode::Tab));
        typed(&mut state, "wrong");
        let Effect::Spawn { seq, .. } = state.handle_key(key(KeyCode::Enter)) else {
            panic!("expected a job");
        };
        let effect = state.handle_result(seq, Err(TaskError::SessionExpired));
        assert!(effect.is_none());
        assert_eq!(state.error.as_deref(), Some("Invalid username or password"));
    }

    #[test]
    fn stale_result_is_ignored() {
        let mut state = LoginState::new("http://localhost:1888");
        let effect = state.handle_result(42, Ok(JobOutput::Profile(UserProfile::default())));
        assert!(effect.is_none());
    }
}
