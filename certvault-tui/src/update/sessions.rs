use crossterm::event::{KeyCode, KeyEvent};

use super::ViewController;
use crate::message::{Effect, Job, JobResult};
use crate::model::PAGE_CHROME;
use crate::model::state::{SessionAction, SessionsOp, SessionsState};
use crate::model::widgets::{ConfirmDialog, DialogOutcome};

impl ViewController for SessionsState {
    fn init(&mut self) -> Effect {
        self.confirm = None;
        self.load(1, None)
    }

    fn refresh(&mut self) -> Effect {
        self.load(self.list.pager.page, None)
    }

    fn scroll(&mut self, down: bool) {
        if self.confirm.is_none() {
            self.list.table.scroll(down);
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Effect {
        if self.spinner.is_active() {
            return Effect::None;
        }
        if let Some((dialog, action)) = self.confirm.as_mut() {
            return match dialog.handle_key(&key) {
                DialogOutcome::Pending => Effect::None,
                DialogOutcome::Cancelled => {
                    self.confirm = None;
                    Effect::None
                }
                DialogOutcome::Confirmed => {
                    let action = action.clone();
                    self.confirm = None;
                    self.run(action)
                }
            };
        }
        if let Some(page) = self.list.paging_key(&key) {
            return self.load(page, None);
        }
        if self.list.table.handle_key(&key) {
            return Effect::None;
        }
        match key.code {
            KeyCode::Char('d') => {
                if let Some(record) = self.list.selected() {
                    let message = format!(
                        "Log out the session from {} ({})?",
                        record.ip_address, record.browser
                    );
                    self.confirm = Some((
                        ConfirmDialog::new("Logout Session", message),
                        SessionAction::Logout(record.uuid.clone()),
                    ));
                }
            }
            KeyCode::Char('L') => {
                self.confirm = Some((
                    ConfirmDialog::new(
                        "Logout All Sessions",
                        "This also ends the current session. Continue?",
                    ),
                    SessionAction::LogoutAll,
                ));
            }
            _ => {}
        }
        Effect::None
    }

    fn handle_result(&mut self, seq: u64, result: JobResult) -> Effect {
        let Some(op) = self.spinner.finish(seq) else {
            return Effect::None;
        };
        match (op, result) {
            (SessionsOp::Load { page, notice }, Ok(output)) => {
                self.list.apply(page, output);
                notice.map_or(Effect::None, Effect::success)
            }
            (SessionsOp::LogoutAll, Ok(_)) => {
                Effect::success("All sessions logged out").and(Effect::LoggedOut)
            }
            (_, Err(err)) => Effect::failure(err, &mut self.list.error),
        }
    }

    fn is_at_root(&self) -> bool {
        self.confirm.is_none()
    }

    fn resize(&mut self, _width: u16, height: u16) {
        self.list.table.set_height(height.saturating_sub(PAGE_CHROME));
    }

    fn tick(&mut self) {
        self.spinner.tick();
    }
}

impl SessionsState {
    fn load(&mut self, page: u32, notice: Option<String>) -> Effect {
        self.list.error = None;
        let request = self.list.pager.request(page);
        let seq = self
            .spinner
            .start("Loading sessions...", SessionsOp::Load { page, notice });
        Effect::spawn(seq, Job::ListLoginRecords(request))
    }

    fn run(&mut self, action: SessionAction) -> Effect {
        self.list.error = None;
        match action {
            SessionAction::Logout(uuid) => {
                let page = self.list.pager.page;
                let op = SessionsOp::Load {
                    page,
                    notice: Some("Session logged out".to_string()),
                };
                let seq = self.spinner.start("Logging out session...", op);
                let reload = Job::ListLoginRecords(self.list.pager.request(page));
                Effect::spawn(seq, Job::LogoutLoginRecord(uuid).then(reload))
            }
            SessionAction::LogoutAll => {
                let seq = self
                    .spinner
                    .start("Logging out all sessions...", SessionsOp::LogoutAll);
                Effect::spawn(seq, Job::LogoutAllSessions)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use certvault_api::{LoginRecord, Page};

    use super::*;
    use crate::message::JobOutput;
    use crate::update::tests::{ch, key};

    fn loaded() -> SessionsState {
        let mut state = SessionsState::default();
        state.resize(80, 30);
        let Effect::Spawn { seq, .. } = state.init() else {
            panic!("expected a job");
        };
        state.handle_result(
            seq,
            Ok(JobOutput::LoginRecords(Page {
                total: 1,
                list: vec![LoginRecord {
                    uuid: "rec-1".into(),
                    ..LoginRecord::default()
                }],
            })),
        );
        state
    }

    #[test]
    fn logout_record_needs_confirmation() {
        let mut state = loaded();
        assert!(state.handle_key(ch('d')).is_none());
        assert!(!state.is_at_root());

        // 默认选中"否"
        assert!(state.handle_key(key(KeyCode::Enter)).is_none());
        assert!(state.confirm.is_none());

        state.handle_key(ch('d'));
        let Effect::Spawn { job, .. } = state.handle_key(ch('y')) else {
            panic!("expected a job");
        };
        let Job::Then(first, _) = job else {
            panic!("expected a chained job");
        };
        assert!(matches!(*first, Job::LogoutLoginRecord(ref uuid) if uuid == "rec-1"));
    }

    #[test]
    fn logout_all_returns_to_login() {
        let mut state = loaded();
        state.handle_key(ch('L'));
        let Effect::Spawn { seq, .. } = state.handle_key(ch('y')) else {
            panic!("expected a job");
        };
        let Effect::Batch(effects) = state.handle_result(seq, Ok(JobOutput::Done)) else {
            panic!("expected toast and logout");
        };
        assert!(matches!(effects[1], Effect::LoggedOut));
    }
}
