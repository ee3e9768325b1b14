use crossterm::event::{KeyCode, KeyEvent};

use super::{ViewController, unexpected};
use crate::message::{Effect, Job, JobOutput, JobResult};
use crate::model::state::DashboardState;

impl ViewController for DashboardState {
    fn init(&mut self) -> Effect {
        self.load()
    }

    fn refresh(&mut self) -> Effect {
        self.load()
    }

    fn handle_key(&mut self, key: KeyEvent) -> Effect {
        if self.spinner.is_active() {
            return Effect::None;
        }
        match key.code {
            KeyCode::Char('r') | KeyCode::F(5) => self.load(),
            _ => Effect::None,
        }
    }

    fn handle_result(&mut self, seq: u64, result: JobResult) -> Effect {
        if self.spinner.finish(seq).is_none() {
            return Effect::None;
        }
        match result {
            Ok(JobOutput::Stats(stats)) => {
                self.stats = Some(stats);
                Effect::None
            }
            Ok(_) => unexpected(&mut self.error),
            Err(err) => Effect::failure(err, &mut self.error),
        }
    }

    fn tick(&mut self) {
        self.spinner.tick();
    }
}

impl DashboardState {
    fn load(&mut self) -> Effect {
        self.error = None;
        let seq = self.spinner.start("Loading statistics...", ());
        Effect::spawn(
            seq,
            Job::DashboardStats {
                admin: self.user.is_admin(),
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use certvault_api::UserProfile;

    use super::*;
    use crate::message::{DashboardStats, TaskError};

    #[test]
    fn admin_flag_follows_role() {
        let mut state = DashboardState::new(UserProfile {
            role: 2,
            ..UserProfile::default()
        });
        let Effect::Spawn { job, .. } = state.init() else {
            panic!("expected a job");
        };
        assert!(matches!(job, Job::DashboardStats { admin: true }));
    }

    #[test]
    fn failure_keeps_previous_stats() {
        let mut state = DashboardState::new(UserProfile::default());
        let Effect::Spawn { seq, .. } = state.init() else {
            panic!("expected a job");
        };
        let stats = DashboardStats {
            ca_count: 2,
            ssl_count: 5,
            ..DashboardStats::default()
        };
        state.handle_result(seq, Ok(JobOutput::Stats(stats.clone())));

        let Effect::Spawn { seq, .. } = state.refresh() else {
            panic!("expected a job");
        };
        let effect = state.handle_result(seq, Err(TaskError::Failed("offline".into())));
        assert!(effect.is_none());
        assert_eq!(state.stats, Some(stats));
        assert_eq!(state.error.as_deref(), Some("offline"));
    }
}
