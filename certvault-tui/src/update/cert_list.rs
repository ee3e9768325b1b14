//! CA 列表与 SSL 证书列表
//!
//! 两者结构相同：分页表格，enter 打开详情。SSL 列表多一个 n 跳转到申请页。

use crossterm::event::{KeyCode, KeyEvent};

use super::ViewController;
use crate::message::{Effect, Job, JobResult};
use crate::model::state::{CaListState, CertListState, Subject};
use crate::model::{PAGE_CHROME, ViewId};

impl ViewController for CaListState {
    fn init(&mut self) -> Effect {
        self.load(1)
    }

    fn refresh(&mut self) -> Effect {
        self.load(self.list.pager.page)
    }

    fn scroll(&mut self, down: bool) {
        self.list.table.scroll(down);
    }

    fn handle_key(&mut self, key: KeyEvent) -> Effect {
        if self.spinner.is_active() {
            return Effect::None;
        }
        if let Some(page) = self.list.paging_key(&key) {
            return self.load(page);
        }
        if self.list.table.handle_key(&key) {
            return Effect::None;
        }
        match (key.code, self.list.selected()) {
            (KeyCode::Enter, Some(ca)) => Effect::OpenDetail(Subject::UserCa(ca.clone())),
            _ => Effect::None,
        }
    }

    fn handle_result(&mut self, seq: u64, result: JobResult) -> Effect {
        let Some(page) = self.spinner.finish(seq) else {
            return Effect::None;
        };
        match result {
            Ok(output) => {
                self.list.apply(page, output);
                Effect::None
            }
            Err(err) => Effect::failure(err, &mut self.list.error),
        }
    }

    fn resize(&mut self, _width: u16, height: u16) {
        self.list.table.set_height(height.saturating_sub(PAGE_CHROME));
    }

    fn tick(&mut self) {
        self.spinner.tick();
    }
}

impl CaListState {
    fn load(&mut self, page: u32) -> Effect {
        self.list.error = None;
        let request = self.list.pager.request(page);
        let seq = self.spinner.start("Loading CAs...", page);
        Effect::spawn(seq, Job::ListUserCas(request))
    }
}

impl ViewController for CertListState {
    fn init(&mut self) -> Effect {
        self.load(1)
    }

    fn refresh(&mut self) -> Effect {
        self.load(self.list.pager.page)
    }

    fn scroll(&mut self, down: bool) {
        self.list.table.scroll(down);
    }

    fn handle_key(&mut self, key: KeyEvent) -> Effect {
        if self.spinner.is_active() {
            return Effect::None;
        }
        if let Some(page) = self.list.paging_key(&key) {
            return self.load(page);
        }
        if self.list.table.handle_key(&key) {
            return Effect::None;
        }
        match (key.code, self.list.selected()) {
            (KeyCode::Enter, Some(cert)) => Effect::OpenDetail(Subject::Ssl(cert.clone())),
            (KeyCode::Char('n'), _) => Effect::Navigate(ViewId::CertRequest),
            _ => Effect::None,
        }
    }

    fn handle_result(&mut self, seq: u64, result: JobResult) -> Effect {
        let Some(page) = self.spinner.finish(seq) else {
            return Effect::None;
        };
        match result {
            Ok(output) => {
                self.list.apply(page, output);
                Effect::None
            }
            Err(err) => Effect::failure(err, &mut self.list.error),
        }
    }

    fn resize(&mut self, _width: u16, height: u16) {
        self.list.table.set_height(height.saturating_sub(PAGE_CHROME));
    }

    fn tick(&mut self) {
        self.spinner.tick();
    }
}

impl CertListState {
    fn load(&mut self, page: u32) -> Effect {
        self.list.error = None;
        let request = self.list.pager.request(page);
        let seq = self.spinner.start("Loading certificates...", page);
        Effect::spawn(seq, Job::ListSslCerts(request))
    }
}

#[cfg(test)]
mod tests {
    use certvault_api::{Page, SslCert};

    use super::*;
    use crate::message::{JobOutput, TaskError};
    use crate::update::tests::{ch, key};

    fn certs(n: usize, total: u64) -> JobOutput {
        JobOutput::SslPage(Page {
            total,
            list: (0..n)
                .map(|i| SslCert {
                    uuid: format!("cert-{i}"),
                    ..SslCert::default()
                })
                .collect(),
        })
    }

    fn loaded(total: u64) -> CertListState {
        let mut state = CertListState::default();
        state.resize(80, 30);
        let Effect::Spawn { seq, .. } = state.init() else {
            panic!("expected a job");
        };
        state.handle_result(seq, Ok(certs(20, total)));
        state
    }

    #[test]
    fn enter_opens_selected_certificate() {
        let mut state = loaded(20);
        state.handle_key(key(KeyCode::Down));
        let Effect::OpenDetail(Subject::Ssl(cert)) = state.handle_key(key(KeyCode::Enter)) else {
            panic!("expected detail");
        };
        assert_eq!(cert.uuid, "cert-1");
    }

    #[test]
    fn next_page_requests_page_two() {
        let mut state = loaded(45);
        let Effect::Spawn { job, .. } = state.handle_key(ch(']')) else {
            panic!("expected a job");
        };
        let Job::ListSslCerts(request) = job else {
            panic!("wrong job");
        };
        assert_eq!(request.page, 2);
    }

    #[test]
    fn keys_are_ignored_while_loading() {
        let mut state = CertListState::default();
        state.init();
        assert!(state.handle_key(ch('r')).is_none());
        assert!(state.handle_key(ch('n')).is_none());
    }

    #[test]
    fn superseded_page_result_is_dropped() {
        let mut state = loaded(45);
        let Effect::Spawn { seq: old, .. } = state.handle_key(ch(']')) else {
            panic!("expected a job");
        };
        // 重新进入视图会取消等待中的加载
        let Effect::Spawn { seq: new, .. } = state.init() else {
            panic!("expected a job");
        };
        assert!(state.handle_result(old, Ok(certs(5, 45))).is_none());
        assert_eq!(state.list.pager.page, 1);

        let effect = state.handle_result(new, Err(TaskError::SessionExpired));
        assert!(matches!(effect, Effect::SessionExpired));
    }
}
