//! 证书详情
//!
//! Normal 模式（子模式栈为空）下的单键动作：
//!     a 解析    v 查看证书    e 导出证书
//!     k 查看私钥    K 导出私钥    c 备注    R 续期    D 删除      （SSL / 管理员 CA）
//!     t 启用/停用    b 绑定用户    u 已绑定用户                    （管理员 CA）

use certvault_api::UserProfile;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::{ViewController, parse_days};
use crate::message::{Effect, ExportSource, Job, JobOutput, JobResult, TaskError};
use crate::model::state::report::cert_report;
use crate::model::state::{
    CertDetailState, ChainAction, DetailOp as Op, ExportForm, KeyAction, Mode, PagedList, Subject,
};
use crate::model::widgets::{ConfirmDialog, DialogOutcome, TextInput};

/// 续期默认天数
const SSL_RENEW_DAYS: u32 = 365;
const CA_RENEW_DAYS: u32 = 3650;

/// 子模式按键的结果
enum Step {
    Stay,
    Push(Mode),
    Pop,
    Start { op: Op, label: &'static str, job: Job },
}

impl ViewController for CertDetailState {
    fn init(&mut self) -> Effect {
        self.modes.clear();
        self.spinner.cancel();
        self.error = None;
        Effect::None
    }

    fn handle_key(&mut self, key: KeyEvent) -> Effect {
        if self.spinner.is_active() {
            return Effect::None;
        }
        if self.modes.is_empty() {
            return self.normal_key(&key);
        }
        if key.code == KeyCode::Esc {
            self.pop();
            return Effect::None;
        }
        let step = self.mode_key(&key);
        self.apply(step)
    }

    fn handle_result(&mut self, seq: u64, result: JobResult) -> Effect {
        let Some(op) = self.spinner.finish(seq) else {
            return Effect::None;
        };
        let output = match result {
            Ok(output) => output,
            Err(TaskError::SessionExpired) => return Effect::SessionExpired,
            Err(TaskError::Failed(message)) => {
                self.fail(&op, message);
                return Effect::None;
            }
        };
        self.succeed(op, output)
    }

    fn is_at_root(&self) -> bool {
        self.modes.is_empty()
    }

    fn is_editing(&self) -> bool {
        self.mode().is_some_and(Mode::is_editing)
    }

    fn scroll(&mut self, down: bool) {
        match self.modes.last_mut() {
            Some(
                Mode::Analysis(view) | Mode::ViewCert { view, .. } | Mode::ViewPrivKey { view, .. },
            ) => view.scroll(down),
            Some(Mode::BindSelect(list) | Mode::BoundList(list)) => list.table.scroll(down),
            Some(Mode::ChainSelect { menu, .. }) => menu.scroll(down),
            _ => {}
        }
    }

    fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        let text_height = self.text_height();
        for mode in &mut self.modes {
            match mode {
                Mode::Analysis(view)
                | Mode::ViewCert { view, .. }
                | Mode::ViewPrivKey { view, .. } => view.set_height(text_height),
                Mode::BindSelect(list) | Mode::BoundList(list) => {
                    list.table.set_height(text_height);
                }
                _ => {}
            }
        }
    }

    fn tick(&mut self) {
        self.spinner.tick();
    }
}

impl CertDetailState {
    fn pop(&mut self) {
        if let Some(mode) = self.modes.pop() {
            log::debug!("Leave detail mode {}", mode.name());
        }
    }

    fn start(&mut self, op: Op, label: &'static str, job: Job) -> Effect {
        let seq = self.spinner.start(label, op);
        Effect::spawn(seq, job)
    }

    fn apply(&mut self, step: Step) -> Effect {
        match step {
            Step::Stay => Effect::None,
            Step::Push(mode) => {
                self.modes.push(mode);
                Effect::None
            }
            Step::Pop => {
                self.pop();
                Effect::None
            }
            Step::Start { op, label, job } => self.start(op, label, job),
        }
    }

    fn normal_key(&mut self, key: &KeyEvent) -> Effect {
        if key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
            return Effect::None;
        }
        let managed = self.subject.is_managed();
        let admin_ca = self.subject.is_admin_ca();
        let cert = self.subject.cert_ref();
        self.error = None;

        let step = match key.code {
            KeyCode::Char('a') => Step::Start {
                op: Op::Analyze,
                label: "Analyzing certificate...",
                job: Job::FetchAndAnalyze(cert),
            },
            KeyCode::Char('v') => Step::Push(Mode::chain_select(ChainAction::View)),
            KeyCode::Char('e') => Step::Push(Mode::chain_select(ChainAction::Export)),
            KeyCode::Char('k') if managed => Step::Push(key_prompt(KeyAction::View)),
            KeyCode::Char('K') if managed => Step::Push(key_prompt(KeyAction::Export)),
            KeyCode::Char('c') if managed => Step::Push(Mode::EditComment {
                input: TextInput::with_value(self.subject.comment()),
                error: None,
            }),
            KeyCode::Char('R') if managed => {
                let days = if matches!(self.subject, Subject::Ssl(_)) {
                    SSL_RENEW_DAYS
                } else {
                    CA_RENEW_DAYS
                };
                Step::Push(Mode::Renew {
                    input: TextInput::with_value(days.to_string()),
                    error: None,
                })
            }
            KeyCode::Char('D') if managed => Step::Push(Mode::ConfirmDelete(ConfirmDialog::new(
                "Delete Certificate",
                format!("Delete {}? This cannot be undone.", self.subject.uuid()),
            ))),
            KeyCode::Char('t') if admin_ca => {
                let available = match &self.subject {
                    Subject::AdminCa(ca) => !ca.available,
                    _ => return Effect::None,
                };
                Step::Start {
                    op: Op::Toggle(available),
                    label: "Updating CA...",
                    job: Job::SetAvailable {
                        uuid: cert.uuid,
                        available,
                    },
                }
            }
            KeyCode::Char('b') if admin_ca => {
                let list = self.user_list();
                let job = unbound_users(&cert.uuid, &list, 1);
                self.modes.push(Mode::BindSelect(list));
                Step::Start {
                    op: Op::Users { page: 1, notice: None },
                    label: "Loading users...",
                    job,
                }
            }
            KeyCode::Char('u') if admin_ca => {
                let list = self.user_list();
                let job = bound_users(&cert.uuid, &list, 1);
                self.modes.push(Mode::BoundList(list));
                Step::Start {
                    op: Op::Users { page: 1, notice: None },
                    label: "Loading users...",
                    job,
                }
            }
            _ => Step::Stay,
        };
        self.apply(step)
    }

    fn mode_key(&mut self, key: &KeyEvent) -> Step {
        let cert = self.subject.cert_ref();
        let Some(mode) = self.modes.last_mut() else {
            return Step::Stay;
        };
        match mode {
            Mode::Analysis(view) => {
                view.handle_key(key);
                Step::Stay
            }
            Mode::ChainSelect {
                action,
                menu,
                error,
            } => match menu.handle_key(key) {
                Some(chain) => {
                    *error = None;
                    match action {
                        ChainAction::View => Step::Start {
                            op: Op::Fetch,
                            label: "Fetching certificate...",
                            job: Job::FetchCert { cert, chain },
                        },
                        ChainAction::Export => Step::Push(Mode::ExportPath(ExportForm::new(
                            ExportSource::Remote { cert, chain },
                        ))),
                    }
                }
                None => Step::Stay,
            },
            Mode::ViewCert { pem, view } => {
                if key.code == KeyCode::Char('e') {
                    return Step::Push(Mode::ExportPath(ExportForm::new(ExportSource::Content {
                        text: pem.clone(),
                        private: false,
                    })));
                }
                view.handle_key(key);
                Step::Stay
            }
            Mode::ViewPrivKey { key: pem, view } => {
                if key.code == KeyCode::Char('e') {
                    return Step::Push(Mode::ExportPriv(ExportForm::new(ExportSource::Content {
                        text: pem.clone(),
                        private: true,
                    })));
                }
                view.handle_key(key);
                Step::Stay
            }
            Mode::ExportPath(form) | Mode::ExportPriv(form) => {
                if key.code != KeyCode::Enter {
                    form.input.handle_key(key);
                    return Step::Stay;
                }
                let path = form.input.value().trim().to_string();
                if path.is_empty() {
                    form.error = Some("Path cannot be empty".to_string());
                    return Step::Stay;
                }
                form.error = None;
                Step::Start {
                    op: Op::Export,
                    label: "Exporting...",
                    job: Job::Export {
                        path,
                        source: form.source.clone(),
                    },
                }
            }
            Mode::PrivKeyPass {
                action,
                input,
                error,
            } => {
                if key.code != KeyCode::Enter {
                    input.handle_key(key);
                    return Step::Stay;
                }
                if input.value().is_empty() {
                    *error = Some("Password is required".to_string());
                    return Step::Stay;
                }
                *error = None;
                Step::Start {
                    op: Op::FetchKey(*action),
                    label: "Fetching private key...",
                    job: Job::FetchPrivateKey {
                        cert,
                        password: input.value().to_string(),
                    },
                }
            }
            Mode::BindSelect(list) => {
                if let Some(page) = list.paging_key(key) {
                    return Step::Start {
                        op: Op::Users { page, notice: None },
                        label: "Loading users...",
                        job: unbound_users(&cert.uuid, list, page),
                    };
                }
                if list.table.handle_key(key) || key.code != KeyCode::Enter {
                    return Step::Stay;
                }
                let Some(user) = list.selected() else {
                    return Step::Stay;
                };
                let page = list.pager.page;
                Step::Start {
                    op: Op::Users {
                        page,
                        notice: Some(format!("Bound {}", user.username)),
                    },
                    label: "Binding user...",
                    job: Job::BindUser {
                        ca_uuid: cert.uuid.clone(),
                        username: user.username.clone(),
                    }
                    .then(unbound_users(&cert.uuid, list, page)),
                }
            }
            Mode::BoundList(list) => {
                if let Some(page) = list.paging_key(key) {
                    return Step::Start {
                        op: Op::Users { page, notice: None },
                        label: "Loading users...",
                        job: bound_users(&cert.uuid, list, page),
                    };
                }
                if list.table.handle_key(key) || key.code != KeyCode::Char('d') {
                    return Step::Stay;
                }
                let Some(user) = list.selected() else {
                    return Step::Stay;
                };
                let page = list.pager.page;
                Step::Start {
                    op: Op::Users {
                        page,
                        notice: Some(format!("Unbound {}", user.username)),
                    },
                    label: "Unbinding user...",
                    job: Job::UnbindUser {
                        ca_uuid: cert.uuid.clone(),
                        username: user.username.clone(),
                    }
                    .then(bound_users(&cert.uuid, list, page)),
                }
            }
            Mode::EditComment { input, .. } => {
                if key.code != KeyCode::Enter {
                    input.handle_key(key);
                    return Step::Stay;
                }
                let comment = input.value().trim().to_string();
                Step::Start {
                    op: Op::Comment(comment.clone()),
                    label: "Saving comment...",
                    job: Job::UpdateComment { cert, comment },
                }
            }
            Mode::Renew { input, error } => {
                if key.code != KeyCode::Enter {
                    input.handle_key(key);
                    return Step::Stay;
                }
                match parse_days(input.value().trim(), 0) {
                    Ok(days) => {
                        *error = None;
                        Step::Start {
                            op: Op::Renew,
                            label: "Renewing certificate...",
                            job: Job::Renew { cert, days },
                        }
                    }
                    Err(message) => {
                        *error = Some(message);
                        Step::Stay
                    }
                }
            }
            Mode::ConfirmDelete(dialog) => match dialog.handle_key(key) {
                DialogOutcome::Pending => Step::Stay,
                DialogOutcome::Cancelled => Step::Pop,
                DialogOutcome::Confirmed => Step::Start {
                    op: Op::Delete,
                    label: "Deleting certificate...",
                    job: Job::Delete(cert),
                },
            },
        }
    }

    fn succeed(&mut self, op: Op, output: JobOutput) -> Effect {
        match (op, output) {
            (Op::Analyze, output) => {
                let text = match output {
                    JobOutput::Analysis(analysis) => cert_report(&analysis, self.width),
                    _ => "Error: unexpected response from server".to_string(),
                };
                let view = self.text_view(&text);
                self.modes.push(Mode::Analysis(view));
                Effect::None
            }
            (Op::Fetch, JobOutput::Pem(pem)) => {
                let view = self.text_view(&pem);
                self.replace_top(Mode::ViewCert { pem, view });
                Effect::None
            }
            (Op::Export, JobOutput::Exported(path)) => {
                if let Some(Mode::ExportPath(form) | Mode::ExportPriv(form)) = self.mode_mut() {
                    form.error = None;
                    form.done = Some(path.clone());
                }
                Effect::success(format!("Exported to {}", path.display()))
            }
            (Op::FetchKey(action), JobOutput::PrivateKey(key)) => {
                match action {
                    KeyAction::View => {
                        let view = self.text_view(&key);
                        self.replace_top(Mode::ViewPrivKey { key, view });
                    }
                    KeyAction::Export => {
                        if let Some(Mode::PrivKeyPass { input, .. }) = self.mode_mut() {
                            input.clear();
                        }
                        self.modes
                            .push(Mode::ExportPriv(ExportForm::new(ExportSource::Content {
                                text: key,
                                private: true,
                            })));
                    }
                }
                Effect::None
            }
            (Op::Comment(comment), _) => {
                self.subject.set_comment(comment);
                self.dirty = true;
                self.pop();
                Effect::success("Comment updated")
            }
            (Op::Renew, output) => {
                match output {
                    JobOutput::Ca(ca) => self.subject.replace_ca(ca),
                    JobOutput::Ssl(cert) => self.subject.replace_ssl(cert),
                    _ => {}
                }
                self.dirty = true;
                self.pop();
                Effect::success("Certificate renewed")
            }
            (Op::Delete, _) => {
                log::info!("Deleted certificate {}", self.subject.uuid());
                self.modes.clear();
                Effect::success("Certificate deleted").and(Effect::CloseDetail { reload: true })
            }
            (Op::Toggle(available), _) => {
                if let Subject::AdminCa(ca) = &mut self.subject {
                    ca.available = available;
                }
                self.dirty = true;
                Effect::success(if available { "CA enabled" } else { "CA disabled" })
            }
            (Op::Users { page, notice }, output) => {
                if let Some(Mode::BindSelect(list) | Mode::BoundList(list)) = self.mode_mut() {
                    list.apply(page, output);
                }
                notice.map_or(Effect::None, Effect::success)
            }
            (op, output) => {
                log::warn!("Unexpected output {output:?} for {op:?}");
                self.fail(&op, "Unexpected response from server".to_string());
                Effect::None
            }
        }
    }

    /// 失败信息写到发起操作的子模式里
    fn fail(&mut self, op: &Op, message: String) {
        if *op == Op::Analyze {
            let view = self.text_view(&format!("Error: {message}"));
            self.modes.push(Mode::Analysis(view));
            return;
        }
        // 删除失败时关掉对话框，错误显示在 Normal 模式
        if matches!(self.mode(), Some(Mode::ConfirmDelete(_))) {
            self.modes.pop();
        }
        let slot = match self.modes.last_mut() {
            Some(
                Mode::ChainSelect { error, .. }
                | Mode::PrivKeyPass { error, .. }
                | Mode::EditComment { error, .. }
                | Mode::Renew { error, .. },
            ) => error,
            Some(Mode::ExportPath(form) | Mode::ExportPriv(form)) => &mut form.error,
            Some(Mode::BindSelect(list) | Mode::BoundList(list)) => &mut list.error,
            Some(_) | None => &mut self.error,
        };
        *slot = Some(message);
    }

    fn replace_top(&mut self, mode: Mode) {
        self.modes.pop();
        self.modes.push(mode);
    }
}

fn key_prompt(action: KeyAction) -> Mode {
    Mode::PrivKeyPass {
        action,
        input: TextInput::masked(),
        error: None,
    }
}

fn unbound_users(ca_uuid: &str, list: &PagedList<UserProfile>, page: u32) -> Job {
    Job::ListUnboundUsers {
        ca_uuid: ca_uuid.to_string(),
        page: list.pager.request(page),
    }
}

fn bound_users(ca_uuid: &str, list: &PagedList<UserProfile>, page: u32) -> Job {
    Job::ListBoundUsers {
        ca_uuid: ca_uuid.to_string(),
        page: list.pager.request(page),
    }
}
