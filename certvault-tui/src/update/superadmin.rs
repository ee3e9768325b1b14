//! 超级管理员视图
//!
//! 子模式栈（空即菜单）：
//!     All Sessions            d 强制下线
//!     User Management         c 新建  e 编辑  R 角色  D 删除  enter 该用户的会话
//!         └─ UserForm / RoleForm / Sessions(user)
//!
//! 写操作之后总是重新加载所在的列表，表单在重新加载成功后关闭。

use certvault_api::{CreateUserRequest, PageRequest, Role, UpdateUserRequest};
use crossterm::event::{KeyCode, KeyEvent};

use super::ViewController;
use crate::message::{Effect, Job, JobResult};
use crate::model::state::{
    PagedList, SuperAction, SuperMode, SuperOp, SuperSection, SuperadminState, UserFormKind,
    create_user_form, edit_field, edit_user_form, role_form, user_field,
};
use crate::model::widgets::{ConfirmDialog, DialogOutcome, Form, FormOutcome};

impl ViewController for SuperadminState {
    fn init(&mut self) -> Effect {
        self.spinner.cancel();
        self.modes.clear();
        self.confirm = None;
        self.error = None;
        Effect::None
    }

    fn refresh(&mut self) -> Effect {
        match self.modes.last() {
            Some(SuperMode::Sessions { list, .. }) => {
                let page = list.pager.page;
                self.load_sessions(page, None)
            }
            Some(SuperMode::Users(list)) => {
                let page = list.pager.page;
                self.load_users(page, None, false)
            }
            _ => Effect::None,
        }
    }

    fn scroll(&mut self, down: bool) {
        if self.confirm.is_some() {
            return;
        }
        match self.modes.last_mut() {
            None => self.menu.scroll(down),
            Some(SuperMode::Sessions { list, .. }) => list.table.scroll(down),
            Some(SuperMode::Users(list)) => list.table.scroll(down),
            Some(_) => {}
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
        if key.code == KeyCode::Esc && !self.modes.is_empty() {
            self.modes.pop();
            self.error = None;
            return Effect::None;
        }
        let body = self.body_height();
        let Some(mode) = self.modes.last_mut() else {
            return match self.menu.handle_key(&key) {
                Some(SuperSection::Sessions) => self.open_sessions(None),
                Some(SuperSection::Users) => {
                    let mut list = PagedList::new();
                    list.table.set_height(body);
                    self.modes.push(SuperMode::Users(list));
                    self.load_users(1, None, false)
                }
                None => Effect::None,
            };
        };

        match mode {
            SuperMode::Sessions { list, .. } => {
                if let Some(page) = list.paging_key(&key) {
                    return self.load_sessions(page, None);
                }
                if list.table.handle_key(&key) {
                    return Effect::None;
                }
                if let (KeyCode::Char('d'), Some(session)) = (key.code, list.selected()) {
                    self.confirm = Some((
                        ConfirmDialog::new(
                            "Force Logout",
                            format!("Force logout all sessions of {}?", session.username),
                        ),
                        SuperAction::ForceLogout(session.username.clone()),
                    ));
                }
                Effect::None
            }
            SuperMode::Users(list) => {
                if let Some(page) = list.paging_key(&key) {
                    return self.load_users(page, None, false);
                }
                if list.table.handle_key(&key) {
                    return Effect::None;
                }
                if key.code == KeyCode::Char('c') {
                    let mut form = create_user_form();
                    form.set_height(body);
                    self.error = None;
                    self.modes.push(SuperMode::UserForm {
                        kind: UserFormKind::Create,
                        form,
                    });
                    return Effect::None;
                }
                let Some(user) = list.selected().cloned() else {
                    return Effect::None;
                };
                self.error = None;
                match key.code {
                    KeyCode::Enter => return self.open_sessions(Some(user.username)),
                    KeyCode::Char('e') => {
                        let mut form = edit_user_form(&user);
                        form.set_height(body);
                        self.modes.push(SuperMode::UserForm {
                            kind: UserFormKind::Edit(user.username),
                            form,
                        });
                    }
                    KeyCode::Char('R') => {
                        let mut form = role_form(&user);
                        form.set_height(body);
                        self.modes.push(SuperMode::RoleForm {
                            username: user.username,
                            form,
                        });
                    }
                    KeyCode::Char('D') => {
                        self.confirm = Some((
                            ConfirmDialog::new(
                                "Delete User",
                                format!("Delete user {}? This cannot be undone.", user.username),
                            ),
                            SuperAction::DeleteUser(user.username),
                        ));
                    }
                    _ => {}
                }
                Effect::None
            }
            SuperMode::UserForm { kind, form } => {
                if form.handle_key(&key) != FormOutcome::Submit {
                    return Effect::None;
                }
                let built = match kind {
                    UserFormKind::Create => build_create(form).map(|req| {
                        let notice = format!("User {} created", req.username);
                        (Job::CreateUser(req), notice)
                    }),
                    UserFormKind::Edit(username) => Ok((
                        Job::UpdateUser {
                            username: username.clone(),
                            req: build_update(form),
                        },
                        format!("User {username} updated"),
                    )),
                };
                match built {
                    Ok((job, notice)) => self.write_user(job, notice),
                    Err(message) => {
                        self.error = Some(message);
                        Effect::None
                    }
                }
            }
            SuperMode::RoleForm { username, form } => {
                if form.handle_key(&key) != FormOutcome::Submit {
                    return Effect::None;
                }
                let Some(role) = selected_role(form, 0) else {
                    self.error = Some("Role is required".to_string());
                    return Effect::None;
                };
                let notice = format!("{username} is now {}", role.name());
                let job = Job::UpdateRole {
                    username: username.clone(),
                    role: role.code(),
                };
                self.write_user(job, notice)
            }
        }
    }

    fn handle_result(&mut self, seq: u64, result: JobResult) -> Effect {
        let Some(op) = self.spinner.finish(seq) else {
            return Effect::None;
        };
        let output = match result {
            Ok(output) => output,
            Err(err) => {
                let slot = match self.modes.last_mut() {
                    Some(SuperMode::Sessions { list, .. }) => &mut list.error,
                    Some(SuperMode::Users(list)) => &mut list.error,
                    _ => &mut self.error,
                };
                return Effect::failure(err, slot);
            }
        };
        match op {
            SuperOp::Sessions { page, notice } => {
                if let Some(SuperMode::Sessions { list, .. }) = self.modes.last_mut() {
                    list.apply(page, output);
                }
                notice.map_or(Effect::None, Effect::success)
            }
            SuperOp::Users {
                page,
                notice,
                from_form,
            } => {
                if from_form && self.modes.last().is_some_and(SuperMode::is_form) {
                    self.modes.pop();
                    self.error = None;
                }
                if let Some(SuperMode::Users(list)) = self.modes.last_mut() {
                    list.apply(page, output);
                }
                notice.map_or(Effect::None, Effect::success)
            }
        }
    }

    fn is_at_root(&self) -> bool {
        self.modes.is_empty() && self.confirm.is_none()
    }

    fn is_editing(&self) -> bool {
        self.modes.last().is_some_and(SuperMode::is_form)
    }

    fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        let body = self.body_height();
        for mode in &mut self.modes {
            match mode {
                SuperMode::Sessions { list, .. } => list.table.set_height(body),
                SuperMode::Users(list) => list.table.set_height(body),
                SuperMode::UserForm { form, .. } | SuperMode::RoleForm { form, .. } => {
                    form.set_height(body);
                }
            }
        }
    }

    fn tick(&mut self) {
        self.spinner.tick();
    }
}

impl SuperadminState {
    fn open_sessions(&mut self, user: Option<String>) -> Effect {
        let mut list = PagedList::new();
        list.table.set_height(self.body_height());
        self.modes.push(SuperMode::Sessions { list, user });
        self.load_sessions(1, None)
    }

    /// 当前会话列表的加载任务
    fn sessions_job(&self, page: u32) -> Option<Job> {
        let Some(SuperMode::Sessions { list, user }) = self.modes.last() else {
            return None;
        };
        let request = list.pager.request(page);
        Some(match user {
            Some(username) => Job::ListSessionsOf {
                username: username.clone(),
                page: request,
            },
            None => Job::ListAllSessions(request),
        })
    }

    fn load_sessions(&mut self, page: u32, notice: Option<String>) -> Effect {
        let Some(job) = self.sessions_job(page) else {
            return Effect::None;
        };
        if let Some(SuperMode::Sessions { list, .. }) = self.modes.last_mut() {
            list.error = None;
        }
        let seq = self
            .spinner
            .start("Loading sessions...", SuperOp::Sessions { page, notice });
        Effect::spawn(seq, job)
    }

    /// 用户列表（表单打开时取表单下面的那一层）
    fn users_page(&self) -> Option<(u32, PageRequest)> {
        self.modes.iter().rev().find_map(|mode| match mode {
            SuperMode::Users(list) => Some((list.pager.page, list.pager.request(list.pager.page))),
            _ => None,
        })
    }

    fn load_users(&mut self, page: u32, notice: Option<String>, from_form: bool) -> Effect {
        let Some(SuperMode::Users(list)) = self.modes.last_mut() else {
            return Effect::None;
        };
        list.error = None;
        let request = list.pager.request(page);
        let op = SuperOp::Users {
            page,
            notice,
            from_form,
        };
        let seq = self.spinner.start("Loading users...", op);
        Effect::spawn(seq, Job::ListUsers(request))
    }

    /// 表单提交：写入后重新加载用户列表
    fn write_user(&mut self, job: Job, notice: String) -> Effect {
        let Some((page, request)) = self.users_page() else {
            return Effect::None;
        };
        self.error = None;
        let op = SuperOp::Users {
            page,
            notice: Some(notice),
            from_form: true,
        };
        let seq = self.spinner.start("Saving user...", op);
        Effect::spawn(seq, job.then(Job::ListUsers(request)))
    }

    fn run(&mut self, action: SuperAction) -> Effect {
        match action {
            SuperAction::ForceLogout(username) => {
                let Some(SuperMode::Sessions { list, .. }) = self.modes.last() else {
                    return Effect::None;
                };
                let page = list.pager.page;
                let Some(reload) = self.sessions_job(page) else {
                    return Effect::None;
                };
                log::info!("Force logout {username}");
                let op = SuperOp::Sessions {
                    page,
                    notice: Some(format!("{username} logged out")),
                };
                let seq = self.spinner.start("Logging out...", op);
                Effect::spawn(seq, Job::ForceLogout(username).then(reload))
            }
            SuperAction::DeleteUser(username) => {
                let Some((page, request)) = self.users_page() else {
                    return Effect::None;
                };
                log::info!("Delete user {username}");
                let op = SuperOp::Users {
                    page,
                    notice: Some(format!("User {username} deleted")),
                    from_form: false,
                };
                let seq = self.spinner.start("Deleting user...", op);
                Effect::spawn(seq, Job::DeleteUser(username).then(Job::ListUsers(request)))
            }
        }
    }
}

fn selected_role(form: &Form, index: usize) -> Option<Role> {
    let selected = form.selector(index)?.index()?;
    Role::ALL.get(selected).copied()
}

fn build_create(form: &Form) -> Result<CreateUserRequest, String> {
    if let Some(label) = form.missing_required() {
        return Err(format!("{label} is required"));
    }
    let role = selected_role(form, user_field::ROLE).unwrap_or(Role::User);
    Ok(CreateUserRequest {
        username: form.trimmed(user_field::USERNAME),
        display_name: form.trimmed(user_field::DISPLAY_NAME),
        email: form.trimmed(user_field::EMAIL),
        password: form.value(user_field::PASSWORD),
        role: role.code(),
    })
}

/// 空字段不提交，保持原值
fn build_update(form: &Form) -> UpdateUserRequest {
    UpdateUserRequest {
        display_name: form.trimmed(edit_field::DISPLAY_NAME),
        email: form.trimmed(edit_field::EMAIL),
        password: form.value(edit_field::PASSWORD),
    }
}

#[cfg(test)]
mod tests {
    use certvault_api::{AllSession, Page, UserProfile};
    use crossterm::event::KeyModifiers;

    use super::*;
    use crate::message::JobOutput;
    use crate::update::tests::{ch, key};

    fn ctrl_s() -> KeyEvent {
        KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL)
    }

    fn users_page() -> JobOutput {
        JobOutput::UserPage(Page {
            total: 2,
            list: vec![
                UserProfile {
                    username: "alice".into(),
                    role: 1,
                    ..UserProfile::default()
                },
                UserProfile {
                    username: "bob".into(),
                    role: 2,
                    ..UserProfile::default()
                },
            ],
        })
    }

    /// 打开用户列表并加载一页
    fn with_users() -> SuperadminState {
        let mut state = SuperadminState::default();
        state.resize(100, 30);
        state.handle_key(key(KeyCode::Down));
        let Effect::Spawn { seq, job } = state.handle_key(key(KeyCode::Enter)) else {
            panic!("expected a load");
        };
        assert_eq!(job.name(), "list_users");
        state.handle_result(seq, Ok(users_page()));
        state
    }

    #[test]
    fn role_change_reloads_and_closes_form() {
        let mut state = with_users();
        state.handle_key(ch('R'));
        assert!(state.is_editing());
        // User → Admin
        state.handle_key(key(KeyCode::Right));
        let Effect::Spawn { seq, job } = state.handle_key(ctrl_s()) else {
            panic!("expected a write");
        };
        let Job::Then(first, next) = job else {
            panic!("expected a chained job");
        };
        assert!(matches!(*first, Job::UpdateRole { ref username, role: 2 } if username == "alice"));
        assert_eq!(next.name(), "list_users");

        let effect = state.handle_result(seq, Ok(users_page()));
        assert!(matches!(effect, Effect::Toast(..)));
        assert!(matches!(state.modes.last(), Some(SuperMode::Users(_))));
    }

    #[test]
    fn failed_create_keeps_form_open() {
        let mut state = with_users();
        state.handle_key(ch('c'));
        assert!(state.handle_key(ctrl_s()).is_none());
        assert_eq!(state.error.as_deref(), Some("Username is required"));

        let Some(SuperMode::UserForm { form, .. }) = state.modes.last_mut() else {
            panic!("expected user form");
        };
        form.set_text(user_field::USERNAME, "carol");
        form.set_text(user_field::PASSWORD, "pw");
        let Effect::Spawn { seq, .. } = state.handle_key(ctrl_s()) else {
            panic!("expected a write");
        };
        state.handle_result(seq, Err(crate::message::TaskError::Failed("exists".into())));
        assert_eq!(state.error.as_deref(), Some("exists"));
        assert!(state.is_editing());
    }

    #[test]
    fn delete_goes_through_dialog() {
        let mut state = with_users();
        state.handle_key(key(KeyCode::Down));
        assert!(state.handle_key(ch('D')).is_none());
        assert!(!state.is_at_root());
        let Effect::Spawn { job, .. } = state.handle_key(ch('y')) else {
            panic!("expected delete");
        };
        let Job::Then(first, _) = job else {
            panic!("expected a chained job");
        };
        assert!(matches!(*first, Job::DeleteUser(ref name) if name == "bob"));
    }

    #[test]
    fn enter_shows_sessions_of_user_and_force_logout_reloads_them() {
        let mut state = with_users();
        let Effect::Spawn { seq, job } = state.handle_key(key(KeyCode::Enter)) else {
            panic!("expected sessions load");
        };
        assert!(matches!(job, Job::ListSessionsOf { ref username, .. } if username == "alice"));
        state.handle_result(
            seq,
            Ok(JobOutput::Sessions(Page {
                total: 1,
                list: vec![AllSession {
                    username: "alice".into(),
                    ..AllSession::default()
                }],
            })),
        );
        state.handle_key(ch('d'));
        let Effect::Spawn { job, .. } = state.handle_key(ch('y')) else {
            panic!("expected force logout");
        };
        let Job::Then(first, next) = job else {
            panic!("expected a chained job");
        };
        assert!(matches!(*first, Job::ForceLogout(ref name) if name == "alice"));
        assert_eq!(next.name(), "list_sessions_of");
    }

    #[test]
    fn esc_walks_back_to_menu() {
        let mut state = with_users();
        state.handle_key(ch('e'));
        state.handle_key(key(KeyCode::Esc));
        assert!(matches!(state.modes.last(), Some(SuperMode::Users(_))));
        state.handle_key(key(KeyCode::Esc));
        assert!(state.is_at_root());
    }
}
