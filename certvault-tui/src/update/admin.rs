//! 管理员视图
//!
//! 菜单 → 用户列表 / CA 管理 / 申请 CA / 导入 CA。
//! CA 管理中 enter 打开共用的证书详情（管理员模式）。

use certvault_api::{PageRequest, RequestCaCertRequest};
use crossterm::event::{KeyCode, KeyEvent};

use super::{ViewController, parse_days, parse_key_size, unexpected};
use crate::message::{Effect, Job, JobOutput, JobResult};
use crate::model::state::{
    AdminMode, AdminOp, AdminSection, AdminState, CaRequestForm, PARENT_PAGE_SIZE, PagedList,
    Subject, ca_field, import_field, import_form,
};
use crate::model::widgets::{Form, FormOutcome};

/// CA 默认有效期（天）
const DEFAULT_CA_EXPIRY_DAYS: u32 = 3650;

impl ViewController for AdminState {
    fn init(&mut self) -> Effect {
        self.spinner.cancel();
        self.error = None;
        self.mode = AdminMode::Menu;
        Effect::None
    }

    fn refresh(&mut self) -> Effect {
        match &self.mode {
            AdminMode::Cas(list) => {
                let page = list.pager.page;
                self.load_cas(page)
            }
            AdminMode::Users(list) => {
                let page = list.pager.page;
                self.load_users(page)
            }
            _ => Effect::None,
        }
    }

    fn scroll(&mut self, down: bool) {
        match &mut self.mode {
            AdminMode::Menu => self.menu.scroll(down),
            AdminMode::Users(list) => list.table.scroll(down),
            AdminMode::Cas(list) => list.table.scroll(down),
            _ => {}
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Effect {
        if self.spinner.is_active() {
            return Effect::None;
        }
        if key.code == KeyCode::Esc && !self.is_at_root() {
            self.mode = AdminMode::Menu;
            self.error = None;
            return Effect::None;
        }
        match &mut self.mode {
            AdminMode::Menu => match self.menu.handle_key(&key) {
                Some(section) => self.enter(section),
                None => Effect::None,
            },
            AdminMode::Users(list) => {
                if let Some(page) = list.paging_key(&key) {
                    return self.load_users(page);
                }
                list.table.handle_key(&key);
                Effect::None
            }
            AdminMode::Cas(list) => {
                if let Some(page) = list.paging_key(&key) {
                    return self.load_cas(page);
                }
                if list.table.handle_key(&key) {
                    return Effect::None;
                }
                match (key.code, list.selected()) {
                    (KeyCode::Enter, Some(ca)) => Effect::OpenDetail(Subject::AdminCa(ca.clone())),
                    _ => Effect::None,
                }
            }
            AdminMode::RequestCa(request) => match request.form.handle_key(&key) {
                FormOutcome::Submit => match build_ca_request(request) {
                    Ok(req) => {
                        self.error = None;
                        let seq = self.spinner.start("Requesting CA...", AdminOp::RequestCa);
                        Effect::spawn(seq, Job::RequestCa(req))
                    }
                    Err(message) => {
                        self.error = Some(message);
                        Effect::None
                    }
                },
                FormOutcome::Consumed | FormOutcome::Ignored => Effect::None,
            },
            AdminMode::ImportCa(form) => match form.handle_key(&key) {
                FormOutcome::Submit => match build_import(form) {
                    Ok(job) => {
                        self.error = None;
                        let seq = self.spinner.start("Importing CA...", AdminOp::ImportCa);
                        Effect::spawn(seq, job)
                    }
                    Err(message) => {
                        self.error = Some(message);
                        Effect::None
                    }
                },
                FormOutcome::Consumed | FormOutcome::Ignored => Effect::None,
            },
        }
    }

    fn handle_result(&mut self, seq: u64, result: JobResult) -> Effect {
        let Some(op) = self.spinner.finish(seq) else {
            return Effect::None;
        };
        let output = match result {
            Ok(output) => output,
            Err(err) => {
                let slot = match &mut self.mode {
                    AdminMode::Users(list) => &mut list.error,
                    AdminMode::Cas(list) => &mut list.error,
                    _ => &mut self.error,
                };
                return Effect::failure(err, slot);
            }
        };
        if matches!(op, AdminOp::RequestCa | AdminOp::ImportCa) {
            return self.created(op, output);
        }
        match (op, &mut self.mode) {
            (AdminOp::Users { page }, AdminMode::Users(list)) => list.apply(page, output),
            (AdminOp::Cas { page }, AdminMode::Cas(list)) => list.apply(page, output),
            (AdminOp::Parents, AdminMode::RequestCa(request)) => match output {
                JobOutput::CaPage(page) => request.set_parents(&page.list),
                _ => return unexpected(&mut self.error),
            },
            // 子模式已经切换，结果不再相关
            (op, _) => log::debug!("Dropping admin result for {op:?}"),
        }
        Effect::None
    }

    fn is_at_root(&self) -> bool {
        matches!(self.mode, AdminMode::Menu)
    }

    fn is_editing(&self) -> bool {
        matches!(self.mode, AdminMode::RequestCa(_) | AdminMode::ImportCa(_))
    }

    fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        let body = self.body_height();
        match &mut self.mode {
            AdminMode::Menu => {}
            AdminMode::Users(list) => list.table.set_height(body),
            AdminMode::Cas(list) => list.table.set_height(body),
            AdminMode::RequestCa(request) => request.form.set_height(body),
            AdminMode::ImportCa(form) => form.set_height(body),
        }
    }

    fn tick(&mut self) {
        self.spinner.tick();
    }
}

impl AdminState {
    fn enter(&mut self, section: AdminSection) -> Effect {
        let body = self.body_height();
        self.error = None;
        match section {
            AdminSection::Users => {
                let mut list = PagedList::new();
                list.table.set_height(body);
                self.mode = AdminMode::Users(list);
                self.load_users(1)
            }
            AdminSection::Cas => {
                let mut list = PagedList::new();
                list.table.set_height(body);
                self.mode = AdminMode::Cas(list);
                self.load_cas(1)
            }
            AdminSection::RequestCa => {
                let mut request = CaRequestForm::new();
                request.form.set_height(body);
                self.mode = AdminMode::RequestCa(request);
                let seq = self.spinner.start("Loading parent CAs...", AdminOp::Parents);
                Effect::spawn(
                    seq,
                    Job::ListAdminCas(PageRequest::new(1, PARENT_PAGE_SIZE)),
                )
            }
            AdminSection::ImportCa => {
                let mut form = import_form();
                form.set_height(body);
                self.mode = AdminMode::ImportCa(form);
                Effect::None
            }
        }
    }

    /// 申请或导入成功后回到 CA 列表
    fn created(&mut self, op: AdminOp, output: JobOutput) -> Effect {
        let JobOutput::Ca(ca) = output else {
            return unexpected(&mut self.error);
        };
        let notice = if op == AdminOp::RequestCa {
            "CA requested"
        } else {
            "CA imported"
        };
        log::info!("{notice}: {}", ca.uuid);
        self.error = None;
        Effect::success(notice).and(self.enter(AdminSection::Cas))
    }

    fn load_users(&mut self, page: u32) -> Effect {
        let AdminMode::Users(list) = &mut self.mode else {
            return Effect::None;
        };
        list.error = None;
        let request = list.pager.request(page);
        let seq = self.spinner.start("Loading users...", AdminOp::Users { page });
        Effect::spawn(seq, Job::ListUsers(request))
    }

    fn load_cas(&mut self, page: u32) -> Effect {
        let AdminMode::Cas(list) = &mut self.mode else {
            return Effect::None;
        };
        list.error = None;
        let request = list.pager.request(page);
        let seq = self.spinner.start("Loading CAs...", AdminOp::Cas { page });
        Effect::spawn(seq, Job::ListAdminCas(request))
    }
}

fn build_ca_request(request: &CaRequestForm) -> Result<RequestCaCertRequest, String> {
    let form = &request.form;
    if let Some(label) = form.missing_required() {
        return Err(format!("{label} is required"));
    }
    let algorithm = form.value(ca_field::ALGORITHM);
    let key_size = parse_key_size(&algorithm, &form.trimmed(ca_field::KEY_SIZE))?;
    let expiry = parse_days(&form.trimmed(ca_field::EXPIRY), DEFAULT_CA_EXPIRY_DAYS)?;
    Ok(RequestCaCertRequest {
        ca_uuid: request.parent_uuid(),
        allow_sub_ca: form.flag(ca_field::ALLOW_SUB_CA),
        algorithm,
        key_size,
        country: form.trimmed(ca_field::COUNTRY),
        province: form.trimmed(ca_field::PROVINCE),
        city: form.trimmed(ca_field::CITY),
        organization: form.trimmed(ca_field::ORGANIZATION),
        organizational_unit: form.trimmed(ca_field::ORGANIZATIONAL_UNIT),
        common_name: form.trimmed(ca_field::COMMON_NAME),
        expiry,
        comment: form.trimmed(ca_field::COMMENT),
    })
}

fn build_import(form: &Form) -> Result<Job, String> {
    if let Some(label) = form.missing_required() {
        return Err(format!("{label} is required"));
    }
    Ok(Job::ImportCa {
        cert_path: form.trimmed(import_field::CERT_PATH),
        key_path: form.trimmed(import_field::KEY_PATH),
        comment: form.trimmed(import_field::COMMENT),
    })
}
