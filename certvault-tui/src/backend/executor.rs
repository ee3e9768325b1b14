//! 异步任务执行器
//!
//! Update 层返回的 [`Command`] 都在这里落地：任务在独立的 tokio 任务中执行，
//! 计时器睡眠后投递消息。两者都只通过 mpsc 队列回到主循环。

use std::sync::Arc;

use certvault_api::{CertVaultApi, ChainOption, ImportCaRequest, PageRequest};
use futures::future::{BoxFuture, FutureExt};
use tokio::sync::mpsc::UnboundedSender;

use super::export::{read_input_file, write_export};
use crate::message::{
    AppMessage, CertKind, CertRef, Command, DashboardStats, ExportSource, Job, JobOutput,
    JobResult, TaskError,
};

/// 运行时：把 Command 变成 tokio 任务
#[derive(Clone)]
pub struct Executor {
    api: Arc<dyn CertVaultApi>,
    tx: UnboundedSender<AppMessage>,
}

impl Executor {
    pub fn new(api: Arc<dyn CertVaultApi>, tx: UnboundedSender<AppMessage>) -> Self {
        Self { api, tx }
    }

    /// 执行一条命令；不等待结果
    pub fn dispatch(&self, command: Command) {
        match command {
            Command::Run { ticket, job } => {
                log::debug!("dispatch {job:?} for {ticket:?}");
                let api = Arc::clone(&self.api);
                let tx = self.tx.clone();
                tokio::spawn(async move {
                    let result = run(api.as_ref(), job).await;
                    if let Err(err) = &result {
                        log::debug!("job for {ticket:?} failed: {err}");
                    }
                    // 接收端已关闭说明主循环已退出
                    let _ = tx.send(AppMessage::JobFinished { ticket, result });
                });
            }
            Command::Timer { delay, msg } => {
                let tx = self.tx.clone();
                tokio::spawn(async move {
                    tokio::time::sleep(delay).await;
                    let _ = tx.send(msg);
                });
            }
        }
    }
}

fn unsupported(what: &str) -> TaskError {
    TaskError::Failed(format!("{what} is not available for this certificate"))
}

fn io_failure(what: &str, err: &std::io::Error) -> TaskError {
    TaskError::Failed(format!("{what}: {err}"))
}

async fn fetch_cert(
    api: &dyn CertVaultApi,
    cert: &CertRef,
    chain: ChainOption,
) -> Result<String, TaskError> {
    let pem = match cert.kind {
        CertKind::UserCa => api.user_ca_cert(&cert.uuid, chain).await?,
        CertKind::AdminCa => api.admin_ca_cert(&cert.uuid, chain).await?,
        CertKind::Ssl => api.ssl_cert(&cert.uuid, chain).await?,
    };
    Ok(pem)
}

async fn dashboard_stats(api: &dyn CertVaultApi, admin: bool) -> Result<DashboardStats, TaskError> {
    let first_row = PageRequest::new(1, 1);
    let (cas, certs) = futures::try_join!(
        api.list_user_cas(first_row),
        api.list_ssl_certs(first_row)
    )?;
    let mut stats = DashboardStats {
        ca_count: cas.total,
        ssl_count: certs.total,
        ..DashboardStats::default()
    };
    if admin {
        let (users, managed) = futures::try_join!(api.count_users(), api.count_cas())?;
        stats.user_count = Some(users);
        stats.managed_ca_count = Some(managed);
    }
    Ok(stats)
}

/// 执行一个任务
///
/// 返回装箱的 future：`Job::Then` 需要递归调用自身。
pub fn run(api: &dyn CertVaultApi, job: Job) -> BoxFuture<'_, JobResult> {
    async move {
        let output = match job {
            Job::Login { username, password } => {
                api.login(&username, &password).await?;
                log::info!("logged in as {username}");
                JobOutput::Done
            }
            Job::Profile => JobOutput::Profile(api.profile().await?),
            Job::Logout => {
                api.logout().await?;
                JobOutput::Done
            }

            Job::DashboardStats { admin } => JobOutput::Stats(dashboard_stats(api, admin).await?),
            Job::ListUserCas(page) => JobOutput::CaPage(api.list_user_cas(page).await?),
            Job::ListSslCerts(page) => JobOutput::SslPage(api.list_ssl_certs(page).await?),
            Job::ListAdminCas(page) => JobOutput::CaPage(api.list_admin_cas(page).await?),
            Job::ListUsers(page) => JobOutput::UserPage(api.list_users(page).await?),
            Job::ListBoundUsers { ca_uuid, page } => {
                JobOutput::UserPage(api.list_bound_users(&ca_uuid, page).await?)
            }
            Job::ListUnboundUsers { ca_uuid, page } => {
                JobOutput::UserPage(api.list_unbound_users(&ca_uuid, page).await?)
            }
            Job::ListLoginRecords(page) => {
                JobOutput::LoginRecords(api.list_login_records(page).await?)
            }
            Job::ListAllSessions(page) => JobOutput::Sessions(api.list_all_sessions(page).await?),
            Job::ListSessionsOf { username, page } => {
                JobOutput::Sessions(api.list_sessions_of(&username, page).await?)
            }

            Job::FetchAndAnalyze(cert) => {
                let pem = fetch_cert(api, &cert, ChainOption::Bare).await?;
                JobOutput::Analysis(Box::new(api.analyze_cert(&pem).await?))
            }
            Job::FetchCert { cert, chain } => JobOutput::Pem(fetch_cert(api, &cert, chain).await?),
            Job::FetchPrivateKey { cert, password } => {
                let key = match cert.kind {
                    CertKind::Ssl => api.ssl_private_key(&cert.uuid, &password).await?,
                    CertKind::AdminCa => api.admin_ca_private_key(&cert.uuid, &password).await?,
                    CertKind::UserCa => return Err(unsupported("private key")),
                };
                JobOutput::PrivateKey(key)
            }
            Job::Export { path, source } => {
                let (content, private) = match source {
                    ExportSource::Content { text, private } => (text, private),
                    ExportSource::Remote { cert, chain } => {
                        (fetch_cert(api, &cert, chain).await?, false)
                    }
                };
                let written = write_export(&path, &content, private)
                    .await
                    .map_err(|e| io_failure("export failed", &e))?;
                JobOutput::Exported(written)
            }
            Job::UpdateComment { cert, comment } => {
                match cert.kind {
                    CertKind::Ssl => api.update_ssl_comment(&cert.uuid, &comment).await?,
                    CertKind::AdminCa => api.update_ca_comment(&cert.uuid, &comment).await?,
                    CertKind::UserCa => return Err(unsupported("comment editing")),
                }
                JobOutput::Done
            }
            Job::Renew { cert, days } => match cert.kind {
                CertKind::Ssl => JobOutput::Ssl(api.renew_ssl_cert(&cert.uuid, days).await?),
                CertKind::AdminCa => JobOutput::Ca(api.renew_ca(&cert.uuid, days).await?),
                CertKind::UserCa => return Err(unsupported("renewal")),
            },
            Job::Delete(cert) => {
                match cert.kind {
                    CertKind::Ssl => api.delete_ssl_cert(&cert.uuid).await?,
                    CertKind::AdminCa => api.delete_ca(&cert.uuid).await?,
                    CertKind::UserCa => return Err(unsupported("deletion")),
                }
                JobOutput::Done
            }
            Job::SetAvailable { uuid, available } => {
                api.set_ca_available(&uuid, available).await?;
                JobOutput::Done
            }
            Job::BindUser { ca_uuid, username } => {
                api.bind_user(&ca_uuid, &username).await?;
                JobOutput::Done
            }
            Job::UnbindUser { ca_uuid, username } => {
                api.unbind_user(&ca_uuid, &username).await?;
                JobOutput::Done
            }

            Job::RequestSsl(req) => JobOutput::Ssl(api.request_ssl_cert(&req).await?),
            Job::RequestCa(req) => JobOutput::Ca(api.request_ca(&req).await?),
            Job::ImportCa { cert_path, key_path, comment } => {
                let certificate = read_input_file(&cert_path)
                    .await
                    .map_err(|e| io_failure("cannot read certificate", &e))?;
                let privkey = read_input_file(&key_path)
                    .await
                    .map_err(|e| io_failure("cannot read private key", &e))?;
                let req = ImportCaRequest { certificate, privkey, comment };
                JobOutput::Ca(api.import_ca(&req).await?)
            }

            Job::UpdateProfile(req) => {
                api.update_profile(&req).await?;
                JobOutput::Done
            }
            Job::LogoutLoginRecord(uuid) => {
                api.logout_login_record(&uuid).await?;
                JobOutput::Done
            }
            Job::LogoutAllSessions => {
                api.logout_all_sessions().await?;
                JobOutput::Done
            }

            Job::AnalyzeCert(pem) => JobOutput::Analysis(Box::new(api.analyze_cert(&pem).await?)),
            Job::AnalyzeKey { pem, password } => {
                JobOutput::KeyAnalysis(api.analyze_private_key(&pem, &password).await?)
            }
            Job::PemToDer(pem) => JobOutput::Text(api.convert_pem_to_der(&pem).await?),
            Job::DerToPem(der) => JobOutput::Text(api.convert_der_to_pem(der.trim()).await?),
            Job::ReadFile(path) => JobOutput::Text(
                read_input_file(&path)
                    .await
                    .map_err(|e| io_failure("cannot read file", &e))?,
            ),

            Job::CreateUser(req) => {
                api.create_user(&req).await?;
                JobOutput::Done
            }
            Job::UpdateUser { username, req } => {
                api.update_user(&username, &req).await?;
                JobOutput::Done
            }
            Job::UpdateRole { username, role } => {
                api.update_role(&username, role).await?;
                JobOutput::Done
            }
            Job::DeleteUser(username) => {
                api.delete_users(std::slice::from_ref(&username)).await?;
                JobOutput::Done
            }
            Job::ForceLogout(username) => {
                api.force_logout(&username).await?;
                JobOutput::Done
            }

            Job::Then(first, next) => {
                run(api, *first).await?;
                run(api, *next).await?
            }
        };
        Ok(output)
    }
    .boxed()
}

#[cfg(test)]
mod tests {
    use super::*;
    use certvault_api::CertVaultClient;

    use crate::message::{Target, Ticket};

    fn offline_api() -> Arc<dyn CertVaultApi> {
        Arc::new(CertVaultClient::new("http://127.0.0.1:9").unwrap())
    }

    #[tokio::test]
    async fn private_key_of_user_ca_is_rejected_locally() {
        let api = offline_api();
        let job = Job::FetchPrivateKey {
            cert: CertRef {
                kind: CertKind::UserCa,
                uuid: "ca".into(),
            },
            password: "pw".into(),
        };
        let result = run(api.as_ref(), job).await;
        assert!(matches!(result, Err(TaskError::Failed(m)) if m.contains("not available")));
    }

    #[tokio::test]
    async fn export_of_content_needs_no_network() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out/cert.pem");
        let job = Job::Export {
            path: path.to_string_lossy().into_owned(),
            source: ExportSource::Content {
                text: "X".into(),
                private: false,
            },
        };
        let result = run(offline_api().as_ref(), job).await;
        assert_eq!(result, Ok(JobOutput::Exported(path.clone())));
        assert_eq!(std::fs::read_to_string(path).unwrap(), "X");
    }

    #[tokio::test]
    async fn then_stops_at_first_failure() {
        let job = Job::ReadFile(String::new()).then(Job::Export {
            path: "/never/written".into(),
            source: ExportSource::Content {
                text: String::new(),
                private: false,
            },
        });
        let result = run(offline_api().as_ref(), job).await;
        assert!(matches!(result, Err(TaskError::Failed(m)) if m.starts_with("cannot read file")));
    }

    #[tokio::test]
    async fn every_job_reports_exactly_once() {
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        let executor = Executor::new(offline_api(), tx);
        let ticket = Ticket {
            epoch: 0,
            target: Target::Logout,
            seq: 7,
        };
        executor.dispatch(Command::Run {
            ticket,
            job: Job::ReadFile(String::new()),
        });
        executor.dispatch(Command::Timer {
            delay: std::time::Duration::from_millis(1),
            msg: AppMessage::ClearToast { id: 3 },
        });

        let mut finished = 0;
        let mut cleared = 0;
        for _ in 0..2 {
            match rx.recv().await {
                Some(AppMessage::JobFinished { ticket: t, .. }) => {
                    assert_eq!(t, ticket);
                    finished += 1;
                }
                Some(AppMessage::ClearToast { id: 3 }) => cleared += 1,
                other => panic!("unexpected message {other:?}"),
            }
        }
        assert_eq!((finished, cleared), (1, 1));
        assert!(rx.try_recv().is_err());
    }
}
