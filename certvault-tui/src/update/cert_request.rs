use certvault_api::{RequestSslCertRequest, SubjectAltName};
use crossterm::event::KeyEvent;

use super::{ViewController, unexpected};
use crate::message::{Effect, Job, JobOutput, JobResult};
use crate::model::state::{CertRequestState, request_field as field};
use crate::model::widgets::{Form, FormOutcome};
use crate::model::{PAGE_CHROME, ViewId};

/// 默认有效期（天）
const DEFAULT_EXPIRY_DAYS: u32 = 365;

impl ViewController for CertRequestState {
    fn init(&mut self) -> Effect {
        self.spinner.cancel();
        self.error = None;
        Effect::None
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
        if self.spinner.finish(seq).is_none() {
            return Effect::None;
        }
        match result {
            Ok(JobOutput::Ssl(cert)) => {
                log::info!("SSL certificate {} issued", cert.uuid);
                self.form = CertRequestState::blank_form();
                self.error = None;
                Effect::success("Certificate requested").and(Effect::Navigate(ViewId::CertList))
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

impl CertRequestState {
    fn submit(&mut self) -> Effect {
        match build_request(&self.form) {
            Ok(request) => {
                self.error = None;
                let seq = self.spinner.start("Requesting certificate...", ());
                Effect::spawn(seq, Job::RequestSsl(request))
            }
            Err(message) => {
                self.error = Some(message);
                Effect::None
            }
        }
    }
}

fn build_request(form: &Form) -> Result<RequestSslCertRequest, String> {
    if let Some(label) = form.missing_required() {
        return Err(format!("{label} is required"));
    }
    let algorithm = form.value(field::ALGORITHM);
    let key_size = parse_key_size(&algorithm, &form.trimmed(field::KEY_SIZE))?;
    let expiry = parse_days(&form.trimmed(field::EXPIRY), DEFAULT_EXPIRY_DAYS)?;
    let subject_alt_names = form
        .value(field::SANS)
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(SubjectAltName::dns)
        .collect();

    Ok(RequestSslCertRequest {
        ca_uuid: form.trimmed(field::CA_UUID),
        algorithm,
        key_size,
        country: form.trimmed(field::COUNTRY),
        province: form.trimmed(field::PROVINCE),
        city: form.trimmed(field::CITY),
        organization: form.trimmed(field::ORGANIZATION),
        organizational_unit: String::new(),
        common_name: form.trimmed(field::COMMON_NAME),
        expiry,
        subject_alt_names,
        comment: form.trimmed(field::COMMENT),
    })
}

/// 密钥长度；空值取算法默认值，ED25519 没有密钥长度
pub(crate) fn parse_key_size(algorithm: &str, text: &str) -> Result<Option<u32>, String> {
    let default = match algorithm {
        "RSA" => 2048,
        "EC" => 256,
        _ => return Ok(None),
    };
    if text.is_empty() {
        return Ok(Some(default));
    }
    match text.parse::<u32>() {
        Ok(size) if size > 0 => Ok(Some(size)),
        _ => Err(format!("Invalid key size: {text}")),
    }
}

/// 天数；空值取默认值
pub(crate) fn parse_days(text: &str, default: u32) -> Result<u32, String> {
    if text.is_empty() {
        return Ok(default);
    }
    match text.parse::<u32>() {
        Ok(days) if days > 0 => Ok(days),
        _ => Err(format!("Expire days must be a positive number, got {text}")),
    }
}

#[cfg(test)]
mod tests {
    use certvault_api::SslCert;
    use crossterm::event::{KeyCode, KeyModifiers};

    use super::*;

    fn ctrl_s() -> KeyEvent {
        KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL)
    }

    fn filled() -> CertRequestState {
        let mut state = CertRequestState::new();
        state.form.set_text(field::CA_UUID, "ca-1");
        state.form.set_text(field::COMMON_NAME, "example.com");
        state.form.set_text(field::SANS, "a.example.com, ,b.example.com");
        state
    }

    #[test]
    fn key_size_defaults_follow_algorithm() {
        assert_eq!(parse_key_size("RSA", ""), Ok(Some(2048)));
        assert_eq!(parse_key_size("EC", ""), Ok(Some(256)));
        assert_eq!(parse_key_size("ED25519", "4096"), Ok(None));
        assert_eq!(parse_key_size("RSA", "4096"), Ok(Some(4096)));
        assert!(parse_key_size("RSA", "big").is_err());
    }

    #[test]
    fn days_must_be_positive() {
        assert_eq!(parse_days("", 365), Ok(365));
        assert_eq!(parse_days("30", 365), Ok(30));
        assert!(parse_days("0", 365).is_err());
        assert!(parse_days("-1", 365).is_err());
    }

    #[test]
    fn missing_common_name_is_reported() {
        let mut state = CertRequestState::new();
        state.form.set_text(field::CA_UUID, "ca-1");
        assert!(state.handle_key(ctrl_s()).is_none());
        assert_eq!(state.error.as_deref(), Some("Common Name is required"));
    }

    #[test]
    fn request_carries_sans_and_defaults() {
        let mut state = filled();
        let Effect::Spawn { job, .. } = state.handle_key(ctrl_s()) else {
            panic!("expected a job");
        };
        let Job::RequestSsl(request) = job else {
            panic!("wrong job");
        };
        assert_eq!(request.ca_uuid, "ca-1");
        assert_eq!(request.algorithm, "RSA");
        assert_eq!(request.key_size, Some(2048));
        assert_eq!(request.expiry, 365);
        assert_eq!(
            request.subject_alt_names,
            vec![
                SubjectAltName::dns("a.example.com"),
                SubjectAltName::dns("b.example.com")
            ]
        );
    }

    #[test]
    fn success_resets_form_and_opens_list() {
        let mut state = filled();
        let Effect::Spawn { seq, .. } = state.handle_key(ctrl_s()) else {
            panic!("expected a job");
        };
        let effect = state.handle_result(seq, Ok(JobOutput::Ssl(SslCert::default())));
        let Effect::Batch(effects) = effect else {
            panic!("expected toast and navigation");
        };
        assert!(matches!(effects[1], Effect::Navigate(ViewId::CertList)));
        assert_eq!(state.form.value(field::COMMON_NAME), "");
    }
}
