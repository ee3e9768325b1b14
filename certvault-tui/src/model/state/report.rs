//! 解析报告排版
//!
//! 报告是纯文本，渲染时按行首识别小节标题与 `Not After:` 行着色。

use certvault_api::{CertAnalysis, PrivateKeyAnalysis};
use unicode_width::UnicodeWidthChar;

/// 字段名列宽（含冒号）
pub const LABEL_WIDTH: usize = 18;
/// 小节标题
pub const SECTIONS: [&str; 3] = ["Certificate Analysis", "Public Key", "Extensions"];
/// 按剩余天数着色的字段
pub const NOT_AFTER_LABEL: &str = "Not After:";

/// 值列最窄宽度
const MIN_VALUE_WIDTH: usize = 20;

pub fn cert_report(analysis: &CertAnalysis, width: u16) -> String {
    let value_width = usize::from(width)
        .saturating_sub(LABEL_WIDTH + 1)
        .max(MIN_VALUE_WIDTH);
    let mut out = vec![SECTIONS[0].to_string(), String::new()];
    if !analysis.subject.is_empty() {
        push_field(&mut out, "Subject", &analysis.subject, value_width);
    }
    if !analysis.issuer.is_empty() {
        push_field(&mut out, "Issuer", &analysis.issuer, value_width);
    }
    push_field(&mut out, "Not Before", &analysis.not_before, value_width);
    push_field(&mut out, "Not After", &analysis.not_after, value_width);
    if !analysis.serial_number.is_empty() {
        push_field(&mut out, "Serial Number", &analysis.serial_number, value_width);
    }
    if !analysis.fingerprint.is_empty() {
        push_field(&mut out, "Fingerprint", &analysis.fingerprint, value_width);
    }
    push_field(&mut out, "Is CA", yes_no(analysis.is_ca), value_width);
    out.push(String::new());

    out.push(SECTIONS[1].to_string());
    out.push(String::new());
    push_field(&mut out, "Algorithm", &analysis.algorithm, value_width);
    for (key, value) in &analysis.public_key {
        push_field(&mut out, key, &json_text(value), value_width);
    }
    out.push(String::new());

    if !analysis.extensions.is_empty() {
        out.push(SECTIONS[2].to_string());
        out.push(String::new());
        for (oid, value) in &analysis.extensions {
            push_field(&mut out, oid, value, value_width);
        }
    } else if !analysis.subject_alt_names.is_empty() {
        out.push(SECTIONS[2].to_string());
        out.push(String::new());
        let sans = format!("SAN: {}", analysis.subject_alt_names.join(", "));
        push_field(&mut out, "2.5.29.17", &sans, value_width);
    }

    out.join("\n")
}

pub fn key_report(analysis: &PrivateKeyAnalysis) -> String {
    format!(
        "Algorithm: {}\nKey Size: {} bits",
        analysis.algorithm, analysis.key_size
    )
}

fn push_field(out: &mut Vec<String>, key: &str, value: &str, width: usize) {
    let label = format!("{key}:");
    let indent = " ".repeat(LABEL_WIDTH + 1);
    for (i, chunk) in wrap(value, width).into_iter().enumerate() {
        if i == 0 {
            out.push(format!("{label:<LABEL_WIDTH$} {chunk}"));
        } else {
            out.push(format!("{indent}{chunk}"));
        }
    }
}

/// 按显示宽度硬折行；空值也占一行
fn wrap(value: &str, width: usize) -> Vec<String> {
    let mut lines = vec![String::new()];
    let mut used = 0;
    for c in value.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > width && used > 0 {
            lines.push(String::new());
            used = 0;
        }
        if let Some(line) = lines.last_mut() {
            line.push(c);
        }
        used += w;
    }
    lines
}

fn json_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Bool(b) => yes_no(*b).to_string(),
        serde_json::Value::Number(n) => n
            .as_i64()
            .map(|i| i.to_string())
            .or_else(|| n.as_u64().map(|u| u.to_string()))
            .unwrap_or_else(|| format!("{:.0}", n.as_f64().unwrap_or_default())),
        other => other.to_string(),
    }
}

fn yes_no(value: bool) -> &'static str {
    if value { "Yes" } else { "No" }
}
