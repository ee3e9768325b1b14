//! 带路径补全的输入框
//!
//! tab：候选唯一时直接补全；多个候选时先补全最长公共前缀，
//! 再次按 tab 依次轮换候选。目录候选带结尾的 `/`。

use std::path::Path;

use crossterm::event::{KeyCode, KeyEvent};

use super::text_input::TextInput;
use crate::util::path::expand_home;

/// 补全在界面线程上读目录，读取的条目数与候选数都有上限
const MAX_SCANNED: usize = 2048;
const MAX_CANDIDATES: usize = 64;

#[derive(Debug, Clone, Default)]
pub struct PathInput {
    input: TextInput,
    candidates: Vec<String>,
    index: Option<usize>,
}

impl PathInput {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn with_value(value: impl Into<String>) -> Self {
        Self {
            input: TextInput::with_value(value),
            ..Self::default()
        }
    }

    pub fn value(&self) -> &str {
        self.input.value()
    }

    pub fn input(&self) -> &TextInput {
        &self.input
    }

    /// 轮换中的候选（用于渲染提示）
    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    pub fn handle_key(&mut self, key: &KeyEvent) -> bool {
        if key.code == KeyCode::Tab {
            self.complete();
            return true;
        }
        let handled = self.input.handle_key(key);
        if handled {
            self.candidates.clear();
            self.index = None;
        }
        handled
    }

    fn complete(&mut self) {
        if !self.candidates.is_empty() {
            let next = self.index.map_or(0, |i| (i + 1) % self.candidates.len());
            self.index = Some(next);
            self.input.set(self.candidates[next].clone());
            return;
        }

        let typed = self.input.value().to_string();
        let matches = candidates_for(&typed);
        match matches.len() {
            0 => {}
            1 => self.input.set(matches[0].clone()),
            _ => {
                let prefix = common_prefix(&matches);
                if prefix.chars().count() > typed.chars().count() {
                    self.input.set(prefix);
                } else {
                    self.index = Some(0);
                    self.input.set(matches[0].clone());
                }
                self.candidates = matches;
            }
        }
    }
}

/// 以用户输入的原样前缀返回候选，目录带结尾分隔符
fn candidates_for(typed: &str) -> Vec<String> {
    let typed = if typed == "~" { "~/" } else { typed };
    let (dir_part, prefix) = match typed.rfind('/') {
        Some(pos) => typed.split_at(pos + 1),
        None => ("", typed),
    };
    let dir = if dir_part.is_empty() {
        ".".to_string()
    } else {
        expand_home(dir_part)
    };
    let Ok(entries) = std::fs::read_dir(Path::new(&dir)) else {
        return Vec::new();
    };

    let mut out: Vec<String> = entries
        .take(MAX_SCANNED)
        .filter_map(Result::ok)
        .filter_map(|entry| {
            let name = entry.file_name().into_string().ok()?;
            if !name.starts_with(prefix) || (name.starts_with('.') && !prefix.starts_with('.')) {
                return None;
            }
            // 只有符号链接才需要再 stat 一次
            let is_dir = match entry.file_type() {
                Ok(kind) if kind.is_symlink() => entry.path().is_dir(),
                Ok(kind) => kind.is_dir(),
                Err(_) => false,
            };
            Some(format!(
                "{dir_part}{name}{}",
                if is_dir { "/" } else { "" }
            ))
        })
        .take(MAX_CANDIDATES)
        .collect();
    out.sort();
    out
}

fn common_prefix(values: &[String]) -> String {
    let Some(first) = values.first() else {
        return String::new();
    };
    let mut len = first.len();
    for value in &values[1..] {
        len = first
            .char_indices()
            .zip(value.chars())
            .take_while(|((_, a), b)| a == b)
            .last()
            .map_or(0, |((i, a), _)| i + a.len_utf8())
            .min(len);
    }
    first[..len].to_string()
}
