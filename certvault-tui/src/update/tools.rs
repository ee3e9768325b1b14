use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::ViewController;
use crate::message::{Effect, Job, JobOutput, JobResult, TaskError};
use crate::model::state::report::{cert_report, key_report};
use crate::model::state::{Tool, ToolFocus, ToolPanel, ToolsOp, ToolsState};
use crate::model::widgets::{PathInput, TextView};

impl ViewController for ToolsState {
    fn init(&mut self) -> Effect {
        self.spinner.cancel();
        Effect::None
    }

    fn scroll(&mut self, down: bool) {
        match self.panel.as_mut() {
            None => self.menu.scroll(down),
            Some(panel) if panel.open_path.is_none() => {
                if let Some(result) = panel.result.as_mut() {
                    result.scroll(down);
                }
            }
            Some(_) => {}
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Effect {
        if self.spinner.is_active() {
            return Effect::None;
        }
        if self.panel.is_none() {
            if let Some(tool) = self.menu.handle_key(&key) {
                self.open(tool);
            }
            return Effect::None;
        }
        self.panel_key(&key)
    }

    fn handle_result(&mut self, seq: u64, result: JobResult) -> Effect {
        let Some(op) = self.spinner.finish(seq) else {
            return Effect::None;
        };
        let width = self.width;
        let pane_height = self.pane_height();
        let Some(panel) = self.panel.as_mut() else {
            return Effect::None;
        };
        let output = match result {
            Ok(output) => output,
            Err(TaskError::SessionExpired) => return Effect::SessionExpired,
            Err(TaskError::Failed(message)) => {
                panel.error = Some(message);
                return Effect::None;
            }
        };
        panel.error = None;
        match (op, output) {
            (ToolsOp::LoadFile, JobOutput::Text(text)) => {
                panel.input.set_text(&text);
                panel.open_path = None;
                panel.focus = ToolFocus::Input;
            }
            (ToolsOp::Run, output) => {
                let text = match output {
                    JobOutput::Analysis(analysis) => cert_report(&analysis, width),
                    JobOutput::KeyAnalysis(analysis) => key_report(&analysis),
                    JobOutput::Text(text) => text,
                    other => {
                        log::warn!("Unexpected tool output {other:?}");
                        panel.error = Some("Unexpected response from server".to_string());
                        return Effect::None;
                    }
                };
                let mut view = TextView::new(&text);
                view.set_height(pane_height);
                panel.result = Some(view);
            }
            (ToolsOp::LoadFile, _) => {
                panel.error = Some("Unexpected response from server".to_string());
            }
        }
        Effect::None
    }

    fn is_at_root(&self) -> bool {
        self.panel.is_none()
    }

    fn is_editing(&self) -> bool {
        self.panel
            .as_ref()
            .is_some_and(|p| p.open_path.is_some() || p.focus != ToolFocus::Result)
    }

    fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        let pane_height = self.pane_height();
        if let Some(panel) = self.panel.as_mut() {
            panel.input.set_height(pane_height);
            if let Some(result) = panel.result.as_mut() {
                result.set_height(pane_height);
            }
        }
    }

    fn tick(&mut self) {
        self.spinner.tick();
    }
}

impl ToolsState {
    fn open(&mut self, tool: Tool) {
        let mut panel = ToolPanel {
            tool: Some(tool),
            ..ToolPanel::default()
        };
        panel.input.set_height(self.pane_height());
        self.panel = Some(panel);
    }

    fn panel_key(&mut self, key: &KeyEvent) -> Effect {
        let Some(panel) = self.panel.as_mut() else {
            return Effect::None;
        };

        if let Some(path) = panel.open_path.as_mut() {
            return match key.code {
                KeyCode::Esc => {
                    panel.open_path = None;
                    Effect::None
                }
                KeyCode::Enter => {
                    let path = path.value().trim().to_string();
                    if path.is_empty() {
                        panel.error = Some("Path cannot be empty".to_string());
                        return Effect::None;
                    }
                    panel.error = None;
                    let seq = self.spinner.start("Reading file...", ToolsOp::LoadFile);
                    Effect::spawn(seq, Job::ReadFile(path))
                }
                _ => {
                    path.handle_key(key);
                    Effect::None
                }
            };
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => self.panel = None,
            KeyCode::Char('s') if ctrl => return self.run(),
            KeyCode::Char('l') if ctrl => {
                panel.input.clear();
                panel.password.clear();
                panel.result = None;
                panel.error = None;
                panel.focus = ToolFocus::Input;
            }
            KeyCode::Char('o') if ctrl => {
                panel.error = None;
                panel.open_path = Some(PathInput::new());
            }
            KeyCode::Tab => panel.focus = next_focus(panel),
            _ => match panel.focus {
                ToolFocus::Input => {
                    panel.input.handle_key(key);
                }
                ToolFocus::Password => {
                    panel.password.handle_key(key);
                }
                ToolFocus::Result => {
                    if let Some(result) = panel.result.as_mut() {
                        result.handle_key(key);
                    }
                }
            },
        }
        Effect::None
    }

    fn run(&mut self) -> Effect {
        let Some(panel) = self.panel.as_mut() else {
            return Effect::None;
        };
        let Some(tool) = panel.tool else {
            return Effect::None;
        };
        if panel.input.is_blank() {
            panel.error = Some(format!("{} is required", tool.input_label()));
            return Effect::None;
        }
        panel.error = None;
        let input = panel.input.text().trim().to_string();
        let job = match tool {
            Tool::AnalyzeCert => Job::AnalyzeCert(input),
            Tool::AnalyzeKey => Job::AnalyzeKey {
                pem: input,
                password: panel.password.value().to_string(),
            },
            Tool::PemToDer => Job::PemToDer(input),
            Tool::DerToPem => Job::DerToPem(input),
        };
        let seq = self.spinner.start("Running...", ToolsOp::Run);
        Effect::spawn(seq, job)
    }
}

/// tab 在输入区、口令（仅私钥分析）与结果区之间轮转
fn next_focus(panel: &ToolPanel) -> ToolFocus {
    let needs_password = panel.tool.is_some_and(Tool::needs_password);
    match panel.focus {
        ToolFocus::Input if needs_password => ToolFocus::Password,
        ToolFocus::Input | ToolFocus::Password if panel.result.is_some() => ToolFocus::Result,
        ToolFocus::Input | ToolFocus::Password | ToolFocus::Result => ToolFocus::Input,
    }
}

#[cfg(test)]
mod tests {
    use certvault_api::PrivateKeyAnalysis;

    use super::*;
    use crate::update::tests::{ch, key};

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn opened(tool: Tool) -> ToolsState {
        let mut state = ToolsState::default();
        state.resize(100, 30);
        let index = Tool::ALL.iter().position(|t| *t == tool).unwrap_or_default();
        for _ in 0..index {
            state.handle_key(key(KeyCode::Down));
        }
        state.handle_key(key(KeyCode::Enter));
        state
    }

    fn typed(state: &mut ToolsState, text: &str) {
        for c in text.chars() {
            state.handle_key(ch(c));
        }
    }

    #[test]
    fn blank_input_is_rejected() {
        let mut state = opened(Tool::PemToDer);
        assert!(!state.is_at_root());
        assert!(state.handle_key(ctrl('s')).is_none());
        let panel = state.panel.as_ref().unwrap();
        assert_eq!(panel.error.as_deref(), Some("Certificate (PEM) is required"));
    }

    #[test]
    fn key_analysis_sends_password_and_formats_result() {
        let mut state = opened(Tool::AnalyzeKey);
        typed(&mut state, "PEM");
        state.handle_key(key(KeyCode::Tab));
        assert_eq!(state.panel.as_ref().unwrap().focus, ToolFocus::Password);
        typed(&mut state, "pw");

        let Effect::Spawn { seq, job } = state.handle_key(ctrl('s')) else {
            panic!("expected a job");
        };
        assert!(matches!(job, Job::AnalyzeKey { ref pem, ref password } if pem == "PEM" && password == "pw"));

        let analysis = PrivateKeyAnalysis {
            algorithm: "RSA".into(),
            key_size: 2048,
        };
        state.handle_result(seq, Ok(JobOutput::KeyAnalysis(analysis)));
        let panel = state.panel.as_ref().unwrap();
        assert!(panel.result.as_ref().unwrap().text().contains("2048 bits"));

        // 有结果后 tab 可以到达结果区
        state.handle_key(key(KeyCode::Tab));
        assert_eq!(state.panel.as_ref().unwrap().focus, ToolFocus::Result);
        assert!(!state.is_editing());
    }

    #[test]
    fn file_loads_into_input() {
        let mut state = opened(Tool::AnalyzeCert);
        state.handle_key(ctrl('o'));
        typed(&mut state, "/tmp/cert.pem");
        let Effect::Spawn { seq, job } = state.handle_key(key(KeyCode::Enter)) else {
            panic!("expected a job");
        };
        assert_eq!(job.name(), "read_file");
        state.handle_result(seq, Ok(JobOutput::Text("line1\nline2".into())));
        let panel = state.panel.as_ref().unwrap();
        assert!(panel.open_path.is_none());
        assert_eq!(panel.input.text(), "line1\nline2");
    }

    #[test]
    fn esc_closes_path_then_panel() {
        let mut state = opened(Tool::DerToPem);
        state.handle_key(ctrl('o'));
        state.handle_key(key(KeyCode::Esc));
        assert!(state.panel.as_ref().unwrap().open_path.is_none());
        state.handle_key(key(KeyCode::Esc));
        assert!(state.is_at_root());
    }

    #[test]
    fn clear_resets_panel() {
        let mut state = opened(Tool::DerToPem);
        typed(&mut state, "AAAA");
        let Effect::Spawn { seq, .. } = state.handle_key(ctrl('s')) else {
            panic!("expected a job");
        };
        state.handle_result(seq, Err(TaskError::Failed("invalid base64".into())));
        assert_eq!(
            state.panel.as_ref().unwrap().error.as_deref(),
            Some("invalid base64")
        );
        state.handle_key(ctrl('l'));
        let panel = state.panel.as_ref().unwrap();
        assert!(panel.input.is_blank());
        assert!(panel.error.is_none());
    }
}
