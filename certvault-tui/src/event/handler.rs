//! 事件处理器

use std::thread;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind, MouseEventKind};
use tokio::sync::mpsc::UnboundedSender;

use crate::message::AppMessage;

/// 动画节拍间隔
pub const TICK_RATE: Duration = Duration::from_millis(100);

/// 轮询事件
pub fn poll_event(timeout: Duration) -> Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// 把终端事件翻译为消息
pub fn handle_event(event: Event) -> AppMessage {
    match event {
        // 重要：只处理 Press 事件，忽略 Release 和 Repeat
        // 避免 Windows 终端上按键重复问题的发生
        Event::Key(key) if key.kind == KeyEventKind::Press => AppMessage::Key(key),
        Event::Mouse(mouse) => match mouse.kind {
            MouseEventKind::ScrollUp => AppMessage::ScrollUp,
            MouseEventKind::ScrollDown => AppMessage::ScrollDown,
            _ => AppMessage::Noop,
        },
        Event::Resize(width, height) => AppMessage::Resize(width, height),
        _ => AppMessage::Noop,
    }
}

/// 启动输入线程：转发终端事件，并按 [`TICK_RATE`] 投递 Tick
///
/// 主循环关闭接收端后，线程在下一次发送失败时退出。
pub fn spawn_input(tx: UnboundedSender<AppMessage>) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let mut last_tick = Instant::now();
        loop {
            let timeout = TICK_RATE.saturating_sub(last_tick.elapsed());
            match poll_event(timeout) {
                Ok(Some(event)) => {
                    let msg = handle_event(event);
                    if !matches!(msg, AppMessage::Noop) && tx.send(msg).is_err() {
                        break;
                    }
                }
                Ok(None) => {}
                Err(e) => {
                    log::error!("Failed to read terminal event: {e:#}");
                    let _ = tx.send(AppMessage::Quit);
                    break;
                }
            }
            if last_tick.elapsed() >= TICK_RATE {
                last_tick = Instant::now();
                if tx.send(AppMessage::Tick).is_err() {
                    break;
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{
        KeyCode, KeyEvent, KeyEventState, KeyModifiers, MouseEvent,
    };

    #[test]
    fn only_key_presses_are_forwarded() {
        let press = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE);
        assert!(matches!(handle_event(Event::Key(press)), AppMessage::Key(_)));

        let release = KeyEvent {
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
            ..press
        };
        assert!(matches!(handle_event(Event::Key(release)), AppMessage::Noop));
    }

    #[test]
    fn wheel_and_resize() {
        let wheel = MouseEvent {
            kind: MouseEventKind::ScrollDown,
            column: 0,
            row: 0,
            modifiers: KeyModifiers::NONE,
        };
        assert!(matches!(handle_event(Event::Mouse(wheel)), AppMessage::ScrollDown));
        assert!(matches!(
            handle_event(Event::Resize(80, 24)),
            AppMessage::Resize(80, 24)
        ));
        assert!(matches!(handle_event(Event::FocusGained), AppMessage::Noop));
    }
}
