//!
//! app.rs
//! 应用主循环
//!
//!
//!
//! 在应用启动时，App 处于以下状态：
//!
//! App {
//!
//!     should_quit: false,                 // 决定应用是否应该退出
//!     current: ViewId::Login,             // 登录页
//!     views: None,                        // 登录成功后才创建各视图
//!     epoch: 0,                           // 会话代数
//!
//! }
//!
//!
//! 主循环由消息驱动：没有消息时不重绘。
//! 输入线程每 100ms 投递一次 Tick，因此 spinner 仍然会转动。
//!
//! loop {
//!
//!     terminal.draw(|f| view::render(&app, f))    // 渲染 UI
//!     if app.should_quit { break }                // 检查 APP 是否应该退出
//!     msg = rx.recv().await                       // 等待下一条消息（按键 / Tick / 任务结果）
//!     update::update(&mut app, msg)               // 更新状态，得到 Command
//!     while let Ok(msg) = rx.try_recv() { ... }   // 把已到达的消息一并处理，再重绘
//!     executor.dispatch(command)                  // 启动异步任务 / 计时器
//!
//! }

use anyhow::Result;
use tokio::sync::mpsc;

use crate::backend::Executor;
use crate::event;
use crate::message::{AppMessage, Command};
use crate::model::App;
use crate::update;
use crate::util::Term;
use crate::view;

/// 运行应用主循环
pub async fn run(terminal: &mut Term, app: &mut App) -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let executor = Executor::new(app.api.clone(), tx.clone());
    let _input = event::spawn_input(tx);

    // 1. 首次尺寸与启动命令
    let size = terminal.size()?;
    let mut commands = update::update(app, AppMessage::Resize(size.width, size.height));
    commands.extend(update::init(app));
    dispatch(&executor, commands);

    loop {
        // 2. 渲染 UI
        terminal.draw(|frame| {
            view::render(app, frame);
        })?;

        // 3. 检查是否应该退出
        if app.should_quit {
            break;
        }

        // 4. 等待消息；所有发送端都已关闭时退出
        let Some(msg) = rx.recv().await else {
            log::warn!("Message channel closed");
            break;
        };

        // 5. 更新状态，并把已到达的消息一并处理
        let mut commands = update::update(app, msg);
        while let Ok(msg) = rx.try_recv() {
            commands.extend(update::update(app, msg));
            if app.should_quit {
                break;
            }
        }

        // 6. 执行副作用
        dispatch(&executor, commands);
    }

    Ok(())
}

fn dispatch(executor: &Executor, commands: Vec<Command>) {
    for command in commands {
        executor.dispatch(command);
    }
}
