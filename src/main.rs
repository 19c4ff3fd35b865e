//! Scriba - Markdown 文档助手
//!
//! 入口：初始化日志、创建会话运行时与 TUI，并运行主循环。

use anyhow::Context;
use scriba::{core::create_session, ui::run_app};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 日志：默认 info，可通过 RUST_LOG 覆盖
    scriba::observability::init();

    // 创建会话：返回命令发送端、状态接收端
    let (cmd_tx, state_rx) = create_session(None)
        .await
        .context("Failed to create session")?;

    // 启动 TUI 主循环（消费 state，向 cmd_tx 发送用户指令）
    run_app(state_rx, cmd_tx).await.context("App run failed")?;

    Ok(())
}
