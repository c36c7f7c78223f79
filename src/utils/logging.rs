/// 日志工具模块
///
/// 提供日志初始化和运行信息输出的辅助函数
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::orchestrator::RunStats;

/// 初始化日志
///
/// 默认 `info` 级别，`verbose` 时为 `debug`；`RUST_LOG` 优先
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// 记录程序启动信息
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!(
        "🚀 程序启动 - 表单批量提交 ({})",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("📄 表格: {}", config.table_path);
    info!(
        "🔁 每行最多尝试 {} 次，成功后等待 {} ms",
        config.max_attempts, config.pacing_delay_ms
    );
    info!("{}", "=".repeat(60));
}

/// 记录数据行加载信息
pub fn log_rows_loaded(total: usize) {
    info!("✓ 找到 {} 行待提交数据\n", total);
}

/// 打印最终统计信息
pub fn print_final_stats(stats: &RunStats, table_path: &str) {
    info!("\n{}", "=".repeat(60));
    info!("📊 全部处理完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 成功: {}/{}", stats.succeeded, stats.total);
    info!("⚠️ 无确认信息: {}", stats.empty_confirmations);
    info!("❌ 放弃: {}", stats.aborted);
    if stats.write_failures > 0 {
        warn!("💾 写回失败: {}", stats.write_failures);
    }
    info!("{}", "=".repeat(60));
    info!("\n结果已保存至: {}", table_path);
}
