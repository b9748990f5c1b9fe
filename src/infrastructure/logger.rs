//! 日志基础设施

use anyhow::{Context, Result};
use std::io;
use tracing_appender::{non_blocking, non_blocking::WorkerGuard, rolling};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LoggingConfig;

pub struct Logger;

impl Logger {
    /// 初始化日志系统
    ///
    /// 日志级别优先取 `RUST_LOG`，否则使用配置中的级别。
    /// 配置了 `log_dir` 时额外写入按日期分割的日志文件，
    /// 返回的 guard 需要在程序退出前一直持有，否则文件日志会丢失。
    pub fn init(config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(&config.level))
            .with_context(|| format!("无效的日志级别: {}", config.level))?;

        let console_layer = config
            .console_output
            .then(|| fmt::layer().with_writer(io::stdout).with_ansi(true));

        let (file_layer, guard) = match &config.log_dir {
            Some(log_dir) => {
                std::fs::create_dir_all(log_dir)
                    .with_context(|| format!("无法创建日志目录: {}", log_dir.display()))?;

                let (writer, guard) = non_blocking(rolling::daily(log_dir, &config.file_prefix));
                let layer = fmt::layer()
                    .with_writer(writer)
                    .with_ansi(false) // 文件中不使用颜色
                    .with_target(false)
                    .with_thread_names(true);
                (Some(layer), Some(guard))
            }
            None => (None, None),
        };

        tracing_subscriber::registry()
            .with(filter)
            .with(console_layer)
            .with(file_layer)
            .try_init()
            .context("日志系统已经初始化")?;

        Ok(guard)
    }
}
