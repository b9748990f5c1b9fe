//! 带 API 文档页的用户记录服务（端口 3001，文档在 /api-docs）
//!
//! 用法: documented_server [配置文件路径]

use std::env;
use std::path::PathBuf;
use tracing::info;
use user_record_service::{config, infrastructure::Logger, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let explicit = env::args().nth(1).map(PathBuf::from);
    let config_path = config::find_config_file(explicit.as_deref());
    let config = config::load_config(config_path.as_deref(), Config::documented())?;

    let _guard = Logger::init(&config.logging)?;
    match &config_path {
        Some(path) => info!("从配置文件加载: {}", path.display()),
        None => info!("未找到配置文件，使用默认配置"),
    }
    info!("启动用户记录服务（含 API 文档）...");

    user_record_service::run(config).await
}
