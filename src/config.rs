//! 服务配置
//!
//! 配置来源（按顺序）：命令行第一个参数指定的文件、`config.toml`、
//! `./config/config.toml`，都不存在时使用当前变体的基础配置。
//! 所有字段均可省略，文件中未出现的项沿用基础配置。

use serde::{Deserialize, Serialize};
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

/// 默认查找的配置文件路径
const CONFIG_PATHS: [&str; 2] = ["config.toml", "./config/config.toml"];

/// 服务配置结构
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP 服务配置
    pub http: HttpConfig,
    /// 日志配置
    pub logging: LoggingConfig,
    /// API 文档配置
    pub docs: DocsConfig,
    /// 用户集合配置
    pub users: UsersConfig,
}

/// HTTP 服务配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// 绑定地址
    pub bind_address: String,
    /// HTTP 服务端口
    pub port: u16,
    /// 请求超时时间（秒）
    pub timeout_seconds: u64,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// 日志级别 (trace, debug, info, warn, error)
    pub level: String,
    /// 是否启用控制台输出
    pub console_output: bool,
    /// 日志文件目录，未设置时不写文件
    pub log_dir: Option<PathBuf>,
    /// 日志文件名前缀
    pub file_prefix: String,
}

/// API 文档配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DocsConfig {
    pub enabled: bool,
    /// 文档页路径，JSON 描述挂在 `<path>/openapi.json`
    pub path: String,
}

/// 用户集合配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UsersConfig {
    /// 启动时是否写入四条示例用户
    pub seed: bool,
    pub id_strategy: IdStrategy,
}

/// 新用户 id 的分配方式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdStrategy {
    /// 单调递增计数器，id 永不复用
    #[default]
    Sequential,
    /// 当前集合长度 + 1，删除后可能产生重复 id
    CollectionLength,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".to_string(),
            port: 3000,
            timeout_seconds: 30,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            console_output: true,
            log_dir: None,
            file_prefix: "user-service".to_string(),
        }
    }
}

impl Default for DocsConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            path: "/api-docs".to_string(),
        }
    }
}

impl Default for UsersConfig {
    fn default() -> Self {
        Self {
            seed: true,
            id_strategy: IdStrategy::default(),
        }
    }
}

impl HttpConfig {
    /// 解析监听地址
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.bind_address, self.port)
            .parse()
            .map_err(|e| ConfigError::Validation(format!("无效的绑定地址 {}: {}", self.bind_address, e)))
    }
}

impl Config {
    /// 带文档页的变体：端口 3001，启用 `/api-docs`
    pub fn documented() -> Self {
        let mut config = Self::default();
        config.http.port = 3001;
        config.docs.enabled = true;
        config
    }

    /// 从配置文件加载配置，文件中未出现的项取默认值
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Self::load_over(path, Self::default())
    }

    /// 从配置文件加载配置，文件中未出现的项取 `base` 中的值
    pub fn load_over<P: AsRef<Path>>(path: P, base: Config) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::FileRead(e.to_string()))?;

        Self::parse_over(&content, base)
    }

    /// 把 TOML 文本逐项覆盖到 `base` 上
    pub fn parse_over(content: &str, base: Config) -> Result<Self, ConfigError> {
        let overrides: toml::Table = content
            .parse()
            .map_err(|e: toml::de::Error| ConfigError::Parse(e.to_string()))?;
        let mut merged =
            toml::Value::try_from(base).map_err(|e| ConfigError::Serialize(e.to_string()))?;

        merge_toml(&mut merged, toml::Value::Table(overrides));

        merged
            .try_into()
            .map_err(|e: toml::de::Error| ConfigError::Parse(e.to_string()))
    }

    /// 保存配置到文件
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content =
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?;

        // 确保目录存在
        if let Some(parent) = path.as_ref().parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::FileWrite(e.to_string()))?;
        }

        fs::write(path.as_ref(), content).map_err(|e| ConfigError::FileWrite(e.to_string()))
    }

    /// 验证配置的有效性
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.http.port == 0 {
            return Err(ConfigError::Validation("HTTP端口必须大于0".to_string()));
        }
        if self.http.bind_address.is_empty() {
            return Err(ConfigError::Validation("绑定地址不能为空".to_string()));
        }
        self.http.socket_addr()?;
        if self.http.timeout_seconds == 0 {
            return Err(ConfigError::Validation("请求超时时间必须大于0".to_string()));
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            return Err(ConfigError::Validation(format!(
                "无效的日志级别: {}，有效值: {:?}",
                self.logging.level, valid_levels
            )));
        }

        let docs_path = self.docs.path.trim_end_matches('/');
        if !self.docs.path.starts_with('/') || docs_path.is_empty() {
            return Err(ConfigError::Validation(format!(
                "文档路径必须以 / 开头: {}",
                self.docs.path
            )));
        }
        if docs_path == "/users" || docs_path.starts_with("/users/") {
            return Err(ConfigError::Validation(format!(
                "文档路径与用户路由冲突: {}",
                self.docs.path
            )));
        }

        Ok(())
    }
}

/// 配置错误类型
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("文件读取错误: {0}")]
    FileRead(String),
    #[error("文件写入错误: {0}")]
    FileWrite(String),
    #[error("配置解析错误: {0}")]
    Parse(String),
    #[error("配置序列化错误: {0}")]
    Serialize(String),
    #[error("配置验证错误: {0}")]
    Validation(String),
}

/// 表逐键递归合并，其他值直接覆盖
fn merge_toml(base: &mut toml::Value, overrides: toml::Value) {
    match (base, overrides) {
        (toml::Value::Table(base), toml::Value::Table(overrides)) => {
            for (key, value) in overrides {
                match base.get_mut(&key) {
                    Some(existing) => merge_toml(existing, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (base, value) => *base = value,
    }
}

/// 查找配置文件
///
/// 命令行指定的路径直接返回（不存在时由加载报错），
/// 否则依次检查默认路径。
pub fn find_config_file(explicit: Option<&Path>) -> Option<PathBuf> {
    match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => CONFIG_PATHS
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists()),
    }
}

/// 加载并验证配置
///
/// `base` 为当前变体的基础配置：没有配置文件时直接使用，
/// 有配置文件时文件中的项覆盖到它上面。
pub fn load_config(path: Option<&Path>, base: Config) -> Result<Config, ConfigError> {
    let config = match path {
        Some(path) => Config::load_over(path, base)?,
        None => base,
    };

    config.validate()?;
    Ok(config)
}
