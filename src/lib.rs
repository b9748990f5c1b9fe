//! # 用户记录服务
//!
//! 基于 Axum 的内存用户 CRUD 服务，按分层架构组织：
//! - `app`：用户记录（模型、服务、处理器）与 API 文档页
//! - `core`：错误处理、响应结构、请求体提取、中间件
//! - `infrastructure`：日志
//! - `config`：TOML 配置
//! - `server`：路由组装与启动

pub mod app;
pub mod config;
pub mod core;
pub mod infrastructure;
pub mod server;

pub use app::users::{User, UserService};
pub use config::Config;
pub use server::{build_app, build_router, build_state, run, App};
