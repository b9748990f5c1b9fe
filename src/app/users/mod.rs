//! 用户记录：模型、服务与处理器

pub mod handler;
pub mod model;
pub mod service;

pub use handler::AppState;
pub use model::{User, UserId};
pub use service::UserService;
