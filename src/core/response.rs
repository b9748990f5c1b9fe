//! 核心响应处理模块

use serde::Serialize;

/// 只带提示信息的响应体：`{ "message": ... }`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
