//! API 文档页

pub mod handler;
pub mod model;

pub use handler::router;
