//! 应用层

pub mod docs;
pub mod users;
