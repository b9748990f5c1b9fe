//! 基础设施层

pub mod logger;

pub use logger::Logger;
