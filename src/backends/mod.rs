//! Concrete logging engines

pub mod logrus;
pub mod nop;
pub mod zerolog;

pub use logrus::LogrusLogger;
pub use nop::NopLogger;
pub use zerolog::ZerologLogger;
