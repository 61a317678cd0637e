use std::path::PathBuf;
use thiserror::Error;

/// 配置错误（启动阶段校验失败）
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("installation root must be an absolute path, got '{}'", .0.display())]
    RelativeRoot(PathBuf),

    #[error("entry point must not be empty")]
    EmptyEntryPoint,

    #[error("invalid interpreter name '{0}': expected a bare executable name")]
    InvalidInterpreter(String),

    #[error("unknown signal '{0}'")]
    UnknownSignal(String),
}
