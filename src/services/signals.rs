use nix::errno::Errno;
use nix::sys::signal::{kill, Signal};
use nix::unistd::Pid;
use std::str::FromStr;

use crate::error::ConfigError;
use crate::models::StopResult;

/// 解析信号名称，接受 `TERM`、`SIGTERM`、`term` 等写法
pub fn parse_signal(name: &str) -> Result<Signal, ConfigError> {
    let upper = name.trim().to_ascii_uppercase();
    let full = if upper.starts_with("SIG") {
        upper
    } else {
        format!("SIG{}", upper)
    };

    Signal::from_str(&full).map_err(|_| ConfigError::UnknownSignal(name.to_string()))
}

/// 向单个进程发送信号，不重试
///
/// ESRCH 表示进程已退出，归类为 AlreadyGone。
pub fn send_signal(pid: u32, signal: Signal) -> StopResult {
    let raw = match i32::try_from(pid) {
        Ok(raw) if raw > 0 => raw,
        // 0 或超出范围的 PID 会变成进程组语义，直接拒绝
        _ => return StopResult::Failed(Errno::EINVAL),
    };

    classify(kill(Pid::from_raw(raw), signal))
}

fn classify(result: nix::Result<()>) -> StopResult {
    match result {
        Ok(()) => StopResult::Stopped,
        Err(Errno::ESRCH) => StopResult::AlreadyGone,
        Err(errno) => StopResult::Failed(errno),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_signal_variants() {
        assert_eq!(parse_signal("TERM").unwrap(), Signal::SIGTERM);
        assert_eq!(parse_signal("sigterm").unwrap(), Signal::SIGTERM);
        assert_eq!(parse_signal("KILL").unwrap(), Signal::SIGKILL);
        assert_eq!(parse_signal(" int ").unwrap(), Signal::SIGINT);
        assert!(matches!(
            parse_signal("NOPE").unwrap_err(),
            ConfigError::UnknownSignal(_)
        ));
    }

    #[test]
    fn test_classify_errno() {
        assert_eq!(classify(Ok(())), StopResult::Stopped);
        assert_eq!(classify(Err(Errno::ESRCH)), StopResult::AlreadyGone);
        assert_eq!(classify(Err(Errno::EPERM)), StopResult::Failed(Errno::EPERM));
    }

    #[test]
    fn test_invalid_pid_is_rejected() {
        assert_eq!(send_signal(0, Signal::SIGTERM), StopResult::Failed(Errno::EINVAL));
        assert_eq!(send_signal(u32::MAX, Signal::SIGTERM), StopResult::Failed(Errno::EINVAL));
    }

    #[test]
    fn test_missing_process_is_already_gone() {
        // 超过 Linux pid_max 上限 (4194304)
        assert_eq!(send_signal(99_999_999, Signal::SIGTERM), StopResult::AlreadyGone);
    }
}
