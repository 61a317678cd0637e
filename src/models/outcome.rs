use nix::errno::Errno;
use std::fmt;

/// 单个进程的信号发送结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopResult {
    /// 信号已送达
    Stopped,
    /// 发送前进程已退出（ESRCH），视为成功
    AlreadyGone,
    /// 系统拒绝（例如 EPERM），保留原始 errno
    Failed(Errno),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StopOutcome {
    pub pid: u32,
    pub result: StopResult,
}

impl StopOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self.result, StopResult::Failed(_))
    }
}

/// 有信号被拒绝，或等待后仍有进程存活，即视为失败
pub fn batch_failed(outcomes: &[StopOutcome], survivors: &[u32]) -> bool {
    outcomes.iter().any(StopOutcome::is_failure) || !survivors.is_empty()
}

impl fmt::Display for StopOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.result {
            StopResult::Stopped => write!(f, "PID {}: stopped", self.pid),
            StopResult::AlreadyGone => write!(f, "PID {}: already gone", self.pid),
            StopResult::Failed(errno) => write!(f, "PID {}: failed ({})", self.pid, errno.desc()),
        }
    }
}
