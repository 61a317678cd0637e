use nix::sys::signal::Signal;
use std::process;
use std::thread;
use std::time::{Duration, Instant};

use crate::config::{ControllerConfig, ServiceSignature};
use crate::models::{ServiceProcess, StatusReport, StopOutcome, StopResult};
use crate::services::process_checker::{matching_processes, snapshot_processes};
use crate::services::signals::send_signal;

/// 服务进程生命周期控制器
///
/// 无内部状态：每次调用都重新读取系统进程表。
pub struct LifecycleController {
    config: ControllerConfig,
    signature: ServiceSignature,
}

impl LifecycleController {
    pub fn new(config: ControllerConfig) -> Self {
        let signature = config.signature();
        Self { config, signature }
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    pub fn signature(&self) -> &ServiceSignature {
        &self.signature
    }

    /// 查找所有服务进程（按 PID 升序）
    ///
    /// 未运行时返回空列表，从不失败。
    pub fn find(&self) -> Vec<ServiceProcess> {
        let entries = snapshot_processes();
        log::debug!(
            "Scanning {} processes for {} {}",
            entries.len(),
            self.signature.interpreter,
            self.signature.entry_point.display()
        );

        matching_processes(entries, &self.signature, process::id())
            .iter()
            .map(ServiceProcess::from)
            .collect()
    }

    /// 生成状态报告（只读）
    pub fn describe(&self, processes: &[ServiceProcess]) -> StatusReport {
        let report = StatusReport::from_processes(processes);
        if report.is_ambiguous() {
            log::warn!(
                "Found {} instances of {}, expected a single one",
                processes.len(),
                self.signature.entry_point.display()
            );
        }
        report
    }

    /// 向每个进程发送信号，逐个返回结果
    ///
    /// 单个进程失败不会中断后续进程。
    pub fn stop(&self, processes: &[ServiceProcess], signal: Signal) -> Vec<StopOutcome> {
        processes
            .iter()
            .map(|p| {
                log::debug!("Sending {} to PID {}", signal.as_str(), p.pid);
                let result = send_signal(p.pid, signal);
                match result {
                    StopResult::Stopped => log::info!("✓ Sent {} to PID {}", signal.as_str(), p.pid),
                    StopResult::AlreadyGone => log::info!("PID {} already exited", p.pid),
                    StopResult::Failed(errno) => {
                        log::warn!("Failed to signal PID {}: {}", p.pid, errno.desc())
                    }
                }
                StopOutcome { pid: p.pid, result }
            })
            .collect()
    }

    /// 等待给定 PID 从服务进程列表中消失
    ///
    /// 返回超时后仍在运行的 PID。
    pub fn wait_for_exit(&self, pids: &[u32], timeout: Duration, poll: Duration) -> Vec<u32> {
        let deadline = Instant::now() + timeout;
        loop {
            let running: Vec<u32> = self.find().iter().map(|p| p.pid).collect();
            let survivors: Vec<u32> = pids.iter().copied().filter(|pid| running.contains(pid)).collect();

            if survivors.is_empty() || Instant::now() >= deadline {
                return survivors;
            }
            thread::sleep(poll.min(deadline.saturating_duration_since(Instant::now())));
        }
    }
}
