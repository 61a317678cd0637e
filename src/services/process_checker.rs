use sysinfo::{ProcessRefreshKind, ProcessesToUpdate, System, UpdateKind};

use crate::config::ServiceSignature;
use crate::models::ProcessEntry;

/// 读取当前进程表
///
/// 每次调用都重新创建 System，不缓存任何状态。
pub fn snapshot_processes() -> Vec<ProcessEntry> {
    let mut sys = System::new();
    sys.refresh_processes_specifics(
        ProcessesToUpdate::All,
        true,
        ProcessRefreshKind::nothing()
            .with_cmd(UpdateKind::Always)
            .with_cwd(UpdateKind::Always)
            .with_memory()
            .without_tasks(),
    );

    sys.processes()
        .iter()
        .map(|(pid, process)| ProcessEntry {
            pid: pid.as_u32(),
            name: process.name().to_string_lossy().into_owned(),
            cmd: process
                .cmd()
                .iter()
                .map(|s| s.to_string_lossy().into_owned())
                .collect(),
            cwd: process.cwd().map(|p| p.to_path_buf()),
            run_time_secs: process.run_time(),
            memory_bytes: process.memory(),
        })
        .collect()
}

/// 获取所有匹配的进程（按 PID 升序）
///
/// `exclude_pid` 用于排除调用方自身。
pub fn matching_processes(
    entries: Vec<ProcessEntry>,
    signature: &ServiceSignature,
    exclude_pid: u32,
) -> Vec<ProcessEntry> {
    let mut matched: Vec<ProcessEntry> = entries
        .into_iter()
        .filter(|entry| entry.pid != exclude_pid)
        .filter(|entry| {
            let is_match = signature.matches(entry);
            if is_match {
                log::debug!("Matched PID {}: {}", entry.pid, entry.command_line());
            }
            is_match
        })
        .collect();

    matched.sort_by_key(|entry| entry.pid);
    matched
}
