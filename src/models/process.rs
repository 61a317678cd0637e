use serde::{Serialize, Serializer};
use std::path::PathBuf;
use std::time::Duration;

/// 进程表中的一行（匹配前的原始数据）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessEntry {
    pub pid: u32,
    /// 进程名（内核记录的可执行文件名）
    pub name: String,
    /// 完整命令行参数，cmd[0] 为解释器
    pub cmd: Vec<String>,
    /// 工作目录（无权限读取时为 None）
    pub cwd: Option<PathBuf>,
    pub run_time_secs: u64,
    pub memory_bytes: u64,
}

impl ProcessEntry {
    pub fn command_line(&self) -> String {
        if self.cmd.is_empty() {
            self.name.clone()
        } else {
            self.cmd.join(" ")
        }
    }
}

/// 服务进程快照
///
/// 每次查询时从进程表重新构造，构造后不再修改。
/// 快照读出后进程可能随时退出。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceProcess {
    /// 进程 ID
    pub pid: u32,
    /// 命令行
    pub command_line: String,
    /// 已运行时长
    #[serde(rename = "elapsed_secs", serialize_with = "serialize_secs")]
    pub elapsed: Duration,
    /// 内存使用量 (字节)
    pub memory_bytes: u64,
}

impl From<&ProcessEntry> for ServiceProcess {
    fn from(entry: &ProcessEntry) -> Self {
        Self {
            pid: entry.pid,
            command_line: entry.command_line(),
            elapsed: Duration::from_secs(entry.run_time_secs),
            memory_bytes: entry.memory_bytes,
        }
    }
}

fn serialize_secs<S: Serializer>(elapsed: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u64(elapsed.as_secs())
}

/// 按 `ps -o etime` 的格式输出：[[DD-]HH:]MM:SS
pub fn format_elapsed(elapsed: Duration) -> String {
    let total = elapsed.as_secs();
    let days = total / 86_400;
    let hours = (total % 86_400) / 3_600;
    let minutes = (total % 3_600) / 60;
    let seconds = total % 60;

    if days > 0 {
        format!("{}-{:02}:{:02}:{:02}", days, hours, minutes, seconds)
    } else if hours > 0 {
        format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{:02}:{:02}", minutes, seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_elapsed() {
        assert_eq!(format_elapsed(Duration::from_secs(0)), "00:00");
        assert_eq!(format_elapsed(Duration::from_secs(75)), "01:15");
        assert_eq!(format_elapsed(Duration::from_secs(3_661)), "01:01:01");
        assert_eq!(format_elapsed(Duration::from_secs(2 * 86_400 + 5)), "2-00:00:05");
    }

    #[test]
    fn test_command_line_falls_back_to_name() {
        let entry = ProcessEntry {
            pid: 42,
            name: "python3".to_string(),
            cmd: vec![],
            cwd: None,
            run_time_secs: 10,
            memory_bytes: 0,
        };
        assert_eq!(entry.command_line(), "python3");

        let process = ServiceProcess::from(&entry);
        assert_eq!(process.pid, 42);
        assert_eq!(process.elapsed, Duration::from_secs(10));
    }

    #[test]
    fn test_serialize_elapsed_as_seconds() {
        let process = ServiceProcess {
            pid: 7,
            command_line: "python /srv/app/server.py".to_string(),
            elapsed: Duration::from_millis(90_500),
            memory_bytes: 1024,
        };
        let value = serde_json::to_value(&process).unwrap();
        assert_eq!(value["pid"], 7);
        assert_eq!(value["elapsed_secs"], 90);
        assert_eq!(value["memory_bytes"], 1024);
    }
}
