use std::fmt;

use crate::models::process::{format_elapsed, ServiceProcess};

/// 服务运行状态报告
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusReport {
    /// 未运行（正常状态，不是错误）
    NotRunning,
    /// 单实例运行
    Healthy(ServiceProcess),
    /// 多个实例：上次未正常关闭或调用方存在竞争
    Ambiguous(Vec<ServiceProcess>),
}

impl StatusReport {
    pub fn from_processes(processes: &[ServiceProcess]) -> Self {
        match processes {
            [] => StatusReport::NotRunning,
            [single] => StatusReport::Healthy(single.clone()),
            many => StatusReport::Ambiguous(many.to_vec()),
        }
    }

    pub fn is_ambiguous(&self) -> bool {
        matches!(self, StatusReport::Ambiguous(_))
    }
}

impl fmt::Display for StatusReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusReport::NotRunning => write!(f, "❌ Service is not running"),
            StatusReport::Healthy(process) => {
                writeln!(f, "✅ Service is running")?;
                write_process(f, process)
            }
            StatusReport::Ambiguous(processes) => {
                writeln!(
                    f,
                    "⚠️  Multiple service instances running ({}), expected one",
                    processes.len()
                )?;
                for (i, process) in processes.iter().enumerate() {
                    if i > 0 {
                        writeln!(f)?;
                    }
                    write_process(f, process)?;
                }
                Ok(())
            }
        }
    }
}

fn write_process(f: &mut fmt::Formatter<'_>, process: &ServiceProcess) -> fmt::Result {
    writeln!(f, "   PID:     {}", process.pid)?;
    writeln!(f, "   Uptime:  {}", format_elapsed(process.elapsed))?;
    writeln!(f, "   Memory:  {:.1} MiB", process.memory_bytes as f64 / (1024.0 * 1024.0))?;
    write!(f, "   Command: {}", process.command_line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn sample(pid: u32) -> ServiceProcess {
        ServiceProcess {
            pid,
            command_line: format!("python /srv/app/server.py --id {}", pid),
            elapsed: Duration::from_secs(125),
            memory_bytes: 4 * 1024 * 1024,
        }
    }

    #[test]
    fn test_empty_is_not_running() {
        let report = StatusReport::from_processes(&[]);
        assert_eq!(report, StatusReport::NotRunning);
        assert!(report.to_string().contains("not running"));
    }

    #[test]
    fn test_single_is_healthy_with_uptime() {
        let report = StatusReport::from_processes(&[sample(100)]);
        assert_eq!(report, StatusReport::Healthy(sample(100)));

        let text = report.to_string();
        assert!(text.contains("PID:     100"));
        assert!(text.contains("Uptime:  02:05"));
        assert!(text.contains("4.0 MiB"));
    }

    #[test]
    fn test_multiple_is_ambiguous_warning() {
        let report = StatusReport::from_processes(&[sample(100), sample(200)]);
        assert!(report.is_ambiguous());

        let text = report.to_string();
        assert!(text.contains("Multiple service instances running (2)"));
        assert!(text.contains("PID:     100"));
        assert!(text.contains("PID:     200"));
    }
}
