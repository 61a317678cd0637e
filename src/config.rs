use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::error::ConfigError;
use crate::models::ProcessEntry;

/// 控制器配置
///
/// 所有输入在构造时显式传入，控制器本身不读取当前目录或环境变量。
#[derive(Debug, Clone)]
pub struct ControllerConfig {
    /// 安装根目录（绝对路径）
    pub root: PathBuf,
    /// 服务入口，相对于 root
    pub entry_point: PathBuf,
    /// 解释器名称，例如 python
    pub interpreter: String,
}

impl ControllerConfig {
    pub fn new(
        root: impl Into<PathBuf>,
        entry_point: impl Into<PathBuf>,
        interpreter: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let root = root.into();
        let entry_point = entry_point.into();
        let interpreter = interpreter.into();

        if !root.is_absolute() {
            return Err(ConfigError::RelativeRoot(root));
        }
        if entry_point.as_os_str().is_empty() {
            return Err(ConfigError::EmptyEntryPoint);
        }
        if interpreter.is_empty() || interpreter.contains(std::path::is_separator) {
            return Err(ConfigError::InvalidInterpreter(interpreter));
        }

        Ok(Self { root, entry_point, interpreter })
    }

    /// 服务入口的绝对路径
    pub fn entry_point_path(&self) -> PathBuf {
        normalize(&self.root.join(&self.entry_point))
    }

    /// 解析符号链接后的入口路径
    ///
    /// 内核报告的 cwd 已解析符号链接，root 经由链接配置时需要这个形式才能匹配。
    pub fn resolved_entry_point_path(&self) -> Option<PathBuf> {
        let entry_point = self.entry_point_path();
        fs::canonicalize(&entry_point)
            .or_else(|_| fs::canonicalize(&self.root).map(|root| normalize(&root.join(&self.entry_point))))
            .ok()
            .filter(|resolved| *resolved != entry_point)
    }

    pub fn signature(&self) -> ServiceSignature {
        ServiceSignature {
            interpreter: self.interpreter.clone(),
            entry_point: self.entry_point_path(),
            resolved_entry_point: self.resolved_entry_point_path(),
        }
    }
}

/// 服务匹配规则：解释器名 + 入口绝对路径
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceSignature {
    pub interpreter: String,
    pub entry_point: PathBuf,
    /// 入口路径的真实形式（与 entry_point 不同时才有值）
    pub resolved_entry_point: Option<PathBuf>,
}

impl ServiceSignature {
    pub fn matches(&self, entry: &ProcessEntry) -> bool {
        self.interpreter_matches(entry) && self.entry_point_matches(entry)
    }

    fn interpreter_matches(&self, entry: &ProcessEntry) -> bool {
        let program = match entry.cmd.first() {
            Some(arg0) => Path::new(arg0)
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
            None => entry.name.clone(),
        };

        is_interpreter_name(&program, &self.interpreter)
    }

    fn entry_point_matches(&self, entry: &ProcessEntry) -> bool {
        entry.cmd.iter().skip(1).any(|arg| {
            let arg = Path::new(arg);
            let candidate = if arg.is_absolute() {
                arg.to_path_buf()
            } else {
                match &entry.cwd {
                    Some(cwd) => cwd.join(arg),
                    None => return false,
                }
            };
            self.is_entry_point(&normalize(&candidate))
        })
    }

    fn is_entry_point(&self, candidate: &Path) -> bool {
        if self.is_known_form(candidate) {
            return true;
        }
        // 参数可能经由符号链接指向入口，文件名相同时才访问文件系统
        if candidate.file_name() != self.entry_point.file_name() {
            return false;
        }
        match fs::canonicalize(candidate) {
            Ok(real) => self.is_known_form(&real),
            Err(_) => false,
        }
    }

    fn is_known_form(&self, path: &Path) -> bool {
        path == self.entry_point || self.resolved_entry_point.as_deref() == Some(path)
    }
}

/// `python` 匹配 `python`、`python3`、`python3.12`，不匹配 `ipython` 或 `python-config`
pub fn is_interpreter_name(program: &str, interpreter: &str) -> bool {
    match program.strip_prefix(interpreter) {
        Some(suffix) => suffix.chars().all(|c| c.is_ascii_digit() || c == '.'),
        None => false,
    }
}

/// 纯字面规范化：处理 `.` 与 `..`，不访问文件系统
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}
