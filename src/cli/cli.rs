use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// svcctl - 服务进程查找与停止工具
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// 安装根目录（默认当前目录）
    #[arg(short, long, env = "SVCCTL_ROOT", global = true)]
    pub root: Option<PathBuf>,

    /// 服务入口，相对于安装根目录
    #[arg(short, long, env = "SVCCTL_ENTRY_POINT", default_value = "server.py", global = true)]
    pub entry_point: PathBuf,

    /// 解释器名称
    #[arg(short, long, env = "SVCCTL_INTERPRETER", default_value = "python", global = true)]
    pub interpreter: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// 列出服务进程
    List {
        /// 以 JSON 输出
        #[arg(long)]
        json: bool,
    },

    /// 显示运行状态
    Status,

    /// 向所有服务进程发送信号
    Terminate {
        /// 信号名称，例如 TERM、INT、KILL
        #[arg(default_value = "TERM")]
        signal: String,

        /// 发送后等待进程退出的秒数
        #[arg(short, long, value_name = "SECS")]
        wait: Option<u64>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        CommandArgs::command().debug_assert();
    }

    #[test]
    fn test_terminate_defaults_to_term() {
        let args = CommandArgs::try_parse_from(["svcctl", "terminate"]).unwrap();
        match args.command {
            Command::Terminate { signal, wait } => {
                assert_eq!(signal, "TERM");
                assert_eq!(wait, None);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_global_options_after_verb() {
        let args = CommandArgs::try_parse_from([
            "svcctl", "list", "--json", "--root", "/srv/app", "--interpreter", "python3",
        ])
        .unwrap();
        assert_eq!(args.root, Some(PathBuf::from("/srv/app")));
        assert_eq!(args.interpreter, "python3");
        assert!(matches!(args.command, Command::List { json: true }));
    }
}
