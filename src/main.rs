use anyhow::{Context, Result};
use clap::Parser;
use std::process::ExitCode;
use std::time::Duration;

mod cli;
mod config;
mod error;
mod models;
mod services;

use cli::{Command, CommandArgs};
use config::ControllerConfig;
use models::{batch_failed, format_elapsed, StatusReport};
use services::{parse_signal, LifecycleController};

const WAIT_POLL_INTERVAL: Duration = Duration::from_millis(200);

fn main() -> Result<ExitCode> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = CommandArgs::parse();
    let config = resolve_config(&args)?;
    let controller = LifecycleController::new(config);

    log::debug!(
        "Service signature: {} {} (root {})",
        controller.signature().interpreter,
        controller.signature().entry_point.display(),
        controller.config().root.display()
    );

    match args.command {
        Command::List { json } => list(&controller, json),
        Command::Status => status(&controller),
        Command::Terminate { signal, wait } => terminate(&controller, &signal, wait),
    }
}

/// 只在这里读取当前目录，控制器本身只接收显式配置
fn resolve_config(args: &CommandArgs) -> Result<ControllerConfig> {
    let cwd = std::env::current_dir().context("failed to read current directory")?;
    let root = match &args.root {
        Some(root) if root.is_absolute() => root.clone(),
        Some(root) => cwd.join(root),
        None => cwd,
    };
    // 与内核报告的 cwd 保持一致；root 不存在时保留原样
    let root = std::fs::canonicalize(&root).unwrap_or(root);

    ControllerConfig::new(root, args.entry_point.clone(), args.interpreter.clone())
        .context("invalid controller configuration")
}

fn list(controller: &LifecycleController, json: bool) -> Result<ExitCode> {
    let processes = controller.find();

    if json {
        println!("{}", serde_json::to_string_pretty(&processes)?);
        return Ok(ExitCode::SUCCESS);
    }

    if processes.is_empty() {
        println!("No service processes found");
        return Ok(ExitCode::SUCCESS);
    }

    println!("{:>8}  {:>12}  COMMAND", "PID", "ELAPSED");
    for p in &processes {
        println!("{:>8}  {:>12}  {}", p.pid, format_elapsed(p.elapsed), p.command_line);
    }
    Ok(ExitCode::SUCCESS)
}

fn status(controller: &LifecycleController) -> Result<ExitCode> {
    let processes = controller.find();
    println!("{}", controller.describe(&processes));
    Ok(ExitCode::SUCCESS)
}

fn terminate(controller: &LifecycleController, signal: &str, wait: Option<u64>) -> Result<ExitCode> {
    let signal = parse_signal(signal)?;
    let processes = controller.find();

    if processes.is_empty() {
        println!("Service is not running, nothing to stop");
        return Ok(ExitCode::SUCCESS);
    }

    // 多实例时全部停止，只给出警告
    if StatusReport::from_processes(&processes).is_ambiguous() {
        println!("⚠️  {} instances found, signalling all of them", processes.len());
    }

    let outcomes = controller.stop(&processes, signal);
    for outcome in &outcomes {
        println!("{}", outcome);
    }
    let mut survivors = Vec::new();
    if let Some(secs) = wait {
        let pids: Vec<u32> = outcomes
            .iter()
            .filter(|o| !o.is_failure())
            .map(|o| o.pid)
            .collect();
        survivors = controller.wait_for_exit(&pids, Duration::from_secs(secs), WAIT_POLL_INTERVAL);

        if survivors.is_empty() {
            println!("✅ Service stopped");
        } else {
            println!("❌ Still running after {}s: {:?}", secs, survivors);
        }
    }

    Ok(if batch_failed(&outcomes, &survivors) {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}
