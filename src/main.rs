pub mod core;
pub mod error;
pub mod form;
pub mod invoker;
pub mod models;
pub mod storage;
pub mod tui;
pub mod validation;

use std::path::{Path, PathBuf};
use std::process;
use std::sync::Mutex;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::core::{FixedHostName, HostNameSource, Launcher, SystemHostName};
use crate::invoker::Invoker;
use crate::storage::{default_support_dir, JsonFileStore};

type AppLauncher = Launcher<JsonFileStore, Box<dyn HostNameSource>>;

/// 按设备管理开发者工具项目并一键打开
#[derive(Parser)]
#[command(name = "devtool-launcher", version, about)]
struct Cli {
    /// 配置目录（包含 config.json）
    #[arg(long, env = "DEVTOOL_LAUNCHER_DIR")]
    config_dir: Option<PathBuf>,

    /// 覆盖系统报告的设备名
    #[arg(long)]
    device_name: Option<String>,

    /// 日志过滤（RUST_LOG 优先）
    #[arg(long, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// 打开当前设备下的项目（按名称或 id）
    Open { project: String },
    /// 列出当前设备的项目
    List,
    /// 列出所有设备
    Devices,
    /// 显示当前设备名与实际使用的设备配置
    Whoami,
    /// 用当前设备的 CLI 执行任意参数
    Exec {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
}

fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

const LOG_FILE_NAME: &str = "launcher.log";

/// 以追加方式打开日志文件，保留之前会话的日志
fn open_log_file(support_dir: &Path) -> std::io::Result<std::fs::File> {
    std::fs::create_dir_all(support_dir)?;
    std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(support_dir.join(LOG_FILE_NAME))
}

/// TUI 模式下日志写入支持目录，避免破坏终端画面
fn init_tui_logging(support_dir: &Path, level: &str) {
    match open_log_file(support_dir) {
        Ok(file) => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter(level))
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        Err(e) => eprintln!("Failed to open log file: {}", e),
    }
}

fn init_cli_logging(level: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(level))
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    let support_dir = cli.config_dir.clone().unwrap_or_else(default_support_dir);

    match &cli.command {
        None => init_tui_logging(&support_dir, &cli.log_level),
        Some(_) => init_cli_logging(&cli.log_level),
    }

    let host: Box<dyn HostNameSource> = match cli.device_name.clone() {
        Some(name) => Box::new(FixedHostName(name)),
        None => Box::new(SystemHostName),
    };
    let launcher = Launcher::new(JsonFileStore::new(&support_dir), host);

    let invoker = match Invoker::new() {
        Ok(invoker) => invoker,
        Err(e) => {
            eprintln!("Failed to initialize: {}", e);
            process::exit(1);
        }
    };

    let code = match cli.command {
        None => {
            let mut app = tui::App::new(launcher, invoker);
            match app.run() {
                Ok(()) => 0,
                Err(e) => {
                    eprintln!("Error: {}", e);
                    1
                }
            }
        }
        Some(Commands::Open { project }) => run_open(&launcher, &invoker, &project),
        Some(Commands::List) => run_list(&launcher),
        Some(Commands::Devices) => run_devices(&launcher),
        Some(Commands::Whoami) => run_whoami(&launcher),
        Some(Commands::Exec { args }) => run_exec(&launcher, &invoker, &args),
    };
    process::exit(code);
}

fn run_open(launcher: &AppLauncher, invoker: &Invoker, query: &str) -> i32 {
    let resolution = launcher.resolve();
    let record = resolution.device.record();
    let project = record
        .projects
        .iter()
        .find(|p| p.id == query || p.name == query)
        .or_else(|| {
            let needle = query.to_lowercase();
            record
                .projects
                .iter()
                .find(|p| p.name.to_lowercase().contains(&needle))
        });

    let Some(project) = project else {
        eprintln!(
            "Project not found: no project matching \"{}\" on device \"{}\"",
            query, resolution.effective_name
        );
        return 1;
    };

    match invoker.open(&record.cli_path, &project.path) {
        Ok(()) => {
            println!("Opened project: {}", project.name);
            0
        }
        Err(e) => {
            eprintln!("Failed to open project: {}", e);
            1
        }
    }
}

fn run_list(launcher: &AppLauncher) -> i32 {
    let resolution = launcher.resolve();
    if resolution.uses_fallback() {
        println!(
            "Device \"{}\" (using \"{}\" configuration)",
            resolution.current_name, resolution.effective_name
        );
    } else {
        println!("Device \"{}\"", resolution.current_name);
    }
    let projects = &resolution.device.record().projects;
    if projects.is_empty() {
        println!("  (no projects)");
    }
    for project in projects {
        println!("  {}\t{}", project.name, project.path);
    }
    0
}

fn run_devices(launcher: &AppLauncher) -> i32 {
    let current = launcher.current_device_name();
    for (id, device) in launcher.list_devices() {
        let marker = if device.name == current { " [current]" } else { "" };
        println!(
            "{}\t{} ({} projects){}",
            id,
            device.name,
            device.projects.len(),
            marker
        );
    }
    0
}

fn run_whoami(launcher: &AppLauncher) -> i32 {
    let resolution = launcher.resolve();
    println!("current:   {}", resolution.current_name);
    println!("effective: {}", resolution.effective_name);
    println!("tier:      {:?}", resolution.tier);
    0
}

fn run_exec(launcher: &AppLauncher, invoker: &Invoker, args: &[String]) -> i32 {
    let resolution = launcher.resolve();
    let result = invoker.run(&resolution.device.record().cli_path, args);
    match serde_json::to_string_pretty(&result) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize result: {}", e),
    }
    if result.success {
        0
    } else {
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_log_file_appends_across_sessions() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("support");

        writeln!(open_log_file(&dir).unwrap(), "first").unwrap();
        writeln!(open_log_file(&dir).unwrap(), "second").unwrap();

        let content = std::fs::read_to_string(dir.join(LOG_FILE_NAME)).unwrap();
        assert_eq!(content, "first\nsecond\n");
    }
}
