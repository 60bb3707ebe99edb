use std::ffi::OsStr;
use std::io;
use std::process::{ExitStatus, Stdio};
use std::time::Duration;

use serde::Serialize;
use tokio::process::Command;

/// 外部命令的硬超时
pub const COMMAND_TIMEOUT: Duration = Duration::from_secs(30);

const UNKNOWN_ERROR: &str = "Unknown error occurred";

/// 外部命令失败的分类。Display 输出即面向用户的摘要信息：
/// 找不到可执行文件 → 超时 → stderr 文本 → 通用错误文本；其余 I/O 错误无文本时为未知错误。
#[derive(Debug, thiserror::Error)]
pub enum InvokeFailure {
    #[error("CLI executable not found")]
    NotFound,

    #[error("Command execution timed out")]
    TimedOut { after: Duration },

    #[error("{}", exit_message(.stderr, .status))]
    Exited {
        status: ExitStatus,
        stdout: String,
        stderr: String,
    },

    #[error("{}", io_message(.0))]
    Io(io::Error),
}

fn exit_message(stderr: &str, status: &ExitStatus) -> String {
    let stderr = stderr.trim();
    if !stderr.is_empty() {
        return stderr.to_string();
    }
    format!("Command failed: {}", status)
}

fn io_message(err: &io::Error) -> String {
    let text = err.to_string();
    if text.trim().is_empty() {
        UNKNOWN_ERROR.to_string()
    } else {
        text
    }
}

impl InvokeFailure {
    /// 仅当进程真正以数字退出码结束时才有值
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            InvokeFailure::Exited { status, .. } => status.code(),
            _ => None,
        }
    }

    pub fn stderr(&self) -> Option<&str> {
        match self {
            InvokeFailure::Exited { stderr, .. } if !stderr.is_empty() => Some(stderr),
            _ => None,
        }
    }

    pub fn stdout(&self) -> Option<&str> {
        match self {
            InvokeFailure::Exited { stdout, .. } if !stdout.is_empty() => Some(stdout),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, InvokeFailure::NotFound)
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, InvokeFailure::TimedOut { .. })
    }
}

/// 通用命令的执行结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CliResult {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stdout: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stderr: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<i32>,
}

/// 成功执行后捕获的输出
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
}

/// 以参数数组直接启动进程（不经过 shell），等待结束或超时。
/// 超时后子进程随 future 一起被丢弃并终止。
pub async fn execute<I, S>(
    cli_path: &str,
    args: I,
    timeout: Duration,
) -> Result<CommandOutput, InvokeFailure>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let mut command = Command::new(cli_path);
    command
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);
    tracing::info!("执行命令: {:?}", command.as_std());

    let child = command.spawn().map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => InvokeFailure::NotFound,
        _ => InvokeFailure::Io(e),
    })?;

    let output = match tokio::time::timeout(timeout, child.wait_with_output()).await {
        Ok(result) => result.map_err(InvokeFailure::Io)?,
        Err(_) => {
            tracing::error!("{} 执行超时 ({:?})", cli_path, timeout);
            return Err(InvokeFailure::TimedOut { after: timeout });
        }
    };

    let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();

    if !output.status.success() {
        return Err(InvokeFailure::Exited {
            status: output.status,
            stdout,
            stderr,
        });
    }
    if !stderr.is_empty() {
        tracing::warn!("CLI 输出错误信息: {}", stderr);
    }
    Ok(CommandOutput { stdout, stderr })
}

/// `<tool> open --project <path>`
pub async fn run_open(
    cli_path: &str,
    project_path: &str,
    timeout: Duration,
) -> Result<(), InvokeFailure> {
    match execute(cli_path, ["open", "--project", project_path], timeout).await {
        Ok(_) => Ok(()),
        Err(e) => {
            tracing::error!("打开项目失败 {}: {}", project_path, e);
            Err(e)
        }
    }
}

/// 任意参数的命令，结果统一折叠为 CliResult
pub async fn run_generic_command<I, S>(cli_path: &str, args: I, timeout: Duration) -> CliResult
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    match execute(cli_path, args, timeout).await {
        Ok(output) => CliResult {
            success: true,
            message: if output.stdout.is_empty() {
                "Command executed successfully".to_string()
            } else {
                output.stdout.clone()
            },
            error: None,
            stdout: Some(output.stdout),
            stderr: Some(output.stderr),
            code: Some(0),
        },
        Err(failure) => {
            tracing::error!("CLI 执行失败: {}", failure);
            CliResult {
                success: false,
                message: "Command execution failed".to_string(),
                error: Some(failure.to_string()),
                stdout: failure.stdout().map(str::to_string),
                stderr: failure.stderr().map(str::to_string),
                code: failure.exit_code(),
            }
        }
    }
}

/// 同步门面：持有单线程 runtime，供 TUI 与命令行直接调用
pub struct Invoker {
    runtime: tokio::runtime::Runtime,
    timeout: Duration,
}

impl Invoker {
    pub fn new() -> io::Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        Ok(Self {
            runtime,
            timeout: COMMAND_TIMEOUT,
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn open(&self, cli_path: &str, project_path: &str) -> Result<(), InvokeFailure> {
        self.runtime
            .block_on(run_open(cli_path, project_path, self.timeout))
    }

    pub fn run<I, S>(&self, cli_path: &str, args: I) -> CliResult
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.runtime
            .block_on(run_generic_command(cli_path, args, self.timeout))
    }
}
