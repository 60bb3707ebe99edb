use std::io;
use std::process::Command;

/// 主机名查询失败时的占位名称
pub const UNKNOWN_DEVICE: &str = "Unknown Device";

/// 主机设备名来源
pub trait HostNameSource {
    fn query(&self) -> io::Result<String>;
}

impl<T: HostNameSource + ?Sized> HostNameSource for Box<T> {
    fn query(&self) -> io::Result<String> {
        (**self).query()
    }
}

/// 通过系统命令查询设备名：macOS 读取 ComputerName，其他平台使用 hostname
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemHostName;

impl SystemHostName {
    #[cfg(target_os = "macos")]
    fn command() -> Command {
        let mut cmd = Command::new("/usr/sbin/scutil");
        cmd.args(["--get", "ComputerName"]);
        cmd
    }

    #[cfg(not(target_os = "macos"))]
    fn command() -> Command {
        Command::new("hostname")
    }
}

impl HostNameSource for SystemHostName {
    fn query(&self) -> io::Result<String> {
        let output = Self::command().output()?;
        if !output.status.success() {
            return Err(io::Error::other(format!(
                "host name query exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }
        let name = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if name.is_empty() {
            return Err(io::Error::other("host name query returned nothing"));
        }
        Ok(name)
    }
}

/// 固定设备名（命令行覆盖或测试）
#[derive(Debug, Clone)]
pub struct FixedHostName(pub String);

impl HostNameSource for FixedHostName {
    fn query(&self) -> io::Result<String> {
        Ok(self.0.clone())
    }
}

/// 查询当前设备名，失败时退化为占位名称
pub fn current_device_name(source: &impl HostNameSource) -> String {
    match source.query() {
        Ok(name) => name,
        Err(e) => {
            tracing::warn!("获取设备名失败: {}", e);
            UNKNOWN_DEVICE.to_string()
        }
    }
}
