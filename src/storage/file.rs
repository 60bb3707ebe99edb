use std::path::{Path, PathBuf};

use crate::error::{LauncherError, Result};
use crate::models::ConfigDocument;

use super::DocumentStore;

/// 配置文件名
pub const CONFIG_FILE_NAME: &str = "config.json";

/// 支持目录名（位于系统数据目录下）
const SUPPORT_DIR_NAME: &str = "devtool-launcher";

/// 默认支持目录：系统数据目录下的 devtool-launcher，取不到时退回当前目录
pub fn default_support_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(SUPPORT_DIR_NAME)
}

/// 存储引擎：单个 JSON 文件，每次查询全量读取，每次修改全量写回
pub struct JsonFileStore {
    support_dir: PathBuf,
    file_path: PathBuf,
}

impl JsonFileStore {
    pub fn new(support_dir: &Path) -> Self {
        Self {
            support_dir: support_dir.to_path_buf(),
            file_path: support_dir.join(CONFIG_FILE_NAME),
        }
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    fn ensure_support_dir(&self) -> std::io::Result<()> {
        if !self.support_dir.exists() {
            std::fs::create_dir_all(&self.support_dir)?;
        }
        Ok(())
    }
}

impl DocumentStore for JsonFileStore {
    /// 文件不存在返回空文档；目录创建失败、读取失败或解析失败都记录日志并返回空文档
    fn load(&self) -> ConfigDocument {
        if let Err(e) = self.ensure_support_dir() {
            tracing::warn!("无法创建支持目录 {:?}: {}", self.support_dir, e);
            return ConfigDocument::new();
        }
        if !self.file_path.exists() {
            return ConfigDocument::new();
        }
        match std::fs::read_to_string(&self.file_path) {
            Ok(content) => match serde_json::from_str::<ConfigDocument>(&content) {
                Ok(doc) => doc,
                Err(e) => {
                    tracing::warn!("配置文件损坏，使用空配置: {}", e);
                    ConfigDocument::new()
                }
            },
            Err(e) => {
                tracing::warn!("无法读取配置文件，使用空配置: {}", e);
                ConfigDocument::new()
            }
        }
    }

    /// 序列化为格式化 JSON 并覆盖写入；I/O 错误向上传递
    fn save(&self, doc: &ConfigDocument) -> Result<()> {
        let json = serde_json::to_string_pretty(doc)
            .map_err(|e| LauncherError::StorageError(e.to_string()))?;

        self.ensure_support_dir()?;
        std::fs::write(&self.file_path, json)?;
        tracing::debug!("已保存 {} 个设备到 {:?}", doc.len(), self.file_path);
        Ok(())
    }
}
