mod file;

use std::cell::RefCell;

use uuid::Uuid;

use crate::error::Result;
use crate::models::ConfigDocument;

pub use file::{default_support_dir, JsonFileStore, CONFIG_FILE_NAME};

/// 配置文档的持久化接口。
/// load 永不失败（缺失或损坏时返回空文档），save 的错误必须传给调用方。
pub trait DocumentStore {
    fn load(&self) -> ConfigDocument;
    fn save(&self, doc: &ConfigDocument) -> Result<()>;
}

/// 内存存储，用于测试替换文件存储
#[derive(Debug, Default)]
pub struct MemoryStore {
    doc: RefCell<ConfigDocument>,
}

impl MemoryStore {
    pub fn new(doc: ConfigDocument) -> Self {
        Self {
            doc: RefCell::new(doc),
        }
    }

    pub fn snapshot(&self) -> ConfigDocument {
        self.doc.borrow().clone()
    }
}

impl DocumentStore for MemoryStore {
    fn load(&self) -> ConfigDocument {
        self.doc.borrow().clone()
    }

    fn save(&self, doc: &ConfigDocument) -> Result<()> {
        *self.doc.borrow_mut() = doc.clone();
        Ok(())
    }
}

pub fn generate_device_id() -> String {
    Uuid::new_v4().to_string()
}

pub fn generate_project_id() -> String {
    Uuid::new_v4().to_string()
}
