use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// 默认设备的保留名称：没有设备与当前主机名匹配时使用
pub const DEFAULT_DEVICE_NAME: &str = "__default__";

/// 开发者工具 CLI 的常规安装位置
pub const DEFAULT_CLI_PATH: &str = "/Applications/wechatwebdevtools.app/Contents/MacOS/cli";

/// 完整的配置文档：设备 id → 设备记录，保持插入顺序
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct ConfigDocument {
    devices: IndexMap<String, DeviceRecord>,
}

/// 设备
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DeviceRecord {
    pub name: String,
    pub cli_path: String,
    #[serde(default)]
    pub projects: Vec<ProjectEntry>,
}

/// 项目（额外字段原样保留）
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProjectEntry {
    pub id: String,
    pub name: String,
    pub path: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl ProjectEntry {
    pub fn new(id: impl Into<String>, name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            path: path.into(),
            extra: serde_json::Map::new(),
        }
    }
}

impl DeviceRecord {
    pub fn new(name: impl Into<String>, cli_path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cli_path: cli_path.into(),
            projects: Vec::new(),
        }
    }

    pub fn with_project(mut self, project: ProjectEntry) -> Self {
        self.projects.push(project);
        self
    }

    pub fn is_default(&self) -> bool {
        self.name == DEFAULT_DEVICE_NAME
    }
}

impl ConfigDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&DeviceRecord> {
        self.devices.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut DeviceRecord> {
        self.devices.get_mut(id)
    }

    /// 整体替换 id 对应的记录，返回旧值
    pub fn insert(&mut self, id: impl Into<String>, record: DeviceRecord) -> Option<DeviceRecord> {
        self.devices.insert(id.into(), record)
    }

    /// 删除记录，保持其余记录的顺序
    pub fn remove(&mut self, id: &str) -> Option<DeviceRecord> {
        self.devices.shift_remove(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &DeviceRecord)> {
        self.devices.iter().map(|(id, d)| (id.as_str(), d))
    }

    /// 是否存在同名设备（排除 exclude_id 自身）
    pub fn is_device_name_exists(&self, name: &str, exclude_id: Option<&str>) -> bool {
        self.iter()
            .any(|(id, d)| d.name == name && Some(id) != exclude_id)
    }

    /// 按插入顺序返回第一个同名设备的 id
    pub fn device_id_by_name(&self, name: &str) -> Option<&str> {
        self.iter().find(|(_, d)| d.name == name).map(|(id, _)| id)
    }

    /// 按插入顺序返回第一个同名设备
    pub fn find_by_name(&self, name: &str) -> Option<(&str, &DeviceRecord)> {
        self.iter().find(|(_, d)| d.name == name)
    }
}
