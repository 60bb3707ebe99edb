pub mod device;
pub mod host;
pub mod project;
pub mod resolver;

pub use device::DeviceOutcome;
pub use host::{current_device_name, FixedHostName, HostNameSource, SystemHostName, UNKNOWN_DEVICE};
pub use resolver::{resolve, Resolution, ResolutionTier, ResolvedDevice};

use crate::error::Result;
use crate::models::{ConfigDocument, DeviceRecord, ProjectEntry};
use crate::storage::DocumentStore;

/// 启动器：持有配置存储和主机名来源，所有界面通过它访问配置
pub struct Launcher<S, H> {
    store: S,
    host: H,
}

impl<S: DocumentStore, H: HostNameSource> Launcher<S, H> {
    pub fn new(store: S, host: H) -> Self {
        Self { store, host }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// 每次调用都从存储全量读取
    pub fn document(&self) -> ConfigDocument {
        self.store.load()
    }

    pub fn current_device_name(&self) -> String {
        current_device_name(&self.host)
    }

    pub fn resolve(&self) -> Resolution {
        resolve(&self.store.load(), &self.current_device_name())
    }

    pub fn current_device_config(&self) -> ResolvedDevice {
        self.resolve().device
    }

    pub fn current_device_name_with_fallback(&self) -> String {
        self.resolve().effective_name
    }

    pub fn list_devices(&self) -> Vec<(String, DeviceRecord)> {
        device::list_devices(&self.store)
    }

    pub fn save_or_update_device(
        &self,
        record: DeviceRecord,
        device_id: Option<&str>,
    ) -> Result<DeviceOutcome> {
        device::save_or_update_device(&self.store, record, device_id)
    }

    pub fn delete_device(&self, device_id: &str) -> Result<DeviceRecord> {
        device::delete_device(&self.store, device_id)
    }

    pub fn is_device_name_exists(&self, name: &str, exclude_id: Option<&str>) -> bool {
        device::is_device_name_exists(&self.store, name, exclude_id)
    }

    pub fn get_device_id_by_name(&self, name: &str) -> Option<String> {
        device::get_device_id_by_name(&self.store, name)
    }

    pub fn add_project(&self, device_id: &str, name: &str, path: &str) -> Result<ProjectEntry> {
        project::add_project(&self.store, device_id, name, path)
    }

    pub fn update_project(&self, device_id: &str, index: usize, entry: ProjectEntry) -> Result<()> {
        project::update_project(&self.store, device_id, index, entry)
    }

    pub fn remove_project(&self, device_id: &str, project_id: &str) -> Result<()> {
        project::remove_project(&self.store, device_id, project_id)
    }
}
