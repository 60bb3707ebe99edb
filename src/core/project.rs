use crate::error::{LauncherError, Result};
use crate::models::ProjectEntry;
use crate::storage::{generate_project_id, DocumentStore};

/// 向设备追加项目，生成新的项目 id
pub fn add_project(
    store: &impl DocumentStore,
    device_id: &str,
    name: &str,
    path: &str,
) -> Result<ProjectEntry> {
    let mut doc = store.load();
    let device = doc
        .get_mut(device_id)
        .ok_or_else(|| LauncherError::DeviceNotFound(device_id.to_string()))?;

    let project = ProjectEntry::new(generate_project_id(), name, path);
    device.projects.push(project.clone());
    store.save(&doc)?;

    Ok(project)
}

/// 按下标整体替换项目
pub fn update_project(
    store: &impl DocumentStore,
    device_id: &str,
    index: usize,
    project: ProjectEntry,
) -> Result<()> {
    let mut doc = store.load();
    let device = doc
        .get_mut(device_id)
        .ok_or_else(|| LauncherError::DeviceNotFound(device_id.to_string()))?;

    let slot = device
        .projects
        .get_mut(index)
        .ok_or_else(|| LauncherError::ProjectNotFound(format!("#{}", index)))?;
    *slot = project;
    store.save(&doc)
}

/// 按 id 移除项目；id 不存在时不做修改
pub fn remove_project(store: &impl DocumentStore, device_id: &str, project_id: &str) -> Result<()> {
    let mut doc = store.load();
    let device = doc
        .get_mut(device_id)
        .ok_or_else(|| LauncherError::DeviceNotFound(device_id.to_string()))?;

    device.projects.retain(|p| p.id != project_id);
    store.save(&doc)
}

/// 列出设备下的项目，保持显示顺序
pub fn list_projects(store: &impl DocumentStore, device_id: &str) -> Result<Vec<ProjectEntry>> {
    store
        .load()
        .get(device_id)
        .map(|d| d.projects.clone())
        .ok_or_else(|| LauncherError::DeviceNotFound(device_id.to_string()))
}
