use crate::error::{LauncherError, Result};
use crate::models::DeviceRecord;
use crate::storage::{generate_device_id, DocumentStore};

/// 保存设备成功后的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceOutcome {
    pub device_id: String,
    pub device_name: String,
}

/// 按插入顺序列出所有设备
pub fn list_devices(store: &impl DocumentStore) -> Vec<(String, DeviceRecord)> {
    store
        .load()
        .iter()
        .map(|(id, d)| (id.to_string(), d.clone()))
        .collect()
}

/// 新增或整体替换设备。名称与其他设备重复时拒绝；未提供 id 时生成新 id。
pub fn save_or_update_device(
    store: &impl DocumentStore,
    record: DeviceRecord,
    device_id: Option<&str>,
) -> Result<DeviceOutcome> {
    if device_id.is_some_and(|id| id.trim().is_empty()) {
        return Err(LauncherError::Validation("device id must not be empty".to_string()));
    }

    let mut doc = store.load();

    if doc.is_device_name_exists(&record.name, device_id) {
        return Err(LauncherError::DuplicateDeviceName(record.name));
    }

    let id = match device_id {
        Some(id) => id.to_string(),
        None => generate_device_id(),
    };
    let name = record.name.clone();
    doc.insert(id.clone(), record);
    store.save(&doc)?;

    tracing::info!(device = %name, id = %id, "设备已保存");
    Ok(DeviceOutcome {
        device_id: id,
        device_name: name,
    })
}

/// 删除设备及其全部项目
pub fn delete_device(store: &impl DocumentStore, device_id: &str) -> Result<DeviceRecord> {
    let mut doc = store.load();
    let removed = doc
        .remove(device_id)
        .ok_or_else(|| LauncherError::DeviceNotFound(device_id.to_string()))?;
    store.save(&doc)?;
    Ok(removed)
}

pub fn is_device_name_exists(store: &impl DocumentStore, name: &str, exclude_id: Option<&str>) -> bool {
    store.load().is_device_name_exists(name, exclude_id)
}

pub fn get_device_id_by_name(store: &impl DocumentStore, name: &str) -> Option<String> {
    store.load().device_id_by_name(name).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ProjectEntry;
    use crate::storage::{JsonFileStore, MemoryStore};
    use tempfile::TempDir;

    #[test]
    fn test_add_device_scenario() {
        let tmp = TempDir::new().unwrap();
        let store = JsonFileStore::new(tmp.path());
        assert!(store.load().is_empty());

        let record = DeviceRecord::new("MacBook", "/cli")
            .with_project(ProjectEntry::new("p1", "shop", "/w/shop"));
        let outcome = save_or_update_device(&store, record.clone(), None).unwrap();
        assert_eq!(outcome.device_name, "MacBook");

        let doc = store.load();
        assert_eq!(doc.len(), 1);
        let (id, stored) = doc.iter().next().unwrap();
        assert_eq!(id, outcome.device_id);
        assert!(!id.is_empty());
        assert_eq!(stored, &record);
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let store = MemoryStore::default();
        save_or_update_device(&store, DeviceRecord::new("A", "/cli"), None).unwrap();

        let err = save_or_update_device(&store, DeviceRecord::new("A", "/other"), None).unwrap_err();
        assert!(matches!(err, LauncherError::DuplicateDeviceName(ref n) if n == "A"));
        assert_eq!(store.snapshot().len(), 1);
    }

    #[test]
    fn test_update_keeps_own_name() {
        let store = MemoryStore::default();
        let outcome = save_or_update_device(&store, DeviceRecord::new("A", "/cli"), None).unwrap();

        let updated = save_or_update_device(
            &store,
            DeviceRecord::new("A", "/new-cli"),
            Some(&outcome.device_id),
        )
        .unwrap();

        assert_eq!(updated.device_id, outcome.device_id);
        let doc = store.snapshot();
        assert_eq!(doc.len(), 1);
        assert_eq!(doc.get(&outcome.device_id).unwrap().cli_path, "/new-cli");
    }

    #[test]
    fn test_rename_onto_existing_name_rejected() {
        let store = MemoryStore::default();
        save_or_update_device(&store, DeviceRecord::new("A", "/cli"), None).unwrap();
        let b = save_or_update_device(&store, DeviceRecord::new("B", "/cli"), None).unwrap();

        let err = save_or_update_device(&store, DeviceRecord::new("A", "/cli"), Some(&b.device_id))
            .unwrap_err();
        assert!(matches!(err, LauncherError::DuplicateDeviceName(_)));
    }

    #[test]
    fn test_delete_device() {
        let store = MemoryStore::default();
        let a = save_or_update_device(&store, DeviceRecord::new("A", "/cli"), None).unwrap();

        let removed = delete_device(&store, &a.device_id).unwrap();
        assert_eq!(removed.name, "A");
        assert!(store.snapshot().is_empty());

        let err = delete_device(&store, &a.device_id).unwrap_err();
        assert!(matches!(err, LauncherError::DeviceNotFound(_)));
    }

    #[test]
    fn test_lookup_helpers() {
        let store = MemoryStore::default();
        let a = save_or_update_device(&store, DeviceRecord::new("A", "/cli"), None).unwrap();

        assert_eq!(get_device_id_by_name(&store, "A"), Some(a.device_id.clone()));
        assert_eq!(get_device_id_by_name(&store, "Z"), None);
        assert!(is_device_name_exists(&store, "A", None));
        assert!(!is_device_name_exists(&store, "A", Some(&a.device_id)));
    }

    #[test]
    fn test_full_replacement_by_id() {
        let store = MemoryStore::default();
        let a = save_or_update_device(&store, DeviceRecord::new("A", "/cli"), None).unwrap();
        save_or_update_device(&store, DeviceRecord::new("A2", "/x"), Some(&a.device_id)).unwrap();

        assert_eq!(list_devices(&store), vec![(a.device_id, DeviceRecord::new("A2", "/x"))]);
    }

    #[test]
    fn test_blank_device_id_rejected() {
        let store = MemoryStore::default();
        for id in ["", "   "] {
            let err = save_or_update_device(&store, DeviceRecord::new("A", "/cli"), Some(id)).unwrap_err();
            assert!(matches!(err, LauncherError::Validation(_)));
        }
        assert!(store.snapshot().is_empty());
    }
}
