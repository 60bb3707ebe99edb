use crate::models::{ConfigDocument, DeviceRecord, DEFAULT_CLI_PATH, DEFAULT_DEVICE_NAME};

/// 命中的查找层级
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionTier {
    /// 存在与当前主机同名的设备
    Matched,
    /// 使用 "__default__" 设备
    Default,
    /// 两者都没有，临时合成的设备
    Ephemeral,
}

/// 解析出的设备：已持久化的记录，或从未写入存储的临时记录
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedDevice {
    Stored { id: String, record: DeviceRecord },
    Ephemeral(DeviceRecord),
}

impl ResolvedDevice {
    pub fn record(&self) -> &DeviceRecord {
        match self {
            ResolvedDevice::Stored { record, .. } => record,
            ResolvedDevice::Ephemeral(record) => record,
        }
    }

    /// 只有已持久化的设备才有 id，可按 id 更新
    pub fn stored_id(&self) -> Option<&str> {
        match self {
            ResolvedDevice::Stored { id, .. } => Some(id),
            ResolvedDevice::Ephemeral(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub tier: ResolutionTier,
    /// 主机报告的设备名
    pub current_name: String,
    /// 实际使用的设备名；Default 和 Ephemeral 层级均为 "__default__"
    pub effective_name: String,
    pub device: ResolvedDevice,
}

impl Resolution {
    /// 当前设备是否借用了其他设备的配置
    pub fn uses_fallback(&self) -> bool {
        self.current_name != self.effective_name
    }
}

/// 三级查找：同名设备 → "__default__" 设备 → 临时合成设备
pub fn resolve(doc: &ConfigDocument, current_name: &str) -> Resolution {
    if let Some((id, record)) = doc.find_by_name(current_name) {
        return Resolution {
            tier: ResolutionTier::Matched,
            current_name: current_name.to_string(),
            effective_name: current_name.to_string(),
            device: ResolvedDevice::Stored {
                id: id.to_string(),
                record: record.clone(),
            },
        };
    }

    if let Some((id, record)) = doc.iter().find(|(_, d)| d.is_default()) {
        return Resolution {
            tier: ResolutionTier::Default,
            current_name: current_name.to_string(),
            effective_name: DEFAULT_DEVICE_NAME.to_string(),
            device: ResolvedDevice::Stored {
                id: id.to_string(),
                record: record.clone(),
            },
        };
    }

    // "__default__" 在这里只是信号值，并不代表存在该记录
    Resolution {
        tier: ResolutionTier::Ephemeral,
        current_name: current_name.to_string(),
        effective_name: DEFAULT_DEVICE_NAME.to_string(),
        device: ResolvedDevice::Ephemeral(DeviceRecord::new(current_name, DEFAULT_CLI_PATH)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ProjectEntry;
    use proptest::prelude::*;

    fn device(name: &str) -> DeviceRecord {
        DeviceRecord::new(name, "/cli").with_project(ProjectEntry::new("p", "proj", "/w/proj"))
    }

    #[test]
    fn test_matched_wins_over_default() {
        let mut doc = ConfigDocument::new();
        doc.insert("id-default", device(DEFAULT_DEVICE_NAME));
        doc.insert("id-a", device("A"));

        let r = resolve(&doc, "A");
        assert_eq!(r.tier, ResolutionTier::Matched);
        assert_eq!(r.effective_name, "A");
        assert_eq!(r.device.stored_id(), Some("id-a"));
        assert!(!r.uses_fallback());
    }

    #[test]
    fn test_default_only() {
        let mut doc = ConfigDocument::new();
        doc.insert("id-default", device(DEFAULT_DEVICE_NAME));

        let r = resolve(&doc, "X");
        assert_eq!(r.tier, ResolutionTier::Default);
        assert_eq!(r.effective_name, DEFAULT_DEVICE_NAME);
        assert_eq!(r.device.record().name, DEFAULT_DEVICE_NAME);
        assert_eq!(r.device.stored_id(), Some("id-default"));
        assert!(r.uses_fallback());
    }

    #[test]
    fn test_ephemeral_when_nothing_matches() {
        let mut doc = ConfigDocument::new();
        doc.insert("id-b", device("B"));

        let r = resolve(&doc, "X");
        assert_eq!(r.tier, ResolutionTier::Ephemeral);
        assert_eq!(r.effective_name, DEFAULT_DEVICE_NAME);
        assert_eq!(r.device.stored_id(), None);
        let record = r.device.record();
        assert_eq!(record.name, "X");
        assert_eq!(record.cli_path, DEFAULT_CLI_PATH);
        assert!(record.projects.is_empty());
    }

    #[test]
    fn test_empty_document_is_ephemeral() {
        let r = resolve(&ConfigDocument::new(), "X");
        assert_eq!(r.tier, ResolutionTier::Ephemeral);
    }

    #[test]
    fn test_first_match_in_insertion_order() {
        let mut doc = ConfigDocument::new();
        doc.insert("first", DeviceRecord::new("A", "/one"));
        doc.insert("second", DeviceRecord::new("A", "/two"));

        let r = resolve(&doc, "A");
        assert_eq!(r.device.stored_id(), Some("first"));
        assert_eq!(r.device.record().cli_path, "/one");
    }

    proptest! {
        #[test]
        fn prop_tier_matches_document(
            names in proptest::collection::vec("[A-C]|__default__", 0..6),
            host in "[A-D]",
        ) {
            let mut doc = ConfigDocument::new();
            for (i, name) in names.iter().enumerate() {
                doc.insert(format!("id-{}", i), DeviceRecord::new(name.clone(), "/cli"));
            }

            let r = resolve(&doc, &host);
            let has_match = names.iter().any(|n| n == &host);
            let has_default = names.iter().any(|n| n == DEFAULT_DEVICE_NAME);

            if has_match {
                prop_assert_eq!(r.tier, ResolutionTier::Matched);
                prop_assert_eq!(&r.effective_name, &host);
                prop_assert_eq!(&r.device.record().name, &host);
            } else if has_default {
                prop_assert_eq!(r.tier, ResolutionTier::Default);
                prop_assert_eq!(r.effective_name.as_str(), DEFAULT_DEVICE_NAME);
                prop_assert_eq!(r.device.record().name.as_str(), DEFAULT_DEVICE_NAME);
            } else {
                prop_assert_eq!(r.tier, ResolutionTier::Ephemeral);
                prop_assert_eq!(r.effective_name.as_str(), DEFAULT_DEVICE_NAME);
                prop_assert_eq!(&r.device.record().name, &host);
                prop_assert!(r.device.stored_id().is_none());
            }
        }
    }
}
