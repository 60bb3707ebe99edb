//! 设备表单会话：与界面无关的纯状态，界面只负责收集输入和显示错误。

use std::time::{Duration, Instant};

use crate::core::device::{save_or_update_device, DeviceOutcome};
use crate::error::{LauncherError, Result};
use crate::models::{ConfigDocument, DeviceRecord, ProjectEntry, DEFAULT_CLI_PATH};
use crate::storage::{generate_project_id, DocumentStore};
use crate::validation::{
    read_project_name, validate_cli_path, validate_device_name, validate_project,
    validate_project_directory, FormErrors, INVALID_PROJECT_DIR,
};

/// 校验错误的显示时长；下一次校验会覆盖截止时间
pub const ERROR_DISPLAY: Duration = Duration::from_secs(3);

/// 通过选择器设置项目路径的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathPick {
    /// 路径有效并已采用；项目名为空时可能从标记文件自动填充
    Accepted { autofilled_name: Option<String> },
    /// 路径无效且原路径也无效：字段被清空并显示错误
    Rejected,
    /// 路径无效但原路径有效：保留原路径
    KeptPrevious,
}

#[derive(Debug, Clone)]
pub struct DeviceForm {
    device_id: Option<String>,
    name: String,
    cli_path: String,
    projects: Vec<ProjectEntry>,
    errors: FormErrors,
    errors_visible_until: Option<Instant>,
}

impl DeviceForm {
    /// 新增设备：主机名未被占用时预填为设备名，并带一个空项目
    pub fn new_device(host_name: &str, doc: &ConfigDocument) -> Self {
        let name = if doc.find_by_name(host_name).is_none() {
            host_name.to_string()
        } else {
            String::new()
        };
        let mut form = Self {
            device_id: None,
            name,
            cli_path: DEFAULT_CLI_PATH.to_string(),
            projects: Vec::new(),
            errors: FormErrors::default(),
            errors_visible_until: None,
        };
        form.add_project();
        form
    }

    pub fn edit(device_id: &str, record: DeviceRecord) -> Self {
        Self {
            device_id: Some(device_id.to_string()),
            name: record.name,
            cli_path: record.cli_path,
            projects: record.projects,
            errors: FormErrors::default(),
            errors_visible_until: None,
        }
    }

    pub fn is_edit(&self) -> bool {
        self.device_id.is_some()
    }

    pub fn device_id(&self) -> Option<&str> {
        self.device_id.as_deref()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn cli_path(&self) -> &str {
        &self.cli_path
    }

    pub fn projects(&self) -> &[ProjectEntry] {
        &self.projects
    }

    pub fn set_name(&mut self, value: impl Into<String>) {
        self.name = value.into();
        self.errors.device_name = None;
    }

    pub fn set_cli_path(&mut self, value: impl Into<String>) {
        self.cli_path = value.into();
        self.errors.cli_path = None;
    }

    pub fn set_project_name(&mut self, index: usize, value: impl Into<String>) -> Result<()> {
        self.project_mut(index)?.name = value.into();
        if let Some(e) = self.errors.projects.get_mut(index) {
            e.name = None;
        }
        Ok(())
    }

    /// 手动输入路径：不检查标记文件，保存时只校验非空
    pub fn set_project_path(&mut self, index: usize, value: impl Into<String>) -> Result<()> {
        self.project_mut(index)?.path = value.into();
        self.clear_path_error(index);
        Ok(())
    }

    /// 选择器设置路径：严格检查标记文件
    pub fn pick_project_path(&mut self, index: usize, selected: &str, now: Instant) -> Result<PathPick> {
        let previous = self.project_mut(index)?.path.clone();
        self.clear_path_error(index);

        if selected.is_empty() {
            self.projects[index].path.clear();
            return Ok(PathPick::Accepted { autofilled_name: None });
        }

        if !validate_project_directory(selected) {
            let had_valid_path = !previous.is_empty() && validate_project_directory(&previous);
            if had_valid_path {
                return Ok(PathPick::KeptPrevious);
            }
            self.projects[index].path.clear();
            let mut errors = FormErrors::default();
            errors.projects = vec![Default::default(); self.projects.len()];
            errors.projects[index].path = Some(INVALID_PROJECT_DIR.to_string());
            self.show_errors(errors, now);
            return Ok(PathPick::Rejected);
        }

        let project = &mut self.projects[index];
        project.path = selected.to_string();
        let mut autofilled_name = None;
        if project.name.trim().is_empty() {
            if let Some(name) = read_project_name(selected) {
                project.name = name.clone();
                autofilled_name = Some(name);
            }
        }
        Ok(PathPick::Accepted { autofilled_name })
    }

    /// 追加一个空项目，返回其下标
    pub fn add_project(&mut self) -> usize {
        self.projects
            .push(ProjectEntry::new(generate_project_id(), "", ""));
        self.projects.len() - 1
    }

    /// 移除项目；表单中至少保留一个
    pub fn remove_project(&mut self, index: usize) -> Result<ProjectEntry> {
        if self.projects.len() <= 1 {
            return Err(LauncherError::LastProject);
        }
        self.project_mut(index)?;
        if index < self.errors.projects.len() {
            self.errors.projects.remove(index);
        }
        Ok(self.projects.remove(index))
    }

    /// 当前可见的错误；超过显示时长后返回 None
    pub fn visible_errors(&self, now: Instant) -> Option<&FormErrors> {
        match self.errors_visible_until {
            Some(until) if now < until && !self.errors.is_empty() => Some(&self.errors),
            _ => None,
        }
    }

    /// 校验必填字段，有错误时显示并返回 false
    pub fn validate(&mut self, now: Instant) -> bool {
        let errors = FormErrors {
            device_name: validate_device_name(&self.name),
            cli_path: validate_cli_path(&self.cli_path),
            projects: self.projects.iter().map(validate_project).collect(),
        };
        if errors.is_empty() {
            return true;
        }
        self.show_errors(errors, now);
        false
    }

    /// 去除首尾空白后的设备记录
    pub fn to_record(&self) -> DeviceRecord {
        DeviceRecord {
            name: self.name.trim().to_string(),
            cli_path: self.cli_path.trim().to_string(),
            projects: self
                .projects
                .iter()
                .map(|p| ProjectEntry {
                    name: p.name.trim().to_string(),
                    path: p.path.trim().to_string(),
                    ..p.clone()
                })
                .collect(),
        }
    }

    /// 校验并保存；新增设备保存后表单转为编辑该设备
    pub fn submit(&mut self, store: &impl DocumentStore, now: Instant) -> Result<DeviceOutcome> {
        if !self.validate(now) {
            return Err(LauncherError::Validation(self.errors.summary()));
        }
        let outcome = save_or_update_device(store, self.to_record(), self.device_id.as_deref())?;
        self.device_id = Some(outcome.device_id.clone());
        Ok(outcome)
    }

    fn show_errors(&mut self, errors: FormErrors, now: Instant) {
        self.errors = errors;
        self.errors_visible_until = Some(now + ERROR_DISPLAY);
    }

    fn clear_path_error(&mut self, index: usize) {
        if let Some(e) = self.errors.projects.get_mut(index) {
            e.path = None;
        }
    }

    fn project_mut(&mut self, index: usize) -> Result<&mut ProjectEntry> {
        self.projects
            .get_mut(index)
            .ok_or_else(|| LauncherError::ProjectNotFound(format!("#{}", index + 1)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use crate::validation::{PROJECT_CONFIG_JSON, PROJECT_PRIVATE_CONFIG_JSON, REQUIRED};
    use tempfile::TempDir;

    fn project_dir(name: Option<&str>) -> TempDir {
        let tmp = TempDir::new().unwrap();
        let body = match name {
            Some(n) => format!(r#"{{"projectname":"{}"}}"#, n),
            None => "{}".to_string(),
        };
        std::fs::write(tmp.path().join(PROJECT_CONFIG_JSON), body).unwrap();
        tmp
    }

    fn filled_form() -> DeviceForm {
        let mut form = DeviceForm::new_device("MacBook", &ConfigDocument::new());
        form.set_project_name(0, "shop").unwrap();
        form.set_project_path(0, "/w/shop").unwrap();
        form
    }

    #[test]
    fn test_new_device_defaults() {
        let form = DeviceForm::new_device("MacBook", &ConfigDocument::new());
        assert!(!form.is_edit());
        assert_eq!(form.name(), "MacBook");
        assert_eq!(form.cli_path(), DEFAULT_CLI_PATH);
        assert_eq!(form.projects().len(), 1);
        assert!(!form.projects()[0].id.is_empty());
    }

    #[test]
    fn test_new_device_skips_taken_host_name() {
        let mut doc = ConfigDocument::new();
        doc.insert("d", DeviceRecord::new("MacBook", "/cli"));
        let form = DeviceForm::new_device("MacBook", &doc);
        assert_eq!(form.name(), "");
    }

    #[test]
    fn test_cannot_remove_last_project() {
        let mut form = DeviceForm::new_device("MacBook", &ConfigDocument::new());
        let err = form.remove_project(0).unwrap_err();
        assert!(matches!(err, LauncherError::LastProject));
        assert_eq!(form.projects().len(), 1);
    }

    #[test]
    fn test_remove_project_leaving_one() {
        let mut form = DeviceForm::new_device("MacBook", &ConfigDocument::new());
        let second = form.add_project();
        assert_eq!(second, 1);
        let first_id = form.projects()[0].id.clone();

        let removed = form.remove_project(0).unwrap();
        assert_eq!(removed.id, first_id);
        assert_eq!(form.projects().len(), 1);
    }

    #[test]
    fn test_validation_errors_per_field() {
        let now = Instant::now();
        let mut form = DeviceForm::new_device("", &ConfigDocument::new());
        form.set_cli_path("  ");
        form.add_project();
        form.set_project_name(1, "named").unwrap();

        assert!(!form.validate(now));
        let errors = form.visible_errors(now).unwrap();
        assert_eq!(errors.device_name.as_deref(), Some(REQUIRED));
        assert_eq!(errors.cli_path.as_deref(), Some(REQUIRED));
        assert_eq!(errors.projects[0].name.as_deref(), Some(REQUIRED));
        assert_eq!(errors.projects[0].path.as_deref(), Some(REQUIRED));
        assert_eq!(errors.projects[1].name, None);
        assert_eq!(errors.projects[1].path.as_deref(), Some(REQUIRED));
    }

    #[test]
    fn test_errors_hide_after_display_window() {
        let now = Instant::now();
        let mut form = DeviceForm::new_device("", &ConfigDocument::new());
        assert!(!form.validate(now));

        assert!(form.visible_errors(now + Duration::from_secs(1)).is_some());
        assert!(form.visible_errors(now + ERROR_DISPLAY).is_none());

        // 新一次校验覆盖截止时间
        let later = now + Duration::from_secs(10);
        assert!(!form.validate(later));
        assert!(form.visible_errors(later + Duration::from_secs(2)).is_some());
    }

    #[test]
    fn test_editing_field_clears_its_error() {
        let now = Instant::now();
        let mut form = DeviceForm::new_device("", &ConfigDocument::new());
        assert!(!form.validate(now));
        form.set_name("MacBook");

        let errors = form.visible_errors(now).unwrap();
        assert_eq!(errors.device_name, None);
        assert_eq!(errors.projects[0].name.as_deref(), Some(REQUIRED));
    }

    #[test]
    fn test_submit_saves_trimmed_record() {
        let store = MemoryStore::default();
        let mut form = filled_form();
        form.set_name("  MacBook ");
        form.set_project_name(0, " shop ").unwrap();

        let outcome = form.submit(&store, Instant::now()).unwrap();
        assert_eq!(outcome.device_name, "MacBook");
        assert!(form.is_edit());

        let doc = store.snapshot();
        let record = doc.get(&outcome.device_id).unwrap();
        assert_eq!(record.name, "MacBook");
        assert_eq!(record.projects[0].name, "shop");
        assert_eq!(record.projects[0].path, "/w/shop");
    }

    #[test]
    fn test_submit_accepts_path_without_markers() {
        // 手动填写的路径保存时不检查标记文件
        let tmp = TempDir::new().unwrap();
        let store = MemoryStore::default();
        let mut form = filled_form();
        form.set_project_path(0, tmp.path().to_str().unwrap()).unwrap();

        assert!(!validate_project_directory(tmp.path()));
        assert!(form.submit(&store, Instant::now()).is_ok());
    }

    #[test]
    fn test_submit_rejects_invalid_form_without_saving() {
        let store = MemoryStore::default();
        let mut form = DeviceForm::new_device("MacBook", &ConfigDocument::new());

        let err = form.submit(&store, Instant::now()).unwrap_err();
        assert!(matches!(err, LauncherError::Validation(_)));
        assert!(store.snapshot().is_empty());
    }

    #[test]
    fn test_submit_rejects_duplicate_name() {
        let mut doc = ConfigDocument::new();
        doc.insert("existing", DeviceRecord::new("MacBook", "/cli"));
        let store = MemoryStore::new(doc);

        let mut form = filled_form();
        form.set_name("MacBook");
        let err = form.submit(&store, Instant::now()).unwrap_err();
        assert!(matches!(err, LauncherError::DuplicateDeviceName(_)));
        assert_eq!(store.snapshot().len(), 1);
    }

    #[test]
    fn test_edit_resubmits_same_id() {
        let store = MemoryStore::default();
        let mut form = filled_form();
        let first = form.submit(&store, Instant::now()).unwrap();

        let record = store.snapshot().get(&first.device_id).unwrap().clone();
        let mut edit = DeviceForm::edit(&first.device_id, record);
        edit.set_cli_path("/new/cli");
        let second = edit.submit(&store, Instant::now()).unwrap();

        assert_eq!(first.device_id, second.device_id);
        assert_eq!(store.snapshot().len(), 1);
    }

    #[test]
    fn test_pick_valid_dir_autofills_name() {
        let dir = project_dir(Some("mall%20app"));
        let mut form = DeviceForm::new_device("MacBook", &ConfigDocument::new());

        let pick = form
            .pick_project_path(0, dir.path().to_str().unwrap(), Instant::now())
            .unwrap();
        assert_eq!(pick, PathPick::Accepted { autofilled_name: Some("mall app".into()) });
        assert_eq!(form.projects()[0].name, "mall app");
    }

    #[test]
    fn test_pick_keeps_existing_name() {
        let dir = project_dir(Some("from-file"));
        let mut form = DeviceForm::new_device("MacBook", &ConfigDocument::new());
        form.set_project_name(0, "mine").unwrap();

        let pick = form
            .pick_project_path(0, dir.path().to_str().unwrap(), Instant::now())
            .unwrap();
        assert_eq!(pick, PathPick::Accepted { autofilled_name: None });
        assert_eq!(form.projects()[0].name, "mine");
    }

    #[test]
    fn test_pick_invalid_dir_rejected() {
        let now = Instant::now();
        let bad = TempDir::new().unwrap();
        let mut form = DeviceForm::new_device("MacBook", &ConfigDocument::new());

        let pick = form.pick_project_path(0, bad.path().to_str().unwrap(), now).unwrap();
        assert_eq!(pick, PathPick::Rejected);
        assert_eq!(form.projects()[0].path, "");
        let errors = form.visible_errors(now).unwrap();
        assert_eq!(errors.projects[0].path.as_deref(), Some(INVALID_PROJECT_DIR));
    }

    #[test]
    fn test_pick_invalid_dir_keeps_previous_valid_path() {
        let good = TempDir::new().unwrap();
        std::fs::write(good.path().join(PROJECT_PRIVATE_CONFIG_JSON), "{}").unwrap();
        let bad = TempDir::new().unwrap();
        let good_path = good.path().to_str().unwrap().to_string();

        let mut form = DeviceForm::new_device("MacBook", &ConfigDocument::new());
        form.pick_project_path(0, &good_path, Instant::now()).unwrap();

        let pick = form
            .pick_project_path(0, bad.path().to_str().unwrap(), Instant::now())
            .unwrap();
        assert_eq!(pick, PathPick::KeptPrevious);
        assert_eq!(form.projects()[0].path, good_path);
    }

    #[test]
    fn test_index_out_of_range() {
        let mut form = DeviceForm::new_device("MacBook", &ConfigDocument::new());
        assert!(matches!(
            form.set_project_name(3, "x"),
            Err(LauncherError::ProjectNotFound(_))
        ));
    }
}
