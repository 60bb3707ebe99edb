use std::path::Path;

use serde::Deserialize;

use crate::models::ProjectEntry;

/// 项目根目录标记文件
pub const PROJECT_CONFIG_JSON: &str = "project.config.json";
pub const PROJECT_PRIVATE_CONFIG_JSON: &str = "project.private.config.json";

pub const REQUIRED: &str = "Required";

pub const INVALID_PROJECT_DIR: &str =
    "Not a valid project directory (missing project.config.json or project.private.config.json)";

/// 单个项目的字段错误
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectErrors {
    pub name: Option<String>,
    pub path: Option<String>,
}

impl ProjectErrors {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.path.is_none()
    }
}

/// 设备表单的全部字段错误；projects 与表单中的项目一一对应
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors {
    pub device_name: Option<String>,
    pub cli_path: Option<String>,
    pub projects: Vec<ProjectErrors>,
}

impl FormErrors {
    pub fn is_empty(&self) -> bool {
        self.device_name.is_none()
            && self.cli_path.is_none()
            && self.projects.iter().all(ProjectErrors::is_empty)
    }

    /// 拼接为一行摘要，供状态栏显示
    pub fn summary(&self) -> String {
        let mut parts = Vec::new();
        if let Some(e) = &self.device_name {
            parts.push(format!("device name: {}", e));
        }
        if let Some(e) = &self.cli_path {
            parts.push(format!("CLI path: {}", e));
        }
        for (i, p) in self.projects.iter().enumerate() {
            if let Some(e) = &p.name {
                parts.push(format!("project {} name: {}", i + 1, e));
            }
            if let Some(e) = &p.path {
                parts.push(format!("project {} path: {}", i + 1, e));
            }
        }
        parts.join("; ")
    }
}

fn required(value: &str) -> Option<String> {
    if value.trim().is_empty() {
        Some(REQUIRED.to_string())
    } else {
        None
    }
}

pub fn validate_device_name(name: &str) -> Option<String> {
    required(name)
}

pub fn validate_cli_path(path: &str) -> Option<String> {
    required(path)
}

/// 保存时只检查必填，不检查标记文件
pub fn validate_project(project: &ProjectEntry) -> ProjectErrors {
    ProjectErrors {
        name: required(&project.name),
        path: required(&project.path),
    }
}

/// 目录中存在任一标记文件即视为有效项目根目录
pub fn validate_project_directory(path: impl AsRef<Path>) -> bool {
    let dir = path.as_ref();
    dir.join(PROJECT_CONFIG_JSON).exists() || dir.join(PROJECT_PRIVATE_CONFIG_JSON).exists()
}

#[derive(Deserialize)]
struct MarkerFile {
    projectname: Option<String>,
}

fn read_marker_name(file: &Path) -> Option<String> {
    let content = std::fs::read_to_string(file).ok()?;
    let marker: MarkerFile = match serde_json::from_str(&content) {
        Ok(m) => m,
        Err(e) => {
            tracing::debug!("无法解析 {:?}: {}", file, e);
            return None;
        }
    };
    let raw = marker.projectname.filter(|n| !n.is_empty())?;
    Some(match urlencoding::decode(&raw) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => raw,
    })
}

/// 从标记文件读取项目名，private 文件优先
pub fn read_project_name(path: impl AsRef<Path>) -> Option<String> {
    let dir = path.as_ref();
    let private = dir.join(PROJECT_PRIVATE_CONFIG_JSON);
    if private.exists() {
        if let Some(name) = read_marker_name(&private) {
            return Some(name);
        }
    }
    let public = dir.join(PROJECT_CONFIG_JSON);
    if public.exists() {
        return read_marker_name(&public);
    }
    None
}
