#[derive(Debug, thiserror::Error)]
pub enum LauncherError {
    #[error("device not found: {0}")]
    DeviceNotFound(String),

    #[error("project not found: {0}")]
    ProjectNotFound(String),

    #[error("device name already exists: {0}")]
    DuplicateDeviceName(String),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("at least one project must be kept")]
    LastProject,

    #[error("storage error: {0}")]
    StorageError(String),

    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("io error: {0}")]
    IoError(#[from] std::io::Error),
}

impl LauncherError {
    /// 面向用户的简短标题，状态栏中与详细信息一起显示
    pub fn title(&self) -> &'static str {
        match self {
            LauncherError::DeviceNotFound(_) => "Device not found",
            LauncherError::ProjectNotFound(_) => "Project not found",
            LauncherError::DuplicateDeviceName(_) => "Duplicate device name",
            LauncherError::Validation(_) => "Please fill in all required fields",
            LauncherError::LastProject => "Cannot remove project",
            LauncherError::StorageError(_)
            | LauncherError::SerializationError(_)
            | LauncherError::IoError(_) => "Save failed",
        }
    }
}

pub type Result<T> = std::result::Result<T, LauncherError>;
