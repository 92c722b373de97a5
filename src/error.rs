pub type PatchgridResult<T> = Result<T, PatchgridError>;

#[derive(thiserror::Error, Debug)]
pub enum PatchgridError {
    #[error("data load error: {0}")]
    DataLoad(String),

    #[error("unknown chart version: {0}")]
    UnknownVersion(String),

    #[error("unknown color space: {0}")]
    UnknownColorSpace(String),

    #[error("invalid display config: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PatchgridError {
    pub fn data_load(msg: impl Into<String>) -> Self {
        Self::DataLoad(msg.into())
    }

    pub fn unknown_version(name: impl Into<String>) -> Self {
        Self::UnknownVersion(name.into())
    }

    pub fn unknown_color_space(name: impl Into<String>) -> Self {
        Self::UnknownColorSpace(name.into())
    }

    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }
}
