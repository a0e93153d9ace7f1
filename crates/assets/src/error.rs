/// Errors from model loading.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("glTF parse error: {0}")]
    GltfParse(String),
    #[error("model has no geometry to bound")]
    EmptyModel,
    #[error("model loader stopped without a result")]
    LoaderDisconnected,
}
