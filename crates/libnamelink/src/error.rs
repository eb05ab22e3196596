#[derive(Debug, thiserror::Error)]
pub enum NameLinkError {
  #[error("invalid entity document: {0}")]
  InvalidEntity(#[from] serde_json::Error),
  #[error("invalid entity URI: {0}")]
  InvalidEntityUri(String),
}
