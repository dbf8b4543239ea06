use thiserror::Error;

#[derive(Error, Debug)]
pub enum PhysicsError {
    #[error("cannot project an empty vertex list")]
    EmptyVertexList,
    #[error("body index {index} out of range for {len} bodies")]
    BodyIndexOutOfRange { index: usize, len: usize },
    #[error("contact references body {0} on both sides")]
    SameBody(usize),
    #[error("a polygon needs at least 3 vertices, got {0}")]
    TooFewVertices(usize),
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] serde_json::Error),
}
