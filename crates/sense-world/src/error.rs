use thiserror::Error;

#[derive(Debug, Error)]
pub enum WorldError {
    #[error("terrain parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("cell ({x}, {y}) is outside the terrain map")]
    OutOfBounds { x: i32, y: i32 },
}

pub type WorldResult<T> = Result<T, WorldError>;
