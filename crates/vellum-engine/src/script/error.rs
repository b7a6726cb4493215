use thiserror::Error;

use crate::codec::CodecError;
use crate::scene::{GeometryError, TextureError};

/// Errors reported back to the script caller.
///
/// All variants are recoverable at the call boundary: the operation is
/// aborted, the caller is notified through the script environment's own
/// error path, and the frame continues.
#[derive(Debug, Error)]
pub enum ScriptError {
    /// The handle is not in the registry: stale, foreign, or already
    /// destroyed. This is the liveness gate; the object is never touched.
    #[error("argument is not a scene object")]
    BadHandle,

    /// The handle is live but the object's variant cannot satisfy the
    /// requested operation.
    #[error("wrong type of scene object (expected {expected})")]
    WrongKind { expected: &'static str },

    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Texture(#[from] TextureError),

    #[error(transparent)]
    Codec(#[from] CodecError),
}
