//! Low-level building blocks for custom pipelines.
//!
//! Most users should go through [`crate::Detector`]. These items expose the
//! tensor layout constants and the backend-independent scalar decoder, which
//! is useful as a reference when validating accelerated builds.

pub use crate::decode::decode_scalar;
pub use crate::detect::INPUT_CHANNELS;
pub use crate::tensor::{ATTR_CX, ATTR_CY, ATTR_H, ATTR_OBJ, ATTR_W, BOX_ATTRIBUTES};
