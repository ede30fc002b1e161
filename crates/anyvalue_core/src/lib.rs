//! Public library API for dynamically shaped values over serde.

/// Dynamic value type, decode/encode algorithms, paths, and JSON helpers.
pub mod dynamic;
