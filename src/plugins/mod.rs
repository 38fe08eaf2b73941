//! Built-in plugins.
//!
//! - `top`: inline identity, greets at `/plugin-top`
//! - `external`: identity from `Cargo.toml`, echoes its options at `/plugin-external`

pub mod external;
pub mod top;
