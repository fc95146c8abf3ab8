//! Platform Layer
//!
//! Cross-cutting security primitives shared by domain crates:
//! - `password` - Argon2id password hashing and verification
//! - `token` - signed bearer token issue/verify

pub mod password;
pub mod token;
