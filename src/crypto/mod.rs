//! Password hashing for operator credentials.
//!
//! This module provides:
//! - Argon2id hashing into self-describing PHC strings (`hash`)
//! - Verification against a stored PHC string (`hash`)

pub mod hash;

pub use hash::{hash_password, hash_password_with_params, verify_password, Argon2Params};
