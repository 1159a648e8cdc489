//! Model prelude. Generated by dalgen-codegen 0.1.0, do not edit.

pub use super::user::{User, UserActiveModel, UserEntity};
