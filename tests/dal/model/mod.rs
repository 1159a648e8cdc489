//! Model index. Generated by dalgen-codegen 0.1.0, do not edit.

pub mod prelude;

pub mod user;
