//! # Base types for chessbot
//!
//! This is an auxiliary crate for `chessbot`, which contains some core stuff. It was split from
//! the main crate, so everything declared here can be used in the build script for `chessbot`.
//!
//! Normally you don't want to use this crate directly. Use `chessbot` instead.

pub mod geometry;
pub mod types;
