//! Clipvault Database Layer
//!
//! This crate provides the video record store: the `VideoStore` trait that
//! handlers depend on and its Postgres-backed implementation.

pub mod db;
pub mod store;

pub use db::VideoRepository;
pub use store::VideoStore;
