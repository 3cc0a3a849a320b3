pub mod api;
pub mod config;
pub mod consts;
pub mod error;
pub mod export;
pub mod input;
pub mod model;
pub mod presentation;
pub mod reference;
pub mod scorer;
// cmd and reports belong to the binary crate (main.rs).
