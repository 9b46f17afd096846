pub mod encryption;
pub mod export;
pub mod format;
#[cfg(not(target_arch = "wasm32"))]
pub mod json_file;
pub mod manager;
pub mod repository;
