pub mod config;
pub mod logging;

pub mod downloader;
pub mod fetch;
pub mod manifest;
pub mod mirror;
pub mod storage;
pub mod url_model;
