pub mod cache;
pub mod common;
pub mod create;
pub mod export;
pub mod info;
pub mod inspect;
pub mod install;
pub mod profile;
