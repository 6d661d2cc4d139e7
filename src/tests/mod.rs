pub mod common;

pub mod cache_and_refresh_flag;
pub mod waiter_path;
