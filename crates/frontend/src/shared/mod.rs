pub mod api_client;
pub mod components;
pub mod date_utils;
pub mod sync;
