pub mod availability;
pub mod billing;
pub mod distance_service;
pub mod draft;
