pub mod account;
pub mod invoice;
pub mod service;
pub mod tariff;
pub mod vehicle;
