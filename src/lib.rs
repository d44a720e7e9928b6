// Library for tests to access modules

pub mod analysis;
pub mod config;
pub mod error;
pub mod forecast;
pub mod history_repo;
pub mod models;
pub mod routes;
pub mod source;
pub mod view;
pub mod worker;
pub mod zabbix;
