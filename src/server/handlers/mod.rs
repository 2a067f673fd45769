//! HTTP handlers, one module per resource group

pub mod accounts;
pub mod auth;
pub mod carts;
pub mod contacts;
pub mod health;
