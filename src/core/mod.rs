pub mod advice;
pub mod catalog;
pub mod checkout;
pub mod config;
