pub mod cart;
pub mod catalog;
pub mod clients;
pub mod deliveries;
pub mod sales;
