pub mod cart;
pub mod client;
pub mod delivery;
pub mod product;
pub mod sale;

pub use cart::{Cart, CartError, CartLine};
pub use client::{Client, NewClient};
pub use delivery::{Delivery, DeliveryStatus, NewDelivery};
pub use product::{Category, NewProduct, Product};
pub use sale::{
    DeliveryType, Sale, SaleConfirmation, SaleDetail, SaleItem, SaleLine, SaleRequest, SaleStatus,
};
