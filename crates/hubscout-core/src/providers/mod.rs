pub mod hub;

pub use hub::HubProvider;
