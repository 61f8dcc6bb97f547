pub mod hub;
pub mod login;
pub mod purchase_requests;
