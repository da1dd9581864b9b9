pub mod customer;
pub mod email;
pub mod ids;

pub use customer::{Customer, NewCustomer};
pub use email::{is_valid_email, normalize_email};
pub use ids::CustomerId;
