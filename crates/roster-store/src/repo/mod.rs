pub mod customers;

pub use customers::{create_customer, CreateOutcome, CustomerTable, CustomersRepo};
