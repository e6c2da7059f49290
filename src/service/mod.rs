pub mod smoke;
pub mod waiter;
