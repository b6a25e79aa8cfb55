pub mod health;
pub mod repayments;
