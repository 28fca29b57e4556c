pub mod category;
pub mod naming;
