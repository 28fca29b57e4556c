pub mod catalog;
pub mod pack;
pub mod remote;
