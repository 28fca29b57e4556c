pub mod collector;
pub mod processor;
pub mod state;
pub mod stats;
pub mod uploader;
pub mod validator;
