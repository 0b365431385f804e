pub mod engine;
pub mod key;
pub mod layout;
