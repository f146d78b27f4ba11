pub mod buffer;
pub mod channel;
pub mod scope;
