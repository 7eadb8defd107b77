pub mod chat;
pub mod processor;

pub use chat::ChatScreen;
pub use processor::ProcessorScreen;
