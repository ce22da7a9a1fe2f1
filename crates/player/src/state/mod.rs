//! Shared, observable state owned by a session view

mod message_store;

pub use message_store::MessageStore;
