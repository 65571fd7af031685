//! Application layer orchestrating notification handling.
//!
//! `NotificationHandler` takes a gateway notification through lookup, consistency
//! checks and the state update, talking to the host only through the
//! `TransactionRepository` port.

pub mod notification;
