//! Domain types of the Paymee adapter and the port to the host's records.

pub mod acquirer;
pub mod notification;
pub mod ports;
pub mod transaction;
