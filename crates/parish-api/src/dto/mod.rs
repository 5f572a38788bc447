//! Request and response bodies. camelCase on the wire.

pub mod request;
pub mod response;
