//! Message-pattern listener (NestJS TCP transport)

pub mod codec;
pub mod dispatcher;
pub mod server;
