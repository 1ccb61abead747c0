pub mod builder;
pub mod entity;
pub mod error;
pub mod executor;
pub mod grouper;
pub mod service;
pub mod spec;
pub mod view;

#[cfg(test)]
pub mod testing;
