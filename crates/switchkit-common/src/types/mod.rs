//! Core data types for the Switchkit kernel

pub mod amount;
pub mod position;
pub mod quote;
pub mod reserve;
