//! Request and response bodies

pub mod catalog;
pub mod declarations;
