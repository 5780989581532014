//! API Routes

pub mod status;
