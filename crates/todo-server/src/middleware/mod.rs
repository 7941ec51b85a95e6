//! Tower middleware applied around the router.

pub mod cors;
pub mod request_id;
