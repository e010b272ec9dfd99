//! Utilities shared by every crate of the Ogone gateway client.

pub mod consts;
pub mod crypto;
pub mod errors;
pub mod fp_utils;
pub mod request;
pub mod types;

pub use errors::CustomResult;
pub use request::{Method, Request, RequestBuilder, RequestContent};
pub use types::{MinorUnit, StringMajorUnit};
