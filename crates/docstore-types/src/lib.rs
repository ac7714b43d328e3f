//! Foundation types for the docstore document store.
//!
//! This crate provides the object model shared by every other docstore
//! crate: the schema-less [`Object`], its truncated [`IndexObject`]
//! projection, the closed scalar [`Value`] union, the inbound wire
//! representation [`ApiObject`], and the [`User`] account shape.
//!
//! # Key Types
//!
//! - [`Value`] — closed tagged union of the scalar types a field may hold
//! - [`Object`] — a persisted document: unique UID plus arbitrary fields
//! - [`IndexObject`] — size-bounded projection of an object for indexing
//! - [`ApiObject`] — raw wire map, converted to an `Object` by stripping
//!   reserved bookkeeping keys
//! - [`User`] — account with username, password hash, and groups

pub mod api;
pub mod error;
pub mod object;
pub mod user;
pub mod value;

pub use api::{object_from_api, object_to_api, ApiObject, RESERVED_KEYS, UID_KEY};
pub use error::TypeError;
pub use object::{IndexObject, Object, INDEX_VALUE_MAX_SIZE};
pub use user::User;
pub use value::Value;
