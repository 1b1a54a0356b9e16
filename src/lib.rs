//! Primitive-aware hash map and set containers.
//!
//! The core is a dual-region open-addressing hash table ([`hashcore`]) with
//! explicit collision chaining and a versioned [`token`] protocol for safe
//! external iteration. Two leaf value stores sit alongside it: [`nulllist`]
//! for nullable-primitive values with adaptive compressed/flat layout, and
//! [`bitslist`] for values packed into 1-7 bits. [`bitlist`] is the
//! rank/select bit vector both of those are built on. [`maps`] wires these
//! together into concrete, usable containers.

pub mod bitlist;
pub mod bitslist;
pub mod capability;
pub mod error;
pub mod hashcore;
pub mod json;
pub mod list;
pub mod maps;
pub mod nulllist;
pub mod token;

pub use bitlist::BitList;
pub use bitslist::BitsList;
pub use error::{Error, ErrorKind, Result};
pub use hashcore::HashCore;
pub use list::ListImpl;
pub use maps::{IntBitsMap, IntIntMap, IntNullableMap, IntSet, StringMap, ToJsonValue};
pub use nulllist::NullList;
