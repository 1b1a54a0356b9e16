//! Representative façade instantiations of [`crate::hashcore::HashCore`].
//!
//! The core supports any (key-type × value-slot-kind) combination; rather
//! than generate the full combinatorial matrix (which the core's design
//! intentionally keeps mechanical and out of scope), this module wires up
//! one façade per value-slot kind named in the component design: a direct
//! primitive value ([`IntIntMap`]), a generic object-keyed map
//! ([`StringMap`]), a key-only set ([`IntSet`]), a nullable-primitive value
//! map backed by [`crate::nulllist::NullList`] ([`IntNullableMap`]), and a
//! bit-packed value map backed by [`crate::bitslist::BitsList`]
//! ([`IntBitsMap`]).

mod int_bits_map;
mod int_int_map;
mod int_nullable_map;
mod int_set;
mod string_map;

pub use int_bits_map::IntBitsMap;
pub use int_int_map::IntIntMap;
pub use int_nullable_map::IntNullableMap;
pub use int_set::IntSet;
pub use string_map::{StringMap, ToJsonValue};
