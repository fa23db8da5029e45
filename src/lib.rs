//! Query-side runtime for minimal perfect hash functions and (compressed)
//! static functions built on random 3-hypergraphs, following the
//! Genuzio–Ottaviano–Vigna (GOV) construction used by Sux4J/Sux4C.
//!
//! This crate loads artifacts produced by an external builder (construction
//! — solving the GF(2)/GF(3) linear system, assigning array values, building
//! Huffman tables — is out of scope) and answers lookups against them. Four
//! variants are provided:
//!
//! - [`Mph`]: a minimal perfect hash function, mapping a known key set
//!   bijectively onto `0..size()`.
//! - [`Sf`] (alias [`Sf3`]): a static function storing an arbitrary
//!   `width`-bit value per key, built over 3-hyperedges.
//! - [`Sf4`]: the same, built over 4-hyperedges.
//! - [`Csf3`]: a compressed static function that Huffman-codes its values,
//!   with an escape path for values too rare to be worth a codeword.
//!
//! Every variant implements [`StaticFunction`]; the three that can also
//! answer queries directly against a precomputed signature (skipping the
//! hash) implement [`SignatureQueryable`].

mod backing;
mod bits;
mod bucket;
mod csf3;
mod error;
mod io;
mod mph;
mod sf;
mod sf4;
mod spooky;
#[cfg(test)]
mod testutil;
mod traits;

pub use backing::BackingStoreStrategy;
pub use csf3::Csf3;
pub use error::LoadError;
pub use mph::Mph;
pub use sf::{Sf, Sf3};
pub use sf4::Sf4;
pub use spooky::spooky_short;
pub use traits::{SignatureQueryable, StaticFunction};

/// Re-exports of every public type and trait, for glob import.
pub mod prelude {
    pub use crate::backing::BackingStoreStrategy;
    pub use crate::csf3::Csf3;
    pub use crate::error::LoadError;
    pub use crate::mph::Mph;
    pub use crate::sf::{Sf, Sf3};
    pub use crate::sf4::Sf4;
    pub use crate::traits::{SignatureQueryable, StaticFunction};
}
