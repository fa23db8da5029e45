//! Backing-store strategy for the shared bit array.
//!
//! The loader owns the backing array outright; queries only ever borrow it
//! read-only through `Deref<Target = [u64]>`. The mmap-based arm follows
//! `webgraph-rs`'s `MmapBackend`, and the huge-page hint mirrors Sux4J/Sux4C's
//! `USE_MMAP` branch in `mph.h` (`MAP_HUGETLB`-flagged anonymous `mmap`).

use std::ops::Deref;

/// How to provision the memory backing a loaded structure's shared array.
/// Purely a placement hint: it never changes query semantics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BackingStoreStrategy {
    /// A plain heap allocation (`Vec<u64>`).
    #[default]
    Heap,
    /// An anonymous huge-page mapping, to reduce TLB pressure for large
    /// arrays. Requires the `huge_pages` feature.
    #[cfg(feature = "huge_pages")]
    HugePages,
}

/// Owns the words of a loaded structure's shared array, regardless of which
/// [`BackingStoreStrategy`] provisioned them.
pub enum BackingStore {
    Heap(Vec<u64>),
    #[cfg(feature = "huge_pages")]
    HugePage {
        mmap: mmap_rs::MmapMut,
        len: usize,
    },
}

impl BackingStore {
    /// Moves `data` into storage provisioned according to `strategy`.
    pub fn provision(data: Vec<u64>, strategy: BackingStoreStrategy) -> anyhow::Result<Self> {
        match strategy {
            BackingStoreStrategy::Heap => Ok(BackingStore::Heap(data)),
            #[cfg(feature = "huge_pages")]
            BackingStoreStrategy::HugePages => {
                use anyhow::Context;
                let len = data.len();
                let byte_len = len * std::mem::size_of::<u64>();
                let mut mmap = mmap_rs::MmapOptions::new(byte_len.max(1))
                    .with_context(|| {
                        format!("cannot initialize huge-page mapping of size {byte_len}")
                    })?
                    .with_flags(mmap_rs::MmapFlags::HUGE_PAGES)
                    .map_mut()
                    .or_else(|_| {
                        // Huge pages may be unavailable (no hugetlbfs reservation
                        // configured); fall back to a plain anonymous mapping,
                        // since this is only a placement hint.
                        mmap_rs::MmapOptions::new(byte_len.max(1))
                            .expect("size already validated above")
                            .map_mut()
                    })
                    .map_err(|e| {
                        anyhow::anyhow!(crate::error::LoadError::AllocationFailure(format!(
                            "cannot provision huge-page-backed array of {byte_len} bytes: {e}"
                        )))
                    })?;
                mmap.as_mut_slice()[..byte_len].copy_from_slice(unsafe {
                    std::slice::from_raw_parts(data.as_ptr() as *const u8, byte_len)
                });
                Ok(BackingStore::HugePage { mmap, len })
            }
        }
    }
}

impl Deref for BackingStore {
    type Target = [u64];

    fn deref(&self) -> &[u64] {
        match self {
            BackingStore::Heap(v) => v,
            #[cfg(feature = "huge_pages")]
            BackingStore::HugePage { mmap, len } => unsafe {
                std::slice::from_raw_parts(mmap.as_ptr() as *const u64, *len)
            },
        }
    }
}

impl std::fmt::Debug for BackingStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackingStore").field("len", &self.len()).finish()
    }
}
