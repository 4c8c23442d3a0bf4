//! A hasher which just proxies for the integer it's given. Handy for maps keyed
//! by ids that are already well spread out, and for tests that want to reason
//! about which key landed where.

use std::hash::{BuildHasher, Hasher};

/// Proxies integers for themselves. Only integer keys are supported; anything
/// that writes more than eight bytes panics.
#[derive(Default, Debug, Clone, Copy)]
pub struct IdentityHasher(u64);

impl Hasher for IdentityHasher {
    fn write(&mut self, bytes: &[u8]) {
        assert!(bytes.len() <= 8, "identity hashing only works on integers");
        for byte in bytes.iter().rev() {
            self.0 = (self.0 << 8) | *byte as u64;
        }
    }

    fn write_u8(&mut self, i: u8) {
        self.0 = i as u64;
    }

    fn write_u16(&mut self, i: u16) {
        self.0 = i as u64;
    }

    fn write_u32(&mut self, i: u32) {
        self.0 = i as u64;
    }

    fn write_u64(&mut self, i: u64) {
        self.0 = i;
    }

    fn write_usize(&mut self, i: usize) {
        self.0 = i as u64;
    }

    fn finish(&self) -> u64 {
        self.0
    }
}

/// Builds new [`IdentityHasher`]s on demand.
#[derive(Default, Debug, Clone, Copy)]
pub struct BuildIdentityHasher;

impl BuildHasher for BuildIdentityHasher {
    type Hasher = IdentityHasher;

    fn build_hasher(&self) -> Self::Hasher {
        IdentityHasher(0)
    }
}
