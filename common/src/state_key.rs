use std::fmt;
use std::hash::{Hash, Hasher};

use sha2::{Digest, Sha256};

/// Content digest of a game state, used to memoize work on identical positions.
///
/// The key is the SHA-256 of the state's `Hash` stream. Two states that hash the same way always
/// produce the same key, different contents collide with negligible probability.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateKey([u8; 32]);

impl StateKey {
    pub fn of<T: Hash + ?Sized>(state: &T) -> Self {
        let mut hasher = DigestHasher(Sha256::new());
        state.hash(&mut hasher);

        let digest = hasher.0.finalize();
        let mut key = [0u8; 32];
        key.copy_from_slice(&digest);

        StateKey(key)
    }
}

impl fmt::Debug for StateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StateKey(")?;
        for byte in &self.0[..8] {
            write!(f, "{:02x}", byte)?;
        }
        write!(f, ")")
    }
}

impl fmt::Display for StateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{:02x}", byte)?;
        }

        Ok(())
    }
}

struct DigestHasher(Sha256);

impl Hasher for DigestHasher {
    fn write(&mut self, bytes: &[u8]) {
        self.0.update(bytes);
    }

    fn finish(&self) -> u64 {
        let digest = self.0.clone().finalize();
        let mut head = [0u8; 8];
        head.copy_from_slice(&digest[..8]);
        u64::from_le_bytes(head)
    }
}
