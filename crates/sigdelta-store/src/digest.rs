//! Chain digest canonicalization
//!
//! Computes a stable SHA256 digest of a delta chain so CI can pin the
//! validated chain

use serde::Serialize;
use sha2::{Digest, Sha256};
use sigdelta_core::DeltaChain;

use crate::errors::{encode_error, Result};
use crate::format_v0::DeltaFileV0;

/// Canonical representation of a chain for digest calculation
#[derive(Serialize)]
struct CanonicalChain {
    links: Vec<DeltaFileV0>,
}

/// Compute a stable digest for a chain
///
/// Returns the SHA256 hex digest of the canonical JSON form: links ascending
/// by transition, routines sorted by name, parameters in positional order.
/// The digest does not depend on the file encoding or layout the chain was
/// loaded from.
///
/// # Errors
///
/// Fails only if the canonical form cannot be serialized.
pub fn chain_digest(chain: &DeltaChain) -> Result<String> {
    let canonical = CanonicalChain {
        links: chain
            .iter()
            .map(|(transition, delta)| DeltaFileV0::from_delta(transition, delta))
            .collect(),
    };

    let json = serde_json::to_string(&canonical).map_err(|e| encode_error("chain_digest", e))?;

    let mut hasher = Sha256::new();
    hasher.update(json.as_bytes());
    Ok(hex::encode(hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use sigdelta_core::{Delta, RoutineChange, Signature, Version, VersionTransition};

    fn chain_with(ret: &str) -> DeltaChain {
        let transition = VersionTransition::new(Version::new(8, 3), Version::new(8, 4)).unwrap();
        let delta: Delta = vec![("f", RoutineChange::Added(Signature::new(ret)))]
            .into_iter()
            .collect();
        DeltaChain::from_entries(vec![(transition, delta)]).unwrap()
    }

    #[test]
    fn test_chain_digest_stable() {
        let digest1 = chain_digest(&chain_with("int")).unwrap();
        let digest2 = chain_digest(&chain_with("int")).unwrap();

        assert_eq!(digest1, digest2);
        assert_eq!(digest1.len(), 64);
    }

    #[test]
    fn test_chain_digest_content_sensitive() {
        assert_ne!(
            chain_digest(&chain_with("int")).unwrap(),
            chain_digest(&chain_with("string")).unwrap()
        );
        assert_ne!(
            chain_digest(&DeltaChain::new()).unwrap(),
            chain_digest(&chain_with("int")).unwrap()
        );
    }
}
