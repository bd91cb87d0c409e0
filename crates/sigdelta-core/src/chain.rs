//! Ordered, contiguous sequence of per-transition deltas.

use sigdelta_core_types::{Version, VersionTransition};

use crate::errors::{Result, SigDeltaError};
use crate::model::Delta;

/// Deltas keyed by version transition, ascending and without gaps
///
/// Every transition's `from` equals the previous transition's `to`, and no
/// transition appears twice. The only way to grow a chain is [`append`],
/// which enforces both.
///
/// [`append`]: DeltaChain::append
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeltaChain {
    links: Vec<(VersionTransition, Delta)>,
}

impl DeltaChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a chain from entries in any order
    ///
    /// Entries are sorted by transition before being appended, so callers
    /// such as directory loaders need not care about listing order.
    ///
    /// # Errors
    ///
    /// Same as [`DeltaChain::append`].
    pub fn from_entries<I>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (VersionTransition, Delta)>,
    {
        let mut entries: Vec<(VersionTransition, Delta)> = entries.into_iter().collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));

        let mut chain = Self::new();
        for (transition, delta) in entries {
            chain.append(transition, delta)?;
        }
        Ok(chain)
    }

    /// Append the delta for the next transition
    ///
    /// # Errors
    ///
    /// - `DuplicateTransition` if `transition` is already in the chain
    /// - `NonContiguousTransition` if the chain is non-empty and
    ///   `transition.from()` is not the current newest version
    pub fn append(&mut self, transition: VersionTransition, delta: Delta) -> Result<()> {
        if self.links.iter().any(|(t, _)| *t == transition) {
            return Err(SigDeltaError::DuplicateTransition { transition });
        }
        if let Some(head) = self.newest() {
            if transition.from() != head {
                return Err(SigDeltaError::NonContiguousTransition {
                    transition,
                    expected_from: head,
                });
            }
        }

        tracing::debug!(
            transition = %transition,
            delta_len = delta.len(),
            "appended delta"
        );
        self.links.push((transition, delta));
        Ok(())
    }

    /// Deltas covering `from ..= to`, ascending
    ///
    /// `from == to` yields an empty sequence.
    ///
    /// # Errors
    ///
    /// - `UnknownVersion` if either endpoint is not a boundary of the chain
    /// - `InvalidVersionRange` if `from > to`
    pub fn deltas_between(
        &self,
        from: Version,
        to: Version,
    ) -> Result<Vec<(&VersionTransition, &Delta)>> {
        let start = self.boundary_index(from)?;
        let end = self.boundary_index(to)?;
        if start > end {
            return Err(SigDeltaError::InvalidVersionRange { from, to });
        }
        Ok(self.links[start..end].iter().map(|(t, d)| (t, d)).collect())
    }

    /// Every version the chain touches, ascending
    pub fn boundaries(&self) -> Vec<Version> {
        match self.links.first() {
            None => Vec::new(),
            Some((first, _)) => std::iter::once(first.from())
                .chain(self.links.iter().map(|(t, _)| t.to()))
                .collect(),
        }
    }

    pub fn contains_boundary(&self, version: Version) -> bool {
        self.boundary_index(version).is_ok()
    }

    pub fn oldest(&self) -> Option<Version> {
        self.links.first().map(|(t, _)| t.from())
    }

    pub fn newest(&self) -> Option<Version> {
        self.links.last().map(|(t, _)| t.to())
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Links in ascending transition order
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (&VersionTransition, &Delta)> {
        self.links.iter().map(|(t, d)| (t, d))
    }

    /// Position of a boundary: 0 is the oldest `from`, `len()` the newest `to`
    fn boundary_index(&self, version: Version) -> Result<usize> {
        self.boundaries()
            .iter()
            .position(|v| *v == version)
            .ok_or(SigDeltaError::UnknownVersion { version })
    }
}
