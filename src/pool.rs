// pool.rs - Checkout of a shared compiled pattern's matcher.
//
// One canonical matcher exists per compiled pattern for its whole lifetime,
// gated by a binary availability token. A checkout either takes the token
// without waiting or, when the canonical matcher is on loan, spawns an
// independent clone of the compiled state. Contention therefore costs an
// allocation, never a wait.

use parking_lot::{Mutex, MutexGuard};
use std::sync::Arc;

use crate::engine::{CompiledPattern, Matcher};
use crate::error::RegexError;
use crate::options::MatchOptions;

/// Wraps a compiled pattern's canonical matcher behind an availability
/// token and hands out exclusive leases on it.
pub struct CheckoutPool {
    compiled: Arc<dyn CompiledPattern>,
    canonical: Mutex<Box<dyn Matcher>>,
}

impl CheckoutPool {
    /// Build a pool around `compiled`, spawning its canonical matcher.
    pub fn new(compiled: Arc<dyn CompiledPattern>) -> Result<CheckoutPool, RegexError> {
        let canonical = Mutex::new(compiled.spawn_matcher()?);
        Ok(CheckoutPool { compiled, canonical })
    }

    /// The compiled pattern shared by all leases.
    pub fn compiled(&self) -> &Arc<dyn CompiledPattern> {
        &self.compiled
    }

    /// Obtain temporary exclusive use of a matcher.
    ///
    /// The token acquisition is zero-wait: when the canonical matcher is
    /// already leased, an independent clone is spawned instead and the pool
    /// state is left untouched. Errors only if that clone fails
    /// ([`RegexError::CloneFailed`]); the pool remains valid afterwards.
    pub fn checkout(&self, options: MatchOptions) -> Result<Lease<'_>, RegexError> {
        let inner = match self.canonical.try_lock() {
            Some(guard) => LeaseInner::Canonical(guard),
            None => {
                log::debug!("canonical matcher busy; spawning a clone");
                LeaseInner::Cloned(self.compiled.spawn_matcher()?)
            }
        };
        Ok(Lease {
            inner: Some(inner),
            options,
        })
    }
}

enum LeaseInner<'p> {
    /// The canonical matcher, on loan; holding the guard is holding the
    /// availability token.
    Canonical(MutexGuard<'p, Box<dyn Matcher>>),
    /// An independent clone created because the canonical matcher was busy.
    /// Never re-enters the pool.
    Cloned(Box<dyn Matcher>),
}

/// Temporary exclusive use of one matcher, paired with a release.
///
/// Releasing a canonical lease resets the matcher to its neutral state and
/// returns the token; releasing a cloned lease discards the clone. Release
/// is idempotent and also runs on drop, so every exit path, including early
/// abandonment and unwinding, releases exactly once.
pub struct Lease<'p> {
    inner: Option<LeaseInner<'p>>,
    options: MatchOptions,
}

impl<'p> Lease<'p> {
    /// The leased matcher, or `None` once released.
    pub fn matcher(&mut self) -> Option<&mut dyn Matcher> {
        match &mut self.inner {
            Some(LeaseInner::Canonical(guard)) => Some(&mut ***guard),
            Some(LeaseInner::Cloned(matcher)) => Some(&mut **matcher),
            None => None,
        }
    }

    /// The match options this lease was checked out under.
    pub fn options(&self) -> MatchOptions {
        self.options
    }

    /// Whether this lease holds a clone rather than the canonical matcher.
    pub fn is_cloned(&self) -> bool {
        matches!(self.inner, Some(LeaseInner::Cloned(_)))
    }

    /// Whether the lease has already been released.
    pub fn is_released(&self) -> bool {
        self.inner.is_none()
    }

    /// Release the lease. Calling this more than once is a no-op.
    pub fn release(&mut self) {
        if let Some(inner) = self.inner.take() {
            match inner {
                LeaseInner::Canonical(mut guard) => {
                    guard.reset();
                    // Guard drop returns the token.
                }
                LeaseInner::Cloned(_) => {
                    // Clone state is freed; nothing returns to the pool.
                }
            }
        }
    }
}

impl Drop for Lease<'_> {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::automata::AUTOMATA;
    use crate::engine::Engine;
    use crate::options::PatternOptions;

    fn pool(pattern: &str) -> CheckoutPool {
        let compiled = AUTOMATA.compile(pattern, PatternOptions::empty()).unwrap();
        CheckoutPool::new(compiled).unwrap()
    }

    #[test]
    fn first_checkout_is_canonical() {
        let pool = pool("abc");
        let lease = pool.checkout(MatchOptions::empty()).unwrap();
        assert!(!lease.is_cloned());
        assert!(!lease.is_released());
    }

    #[test]
    fn second_checkout_is_a_clone() {
        let pool = pool("abc");
        let first = pool.checkout(MatchOptions::empty()).unwrap();
        let second = pool.checkout(MatchOptions::empty()).unwrap();
        assert!(!first.is_cloned());
        assert!(second.is_cloned());
    }

    #[test]
    fn releasing_the_canonical_lease_returns_the_token() {
        let pool = pool("abc");
        let mut first = pool.checkout(MatchOptions::empty()).unwrap();
        first.release();
        let again = pool.checkout(MatchOptions::empty()).unwrap();
        assert!(!again.is_cloned());
    }

    #[test]
    fn dropping_a_lease_releases_it() {
        let pool = pool("abc");
        {
            let _lease = pool.checkout(MatchOptions::empty()).unwrap();
        }
        assert!(!pool.checkout(MatchOptions::empty()).unwrap().is_cloned());
    }

    #[test]
    fn release_is_idempotent() {
        let pool = pool("abc");
        let mut lease = pool.checkout(MatchOptions::empty()).unwrap();
        lease.release();
        lease.release();
        assert!(lease.is_released());
        assert!(lease.matcher().is_none());
        // The token came back exactly once.
        let next = pool.checkout(MatchOptions::empty()).unwrap();
        assert!(!next.is_cloned());
    }

    #[test]
    fn lease_records_its_options() {
        let pool = pool("abc");
        let lease = pool.checkout(MatchOptions::ANCHORED).unwrap();
        assert_eq!(lease.options(), MatchOptions::ANCHORED);
    }
}
