//! Source-control access for version resolution
//!
//! The [Repository] trait abstracts the single question the pipeline asks of
//! the revision history: "how far is HEAD from the nearest version tag?".
//!
//! - [repository::Git2Repository]: A real implementation using the `git2` crate
//! - [mock::MockRepository]: A canned implementation for testing
//!
//! ```rust
//! # use buildchain::git::Repository;
//! # fn example<R: Repository>(repo: &R) -> buildchain::Result<()> {
//! let describe = repo.describe("v*")?;
//! println!("HEAD is {}", describe);
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use crate::error::Result;

/// Common git operation trait for abstraction
///
/// Implementations map underlying errors (like `git2::Error`) to
/// [crate::error::BuildError] variants.
pub trait Repository {
    /// Describe HEAD relative to the nearest tag matching `pattern`
    ///
    /// Always uses the long format, equivalent to
    /// `git describe --tags --long --match <pattern>`, so an exact tag yields
    /// `v1.2.3-0-g<sha>` rather than the bare tag name.
    ///
    /// # Returns
    /// * `Ok(String)` - Describe string, e.g. `v3.50.2-288-g64fd5c5b`
    /// * `Err` - If no matching tag is reachable from HEAD or on Git error
    fn describe(&self, pattern: &str) -> Result<String>;

    /// Abbreviated hash of the HEAD commit
    fn head_short_id(&self) -> Result<String>;
}
