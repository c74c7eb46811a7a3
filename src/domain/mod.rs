//! Domain logic - pure version rules independent of git operations

pub mod branch;
pub mod commit;
pub mod prerelease;
pub mod tag;
pub mod version;

pub use branch::BranchContext;
pub use commit::{MergeMessage, MergeMessageFormat};
pub use prerelease::PreReleaseTag;
pub use tag::{TagPrefix, VersionTag};
pub use version::{SemanticVersion, VersionField};
