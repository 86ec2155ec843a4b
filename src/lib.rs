//! Metadata core for building packages out of .SRCINFO recipes.
//!
//! Parses recipe documents into resolved package records, decides whether
//! two version constraints can be satisfied at once, and knows where the
//! recipes of the distribution repositories are hosted.
pub mod cli;
pub mod repo;
pub mod srcinfo;
pub mod types;

pub use repo::{GitRepo, Registry, RegistryEntry, RegistryError};
pub use srcinfo::{parse_srcinfo, SrcInfo};
pub use types::{
    compatible, vercmp, ConstraintOp, GitSource, PackageInfo, PackageReference, RpcPackageInfo,
    VersionConstraint,
};
