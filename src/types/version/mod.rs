mod constraint;
mod ord;
mod parse;
mod test;

pub use constraint::{
    compatible, parse_constraint_op, parse_version_constraint, ConstraintOp, VersionConstraint,
};
pub use ord::{rpmvercmp, vercmp};
pub use parse::parse_version;

/// pacman style package version, `[epoch:]version[-release]`
#[derive(Clone, Debug)]
pub struct PkgVersion {
    pub epoch: String,
    pub version: String,
    pub release: Option<String>,
}
