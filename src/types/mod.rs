mod info;
mod reference;
mod version;

pub use info::{parse_rpc_response, GitSource, PackageInfo, RpcPackageInfo};
pub use reference::PackageReference;
pub use version::{
    compatible, parse_constraint_op, parse_version, parse_version_constraint, rpmvercmp, vercmp,
    ConstraintOp, PkgVersion, VersionConstraint,
};
