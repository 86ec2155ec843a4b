mod parse;
mod resolve;

pub use parse::{parse_line, Bucket, SrcInfo, SrcInfoBuilder};

use crate::types::{GitSource, PackageInfo, RpcPackageInfo};

/// Parse a .SRCINFO document and resolve all packages it builds for `arch`
pub fn parse_srcinfo(
    repo: &str,
    data: &str,
    arch: &str,
    git: Option<&GitSource>,
    rpc: &[RpcPackageInfo],
) -> Vec<PackageInfo> {
    SrcInfo::parse_str(data).resolve(repo, arch, git, rpc)
}
