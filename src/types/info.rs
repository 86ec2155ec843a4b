use super::{ConstraintOp, PackageReference, VersionConstraint};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Per-package popularity record, as reported by the AUR RPC interface
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct RpcPackageInfo {
    #[serde(default)]
    pub repo: String,
    #[serde(rename(deserialize = "PackageBase"))]
    pub base: String,
    #[serde(rename(deserialize = "Name"))]
    pub name: String,
    #[serde(rename(deserialize = "Version"))]
    pub version: String,
    #[serde(rename(deserialize = "Description"), default)]
    pub description: Option<String>,
    #[serde(rename(deserialize = "Maintainer"), default)]
    pub maintainer: Option<String>,
    #[serde(rename(deserialize = "FirstSubmitted"), default)]
    pub first_submitted: Option<i64>,
    #[serde(rename(deserialize = "LastModified"), default)]
    pub last_modified: Option<i64>,
    #[serde(rename(deserialize = "NumVotes"), default)]
    pub votes: u32,
    #[serde(rename(deserialize = "Popularity"), default)]
    pub popularity: f64,
}

#[derive(Deserialize)]
struct RpcResponse {
    #[serde(default)]
    results: Vec<RpcPackageInfo>,
}

/// Read an RPC `info` response, tagging every record with `repo`
pub fn parse_rpc_response(data: &str, repo: &str) -> Result<Vec<RpcPackageInfo>> {
    let response: RpcResponse =
        serde_json::from_str(data).context("Malformed RPC response")?;
    let res = response
        .results
        .into_iter()
        .map(|mut info| {
            info.repo = repo.to_owned();
            info
        })
        .collect();

    Ok(res)
}

/// Where the build files of a package can be fetched from
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct GitSource {
    pub url: String,
    pub branch: Option<String>,
    pub commit: Option<String>,
    pub path: Option<String>,
}

/// A fully resolved package produced by a recipe
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PackageInfo {
    pub repo: String,
    pub base: String,
    pub name: String,
    pub version: String,
    pub description: Option<String>,
    pub maintainer: Option<String>,
    pub first_submitted: Option<i64>,
    pub last_modified: Option<i64>,
    pub votes: u32,
    pub popularity: f64,
    /// Position of this package among the packages of its base
    pub base_index: usize,
    /// Number of packages built from the same base
    pub base_count: usize,
    pub archs: Vec<String>,
    pub url: Option<String>,
    pub licenses: Vec<String>,
    pub groups: Vec<String>,
    pub pgp_keys: Vec<String>,
    pub depends: Vec<PackageReference>,
    pub make_depends: Vec<PackageReference>,
    pub check_depends: Vec<PackageReference>,
    pub optional: Vec<PackageReference>,
    pub provides: Vec<PackageReference>,
    pub conflicts: Vec<PackageReference>,
    pub replaces: Vec<PackageReference>,
    pub git_url: Option<String>,
    pub git_branch: Option<String>,
    pub git_commit: Option<String>,
    pub git_path: Option<String>,
}

impl PackageInfo {
    /// This exact package as a reference, `name=version`
    pub fn to_reference(&self) -> PackageReference {
        PackageReference::new(
            &self.name,
            Some(VersionConstraint::new(ConstraintOp::Eq, &self.version)),
        )
    }

    /// Check if installing this package would satisfy `reference`
    pub fn provides_reference(&self, reference: &PackageReference) -> bool {
        reference.is_provided_by(&self.to_reference())
            || self.provides.iter().any(|p| reference.is_provided_by(p))
    }

    /// Check if this package and `other` can't be installed together
    pub fn conflicts_with(&self, other: &PackageInfo) -> bool {
        self.conflicts.iter().any(|c| other.provides_reference(c))
            || other.conflicts.iter().any(|c| self.provides_reference(c))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parse_rpc() {
        let data = r#"{
            "version": 5,
            "type": "multiinfo",
            "resultcount": 2,
            "results": [
                {
                    "ID": 1,
                    "Name": "yay",
                    "PackageBase": "yay",
                    "Version": "12.0.5-1",
                    "Description": "Yet another yogurt",
                    "Maintainer": "someone",
                    "FirstSubmitted": 1475688004,
                    "LastModified": 1700000000,
                    "NumVotes": 2000,
                    "Popularity": 25.5,
                    "OutOfDate": null
                },
                {
                    "Name": "orphan",
                    "PackageBase": "orphan",
                    "Version": "1-1",
                    "Maintainer": null
                }
            ]
        }"#;

        let res = parse_rpc_response(data, "aur").unwrap();
        assert_eq!(res.len(), 2);
        assert_eq!(res[0].repo, "aur");
        assert_eq!(res[0].name, "yay");
        assert_eq!(res[0].votes, 2000);
        assert_eq!(res[0].popularity, 25.5);
        assert_eq!(res[0].first_submitted, Some(1475688004));
        assert_eq!(res[1].maintainer, None);
        assert_eq!(res[1].votes, 0);
        assert_eq!(res[1].popularity, 0.0);
    }

    #[test]
    fn parse_rpc_garbage() {
        assert!(parse_rpc_response("not json", "aur").is_err());
    }
}
