use super::parse::{Bucket, SrcInfo};
use crate::{
    debug,
    types::{GitSource, PackageInfo, PackageReference, RpcPackageInfo},
};

/// Values of `key`, from the package itself or, failing that, from the base
fn collect<'a>(base: &'a Bucket, pkg: &'a Bucket, key: &'a str) -> Vec<&'a str> {
    let own: Vec<&str> = pkg.values(key).collect();
    if own.is_empty() {
        base.values(key).collect()
    } else {
        own
    }
}

fn collect_last<'a>(base: &'a Bucket, pkg: &'a Bucket, key: &'a str) -> Option<&'a str> {
    collect(base, pkg, key).pop()
}

/// Collect references of `key` plus the architecture specific `key_arch` ones
fn collect_arch(base: &Bucket, pkg: &Bucket, key: &str, arch: &str) -> Vec<PackageReference> {
    let arch_key = format!("{}_{}", key, arch);
    collect(base, pkg, key)
        .into_iter()
        .chain(collect(base, pkg, &arch_key))
        .filter_map(PackageReference::parse)
        .collect()
}

fn owned(values: Vec<&str>) -> Vec<String> {
    values.into_iter().map(str::to_owned).collect()
}

/// Drop references that are already provided by something in `by`
fn filter_provided(refs: Vec<PackageReference>, by: &[PackageReference]) -> Vec<PackageReference> {
    refs.into_iter()
        .filter(|r| !by.iter().any(|b| r.is_provided_by(b)))
        .collect()
}

impl SrcInfo {
    /// Materialize every complete package declared in this recipe.
    /// Packages missing pkgbase, pkgver or pkgrel are skipped.
    pub fn resolve(
        &self,
        repo: &str,
        arch: &str,
        git: Option<&GitSource>,
        rpc: &[RpcPackageInfo],
    ) -> Vec<PackageInfo> {
        let count = self.packages.len();
        self.packages
            .iter()
            .enumerate()
            .filter_map(|(index, (name, pkg))| {
                let res = self.resolve_one(repo, arch, git, rpc, name, pkg, index, count);
                if res.is_none() {
                    debug!("Skipping incomplete package {} in recipe", name);
                }
                res
            })
            .collect()
    }

    #[allow(clippy::too_many_arguments)]
    fn resolve_one(
        &self,
        repo: &str,
        arch: &str,
        git: Option<&GitSource>,
        rpc: &[RpcPackageInfo],
        name: &str,
        pkg: &Bucket,
        index: usize,
        count: usize,
    ) -> Option<PackageInfo> {
        let base = &self.base;

        let pkgbase = base.values("pkgbase").last()?;
        let pkgver = collect_last(base, pkg, "pkgver")?;
        let pkgrel = collect_last(base, pkg, "pkgrel")?;
        let version = match collect_last(base, pkg, "epoch") {
            Some(epoch) if !epoch.is_empty() => format!("{}:{}-{}", epoch, pkgver, pkgrel),
            _ => format!("{}-{}", pkgver, pkgrel),
        };

        let depends = collect_arch(base, pkg, "depends", arch);
        let make_depends = filter_provided(collect_arch(base, pkg, "makedepends", arch), &depends);
        let check_depends = {
            let mut provided = depends.clone();
            provided.extend(make_depends.iter().cloned());
            filter_provided(collect_arch(base, pkg, "checkdepends", arch), &provided)
        };

        let popularity = rpc.iter().rev().find(|info| info.name == name);

        Some(PackageInfo {
            repo: repo.to_owned(),
            base: pkgbase.to_owned(),
            name: name.to_owned(),
            version,
            description: collect_last(base, pkg, "pkgdesc").map(str::to_owned),
            maintainer: popularity.and_then(|p| p.maintainer.clone()),
            first_submitted: popularity.and_then(|p| p.first_submitted),
            last_modified: popularity.and_then(|p| p.last_modified),
            votes: popularity.map_or(0, |p| p.votes),
            popularity: popularity.map_or(0.0, |p| p.popularity),
            base_index: index,
            base_count: count,
            archs: collect(base, pkg, "arch")
                .into_iter()
                .filter(|a| *a != "any")
                .map(str::to_owned)
                .collect(),
            url: collect_last(base, pkg, "url").map(str::to_owned),
            licenses: owned(collect(base, pkg, "license")),
            groups: owned(collect(base, pkg, "groups")),
            pgp_keys: owned(collect(base, pkg, "validpgpkeys")),
            depends,
            make_depends,
            check_depends,
            optional: collect_arch(base, pkg, "optdepends", arch),
            provides: collect_arch(base, pkg, "provides", arch),
            conflicts: collect_arch(base, pkg, "conflicts", arch),
            replaces: collect_arch(base, pkg, "replaces", arch),
            git_url: git.map(|g| g.url.clone()),
            git_branch: git.and_then(|g| g.branch.clone()),
            git_commit: git.and_then(|g| g.commit.clone()),
            git_path: git.and_then(|g| g.path.clone()),
        })
    }
}
