mod table;

use crate::config::{CheckSatisfies, Config, LocatePkg, Opts, ParseSrcInfo, ShowPkg, SubCmd};
use srcinfo::{
    debug, info,
    types::{parse_rpc_response, GitSource, PackageInfo, PackageReference, RpcPackageInfo},
    warn, Registry, SrcInfo,
};

use anyhow::{bail, format_err, Context, Result};
use console::style;
use rayon::prelude::*;
use std::{cmp::Reverse, fs, path::Path};

pub fn fullfill_command(config: &Config, opts: &Opts, registry: &Registry) -> Result<()> {
    match &opts.subcmd {
        SubCmd::Parse(args) => parse(config, registry, args),
        SubCmd::Show(args) => show(config, registry, args),
        SubCmd::Satisfies(args) => satisfies(args),
        SubCmd::Locate(args) => locate(config, registry, args),
    }
}

/// Parse a recipe, looking up where it is hosted once the package base is known
fn read_recipe(
    path: &Path,
    repo: &str,
    arch: &str,
    config: &Config,
    registry: &Registry,
    rpc: &[RpcPackageInfo],
) -> Result<Vec<PackageInfo>> {
    let data = fs::read_to_string(path).context(format!("Failed to read {}", path.display()))?;
    let info = SrcInfo::parse_str(&data);
    let git = info
        .base
        .values("pkgbase")
        .last()
        .and_then(|base| registry.find(config.os(), repo, base, arch))
        .map(GitSource::from);
    if git.is_none() {
        debug!("No known recipe location for {} in {}", path.display(), repo);
    }

    Ok(info.resolve(repo, arch, git.as_ref(), rpc))
}

fn parse(config: &Config, registry: &Registry, args: &ParseSrcInfo) -> Result<()> {
    let arch = args.arch.clone().unwrap_or_else(|| config.arch());
    let rpc = match &args.rpc {
        Some(path) => {
            let data = fs::read_to_string(path)
                .context(format!("Failed to read RPC data from {}", path.display()))?;
            parse_rpc_response(&data, &args.repo)?
        }
        None => Vec::new(),
    };

    let results: Vec<Result<Vec<PackageInfo>>> = args
        .files
        .par_iter()
        .map(|path| read_recipe(path, &args.repo, &arch, config, registry, &rpc))
        .collect();

    let mut pkgs = Vec::new();
    for (path, res) in args.files.iter().zip(results) {
        let res = res?;
        if res.is_empty() {
            warn!("{} does not declare any complete package", path.display());
        }
        pkgs.extend(res);
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&pkgs)?);
    } else {
        info!("Found {} package(s) for {}", pkgs.len(), style(&arch).bold());
        table::show_packages(&pkgs)?;
    }

    Ok(())
}

fn show(config: &Config, registry: &Registry, args: &ShowPkg) -> Result<()> {
    let arch = args.arch.clone().unwrap_or_else(|| config.arch());
    let pkgs = read_recipe(&args.file, &args.repo, &arch, config, registry, &[])?;

    match pkgs.iter().find(|p| p.name == args.name) {
        Some(pkg) => table::show_package(pkg),
        None => {
            let mut names: Vec<&str> = pkgs.iter().map(|p| p.name.as_str()).collect();
            names.sort_by_cached_key(|name| {
                Reverse((255.0 * strsim::jaro_winkler(name, &args.name)) as u8)
            });
            match names.first() {
                Some(closest) => bail!(
                    "{} not found in {}, did you mean {}?",
                    style(&args.name).bold(),
                    args.file.display(),
                    style(closest).bold()
                ),
                None => bail!("{} does not declare any complete package", args.file.display()),
            }
        }
    }
}

fn satisfies(args: &CheckSatisfies) -> Result<()> {
    let reference = PackageReference::parse(&args.reference)
        .ok_or_else(|| format_err!("Invalid package reference {:?}", args.reference))?;
    let by = PackageReference::parse(&args.by)
        .ok_or_else(|| format_err!("Invalid package reference {:?}", args.by))?;

    if reference.is_provided_by(&by) {
        println!("{} is provided by {}", style(&reference).bold(), style(&by).bold());
    } else {
        println!(
            "{} is {} provided by {}",
            style(&reference).bold(),
            style("not").red(),
            style(&by).bold()
        );
    }

    Ok(())
}

fn locate(config: &Config, registry: &Registry, args: &LocatePkg) -> Result<()> {
    let arch = args.arch.clone().unwrap_or_else(|| config.arch());
    match registry.find(config.os(), &args.repo, &args.base, &arch) {
        Some(git) => {
            println!("{}", git.url);
            println!("{} {}", style("branch:").bold(), git.branch);
            if !git.path.is_empty() {
                println!("{} {}", style("path:").bold(), git.path);
            }
        }
        None => warn!(
            "No known recipe location for {} in {} on {}",
            style(&args.base).bold(),
            style(&args.repo).bold(),
            config.os()
        ),
    }

    Ok(())
}
