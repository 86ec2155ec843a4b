use srcinfo::{repo::os, GitRepo, Registry, RegistryEntry};

use anyhow::{bail, Context, Result};
use clap::Parser;
use serde::Deserialize;
use std::{fs, io::ErrorKind, path::Path, path::PathBuf};

#[derive(Deserialize, Default, Debug)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Target architecture, defaults to the machine architecture
    pub arch: Option<String>,
    /// Override the detected OS identifier
    pub os: Option<String>,
    /// Additional recipe locations. These may only add new (OS, repository)
    /// pairs, overlapping a builtin entry is an error.
    #[serde(default)]
    pub registry: Vec<RegistryConfig>,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct RegistryConfig {
    pub os: Vec<String>,
    pub repos: Vec<String>,
    pub url: String,
    #[serde(default = "default_branch")]
    pub branch: String,
    #[serde(default)]
    pub path: String,
}

#[inline]
fn default_branch() -> String {
    "master".to_string()
}

impl Config {
    /// Read config from `path`. A missing file means default config.
    pub fn from_file(path: &Path) -> Result<Self> {
        let data = match fs::read_to_string(path) {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Config::default()),
            Err(e) => {
                return Err(e).context(format!("Failed to read config file {}", path.display()))
            }
        };
        let config: Config = toml::from_str(&data)
            .context(format!("Failed to parse config file {}", path.display()))?;
        config.check_sanity()?;
        Ok(config)
    }

    pub fn check_sanity(&self) -> Result<()> {
        for (i, entry) in self.registry.iter().enumerate() {
            if entry.os.is_empty() || entry.repos.is_empty() {
                bail!(
                    "Registry entry #{} ({}) must name at least one OS and one repository",
                    i,
                    entry.url
                );
            }
        }
        if let Some(arch) = &self.arch {
            if arch.is_empty() || arch == "any" {
                bail!("Invalid target architecture {:?}", arch);
            }
        }
        Ok(())
    }

    /// The builtin registry extended with the configured entries, validated
    pub fn registry(&self) -> Result<Registry> {
        let extra = self
            .registry
            .iter()
            .map(|e| RegistryEntry {
                os: e.os.iter().cloned().collect(),
                repos: e.repos.iter().cloned().collect(),
                git: GitRepo {
                    url: e.url.clone(),
                    branch: e.branch.clone(),
                    path: e.path.clone(),
                },
            })
            .collect();
        let registry = Registry::with_extra(extra).context("Invalid repository registry")?;
        Ok(registry)
    }

    pub fn os(&self) -> &str {
        self.os.as_deref().unwrap_or_else(|| os::os_id())
    }

    /// Configured arch, or what the machine reports
    pub fn arch(&self) -> String {
        match &self.arch {
            Some(arch) => arch.clone(),
            None => nix::sys::utsname::uname().machine().to_string(),
        }
    }
}

#[derive(Parser)]
#[clap(about, version, author)]
pub struct Opts {
    #[clap(
        long,
        default_value = "/etc/srcinfo/config.toml",
        help = "Position of the config file"
    )]
    pub config: PathBuf,
    #[clap(short, long, help = "Print additional debug information")]
    pub verbose: bool,
    #[clap(subcommand)]
    pub subcmd: SubCmd,
}

#[derive(Parser)]
pub enum SubCmd {
    /// Parse .SRCINFO files and list the packages they build
    Parse(ParseSrcInfo),
    /// Show one package of a .SRCINFO file in detail
    Show(ShowPkg),
    /// Check if a package reference is provided by another
    Satisfies(CheckSatisfies),
    /// Find where the recipe of a package base is hosted
    Locate(LocatePkg),
}

#[derive(Parser)]
pub struct ParseSrcInfo {
    /// .SRCINFO files to parse
    #[clap(min_values = 1)]
    pub files: Vec<PathBuf>,
    /// Target architecture
    #[clap(long)]
    pub arch: Option<String>,
    /// Repository the recipes belong to
    #[clap(long, default_value = "aur")]
    pub repo: String,
    /// RPC info response (JSON) with popularity data
    #[clap(long)]
    pub rpc: Option<PathBuf>,
    /// Print packages as JSON
    #[clap(long)]
    pub json: bool,
}

#[derive(Parser)]
pub struct ShowPkg {
    /// .SRCINFO file
    pub file: PathBuf,
    /// Package name
    pub name: String,
    /// Target architecture
    #[clap(long)]
    pub arch: Option<String>,
    /// Repository the recipe belongs to
    #[clap(long, default_value = "aur")]
    pub repo: String,
}

#[derive(Parser)]
pub struct CheckSatisfies {
    /// Required reference, like `foo>=1.0`
    pub reference: String,
    /// Provided reference, like `foo=1.2-1`
    pub by: String,
}

#[derive(Parser)]
pub struct LocatePkg {
    /// Repository name
    pub repo: String,
    /// Package base
    pub base: String,
    /// Target architecture
    #[clap(long)]
    pub arch: Option<String>,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parse_config() {
        let config: Config = toml::from_str(
            r#"
arch = "aarch64"
os = "arch"

[[registry]]
os = ["myos"]
repos = ["core", "extra"]
url = "https://git.example.org/${BASE}.git"
path = "repos/${REPO}-${ARCH}"
"#,
        )
        .unwrap();
        assert!(config.check_sanity().is_ok());
        assert_eq!(config.arch(), "aarch64");
        assert_eq!(config.os(), "arch");
        assert_eq!(config.registry[0].branch, "master");

        let registry = config.registry().unwrap();
        let git = registry.find("myos", "core", "bash", "aarch64").unwrap();
        assert_eq!(git.url, "https://git.example.org/bash.git");
        assert_eq!(git.path, "repos/core-aarch64");
    }

    #[test]
    fn empty_config() {
        let config: Config = toml::from_str("").unwrap();
        assert!(config.registry.is_empty());
        assert!(config.registry().is_ok());
        assert!(!config.arch().is_empty());
    }

    #[test]
    fn bad_configs() {
        let config: Config = toml::from_str(
            r#"
[[registry]]
os = []
repos = ["core"]
url = "x"
"#,
        )
        .unwrap();
        assert!(config.check_sanity().is_err());

        let config: Config = toml::from_str(
            r#"
[[registry]]
os = ["arch"]
repos = ["core"]
url = "x"
"#,
        )
        .unwrap();
        // Clashes with the builtin core entry
        assert!(config.registry().is_err());

        assert!(toml::from_str::<Config>("unknown = 1").is_err());
    }

    #[test]
    fn missing_config_file() {
        let config = Config::from_file(Path::new("/nonexistent/srcinfo/config.toml")).unwrap();
        assert!(config.arch.is_none());
    }
}
