pub mod os;

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error;

use crate::types::GitSource;

/// A source control location, possibly containing `${REPO}`, `${BASE}` and `${ARCH}`
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct GitRepo {
    pub url: String,
    pub branch: String,
    pub path: String,
}

impl GitRepo {
    pub fn new(url: &str, branch: &str, path: &str) -> Self {
        GitRepo {
            url: url.to_owned(),
            branch: branch.to_owned(),
            path: path.to_owned(),
        }
    }

    /// Replace variables
    /// ${REPO}: Repository name
    /// ${BASE}: Package base
    /// ${ARCH}: Target architecture
    pub fn fill(&self, repo: &str, base: &str, arch: &str) -> GitRepo {
        let fill = |s: &str| {
            s.replace("${REPO}", repo)
                .replace("${BASE}", base)
                .replace("${ARCH}", arch)
        };

        GitRepo {
            url: fill(&self.url),
            branch: fill(&self.branch),
            path: fill(&self.path),
        }
    }
}

impl From<GitRepo> for GitSource {
    fn from(repo: GitRepo) -> Self {
        GitSource {
            url: repo.url,
            branch: Some(repo.branch),
            commit: None,
            path: Some(repo.path),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegistryEntry {
    pub os: BTreeSet<String>,
    pub repos: BTreeSet<String>,
    pub git: GitRepo,
}

impl RegistryEntry {
    pub fn new(os: &[&str], repos: &[&str], git: GitRepo) -> Self {
        RegistryEntry {
            os: os.iter().map(|s| s.to_string()).collect(),
            repos: repos.iter().map(|s| s.to_string()).collect(),
            git,
        }
    }

    fn matches(&self, os: &str, repo: &str) -> bool {
        self.os.contains(os) && self.repos.contains(repo)
    }
}

#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum RegistryError {
    #[error("repository {repo} on {os} matches {count} registry entries")]
    Ambiguous {
        os: String,
        repo: String,
        count: usize,
    },
}

/// Maps (OS, repository) to where the build recipes are hosted
#[derive(Clone, Debug)]
pub struct Registry {
    entries: Vec<RegistryEntry>,
}

impl Registry {
    /// Build a registry, making sure every (OS, repository) pair matches at most one entry
    pub fn new(entries: Vec<RegistryEntry>) -> Result<Self, RegistryError> {
        let all_os: BTreeSet<&String> = entries.iter().flat_map(|e| &e.os).collect();
        let all_repos: BTreeSet<&String> = entries.iter().flat_map(|e| &e.repos).collect();

        for os in &all_os {
            for repo in &all_repos {
                let count = entries.iter().filter(|e| e.matches(os, repo)).count();
                if count > 1 {
                    return Err(RegistryError::Ambiguous {
                        os: os.to_string(),
                        repo: repo.to_string(),
                        count,
                    });
                }
            }
        }

        Ok(Registry { entries })
    }

    /// The well-known distribution repositories, validated once per process
    pub fn builtin() -> Result<&'static Self, RegistryError> {
        BUILTIN.as_ref().map_err(Clone::clone)
    }

    /// The builtin registry plus `extra`.
    /// Configured entries may only add new (OS, repository) pairs, any overlap with
    /// the builtin table is rejected as ambiguous.
    pub fn with_extra(extra: Vec<RegistryEntry>) -> Result<Self, RegistryError> {
        let mut entries = extra;
        entries.extend(Self::builtin()?.entries.iter().cloned());
        Self::new(entries)
    }

    pub fn entries(&self) -> &[RegistryEntry] {
        &self.entries
    }

    /// Find where the recipe of `base` in `repo` lives on `os`
    pub fn find(&self, os: &str, repo: &str, base: &str, arch: &str) -> Option<GitRepo> {
        self.entries
            .iter()
            .find(|e| e.matches(os, repo))
            .map(|e| e.git.fill(repo, base, arch))
    }

    /// Same as `find`, on the OS this process is running on
    pub fn locate(&self, repo: &str, base: &str, arch: &str) -> Option<GitRepo> {
        self.find(os::os_id(), repo, base, arch)
    }
}

lazy_static! {
    static ref BUILTIN: Result<Registry, RegistryError> = Registry::new(builtin_entries());
}

fn builtin_entries() -> Vec<RegistryEntry> {
    vec![
        RegistryEntry::new(
            &["arch", "parabola"],
            &[
                "core",
                "core-testing",
                "extra",
                "extra-testing",
                "multilib",
                "multilib-testing",
                "gnome-unstable",
                "kde-unstable",
            ],
            GitRepo::new(
                "https://gitlab.archlinux.org/archlinux/packaging/packages/${BASE}.git",
                "main",
                "",
            ),
        ),
        RegistryEntry::new(
            &["parabola"],
            &[
                "libre",
                "libre-testing",
                "libre-multilib",
                "libre-multilib-testing",
                "pcr",
                "pcr-testing",
                "nonprism",
                "nonprism-testing",
            ],
            GitRepo::new("https://git.parabola.nu/abslibre.git", "master", "${REPO}/${BASE}"),
        ),
        RegistryEntry::new(
            &["artix"],
            &[
                "system",
                "world",
                "galaxy",
                "lib32",
                "system-gremlins",
                "world-gremlins",
                "galaxy-gremlins",
            ],
            GitRepo::new(
                "https://gitea.artixlinux.org/packages/${BASE}.git",
                "master",
                "repos/${REPO}-${ARCH}",
            ),
        ),
    ]
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn builtin_is_unambiguous() {
        assert!(Registry::builtin().is_ok());
    }

    #[test]
    fn builtin_is_shared() {
        let first = Registry::builtin().unwrap();
        let second = Registry::builtin().unwrap();
        assert!(std::ptr::eq(first, second));
        assert!(std::ptr::eq(first.entries(), second.entries()));
    }

    #[test]
    fn extra_entries_only_add_pairs() {
        let extra = vec![RegistryEntry::new(
            &["arch"],
            &["my-repo"],
            GitRepo::new("https://git.example.org/${BASE}.git", "main", ""),
        )];
        let registry = Registry::with_extra(extra).unwrap();
        let builtin = Registry::builtin().unwrap();
        assert_eq!(registry.entries().len(), builtin.entries().len() + 1);
        assert_eq!(
            registry.find("arch", "my-repo", "foo", "x86_64").unwrap().url,
            "https://git.example.org/foo.git"
        );
        assert_eq!(
            registry.find("arch", "core", "bash", "x86_64"),
            builtin.find("arch", "core", "bash", "x86_64")
        );
    }

    #[test]
    fn ambiguous_registry_fails() {
        let entries = vec![
            RegistryEntry::new(&["arch"], &["core", "extra"], GitRepo::new("a", "b", "c")),
            RegistryEntry::new(&["arch", "parabola"], &["core"], GitRepo::new("d", "e", "f")),
        ];
        assert_eq!(
            Registry::new(entries).unwrap_err(),
            RegistryError::Ambiguous {
                os: "arch".to_owned(),
                repo: "core".to_owned(),
                count: 2
            }
        );

        // Overriding a builtin repository is ambiguous as well
        let extra = vec![RegistryEntry::new(&["arch"], &["extra"], GitRepo::new("a", "b", "c"))];
        assert!(Registry::with_extra(extra).is_err());
    }

    #[test]
    fn disjoint_entries_are_fine() {
        let entries = vec![
            RegistryEntry::new(&["arch"], &["core"], GitRepo::new("a", "b", "c")),
            RegistryEntry::new(&["parabola"], &["core"], GitRepo::new("d", "e", "f")),
            RegistryEntry::new(&["arch", "parabola"], &["extra"], GitRepo::new("g", "h", "i")),
        ];
        let registry = Registry::new(entries).unwrap();
        assert_eq!(registry.find("arch", "core", "x", "y").unwrap().url, "a");
        assert_eq!(registry.find("parabola", "core", "x", "y").unwrap().url, "d");
        assert_eq!(registry.find("parabola", "extra", "x", "y").unwrap().url, "g");
    }

    #[test]
    fn substitution() {
        let entries = vec![RegistryEntry::new(
            &["arch"],
            &["core"],
            GitRepo::new(
                "https://git.example.org/${BASE}.git",
                "packages/${BASE}",
                "repos/${REPO}-${ARCH}",
            ),
        )];
        let registry = Registry::new(entries).unwrap();
        assert_eq!(
            registry.find("arch", "core", "bash", "x86_64"),
            Some(GitRepo::new(
                "https://git.example.org/bash.git",
                "packages/bash",
                "repos/core-x86_64"
            ))
        );
    }

    #[test]
    fn unknown_lookup() {
        let registry = Registry::builtin().unwrap();
        assert_eq!(registry.find("debian", "core", "bash", "x86_64"), None);
        assert_eq!(registry.find("arch", "aur", "bash", "x86_64"), None);
    }

    #[test]
    fn locate_uses_detected_os() {
        let registry = Registry::builtin().unwrap();
        assert_eq!(
            registry.locate("core", "bash", "x86_64"),
            registry.find(os::os_id(), "core", "bash", "x86_64")
        );
    }

    #[test]
    fn builtin_lookup() {
        let registry = Registry::builtin().unwrap();
        let git = registry.find("parabola", "libre", "linux-libre", "x86_64").unwrap();
        assert_eq!(git.url, "https://git.parabola.nu/abslibre.git");
        assert_eq!(git.path, "libre/linux-libre");

        let git = registry.find("parabola", "extra", "vim", "x86_64").unwrap();
        assert_eq!(git.url, "https://gitlab.archlinux.org/archlinux/packaging/packages/vim.git");
        assert_eq!(git.branch, "main");

        let source = GitSource::from(git);
        assert_eq!(source.branch.as_deref(), Some("main"));
        assert_eq!(source.commit, None);
    }
}
