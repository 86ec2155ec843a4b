/// Figure out which distribution we are running on
use crate::debug;

use lazy_static::lazy_static;
use std::fs;

const OS_RELEASE_PATHS: &[&str] = &["/etc/os-release", "/usr/lib/os-release"];
pub const DEFAULT_OS_ID: &str = "arch";

lazy_static! {
    static ref OS_ID: String = detect_os_id();
}

/// The `ID` of the running system, read once per process
pub fn os_id() -> &'static str {
    &OS_ID
}

fn detect_os_id() -> String {
    for path in OS_RELEASE_PATHS {
        if let Ok(content) = fs::read_to_string(path) {
            if let Some(id) = parse_os_release(&content) {
                return id;
            }
        }
    }

    debug!("Cannot detect OS identifier, assuming {}", DEFAULT_OS_ID);
    DEFAULT_OS_ID.to_owned()
}

/// Get the `ID` field out of an os-release file
pub fn parse_os_release(content: &str) -> Option<String> {
    content
        .lines()
        .filter_map(|line| line.trim().strip_prefix("ID="))
        .map(|id| id.trim_matches(|c: char| c == '"' || c == '\'').to_lowercase())
        .find(|id| !id.is_empty())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parse_ids() {
        let tests = vec![
            (
                "NAME=\"Arch Linux\"\nPRETTY_NAME=\"Arch Linux\"\nID=arch\nBUILD_ID=rolling\n",
                Some("arch"),
            ),
            (
                "NAME=\"Parabola GNU/Linux-libre\"\nID=\"parabola\"\nID_LIKE=\"arch\"\n",
                Some("parabola"),
            ),
            ("ID='Artix'\n", Some("artix")),
            ("ID_LIKE=arch\n", None),
            ("ID=\n", None),
            ("", None),
        ];

        for (content, expected) in tests {
            assert_eq!(parse_os_release(content).as_deref(), expected);
        }
    }

    #[test]
    fn os_id_is_stable() {
        assert!(!os_id().is_empty());
        assert_eq!(os_id(), os_id());
    }
}
