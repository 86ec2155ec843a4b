use super::PkgVersion;

use nom::{
    character::complete::{char, digit0},
    combinator::opt,
    sequence::terminated,
    IResult,
};
use std::fmt;

/// Split a pacman style `[epoch:]version[-release]` string.
///
/// Every input is a valid version: the epoch is only recognized when the
/// leading run of digits is directly followed by `:`, and the release is
/// whatever follows the last `-`.
pub fn parse_version(i: &str) -> IResult<&str, PkgVersion> {
    let (rest, epoch) = opt(terminated(digit0, char(':')))(i)?;
    let epoch = match epoch {
        Some(e) if !e.is_empty() => e.to_owned(),
        _ => "0".to_owned(),
    };

    let (version, release) = match rest.rsplit_once('-') {
        Some((v, r)) => (v.to_owned(), Some(r.to_owned())),
        None => (rest.to_owned(), None),
    };

    Ok((
        "",
        PkgVersion {
            epoch,
            version,
            release,
        },
    ))
}

impl From<&str> for PkgVersion {
    fn from(s: &str) -> Self {
        match parse_version(s) {
            Ok((_, ver)) => ver,
            // parse_version accepts everything
            Err(_) => PkgVersion {
                epoch: "0".to_owned(),
                version: s.to_owned(),
                release: None,
            },
        }
    }
}

impl fmt::Display for PkgVersion {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.epoch != "0" {
            write!(f, "{}:", self.epoch)?;
        }
        write!(f, "{}", self.version)?;
        if let Some(release) = &self.release {
            write!(f, "-{}", release)?;
        }
        Ok(())
    }
}
