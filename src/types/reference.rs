use super::version::{compatible, parse_version_constraint, vercmp, VersionConstraint};

use nom::{bytes::complete::take_till, character::complete::space0, IResult};
use serde::Serialize;
use std::{cmp::Ordering, fmt};

/// A mention of some package or capability, like `foo>=1.2` or `foo: does a thing`
#[derive(PartialEq, Eq, Clone, Debug, Hash, Serialize)]
pub struct PackageReference {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub constraint: Option<VersionConstraint>,
}

impl PackageReference {
    pub fn new(name: &str, constraint: Option<VersionConstraint>) -> Self {
        PackageReference {
            name: name.to_owned(),
            description: None,
            constraint,
        }
    }

    /// Parse a single reference token.
    /// Returns None if the token doesn't name anything.
    pub fn parse(token: &str) -> Option<Self> {
        let (head, description) = match token.split_once(": ") {
            Some((head, desc)) => (head, Some(desc.to_owned())),
            None => (token, None),
        };

        let (name, constraint) = match reference_with_constraint(head) {
            Ok((_, (name, constraint))) => (name.trim(), Some(constraint)),
            Err(_) => (head.trim(), None),
        };

        if name.is_empty() {
            return None;
        }

        Some(PackageReference {
            name: name.to_owned(),
            description,
            constraint,
        })
    }

    /// Check if the requirement described by this reference is met by `by`
    pub fn is_provided_by(&self, by: &PackageReference) -> bool {
        self.is_provided_by_with(by, vercmp)
    }

    /// Same as `is_provided_by`, with a custom version comparator
    pub fn is_provided_by_with<F>(&self, by: &PackageReference, cmp: F) -> bool
    where
        F: Fn(&str, &str) -> Ordering,
    {
        if self.name != by.name {
            return false;
        }

        match (&self.constraint, &by.constraint) {
            (Some(this), Some(that)) => {
                compatible(this.op, that.op, cmp(&this.version, &that.version))
            }
            // Unconstrained on either side means any version goes
            _ => true,
        }
    }
}

fn reference_with_constraint(i: &str) -> IResult<&str, (&str, VersionConstraint)> {
    let (i, name) = take_till(|c| c == '<' || c == '>' || c == '=')(i)?;
    let (i, _) = space0(i)?;
    let (i, constraint) = parse_version_constraint(i)?;

    Ok((i, (name, constraint)))
}

impl fmt::Display for PackageReference {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if let Some(constraint) = &self.constraint {
            write!(f, "{}", constraint)?;
        }
        Ok(())
    }
}
