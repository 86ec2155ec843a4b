use nom::{
    branch::alt,
    bytes::complete::{tag, take_till},
    character::complete::space0,
    combinator::value,
    error::context,
    IResult,
};
use serde::{Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;

#[derive(PartialEq, Eq, Clone, Copy, Debug, Hash)]
pub enum ConstraintOp {
    Lt,
    Le,
    Eq,
    Gt,
    Ge,
}

impl ConstraintOp {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Lt => "<",
            Self::Le => "<=",
            Self::Eq => "=",
            Self::Gt => ">",
            Self::Ge => ">=",
        }
    }

    /// Check if `a <op> b`
    pub fn holds<T: Ord>(self, a: T, b: T) -> bool {
        match self {
            Self::Lt => a < b,
            Self::Le => a <= b,
            Self::Eq => a == b,
            Self::Gt => a > b,
            Self::Ge => a >= b,
        }
    }
}

impl fmt::Display for ConstraintOp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(PartialEq, Eq, Clone, Debug, Hash)]
pub struct VersionConstraint {
    pub op: ConstraintOp,
    pub version: String,
}

impl VersionConstraint {
    pub fn new(op: ConstraintOp, version: &str) -> Self {
        VersionConstraint {
            op,
            version: version.to_owned(),
        }
    }
}

impl fmt::Display for VersionConstraint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.op, self.version)
    }
}

impl Serialize for VersionConstraint {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

/// Decide whether some version can satisfy both `v <left> L` and `v <right> R`,
/// where `cmp` is the result of comparing L against R.
///
/// L and R are placed on a line of integers around zero, and every candidate
/// region (below both, at the lower one, between, at the upper one, above both)
/// is tried.
pub fn compatible(left: ConstraintOp, right: ConstraintOp, cmp: Ordering) -> bool {
    let (x1, x2) = match cmp {
        Ordering::Greater => (1, -1),
        Ordering::Less => (-1, 1),
        Ordering::Equal => (0, 0),
    };

    (-2..=2).any(|p| left.holds(p, x1) && right.holds(p, x2))
}

/// Operators are tried longest first so `>=` is never read as `>`
pub fn parse_constraint_op(i: &str) -> IResult<&str, ConstraintOp> {
    alt((
        value(ConstraintOp::Ge, tag(">=")),
        value(ConstraintOp::Le, tag("<=")),
        value(ConstraintOp::Eq, tag("=")),
        value(ConstraintOp::Gt, tag(">")),
        value(ConstraintOp::Lt, tag("<")),
    ))(i)
}

/// Parse something like `>= 1.2-3`
pub fn parse_version_constraint(i: &str) -> IResult<&str, VersionConstraint> {
    let (i, op) = context("parsing compare literal", parse_constraint_op)(i)?;
    let (i, _) = space0(i)?;
    let (i, version) = take_till(char::is_whitespace)(i)?;

    Ok((i, VersionConstraint::new(op, version)))
}

#[cfg(test)]
mod test {
    use super::*;
    use std::cmp::Ordering::*;
    use ConstraintOp::*;

    const ALL_OPS: [ConstraintOp; 5] = [Lt, Le, Eq, Gt, Ge];
    const ALL_CMP: [Ordering; 3] = [Less, Equal, Greater];

    #[test]
    fn compatible_is_symmetric() {
        for a in ALL_OPS {
            for b in ALL_OPS {
                for cmp in ALL_CMP {
                    assert_eq!(
                        compatible(a, b, cmp),
                        compatible(b, a, cmp.reverse()),
                        "{} {} {:?}",
                        a,
                        b,
                        cmp
                    );
                }
            }
        }
    }

    #[test]
    fn compatible_table() {
        let tests = vec![
            (Eq, Eq, Equal, true),
            (Eq, Eq, Less, false),
            (Eq, Eq, Greater, false),
            (Gt, Lt, Equal, false),
            (Ge, Le, Equal, true),
            (Ge, Lt, Equal, false),
            // >2 and <1
            (Gt, Lt, Greater, false),
            // >1 and <2
            (Gt, Lt, Less, true),
            // =1 and >=2
            (Eq, Ge, Less, false),
            // =2 and >=1
            (Eq, Ge, Greater, true),
            // <1 and <2
            (Lt, Lt, Less, true),
            (Le, Eq, Equal, true),
            (Lt, Eq, Equal, false),
        ];

        for (left, right, cmp, expected) in tests {
            assert_eq!(
                compatible(left, right, cmp),
                expected,
                "{} {} {:?}",
                left,
                right,
                cmp
            );
        }
    }

    #[test]
    fn parse_ops_longest_first() {
        assert_eq!(parse_constraint_op(">=1"), Ok(("1", Ge)));
        assert_eq!(parse_constraint_op("<=1"), Ok(("1", Le)));
        assert_eq!(parse_constraint_op(">1"), Ok(("1", Gt)));
        assert_eq!(parse_constraint_op("<1"), Ok(("1", Lt)));
        assert_eq!(parse_constraint_op("=1"), Ok(("1", Eq)));
        assert!(parse_constraint_op("1").is_err());
        assert!(parse_constraint_op("").is_err());
        // Only the operator is consumed
        assert_eq!(parse_constraint_op(">==1"), Ok(("=1", Ge)));
        assert_eq!(parse_constraint_op("<>1"), Ok((">1", Lt)));
    }

    #[test]
    fn parse_constraint() {
        assert_eq!(
            parse_version_constraint(">= 2:1.1.0-1 trailing"),
            Ok((" trailing", VersionConstraint::new(Ge, "2:1.1.0-1")))
        );
        assert_eq!(VersionConstraint::new(Lt, "3").to_string(), "<3");
    }
}
