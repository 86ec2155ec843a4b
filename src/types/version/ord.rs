use super::PkgVersion;
use std::cmp::Ordering;

/// The rpmvercmp algorithm, as used by pacman
/// Check https://fedoraproject.org/wiki/Archive:Tools/RPM/VersionComparison
pub fn rpmvercmp(a: &str, b: &str) -> Ordering {
    if a == b {
        return Ordering::Equal;
    }

    let mut one = a.as_bytes();
    let mut two = b.as_bytes();
    while !one.is_empty() && !two.is_empty() {
        let sep_one = one.iter().take_while(|c| !c.is_ascii_alphanumeric()).count();
        let sep_two = two.iter().take_while(|c| !c.is_ascii_alphanumeric()).count();
        one = &one[sep_one..];
        two = &two[sep_two..];

        if one.is_empty() || two.is_empty() {
            break;
        }

        // Different amount of separators decides
        if sep_one != sep_two {
            return sep_one.cmp(&sep_two);
        }

        // Segment type is decided by the left side
        let is_num = one[0].is_ascii_digit();
        let (seg_one, seg_two) = if is_num {
            (
                take_segment(&mut one, u8::is_ascii_digit),
                take_segment(&mut two, u8::is_ascii_digit),
            )
        } else {
            (
                take_segment(&mut one, u8::is_ascii_alphabetic),
                take_segment(&mut two, u8::is_ascii_alphabetic),
            )
        };

        if seg_two.is_empty() {
            // Numeric segments are always newer than alpha segments
            return if is_num {
                Ordering::Greater
            } else {
                Ordering::Less
            };
        }

        let res = if is_num {
            let seg_one = trim_leading_zeros(seg_one);
            let seg_two = trim_leading_zeros(seg_two);
            seg_one
                .len()
                .cmp(&seg_two.len())
                .then_with(|| seg_one.cmp(seg_two))
        } else {
            seg_one.cmp(seg_two)
        };
        if res != Ordering::Equal {
            return res;
        }
    }

    if one.is_empty() && two.is_empty() {
        return Ordering::Equal;
    }

    // Whichever has a trailing alpha segment is older, otherwise the longer one is newer
    let one_alpha = one.first().map_or(false, u8::is_ascii_alphabetic);
    let two_alpha = two.first().map_or(false, u8::is_ascii_alphabetic);
    if (one.is_empty() && !two_alpha) || one_alpha {
        Ordering::Less
    } else {
        Ordering::Greater
    }
}

fn take_segment<'a>(i: &mut &'a [u8], pred: fn(&u8) -> bool) -> &'a [u8] {
    let len = i.iter().take_while(|c| pred(*c)).count();
    let (seg, rest) = i.split_at(len);
    *i = rest;
    seg
}

fn trim_leading_zeros(i: &[u8]) -> &[u8] {
    let zeros = i.iter().take_while(|c| **c == b'0').count();
    &i[zeros..]
}

/// Compare two full version strings the way pacman does
pub fn vercmp(a: &str, b: &str) -> Ordering {
    if a == b {
        return Ordering::Equal;
    }
    PkgVersion::from(a).cmp(&PkgVersion::from(b))
}

impl Ord for PkgVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        rpmvercmp(&self.epoch, &other.epoch)
            .then_with(|| rpmvercmp(&self.version, &other.version))
            .then_with(|| match (&self.release, &other.release) {
                // Release only matters if both sides have one
                (Some(this), Some(that)) => rpmvercmp(this, that),
                _ => Ordering::Equal,
            })
    }
}

impl PartialOrd for PkgVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for PkgVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for PkgVersion {}
