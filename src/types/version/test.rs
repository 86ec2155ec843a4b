#[cfg(test)]
mod test {
    use super::super::{rpmvercmp, vercmp, PkgVersion};
    use std::cmp::Ordering::*;

    #[test]
    fn rpmvercmp_ord() {
        let source = vec![
            ("1.0", Equal, "1.0"),
            ("1.0", Less, "1.1"),
            ("1.1", Greater, "1.0"),
            ("1.2", Less, "1.11"),
            ("1.0", Less, "1.0.0"),
            ("1.0a", Less, "1.0"),
            ("1.0alpha", Less, "1.0beta"),
            ("1.0", Less, "1.0.a"),
            ("1.5rc1", Less, "1.5"),
            ("1.5rc1", Less, "1.5rc2"),
            ("1.001", Equal, "1.1"),
            ("1.0..1", Greater, "1.0.1"),
            ("1.0", Less, "1.0."),
            ("1a", Less, "1b"),
            ("1.0.0", Greater, "1.0a"),
        ];

        for e in source {
            assert_eq!(rpmvercmp(e.0, e.2), e.1, "rpmvercmp({}, {})", e.0, e.2);
        }
    }

    #[test]
    fn pkg_ver_ord() {
        let source = vec![
            ("1.0-1", Equal, "1.0-1"),
            ("1.0-1", Less, "1.0-2"),
            ("1.0-2", Less, "1.1-1"),
            // Release is ignored when one side lacks it
            ("1.0", Equal, "1.0-5"),
            ("1:1.0-1", Greater, "2.0-1"),
            ("0:1.0-1", Equal, "1.0-1"),
            ("1:500", Less, "1:5000"),
            ("100:500", Greater, "11:5000"),
            ("2.4.2-1", Less, "2.4.10-1"),
            ("20200101-1", Greater, "r100.abcdef-1"),
        ];

        for e in source {
            assert_eq!(vercmp(e.0, e.2), e.1, "vercmp({}, {})", e.0, e.2);
            assert_eq!(PkgVersion::from(e.0).cmp(&PkgVersion::from(e.2)), e.1);
        }
    }

    #[test]
    fn vercmp_is_antisymmetric() {
        let versions = ["1.0", "1.0-1", "1:0.1", "1.0a", "1.0.1", "2.0rc1-3"];
        for a in versions {
            for b in versions {
                assert_eq!(vercmp(a, b), vercmp(b, a).reverse(), "{} vs {}", a, b);
            }
        }
    }
}
