/// Parse .SRCINFO style recipe documents into key-value buckets
use nom::{
    bytes::complete::take_till1,
    character::complete::{char, space0},
    combinator::rest,
    IResult,
};

/// Parse a `key = value` line
pub fn parse_line(i: &str) -> IResult<&str, (&str, &str)> {
    let (i, _) = space0(i)?;
    let (i, key) = take_till1(|c: char| c.is_whitespace() || c == '=')(i)?;
    let (i, _) = space0(i)?;
    let (i, _) = char('=')(i)?;
    let (i, _) = space0(i)?;
    let (i, value) = rest(i)?;

    Ok((i, (key, value.trim_end())))
}

/// Ordered key-value pairs, keys may repeat
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Bucket(Vec<(String, String)>);

impl Bucket {
    fn push(&mut self, key: &str, value: &str) {
        self.0.push((key.to_owned(), value.to_owned()));
    }

    /// All values of `key`, in the order they appeared
    pub fn values<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.0
            .iter()
            .filter(move |(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A recipe split into document-wide defaults and per-package overrides
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SrcInfo {
    pub base: Bucket,
    /// (pkgname, overrides) in the order the packages were declared
    pub packages: Vec<(String, Bucket)>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Target {
    Base,
    Named(usize),
}

/// Accumulates classified lines into an SrcInfo
#[derive(Debug)]
pub struct SrcInfoBuilder {
    active: Target,
    res: SrcInfo,
}

impl Default for SrcInfoBuilder {
    fn default() -> Self {
        SrcInfoBuilder {
            active: Target::Base,
            res: SrcInfo::default(),
        }
    }
}

impl SrcInfoBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a raw line. Lines that are not `key = value` are ignored.
    pub fn feed_line(&mut self, line: &str) {
        if let Ok((_, (key, value))) = parse_line(line) {
            self.feed(key, value);
        }
    }

    /// Feed a classified pair. Keys without a value are dropped, so a package
    /// that only names a key still falls back to the base bucket.
    pub fn feed(&mut self, key: &str, value: &str) {
        match key {
            "pkgbase" => {
                self.active = Target::Base;
                self.res.base.push(key, value);
            }
            "pkgname" => {
                let pos = match self.res.packages.iter().position(|(name, _)| name == value) {
                    Some(pos) => pos,
                    None => {
                        self.res.packages.push((value.to_owned(), Bucket::default()));
                        self.res.packages.len() - 1
                    }
                };
                self.active = Target::Named(pos);
            }
            _ if value.is_empty() => (),
            _ => match self.active {
                Target::Base => self.res.base.push(key, value),
                Target::Named(pos) => self.res.packages[pos].1.push(key, value),
            },
        }
    }

    pub fn finish(self) -> SrcInfo {
        self.res
    }
}

impl SrcInfo {
    pub fn parse_str(data: &str) -> Self {
        let mut builder = SrcInfoBuilder::new();
        for line in data.lines() {
            builder.feed_line(line);
        }
        builder.finish()
    }
}
