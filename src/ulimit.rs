use nom::{
    bytes::complete::{tag, take_till, take_until},
    character::complete::char,
    combinator::{all_consuming, rest},
    multi::separated_list1,
    IResult, Parser,
};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;
use thiserror::Error;

/// The value a bound takes when it is not limited at all.
pub const UNLIMITED: i64 = -1;

/// The kinds of resource limit that may be named in a ulimit argument,
/// numbered the way Linux numbers them for `setrlimit(2)`.
///
/// `as` (`RLIMIT_AS`, 9) is deliberately missing: capping the address
/// space of a container's init process breaks it.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum Resource {
    Cpu = 0,
    Fsize = 1,
    Data = 2,
    Stack = 3,
    Core = 4,
    Rss = 5,
    Nproc = 6,
    Nofile = 7,
    Memlock = 8,
    Locks = 10,
    Sigpending = 11,
    Msgqueue = 12,
    Nice = 13,
    Rtprio = 14,
    Rttime = 15,
}

impl Resource {
    pub const ALL: [Resource; 15] = [
        Resource::Core,
        Resource::Cpu,
        Resource::Data,
        Resource::Fsize,
        Resource::Locks,
        Resource::Memlock,
        Resource::Msgqueue,
        Resource::Nice,
        Resource::Nofile,
        Resource::Nproc,
        Resource::Rss,
        Resource::Rtprio,
        Resource::Rttime,
        Resource::Sigpending,
        Resource::Stack,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Resource::Core => "core",
            Resource::Cpu => "cpu",
            Resource::Data => "data",
            Resource::Fsize => "fsize",
            Resource::Locks => "locks",
            Resource::Memlock => "memlock",
            Resource::Msgqueue => "msgqueue",
            Resource::Nice => "nice",
            Resource::Nofile => "nofile",
            Resource::Nproc => "nproc",
            Resource::Rss => "rss",
            Resource::Rtprio => "rtprio",
            Resource::Rttime => "rttime",
            Resource::Sigpending => "sigpending",
            Resource::Stack => "stack",
        }
    }

    /// The `RLIMIT_*` number.
    pub const fn code(self) -> i32 {
        self as i32
    }

    pub fn from_name(name: &str) -> Option<Resource> {
        Self::ALL.into_iter().find(|resource| resource.name() == name)
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for Resource {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Resource::from_name(s).ok_or_else(|| ParseError::UnknownLimitName(s.to_string()))
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("invalid ulimit argument: {0}")]
    MalformedInput(String),

    #[error("invalid ulimit type: {0}")]
    UnknownLimitName(String),

    #[error("too many limit value arguments - {0}, can only have up to two, `soft[:hard]`")]
    TooManyValues(String),

    #[error("invalid limit value {value:?}: {source}")]
    InvalidNumber {
        value: String,
        #[source]
        source: ParseIntError,
    },

    #[error("ulimit soft limit must be less than or equal to hard limit: {}", describe_soft_hard(.soft, .hard))]
    SoftExceedsHard { soft: i64, hard: i64 },
}

fn describe_soft_hard(soft: &i64, hard: &i64) -> String {
    if *soft == UNLIMITED {
        format!("soft: -1 (unlimited), hard: {}", hard)
    } else {
        format!("{} > {}", soft, hard)
    }
}

/// A human friendly resource limit, as written on a command line:
/// `nofile=1024:2048`.  Either bound may be [`UNLIMITED`].
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Ulimit {
    pub name: String,
    pub soft: i64,
    pub hard: i64,
}

/// A resource limit in the form handed to `setrlimit(2)`.  Unlimited
/// bounds come out as `u64::MAX`, i.e. `RLIM_INFINITY`.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ResourceLimit {
    #[cfg_attr(
        feature = "serde",
        serde(rename = "type", default, skip_serializing_if = "is_zero")
    )]
    pub kind: i32,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "is_zero"))]
    pub hard: u64,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "is_zero"))]
    pub soft: u64,
}

#[cfg(feature = "serde")]
fn is_zero<T: Default + PartialEq>(value: &T) -> bool {
    *value == T::default()
}

// name=value, splitting on the first '=' only
fn name_and_values(input: &str) -> IResult<&str, (&str, &str)> {
    (take_until("="), tag("="), rest)
        .map(|(name, _, values)| (name, values))
        .parse(input)
}

fn limit_values(input: &str) -> IResult<&str, Vec<&str>> {
    all_consuming(separated_list1(char(':'), take_till(|c: char| c == ':'))).parse(input)
}

fn parse_value(value: &str) -> Result<i64, ParseError> {
    value.parse().map_err(|source| ParseError::InvalidNumber {
        value: value.to_string(),
        source,
    })
}

/// Parses a `name=soft[:hard]` argument.  A lone value sets both
/// bounds.
pub fn parse_ulimit(val: &str) -> Result<Ulimit, ParseError> {
    parse(val).inspect_err(|err| tracing::debug!(input = val, %err, "rejected ulimit"))
}

fn parse(val: &str) -> Result<Ulimit, ParseError> {
    let (name, values) = match name_and_values(val) {
        Ok((_, parts)) => parts,
        Err(_) => return Err(ParseError::MalformedInput(val.to_string())),
    };

    if Resource::from_name(name).is_none() {
        return Err(ParseError::UnknownLimitName(name.to_string()));
    }

    let fields = match limit_values(values) {
        Ok((_, fields)) => fields,
        Err(_) => return Err(ParseError::MalformedInput(val.to_string())),
    };
    let (soft, hard) = match fields.as_slice() {
        [both] => {
            let value = parse_value(both)?;
            (value, value)
        }
        [soft, hard] => (parse_value(soft)?, parse_value(hard)?),
        _ => return Err(ParseError::TooManyValues(values.to_string())),
    };

    if hard != UNLIMITED && (soft == UNLIMITED || soft > hard) {
        return Err(ParseError::SoftExceedsHard { soft, hard });
    }

    Ok(Ulimit {
        name: name.to_string(),
        soft,
        hard,
    })
}

impl Ulimit {
    /// Converts to the `setrlimit(2)` form.  Fails only for a
    /// hand-built `Ulimit` whose name isn't a known [`Resource`].
    pub fn to_resource_limit(&self) -> Result<ResourceLimit, ParseError> {
        let resource: Resource = self.name.parse()?;
        Ok(ResourceLimit {
            kind: resource.code(),
            // bit-for-bit, so -1 becomes RLIM_INFINITY
            soft: self.soft as u64,
            hard: self.hard as u64,
        })
    }
}

impl fmt::Display for Ulimit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}={}:{}", self.name, self.soft, self.hard)
    }
}

impl FromStr for Ulimit {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_ulimit(s)
    }
}
