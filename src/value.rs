use crate::Error;
use std::{cmp::Ordering, fmt, str::FromStr};

/// Is the kind of values an attribute is restricted to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Domain {
    /// 64-bit signed integers.
    Long,
    /// 32-bit signed integers.
    Integer,
    /// 16-bit signed integers.
    Short,
    /// 8-bit signed integers.
    Byte,
    /// 64-bit floating point numbers.
    Double,
    /// 32-bit floating point numbers.
    Float,
    /// A single character.
    Character,
    /// UTF-8 text.
    String,
}

impl Domain {
    /// Returns the name of the domain, as accepted by [`Domain::from_str`].
    pub fn name(&self) -> &'static str {
        match self {
            Self::Long => "Long",
            Self::Integer => "Integer",
            Self::Short => "Short",
            Self::Byte => "Byte",
            Self::Double => "Double",
            Self::Float => "Float",
            Self::Character => "Character",
            Self::String => "String",
        }
    }

    /// Returns the tag identifying the domain in encoded tuples and snapshots.
    pub(crate) fn tag(&self) -> u8 {
        match self {
            Self::Long => 1,
            Self::Integer => 2,
            Self::Short => 3,
            Self::Byte => 4,
            Self::Double => 5,
            Self::Float => 6,
            Self::Character => 7,
            Self::String => 8,
        }
    }

    pub(crate) fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            1 => Some(Self::Long),
            2 => Some(Self::Integer),
            3 => Some(Self::Short),
            4 => Some(Self::Byte),
            5 => Some(Self::Double),
            6 => Some(Self::Float),
            7 => Some(Self::Character),
            8 => Some(Self::String),
            _ => None,
        }
    }

    /// Parses a whitespace separated list of domain names, e.g. `"String Integer"`.
    pub fn parse_list(domains: &str) -> Result<Vec<Self>, Error> {
        domains.split_whitespace().map(str::parse).collect()
    }
}

impl FromStr for Domain {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Long" => Ok(Self::Long),
            "Integer" => Ok(Self::Integer),
            "Short" => Ok(Self::Short),
            "Byte" => Ok(Self::Byte),
            "Double" => Ok(Self::Double),
            "Float" => Ok(Self::Float),
            "Character" => Ok(Self::Character),
            "String" => Ok(Self::String),
            _ => Err(Error::UnknownDomain {
                name: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Is a single attribute value of a tuple.
///
/// Values of the same domain are ordered naturally, floating point values by
/// [`f64::total_cmp`]. Values of different domains are never equal and are not ordered:
/// `partial_cmp` returns `None` for them and [`Value::try_cmp`] fails.
#[derive(Clone, Debug)]
pub enum Value {
    Long(i64),
    Integer(i32),
    Short(i16),
    Byte(i8),
    Double(f64),
    Float(f32),
    Character(char),
    String(String),
}

impl Value {
    /// Returns the domain of the value.
    pub fn domain(&self) -> Domain {
        match self {
            Self::Long(_) => Domain::Long,
            Self::Integer(_) => Domain::Integer,
            Self::Short(_) => Domain::Short,
            Self::Byte(_) => Domain::Byte,
            Self::Double(_) => Domain::Double,
            Self::Float(_) => Domain::Float,
            Self::Character(_) => Domain::Character,
            Self::String(_) => Domain::String,
        }
    }

    /// Compares the receiver with `other`, failing if the two belong to different domains.
    pub fn try_cmp(&self, other: &Self) -> Result<Ordering, Error> {
        if self.domain() != other.domain() {
            return Err(Error::DomainMismatch {
                left: self.domain(),
                right: other.domain(),
            });
        }
        Ok(self.total_cmp(other))
    }

    /// Returns the integer content of integer values of any width.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Long(v) => Some(*v),
            Self::Integer(v) => Some(i64::from(*v)),
            Self::Short(v) => Some(i64::from(*v)),
            Self::Byte(v) => Some(i64::from(*v)),
            _ => None,
        }
    }

    /// Returns the content of floating point values of any width.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Double(v) => Some(*v),
            Self::Float(v) => Some(f64::from(*v)),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_char(&self) -> Option<char> {
        match self {
            Self::Character(c) => Some(*c),
            _ => None,
        }
    }
}

impl Value {
    /// Compares two values of the same domain, or returns `None` for values of different
    /// domains.
    fn same_domain_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Self::Long(l), Self::Long(r)) => Some(l.cmp(r)),
            (Self::Integer(l), Self::Integer(r)) => Some(l.cmp(r)),
            (Self::Short(l), Self::Short(r)) => Some(l.cmp(r)),
            (Self::Byte(l), Self::Byte(r)) => Some(l.cmp(r)),
            (Self::Double(l), Self::Double(r)) => Some(l.total_cmp(r)),
            (Self::Float(l), Self::Float(r)) => Some(l.total_cmp(r)),
            (Self::Character(l), Self::Character(r)) => Some(l.cmp(r)),
            (Self::String(l), Self::String(r)) => Some(l.cmp(r)),
            _ => None,
        }
    }

    /// Orders every pair of values, ranking values of different domains by domain. Only
    /// index keys rely on this order.
    pub(crate) fn total_cmp(&self, other: &Self) -> Ordering {
        self.same_domain_cmp(other)
            .unwrap_or_else(|| self.domain().tag().cmp(&other.domain().tag()))
    }
}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.same_domain_cmp(other)
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.same_domain_cmp(other) == Some(Ordering::Equal)
    }
}

impl Eq for Value {}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Long(v) => fmt::Display::fmt(v, f),
            Self::Integer(v) => fmt::Display::fmt(v, f),
            Self::Short(v) => fmt::Display::fmt(v, f),
            Self::Byte(v) => fmt::Display::fmt(v, f),
            Self::Double(v) => fmt::Display::fmt(v, f),
            Self::Float(v) => fmt::Display::fmt(v, f),
            Self::Character(v) => fmt::Display::fmt(v, f),
            Self::String(v) => fmt::Display::fmt(v, f),
        }
    }
}

macro_rules! value_from {
    ($($source:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$source> for Value {
                fn from(value: $source) -> Self {
                    Self::$variant(value)
                }
            }
        )*
    };
}

value_from! {
    i64 => Long,
    i32 => Integer,
    i16 => Short,
    i8 => Byte,
    f64 => Double,
    f32 => Float,
    char => Character,
    String => String,
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}
