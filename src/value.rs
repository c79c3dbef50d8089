use serde::{Deserialize, Serialize};
use std::fmt;

/// Wire codes for the five value kinds. The codes are part of the file
/// format and must never be reused for different meanings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tag {
    Undefined,
    Char,
    Int,
    Long,
    Double,
    Str,
}

impl Tag {
    pub fn code(self) -> u32 {
        match self {
            Tag::Undefined => 0,
            Tag::Char => 10,
            Tag::Int => 30,
            Tag::Long => 40,
            Tag::Double => 50,
            Tag::Str => 60,
        }
    }

    /// Maps a decoded numeric code back to a tag. Code 0 is a valid tag
    /// (`Undefined`) but never appears in a well-formed stream; the codec
    /// rejects it separately.
    pub fn from_code(code: u32) -> Option<Tag> {
        match code {
            0 => Some(Tag::Undefined),
            10 => Some(Tag::Char),
            30 => Some(Tag::Int),
            40 => Some(Tag::Long),
            50 => Some(Tag::Double),
            60 => Some(Tag::Str),
            _ => None,
        }
    }
}

/// Scalar payload of a tree node. The tag is derived from the variant and
/// never stored alongside it, so tag and payload cannot disagree.
/// `Undefined` exists only for the placeholder root of an empty tree and is
/// never serialized.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Value {
    Char(u8),
    Int(i32),
    Long(i64),
    Double(f64),
    Str(String),
    Undefined,
}

impl Value {
    pub fn tag(&self) -> Tag {
        match self {
            Value::Char(_) => Tag::Char,
            Value::Int(_) => Tag::Int,
            Value::Long(_) => Tag::Long,
            Value::Double(_) => Tag::Double,
            Value::Str(_) => Tag::Str,
            Value::Undefined => Tag::Undefined,
        }
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }
}

/// Human-readable rendering: chars single-quoted, strings double-quoted.
/// The wire rendering (length-prefixed strings) lives in the codec.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Char(c) => write!(f, "'{}'", *c as char),
            Value::Int(v) => write!(f, "{}", v),
            Value::Long(v) => write!(f, "{}", v),
            Value::Double(v) => write!(f, "{}", v),
            Value::Str(s) => write!(f, "\"{}\"", s),
            Value::Undefined => write!(f, "undefined"),
        }
    }
}
