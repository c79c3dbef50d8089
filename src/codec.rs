use crate::error::SdsError;
use crate::node::NodeId;
use crate::tree::NaryTree;
use crate::value::{Tag, Value};
use std::io::{Read, Write};

/// Format identifier at the start of every stream.
pub const MAGIC_TAG: &str = "sds";
/// Record layout version.
pub const VERSION: u32 = 1;
/// Field delimiter within a record.
pub const DELIM: u8 = b':';
/// Record separator.
pub const EOL: u8 = b'\n';
/// Parent token of the root record.
pub const ROOT_STR: &str = "root";

/// Serializes the tree in breadth-first order.
///
/// One record per line: `{<parent>} <tag>:<payload>`, preceded by the
/// `sds:1` header. Records are separated by the line terminator with none
/// after the final record. String payloads are length-prefixed raw bytes,
/// so they may contain the delimiter or the terminator itself.
pub fn encode<W: Write>(tree: &NaryTree, sink: &mut W) -> Result<(), SdsError> {
    write!(sink, "{}{}{}", MAGIC_TAG, DELIM as char, VERSION)?;

    for id in tree.linearize() {
        let node = tree.find_by_id(id).ok_or(SdsError::NodeNotFound(id))?;

        sink.write_all(&[EOL])?;
        match node.parent {
            Some(pid) => write!(sink, "{{{}}} ", pid)?,
            None => write!(sink, "{{{}}} ", ROOT_STR)?,
        }

        let tag = node.value.tag();
        if tag == Tag::Undefined {
            return Err(SdsError::UnsupportedValueKind(tag.code()));
        }
        write!(sink, "{}{}", tag.code(), DELIM as char)?;

        match &node.value {
            Value::Char(c) => sink.write_all(&[*c])?,
            Value::Int(v) => write!(sink, "{}", v)?,
            Value::Long(v) => write!(sink, "{}", v)?,
            Value::Double(v) => write!(sink, "{}", v)?,
            Value::Str(s) => {
                write!(sink, "{}{}", s.len(), DELIM as char)?;
                sink.write_all(s.as_bytes())?;
            }
            Value::Undefined => return Err(SdsError::UnsupportedValueKind(0)),
        }
    }

    sink.flush()?;
    Ok(())
}

/// Rebuilds a tree from an encoded stream.
///
/// Fails with `BadFormat` on a header mismatch, `UnsupportedValueKind` on an
/// unknown type tag, `MissingParent` when a record references a parent not
/// yet inserted, and `Deserialisation` on any other malformed record. Either
/// a complete tree comes back or nothing does.
pub fn decode<R: Read>(mut source: R) -> Result<NaryTree, SdsError> {
    let mut buf = Vec::new();
    source.read_to_end(&mut buf)?;
    let mut cur = Cursor::new(&buf);

    read_header(&mut cur)?;

    let mut tree = NaryTree::new();
    let mut records = 0usize;
    while !cur.at_end() {
        let (value, parent) = read_record(&mut cur)?;
        if records == 0 {
            if let Some(pid) = parent {
                // An unknown parent is an orphan; a known one still violates
                // the root-record-first contract.
                if tree.find_by_id(pid).is_none() {
                    return Err(SdsError::MissingParent(pid));
                }
                return Err(SdsError::Deserialisation(
                    "first record must be the root record".to_string(),
                ));
            }
        }
        tree.insert(value, parent)?;
        records += 1;
    }

    if records == 0 {
        return Err(SdsError::Deserialisation("missing root record".to_string()));
    }

    Ok(tree)
}

fn read_header(cur: &mut Cursor) -> Result<(), SdsError> {
    let line = cur.read_line();
    let text = std::str::from_utf8(line)
        .map_err(|_| SdsError::BadFormat("header is not valid UTF-8".to_string()))?;

    let (magic, version) = text
        .split_once(DELIM as char)
        .ok_or_else(|| SdsError::BadFormat(format!("malformed header: {:?}", text)))?;

    if magic != MAGIC_TAG {
        return Err(SdsError::BadFormat(format!("unknown magic tag: {:?}", magic)));
    }

    let version: u32 = version
        .parse()
        .map_err(|_| SdsError::BadFormat(format!("malformed version: {:?}", version)))?;
    if version != VERSION {
        return Err(SdsError::BadFormat(format!(
            "unsupported version: {}",
            version
        )));
    }

    Ok(())
}

fn read_record(cur: &mut Cursor) -> Result<(Value, Option<NodeId>), SdsError> {
    cur.expect(b'{')
        .ok_or_else(|| SdsError::Deserialisation("record does not start with '{'".to_string()))?;

    let token = cur
        .read_until(b'}')
        .ok_or_else(|| SdsError::Deserialisation("unterminated parent token".to_string()))?;
    let parent = if token == ROOT_STR.as_bytes() {
        None
    } else {
        let id: NodeId = std::str::from_utf8(token)
            .ok()
            .and_then(|t| t.parse().ok())
            .ok_or_else(|| {
                SdsError::Deserialisation(format!(
                    "malformed parent id: {:?}",
                    String::from_utf8_lossy(token)
                ))
            })?;
        Some(id)
    };

    cur.expect(b' ')
        .ok_or_else(|| SdsError::Deserialisation("missing separator after parent".to_string()))?;

    let tag_text = cur
        .read_until(DELIM)
        .ok_or_else(|| SdsError::Deserialisation("missing value tag".to_string()))?;
    let code: u32 = std::str::from_utf8(tag_text)
        .ok()
        .and_then(|t| t.parse().ok())
        .ok_or_else(|| {
            SdsError::Deserialisation(format!(
                "malformed value tag: {:?}",
                String::from_utf8_lossy(tag_text)
            ))
        })?;

    let tag = Tag::from_code(code).ok_or(SdsError::UnsupportedValueKind(code))?;

    let value = match tag {
        // Tag 0 is a placeholder, never a serialized kind.
        Tag::Undefined => return Err(SdsError::UnsupportedValueKind(code)),
        Tag::Char => {
            let byte = cur
                .next()
                .ok_or_else(|| SdsError::Deserialisation("missing char payload".to_string()))?;
            end_record(cur)?;
            Value::Char(byte)
        }
        Tag::Int => Value::Int(parse_number(cur.read_line())?),
        Tag::Long => Value::Long(parse_number(cur.read_line())?),
        Tag::Double => Value::Double(parse_number(cur.read_line())?),
        Tag::Str => {
            let len_text = cur
                .read_until(DELIM)
                .ok_or_else(|| SdsError::Deserialisation("missing string length".to_string()))?;
            let len: usize = parse_number(len_text)?;
            let bytes = cur
                .take(len)
                .ok_or_else(|| SdsError::Deserialisation("truncated string payload".to_string()))?;
            let s = String::from_utf8(bytes.to_vec()).map_err(|_| {
                SdsError::Deserialisation("string payload is not valid UTF-8".to_string())
            })?;
            end_record(cur)?;
            Value::Str(s)
        }
    };

    Ok((value, parent))
}

fn parse_number<T: std::str::FromStr>(bytes: &[u8]) -> Result<T, SdsError> {
    std::str::from_utf8(bytes)
        .ok()
        .and_then(|t| t.parse().ok())
        .ok_or_else(|| {
            SdsError::Deserialisation(format!(
                "malformed numeric payload: {:?}",
                String::from_utf8_lossy(bytes)
            ))
        })
}

fn end_record(cur: &mut Cursor) -> Result<(), SdsError> {
    if cur.at_end() {
        return Ok(());
    }
    cur.expect(EOL)
        .map(|_| ())
        .ok_or_else(|| SdsError::Deserialisation("trailing bytes after record".to_string()))
}

/// Byte cursor over the input. Records are not split on lines up front
/// because string payloads may legally contain the line terminator.
struct Cursor<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    fn at_end(&self) -> bool {
        self.pos >= self.buf.len()
    }

    fn next(&mut self) -> Option<u8> {
        let b = self.buf.get(self.pos).copied()?;
        self.pos += 1;
        Some(b)
    }

    fn expect(&mut self, want: u8) -> Option<u8> {
        if self.buf.get(self.pos) == Some(&want) {
            self.pos += 1;
            Some(want)
        } else {
            None
        }
    }

    /// Consumes up to and including `stop`; yields the bytes before it.
    /// `None` if `stop` never occurs.
    fn read_until(&mut self, stop: u8) -> Option<&'a [u8]> {
        let rest = &self.buf[self.pos..];
        let at = rest.iter().position(|b| *b == stop)?;
        self.pos += at + 1;
        Some(&rest[..at])
    }

    /// Consumes up to the line terminator or the end of input; the
    /// terminator itself is consumed but not yielded.
    fn read_line(&mut self) -> &'a [u8] {
        let rest = &self.buf[self.pos..];
        match rest.iter().position(|b| *b == EOL) {
            Some(at) => {
                self.pos += at + 1;
                &rest[..at]
            }
            None => {
                self.pos = self.buf.len();
                rest
            }
        }
    }

    /// Consumes exactly `n` bytes, or `None` if fewer remain.
    fn take(&mut self, n: usize) -> Option<&'a [u8]> {
        let rest = &self.buf[self.pos..];
        if rest.len() < n {
            return None;
        }
        self.pos += n;
        Some(&rest[..n])
    }
}
