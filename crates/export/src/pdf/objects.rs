//! PDF Object Model
//!
//! This module defines the core PDF object types as specified in the PDF Reference.
//! PDF uses a small set of basic object types that can be combined to represent
//! all document data.

use std::collections::BTreeMap;
use std::io::{self, Write};

/// PDF object types
#[derive(Debug, Clone, PartialEq)]
pub enum PdfObject {
    /// Null object
    Null,
    /// Boolean value
    Boolean(bool),
    /// Integer number
    Integer(i64),
    /// Real (floating-point) number
    Real(f64),
    /// String (literal or hexadecimal)
    String(PdfString),
    /// Name object (starts with /)
    Name(String),
    /// Array of objects
    Array(Vec<PdfObject>),
    /// Dictionary (key-value pairs)
    Dictionary(PdfDictionary),
    /// Stream (dictionary + byte data)
    Stream(PdfStream),
    /// Indirect reference (object number, generation number)
    Reference(u32, u16),
}

/// PDF string encoding
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PdfString {
    /// Literal string enclosed in parentheses
    Literal(Vec<u8>),
    /// Hexadecimal string enclosed in angle brackets
    Hex(Vec<u8>),
}

impl PdfString {
    /// Create a literal string from bytes
    pub fn literal(data: impl Into<Vec<u8>>) -> Self {
        PdfString::Literal(data.into())
    }

    /// Encode a text string: ASCII stays literal, anything else becomes
    /// UTF-16BE with a byte-order mark.
    pub fn text(s: &str) -> Self {
        if s.is_ascii() {
            PdfString::Literal(s.as_bytes().to_vec())
        } else {
            let mut bytes = vec![0xFE, 0xFF];
            for unit in s.encode_utf16() {
                bytes.extend_from_slice(&unit.to_be_bytes());
            }
            PdfString::Hex(bytes)
        }
    }
}

/// PDF dictionary (ordered key-value pairs)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PdfDictionary {
    entries: BTreeMap<String, PdfObject>,
}

impl PdfDictionary {
    /// Create an empty dictionary
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a key-value pair
    pub fn insert(&mut self, key: impl Into<String>, value: PdfObject) {
        self.entries.insert(key.into(), value);
    }

    /// Get a value by key
    pub fn get(&self, key: &str) -> Option<&PdfObject> {
        self.entries.get(key)
    }

    /// Iterate over entries
    pub fn iter(&self) -> impl Iterator<Item = (&String, &PdfObject)> {
        self.entries.iter()
    }

    /// Set the Type entry (common for PDF objects)
    pub fn with_type(mut self, type_name: &str) -> Self {
        self.insert("Type", PdfObject::Name(type_name.to_string()));
        self
    }
}

/// PDF stream (dictionary + data)
#[derive(Debug, Clone, PartialEq)]
pub struct PdfStream {
    /// Stream dictionary
    pub dict: PdfDictionary,
    /// Stream data (uncompressed or compressed)
    pub data: Vec<u8>,
    /// Whether the data is already compressed
    pub compressed: bool,
}

impl PdfStream {
    /// Create a new stream with data
    pub fn new(data: Vec<u8>) -> Self {
        Self {
            dict: PdfDictionary::new(),
            data,
            compressed: false,
        }
    }
}

/// Serializer for PDF objects
pub struct PdfSerializer<W: Write> {
    writer: W,
}

impl<W: Write> PdfSerializer<W> {
    /// Create a new serializer
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Write a PDF object
    pub fn write_object(&mut self, obj: &PdfObject) -> io::Result<()> {
        match obj {
            PdfObject::Null => write!(self.writer, "null"),
            PdfObject::Boolean(b) => {
                write!(self.writer, "{}", if *b { "true" } else { "false" })
            }
            PdfObject::Integer(n) => write!(self.writer, "{}", n),
            PdfObject::Real(n) => {
                if n.fract() == 0.0 {
                    write!(self.writer, "{:.1}", n)
                } else {
                    let s = format!("{:.6}", n);
                    let s = s.trim_end_matches('0');
                    let s = s.trim_end_matches('.');
                    write!(self.writer, "{}", s)
                }
            }
            PdfObject::String(s) => self.write_string(s),
            PdfObject::Name(name) => self.write_name(name),
            PdfObject::Array(arr) => self.write_array(arr),
            PdfObject::Dictionary(dict) => self.write_dictionary(dict),
            PdfObject::Stream(stream) => self.write_stream(stream),
            PdfObject::Reference(obj_num, gen_num) => {
                write!(self.writer, "{} {} R", obj_num, gen_num)
            }
        }
    }

    /// Write a PDF string
    fn write_string(&mut self, s: &PdfString) -> io::Result<()> {
        match s {
            PdfString::Literal(data) => {
                write!(self.writer, "(")?;
                for &byte in data {
                    match byte {
                        b'(' | b')' | b'\\' => {
                            write!(self.writer, "\\{}", byte as char)?;
                        }
                        0x0A => write!(self.writer, "\\n")?,
                        0x0D => write!(self.writer, "\\r")?,
                        0x09 => write!(self.writer, "\\t")?,
                        0x20..=0x7E => write!(self.writer, "{}", byte as char)?,
                        _ => write!(self.writer, "\\{:03o}", byte)?,
                    }
                }
                write!(self.writer, ")")
            }
            PdfString::Hex(data) => {
                write!(self.writer, "<")?;
                for byte in data {
                    write!(self.writer, "{:02X}", byte)?;
                }
                write!(self.writer, ">")
            }
        }
    }

    /// Write a PDF name
    fn write_name(&mut self, name: &str) -> io::Result<()> {
        write!(self.writer, "/")?;
        for byte in name.bytes() {
            match byte {
                b'#' | b'(' | b')' | b'<' | b'>' | b'[' | b']' | b'{' | b'}' | b'/' | b'%' => {
                    write!(self.writer, "#{:02X}", byte)?
                }
                0x21..=0x7E => write!(self.writer, "{}", byte as char)?,
                _ => write!(self.writer, "#{:02X}", byte)?,
            }
        }
        Ok(())
    }

    /// Write a PDF array
    fn write_array(&mut self, arr: &[PdfObject]) -> io::Result<()> {
        write!(self.writer, "[")?;
        for (i, obj) in arr.iter().enumerate() {
            if i > 0 {
                write!(self.writer, " ")?;
            }
            self.write_object(obj)?;
        }
        write!(self.writer, "]")
    }

    /// Write a PDF dictionary
    fn write_dictionary(&mut self, dict: &PdfDictionary) -> io::Result<()> {
        write!(self.writer, "<<")?;
        for (key, value) in dict.iter() {
            write!(self.writer, " ")?;
            self.write_name(key)?;
            write!(self.writer, " ")?;
            self.write_object(value)?;
        }
        write!(self.writer, " >>")
    }

    /// Write a PDF stream
    fn write_stream(&mut self, stream: &PdfStream) -> io::Result<()> {
        self.write_dictionary(&stream.dict)?;
        write!(self.writer, "\nstream\n")?;
        self.writer.write_all(&stream.data)?;
        write!(self.writer, "\nendstream")
    }

    /// Consume the serializer and return the writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}

// Convenience constructors for PdfObject
impl PdfObject {
    pub fn name(s: impl Into<String>) -> Self {
        PdfObject::Name(s.into())
    }

    pub fn reference(obj_num: u32) -> Self {
        PdfObject::Reference(obj_num, 0)
    }
}

impl From<i64> for PdfObject {
    fn from(n: i64) -> Self {
        PdfObject::Integer(n)
    }
}

impl From<u32> for PdfObject {
    fn from(n: u32) -> Self {
        PdfObject::Integer(n as i64)
    }
}

impl From<f64> for PdfObject {
    fn from(n: f64) -> Self {
        PdfObject::Real(n)
    }
}

impl From<PdfDictionary> for PdfObject {
    fn from(dict: PdfDictionary) -> Self {
        PdfObject::Dictionary(dict)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn serialize(obj: &PdfObject) -> String {
        let mut buf = Vec::new();
        PdfSerializer::new(&mut buf).write_object(obj).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_serialize_scalars() {
        assert_eq!(serialize(&PdfObject::Null), "null");
        assert_eq!(serialize(&PdfObject::Boolean(true)), "true");
        assert_eq!(serialize(&PdfObject::Integer(42)), "42");
        assert_eq!(serialize(&PdfObject::Real(612.0)), "612.0");
        assert_eq!(serialize(&PdfObject::Real(0.75)), "0.75");
        assert_eq!(serialize(&PdfObject::reference(7)), "7 0 R");
    }

    #[test]
    fn test_serialize_literal_string_escapes() {
        let s = PdfObject::String(PdfString::text("Resume (final)\\"));
        assert_eq!(serialize(&s), r"(Resume \(final\)\\)");
    }

    #[test]
    fn test_non_ascii_text_is_utf16_hex() {
        let s = PdfObject::String(PdfString::text("Zoë"));
        assert_eq!(serialize(&s), "<FEFF005A006F00EB>");
    }

    #[test]
    fn test_serialize_name_escapes_delimiters() {
        assert_eq!(serialize(&PdfObject::name("Type")), "/Type");
        assert_eq!(serialize(&PdfObject::name("A B")), "/A#20B");
        assert_eq!(serialize(&PdfObject::name("x/y")), "/x#2Fy");
    }

    #[test]
    fn test_serialize_dictionary_sorted() {
        let mut dict = PdfDictionary::new().with_type("Page");
        dict.insert("Count", PdfObject::Integer(1));
        dict.insert("Kids", PdfObject::Array(vec![PdfObject::reference(3)]));
        assert_eq!(
            serialize(&PdfObject::Dictionary(dict)),
            "<< /Count 1 /Kids [3 0 R] /Type /Page >>"
        );
    }
}
