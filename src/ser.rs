//! Form value-tree builder.
//!
//! This module provides the serde [`Serializer`] that turns any `Serialize`
//! value into a [`FormNode`] tree. It has three modes, matching the shapes
//! serde reports:
//!
//! - **Single value** ([`Serializer`]): primitives become leaves, dates go
//!   through the date strategy, everything else recurses
//! - **Keyed** ([`KeyedSerializer`]): structs, maps and struct variants
//! - **Unkeyed** ([`UnkeyedSerializer`]): sequences and tuples
//!
//! ## Leaves
//!
//! Integers, floats, booleans, chars, strings and unit variants are leaves.
//! Their text is percent-encoded as it is classified. Types that serialize
//! as strings (decimals, URLs, UUIDs) are leaves too.
//!
//! ## Arrays
//!
//! Scalar elements of an unkeyed container are routed by the configured
//! [`ArrayEncoding`]; structured elements are always stored under their index:
//!
//! ```rust
//! use serde_urlform::to_string;
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Item { x: u8 }
//!
//! #[derive(Serialize)]
//! struct Order { ids: Vec<u8>, items: Vec<Item> }
//!
//! let order = Order { ids: vec![1, 2], items: vec![Item { x: 1 }, Item { x: 2 }] };
//! assert_eq!(
//!     to_string(&order).unwrap(),
//!     "ids[]=1&ids[]=2&items[0][x]=1&items[1][x]=2"
//! );
//! ```

use crate::date::{self, DATE_TOKEN};
use crate::{percent, ArrayEncoding, Error, FormNode, FormOptions, Path, Result};
use serde::ser::{self, Impossible, Serialize};

/// What a single value turned out to be.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Fragment {
    /// `None`, `()` or a unit struct. Nothing is written.
    Absent,
    /// Percent-encoded text of a scalar.
    Leaf(String),
    /// A composite value, or the output of the date strategy.
    Tree(FormNode),
}

impl Fragment {
    /// Converts the fragment into a node; `Absent` yields `None`.
    #[must_use]
    pub fn into_node(self) -> Option<FormNode> {
        match self {
            Fragment::Absent => None,
            Fragment::Leaf(text) => Some(FormNode::leaf(text)),
            Fragment::Tree(node) => Some(node),
        }
    }
}

/// Single-value serializer rooted at a path.
pub struct Serializer<'a> {
    options: &'a FormOptions,
    path: Path,
}

impl<'a> Serializer<'a> {
    pub fn new(options: &'a FormOptions, path: Path) -> Self {
        Serializer { options, path }
    }

    fn leaf(text: &str) -> Result<Fragment> {
        Ok(Fragment::Leaf(percent::encode(text)))
    }

    fn keyed(self) -> KeyedSerializer<'a> {
        KeyedSerializer {
            options: self.options,
            path: self.path,
            node: FormNode::new(),
            pending_key: None,
        }
    }

    fn unkeyed(self) -> UnkeyedSerializer<'a> {
        UnkeyedSerializer {
            options: self.options,
            path: self.path,
            node: FormNode::new(),
            count: 0,
        }
    }

    fn date<T>(self, payload: &T) -> Result<Fragment>
    where
        T: ?Sized + Serialize,
    {
        let text = payload.serialize(TextSerializer).map_err(|e| match e {
            TextError::NotScalar(kind) => Error::InvalidDate(format!("expected text, found {kind}")),
            TextError::Other(e) => e,
        })?;
        let when = date::parse_payload(&text)?;
        date::encode_date(self.options, &self.path, &when).map(Fragment::Tree)
    }
}

impl<'a> ser::Serializer for Serializer<'a> {
    type Ok = Fragment;
    type Error = Error;

    type SerializeSeq = UnkeyedSerializer<'a>;
    type SerializeTuple = UnkeyedSerializer<'a>;
    type SerializeTupleStruct = UnkeyedSerializer<'a>;
    type SerializeTupleVariant = VariantSerializer<UnkeyedSerializer<'a>>;
    type SerializeMap = KeyedSerializer<'a>;
    type SerializeStruct = KeyedSerializer<'a>;
    type SerializeStructVariant = VariantSerializer<KeyedSerializer<'a>>;

    fn serialize_bool(self, v: bool) -> Result<Fragment> {
        Self::leaf(if v { "true" } else { "false" })
    }

    fn serialize_i8(self, v: i8) -> Result<Fragment> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_i16(self, v: i16) -> Result<Fragment> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_i32(self, v: i32) -> Result<Fragment> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_i64(self, v: i64) -> Result<Fragment> {
        Self::leaf(&v.to_string())
    }

    fn serialize_i128(self, v: i128) -> Result<Fragment> {
        Self::leaf(&v.to_string())
    }

    fn serialize_u8(self, v: u8) -> Result<Fragment> {
        self.serialize_u64(u64::from(v))
    }

    fn serialize_u16(self, v: u16) -> Result<Fragment> {
        self.serialize_u64(u64::from(v))
    }

    fn serialize_u32(self, v: u32) -> Result<Fragment> {
        self.serialize_u64(u64::from(v))
    }

    fn serialize_u64(self, v: u64) -> Result<Fragment> {
        Self::leaf(&v.to_string())
    }

    fn serialize_u128(self, v: u128) -> Result<Fragment> {
        Self::leaf(&v.to_string())
    }

    // Formatted at native width so `0.1f32` stays "0.1".
    fn serialize_f32(self, v: f32) -> Result<Fragment> {
        Self::leaf(&v.to_string())
    }

    fn serialize_f64(self, v: f64) -> Result<Fragment> {
        Self::leaf(&v.to_string())
    }

    fn serialize_char(self, v: char) -> Result<Fragment> {
        let mut buf = [0u8; 4];
        Self::leaf(v.encode_utf8(&mut buf))
    }

    fn serialize_str(self, v: &str) -> Result<Fragment> {
        Self::leaf(v)
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Fragment> {
        use ser::SerializeSeq;
        let mut seq = self.serialize_seq(Some(v.len()))?;
        for byte in v {
            seq.serialize_element(byte)?;
        }
        seq.end()
    }

    fn serialize_none(self) -> Result<Fragment> {
        Ok(Fragment::Absent)
    }

    fn serialize_some<T>(self, value: &T) -> Result<Fragment>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Fragment> {
        Ok(Fragment::Absent)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Fragment> {
        Ok(Fragment::Absent)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Fragment> {
        Self::leaf(variant)
    }

    fn serialize_newtype_struct<T>(self, name: &'static str, value: &T) -> Result<Fragment>
    where
        T: ?Sized + Serialize,
    {
        if name == DATE_TOKEN {
            return self.date(value);
        }
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<Fragment>
    where
        T: ?Sized + Serialize,
    {
        let mut keyed = self.keyed();
        keyed.encode_field(variant, value)?;
        Ok(Fragment::Tree(keyed.finish()))
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<UnkeyedSerializer<'a>> {
        Ok(self.unkeyed())
    }

    fn serialize_tuple(self, _len: usize) -> Result<UnkeyedSerializer<'a>> {
        Ok(self.unkeyed())
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<UnkeyedSerializer<'a>> {
        Ok(self.unkeyed())
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        let inner = Serializer::new(self.options, self.path.key(variant)).unkeyed();
        Ok(VariantSerializer { variant, inner })
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<KeyedSerializer<'a>> {
        Ok(self.keyed())
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<KeyedSerializer<'a>> {
        Ok(self.keyed())
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        let inner = Serializer::new(self.options, self.path.key(variant)).keyed();
        Ok(VariantSerializer { variant, inner })
    }
}

/// Keyed container: structs, maps and struct variants.
pub struct KeyedSerializer<'a> {
    options: &'a FormOptions,
    path: Path,
    node: FormNode,
    pending_key: Option<String>,
}

impl<'a> KeyedSerializer<'a> {
    fn encode_field<T>(&mut self, key: &str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let fragment = value.serialize(Serializer::new(self.options, self.path.key(key)))?;
        if let Some(child) = fragment.into_node() {
            self.node.insert_child(key, child);
        }
        Ok(())
    }

    fn finish(self) -> FormNode {
        self.node
    }
}

impl<'a> ser::SerializeStruct for KeyedSerializer<'a> {
    type Ok = Fragment;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.encode_field(key, value)
    }

    fn end(self) -> Result<Fragment> {
        Ok(Fragment::Tree(self.finish()))
    }
}

impl<'a> ser::SerializeMap for KeyedSerializer<'a> {
    type Ok = Fragment;
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = key.serialize(TextSerializer).map_err(|e| match e {
            TextError::NotScalar(kind) => Error::encoding(&self.path, &format!("<{kind} map key>")),
            TextError::Other(e) => e,
        })?;
        self.pending_key = Some(key);
        Ok(())
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = self
            .pending_key
            .take()
            .ok_or_else(|| Error::custom("serialize_value called without serialize_key"))?;
        self.encode_field(&key, value)
    }

    fn end(self) -> Result<Fragment> {
        Ok(Fragment::Tree(self.finish()))
    }
}

/// Unkeyed container: sequences and tuples.
pub struct UnkeyedSerializer<'a> {
    options: &'a FormOptions,
    path: Path,
    node: FormNode,
    count: usize,
}

impl<'a> UnkeyedSerializer<'a> {
    fn encode_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let element = Serializer::new(self.options, self.path.index(self.count));
        match value.serialize(element)? {
            Fragment::Absent => return Ok(()),
            Fragment::Leaf(text) => self.route(vec![text]),
            Fragment::Tree(node) => {
                if node.has_only_values() {
                    self.route(node.values);
                } else {
                    self.node.insert_child(self.count.to_string(), node);
                }
            }
        }
        // Only counted once the element is fully encoded.
        self.count += 1;
        Ok(())
    }

    fn route(&mut self, values: Vec<String>) {
        if values.is_empty() {
            return;
        }
        match self.options.array_encoding {
            ArrayEncoding::Bracket => self.node.push_bracketed(values),
            ArrayEncoding::Separator(_) | ArrayEncoding::Values => self.node.values.extend(values),
        }
    }

    fn finish(mut self) -> FormNode {
        if let ArrayEncoding::Separator(separator) = self.options.array_encoding {
            self.node.collapse_separated(separator);
        }
        self.node
    }
}

impl<'a> ser::SerializeSeq for UnkeyedSerializer<'a> {
    type Ok = Fragment;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.encode_element(value)
    }

    fn end(self) -> Result<Fragment> {
        Ok(Fragment::Tree(self.finish()))
    }
}

impl<'a> ser::SerializeTuple for UnkeyedSerializer<'a> {
    type Ok = Fragment;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.encode_element(value)
    }

    fn end(self) -> Result<Fragment> {
        Ok(Fragment::Tree(self.finish()))
    }
}

impl<'a> ser::SerializeTupleStruct for UnkeyedSerializer<'a> {
    type Ok = Fragment;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.encode_element(value)
    }

    fn end(self) -> Result<Fragment> {
        Ok(Fragment::Tree(self.finish()))
    }
}

/// Wraps a container in an externally tagged `{variant: ...}` node.
pub struct VariantSerializer<S> {
    variant: &'static str,
    inner: S,
}

impl<S> VariantSerializer<S> {
    fn wrap(variant: &'static str, node: FormNode) -> Fragment {
        let mut outer = FormNode::new();
        outer.insert_child(variant, node);
        Fragment::Tree(outer)
    }
}

impl<'a> ser::SerializeTupleVariant for VariantSerializer<UnkeyedSerializer<'a>> {
    type Ok = Fragment;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.inner.encode_element(value)
    }

    fn end(self) -> Result<Fragment> {
        Ok(Self::wrap(self.variant, self.inner.finish()))
    }
}

impl<'a> ser::SerializeStructVariant for VariantSerializer<KeyedSerializer<'a>> {
    type Ok = Fragment;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.inner.encode_field(key, value)
    }

    fn end(self) -> Result<Fragment> {
        Ok(Self::wrap(self.variant, self.inner.finish()))
    }
}

/// Renders a scalar as raw text. Used for map keys and date payloads.
struct TextSerializer;

/// Failure of [`TextSerializer`]. Errors raised by the value's own
/// `Serialize` impl are kept apart so callers can pass them through.
#[derive(Debug, thiserror::Error)]
enum TextError {
    #[error("expected a scalar, found {0}")]
    NotScalar(&'static str),
    #[error(transparent)]
    Other(#[from] Error),
}

impl ser::Error for TextError {
    fn custom<T: std::fmt::Display>(msg: T) -> Self {
        TextError::Other(Error::custom(msg))
    }
}

type TextResult<T = String> = std::result::Result<T, TextError>;

impl TextSerializer {
    fn unsupported<T>(kind: &'static str) -> TextResult<T> {
        Err(TextError::NotScalar(kind))
    }
}

impl ser::Serializer for TextSerializer {
    type Ok = String;
    type Error = TextError;

    type SerializeSeq = Impossible<String, TextError>;
    type SerializeTuple = Impossible<String, TextError>;
    type SerializeTupleStruct = Impossible<String, TextError>;
    type SerializeTupleVariant = Impossible<String, TextError>;
    type SerializeMap = Impossible<String, TextError>;
    type SerializeStruct = Impossible<String, TextError>;
    type SerializeStructVariant = Impossible<String, TextError>;

    fn serialize_bool(self, v: bool) -> TextResult {
        Ok(v.to_string())
    }

    fn serialize_i8(self, v: i8) -> TextResult {
        Ok(v.to_string())
    }

    fn serialize_i16(self, v: i16) -> TextResult {
        Ok(v.to_string())
    }

    fn serialize_i32(self, v: i32) -> TextResult {
        Ok(v.to_string())
    }

    fn serialize_i64(self, v: i64) -> TextResult {
        Ok(v.to_string())
    }

    fn serialize_i128(self, v: i128) -> TextResult {
        Ok(v.to_string())
    }

    fn serialize_u8(self, v: u8) -> TextResult {
        Ok(v.to_string())
    }

    fn serialize_u16(self, v: u16) -> TextResult {
        Ok(v.to_string())
    }

    fn serialize_u32(self, v: u32) -> TextResult {
        Ok(v.to_string())
    }

    fn serialize_u64(self, v: u64) -> TextResult {
        Ok(v.to_string())
    }

    fn serialize_u128(self, v: u128) -> TextResult {
        Ok(v.to_string())
    }

    fn serialize_f32(self, v: f32) -> TextResult {
        Ok(v.to_string())
    }

    fn serialize_f64(self, v: f64) -> TextResult {
        Ok(v.to_string())
    }

    fn serialize_char(self, v: char) -> TextResult {
        Ok(v.to_string())
    }

    fn serialize_str(self, v: &str) -> TextResult {
        Ok(v.to_string())
    }

    fn serialize_bytes(self, _v: &[u8]) -> TextResult {
        Self::unsupported("bytes")
    }

    fn serialize_none(self) -> TextResult {
        Self::unsupported("none")
    }

    fn serialize_some<T>(self, value: &T) -> TextResult
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> TextResult {
        Self::unsupported("unit")
    }

    fn serialize_unit_struct(self, _name: &'static str) -> TextResult {
        Self::unsupported("unit struct")
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> TextResult {
        Ok(variant.to_string())
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> TextResult
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> TextResult
    where
        T: ?Sized + Serialize,
    {
        Self::unsupported("newtype variant")
    }

    fn serialize_seq(self, _len: Option<usize>) -> TextResult<Self::SerializeSeq> {
        Self::unsupported("sequence")
    }

    fn serialize_tuple(self, _len: usize) -> TextResult<Self::SerializeTuple> {
        Self::unsupported("tuple")
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> TextResult<Self::SerializeTupleStruct> {
        Self::unsupported("tuple struct")
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> TextResult<Self::SerializeTupleVariant> {
        Self::unsupported("tuple variant")
    }

    fn serialize_map(self, _len: Option<usize>) -> TextResult<Self::SerializeMap> {
        Self::unsupported("map")
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> TextResult<Self::SerializeStruct> {
        Self::unsupported("struct")
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> TextResult<Self::SerializeStructVariant> {
        Self::unsupported("struct variant")
    }
}
