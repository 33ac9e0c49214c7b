// Copyright 2014-2015 Galen Clark Haynes
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

// Rust XML-RPC library

use std::str::FromStr;

use crate::datetime::decode_datetime;
use crate::error::{Error, Result};
use crate::value::Value;

/// The leaf types a `<value>` may hold.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Scalar {
    Boolean,
    Int,
    I4,
    Double,
    String,
    DateTime,
    Nil,
}

impl Scalar {
    /// The element name this scalar is written as.
    pub fn tag(self) -> &'static str {
        match self {
            Scalar::Boolean => "boolean",
            Scalar::Int => "int",
            Scalar::I4 => "i4",
            Scalar::Double => "double",
            Scalar::String => "string",
            Scalar::DateTime => "dateTime.iso8601",
            Scalar::Nil => "nil",
        }
    }

    /// Turns the character data collected inside the element into a value.
    pub fn coerce(self, text: String) -> Result<Value> {
        match self {
            Scalar::Boolean => Ok(Value::Boolean(text == "1")),
            Scalar::Int | Scalar::I4 => match text.trim().parse::<i64>() {
                Ok(n) => Ok(Value::Integer(n)),
                Err(_) => Err(self.mismatch(text)),
            },
            Scalar::Double => match text.trim().parse::<f64>() {
                Ok(n) if n.is_finite() && is_decimal(text.trim()) => Ok(Value::Double(n)),
                _ => Err(self.mismatch(text)),
            },
            Scalar::String => Ok(Value::String(text)),
            Scalar::DateTime => decode_datetime(&text).map(Value::DateTime),
            Scalar::Nil if text.trim().is_empty() => Ok(Value::Nil),
            Scalar::Nil => Err(self.mismatch(text)),
        }
    }

    fn mismatch(self, text: String) -> Error {
        Error::TypeCoercion { tag: self.tag(), text }
    }
}

// Rust's float parser also takes `inf` and `NaN`; XML-RPC doubles are plain
// decimal numbers.
fn is_decimal(s: &str) -> bool {
    s.bytes().any(|b| b.is_ascii_digit())
        && s
            .bytes()
            .all(|b| b.is_ascii_digit() || matches!(b, b'+' | b'-' | b'.' | b'e' | b'E'))
}

impl FromStr for Scalar {
    type Err = Error;

    fn from_str(tag: &str) -> Result<Scalar> {
        match tag {
            "boolean" => Ok(Scalar::Boolean),
            "int" => Ok(Scalar::Int),
            "i4" => Ok(Scalar::I4),
            "double" => Ok(Scalar::Double),
            "string" => Ok(Scalar::String),
            "dateTime.iso8601" => Ok(Scalar::DateTime),
            "nil" => Ok(Scalar::Nil),
            _ => Err(Error::UnknownScalarType(tag.to_string())),
        }
    }
}
