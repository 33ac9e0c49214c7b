// Copyright 2014-2015 Galen Clark Haynes
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

// Rust XML-RPC library

use thiserror::Error;

/// The errors that can arise while decoding an XML-RPC document.
///
/// Every variant aborts the decode it came from; no partially built value is
/// ever handed back alongside an error. A remote fault is not an error here,
/// see [`MethodResponse::Fault`](crate::MethodResponse::Fault).
#[derive(Debug, Error)]
pub enum Error {
    /// The document is not well-formed XML.
    #[error("malformed XML: {0}")]
    Tokenizer(#[from] xml::reader::Error),

    /// A `<value>` child that is neither a known scalar nor `array`/`struct`.
    #[error("unknown scalar type <{0}>")]
    UnknownScalarType(String),

    /// Text that does not fit the declared scalar type.
    #[error("cannot read {text:?} as <{tag}>")]
    TypeCoercion { tag: &'static str, text: String },

    /// Text inside `<dateTime.iso8601>` that is not an ISO-8601 timestamp.
    #[error("invalid dateTime.iso8601 value {0:?}")]
    InvalidDateTime(String),

    /// The document does not follow the XML-RPC grammar.
    #[error("{0}")]
    Structural(String),

    /// Values nested deeper than the configured limit.
    #[error("values nested deeper than {0} levels")]
    DepthLimitExceeded(usize),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn structural(msg: impl Into<String>) -> Error {
        Error::Structural(msg.into())
    }
}
