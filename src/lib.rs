// Copyright 2014-2015 Galen Clark Haynes
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

// Rust XML-RPC library

#![forbid(non_camel_case_types)]

//! XML-RPC decoding: method calls and method responses into typed values.
//!
//! # What is XML-RPC?
//!
//! A remote procedure call protocol that encodes each call and each response
//! as a small XML document. Values are one of six scalars (`int`/`i4`,
//! `double`, `boolean`, `string`, `dateTime.iso8601`, `nil`) or the two
//! containers `array` and `struct`, nested to any depth.
//!
//! Basic documentation found on Wikipedia
//! http://en.wikipedia.org/wiki/XML-RPC
//!
//! Full specification of the XML-RPC protocol is found here:
//! http://xmlrpc.scripting.com/spec.html
//!
//! Additional errata and hints can be found here:
//! http://effbot.org/zone/xmlrpc-errata.htm
//!
//! # Example
//!
//! ```
//! use xmlrpc_parser::{parse_method_response, MethodResponse, Value};
//!
//! let xml = "<?xml version=\"1.0\"?>
//! <methodResponse>
//!   <params>
//!     <param><value><string>South Dakota</string></value></param>
//!   </params>
//! </methodResponse>";
//!
//! let response = parse_method_response(xml).unwrap();
//! assert_eq!(MethodResponse::Success(Value::String("South Dakota".into())), response);
//! ```

pub use crate::config::DecoderConfig;
pub use crate::datetime::{decode_datetime, DateTime};
pub use crate::de::Deserializer;
pub use crate::error::{Error, Result};
pub use crate::event::{Event, EventBuffer, EventSource, XmlReader};
pub use crate::protocol::{Fault, MethodCall, MethodResponse};
pub use crate::scalar::Scalar;
pub use crate::value::{Array, Struct, Value};

pub mod config;
pub mod datetime;
pub mod de;
pub mod error;
pub mod event;
pub mod protocol;
pub mod scalar;
pub mod value;

/// Shortcut function to decode a `<methodCall>` document.
pub fn parse_method_call(xml: &str) -> Result<MethodCall> {
    xml.parse()
}

/// Shortcut function to decode a `<methodResponse>` document.
///
/// A fault is a successful decode; use [`MethodResponse::into_result`] to
/// treat it as an error.
pub fn parse_method_response(xml: &str) -> Result<MethodResponse> {
    xml.parse()
}
