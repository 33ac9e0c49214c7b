// Copyright 2014-2015 Galen Clark Haynes
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

// Rust XML-RPC library

/// Decoder options, built the same way as `xml::reader::ParserConfig`.
///
/// ```
/// use xmlrpc_parser::DecoderConfig;
///
/// let config = DecoderConfig::new().max_depth(32).implicit_string(true);
/// assert_eq!(config.max_depth, Some(32));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecoderConfig {
    /// Maximum nesting of `<value>` elements. Unlimited when `None`; the
    /// decoder keeps open elements on the heap, not the call stack.
    pub max_depth: Option<usize>,

    /// Read `<value>text</value>`, a value without a type tag, as a string.
    pub implicit_string: bool,
}

impl DecoderConfig {
    pub fn new() -> DecoderConfig {
        DecoderConfig {
            max_depth: None,
            implicit_string: false,
        }
    }

    pub fn max_depth(mut self, depth: usize) -> DecoderConfig {
        self.max_depth = Some(depth);
        self
    }

    pub fn implicit_string(mut self, enabled: bool) -> DecoderConfig {
        self.implicit_string = enabled;
        self
    }
}

impl Default for DecoderConfig {
    fn default() -> DecoderConfig {
        DecoderConfig::new()
    }
}
