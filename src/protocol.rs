// Copyright 2014-2015 Galen Clark Haynes
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

// Rust XML-RPC library

use std::fmt;
use std::io::Read;
use std::str::FromStr;

use log::{debug, warn};

use crate::de::Deserializer;
use crate::error::{Error, Result};
use crate::event::{Event, EventSource};
use crate::value::Value;

/// A decoded `<methodCall>`.
#[derive(Clone, Debug, PartialEq)]
pub struct MethodCall {
    pub method_name: String,
    pub params: Vec<Value>,
}

/// A decoded `<methodResponse>`.
#[derive(Clone, Debug, PartialEq)]
pub enum MethodResponse {
    /// The single value under `<params>`.
    Success(Value),
    /// The value under `<fault>`, normally a struct with `faultCode` and
    /// `faultString` members.
    Fault(Value),
}

/// A remote fault, as an error.
#[derive(Clone, Debug, PartialEq)]
pub struct Fault {
    pub value: Value,
}

impl MethodCall {
    pub fn from_reader<R: Read>(source: R) -> Result<MethodCall> {
        Deserializer::from_reader(source).method_call()
    }
}

impl FromStr for MethodCall {
    type Err = Error;

    fn from_str(s: &str) -> Result<MethodCall> {
        Deserializer::from_str(s).method_call()
    }
}

impl MethodResponse {
    pub fn from_reader<R: Read>(source: R) -> Result<MethodResponse> {
        Deserializer::from_reader(source).method_response()
    }

    pub fn is_fault(&self) -> bool {
        matches!(*self, MethodResponse::Fault(_))
    }

    /// The returned value, or the fault as an error.
    pub fn into_result(self) -> std::result::Result<Value, Fault> {
        match self {
            MethodResponse::Success(value) => Ok(value),
            MethodResponse::Fault(value) => Err(Fault { value }),
        }
    }
}

impl FromStr for MethodResponse {
    type Err = Error;

    fn from_str(s: &str) -> Result<MethodResponse> {
        Deserializer::from_str(s).method_response()
    }
}

impl Fault {
    /// The `faultCode` member, if the fault has one.
    pub fn code(&self) -> Option<i64> {
        self.value.find("faultCode").and_then(Value::as_i64)
    }

    /// The `faultString` member, if the fault has one.
    pub fn message(&self) -> Option<&str> {
        self.value.find("faultString").and_then(Value::as_str)
    }
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match (self.code(), self.message()) {
            (Some(code), Some(message)) => write!(f, "remote fault {}: {}", code, message),
            (None, Some(message)) => write!(f, "remote fault: {}", message),
            (Some(code), None) => write!(f, "remote fault {}", code),
            (None, None) => write!(f, "remote fault: {:?}", self.value),
        }
    }
}

impl std::error::Error for Fault {}

impl<S: EventSource> Deserializer<S> {
    /// Decodes a whole `<methodCall>` document.
    pub fn method_call(mut self) -> Result<MethodCall> {
        self.expect_start("methodCall")?;
        self.expect_start("methodName")?;
        let method_name = self.text("methodName")?.trim().to_string();
        if method_name.is_empty() {
            return Err(Error::structural("<methodName> is empty"));
        }

        let params = match self.next_tag()? {
            Event::StartElement { ref name } if name == "params" => {
                let params = self.params()?;
                self.expect_end("methodCall")?;
                params
            }
            // <params> may be left out when there are none
            Event::EndElement { ref name } if name == "methodCall" => Vec::new(),
            other => {
                return Err(Error::structural(format!(
                    "expected <params> or </methodCall>, found {}",
                    other
                )))
            }
        };
        self.expect_end_document()?;

        debug!("decoded call to {} with {} params", method_name, params.len());
        Ok(MethodCall {
            method_name,
            params,
        })
    }

    /// Decodes a whole `<methodResponse>` document.
    pub fn method_response(mut self) -> Result<MethodResponse> {
        self.expect_start("methodResponse")?;
        let response = match self.next_tag()? {
            Event::StartElement { ref name } if name == "params" => {
                let params = self.params()?;
                let [value] = <[Value; 1]>::try_from(params).map_err(|params| {
                    Error::structural(format!(
                        "response must have exactly one param, found {}",
                        params.len()
                    ))
                })?;
                MethodResponse::Success(value)
            }
            Event::StartElement { ref name } if name == "fault" => {
                self.expect_start("value")?;
                let value = self.value()?;
                self.expect_end("fault")?;
                check_fault_shape(&value);
                MethodResponse::Fault(value)
            }
            other => {
                return Err(Error::structural(format!(
                    "expected <params> or <fault>, found {}",
                    other
                )))
            }
        };
        self.expect_end("methodResponse")?;
        self.expect_end_document()?;

        debug!("decoded {} response", if response.is_fault() { "fault" } else { "success" });
        Ok(response)
    }
}

fn check_fault_shape(value: &Value) {
    if !value.is_struct() {
        warn!("fault value is not a struct: {:?}", value);
    } else if !value["faultCode"].is_i64() || !value["faultString"].is_string() {
        warn!("fault struct lacks an integer faultCode or a string faultString");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Struct;

    fn strukt(members: Vec<(&str, Value)>) -> Value {
        Value::Struct(
            members
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect::<Struct>(),
        )
    }

    #[test]
    fn test_method_call() {
        let xml = "<?xml version=\"1.0\"?>
                   <methodCall>
                     <methodName>examples.getStateName</methodName>
                     <params>
                       <param>
                         <value><i4>41</i4></value>
                       </param>
                     </params>
                   </methodCall>";
        let call: MethodCall = xml.parse().unwrap();
        assert_eq!(
            MethodCall {
                method_name: "examples.getStateName".to_string(),
                params: vec![Value::Integer(41)],
            },
            call
        );
    }

    #[test]
    fn test_method_call_param_order() {
        let xml = "<methodCall><methodName>method_name_value</methodName><params>\
                   <param><value><string>string_value</string></value></param>\
                   <param><value><double>4.2</double></value></param>\
                   <param><value><boolean>1</boolean></value></param>\
                   </params></methodCall>";
        let call = MethodCall::from_reader(xml.as_bytes()).unwrap();
        assert_eq!("method_name_value", call.method_name);
        assert_eq!(
            vec![Value::String("string_value".into()), Value::Double(4.2), Value::Boolean(true)],
            call.params
        );
    }

    #[test]
    fn test_method_call_without_params() {
        let call: MethodCall = "<methodCall><methodName>system.listMethods</methodName></methodCall>"
            .parse()
            .unwrap();
        assert!(call.params.is_empty());

        let call: MethodCall = "<methodCall><methodName>ping</methodName><params/></methodCall>"
            .parse()
            .unwrap();
        assert_eq!("ping", call.method_name);
        assert!(call.params.is_empty());
    }

    #[test]
    fn test_method_call_name_errors() {
        for xml in [
            "<methodCall><params/></methodCall>",
            "<methodCall><methodName></methodName></methodCall>",
            "<methodCall><methodName>  </methodName></methodCall>",
            "<methodResponse><params/></methodResponse>",
        ] {
            assert!(matches!(xml.parse::<MethodCall>(), Err(Error::Structural(_))), "{}", xml);
        }
    }

    #[test]
    fn test_method_call_bad_param() {
        let xml = "<methodCall><methodName>m</methodName><params>\
                   <param><value><int>abc</int></value></param>\
                   </params></methodCall>";
        assert!(matches!(xml.parse::<MethodCall>(), Err(Error::TypeCoercion { .. })));

        let xml = "<methodCall><methodName>m</methodName><params>\
                   <param><int>1</int></param>\
                   </params></methodCall>";
        assert!(matches!(xml.parse::<MethodCall>(), Err(Error::Structural(_))));
    }

    #[test]
    fn test_success_response() {
        let xml = "<?xml version=\"1.0\" encoding=\"utf-8\"?>
                   <methodResponse>
                   <params>
                    <param>
                     <value>
                      <struct>
                       <member>
                        <name>key1</name>
                        <value>
                         <string>string_value</string>
                        </value>
                       </member>
                       <member>
                        <name>key2</name>
                        <value>
                         <double>4.2</double>
                        </value>
                       </member>
                       <member>
                        <name>key3</name>
                        <value>
                         <boolean>1</boolean>
                        </value>
                       </member>
                      </struct>
                     </value>
                    </param>
                   </params>
                   </methodResponse>";
        let response: MethodResponse = xml.parse().unwrap();
        assert!(!response.is_fault());
        let value = response.into_result().unwrap();
        assert_eq!(Some("string_value"), value["key1"].as_str());
        assert_eq!(Some(4.2), value["key2"].as_f64());
        assert_eq!(Some(true), value["key3"].as_boolean());
    }

    #[test]
    fn test_fault_response() {
        let xml = "<methodResponse><fault><value><struct>\
                   <member><name>faultCode</name><value><int>4</int></value></member>\
                   <member><name>faultString</name><value><string>Too many params.</string></value></member>\
                   </struct></value></fault></methodResponse>";
        let response: MethodResponse = xml.parse().unwrap();
        assert_eq!(
            MethodResponse::Fault(strukt(vec![
                ("faultCode", Value::Integer(4)),
                ("faultString", Value::String("Too many params.".into())),
            ])),
            response
        );

        let fault = response.into_result().unwrap_err();
        assert_eq!(Some(4), fault.code());
        assert_eq!(Some("Too many params."), fault.message());
        assert_eq!("remote fault 4: Too many params.", fault.to_string());
    }

    #[test]
    fn test_fault_with_unusual_shape_passes_through() {
        let xml = "<methodResponse><fault><value><string>boom</string></value></fault></methodResponse>";
        let response: MethodResponse = xml.parse().unwrap();
        assert_eq!(MethodResponse::Fault(Value::String("boom".into())), response);

        let fault = response.into_result().unwrap_err();
        assert_eq!(None, fault.code());
        assert_eq!("remote fault: String(\"boom\")", fault.to_string());
    }

    #[test]
    fn test_response_param_cardinality() {
        let two = "<methodResponse><params>\
                   <param><value><int>1</int></value></param>\
                   <param><value><int>2</int></value></param>\
                   </params></methodResponse>";
        match two.parse::<MethodResponse>() {
            Err(Error::Structural(msg)) => assert!(msg.contains("exactly one param"), "{}", msg),
            other => panic!("unexpected {:?}", other),
        }

        let none = "<methodResponse><params></params></methodResponse>";
        assert!(matches!(none.parse::<MethodResponse>(), Err(Error::Structural(_))));
    }

    #[test]
    fn test_response_structure_errors() {
        for xml in [
            "<methodResponse></methodResponse>",
            "<methodResponse><fault></fault></methodResponse>",
            "<methodResponse><fault><value><int>1</int></value><value><int>2</int></value></fault></methodResponse>",
            "<methodResponse><params><param><value><int>1</int></value></param></params><fault/></methodResponse>",
            "<methodCall><methodName>m</methodName></methodCall>",
        ] {
            assert!(matches!(xml.parse::<MethodResponse>(), Err(Error::Structural(_))), "{}", xml);
        }
    }

    #[test]
    fn test_response_malformed_xml() {
        assert!(matches!(
            "<methodResponse><params>".parse::<MethodResponse>(),
            Err(Error::Tokenizer(_))
        ));
    }

    #[test]
    fn test_response_from_pushed_events() {
        let mut events = crate::EventBuffer::new();
        for tag in ["methodResponse", "params", "param", "value", "nil"] {
            events.start_element(tag, &[]);
        }
        for tag in ["nil", "value", "param", "params", "methodResponse"] {
            events.end_element(tag);
        }
        events.end_document();
        assert_eq!(
            MethodResponse::Success(Value::Nil),
            Deserializer::new(events).method_response().unwrap()
        );
    }

    #[test]
    fn test_independent_decoders() {
        let call = "<methodCall><methodName>a</methodName><params>\
                    <param><value><int>1</int></value></param></params></methodCall>";
        let response = "<methodResponse><params>\
                        <param><value><int>2</int></value></param></params></methodResponse>";
        let mut first = Deserializer::from_str(call);
        let mut second = Deserializer::from_str(response);
        // interleave the two decodes
        first.expect_start("methodCall").unwrap();
        second.expect_start("methodResponse").unwrap();
        first.expect_start("methodName").unwrap();
        assert_eq!("a", first.text("methodName").unwrap());
        second.expect_start("params").unwrap();
        assert_eq!(vec![Value::Integer(2)], second.params().unwrap());
        first.expect_start("params").unwrap();
        assert_eq!(vec![Value::Integer(1)], first.params().unwrap());
    }
}
