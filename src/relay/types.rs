/// Inbound and outbound relay types
///
/// An inbound webhook is an arbitrary JSON object plus its headers and query
/// string. It becomes an outbound request by moving the routing identifier out
/// of the query string and folding the headers into the body.

use crate::relay::error::RelayError;
use axum::http::{header, HeaderMap};
use serde_json::Value;
use std::collections::BTreeMap;

/// Query parameter selecting the destination script
pub const ROUTING_PARAM: &str = "script_id";

/// Body key the inbound header set is stored under
pub const FORWARDER_HEADER_KEY: &str = "forwarder_header";

/// Insertion-ordered JSON object (`preserve_order` is enabled on serde_json)
pub type JsonObject = serde_json::Map<String, Value>;

/// Inbound headers keyed by canonical name, every value kept in arrival order
pub type ForwardedHeaders = BTreeMap<String, Vec<String>>;

/// Multi-valued query string, keys kept sorted so encoding is stable
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams(BTreeMap<String, Vec<String>>);

impl QueryParams {
    /// Parse a raw (still percent-encoded) query string
    ///
    /// A pair with an empty key (`=x`) is kept under `""`.
    pub fn parse(raw: &str) -> Self {
        let mut params: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for (key, value) in url::form_urlencoded::parse(raw.as_bytes()) {
            params.entry(key.into_owned()).or_default().push(value.into_owned());
        }
        Self(params)
    }

    /// First value for `key`
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(|values| values.first()).map(String::as_str)
    }

    /// Remove every value for `key`, returning the first one
    pub fn take(&mut self, key: &str) -> Option<String> {
        self.0
            .remove(key)
            .and_then(|values| values.into_iter().next())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Form-encode the parameters, sorted by key
    pub fn encode(&self) -> String {
        let mut serializer = url::form_urlencoded::Serializer::new(String::new());
        for (key, values) in &self.0 {
            for value in values {
                serializer.append_pair(key, value);
            }
        }
        serializer.finish()
    }
}

/// A parsed inbound webhook
#[derive(Debug, Clone)]
pub struct InboundRequest {
    pub body: JsonObject,
    pub headers: ForwardedHeaders,
    pub query: QueryParams,
}

impl InboundRequest {
    /// Build an inbound request from the raw pieces axum hands the handler
    pub fn from_parts(
        body: &[u8],
        headers: &HeaderMap,
        raw_query: Option<&str>,
    ) -> Result<Self, RelayError> {
        Ok(Self {
            body: parse_body(body)?,
            headers: capture_headers(headers),
            query: raw_query.map(QueryParams::parse).unwrap_or_default(),
        })
    }

    /// Routing identifier as it will be used, empty when absent
    pub fn script_id(&self) -> &str {
        self.query.get(ROUTING_PARAM).unwrap_or_default()
    }

    /// Reshape into the request sent to `<upstream_base_url>/<script_id>/exec`
    pub fn into_outbound(self, upstream_base_url: &str) -> OutboundRequest {
        let Self {
            mut body,
            headers,
            mut query,
        } = self;

        let script_id = query.take(ROUTING_PARAM).unwrap_or_default();
        body.insert(FORWARDER_HEADER_KEY.to_string(), headers_to_value(headers));

        OutboundRequest {
            url: destination_url(upstream_base_url, &script_id, &query),
            script_id,
            body,
        }
    }
}

/// The request POSTed to the destination script
#[derive(Debug, Clone, PartialEq)]
pub struct OutboundRequest {
    pub script_id: String,
    pub url: String,
    pub body: JsonObject,
}

/// Parse the inbound body, which must be a JSON object
pub fn parse_body(raw: &[u8]) -> Result<JsonObject, RelayError> {
    match serde_json::from_slice::<Value>(raw).map_err(RelayError::InvalidBody)? {
        Value::Object(map) => Ok(map),
        other => Err(RelayError::NotAnObject(json_kind(&other))),
    }
}

/// Collect inbound headers under their canonical names
///
/// `Host` is left out; it describes this hop, not the caller.
pub fn capture_headers(headers: &HeaderMap) -> ForwardedHeaders {
    let mut captured = ForwardedHeaders::new();
    for (name, value) in headers {
        if name == header::HOST {
            continue;
        }
        captured
            .entry(canonical_header_key(name.as_str()))
            .or_default()
            .push(String::from_utf8_lossy(value.as_bytes()).into_owned());
    }
    captured
}

/// Canonical MIME form of a header name: `x-request-id` -> `X-Request-Id`
pub fn canonical_header_key(name: &str) -> String {
    let mut upper = true;
    name.chars()
        .map(|c| {
            let out = if upper {
                c.to_ascii_uppercase()
            } else {
                c.to_ascii_lowercase()
            };
            upper = c == '-';
            out
        })
        .collect()
}

/// `<base>/<script_id>/exec?<encoded params>&`
pub fn destination_url(upstream_base_url: &str, script_id: &str, query: &QueryParams) -> String {
    format!("{}/{}/exec?{}&", upstream_base_url, script_id, query.encode())
}

fn headers_to_value(headers: ForwardedHeaders) -> Value {
    Value::Object(
        headers
            .into_iter()
            .map(|(name, values)| {
                (name, Value::Array(values.into_iter().map(Value::String).collect()))
            })
            .collect(),
    )
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
