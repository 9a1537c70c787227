// crates/form-resolver-core/src/runtime/routes.rs
// ============================================================================
// Module: In-Memory Route Table
// Description: Named URI patterns implementing the route resolver contract.
// Purpose: Resolve route names to paths without a host web framework.
// Dependencies: crate::interfaces, serde, url
// ============================================================================

//! ## Overview
//! A [`RouteTable`] maps route names to URI patterns such as
//! `/administration/users/{user}/edit`. Placeholders are filled from the
//! supplied parameters, each encoded as one path segment; `{name?}`
//! placeholders are optional. Parameters that no placeholder consumes are
//! appended as a query string in key order.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;
use url::form_urlencoded;

use crate::core::Attributes;
use crate::interfaces::RouteError;
use crate::interfaces::RouteResolver;

// ============================================================================
// SECTION: Route Table
// ============================================================================

/// Named route patterns with an optional base URL for absolute resolution.
///
/// # Invariants
/// - Resolved paths always start with `/`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteTable {
    /// Scheme and host prepended to absolute URLs.
    #[serde(default)]
    pub base_url: String,
    /// URI patterns keyed by route name.
    #[serde(default)]
    pub routes: BTreeMap<String, String>,
}

impl RouteTable {
    /// Creates an empty table with the given base URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            routes: BTreeMap::new(),
        }
    }

    /// Registers a route and returns the table.
    #[must_use]
    pub fn with_route(mut self, name: impl Into<String>, uri: impl Into<String>) -> Self {
        self.routes.insert(name.into(), uri.into());
        self
    }
}

impl RouteResolver for RouteTable {
    fn resolve(
        &self,
        route: &str,
        params: &Attributes,
        relative: bool,
    ) -> Result<String, RouteError> {
        let pattern = self.routes.get(route).ok_or_else(|| RouteError::NotFound(route.to_string()))?;
        let mut remaining: BTreeMap<&str, &Value> =
            params.iter().map(|(key, value)| (key.as_str(), value)).collect();
        let mut path = String::with_capacity(pattern.len());
        let mut rest = pattern.as_str();

        while let Some(open) = rest.find('{') {
            path.push_str(&rest[.. open]);
            let Some(close) = rest[open ..].find('}') else {
                path.push_str(&rest[open ..]);
                rest = "";
                break;
            };
            let placeholder = &rest[open + 1 .. open + close];
            let (name, optional) = placeholder
                .strip_suffix('?')
                .map_or((placeholder, false), |name| (name, true));
            match remaining.remove(name).and_then(|value| render_param(route, name, value).transpose()) {
                Some(rendered) => path.push_str(&encode_segment(&rendered?)),
                None if optional => {}
                None => {
                    return Err(RouteError::MissingParameter {
                        route: route.to_string(),
                        parameter: name.to_string(),
                    });
                }
            }
            rest = &rest[open + close + 1 ..];
        }
        path.push_str(rest);

        let mut path = normalize_path(&path);
        let mut query = form_urlencoded::Serializer::new(String::new());
        let mut has_query = false;
        for (key, value) in remaining {
            if let Some(rendered) = render_param(route, key, value)? {
                query.append_pair(key, &rendered);
                has_query = true;
            }
        }
        if has_query {
            path.push('?');
            path.push_str(&query.finish());
        }

        if relative {
            Ok(path)
        } else {
            Ok(format!("{}{path}", self.base_url.trim_end_matches('/')))
        }
    }
}

/// Renders a scalar parameter; `null` counts as absent.
fn render_param(route: &str, name: &str, value: &Value) -> Result<Option<String>, RouteError> {
    match value {
        Value::Null => Ok(None),
        Value::String(text) => Ok(Some(text.clone())),
        Value::Number(number) => Ok(Some(number.to_string())),
        Value::Bool(flag) => Ok(Some(flag.to_string())),
        Value::Array(_) | Value::Object(_) => Err(RouteError::InvalidParameter {
            route: route.to_string(),
            parameter: name.to_string(),
        }),
    }
}

/// Percent-encodes a parameter as a single path segment.
fn encode_segment(value: &str) -> String {
    form_urlencoded::byte_serialize(value.as_bytes()).collect::<String>().replace('+', "%20")
}

/// Collapses empty segments left by omitted optional parameters.
fn normalize_path(path: &str) -> String {
    let segments: Vec<&str> = path.split('/').filter(|segment| !segment.is_empty()).collect();
    format!("/{}", segments.join("/"))
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn params(value: Value) -> Attributes {
        match value {
            Value::Object(map) => map,
            _ => Attributes::new(),
        }
    }

    fn table() -> RouteTable {
        RouteTable::new("https://app.test/")
            .with_route("users.update", "/administration/users/{user}")
            .with_route("users.index", "administration/users/{page?}")
    }

    #[test]
    fn fills_placeholders_and_appends_query() -> Result<(), RouteError> {
        let table = table();
        let path = table.resolve("users.update", &params(json!({"user": 7, "tab": "roles"})), true)?;
        assert_eq!(path, "/administration/users/7?tab=roles");
        let url = table.resolve("users.update", &params(json!({"user": "7"})), false)?;
        assert_eq!(url, "https://app.test/administration/users/7");
        Ok(())
    }

    #[test]
    fn placeholder_values_are_encoded_as_single_segments() -> Result<(), RouteError> {
        let table = table();
        let path = table.resolve("users.update", &params(json!({"user": "a/b c+d?"})), true)?;
        assert_eq!(path, "/administration/users/a%2Fb%20c%2Bd%3F");
        Ok(())
    }

    #[test]
    fn optional_placeholders_may_be_omitted() -> Result<(), RouteError> {
        assert_eq!(table().resolve("users.index", &Attributes::new(), true)?, "/administration/users");
        Ok(())
    }

    #[test]
    fn reports_unknown_routes_and_missing_parameters() {
        let table = table();
        assert_eq!(
            table.resolve("users.show", &Attributes::new(), true),
            Err(RouteError::NotFound("users.show".to_string()))
        );
        assert!(matches!(
            table.resolve("users.update", &Attributes::new(), true),
            Err(RouteError::MissingParameter { ref parameter, .. }) if parameter == "user"
        ));
        assert!(matches!(
            table.resolve("users.update", &params(json!({"user": [1]})), true),
            Err(RouteError::InvalidParameter { .. })
        ));
    }
}
