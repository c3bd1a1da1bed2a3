use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Response format requested from the data endpoint.
pub const JSON_STAT: &str = "json-stat";

/// Table metadata as returned by `GET <base-url>/<table-id>`.
///
/// Only the fields this crate acts on are typed; everything else is kept in
/// `extra` so the document prints back the way the API sent it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Absent when the id does not name a table (e.g. a folder listing).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variables: Option<Vec<Variable>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Whatever `GET <base-url>/<table-id>` answered with.
///
/// Ids that name a folder rather than a table yield a listing (a JSON array)
/// instead of table metadata; those end up in `Other`. A JSON object is always
/// decoded as `Table`, so a malformed one is a decode error.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Metadata {
    Table(TableMetadata),
    Other(Value),
}

impl<'de> Deserialize<'de> for Metadata {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        if value.is_object() {
            serde_json::from_value(value)
                .map(Metadata::Table)
                .map_err(serde::de::Error::custom)
        } else {
            Ok(Metadata::Other(value))
        }
    }
}

impl Metadata {
    /// The table's variables, or `None` when this is not a table.
    pub fn variables(&self) -> Option<&[Variable]> {
        match self {
            Metadata::Table(t) => t.variables.as_deref(),
            Metadata::Other(_) => None,
        }
    }
}

/// One dimension of a table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variable {
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default)]
    pub values: Vec<String>,
    #[serde(rename = "valueTexts", default, skip_serializing_if = "Vec::is_empty")]
    pub value_texts: Vec<String>,
    /// True when the variable may be left out of a query.
    #[serde(default)]
    pub elimination: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub time: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Selection filter. Filters other than the ones this crate builds (e.g.
/// `agg:...` or `vs:...` from a hand-written query) pass through as `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Filter {
    All,
    Item,
    Top,
    Other(String),
}

impl From<String> for Filter {
    fn from(s: String) -> Self {
        match s.as_str() {
            "all" => Filter::All,
            "item" => Filter::Item,
            "top" => Filter::Top,
            _ => Filter::Other(s),
        }
    }
}

impl From<Filter> for String {
    fn from(f: Filter) -> Self {
        match f {
            Filter::All => "all".into(),
            Filter::Item => "item".into(),
            Filter::Top => "top".into(),
            Filter::Other(s) => s,
        }
    }
}

// The `extra` maps below keep keys this crate does not know about, so a
// query read from a file is sent back exactly as written.

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    pub filter: Filter,
    pub values: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Selection {
    /// Wildcard selection: every value of the variable.
    pub fn all() -> Self {
        Self {
            filter: Filter::All,
            values: vec!["*".into()],
            extra: Map::new(),
        }
    }

    pub fn items(values: Vec<String>) -> Self {
        Self {
            filter: Filter::Item,
            values,
            extra: Map::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableSelection {
    pub code: String,
    pub selection: Selection,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseFormat {
    pub format: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for ResponseFormat {
    fn default() -> Self {
        Self {
            format: JSON_STAT.into(),
            extra: Map::new(),
        }
    }
}

/// Body of the data request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Query {
    pub query: Vec<VariableSelection>,
    pub response: ResponseFormat,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A JSON-stat document returned by the data endpoint.
///
/// The payload is kept as-is; the accessors below only read the parts needed
/// for a summary and understand both the 1.x bundle form
/// (`{"dataset": {...}}`) and 2.0 `"class": "dataset"` documents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dataset(pub Value);

impl Dataset {
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// The dataset object itself, unwrapping a 1.x bundle if needed.
    fn body(&self) -> Option<&Map<String, Value>> {
        let obj = self.0.as_object()?;
        match obj.get("dataset").and_then(Value::as_object) {
            Some(inner) => Some(inner),
            None => Some(obj),
        }
    }

    pub fn label(&self) -> Option<&str> {
        self.body()?.get("label")?.as_str()
    }

    /// Dimension ids paired with their sizes, in document order.
    pub fn dimensions(&self) -> Vec<(String, usize)> {
        let Some(body) = self.body() else {
            return Vec::new();
        };
        // 1.x nests id/size under "dimension", 2.0 puts them at the top level.
        let holder = body
            .get("dimension")
            .and_then(Value::as_object)
            .filter(|d| d.contains_key("id"))
            .unwrap_or(body);
        let ids = holder.get("id").and_then(Value::as_array);
        let sizes = holder.get("size").and_then(Value::as_array);
        match (ids, sizes) {
            (Some(ids), Some(sizes)) => ids
                .iter()
                .zip(sizes)
                .filter_map(|(id, size)| {
                    Some((id.as_str()?.to_string(), size.as_u64()? as usize))
                })
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Number of observations. `value` may be an array or a sparse object.
    pub fn value_count(&self) -> usize {
        match self.body().and_then(|b| b.get("value")) {
            Some(Value::Array(a)) => a.len(),
            Some(Value::Object(o)) => o.len(),
            _ => 0,
        }
    }
}
