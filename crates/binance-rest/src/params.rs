//! Request parameter maps and their canonical query encodings.
//!
//! Two encodings exist and they are not interchangeable:
//! - [`ParameterMap::encode`] keeps insertion order and leaves `@` unescaped.
//!   This is the string REST signatures cover.
//! - [`ParameterMap::encode_sorted`] orders keys lexicographically with plain
//!   form encoding. Only the websocket API signature uses it.

use serde_json::{Map, Value};

/// Ordered parameter mapping. Null values are never transmitted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParameterMap(Map<String, Value>);

impl ParameterMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a parameter. Replacing keeps its position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert a list parameter as its compact JSON array text.
    pub fn with_list<I, T>(self, key: impl Into<String>, values: Option<I>) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        let value = values.map(convert_list_to_json_array);
        self.with(key, value)
    }

    /// Append every entry of `other`, replacing existing keys in place.
    pub fn extend(&mut self, other: ParameterMap) {
        for (key, value) in other.0 {
            self.0.insert(key, value);
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.shift_remove(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Copy of the map without null-valued entries.
    pub fn normalized(&self) -> ParameterMap {
        self.0
            .iter()
            .filter(|(_, v)| !v.is_null())
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Copy of the map with keys in lexicographic (byte) order.
    pub fn sorted(&self) -> ParameterMap {
        let mut entries: Vec<(&String, &Value)> = self.0.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries
            .into_iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Canonical query string in insertion order.
    ///
    /// Null entries are skipped, each value is form-encoded and `@` is then
    /// restored, e.g. `email=a@b.com&note=x+y`.
    pub fn encode(&self) -> String {
        form_encode(self.0.iter()).replace("%40", "@")
    }

    /// Form-encoded query string with keys sorted lexicographically.
    pub fn encode_sorted(&self) -> String {
        form_encode(self.sorted().0.iter())
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for ParameterMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = ParameterMap::new();
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}

impl IntoIterator for ParameterMap {
    type Item = (String, Value);
    type IntoIter = serde_json::map::IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Compact JSON array text (`["BTCUSDT","BNBUSDT"]`) for list-valued parameters.
pub fn convert_list_to_json_array<I, T>(values: I) -> String
where
    I: IntoIterator<Item = T>,
    T: Into<Value>,
{
    Value::Array(values.into_iter().map(Into::into).collect()).to_string()
}

/// Copy of `map` without null, empty-string or zero values.
pub fn purge_map(map: &ParameterMap) -> ParameterMap {
    map.iter()
        .filter(|(_, v)| match v {
            Value::Null => false,
            Value::String(s) => !s.is_empty(),
            Value::Number(n) => n.as_f64() != Some(0.0),
            _ => true,
        })
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}

/// Text form of a single parameter value.
fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        // Arrays and objects go out as compact JSON text.
        other => other.to_string(),
    }
}

fn form_encode<'a>(entries: impl Iterator<Item = (&'a String, &'a Value)>) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, value) in entries {
        if value.is_null() {
            continue;
        }
        serializer.append_pair(key, &render_value(value));
    }
    serializer.finish()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_normalized_drops_exactly_nulls() {
        let map = ParameterMap::new()
            .with("symbol", "BTCUSDT")
            .with("limit", Value::Null)
            .with("fromId", 0)
            .with("note", "")
            .with("startTime", None::<i64>);

        let normalized = map.normalized();
        let keys: Vec<&str> = normalized.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["symbol", "fromId", "note"]);
        assert_eq!(normalized.get("fromId"), Some(&json!(0)));
        assert_eq!(normalized.get("note"), Some(&json!("")));
    }

    #[test]
    fn test_encode_preserves_insertion_order() {
        let map = ParameterMap::new()
            .with("zebra", 1)
            .with("alpha", 2)
            .with("middle", "x");
        assert_eq!(map.encode(), "zebra=1&alpha=2&middle=x");
    }

    #[test]
    fn test_encode_skips_nulls() {
        let map = ParameterMap::new()
            .with("symbol", "BTCUSDT")
            .with("limit", Value::Null);
        assert_eq!(map.encode(), "symbol=BTCUSDT");
        assert_eq!(map.encode(), map.normalized().encode());
    }

    #[test]
    fn test_encode_is_idempotent() {
        let map = ParameterMap::new()
            .with("email", "alice@example.com")
            .with("symbols", json!(["BTCUSDT", "BNBUSDT"]))
            .with("price", 0.1);
        let normalized = map.normalized();
        assert_eq!(normalized.encode(), normalized.encode());
    }

    #[test]
    fn test_encode_keeps_at_and_escapes_reserved() {
        let map = ParameterMap::new().with("value", "a@b c/d:e&f=g+h%i");
        assert_eq!(map.encode(), "value=a@b+c%2Fd%3Ae%26f%3Dg%2Bh%25i");
    }

    #[test]
    fn test_encode_literal_percent_40_is_not_unescaped() {
        let map = ParameterMap::new().with("v", "%40");
        assert_eq!(map.encode(), "v=%2540");
    }

    #[test]
    fn test_encode_lists_as_compact_json() {
        let map = ParameterMap::new().with("symbols", json!(["BTCUSDT", "BNBUSDT"]));
        assert_eq!(
            map.encode(),
            "symbols=%5B%22BTCUSDT%22%2C%22BNBUSDT%22%5D"
        );
    }

    #[test]
    fn test_encode_scalars() {
        let map = ParameterMap::new()
            .with("flag", true)
            .with("qty", 1.5)
            .with("id", -7);
        assert_eq!(map.encode(), "flag=true&qty=1.5&id=-7");
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let mut map = ParameterMap::new().with("timestamp", 1).with("symbol", "X");
        map.insert("timestamp", 2);
        assert_eq!(map.encode(), "timestamp=2&symbol=X");
    }

    #[test]
    fn test_encode_sorted() {
        let map = ParameterMap::new()
            .with("timestamp", 5)
            .with("apiKey", "k")
            .with("symbol", "BTCUSDT")
            .with("email", "a@b");
        assert_eq!(
            map.encode_sorted(),
            "apiKey=k&email=a%40b&symbol=BTCUSDT&timestamp=5"
        );
    }

    #[test]
    fn test_convert_list_to_json_array() {
        assert_eq!(
            convert_list_to_json_array(["BTCUSDT", "BNBUSDT"]),
            r#"["BTCUSDT","BNBUSDT"]"#
        );
        assert_eq!(convert_list_to_json_array(Vec::<String>::new()), "[]");
    }

    #[test]
    fn test_with_list() {
        let map = ParameterMap::new()
            .with_list("symbols", Some(["A", "B"]))
            .with_list("permissions", None::<Vec<&str>>);
        assert_eq!(map.get("symbols"), Some(&json!(r#"["A","B"]"#)));
        assert_eq!(map.get("permissions"), Some(&Value::Null));
    }

    #[test]
    fn test_purge_map() {
        let map = ParameterMap::new()
            .with("a", "")
            .with("b", 0)
            .with("c", Value::Null)
            .with("d", "x")
            .with("e", 0.0)
            .with("f", false);
        let purged = purge_map(&map);
        let keys: Vec<&str> = purged.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["d", "f"]);
    }
}
