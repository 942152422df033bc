//! StyleX output model
//!
//! The objects produced here follow the static-object grammar StyleX analyzes:
//! a style object maps output property names to values, a value may be a
//! conditional map whose first key is always `default`, and pseudo-element
//! blocks (`::before`) are nested style objects.
//!
//! Two condition keys are marker constructs the code generator must recognize:
//! [`ConditionKey::Ancestor`] (rendered as `stylex.when.ancestor(...)`) and
//! [`ConditionKey::SiblingBefore`] (rendered as `stylex.when.siblingBefore(...)`).

use indexmap::IndexMap;
use serde::ser::{SerializeMap, SerializeStruct};
use serde::{Serialize, Serializer};
use std::fmt;

use super::source_file::ImportSpec;

/// Ordered `(output property, value)` pairs produced by lowering one CSS declaration
pub type PropertyValues = Vec<(String, StyleValue)>;

// ═══════════════════════════════════════════════════════════════════════════
// Values
// ═══════════════════════════════════════════════════════════════════════════

/// Opaque expression source returned by the value resolver (or synthesized
/// around it), plus the imports the expression needs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ExprValue {
    pub source: String,
    pub imports: Vec<ImportSpec>,
}

impl ExprValue {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            imports: Vec::new(),
        }
    }

    pub fn with_imports(mut self, imports: Vec<ImportSpec>) -> Self {
        self.imports = imports;
        self
    }
}

/// A single style value
#[derive(Debug, Clone, PartialEq)]
pub enum StyleValue {
    /// `null`: property explicitly unset
    Null,
    String(String),
    /// Numeric values stay numbers when the source literal was numeric
    Number(f64),
    Expr(ExprValue),
    Conditions(ConditionMap),
    /// Nested block, used for pseudo-elements
    Object(StyleObject),
}

impl StyleValue {
    pub fn string(value: impl Into<String>) -> Self {
        StyleValue::String(value.into())
    }

    pub fn expr(source: impl Into<String>) -> Self {
        StyleValue::Expr(ExprValue::new(source))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, StyleValue::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            StyleValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_conditions(&self) -> Option<&ConditionMap> {
        match self {
            StyleValue::Conditions(map) => Some(map),
            _ => None,
        }
    }

    /// Imports required by this value, including nested conditional entries
    pub fn imports(&self) -> Vec<ImportSpec> {
        let mut out = Vec::new();
        self.collect_imports(&mut out);
        out
    }

    fn collect_imports(&self, out: &mut Vec<ImportSpec>) {
        match self {
            StyleValue::Expr(expr) => {
                for import in &expr.imports {
                    if !out.contains(import) {
                        out.push(import.clone());
                    }
                }
            }
            StyleValue::Conditions(map) => {
                for value in map.values() {
                    value.collect_imports(out);
                }
            }
            StyleValue::Object(object) => {
                for (_, value) in object.iter() {
                    value.collect_imports(out);
                }
            }
            _ => {}
        }
    }

    /// The value a plain (non-conditional) read would observe
    pub fn default_value(&self) -> StyleValue {
        match self {
            StyleValue::Conditions(map) => map
                .get(&ConditionKey::Default)
                .map(StyleValue::default_value)
                .unwrap_or(StyleValue::Null),
            other => other.clone(),
        }
    }
}

impl Serialize for StyleValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            StyleValue::Null => serializer.serialize_none(),
            StyleValue::String(s) => serializer.serialize_str(s),
            StyleValue::Number(n) => serializer.serialize_f64(*n),
            StyleValue::Expr(expr) => {
                let mut state = serializer.serialize_struct("Expr", 2)?;
                state.serialize_field("expr", &expr.source)?;
                state.serialize_field("imports", &expr.imports)?;
                state.end()
            }
            StyleValue::Conditions(map) => map.serialize(serializer),
            StyleValue::Object(object) => object.serialize(serializer),
        }
    }
}

impl fmt::Display for StyleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StyleValue::Null => write!(f, "null"),
            StyleValue::String(s) => write!(f, "{:?}", s),
            StyleValue::Number(n) => write!(f, "{}", n),
            StyleValue::Expr(expr) => write!(f, "{}", expr.source),
            StyleValue::Conditions(map) => {
                write!(f, "{{")?;
                for (i, (key, value)) in map.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", key, value)?;
                }
                write!(f, "}}")
            }
            StyleValue::Object(object) => write!(f, "{}", object),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Conditions
// ═══════════════════════════════════════════════════════════════════════════

/// Key of a conditional value map
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ConditionKey {
    Default,
    /// `:hover`, `:focus-visible`, `:hover:not(:disabled)`
    Pseudo(String),
    /// Full at-rule prelude, e.g. `@media (max-width: 600px)`
    AtRule(String),
    /// Ancestor pseudo-state marker
    Ancestor(String),
    /// Preceding-sibling marker
    SiblingBefore(String),
}

impl ConditionKey {
    /// Key text as the generator prints it
    pub fn key_text(&self) -> String {
        match self {
            ConditionKey::Default => "default".to_string(),
            ConditionKey::Pseudo(p) => p.clone(),
            ConditionKey::AtRule(a) => a.clone(),
            ConditionKey::Ancestor(p) => format!("stylex.when.ancestor('{}')", p),
            ConditionKey::SiblingBefore(p) => format!("stylex.when.siblingBefore('{}')", p),
        }
    }

    pub fn is_marker(&self) -> bool {
        matches!(
            self,
            ConditionKey::Ancestor(_) | ConditionKey::SiblingBefore(_)
        )
    }
}

impl fmt::Display for ConditionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key_text())
    }
}

/// Conditional value map. `default` is kept as the first entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConditionMap {
    entries: IndexMap<ConditionKey, StyleValue>,
}

impl ConditionMap {
    /// Start a map with an explicit default entry
    pub fn with_default(default: StyleValue) -> Self {
        let mut entries = IndexMap::new();
        entries.insert(ConditionKey::Default, default);
        Self { entries }
    }

    pub fn insert(&mut self, key: ConditionKey, value: StyleValue) {
        if key == ConditionKey::Default {
            self.entries.shift_insert(0, key, value);
        } else {
            self.entries.insert(key, value);
        }
    }

    pub fn get(&self, key: &ConditionKey) -> Option<&StyleValue> {
        self.entries.get(key)
    }

    pub fn default_entry(&self) -> Option<&StyleValue> {
        self.entries.get(&ConditionKey::Default)
    }

    pub fn contains_key(&self, key: &ConditionKey) -> bool {
        self.entries.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ConditionKey, &StyleValue)> {
        self.entries.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &ConditionKey> {
        self.entries.keys()
    }

    pub fn values(&self) -> impl Iterator<Item = &StyleValue> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Non-default entries
    pub fn conditional_entries(&self) -> impl Iterator<Item = (&ConditionKey, &StyleValue)> {
        self.entries
            .iter()
            .filter(|(key, _)| **key != ConditionKey::Default)
    }
}

impl Serialize for ConditionMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(&key.key_text(), value)?;
        }
        map.end()
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Style objects
// ═══════════════════════════════════════════════════════════════════════════

/// One StyleX style object (`stylex.create({ key: <StyleObject> })`)
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct StyleObject {
    entries: IndexMap<String, StyleValue>,
}

impl StyleObject {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs(pairs: PropertyValues) -> Self {
        let mut object = Self::new();
        for (prop, value) in pairs {
            object.insert(prop, value);
        }
        object
    }

    /// Insert or replace; a replaced property keeps its original position
    pub fn insert(&mut self, property: impl Into<String>, value: StyleValue) {
        self.entries.insert(property.into(), value);
    }

    pub fn get(&self, property: &str) -> Option<&StyleValue> {
        self.entries.get(property)
    }

    pub fn get_mut(&mut self, property: &str) -> Option<&mut StyleValue> {
        self.entries.get_mut(property)
    }

    pub fn remove(&mut self, property: &str) -> Option<StyleValue> {
        self.entries.shift_remove(property)
    }

    pub fn contains(&self, property: &str) -> bool {
        self.entries.contains_key(property)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &StyleValue)> {
        self.entries.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.entries.keys()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Overlay `other` on top of `self` (later wins, like a CSS cascade of equal specificity)
    pub fn merge(&mut self, other: &StyleObject) {
        for (prop, value) in other.iter() {
            self.insert(prop.clone(), value.clone());
        }
    }

    /// All imports referenced by expression values in this object
    pub fn imports(&self) -> Vec<ImportSpec> {
        let mut out: Vec<ImportSpec> = Vec::new();
        for value in self.entries.values() {
            for import in value.imports() {
                if !out.contains(&import) {
                    out.push(import);
                }
            }
        }
        out
    }
}

impl fmt::Display for StyleObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (key, value)) in self.entries.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", key, value)?;
        }
        write!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_always_first() {
        let mut map = ConditionMap::default();
        map.insert(ConditionKey::Pseudo(":hover".into()), StyleValue::string("red"));
        map.insert(ConditionKey::Default, StyleValue::Null);
        let keys: Vec<String> = map.keys().map(|k| k.key_text()).collect();
        assert_eq!(keys, vec!["default", ":hover"]);
    }

    #[test]
    fn test_serialize_conditions_and_markers() {
        let mut map = ConditionMap::with_default(StyleValue::Null);
        map.insert(
            ConditionKey::Ancestor(":hover".into()),
            StyleValue::string("blue"),
        );
        let mut object = StyleObject::new();
        object.insert("color", StyleValue::Conditions(map));
        object.insert("opacity", StyleValue::Number(0.5));

        let json = serde_json::to_value(&object).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "color": {"default": null, "stylex.when.ancestor(':hover')": "blue"},
                "opacity": 0.5
            })
        );
    }

    #[test]
    fn test_merge_keeps_first_position() {
        let mut a = StyleObject::from_pairs(vec![
            ("color".into(), StyleValue::string("red")),
            ("margin".into(), StyleValue::Number(0.0)),
        ]);
        let b = StyleObject::from_pairs(vec![("color".into(), StyleValue::string("blue"))]);
        a.merge(&b);
        let keys: Vec<&String> = a.keys().collect();
        assert_eq!(keys, vec!["color", "margin"]);
        assert_eq!(a.get("color"), Some(&StyleValue::string("blue")));
    }

    #[test]
    fn test_imports_are_collected_once() {
        let import = ImportSpec::new("vars", "./tokens.stylex");
        let expr = StyleValue::Expr(ExprValue::new("vars.primary").with_imports(vec![import.clone()]));
        let mut map = ConditionMap::with_default(expr.clone());
        map.insert(ConditionKey::Pseudo(":hover".into()), expr);
        let value = StyleValue::Conditions(map);
        assert_eq!(value.imports(), vec![import]);
    }
}
