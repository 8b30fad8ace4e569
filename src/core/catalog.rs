//! In-memory catalog tree: categories → subcategories → items.
//!
//! The catalog is built once from the data provider's response and never
//! mutated afterwards.  Everything that moves (selection, scroll offsets,
//! anchors) lives elsewhere and refers back into the catalog by [`Id`].

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

// ───────────────────────────────────────── identifiers ───────

/// Catalog identifier.
///
/// Providers send either strings or integers; both end up as the same
/// string-backed id so `7` and `"7"` compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Id(String);

impl Id {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Id {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl<'de> Deserialize<'de> for Id {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Str(String),
            Int(i64),
            Uint(u64),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Str(s) => Id(s),
            Raw::Int(n) => Id(n.to_string()),
            Raw::Uint(n) => Id(n.to_string()),
        })
    }
}

/// Explicit `null` reads the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// ───────────────────────────────────────── entities ──────────

/// A single catalog entry shown as a card.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Item {
    pub id: Id,
    #[serde(default, alias = "name", deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: Option<serde_json::Value>,
    #[serde(default)]
    pub image: Option<String>,
    /// Everything else the provider sent, handed to the detail view as-is.
    #[serde(flatten)]
    pub payload: serde_json::Map<String, serde_json::Value>,
}

impl Item {
    /// Price rendered for display (`"120"`, `"12.50"`, `"on request"`).
    pub fn price_label(&self) -> Option<String> {
        match self.price.as_ref()? {
            serde_json::Value::Null => None,
            serde_json::Value::String(s) if s.is_empty() => None,
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Subcategory {
    pub id: Id,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub items: Vec<Item>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Category {
    pub id: Id,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub subcategories: Vec<Subcategory>,
    /// Direct children, not under any subcategory.
    #[serde(default, deserialize_with = "null_as_default")]
    pub items: Vec<Item>,
}

impl Category {
    pub fn first_subcategory(&self) -> Option<&Subcategory> {
        self.subcategories.first()
    }
}

// ───────────────────────────────────────── catalog ───────────

/// The whole catalog in declared order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    categories: Vec<Category>,
}

impl Catalog {
    pub const EMPTY: Catalog = Catalog {
        categories: Vec::new(),
    };

    pub fn new(categories: Vec<Category>) -> Self {
        Self { categories }
    }

    /// Decode a provider response.  Accepts `{"categories": [...]}` as well
    /// as a bare array of categories.
    pub fn from_json(body: &str) -> Result<Self, serde_json::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Response {
            Wrapped { categories: Vec<Category> },
            Bare(Vec<Category>),
        }

        let categories = match serde_json::from_str::<Response>(body)? {
            Response::Wrapped { categories } | Response::Bare(categories) => categories,
        };
        Ok(Self::new(categories))
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn category(&self, id: &Id) -> Option<&Category> {
        self.categories.iter().find(|c| &c.id == id)
    }

    pub fn category_index(&self, id: &Id) -> Option<usize> {
        self.categories.iter().position(|c| &c.id == id)
    }

    /// Category owning the subcategory `id`.
    pub fn parent_of(&self, id: &Id) -> Option<&Category> {
        self.categories
            .iter()
            .find(|c| c.subcategories.iter().any(|s| &s.id == id))
    }

    /// All subcategories across all categories, in document order.
    pub fn subcategories(&self) -> impl Iterator<Item = &Subcategory> {
        self.categories.iter().flat_map(|c| c.subcategories.iter())
    }

    /// Look up an item anywhere in the tree.
    pub fn item(&self, id: &Id) -> Option<&Item> {
        self.categories.iter().find_map(|c| {
            c.items.iter().find(|i| &i.id == id).or_else(|| {
                c.subcategories
                    .iter()
                    .find_map(|s| s.items.iter().find(|i| &i.id == id))
            })
        })
    }
}
