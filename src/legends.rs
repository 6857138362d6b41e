use crate::icons::Icon;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A named, icon-tagged pin category ("legend").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub name: String,
    pub icon: Icon,
}

/// Category name -> icon mapping.
///
/// Names are unique and case-sensitive. Insertion order is preserved so the
/// legend panel lists categories in the order they were created; it is
/// persisted as a plain JSON object.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CategoryMap {
    entries: Vec<Category>,
}

impl CategoryMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Category> {
        self.entries.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|c| c.name.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.icon(name).is_some()
    }

    /// Icon for a category, or `None` for names not in the mapping.
    pub fn icon(&self, name: &str) -> Option<Icon> {
        self.entries.iter().find(|c| c.name == name).map(|c| c.icon)
    }

    /// Inserts a category, overwriting the icon of an existing name in place.
    /// Returns the previous icon if the name already existed.
    pub fn insert(&mut self, name: impl Into<String>, icon: Icon) -> Option<Icon> {
        let name = name.into();
        match self.entries.iter_mut().find(|c| c.name == name) {
            Some(existing) => Some(std::mem::replace(&mut existing.icon, icon)),
            None => {
                self.entries.push(Category { name, icon });
                None
            }
        }
    }

    pub fn remove(&mut self, name: &str) -> Option<Icon> {
        let index = self.entries.iter().position(|c| c.name == name)?;
        Some(self.entries.remove(index).icon)
    }

    /// Moves the icon of `from` under `to`. An existing `to` is overwritten.
    /// The renamed entry keeps the position of `from`.
    pub fn rename(&mut self, from: &str, to: &str) -> bool {
        if from == to {
            return self.contains(from);
        }
        if !self.contains(from) {
            return false;
        }
        self.entries.retain(|c| c.name != to);
        if let Some(entry) = self.entries.iter_mut().find(|c| c.name == from) {
            entry.name = to.to_string();
        }
        true
    }
}

impl Serialize for CategoryMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for category in &self.entries {
            map.serialize_entry(&category.name, &category.icon)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for CategoryMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct CategoryMapVisitor;

        impl<'de> Visitor<'de> for CategoryMapVisitor {
            type Value = CategoryMap;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of category name to icon")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut categories = CategoryMap::new();
                while let Some((name, icon)) = access.next_entry::<String, Icon>()? {
                    categories.insert(name, icon);
                }
                Ok(categories)
            }
        }

        deserializer.deserialize_map(CategoryMapVisitor)
    }
}

impl FromIterator<(String, Icon)> for CategoryMap {
    fn from_iter<I: IntoIterator<Item = (String, Icon)>>(iter: I) -> Self {
        let mut categories = CategoryMap::new();
        for (name, icon) in iter {
            categories.insert(name, icon);
        }
        categories
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_overwrites_in_place() {
        let mut map = CategoryMap::new();
        map.insert("Leak", Icon::Crisis);
        map.insert("Stock", Icon::Box);
        assert_eq!(map.insert("Leak", Icon::Warning), Some(Icon::Crisis));
        assert_eq!(map.names().collect::<Vec<_>>(), ["Leak", "Stock"]);
        assert_eq!(map.icon("Leak"), Some(Icon::Warning));
    }

    #[test]
    fn names_are_case_sensitive() {
        let mut map = CategoryMap::new();
        map.insert("box", Icon::Box);
        map.insert("Box", Icon::OpenBox);
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn rename_keeps_icon_and_position() {
        let mut map = CategoryMap::new();
        map.insert("A", Icon::Flash);
        map.insert("B", Icon::Flask);
        assert!(map.rename("A", "C"));
        assert_eq!(map.names().collect::<Vec<_>>(), ["C", "B"]);
        assert_eq!(map.icon("C"), Some(Icon::Flash));
        assert!(!map.contains("A"));
    }

    #[test]
    fn rename_onto_existing_name_overwrites_it() {
        let mut map = CategoryMap::new();
        map.insert("A", Icon::Flash);
        map.insert("B", Icon::Flask);
        assert!(map.rename("B", "A"));
        assert_eq!(map.len(), 1);
        assert_eq!(map.icon("A"), Some(Icon::Flask));
    }

    #[test]
    fn rename_of_missing_name_is_rejected() {
        let mut map = CategoryMap::new();
        assert!(!map.rename("ghost", "A"));
        assert!(map.is_empty());
    }

    #[test]
    fn json_object_preserves_order() {
        let map: CategoryMap =
            serde_json::from_str(r#"{"Zeta": "Box", "Alpha": "warning.png", "Mid": "icon3"}"#).unwrap();
        assert_eq!(map.names().collect::<Vec<_>>(), ["Zeta", "Alpha", "Mid"]);
        assert_eq!(map.icon("Alpha"), Some(Icon::Warning));
        assert_eq!(map.icon("Mid"), Some(Icon::Crisis));
        assert_eq!(
            serde_json::to_string(&map).unwrap(),
            r#"{"Zeta":"Box","Alpha":"Warning","Mid":"Crisis"}"#
        );
    }
}
