//! Pin records and the ordered pin collection.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

/// Description given to every freshly placed pin.
pub const DEFAULT_DESCRIPTION: &str = "Novo Pino";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PinId(pub u64);

impl fmt::Display for PinId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl std::str::FromStr for PinId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(PinId)
    }
}

/// A point in the map's logical coordinate space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pin {
    pub id: PinId,
    pub position: LatLng,
    pub description: String,
    pub category: String,
}

/// Ordered pin sequence. Order carries no meaning beyond display.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PinSet {
    pins: Vec<Pin>,
}

impl PinSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.pins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pins.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Pin> {
        self.pins.iter()
    }

    pub fn get(&self, id: PinId) -> Option<&Pin> {
        self.pins.iter().find(|p| p.id == id)
    }

    pub fn get_mut(&mut self, id: PinId) -> Option<&mut Pin> {
        self.pins.iter_mut().find(|p| p.id == id)
    }

    pub fn contains(&self, id: PinId) -> bool {
        self.get(id).is_some()
    }

    /// Id for a pin created now: the current time in milliseconds, bumped past
    /// every existing id so it can never collide.
    pub fn next_id(&self) -> PinId {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);
        let floor = self.pins.iter().map(|p| p.id.0.saturating_add(1)).max().unwrap_or(0);
        PinId(now.max(floor))
    }

    /// Appends a new pin with the default description and returns its id.
    pub fn create(&mut self, position: LatLng, category: &str) -> PinId {
        let id = self.next_id();
        self.pins.push(Pin {
            id,
            position,
            description: DEFAULT_DESCRIPTION.to_string(),
            category: category.to_string(),
        });
        id
    }

    pub fn remove(&mut self, id: PinId) -> Option<Pin> {
        let index = self.pins.iter().position(|p| p.id == id)?;
        Some(self.pins.remove(index))
    }

    /// Drops every pin in `category`, returning how many were removed.
    pub fn remove_category(&mut self, category: &str) -> usize {
        let before = self.pins.len();
        self.pins.retain(|p| p.category != category);
        before - self.pins.len()
    }

    /// Points every pin in `from` at `to`, returning how many changed.
    pub fn recategorize(&mut self, from: &str, to: &str) -> usize {
        let mut changed = 0;
        for pin in self.pins.iter_mut().filter(|p| p.category == from) {
            pin.category = to.to_string();
            changed += 1;
        }
        changed
    }

    pub fn clear(&mut self) {
        self.pins.clear();
    }
}

impl<'a> IntoIterator for &'a PinSet {
    type Item = &'a Pin;
    type IntoIter = std::slice::Iter<'a, Pin>;

    fn into_iter(self) -> Self::IntoIter {
        self.pins.iter()
    }
}

impl FromIterator<Pin> for PinSet {
    fn from_iter<I: IntoIterator<Item = Pin>>(iter: I) -> Self {
        Self {
            pins: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn created_ids_are_unique_and_increasing() {
        let mut pins = PinSet::new();
        let a = pins.create(LatLng::new(0.0, 0.0), "Box");
        let b = pins.create(LatLng::new(1.0, 1.0), "Box");
        let c = pins.create(LatLng::new(2.0, 2.0), "Box");
        assert!(a < b && b < c);
    }

    #[test]
    fn next_id_skips_ids_from_the_future() {
        let pins: PinSet = [Pin {
            id: PinId(u64::MAX - 10),
            position: LatLng::default(),
            description: String::new(),
            category: "Box".into(),
        }]
        .into_iter()
        .collect();
        assert_eq!(pins.next_id(), PinId(u64::MAX - 9));
    }

    #[test]
    fn remove_category_only_touches_matching_pins() {
        let mut pins = PinSet::new();
        pins.create(LatLng::new(0.0, 0.0), "Box");
        let keep = pins.create(LatLng::new(1.0, 0.0), "Flask");
        pins.create(LatLng::new(2.0, 0.0), "Box");

        assert_eq!(pins.remove_category("Box"), 2);
        assert_eq!(pins.len(), 1);
        assert!(pins.contains(keep));
    }

    #[test]
    fn persisted_shape_matches_plain_records() {
        let pin = Pin {
            id: PinId(1700000000000),
            position: LatLng::new(10.0, 20.0),
            description: DEFAULT_DESCRIPTION.into(),
            category: "Box".into(),
        };
        let json = serde_json::to_value(&pin).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": 1700000000000u64,
                "position": { "lat": 10.0, "lng": 20.0 },
                "description": "Novo Pino",
                "category": "Box"
            })
        );
    }
}
