//! The closed set of legend icons.
//!
//! Every category references exactly one of these ten icons. The set is not
//! user-extensible: the category dialog offers exactly [`Icon::ALL`].

use crate::error::UnknownIcon;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Icon {
    Box,
    Brickwall,
    Crisis,
    EcoFriendly,
    Flash,
    Flask,
    Mechanic,
    OpenBox,
    Project,
    Warning,
}

impl Icon {
    pub const ALL: [Icon; 10] = [
        Icon::Box,
        Icon::Brickwall,
        Icon::Crisis,
        Icon::EcoFriendly,
        Icon::Flash,
        Icon::Flask,
        Icon::Mechanic,
        Icon::OpenBox,
        Icon::Project,
        Icon::Warning,
    ];

    /// Name shown in the dialog and written to storage.
    pub fn name(self) -> &'static str {
        match self {
            Icon::Box => "Box",
            Icon::Brickwall => "Brickwall",
            Icon::Crisis => "Crisis",
            Icon::EcoFriendly => "Eco-friendly",
            Icon::Flash => "Flash",
            Icon::Flask => "Flask",
            Icon::Mechanic => "Mechanic",
            Icon::OpenBox => "Open Box",
            Icon::Project => "Project",
            Icon::Warning => "Warning",
        }
    }

    /// File name of the bundled image inside the icon directory.
    pub fn asset_file(self) -> &'static str {
        match self {
            Icon::Box => "box.png",
            Icon::Brickwall => "brickwall.png",
            Icon::Crisis => "crisis.png",
            Icon::EcoFriendly => "eco-friendly.png",
            Icon::Flash => "flash.png",
            Icon::Flask => "flask.png",
            Icon::Mechanic => "mechanic.png",
            Icon::OpenBox => "open-box.png",
            Icon::Project => "project.png",
            Icon::Warning => "warning.png",
        }
    }

    /// Color used to draw a placeholder when the asset file is missing.
    pub fn fallback_color(self) -> &'static str {
        match self {
            Icon::Box => "#b5651d",
            Icon::Brickwall => "#a52a2a",
            Icon::Crisis => "#e53935",
            Icon::EcoFriendly => "#43a047",
            Icon::Flash => "#fdd835",
            Icon::Flask => "#8e24aa",
            Icon::Mechanic => "#546e7a",
            Icon::OpenBox => "#d7a86e",
            Icon::Project => "#1e88e5",
            Icon::Warning => "#fb8c00",
        }
    }

    /// Positional tag (`icon1` .. `icon10`), matching the order of [`Icon::ALL`].
    pub fn tag(self) -> String {
        let index = Icon::ALL.iter().position(|i| *i == self).unwrap_or(0);
        format!("icon{}", index + 1)
    }
}

impl fmt::Display for Icon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Icon {
    type Err = UnknownIcon;

    /// Accepts the display name, the asset file name (optionally with a
    /// directory prefix) or the positional tag.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let file = s.rsplit('/').next().unwrap_or(s);
        Icon::ALL
            .into_iter()
            .find(|icon| icon.name() == s || icon.asset_file() == file || icon.tag() == s)
            .ok_or_else(|| UnknownIcon(s.to_string()))
    }
}

impl Serialize for Icon {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for Icon {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exactly_ten_distinct_icons() {
        let mut names: Vec<_> = Icon::ALL.iter().map(|i| i.name()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), 10);
    }

    #[test]
    fn parses_every_spelling() {
        assert_eq!("Open Box".parse::<Icon>().unwrap(), Icon::OpenBox);
        assert_eq!("/src/assets/open-box.png".parse::<Icon>().unwrap(), Icon::OpenBox);
        assert_eq!("icon1".parse::<Icon>().unwrap(), Icon::Box);
        assert_eq!("icon10".parse::<Icon>().unwrap(), Icon::Warning);
        assert_eq!(
            "Teapot".parse::<Icon>(),
            Err(UnknownIcon("Teapot".to_string()))
        );
    }

    #[test]
    fn unknown_icon_names_the_input() {
        let err = " Teapot ".parse::<Icon>().unwrap_err();
        assert_eq!(err.to_string(), "unknown icon 'Teapot'");
    }

    #[test]
    fn serializes_as_display_name() {
        let json = serde_json::to_string(&Icon::EcoFriendly).unwrap();
        assert_eq!(json, "\"Eco-friendly\"");
        let back: Icon = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Icon::EcoFriendly);
    }
}
