use crate::icons::Icon;

/// The category-creation dialog.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryDialog {
    #[default]
    Closed,
    Open {
        name: String,
        icon: Option<Icon>,
    },
}

impl CategoryDialog {
    pub fn open() -> Self {
        CategoryDialog::Open {
            name: String::new(),
            icon: None,
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self, CategoryDialog::Open { .. })
    }

    pub fn name(&self) -> &str {
        match self {
            CategoryDialog::Open { name, .. } => name,
            CategoryDialog::Closed => "",
        }
    }

    pub fn icon(&self) -> Option<Icon> {
        match self {
            CategoryDialog::Open { icon, .. } => *icon,
            CategoryDialog::Closed => None,
        }
    }

    pub fn set_name(&mut self, text: &str) {
        if let CategoryDialog::Open { name, .. } = self {
            *name = text.to_string();
        }
    }

    /// Choosing an icon replaces any earlier choice.
    pub fn choose(&mut self, choice: Icon) {
        if let CategoryDialog::Open { icon, .. } = self {
            *icon = Some(choice);
        }
    }

    /// The trimmed name and icon, when both are present.
    pub fn submission(&self) -> Option<(String, Icon)> {
        match self {
            CategoryDialog::Open {
                name,
                icon: Some(icon),
            } if !name.trim().is_empty() => Some((name.trim().to_string(), *icon)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closed_dialog_ignores_edits() {
        let mut dialog = CategoryDialog::Closed;
        dialog.set_name("Leak");
        dialog.choose(Icon::Crisis);
        assert_eq!(dialog, CategoryDialog::Closed);
    }

    #[test]
    fn icon_choice_is_exclusive() {
        let mut dialog = CategoryDialog::open();
        dialog.choose(Icon::Box);
        dialog.choose(Icon::Flask);
        assert_eq!(dialog.icon(), Some(Icon::Flask));
    }

    #[test]
    fn submission_requires_name_and_icon() {
        let mut dialog = CategoryDialog::open();
        dialog.set_name("   ");
        dialog.choose(Icon::Box);
        assert_eq!(dialog.submission(), None);

        dialog.set_name("  Leak ");
        assert_eq!(dialog.submission(), Some(("Leak".to_string(), Icon::Box)));

        let mut no_icon = CategoryDialog::open();
        no_icon.set_name("Leak");
        assert_eq!(no_icon.submission(), None);
    }
}
