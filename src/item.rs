//! List entries for menu, radiolist, and checklist dialogs.

/// One entry in a list-style dialog.
///
/// Callers normally build these through the `From` impls: a bare `&str`
/// becomes a label-only entry, a `(key, description)` pair a keyed entry,
/// and a `(key, description, bool)` triple a keyed entry with an explicit
/// selection state. The forms can be mixed within one call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListItem {
    /// A bare label; the label doubles as the selection key.
    Label(String),
    /// A keyed entry with a description column.
    Pair { key: String, description: String },
    /// A keyed entry with an explicit ON/OFF selection state. Radiolist and
    /// checklist dialogs honor the flag as supplied, ignoring any
    /// `defaults` slice.
    Flagged {
        key: String,
        description: String,
        selected: bool,
    },
}

impl ListItem {
    /// Key/description pair for menu rendering. `prefix` is prepended to
    /// the description of keyed entries; bare labels get an empty
    /// description column.
    pub(crate) fn as_menu_pair(&self, prefix: &str) -> (String, String) {
        match self {
            ListItem::Label(label) => (label.clone(), String::new()),
            ListItem::Pair { key, description }
            | ListItem::Flagged {
                key, description, ..
            } => (key.clone(), format!("{}{}", prefix, description)),
        }
    }

    /// Key/description/state triple for radiolist and checklist rendering.
    /// `fallback` supplies the state for entries without an explicit flag.
    pub(crate) fn as_list_triple(&self, prefix: &str, fallback: bool) -> (String, String, bool) {
        match self {
            ListItem::Label(label) => (label.clone(), String::new(), fallback),
            ListItem::Pair { key, description } => {
                (key.clone(), format!("{}{}", prefix, description), fallback)
            }
            ListItem::Flagged {
                key,
                description,
                selected,
            } => (
                key.clone(),
                format!("{}{}", prefix, description),
                *selected,
            ),
        }
    }
}

impl From<&str> for ListItem {
    fn from(label: &str) -> Self {
        ListItem::Label(label.to_string())
    }
}

impl From<String> for ListItem {
    fn from(label: String) -> Self {
        ListItem::Label(label)
    }
}

impl<K: Into<String>, D: Into<String>> From<(K, D)> for ListItem {
    fn from((key, description): (K, D)) -> Self {
        ListItem::Pair {
            key: key.into(),
            description: description.into(),
        }
    }
}

impl<K: Into<String>, D: Into<String>> From<(K, D, bool)> for ListItem {
    fn from((key, description, selected): (K, D, bool)) -> Self {
        ListItem::Flagged {
            key: key.into(),
            description: description.into(),
            selected,
        }
    }
}

/// Resolve per-item fallback selection states against a caller-supplied
/// defaults slice.
///
/// Follows the whiptail convention: a missing defaults slice, or one whose
/// length does not match the item list, means every implicit entry starts
/// OFF. Entries carrying their own flag are unaffected by the result.
pub(crate) fn resolve_flags(items: &[ListItem], defaults: Option<&[bool]>) -> Vec<bool> {
    match defaults {
        Some(flags) if flags.len() == items.len() => flags.to_vec(),
        _ => vec![false; items.len()],
    }
}
