//! Status badges and the row actions derived from a record's status.

/// Visual tone of a status badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeTone {
    Success,
    Info,
    Warning,
    Danger,
    Muted,
    /// Used for status strings outside the entity's enumeration.
    Neutral,
}

impl BadgeTone {
    /// Single-glyph marker used by the text renderer.
    pub fn marker(&self) -> &'static str {
        match self {
            BadgeTone::Success => "●",
            BadgeTone::Info => "◉",
            BadgeTone::Warning => "◐",
            BadgeTone::Danger => "✗",
            BadgeTone::Muted => "○",
            BadgeTone::Neutral => "?",
        }
    }
}

/// A styled status label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Badge<'a> {
    pub tone: BadgeTone,
    pub label: &'a str,
}

impl<'a> Badge<'a> {
    pub const fn new(tone: BadgeTone, label: &'a str) -> Self {
        Self { tone, label }
    }

    /// Badge for a status value the entity does not define.
    pub const fn fallback(raw: &'a str) -> Self {
        Self {
            tone: BadgeTone::Neutral,
            label: raw,
        }
    }
}

/// Buttons shown next to a row.
///
/// `enable` and `disable` are never both set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowActions {
    pub view: bool,
    pub enable: bool,
    pub disable: bool,
}

impl RowActions {
    pub const VIEW_ONLY: RowActions = RowActions {
        view: true,
        enable: false,
        disable: false,
    };

    /// Actions for a toggleable record: suspended records offer Enable,
    /// everything else offers Disable.
    pub const fn toggle(suspended: bool) -> Self {
        Self {
            view: true,
            enable: suspended,
            disable: !suspended,
        }
    }

    pub fn labels(&self) -> Vec<&'static str> {
        let mut labels = Vec::new();
        if self.view {
            labels.push("View");
        }
        if self.enable {
            labels.push("Enable");
        }
        if self.disable {
            labels.push("Disable");
        }
        labels
    }
}

/// Declares a closed status enumeration with a fallback variant.
///
/// Each listed variant gets its wire label and badge tone; any other string
/// deserializes into `Other` and renders with [`Badge::fallback`].
macro_rules! status_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $($variant:ident => ($label:literal, $tone:ident)),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
        #[serde(from = "String", into = "String")]
        pub enum $name {
            $($variant,)+
            Other(String),
        }

        impl $name {
            pub const LABELS: &'static [&'static str] = &[$($label),+];

            pub fn as_str(&self) -> &str {
                match self {
                    $($name::$variant => $label,)+
                    $name::Other(raw) => raw,
                }
            }

            pub fn badge(&self) -> $crate::badge::Badge<'_> {
                match self {
                    $($name::$variant => $crate::badge::Badge::new(
                        $crate::badge::BadgeTone::$tone,
                        $label,
                    ),)+
                    $name::Other(raw) => $crate::badge::Badge::fallback(raw),
                }
            }
        }

        impl From<&str> for $name {
            fn from(raw: &str) -> Self {
                match raw.trim() {
                    $(s if s.eq_ignore_ascii_case($label) => $name::$variant,)+
                    s => $name::Other(s.to_string()),
                }
            }
        }

        impl From<String> for $name {
            fn from(raw: String) -> Self {
                $name::from(raw.as_str())
            }
        }

        impl From<$name> for String {
            fn from(status: $name) -> Self {
                match status {
                    $name::Other(raw) => raw,
                    known => known.as_str().to_string(),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

pub(crate) use status_enum;

#[cfg(test)]
mod tests {
    use super::*;

    status_enum! {
        Light {
            Green => ("Green", Success),
            Amber => ("Amber Flash", Warning),
        }
    }

    #[test]
    fn test_known_labels_parse_case_insensitively() {
        assert_eq!(Light::from("green"), Light::Green);
        assert_eq!(Light::from(" AMBER FLASH "), Light::Amber);
        assert_eq!(Light::Amber.as_str(), "Amber Flash");
    }

    #[test]
    fn test_unknown_label_uses_fallback_badge() {
        let light = Light::from("Blue");
        assert_eq!(light, Light::Other("Blue".to_string()));
        let badge = light.badge();
        assert_eq!(badge.tone, BadgeTone::Neutral);
        assert_eq!(badge.label, "Blue");
    }

    #[test]
    fn test_every_label_maps_to_one_badge() {
        for label in Light::LABELS {
            let light = Light::from(*label);
            let badge = light.badge();
            assert_ne!(badge.tone, BadgeTone::Neutral);
            assert_eq!(badge.label, *label);
        }
    }

    #[test]
    fn test_serde_round_trip_keeps_raw_value() {
        let json = serde_json::to_string(&Light::Other("Retired".to_string())).unwrap();
        assert_eq!(json, "\"Retired\"");
        let back: Light = serde_json::from_str("\"Amber Flash\"").unwrap();
        assert_eq!(back, Light::Amber);
    }

    #[test]
    fn test_toggle_actions_are_exclusive() {
        let suspended = RowActions::toggle(true);
        assert!(suspended.enable && !suspended.disable);
        let active = RowActions::toggle(false);
        assert!(!active.enable && active.disable);
        assert_eq!(active.labels(), vec!["View", "Disable"]);
        assert_eq!(RowActions::VIEW_ONLY.labels(), vec!["View"]);
    }
}
