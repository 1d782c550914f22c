//! Classification and visibility tags.
//!
//! `type` and `display` are open: a site generator may understand tags this
//! crate has never seen, so unknown strings are kept as `Other`. Theme
//! presets (`typesetting`, `layout`) are closed enums and reject unknown
//! values.

use serde::{Deserialize, Serialize};

/// Declares an open string tag with a set of known variants.
macro_rules! open_tag {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $lit:literal, )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(from = "String", into = "String")]
        pub enum $name {
            $( $(#[$vmeta])* $variant, )+
            /// A tag this crate does not know about.
            Other(String),
        }

        impl $name {
            pub fn as_str(&self) -> &str {
                match self {
                    $( Self::$variant => $lit, )+
                    Self::Other(tag) => tag,
                }
            }
        }

        impl From<String> for $name {
            fn from(tag: String) -> Self {
                match tag.as_str() {
                    $( $lit => Self::$variant, )+
                    _ => Self::Other(tag),
                }
            }
        }

        impl From<&str> for $name {
            fn from(tag: &str) -> Self {
                Self::from(tag.to_owned())
            }
        }

        impl From<$name> for String {
            fn from(tag: $name) -> Self {
                match tag {
                    $name::Other(tag) => tag,
                    known => known.as_str().to_owned(),
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

open_tag! {
    /// Entry classification (`type` field).
    pub enum PageType {
        /// Regular page, listed in the sidebar.
        Doc => "doc",
        /// Top-level page, rendered as a navbar item.
        Page => "page",
        /// Non-clickable divider between sidebar groups.
        Separator => "separator",
        /// Dropdown menu in the navbar.
        Menu => "menu",
    }
}

open_tag! {
    /// Visibility directive (`display` field).
    pub enum Display {
        Normal => "normal",
        /// Omitted from navigation, still reachable by route.
        Hidden => "hidden",
        /// Entry itself is omitted, its children are shown.
        Children => "children",
    }
}

impl Display {
    #[inline]
    pub fn is_hidden(&self) -> bool {
        matches!(self, Self::Hidden)
    }
}

/// Typography preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Typesetting {
    Default,
    Article,
}

/// Page layout preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    Default,
    /// Content spans the full width.
    Full,
    /// No theme chrome at all.
    Raw,
}
