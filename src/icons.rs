//! Themed icons for sections, dialogs, and status markers.
//!
//! Every glyph goes through the [`IconService`] so the whole console can
//! fall back to plain ASCII on terminals without wide-glyph support.

use crate::search::EntityKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IconTheme {
    Emoji,
    Unicode,
    /// Safe on any terminal, so it is the starting theme.
    #[default]
    Ascii,
}

/// Entity icons, one per searchable kind
#[derive(Debug, Clone)]
pub struct EntityIcons {
    pub event: &'static str,
    pub artist: &'static str,
    pub venue: &'static str,
    pub organization: &'static str,
    pub city: &'static str,
    pub gallery: &'static str,
    pub user: &'static str,
    pub promo: &'static str,
}

/// Dialog and status markers
#[derive(Debug, Clone)]
pub struct UiIcons {
    pub error: &'static str,
    pub info: &'static str,
    pub warning: &'static str,
    pub search: &'static str,
    pub create: &'static str,
    pub working: &'static str,
}

/// Complete icon set for one theme
#[derive(Debug, Clone)]
pub struct IconSet {
    pub entity: EntityIcons,
    pub ui: UiIcons,
}

/// Hands out the glyph set for the active theme.
#[derive(Debug, Clone, Default)]
pub struct IconService {
    current_theme: IconTheme,
}

impl IconService {
    #[must_use]
    pub fn new(theme: IconTheme) -> Self {
        Self { current_theme: theme }
    }

    #[must_use]
    pub fn theme(&self) -> IconTheme {
        self.current_theme
    }

    pub fn set_theme(&mut self, theme: IconTheme) {
        self.current_theme = theme;
    }

    /// Ascii, Unicode, Emoji, then around again.
    pub fn cycle_icon_theme(&mut self) {
        self.current_theme = match self.current_theme {
            IconTheme::Ascii => IconTheme::Unicode,
            IconTheme::Unicode => IconTheme::Emoji,
            IconTheme::Emoji => IconTheme::Ascii,
        };
    }

    #[must_use]
    pub fn icons(&self) -> IconSet {
        match self.current_theme {
            IconTheme::Emoji => Self::emoji_icons(),
            IconTheme::Unicode => Self::unicode_icons(),
            IconTheme::Ascii => Self::ascii_icons(),
        }
    }

    fn emoji_icons() -> IconSet {
        IconSet {
            entity: EntityIcons {
                event: "🎫",
                artist: "🎤",
                venue: "🏟️",
                organization: "🏢",
                city: "🌆",
                gallery: "🖼️",
                user: "👤",
                promo: "🏷️",
            },
            ui: UiIcons {
                error: "❌",
                info: "💡",
                warning: "⚠️",
                search: "🔍",
                create: "➕",
                working: "🔄",
            },
        }
    }

    fn unicode_icons() -> IconSet {
        IconSet {
            entity: EntityIcons {
                event: "◆",
                artist: "♪",
                venue: "⌂",
                organization: "▣",
                city: "◎",
                gallery: "▦",
                user: "◉",
                promo: "◈",
            },
            ui: UiIcons {
                error: "✗",
                info: "ⓘ",
                warning: "⚠",
                search: "◌",
                create: "+",
                working: "⟳",
            },
        }
    }

    fn ascii_icons() -> IconSet {
        IconSet {
            entity: EntityIcons {
                event: "#",
                artist: "&",
                venue: "^",
                organization: "=",
                city: "o",
                gallery: "%",
                user: "@",
                promo: "$",
            },
            ui: UiIcons {
                error: "X",
                info: "i",
                warning: "!",
                search: "?",
                create: "+",
                working: "...",
            },
        }
    }

    /// Icon for a searchable entity kind
    #[must_use]
    pub fn entity(&self, kind: EntityKind) -> &'static str {
        let icons = self.icons().entity;
        match kind {
            EntityKind::Event => icons.event,
            EntityKind::Artist => icons.artist,
            EntityKind::Venue => icons.venue,
            EntityKind::Organization => icons.organization,
            EntityKind::City => icons.city,
            EntityKind::Gallery => icons.gallery,
            EntityKind::User => icons.user,
        }
    }

    #[must_use]
    pub fn error(&self) -> &'static str {
        self.icons().ui.error
    }

    #[must_use]
    pub fn info(&self) -> &'static str {
        self.icons().ui.info
    }

    #[must_use]
    pub fn warning(&self) -> &'static str {
        self.icons().ui.warning
    }

    #[must_use]
    pub fn search(&self) -> &'static str {
        self.icons().ui.search
    }

    #[must_use]
    pub fn create(&self) -> &'static str {
        self.icons().ui.create
    }

    #[must_use]
    pub fn working(&self) -> &'static str {
        self.icons().ui.working
    }

    #[must_use]
    pub fn promo(&self) -> &'static str {
        self.icons().entity.promo
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_theme() {
        let service = IconService::default();
        assert_eq!(service.theme(), IconTheme::Ascii);
    }

    #[test]
    fn test_theme_switching() {
        let mut service = IconService::new(IconTheme::Emoji);
        assert_eq!(service.theme(), IconTheme::Emoji);

        service.set_theme(IconTheme::Ascii);
        assert_eq!(service.theme(), IconTheme::Ascii);
    }

    #[test]
    fn test_entity_icons_per_theme() {
        let emoji = IconService::new(IconTheme::Emoji);
        assert_eq!(emoji.entity(EntityKind::Artist), "🎤");

        let unicode = IconService::new(IconTheme::Unicode);
        assert_eq!(unicode.entity(EntityKind::Artist), "♪");

        let ascii = IconService::new(IconTheme::Ascii);
        assert_eq!(ascii.entity(EntityKind::Artist), "&");
    }

    #[test]
    fn test_theme_cycling() {
        let mut service = IconService::new(IconTheme::Ascii);
        assert_eq!(service.theme(), IconTheme::Ascii);

        service.cycle_icon_theme();
        assert_eq!(service.theme(), IconTheme::Unicode);

        service.cycle_icon_theme();
        assert_eq!(service.theme(), IconTheme::Emoji);

        service.cycle_icon_theme();
        assert_eq!(service.theme(), IconTheme::Ascii);
    }
}
