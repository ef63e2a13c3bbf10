//! Rendering descriptors
//!
//! Closed mappings from the free-form tags stored on records (icon keys,
//! palette names, statuses) to what a front end draws. Unknown tags fall
//! back to a documented default instead of failing.

use serde::{Deserialize, Serialize};

use crate::machines::{HealthStatus, MachineStatus};
use crate::notifications::Priority;

/// Notification icon. Unknown keys render as [`NotificationIcon::Bell`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NotificationIcon {
    Settings,
    UserPlus,
    AlertCircle,
    MessageSquare,
    Calendar,
    CreditCard,
    TrendingUp,
    CheckCircle,
    #[default]
    Bell,
}

impl NotificationIcon {
    pub fn from_key(key: &str) -> Self {
        match key {
            "Settings" => NotificationIcon::Settings,
            "UserPlus" => NotificationIcon::UserPlus,
            "AlertCircle" => NotificationIcon::AlertCircle,
            "MessageSquare" => NotificationIcon::MessageSquare,
            "Calendar" => NotificationIcon::Calendar,
            "CreditCard" => NotificationIcon::CreditCard,
            "TrendingUp" => NotificationIcon::TrendingUp,
            "CheckCircle" => NotificationIcon::CheckCircle,
            _ => NotificationIcon::Bell,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            NotificationIcon::Settings => "Settings",
            NotificationIcon::UserPlus => "UserPlus",
            NotificationIcon::AlertCircle => "AlertCircle",
            NotificationIcon::MessageSquare => "MessageSquare",
            NotificationIcon::Calendar => "Calendar",
            NotificationIcon::CreditCard => "CreditCard",
            NotificationIcon::TrendingUp => "TrendingUp",
            NotificationIcon::CheckCircle => "CheckCircle",
            NotificationIcon::Bell => "Bell",
        }
    }
}

/// Text and background classes for an icon chip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ColorDescriptor {
    pub text: &'static str,
    pub background: &'static str,
}

impl ColorDescriptor {
    /// Both classes joined, e.g. `"text-blue-600 bg-blue-100"`
    pub fn classes(&self) -> String {
        format!("{} {}", self.text, self.background)
    }
}

/// Notification palette. Unknown names render as [`Palette::Gray`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Palette {
    Blue,
    Green,
    Red,
    Purple,
    Orange,
    #[default]
    Gray,
}

impl Palette {
    pub fn from_key(key: &str) -> Self {
        match key {
            "blue" => Palette::Blue,
            "green" => Palette::Green,
            "red" => Palette::Red,
            "purple" => Palette::Purple,
            "orange" => Palette::Orange,
            _ => Palette::Gray,
        }
    }

    pub fn descriptor(&self) -> ColorDescriptor {
        let (text, background) = match self {
            Palette::Blue => ("text-blue-600", "bg-blue-100"),
            Palette::Green => ("text-green-600", "bg-green-100"),
            Palette::Red => ("text-red-600", "bg-red-100"),
            Palette::Purple => ("text-purple-600", "bg-purple-100"),
            Palette::Orange => ("text-orange-600", "bg-orange-100"),
            Palette::Gray => ("text-gray-600", "bg-gray-100"),
        };
        ColorDescriptor { text, background }
    }
}

/// Badge style
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeVariant {
    #[default]
    Default,
    Secondary,
    Outline,
    Destructive,
    Success,
}

impl BadgeVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            BadgeVariant::Default => "default",
            BadgeVariant::Secondary => "secondary",
            BadgeVariant::Outline => "outline",
            BadgeVariant::Destructive => "destructive",
            BadgeVariant::Success => "success",
        }
    }
}

impl From<MachineStatus> for BadgeVariant {
    fn from(status: MachineStatus) -> Self {
        match status {
            MachineStatus::Online => BadgeVariant::Success,
            MachineStatus::Offline => BadgeVariant::Destructive,
            MachineStatus::Maintenance => BadgeVariant::Secondary,
        }
    }
}

impl From<HealthStatus> for BadgeVariant {
    fn from(health: HealthStatus) -> Self {
        match health {
            HealthStatus::Excellent => BadgeVariant::Success,
            HealthStatus::Good => BadgeVariant::Secondary,
            HealthStatus::Warning => BadgeVariant::Outline,
            HealthStatus::Critical => BadgeVariant::Destructive,
        }
    }
}

/// Background and text classes for a priority pill. `None` renders gray.
pub fn priority_classes(priority: Option<Priority>) -> &'static str {
    match priority {
        Some(Priority::High) => "bg-red-100 text-red-800",
        Some(Priority::Medium) => "bg-yellow-100 text-yellow-800",
        Some(Priority::Low) => "bg-green-100 text-green-800",
        None => "bg-gray-100 text-gray-800",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;

    #[test]
    fn test_unknown_icon_falls_back_to_bell() {
        assert_eq!(NotificationIcon::from_key("Settings"), NotificationIcon::Settings);
        assert_eq!(NotificationIcon::from_key("Rocket"), NotificationIcon::Bell);
        assert_eq!(NotificationIcon::from_key(""), NotificationIcon::default());
    }

    #[test]
    fn test_every_seeded_icon_is_known() {
        for n in seed::notifications() {
            let icon = NotificationIcon::from_key(&n.icon);
            assert_ne!(icon, NotificationIcon::Bell, "icon {} unmapped", n.icon);
            assert_eq!(icon.name(), n.icon);
        }
    }

    #[test]
    fn test_palette_descriptor() {
        let blue = Palette::from_key("blue").descriptor();
        assert_eq!(blue.text, "text-blue-600");
        assert_eq!(blue.background, "bg-blue-100");

        assert_eq!(Palette::from_key("teal").descriptor().classes(), "text-gray-600 bg-gray-100");
    }

    #[test]
    fn test_badges() {
        assert_eq!(BadgeVariant::from(MachineStatus::Online), BadgeVariant::Success);
        assert_eq!(BadgeVariant::from(MachineStatus::Maintenance).as_str(), "secondary");
        assert_eq!(BadgeVariant::from(HealthStatus::Warning), BadgeVariant::Outline);
        assert_eq!(BadgeVariant::from(HealthStatus::Critical), BadgeVariant::Destructive);
    }

    #[test]
    fn test_priority_classes() {
        assert_eq!(priority_classes(Some(Priority::High)), "bg-red-100 text-red-800");
        assert_eq!(priority_classes(None), "bg-gray-100 text-gray-800");
    }
}
