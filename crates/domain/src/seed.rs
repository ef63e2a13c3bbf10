//! Demo data the dashboard starts with
//!
//! Every call returns a fresh copy; stores take ownership of it.

use chrono::NaiveDate;

use crate::machines::{HealthStatus, Machine, MachineStatus, MachineType};
use crate::notifications::{Notification, NotificationAction, Priority};
use crate::projects::{Project, ProjectStatus};
use crate::users::{AccountStatus, Role, User, PLACEHOLDER_AVATAR};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

fn team(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| name.to_string()).collect()
}

pub fn machines() -> Vec<Machine> {
    vec![
        Machine {
            id: "1".to_string(),
            name: "Crusher Unit A1".to_string(),
            machine_type: MachineType::Crusher,
            status: MachineStatus::Online,
            health_status: HealthStatus::Good,
            location: "Sector A".to_string(),
            last_maintenance: date(2024, 6, 15),
            next_maintenance: date(2024, 8, 15),
            operating_hours: 2847,
            efficiency: 87,
            temperature: 72.0,
            pressure: 8.5,
            vibration: 2.3,
        },
        Machine {
            id: "2".to_string(),
            name: "Belt Conveyor B2".to_string(),
            machine_type: MachineType::BeltConveyor,
            status: MachineStatus::Online,
            health_status: HealthStatus::Excellent,
            location: "Sector B".to_string(),
            last_maintenance: date(2024, 7, 1),
            next_maintenance: date(2024, 9, 1),
            operating_hours: 1924,
            efficiency: 94,
            temperature: 45.0,
            pressure: 6.2,
            vibration: 1.1,
        },
        Machine {
            id: "3".to_string(),
            name: "Excavator X1".to_string(),
            machine_type: MachineType::Excavator,
            status: MachineStatus::Offline,
            health_status: HealthStatus::Critical,
            location: "Sector C".to_string(),
            last_maintenance: date(2024, 5, 20),
            next_maintenance: date(2024, 7, 20),
            operating_hours: 3642,
            efficiency: 45,
            temperature: 95.0,
            pressure: 12.8,
            vibration: 4.7,
        },
        Machine {
            id: "4".to_string(),
            name: "Drill Rig D1".to_string(),
            machine_type: MachineType::Drill,
            status: MachineStatus::Maintenance,
            health_status: HealthStatus::Warning,
            location: "Sector D".to_string(),
            last_maintenance: date(2024, 7, 10),
            next_maintenance: date(2024, 9, 10),
            operating_hours: 2156,
            efficiency: 72,
            temperature: 68.0,
            pressure: 9.1,
            vibration: 3.2,
        },
        Machine {
            id: "5".to_string(),
            name: "Loader L3".to_string(),
            machine_type: MachineType::Loader,
            status: MachineStatus::Online,
            health_status: HealthStatus::Good,
            location: "Sector A".to_string(),
            last_maintenance: date(2024, 6, 25),
            next_maintenance: date(2024, 8, 25),
            operating_hours: 1789,
            efficiency: 82,
            temperature: 58.0,
            pressure: 7.4,
            vibration: 2.0,
        },
        Machine {
            id: "6".to_string(),
            name: "Haul Truck H1".to_string(),
            machine_type: MachineType::HaulTruck,
            status: MachineStatus::Online,
            health_status: HealthStatus::Excellent,
            location: "Sector B".to_string(),
            last_maintenance: date(2024, 6, 30),
            next_maintenance: date(2024, 8, 30),
            operating_hours: 2398,
            efficiency: 91,
            temperature: 62.0,
            pressure: 8.9,
            vibration: 1.8,
        },
        Machine {
            id: "7".to_string(),
            name: "Mill M2".to_string(),
            machine_type: MachineType::Mill,
            status: MachineStatus::Online,
            health_status: HealthStatus::Warning,
            location: "Sector C".to_string(),
            last_maintenance: date(2024, 5, 15),
            next_maintenance: date(2024, 7, 15),
            operating_hours: 3124,
            efficiency: 78,
            temperature: 84.0,
            pressure: 10.2,
            vibration: 3.8,
        },
        Machine {
            id: "8".to_string(),
            name: "Separator S1".to_string(),
            machine_type: MachineType::Separator,
            status: MachineStatus::Offline,
            health_status: HealthStatus::Good,
            location: "Sector D".to_string(),
            last_maintenance: date(2024, 7, 5),
            next_maintenance: date(2024, 9, 5),
            operating_hours: 1567,
            efficiency: 85,
            temperature: 55.0,
            pressure: 6.8,
            vibration: 2.1,
        },
    ]
}

pub fn users() -> Vec<User> {
    vec![
        User {
            id: 1,
            name: "John Doe".to_string(),
            email: "john@example.com".to_string(),
            role: Role::Admin,
            status: AccountStatus::Active,
            avatar: PLACEHOLDER_AVATAR.to_string(),
            last_active: "2 hours ago".to_string(),
        },
        User {
            id: 2,
            name: "Jane Smith".to_string(),
            email: "jane@example.com".to_string(),
            role: Role::Editor,
            status: AccountStatus::Active,
            avatar: PLACEHOLDER_AVATAR.to_string(),
            last_active: "5 minutes ago".to_string(),
        },
        User {
            id: 3,
            name: "Mike Johnson".to_string(),
            email: "mike@example.com".to_string(),
            role: Role::Viewer,
            status: AccountStatus::Inactive,
            avatar: PLACEHOLDER_AVATAR.to_string(),
            last_active: "2 days ago".to_string(),
        },
        User {
            id: 4,
            name: "Sarah Wilson".to_string(),
            email: "sarah@example.com".to_string(),
            role: Role::Editor,
            status: AccountStatus::Active,
            avatar: PLACEHOLDER_AVATAR.to_string(),
            last_active: "1 hour ago".to_string(),
        },
    ]
}

pub fn notifications() -> Vec<Notification> {
    vec![
        Notification {
            id: 1,
            kind: "system".to_string(),
            title: "System Update Available".to_string(),
            message: "A new system update is available. Please update to version 2.1.0 for the latest features and security improvements."
                .to_string(),
            timestamp: "2 minutes ago".to_string(),
            read: false,
            icon: "Settings".to_string(),
            color: "blue".to_string(),
            avatar: None,
            user: None,
            details: Some("This system update includes important security patches, performance improvements, and new features. The update process will take approximately 10-15 minutes and requires a system restart. Please save all your work before proceeding with the update.".to_string()),
            priority: Some(Priority::High),
            category: Some("System Maintenance".to_string()),
            actions: vec![
                NotificationAction::primary("Update Now"),
                NotificationAction::outline("Schedule Later"),
            ],
        },
        Notification {
            id: 2,
            kind: "user".to_string(),
            title: "New Team Member".to_string(),
            message: "Sarah Wilson has joined your team and has been assigned to the Analytics Dashboard project."
                .to_string(),
            timestamp: "15 minutes ago".to_string(),
            read: false,
            icon: "UserPlus".to_string(),
            color: "green".to_string(),
            avatar: Some(PLACEHOLDER_AVATAR.to_string()),
            user: Some("Sarah Wilson".to_string()),
            details: Some("Sarah Wilson has been added to your team with the role of Frontend Developer. She has been assigned to the Analytics Dashboard project and will be working on improving the user interface and user experience. Please welcome her to the team and provide any necessary onboarding materials.".to_string()),
            priority: Some(Priority::Medium),
            category: Some("Team Management".to_string()),
            actions: vec![
                NotificationAction::primary("View Profile"),
                NotificationAction::outline("Send Welcome Message"),
            ],
        },
        Notification {
            id: 3,
            kind: "alert".to_string(),
            title: "High CPU Usage Detected".to_string(),
            message: "Server CPU usage has exceeded 85% for the past 10 minutes. Consider scaling your infrastructure."
                .to_string(),
            timestamp: "1 hour ago".to_string(),
            read: true,
            icon: "AlertCircle".to_string(),
            color: "red".to_string(),
            avatar: None,
            user: None,
            details: Some("Your server's CPU usage has been consistently high at 87% for the past 10 minutes. This may impact application performance and user experience. Consider scaling your infrastructure or optimizing your application to handle the increased load. Current affected services: API Gateway, Database Connections, Background Jobs.".to_string()),
            priority: Some(Priority::High),
            category: Some("Infrastructure Alert".to_string()),
            actions: vec![
                NotificationAction::primary("Scale Infrastructure"),
                NotificationAction::outline("View Metrics"),
                NotificationAction::outline("Optimize Resources"),
            ],
        },
        Notification {
            id: 4,
            kind: "message".to_string(),
            title: "New Comment on Project".to_string(),
            message: "Mike Johnson commented on the E-commerce Platform project: 'Great progress on the checkout flow!'"
                .to_string(),
            timestamp: "2 hours ago".to_string(),
            read: true,
            icon: "MessageSquare".to_string(),
            color: "purple".to_string(),
            avatar: Some(PLACEHOLDER_AVATAR.to_string()),
            user: Some("Mike Johnson".to_string()),
            details: Some("Mike Johnson left a comment on the E-commerce Platform project regarding the checkout flow improvements. The comment includes feedback on the new streamlined checkout process and suggestions for further enhancements. This is part of the ongoing project review process.".to_string()),
            priority: Some(Priority::Low),
            category: Some("Project Collaboration".to_string()),
            actions: vec![
                NotificationAction::primary("Reply to Comment"),
                NotificationAction::outline("View Project"),
            ],
        },
        Notification {
            id: 5,
            kind: "calendar".to_string(),
            title: "Meeting Reminder".to_string(),
            message: "Team standup meeting starts in 30 minutes. Join the call in the main conference room."
                .to_string(),
            timestamp: "3 hours ago".to_string(),
            read: false,
            icon: "Calendar".to_string(),
            color: "orange".to_string(),
            avatar: None,
            user: None,
            details: Some("Your team standup meeting is scheduled to start in 30 minutes at 2:00 PM in the main conference room. The agenda includes project updates, blocker discussions, and sprint planning. Please prepare your status update and any blockers you're facing.".to_string()),
            priority: Some(Priority::Medium),
            category: Some("Meetings".to_string()),
            actions: vec![
                NotificationAction::primary("Join Meeting"),
                NotificationAction::outline("View Agenda"),
                NotificationAction::outline("Reschedule"),
            ],
        },
        Notification {
            id: 6,
            kind: "billing".to_string(),
            title: "Payment Successful".to_string(),
            message: "Your monthly subscription payment of $99.00 has been processed successfully."
                .to_string(),
            timestamp: "1 day ago".to_string(),
            read: true,
            icon: "CreditCard".to_string(),
            color: "green".to_string(),
            avatar: None,
            user: None,
            details: Some("Your monthly subscription payment of $99.00 for the Pro Plan has been successfully processed. Payment method: Credit Card ending in 4242. Next billing date: February 15, 2024. You can view your invoice and payment history in the billing section.".to_string()),
            priority: Some(Priority::Low),
            category: Some("Billing".to_string()),
            actions: vec![
                NotificationAction::primary("View Invoice"),
                NotificationAction::outline("Download Receipt"),
                NotificationAction::outline("Manage Billing"),
            ],
        },
        Notification {
            id: 7,
            kind: "analytics".to_string(),
            title: "Traffic Spike Detected".to_string(),
            message: "Your website traffic has increased by 150% in the last 24 hours. Check your analytics dashboard for details."
                .to_string(),
            timestamp: "1 day ago".to_string(),
            read: false,
            icon: "TrendingUp".to_string(),
            color: "blue".to_string(),
            avatar: None,
            user: None,
            details: Some("Your website has experienced a significant traffic spike with a 150% increase in the last 24 hours. Peak traffic occurred between 2-4 PM with 15,000 concurrent users. This appears to be organic traffic from social media mentions and search engine improvements. Monitor your server performance to ensure optimal user experience.".to_string()),
            priority: Some(Priority::Medium),
            category: Some("Analytics".to_string()),
            actions: vec![
                NotificationAction::primary("View Analytics"),
                NotificationAction::outline("Check Performance"),
                NotificationAction::outline("Scale Resources"),
            ],
        },
        Notification {
            id: 8,
            kind: "system".to_string(),
            title: "Backup Completed".to_string(),
            message: "Daily backup has been completed successfully. All your data is safely backed up."
                .to_string(),
            timestamp: "2 days ago".to_string(),
            read: true,
            icon: "CheckCircle".to_string(),
            color: "green".to_string(),
            avatar: None,
            user: None,
            details: Some("Your scheduled daily backup has been completed successfully at 3:00 AM. All databases, user files, and system configurations have been securely backed up to the cloud storage. Backup size: 2.3GB. Retention period: 30 days. You can restore from this backup if needed.".to_string()),
            priority: Some(Priority::Low),
            category: Some("System Operations".to_string()),
            actions: vec![
                NotificationAction::primary("View Backup Details"),
                NotificationAction::outline("Download Backup"),
                NotificationAction::outline("Test Restore"),
            ],
        },
    ]
}

pub fn projects() -> Vec<Project> {
    vec![
        Project {
            id: 1,
            name: "E-commerce Platform".to_string(),
            description: "Modern e-commerce solution with React and Node.js".to_string(),
            status: ProjectStatus::Active,
            progress: 75,
            last_updated: "2 hours ago".to_string(),
            team: team(&["John", "Jane", "Mike"]),
        },
        Project {
            id: 2,
            name: "Mobile App".to_string(),
            description: "Cross-platform mobile application using React Native".to_string(),
            status: ProjectStatus::InProgress,
            progress: 45,
            last_updated: "1 day ago".to_string(),
            team: team(&["Sarah", "Tom"]),
        },
        Project {
            id: 3,
            name: "Analytics Dashboard".to_string(),
            description: "Real-time analytics dashboard for business intelligence".to_string(),
            status: ProjectStatus::Completed,
            progress: 100,
            last_updated: "1 week ago".to_string(),
            team: team(&["Alex", "Emma", "Chris", "Lisa"]),
        },
        Project {
            id: 4,
            name: "API Gateway".to_string(),
            description: "Microservices API gateway with authentication".to_string(),
            status: ProjectStatus::Planning,
            progress: 10,
            last_updated: "3 days ago".to_string(),
            team: team(&["David", "Rachel"]),
        },
    ]
}
