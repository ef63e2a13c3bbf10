use anyhow::{anyhow, bail, Context};
use pitwatch_core::AppConfig;
use pitwatch_domain::presentation::{priority_classes, BadgeVariant, NotificationIcon, Palette};
use pitwatch_domain::{
    seed, Machine, MachineFilters, MachineRegistry, Notification, NotificationCenter,
    NotificationTab, Project, ProjectCatalog, UserDirectory,
};
use pitwatch_prediction::{
    ConnectionState, ConnectivityProbe, PredictionClient, PredictionPanel, PredictionRequest,
};
use pitwatch_session::{FileStorage, SessionStore};
use serde::Serialize;
use std::time::Duration;
use tracing::info;

use crate::Command;

const SIGN_IN_HINT: &str = "pitwatch-dashboard sign-in <email> <password>";

/// Dashboard state for one CLI invocation
pub(crate) struct App {
    config: AppConfig,
    json: bool,
    machines: MachineRegistry,
    users: UserDirectory,
    notifications: NotificationCenter,
    projects: ProjectCatalog,
    session: SessionStore<FileStorage>,
}

impl App {
    pub(crate) fn new(config: AppConfig, json: bool) -> Self {
        let session = SessionStore::open(FileStorage::from_config(&config));
        Self {
            machines: MachineRegistry::with_machines(seed::machines()),
            users: UserDirectory::with_users(seed::users()),
            notifications: NotificationCenter::with_notifications(seed::notifications()),
            projects: ProjectCatalog::new(seed::projects()),
            session,
            config,
            json,
        }
    }

    pub(crate) async fn run(&mut self, command: Command) -> anyhow::Result<()> {
        match command {
            Command::Machines {
                search,
                machine_type,
                status,
                health,
                location,
            } => {
                self.require_route("/machines")?;
                let filters = MachineFilters {
                    machine_type,
                    status,
                    health_status: health,
                    location,
                };
                self.list_machines(&search, &filters)
            }
            Command::Machine { id } => {
                self.require_route("/machines")?;
                self.show_machine(&id)
            }
            Command::Users { search } => {
                self.require_route("/users")?;
                self.list_users(&search)
            }
            Command::Projects { search } => {
                self.require_route("/projects")?;
                self.list_projects(&search)
            }
            Command::Notifications { search, tab } => {
                self.require_route("/notifications")?;
                self.list_notifications(&search, &tab)
            }
            Command::Notification { id } => {
                self.require_route("/notifications")?;
                self.open_notification(id)
            }
            Command::Predict {
                temperature,
                pressure,
                vibration,
                sample,
            } => {
                self.require_route("/")?;
                let request = if sample {
                    PredictionRequest::sample()
                } else {
                    let defaults = PredictionRequest::default();
                    PredictionRequest::new(
                        temperature.unwrap_or(defaults.temperature),
                        pressure.unwrap_or(defaults.pressure),
                        vibration.unwrap_or(defaults.vibration),
                    )
                };
                self.predict(request).await
            }
            Command::Status => {
                self.require_route("/")?;
                self.status().await
            }
            Command::Watch => {
                self.require_route("/")?;
                self.watch().await
            }
            Command::SignIn { email, password } => self.sign_in(&email, &password),
            Command::SignOut => {
                let redirect = self.session.sign_out();
                println!("Signed out. Continue at {}", redirect.location);
                Ok(())
            }
            Command::Whoami => self.whoami(),
        }
    }

    fn require_route(&self, route: &str) -> anyhow::Result<()> {
        match self.session.redirect_for(route) {
            None => Ok(()),
            Some(sign_in) => bail!(
                "not signed in: {} requires a session (go to {}, or run `{}`)",
                route,
                sign_in,
                SIGN_IN_HINT
            ),
        }
    }

    fn print_json<T: Serialize + ?Sized>(&self, value: &T) -> anyhow::Result<()> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }

    fn list_machines(&self, search: &str, filters: &MachineFilters) -> anyhow::Result<()> {
        let visible = self.machines.visible(search, filters);
        if self.json {
            return self.print_json(&visible);
        }

        let summary = self.machines.summary();
        println!(
            "{} machines, {} online ({}% operational), {} critical, average efficiency {}%",
            summary.total,
            summary.online,
            summary.operational_percent,
            summary.critical,
            summary.average_efficiency
        );
        println!("locations: {}", self.machines.distinct_locations().join(", "));
        println!();

        if visible.is_empty() {
            println!("No machines match the current search and filters.");
        }
        for machine in visible {
            println!("{}", machine_line(machine));
        }
        Ok(())
    }

    fn show_machine(&self, id: &str) -> anyhow::Result<()> {
        let machine = self.machines.detail(id)?;
        let report = self.machines.analyze_performance(id)?;
        if self.json {
            return self.print_json(&serde_json::json!({
                "machine": machine,
                "performance": report,
            }));
        }

        println!("{} ({})", machine.name, machine.machine_type);
        println!(
            "  status: {} [{}]",
            machine.status,
            BadgeVariant::from(machine.status).as_str()
        );
        println!(
            "  health: {} [{}]",
            machine.health_status,
            BadgeVariant::from(machine.health_status).as_str()
        );
        println!("  location: {}", machine.location);
        println!(
            "  maintenance: last {}, next {}",
            machine.last_maintenance, machine.next_maintenance
        );
        println!("  operating hours: {}", machine.operating_hours);
        println!(
            "  readings: {:.1} °C, {:.1} bar, {:.1} mm/s",
            machine.temperature, machine.pressure, machine.vibration
        );
        println!("  {}", report.message);
        Ok(())
    }

    fn list_users(&self, search: &str) -> anyhow::Result<()> {
        let visible = self.users.visible(search);
        if self.json {
            return self.print_json(&visible);
        }
        for user in visible {
            println!(
                "{:>3}  {:<16} {:<22} {:<7} {:<9} {}",
                user.id,
                user.name,
                user.email,
                user.role.as_str(),
                user.status.as_str(),
                user.last_active
            );
        }
        Ok(())
    }

    fn list_projects(&self, search: &str) -> anyhow::Result<()> {
        let visible = self.projects.visible(search);
        if self.json {
            return self.print_json(&visible);
        }

        if visible.is_empty() {
            println!("No projects match the current search.");
        }
        for project in visible {
            println!("{}", project_line(project));
        }
        Ok(())
    }

    fn list_notifications(&self, search: &str, tab: &NotificationTab) -> anyhow::Result<()> {
        let visible = self.notifications.visible(search, tab);
        if self.json {
            return self.print_json(&visible);
        }

        println!(
            "{} total, {} unread, {} today (tab: {})",
            self.notifications.len(),
            self.notifications.unread_count(),
            self.notifications.today_count(),
            tab
        );
        if visible.is_empty() {
            println!("No notifications.");
        }
        for notification in visible {
            println!("{}", notification_line(notification));
        }
        Ok(())
    }

    fn open_notification(&mut self, id: u32) -> anyhow::Result<()> {
        let json = self.json;
        let notification = self.notifications.open(id)?;
        if json {
            println!("{}", serde_json::to_string_pretty(notification)?);
            return Ok(());
        }

        let icon = NotificationIcon::from_key(&notification.icon);
        let color = Palette::from_key(&notification.color).descriptor();
        println!("{} [{} {}]", notification.title, icon.name(), color.classes());
        println!("  {}", notification.message);
        if let Some(details) = &notification.details {
            println!("  {}", details);
        }
        if let Some(category) = &notification.category {
            println!("  category: {}", category);
        }
        println!(
            "  priority: {} ({})",
            notification
                .priority
                .map(|p| p.as_str())
                .unwrap_or("none"),
            priority_classes(notification.priority)
        );
        if let Some(user) = &notification.user {
            println!("  from: {}", user);
        }
        let actions: Vec<&str> = notification.actions.iter().map(|a| a.label.as_str()).collect();
        if !actions.is_empty() {
            println!("  actions: {}", actions.join(" | "));
        }
        Ok(())
    }

    fn client(&self) -> anyhow::Result<PredictionClient> {
        PredictionClient::from_config(&self.config).map_err(|e| anyhow!(e.message()))
    }

    async fn predict(&self, request: PredictionRequest) -> anyhow::Result<()> {
        let client = self.client()?;
        let mut panel = PredictionPanel::new();

        panel.begin();
        panel.finish(client.predict(&request).await);

        if let Some(error) = panel.error() {
            bail!("{}", error);
        }
        let report = panel
            .report()
            .context("prediction finished without a result")?;

        if self.json {
            return self.print_json(&serde_json::json!({
                "request": request,
                "response": panel.response(),
                "report": report,
            }));
        }

        println!(
            "Readings: {} °C, {} Pa, {} mm/s",
            request.temperature, request.pressure, request.vibration
        );
        println!("{}", report.headline);
        println!("  Failure Probability: {}", report.failure_probability);
        println!("  Normal Operation Probability: {}", report.normal_probability);
        println!("  [{}]", risk_bar(report.bar_width));
        Ok(())
    }

    async fn status(&self) -> anyhow::Result<()> {
        let client = self.client()?;
        let connected = client.test_connection().await;
        let state = if connected {
            ConnectionState::Connected
        } else {
            ConnectionState::Disconnected
        };

        if self.json {
            return self.print_json(&serde_json::json!({
                "endpoint": client.base_url(),
                "connection": state,
            }));
        }
        println!("{}: {}", client.base_url(), state.label());
        Ok(())
    }

    async fn watch(&self) -> anyhow::Result<()> {
        if !self.config.probe.enabled {
            bail!("connectivity probe is disabled (probe.enabled = false)");
        }

        let client = self.client()?;
        let period = Duration::from_secs(self.config.probe.interval_secs);
        let probe = ConnectivityProbe::spawn(client, period);
        let mut updates = probe.subscribe();

        loop {
            tokio::select! {
                _ = tokio::signal::ctrl_c() => {
                    info!("interrupted");
                    break;
                }
                changed = updates.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    let status = updates.borrow_and_update().clone();
                    if status.in_flight {
                        continue;
                    }
                    if self.json {
                        println!("{}", serde_json::to_string(&status)?);
                    } else {
                        let checked = status
                            .last_checked
                            .map(|t| t.format("%H:%M:%S").to_string())
                            .unwrap_or_else(|| "never".to_string());
                        println!(
                            "{} {} (last checked {})",
                            status.endpoint,
                            status.connection.label(),
                            checked
                        );
                    }
                }
            }
        }

        probe.shutdown().await;
        Ok(())
    }

    fn sign_in(&mut self, email: &str, password: &str) -> anyhow::Result<()> {
        if !self.session.sign_in(email, password) {
            bail!("sign-in failed: enter a valid email and a password of at least 6 characters");
        }
        self.whoami()
    }

    fn whoami(&self) -> anyhow::Result<()> {
        match self.session.user() {
            Some(user) if self.json => self.print_json(user),
            Some(user) => {
                println!("{} <{}>", user.name, user.email);
                Ok(())
            }
            None => {
                println!("Not signed in.");
                Ok(())
            }
        }
    }
}

fn machine_line(machine: &Machine) -> String {
    format!(
        "{:>3}  {:<18} {:<14} {:<12} {:<10} {:<9} {:>3}%",
        machine.id,
        machine.name,
        machine.machine_type.label(),
        machine.status.as_str(),
        machine.health_status.as_str(),
        machine.location,
        machine.efficiency
    )
}

fn project_line(project: &Project) -> String {
    format!(
        "{:>3}  {:<28} {:<12} [{}] {:>3}%  updated {}, team {}",
        project.id,
        project.name,
        project.status.as_str(),
        project.status.badge().as_str(),
        project.progress,
        project.last_updated,
        project.team.len()
    )
}

fn notification_line(notification: &Notification) -> String {
    let marker = if notification.read { " " } else { "*" };
    format!(
        "{} {:>3}  {:<26} {:<15} {}",
        marker, notification.id, notification.title, notification.timestamp, notification.kind
    )
}

fn risk_bar(width: f64) -> String {
    const SLOTS: usize = 20;
    let filled = ((width / 100.0) * SLOTS as f64).round() as usize;
    let filled = filled.min(SLOTS);
    format!("{}{}", "#".repeat(filled), "-".repeat(SLOTS - filled))
}
