//! Machine fleet models and registry
//!
//! Machines carry two independent axes: an operating `status` set by
//! operators and a `health_status` derived from inspections. A machine can be
//! online and critical at the same time.

use chrono::NaiveDate;
use pitwatch_core::{filter_records, FieldFilters, Record, SearchQuery};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use crate::error::{DomainError, Result};
use crate::store::{Entity, EntityStore, InMemoryStore};

/// Fields searched by the machines view.
pub const MACHINE_SEARCH_FIELDS: &[&str] = &["name", "type", "location"];

/// Machine kinds on site
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MachineType {
    Crusher,
    #[serde(rename = "Belt Conveyor")]
    BeltConveyor,
    Excavator,
    Drill,
    Loader,
    #[serde(rename = "Haul Truck")]
    HaulTruck,
    Mill,
    Separator,
}

impl MachineType {
    /// Every machine kind, in display order
    pub const ALL: [MachineType; 8] = [
        MachineType::Crusher,
        MachineType::BeltConveyor,
        MachineType::Excavator,
        MachineType::Drill,
        MachineType::Loader,
        MachineType::HaulTruck,
        MachineType::Mill,
        MachineType::Separator,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            MachineType::Crusher => "Crusher",
            MachineType::BeltConveyor => "Belt Conveyor",
            MachineType::Excavator => "Excavator",
            MachineType::Drill => "Drill",
            MachineType::Loader => "Loader",
            MachineType::HaulTruck => "Haul Truck",
            MachineType::Mill => "Mill",
            MachineType::Separator => "Separator",
        }
    }
}

impl fmt::Display for MachineType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Operating status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MachineStatus {
    Online,
    Offline,
    Maintenance,
}

impl MachineStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MachineStatus::Online => "online",
            MachineStatus::Offline => "offline",
            MachineStatus::Maintenance => "maintenance",
        }
    }

    /// Status after an operator toggle: online goes offline, anything else comes online.
    pub fn toggled(&self) -> MachineStatus {
        match self {
            MachineStatus::Online => MachineStatus::Offline,
            MachineStatus::Offline | MachineStatus::Maintenance => MachineStatus::Online,
        }
    }
}

impl fmt::Display for MachineStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inspection health grade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Excellent,
    Good,
    Warning,
    Critical,
}

impl HealthStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            HealthStatus::Excellent => "excellent",
            HealthStatus::Good => "good",
            HealthStatus::Warning => "warning",
            HealthStatus::Critical => "critical",
        }
    }
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MachineType {
    type Err = DomainError;

    /// Case-insensitive match on the display label
    fn from_str(s: &str) -> Result<Self> {
        MachineType::ALL
            .iter()
            .copied()
            .find(|t| t.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| DomainError::Validation(format!("unknown machine type: {s}")))
    }
}

impl FromStr for MachineStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "online" => Ok(MachineStatus::Online),
            "offline" => Ok(MachineStatus::Offline),
            "maintenance" => Ok(MachineStatus::Maintenance),
            _ => Err(DomainError::Validation(format!("unknown machine status: {s}"))),
        }
    }
}

impl FromStr for HealthStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "excellent" => Ok(HealthStatus::Excellent),
            "good" => Ok(HealthStatus::Good),
            "warning" => Ok(HealthStatus::Warning),
            "critical" => Ok(HealthStatus::Critical),
            _ => Err(DomainError::Validation(format!("unknown health status: {s}"))),
        }
    }
}

/// A monitored machine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Machine {
    /// Unique machine identifier
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub machine_type: MachineType,
    pub status: MachineStatus,
    pub health_status: HealthStatus,
    pub location: String,
    pub last_maintenance: NaiveDate,
    pub next_maintenance: NaiveDate,
    /// Total operating hours; only grows in practice but operators may edit it
    pub operating_hours: u32,
    /// Efficiency percentage (0-100)
    pub efficiency: u8,
    /// Temperature in °C
    pub temperature: f64,
    /// Pressure in bar
    pub pressure: f64,
    /// Vibration in mm/s
    pub vibration: f64,
}

/// Partial machine update
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MachinePatch {
    pub name: Option<String>,
    pub status: Option<MachineStatus>,
    pub health_status: Option<HealthStatus>,
    pub location: Option<String>,
    pub last_maintenance: Option<NaiveDate>,
    pub next_maintenance: Option<NaiveDate>,
    pub operating_hours: Option<u32>,
    pub efficiency: Option<u8>,
    pub temperature: Option<f64>,
    pub pressure: Option<f64>,
    pub vibration: Option<f64>,
}

impl Entity for Machine {
    type Id = String;
    type Patch = MachinePatch;
    const KIND: &'static str = "machine";

    fn id(&self) -> &String {
        &self.id
    }

    fn apply_patch(&mut self, patch: MachinePatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(health) = patch.health_status {
            self.health_status = health;
        }
        if let Some(location) = patch.location {
            self.location = location;
        }
        if let Some(date) = patch.last_maintenance {
            self.last_maintenance = date;
        }
        if let Some(date) = patch.next_maintenance {
            self.next_maintenance = date;
        }
        if let Some(hours) = patch.operating_hours {
            self.operating_hours = hours;
        }
        if let Some(efficiency) = patch.efficiency {
            self.efficiency = efficiency.min(100);
        }
        if let Some(temperature) = patch.temperature {
            self.temperature = temperature;
        }
        if let Some(pressure) = patch.pressure {
            self.pressure = pressure;
        }
        if let Some(vibration) = patch.vibration {
            self.vibration = vibration;
        }
    }
}

impl Record for Machine {
    fn field(&self, name: &str) -> Option<Cow<'_, str>> {
        match name {
            "id" => Some(Cow::Borrowed(&self.id)),
            "name" => Some(Cow::Borrowed(&self.name)),
            "type" => Some(Cow::Borrowed(self.machine_type.label())),
            "status" => Some(Cow::Borrowed(self.status.as_str())),
            "healthStatus" => Some(Cow::Borrowed(self.health_status.as_str())),
            "location" => Some(Cow::Borrowed(&self.location)),
            _ => None,
        }
    }
}

/// Exact-match filters offered by the machines view. `None` means "all".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MachineFilters {
    pub machine_type: Option<MachineType>,
    pub status: Option<MachineStatus>,
    pub health_status: Option<HealthStatus>,
    pub location: Option<String>,
}

impl MachineFilters {
    /// Clear every filter back to "all"
    pub fn reset(&mut self) {
        *self = MachineFilters::default();
    }

    /// Translate into engine field filters
    pub fn to_field_filters(&self) -> FieldFilters {
        let mut filters = FieldFilters::new();
        filters.set("type", self.machine_type.map(|t| t.label().to_string()));
        filters.set("status", self.status.map(|s| s.as_str().to_string()));
        filters.set(
            "healthStatus",
            self.health_status.map(|h| h.as_str().to_string()),
        );
        filters.set("location", self.location.clone());
        filters
    }
}

/// Headline numbers for the machines overview
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FleetSummary {
    pub total: usize,
    pub online: usize,
    pub critical: usize,
    /// Rounded mean efficiency, 0 for an empty fleet
    pub average_efficiency: u32,
    /// Rounded share of machines online, 0 for an empty fleet
    pub operational_percent: u32,
}

/// Result of a performance analysis request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceReport {
    pub machine_id: String,
    pub name: String,
    pub efficiency: u8,
    pub message: String,
}

/// Machine registry over an entity store
#[derive(Debug, Clone)]
pub struct MachineRegistry<S = InMemoryStore<Machine>> {
    store: S,
}

impl MachineRegistry<InMemoryStore<Machine>> {
    /// Registry over an in-memory store seeded with `machines`
    pub fn with_machines(machines: Vec<Machine>) -> Self {
        Self::new(InMemoryStore::with_records(machines))
    }
}

impl<S: EntityStore<Machine>> MachineRegistry<S> {
    /// Create a registry over the given store
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// All machines in seed order
    pub fn all(&self) -> &[Machine] {
        self.store.all()
    }

    /// Look up a machine
    pub fn get(&self, id: &str) -> Option<&Machine> {
        self.store.find(&id.to_string())
    }

    /// Look up a machine, failing with NotFound for the detail view
    pub fn detail(&self, id: &str) -> Result<&Machine> {
        self.get(id)
            .ok_or_else(|| DomainError::not_found(Machine::KIND, id))
    }

    /// Merge a partial update; unknown ids are ignored
    pub fn update(&mut self, id: &str, patch: MachinePatch) -> bool {
        self.store.update(&id.to_string(), patch)
    }

    /// Toggle online/offline. Returns the new status, `None` for unknown ids.
    pub fn toggle_status(&mut self, id: &str) -> Option<MachineStatus> {
        let mut new_status = None;
        self.store.modify(&id.to_string(), |machine| {
            machine.status = machine.status.toggled();
            new_status = Some(machine.status);
        });

        if let Some(status) = new_status {
            tracing::info!(machine_id = id, status = %status, "machine status toggled");
        }
        new_status
    }

    /// Put a machine into maintenance regardless of its current status
    pub fn schedule_maintenance(&mut self, id: &str) -> bool {
        let scheduled = self.store.modify(&id.to_string(), |machine| {
            machine.status = MachineStatus::Maintenance;
        });
        if scheduled {
            tracing::info!(machine_id = id, "maintenance scheduled");
        }
        scheduled
    }

    /// Summarise one machine's efficiency
    pub fn analyze_performance(&self, id: &str) -> Result<PerformanceReport> {
        let machine = self.detail(id)?;
        Ok(PerformanceReport {
            machine_id: machine.id.clone(),
            name: machine.name.clone(),
            efficiency: machine.efficiency,
            message: format!(
                "Analyzing {}... Efficiency: {}%",
                machine.name, machine.efficiency
            ),
        })
    }

    /// Visible machines for a search text and filters
    pub fn visible(&self, search: &str, filters: &MachineFilters) -> Vec<&Machine> {
        let query = SearchQuery::new(search, MACHINE_SEARCH_FIELDS);
        filter_records(self.store.all(), &query, &filters.to_field_filters())
    }

    /// Distinct locations in first-seen order, for filter option lists
    pub fn distinct_locations(&self) -> Vec<&str> {
        let mut locations: Vec<&str> = Vec::new();
        for machine in self.store.all() {
            if !locations.contains(&machine.location.as_str()) {
                locations.push(&machine.location);
            }
        }
        locations
    }

    /// Overview numbers
    pub fn summary(&self) -> FleetSummary {
        let machines = self.store.all();
        let total = machines.len();
        let online = machines
            .iter()
            .filter(|m| m.status == MachineStatus::Online)
            .count();
        let critical = machines
            .iter()
            .filter(|m| m.health_status == HealthStatus::Critical)
            .count();

        let (average_efficiency, operational_percent) = if total == 0 {
            (0, 0)
        } else {
            let sum: u32 = machines.iter().map(|m| u32::from(m.efficiency)).sum();
            (
                (f64::from(sum) / total as f64).round() as u32,
                (online as f64 / total as f64 * 100.0).round() as u32,
            )
        };

        FleetSummary {
            total,
            online,
            critical,
            average_efficiency,
            operational_percent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;
    use proptest::prelude::*;

    fn registry() -> MachineRegistry {
        MachineRegistry::with_machines(seed::machines())
    }

    #[test]
    fn test_toggle_twice_restores_machine() {
        let mut registry = registry();
        let original = registry.get("1").unwrap().clone();
        assert_eq!(original.status, MachineStatus::Online);

        assert_eq!(registry.toggle_status("1"), Some(MachineStatus::Offline));
        assert_eq!(registry.toggle_status("1"), Some(MachineStatus::Online));
        assert_eq!(registry.get("1").unwrap(), &original);
    }

    #[test]
    fn test_toggle_from_maintenance_goes_online() {
        let mut registry = registry();
        assert_eq!(registry.get("4").unwrap().status, MachineStatus::Maintenance);
        assert_eq!(registry.toggle_status("4"), Some(MachineStatus::Online));
    }

    #[test]
    fn test_toggle_unknown_machine() {
        let mut registry = registry();
        assert_eq!(registry.toggle_status("99"), None);
    }

    #[test]
    fn test_schedule_maintenance_keeps_health() {
        let mut registry = registry();
        assert!(registry.schedule_maintenance("3"));
        let machine = registry.get("3").unwrap();
        assert_eq!(machine.status, MachineStatus::Maintenance);
        assert_eq!(machine.health_status, HealthStatus::Critical);
        assert!(!registry.schedule_maintenance("99"));
    }

    #[test]
    fn test_analyze_performance() {
        let registry = registry();
        let report = registry.analyze_performance("2").unwrap();
        assert_eq!(report.efficiency, 94);
        assert_eq!(report.message, "Analyzing Belt Conveyor B2... Efficiency: 94%");

        let err = registry.analyze_performance("99").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_search_and_filters() {
        let registry = registry();
        let filters = MachineFilters::default();

        assert_eq!(registry.visible("", &filters).len(), 8);
        assert_eq!(registry.visible("LOADER", &filters), registry.visible("loader", &filters));
        assert_eq!(registry.visible("sector a", &filters).len(), 2);

        let filters = MachineFilters {
            status: Some(MachineStatus::Online),
            location: Some("Sector B".to_string()),
            ..MachineFilters::default()
        };
        let visible = registry.visible("", &filters);
        let ids: Vec<&str> = visible.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["2", "6"]);
    }

    #[test]
    fn test_filter_by_type_with_multiword_label() {
        let registry = registry();
        let filters = MachineFilters {
            machine_type: Some(MachineType::HaulTruck),
            ..MachineFilters::default()
        };
        let visible = registry.visible("", &filters);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].name, "Haul Truck H1");
    }

    #[test]
    fn test_reset_filters() {
        let mut filters = MachineFilters {
            health_status: Some(HealthStatus::Critical),
            ..MachineFilters::default()
        };
        filters.reset();
        assert_eq!(filters, MachineFilters::default());
        assert_eq!(filters.to_field_filters().active_count(), 0);
    }

    #[test]
    fn test_summary() {
        let summary = registry().summary();
        assert_eq!(summary.total, 8);
        assert_eq!(summary.online, 5);
        assert_eq!(summary.critical, 1);
        // (87 + 94 + 45 + 72 + 82 + 91 + 78 + 85) / 8 = 79.25
        assert_eq!(summary.average_efficiency, 79);
        assert_eq!(summary.operational_percent, 63);
    }

    #[test]
    fn test_summary_empty_fleet() {
        let summary = MachineRegistry::with_machines(Vec::new()).summary();
        assert_eq!(summary.total, 0);
        assert_eq!(summary.average_efficiency, 0);
        assert_eq!(summary.operational_percent, 0);
    }

    #[test]
    fn test_distinct_locations() {
        let registry = registry();
        assert_eq!(
            registry.distinct_locations(),
            vec!["Sector A", "Sector B", "Sector C", "Sector D"]
        );
    }

    #[test]
    fn test_patch_update() {
        let mut registry = registry();
        let patch = MachinePatch {
            operating_hours: Some(3000),
            efficiency: Some(120),
            ..MachinePatch::default()
        };
        assert!(registry.update("1", patch.clone()));
        let machine = registry.get("1").unwrap();
        assert_eq!(machine.operating_hours, 3000);
        assert_eq!(machine.efficiency, 100);
        assert!(!registry.update("99", patch));
    }

    #[test]
    fn test_machine_json_shape() {
        let machine = registry().get("2").unwrap().clone();
        let json = serde_json::to_value(&machine).unwrap();
        assert_eq!(json["type"], "Belt Conveyor");
        assert_eq!(json["healthStatus"], "excellent");
        assert_eq!(json["lastMaintenance"], "2024-07-01");
    }

    #[test]
    fn test_parse_filter_values() {
        assert_eq!("haul truck".parse::<MachineType>().unwrap(), MachineType::HaulTruck);
        assert_eq!("Online".parse::<MachineStatus>().unwrap(), MachineStatus::Online);
        assert_eq!("critical".parse::<HealthStatus>().unwrap(), HealthStatus::Critical);
        assert!("rover".parse::<MachineType>().is_err());
    }

    fn arb_status() -> impl Strategy<Value = MachineStatus> {
        prop::sample::select(vec![
            MachineStatus::Online,
            MachineStatus::Offline,
            MachineStatus::Maintenance,
        ])
    }

    /// Seeded fleet with every status replaced by a generated one
    fn arb_fleet() -> impl Strategy<Value = Vec<Machine>> {
        let size = seed::machines().len();
        prop::collection::vec(arb_status(), size).prop_map(|statuses| {
            seed::machines()
                .into_iter()
                .zip(statuses)
                .map(|(mut machine, status)| {
                    machine.status = status;
                    machine
                })
                .collect()
        })
    }

    proptest! {
        #[test]
        fn toggling_twice_restores_online_and_offline_machines(
            fleet in arb_fleet(),
            index in 0usize..8,
        ) {
            let mut registry = MachineRegistry::with_machines(fleet.clone());
            let id = fleet[index].id.clone();

            registry.toggle_status(&id);
            let second = registry.toggle_status(&id);

            if fleet[index].status == MachineStatus::Maintenance {
                prop_assert_eq!(second, Some(MachineStatus::Offline));
            } else {
                prop_assert_eq!(registry.all(), fleet.as_slice());
            }

            // Other machines never change
            for (after, before) in registry.all().iter().zip(&fleet) {
                if after.id != id {
                    prop_assert_eq!(after, before);
                }
            }
        }

        #[test]
        fn toggle_only_changes_status(fleet in arb_fleet(), index in 0usize..8) {
            let mut registry = MachineRegistry::with_machines(fleet.clone());
            let id = fleet[index].id.clone();

            let status = registry.toggle_status(&id);
            prop_assert_eq!(status, Some(fleet[index].status.toggled()));

            let mut expected = fleet[index].clone();
            expected.status = fleet[index].status.toggled();
            prop_assert_eq!(registry.get(&id), Some(&expected));
        }
    }
}
