//! Patient records shown on the doctor portal, and the repository they come from.
//!
//! Storage is not part of this crate: the portal reads through
//! [`ReportRepository`]. [`MemoryRepository`] is the in-process implementation.

mod paginate;
mod portal;

use anyhow::Result;
use std::collections::HashMap;
use std::fmt;
use std::sync::RwLock;
use time::{Date, OffsetDateTime};

pub use paginate::{page_param, page_url, Page, PaginationError, Paginator, PAGE_PARAM};
pub use portal::{DoctorPortal, ListContext, MenuItem, PortalError, SummaryContext, PAGE_VIEW_METRIC};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DoctorId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PatientId(pub u64);

impl fmt::Display for DoctorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for PatientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Patient's own profile, shown beside the summary.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PatientProfile {
    pub date_of_birth: Option<Date>,
    pub height_cm: Option<u16>,
    pub weight_kg: Option<f64>,
    /// e.g. `stage3`.
    pub chronic_kidney_disease_stage: Option<String>,
    pub dialysis_type: Option<String>,
}

/// Nutrient sums over one day's intakes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NutrientTotals {
    pub energy_kcal: u32,
    pub proteins_mg: u32,
    pub sodium_mg: u32,
    pub potassium_mg: u32,
    pub phosphorus_mg: u32,
    pub liquids_ml: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DailyIntakesReport {
    pub date: Date,
    pub intakes_count: u32,
    pub totals: NutrientTotals,
}

impl DailyIntakesReport {
    pub fn has_intakes(&self) -> bool {
        self.intakes_count > 0
    }
}

/// Self-reported measurements for one day; every field is optional.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyHealthStatus {
    pub date: Date,
    pub systolic_blood_pressure: Option<u16>,
    pub diastolic_blood_pressure: Option<u16>,
    pub weight_kg: Option<f64>,
    pub glucose_mmol_l: Option<f64>,
    pub urine_ml: Option<u32>,
}

impl DailyHealthStatus {
    pub fn empty(date: Date) -> Self {
        Self {
            date,
            systolic_blood_pressure: None,
            diastolic_blood_pressure: None,
            weight_kg: None,
            glucose_mmol_l: None,
            urine_ml: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AutomaticPeritonealDialysis {
    pub started_at: OffsetDateTime,
    /// `None` while the session is still running.
    pub finished_at: Option<OffsetDateTime>,
}

/// Read access to the records of a doctor's patient.
pub trait ReportRepository: Send + Sync {
    fn patient_for_doctor(&self, doctor: DoctorId) -> Result<Option<PatientId>>;
    /// `None` until the patient fills in a profile.
    fn patient_profile(&self, patient: PatientId) -> Result<Option<PatientProfile>>;
    fn nutrition_reports(&self, patient: PatientId) -> Result<Vec<DailyIntakesReport>>;
    fn health_statuses(&self, patient: PatientId) -> Result<Vec<DailyHealthStatus>>;
    fn automatic_dialyses(&self, patient: PatientId) -> Result<Vec<AutomaticPeritonealDialysis>>;
}

#[derive(Debug, Default)]
struct MemoryState {
    doctors: HashMap<DoctorId, PatientId>,
    profiles: HashMap<PatientId, PatientProfile>,
    nutrition: HashMap<PatientId, Vec<DailyIntakesReport>>,
    health: HashMap<PatientId, Vec<DailyHealthStatus>>,
    dialyses: HashMap<PatientId, Vec<AutomaticPeritonealDialysis>>,
}

/// Thread-safe in-memory repository. Records come back in insertion order.
#[derive(Debug, Default)]
pub struct MemoryRepository {
    state: RwLock<MemoryState>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, MemoryState> {
        self.state.write().unwrap_or_else(|p| p.into_inner())
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, MemoryState> {
        self.state.read().unwrap_or_else(|p| p.into_inner())
    }

    pub fn assign_patient(&self, doctor: DoctorId, patient: PatientId) {
        self.write().doctors.insert(doctor, patient);
    }

    pub fn set_patient_profile(&self, patient: PatientId, profile: PatientProfile) {
        self.write().profiles.insert(patient, profile);
    }

    pub fn add_nutrition_report(&self, patient: PatientId, report: DailyIntakesReport) {
        self.write().nutrition.entry(patient).or_default().push(report);
    }

    pub fn add_health_status(&self, patient: PatientId, status: DailyHealthStatus) {
        self.write().health.entry(patient).or_default().push(status);
    }

    pub fn add_automatic_dialysis(&self, patient: PatientId, dialysis: AutomaticPeritonealDialysis) {
        self.write().dialyses.entry(patient).or_default().push(dialysis);
    }
}

impl ReportRepository for MemoryRepository {
    fn patient_for_doctor(&self, doctor: DoctorId) -> Result<Option<PatientId>> {
        Ok(self.read().doctors.get(&doctor).copied())
    }

    fn patient_profile(&self, patient: PatientId) -> Result<Option<PatientProfile>> {
        Ok(self.read().profiles.get(&patient).cloned())
    }

    fn nutrition_reports(&self, patient: PatientId) -> Result<Vec<DailyIntakesReport>> {
        Ok(self.read().nutrition.get(&patient).cloned().unwrap_or_default())
    }

    fn health_statuses(&self, patient: PatientId) -> Result<Vec<DailyHealthStatus>> {
        Ok(self.read().health.get(&patient).cloned().unwrap_or_default())
    }

    fn automatic_dialyses(&self, patient: PatientId) -> Result<Vec<AutomaticPeritonealDialysis>> {
        Ok(self.read().dialyses.get(&patient).cloned().unwrap_or_default())
    }
}
