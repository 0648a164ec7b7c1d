//! Doctor portal views: fetch a patient's records, order them, paginate.

use std::cmp::Reverse;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

use super::paginate::{page_param, Page, PaginationError, Paginator};
use super::{
    AutomaticPeritonealDialysis, DailyHealthStatus, DailyIntakesReport, DoctorId, PatientId,
    PatientProfile, ReportRepository,
};
use crate::metrics::MetricsClient;
use crate::url_params::UrlParamsError;

/// Gauge recorded once per rendered portal view.
pub const PAGE_VIEW_METRIC: &str = "nephrogo.doctor.page_view";

#[derive(Debug, Error)]
pub enum PortalError {
    /// The doctor is not linked to a patient; shown as the "no associated patient" page.
    #[error("doctor {0} has no associated patient")]
    NoAssociatedPatient(DoctorId),
    #[error(transparent)]
    Pagination(#[from] PaginationError),
    #[error(transparent)]
    Url(#[from] UrlParamsError),
    #[error(transparent)]
    Repository(#[from] anyhow::Error),
}

/// Highlighted sidebar entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    Summary,
    Nutrition,
    HealthStatus,
    AutomaticDialysis,
}

impl MenuItem {
    pub fn as_str(self) -> &'static str {
        match self {
            MenuItem::Summary => "summary",
            MenuItem::Nutrition => "nutrition",
            MenuItem::HealthStatus => "health_status",
            MenuItem::AutomaticDialysis => "automatic_dialysis",
        }
    }
}

impl fmt::Display for MenuItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct SummaryContext {
    pub active_menu_item: MenuItem,
    pub patient: PatientId,
    pub patient_profile: Option<PatientProfile>,
    /// Days with at least one intake, newest first.
    pub nutrition_reports: Vec<DailyIntakesReport>,
}

#[derive(Debug, Clone)]
pub struct ListContext<T> {
    pub active_menu_item: MenuItem,
    pub page: Page<T>,
    pub next_url: Option<String>,
    pub previous_url: Option<String>,
}

pub struct DoctorPortal<R> {
    repo: R,
    metrics: Arc<dyn MetricsClient>,
    paginator: Paginator,
}

impl<R: ReportRepository> DoctorPortal<R> {
    pub fn new(repo: R, metrics: Arc<dyn MetricsClient>, paginate_by: usize) -> Self {
        Self {
            repo,
            metrics,
            paginator: Paginator::new(paginate_by),
        }
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    pub fn summary(&self, doctor: DoctorId) -> Result<SummaryContext, PortalError> {
        let patient = self.patient(doctor)?;
        let nutrition_reports = self.reports_with_intakes(patient)?;
        let patient_profile = self.repo.patient_profile(patient)?;
        self.record_view(MenuItem::Summary);
        Ok(SummaryContext {
            active_menu_item: MenuItem::Summary,
            patient,
            patient_profile,
            nutrition_reports,
        })
    }

    pub fn nutrition(
        &self,
        doctor: DoctorId,
        request_url: &str,
    ) -> Result<ListContext<DailyIntakesReport>, PortalError> {
        let patient = self.patient(doctor)?;
        let reports = self.reports_with_intakes(patient)?;
        self.list(MenuItem::Nutrition, reports, request_url)
    }

    pub fn health_status(
        &self,
        doctor: DoctorId,
        request_url: &str,
    ) -> Result<ListContext<DailyHealthStatus>, PortalError> {
        let patient = self.patient(doctor)?;
        let mut statuses = self.repo.health_statuses(patient)?;
        statuses.sort_by_key(|s| Reverse(s.date));
        self.list(MenuItem::HealthStatus, statuses, request_url)
    }

    pub fn automatic_dialysis(
        &self,
        doctor: DoctorId,
        request_url: &str,
    ) -> Result<ListContext<AutomaticPeritonealDialysis>, PortalError> {
        let patient = self.patient(doctor)?;
        let mut dialyses = self.repo.automatic_dialyses(patient)?;
        dialyses.sort_by_key(|d| Reverse(d.started_at));
        self.list(MenuItem::AutomaticDialysis, dialyses, request_url)
    }

    fn patient(&self, doctor: DoctorId) -> Result<PatientId, PortalError> {
        self.repo
            .patient_for_doctor(doctor)?
            .ok_or(PortalError::NoAssociatedPatient(doctor))
    }

    fn reports_with_intakes(&self, patient: PatientId) -> Result<Vec<DailyIntakesReport>, PortalError> {
        let mut reports = self.repo.nutrition_reports(patient)?;
        reports.retain(DailyIntakesReport::has_intakes);
        reports.sort_by_key(|r| Reverse(r.date));
        Ok(reports)
    }

    fn list<T>(
        &self,
        item: MenuItem,
        items: Vec<T>,
        request_url: &str,
    ) -> Result<ListContext<T>, PortalError> {
        let raw_page = page_param(request_url);
        let page = self.paginator.page(items, raw_page.as_deref())?;
        let next_url = page.next_url(request_url)?;
        let previous_url = page.previous_url(request_url)?;
        self.record_view(item);
        Ok(ListContext {
            active_menu_item: item,
            page,
            next_url,
            previous_url,
        })
    }

    fn record_view(&self, item: MenuItem) {
        let tags = [format!("section:{item}")];
        if let Err(err) = self.metrics.gauge(PAGE_VIEW_METRIC, 1.0, &tags) {
            tracing::warn!(section = %item, error = %err, "failed to record page view");
        }
    }
}
