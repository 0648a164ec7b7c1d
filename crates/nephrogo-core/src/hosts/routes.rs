//! Doctor portal URL table (namespace `doctor`, mounted under `doctor/`).

/// Mount point of the doctor URL config on the doctor host.
pub const DOCTOR_PREFIX: &str = "/doctor/";

/// Namespace used in reversible route names (`doctor:nutrition`).
pub const DOCTOR_NAMESPACE: &str = "doctor";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DoctorRoute {
    /// Summary page.
    Index,
    Nutrition,
    HealthStatus,
}

impl DoctorRoute {
    pub const ALL: [DoctorRoute; 3] = [
        DoctorRoute::Index,
        DoctorRoute::Nutrition,
        DoctorRoute::HealthStatus,
    ];

    /// Route name inside the namespace.
    pub fn name(self) -> &'static str {
        match self {
            DoctorRoute::Index => "index",
            DoctorRoute::Nutrition => "nutrition",
            DoctorRoute::HealthStatus => "health_status",
        }
    }

    /// Path relative to [`DOCTOR_PREFIX`].
    fn suffix(self) -> &'static str {
        match self {
            DoctorRoute::Index => "",
            DoctorRoute::Nutrition => "nutrition/",
            DoctorRoute::HealthStatus => "health/",
        }
    }

    /// Absolute path on the doctor host, e.g. `/doctor/health/`.
    pub fn path(self) -> String {
        format!("{}{}", DOCTOR_PREFIX, self.suffix())
    }

    /// Looks up `doctor:<name>` (the namespace is required).
    pub fn from_qualified_name(qualified: &str) -> Option<Self> {
        let (namespace, name) = qualified.split_once(':')?;
        if namespace != DOCTOR_NAMESPACE {
            return None;
        }
        Self::ALL.into_iter().find(|r| r.name() == name)
    }

    /// Matches a request path exactly (trailing slash included).
    pub fn resolve(path: &str) -> Option<Self> {
        let suffix = path.strip_prefix(DOCTOR_PREFIX)?;
        Self::ALL.into_iter().find(|r| r.suffix() == suffix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths() {
        assert_eq!(DoctorRoute::Index.path(), "/doctor/");
        assert_eq!(DoctorRoute::Nutrition.path(), "/doctor/nutrition/");
        assert_eq!(DoctorRoute::HealthStatus.path(), "/doctor/health/");
    }

    #[test]
    fn resolve_paths() {
        assert_eq!(DoctorRoute::resolve("/doctor/"), Some(DoctorRoute::Index));
        assert_eq!(
            DoctorRoute::resolve("/doctor/health/"),
            Some(DoctorRoute::HealthStatus)
        );
        assert_eq!(DoctorRoute::resolve("/doctor/health"), None);
        assert_eq!(DoctorRoute::resolve("/doctor/unknown/"), None);
        assert_eq!(DoctorRoute::resolve("/nutrition/"), None);
    }

    #[test]
    fn qualified_names() {
        assert_eq!(
            DoctorRoute::from_qualified_name("doctor:health_status"),
            Some(DoctorRoute::HealthStatus)
        );
        assert_eq!(DoctorRoute::from_qualified_name("nutrition"), None);
        assert_eq!(DoctorRoute::from_qualified_name("api:nutrition"), None);
    }
}
