// ── Service status and severity ──

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// Health of a single service.
///
/// Variants are declared from least to most severe, so the derived `Ord`
/// reads naturally: `a > b` means `a` is worse than `b`.
///
/// `degraded` is accepted on input as a legacy spelling of
/// `degraded_performance`; it is never produced.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ServiceStatus {
    #[default]
    Operational,
    Maintenance,
    #[serde(alias = "degraded")]
    #[strum(to_string = "degraded_performance", serialize = "degraded")]
    DegradedPerformance,
    PartialOutage,
    MajorOutage,
}

impl ServiceStatus {
    /// Short human label, as shown next to a service.
    pub fn label(self) -> &'static str {
        match self {
            Self::Operational => "Operational",
            Self::Maintenance => "Maintenance",
            Self::DegradedPerformance => "Degraded",
            Self::PartialOutage => "Partial Outage",
            Self::MajorOutage => "Major Outage",
        }
    }

    /// Banner sentence for a page whose overall status is `self`.
    pub fn headline(self) -> &'static str {
        match self {
            Self::Operational => "All systems operational",
            Self::Maintenance => "Scheduled maintenance in progress",
            Self::DegradedPerformance => "Some systems experiencing degraded performance",
            Self::PartialOutage => "Some systems experiencing a partial outage",
            Self::MajorOutage => "Major system outage in progress",
        }
    }
}

/// Impact classification of an incident.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Severity {
    #[default]
    Minor,
    Major,
    Critical,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn severity_order_matches_declaration() {
        let ordered: Vec<_> = ServiceStatus::iter().collect();
        let mut sorted = ordered.clone();
        sorted.sort();
        assert_eq!(ordered, sorted);
        assert!(ServiceStatus::MajorOutage > ServiceStatus::PartialOutage);
        assert!(ServiceStatus::DegradedPerformance > ServiceStatus::Maintenance);
        assert!(ServiceStatus::Maintenance > ServiceStatus::Operational);
    }

    #[test]
    fn degraded_alias_parses_but_never_serializes() {
        let from_serde: ServiceStatus = serde_json::from_str(r#""degraded""#).unwrap();
        let from_str: ServiceStatus = "degraded".parse().unwrap();
        assert_eq!(from_serde, ServiceStatus::DegradedPerformance);
        assert_eq!(from_str, ServiceStatus::DegradedPerformance);
        assert_eq!(from_str.to_string(), "degraded_performance");
        assert_eq!(
            serde_json::to_string(&from_serde).unwrap(),
            r#""degraded_performance""#
        );
    }

    #[test]
    fn unknown_status_is_rejected() {
        assert!("on_fire".parse::<ServiceStatus>().is_err());
        assert!(serde_json::from_str::<ServiceStatus>(r#""on_fire""#).is_err());
    }

    #[test]
    fn severity_round_trips_through_strings() {
        assert_eq!("critical".parse::<Severity>().unwrap(), Severity::Critical);
        assert_eq!(Severity::Major.to_string(), "major");
    }
}
