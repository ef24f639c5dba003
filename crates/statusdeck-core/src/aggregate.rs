// ── Status aggregation and grouping ──
//
// Pure functions over borrowed services. No I/O, no locking, safe to call
// from any context.

use std::collections::HashMap;

use serde::Serialize;

use crate::model::{EntityId, Service, ServiceGroup, ServiceStatus};

/// Reduce a set of statuses to one headline status.
///
/// Any outage or degradation wins by severity. `maintenance` only wins when
/// every input is in maintenance; a single operational service pulls the
/// result back to `operational`. An empty input is `operational`.
pub fn aggregate_statuses<I>(statuses: I) -> ServiceStatus
where
    I: IntoIterator<Item = ServiceStatus>,
{
    let mut seen_any = false;
    let mut all_maintenance = true;
    let mut worst = ServiceStatus::Operational;

    for status in statuses {
        seen_any = true;
        match status {
            ServiceStatus::MajorOutage => return ServiceStatus::MajorOutage,
            ServiceStatus::Maintenance => {}
            other => {
                all_maintenance = false;
                worst = worst.max(other);
            }
        }
    }

    if worst > ServiceStatus::Maintenance {
        worst
    } else if seen_any && all_maintenance {
        ServiceStatus::Maintenance
    } else {
        ServiceStatus::Operational
    }
}

/// Overall status of a set of services.
pub fn aggregate_status<'a, I>(services: I) -> ServiceStatus
where
    I: IntoIterator<Item = &'a Service>,
{
    aggregate_statuses(services.into_iter().map(|s| s.status))
}

// ── Grouping ────────────────────────────────────────────────────────

/// Services belonging to one group.
#[derive(Debug, Clone, Serialize)]
pub struct GroupBucket<'a> {
    pub group: &'a ServiceGroup,
    pub services: Vec<&'a Service>,
}

impl GroupBucket<'_> {
    pub fn status(&self) -> ServiceStatus {
        aggregate_status(self.services.iter().copied())
    }
}

/// Every input service placed in exactly one bucket.
#[derive(Debug, Clone, Serialize)]
pub struct GroupedView<'a> {
    /// One bucket per group, in the order the groups were given.
    pub groups: Vec<GroupBucket<'a>>,
    pub ungrouped: Vec<&'a Service>,
}

impl GroupedView<'_> {
    /// Number of services across all buckets.
    pub fn service_count(&self) -> usize {
        self.groups.iter().map(|b| b.services.len()).sum::<usize>() + self.ungrouped.len()
    }
}

/// Bucket services by group.
///
/// A service goes to the group its own `group` field names, if that group
/// exists. Otherwise it goes to the first group whose member list contains
/// it. Anything left, including services pointing at unknown groups, lands
/// in `ungrouped`. Service order is preserved inside each bucket.
pub fn group_services<'a, S, G>(services: S, groups: G) -> GroupedView<'a>
where
    S: IntoIterator<Item = &'a Service>,
    G: IntoIterator<Item = &'a ServiceGroup>,
{
    let mut buckets: Vec<GroupBucket<'a>> = groups
        .into_iter()
        .map(|group| GroupBucket {
            group,
            services: Vec::new(),
        })
        .collect();

    let mut by_group_id: HashMap<&EntityId, usize> = HashMap::with_capacity(buckets.len());
    let mut by_member: HashMap<&EntityId, usize> = HashMap::new();
    for (idx, bucket) in buckets.iter().enumerate() {
        by_group_id.entry(&bucket.group.id).or_insert(idx);
        for member in &bucket.group.services {
            by_member.entry(member).or_insert(idx);
        }
    }

    let mut ungrouped = Vec::new();
    let mut placements = Vec::new();
    for service in services {
        let target = service
            .group
            .as_ref()
            .and_then(|g| by_group_id.get(g))
            .or_else(|| by_member.get(&service.id))
            .copied();
        match target {
            Some(idx) => placements.push((idx, service)),
            None => ungrouped.push(service),
        }
    }

    for (idx, service) in placements {
        if let Some(bucket) = buckets.get_mut(idx) {
            bucket.services.push(service);
        }
    }

    GroupedView {
        groups: buckets,
        ungrouped,
    }
}
