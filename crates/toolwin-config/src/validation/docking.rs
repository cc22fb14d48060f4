//! Docking section validation (weights, floating size, fetch deadline).

use crate::schema::DockingConfig;

use super::helpers::Violations;

pub(crate) fn validate_docking(v: &mut Violations, docking: &DockingConfig) {
    v.fraction("docking.default_weight", docking.default_weight, 1.0);
    v.fraction("docking.default_side_weight", docking.default_side_weight, 0.95);
    v.fraction("docking.min_weight", docking.min_weight, 0.5);
    if docking.min_weight > docking.default_weight {
        v.push(format!(
            "docking.min_weight = {} exceeds docking.default_weight = {}",
            docking.min_weight, docking.default_weight
        ));
    }
    v.within("docking.default_floating_width", docking.default_floating_width, 50.0, 10_000.0);
    v.within("docking.default_floating_height", docking.default_floating_height, 50.0, 10_000.0);
    v.within("docking.resource_fetch_timeout_ms", docking.resource_fetch_timeout_ms, 50, 10_000);
}
