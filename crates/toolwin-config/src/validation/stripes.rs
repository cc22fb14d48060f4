//! Stripe geometry validation.

use crate::schema::StripesConfig;

use super::helpers::Violations;

pub(crate) fn validate_stripes(v: &mut Violations, stripes: &StripesConfig) {
    v.within("stripes.thickness", stripes.thickness, 16.0, 80.0);
    v.within("stripes.button_length", stripes.button_length, 16.0, 200.0);
    v.within("stripes.button_gap", stripes.button_gap, 0.0, 20.0);
    v.within("stripes.collapsed_drop_width", stripes.collapsed_drop_width, 0.0, 80.0);
}
