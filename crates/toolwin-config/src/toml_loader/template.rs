//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> String {
    r##"# toolwin configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.

[docking]
# default_weight = 0.33             # (0, 1]
# default_side_weight = 0.5         # (0, 0.95]
# min_weight = 0.05                 # (0, 0.5]
# side_stack_enabled = true
# default_floating_width = 400.0
# default_floating_height = 300.0
# resource_fetch_timeout_ms = 500   # 50-10000

[stripes]
# thickness = 40.0                  # 16-80
# button_length = 40.0              # 16-200
# button_gap = 4.0                  # 0-20
# collapsed_drop_width = 20.0       # 0-80

[logging]
level = "info"
"##
    .to_string()
}
