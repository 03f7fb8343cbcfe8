//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> &'static str {
    r##"# Nyaya Configuration
# Only override what you want to change -- missing fields use defaults.

[model]
# name = "gemini-2.0-flash"
# max_tokens = 4096       # 1-8192
# temperature = 0.7       # 0.0-2.0

[assistant]
# Replaces the built-in legal-assistant persona prompt.
# system_prompt = "You are ..."

[storage]
# Directory for sessions.json. Defaults to the OS data directory.
# data_dir = "/home/you/.local/share/nyaya"
"##
}
