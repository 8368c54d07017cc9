//! The `cfg` command: prints the resolved configuration as JSON.
//!
//! ```json
//! {
//!   "seed": { "value": 42, "source": "env" },
//!   "history": { "value": null, "source": "default" }
//! }
//! ```

use crate::config::ConfigResolved;
use crate::error::CliError;
use std::io::Write;

pub fn handle_cfg_command(resolved: &ConfigResolved, out: &mut dyn Write) -> Result<(), CliError> {
    let ConfigResolved { config, sources } = resolved;
    let display = serde_json::json!({
        "seed": {
            "value": config.seed,
            "source": sources.seed,
        },
        "history": {
            "value": config.history,
            "source": sources.history,
        },
    });
    let json_str = serde_json::to_string_pretty(&display).map_err(std::io::Error::other)?;
    writeln!(out, "{}", json_str)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, ConfigSources, ValueSource};
    use std::path::PathBuf;

    #[test]
    fn prints_values_with_sources() {
        let resolved = ConfigResolved {
            config: Config {
                seed: Some(42),
                history: Some(PathBuf::from("rounds.jsonl")),
            },
            sources: ConfigSources {
                seed: ValueSource::Env,
                history: ValueSource::Cli,
            },
        };
        let mut out = Vec::new();
        handle_cfg_command(&resolved, &mut out).unwrap();

        let json: serde_json::Value = serde_json::from_slice(&out).expect("valid JSON");
        assert_eq!(json["seed"]["value"], 42);
        assert_eq!(json["seed"]["source"], "env");
        assert_eq!(json["history"]["value"], "rounds.jsonl");
        assert_eq!(json["history"]["source"], "cli");
    }

    #[test]
    fn defaults_print_as_null() {
        let resolved = ConfigResolved {
            config: Config::default(),
            sources: ConfigSources::default(),
        };
        let mut out = Vec::new();
        handle_cfg_command(&resolved, &mut out).unwrap();

        let output = String::from_utf8(out).unwrap();
        let json: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert!(json["seed"]["value"].is_null());
        assert_eq!(json["history"]["source"], "default");
        assert!(output.contains('\n'), "output should be pretty-printed");
    }
}
