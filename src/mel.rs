//! MEL command-line construction for the Maya command port.
//!
//! The command port speaks single newline-terminated ASCII lines with no
//! further framing. This module builds and validates those lines so that
//! whatever reaches the wire is always exactly one well-formed command.

use anyhow::{anyhow, Result};

/// A single validated MEL command line, ready to be sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MelCommand(String);

impl MelCommand {
    /// Build a `loadPlugin("<path>")` command for a plugin binary.
    ///
    /// Backslashes are normalized to forward slashes (Maya accepts forward
    /// slashes on every platform) and any double quotes left in the path are
    /// escaped so the MEL string literal stays intact.
    pub fn load_plugin(path: &str) -> Result<Self> {
        let path = path.trim();
        if path.is_empty() {
            return Err(anyhow!("Plugin path is empty"));
        }
        let normalized = path.replace('\\', "/").replace('"', "\\\"");
        Self::raw(&format!("loadPlugin(\"{}\")", normalized))
    }

    /// Wrap an arbitrary MEL command line, rejecting anything that cannot
    /// travel as a single ASCII line.
    pub fn raw(command: &str) -> Result<Self> {
        let command = command.trim_end_matches(['\r', '\n']);
        if command.trim().is_empty() {
            return Err(anyhow!("Command is empty"));
        }
        if command.contains('\n') || command.contains('\r') {
            return Err(anyhow!(
                "Command must be a single line; the command port has no multi-line framing"
            ));
        }
        if !command.is_ascii() {
            return Err(anyhow!(
                "Command contains non-ASCII characters; the command port expects ASCII"
            ));
        }
        Ok(Self(command.to_string()))
    }

    /// The command text without the line terminator.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Encode the command as wire bytes: the ASCII line plus `\n`.
    pub fn encode(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.0.len() + 1);
        bytes.extend_from_slice(self.0.as_bytes());
        bytes.push(b'\n');
        bytes
    }
}

impl std::fmt::Display for MelCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_plugin_literal() {
        let cmd = MelCommand::load_plugin("C:/Users/dev/build/x64/Debug/Project.mll").unwrap();
        assert_eq!(
            cmd.as_str(),
            r#"loadPlugin("C:/Users/dev/build/x64/Debug/Project.mll")"#
        );
        assert_eq!(
            cmd.encode(),
            b"loadPlugin(\"C:/Users/dev/build/x64/Debug/Project.mll\")\n".to_vec()
        );
    }

    #[test]
    fn test_load_plugin_normalizes_backslashes() {
        let cmd = MelCommand::load_plugin(r"C:\Users\dev\plugin.mll").unwrap();
        assert_eq!(cmd.as_str(), r#"loadPlugin("C:/Users/dev/plugin.mll")"#);
    }

    #[test]
    fn test_load_plugin_escapes_quotes() {
        let cmd = MelCommand::load_plugin(r#"/tmp/odd"name.mll"#).unwrap();
        assert_eq!(cmd.as_str(), r#"loadPlugin("/tmp/odd\"name.mll")"#);
    }

    #[test]
    fn test_load_plugin_rejects_empty_path() {
        assert!(MelCommand::load_plugin("   ").is_err());
    }

    #[test]
    fn test_raw_strips_trailing_newline() {
        let cmd = MelCommand::raw("polyCube;\n").unwrap();
        assert_eq!(cmd.as_str(), "polyCube;");
        assert_eq!(cmd.encode(), b"polyCube;\n");
    }

    #[test]
    fn test_raw_rejects_interior_newline() {
        assert!(MelCommand::raw("polyCube;\npolySphere;").is_err());
    }

    #[test]
    fn test_raw_rejects_non_ascii() {
        assert!(MelCommand::raw("print \"héllo\"").is_err());
    }

    #[test]
    fn test_raw_rejects_empty() {
        assert!(MelCommand::raw("\n").is_err());
    }
}
