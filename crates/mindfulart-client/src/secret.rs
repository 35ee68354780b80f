//! Museum API key resolution.
//!
//! A key given in `config.toml` or on the command line is one of:
//!
//! - `pass::path/in/store`: first line of `pass show path/in/store`
//! - `env::VAR_NAME`: the value of `$VAR_NAME`
//! - anything else: the key itself
//!
//! A key that resolves to blank text counts as not configured, so the
//! provider reports its missing-key warning instead of sending an empty key.

use std::process::{Command, ExitStatus};

use thiserror::Error;

/// A key reference could not be resolved.
#[derive(Debug, Error)]
pub enum SecretError {
    #[error("{museum} API key: environment variable `{var}` is not set")]
    MissingEnv { museum: &'static str, var: String },

    #[error("{museum} API key: could not run `pass show {path}`: {source}")]
    PassUnavailable {
        museum: &'static str,
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{museum} API key: `pass show {path}` failed ({status}): {stderr}")]
    PassFailed {
        museum: &'static str,
        path: String,
        status: ExitStatus,
        stderr: String,
    },
}

/// Where an API key comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyRef<'a> {
    Pass(&'a str),
    Env(&'a str),
    Literal(&'a str),
}

impl<'a> KeyRef<'a> {
    pub fn parse(raw: &'a str) -> Self {
        if let Some(path) = raw.strip_prefix("pass::") {
            Self::Pass(path)
        } else if let Some(var) = raw.strip_prefix("env::") {
            Self::Env(var)
        } else {
            Self::Literal(raw)
        }
    }

    fn lookup(self, museum: &'static str) -> Result<String, SecretError> {
        match self {
            Self::Literal(key) => Ok(key.to_string()),
            Self::Env(var) => std::env::var(var).map_err(|_| SecretError::MissingEnv {
                museum,
                var: var.to_string(),
            }),
            Self::Pass(path) => pass_first_line(museum, path),
        }
    }
}

/// Resolves the API key for `museum`. The command-line value wins over the
/// configured one; `Ok(None)` means no usable key.
pub fn resolve_api_key(
    museum: &'static str,
    from_cli: Option<&str>,
    configured: Option<&str>,
) -> Result<Option<String>, SecretError> {
    let Some(raw) = from_cli.or(configured) else {
        return Ok(None);
    };
    let key = KeyRef::parse(raw).lookup(museum)?;
    let key = key.trim();
    Ok((!key.is_empty()).then(|| key.to_string()))
}

fn pass_first_line(museum: &'static str, path: &str) -> Result<String, SecretError> {
    let output = Command::new("pass")
        .arg("show")
        .arg(path)
        .output()
        .map_err(|source| SecretError::PassUnavailable {
            museum,
            path: path.to_string(),
            source,
        })?;

    if !output.status.success() {
        return Err(SecretError::PassFailed {
            museum,
            path: path.to_string(),
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    // An empty entry is treated like a blank key.
    let stdout = String::from_utf8_lossy(&output.stdout);
    Ok(stdout.lines().next().unwrap_or_default().to_string())
}
