use anyhow::{Context, Result};
use std::env;
use std::fs;
use std::str::FromStr;
use tracing::info;

/// Retrieve some environment variable value by its name. Also checks if the environment variable
/// value is in some file, the path to which is retrieved from an environment variable by the
/// given name concatenated with `_FILE`.
///
/// Returns [Result::Ok()] if a value is successfully retrieved from either environment variable;
/// returns [Result::Err()] otherwise. The value is trimmed either way.
pub fn get_env_var(name: &str) -> Result<String> {
    let value = match env::var(name) {
        Ok(s) => s,
        Err(e) => get_from_file(name).with_context(|| {
            format!(
                "Could not find a value for {} nor for {}_FILE. Original Error: {:?}",
                name, name, e
            )
        })?,
    };
    Ok(value.trim().to_string())
}

/// Like [get_env_var], but falls back to `default` when neither variable is set.
pub fn get_env_var_or(name: &str, default: &str) -> String {
    match get_env_var(name) {
        Ok(v) if !v.is_empty() => v,
        _ => {
            info!(
                "No value found for {}, using the default value {}.",
                name, default
            );
            String::from(default)
        }
    }
}

/// Retrieve and parse some environment variable, falling back to `default` when it is not set.
///
/// A value that is present but cannot be parsed is an error rather than a silent fallback.
pub fn parse_env_var_or<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match get_env_var(name) {
        Ok(v) if !v.is_empty() => v
            .parse::<T>()
            .with_context(|| format!("Failed to parse \"{}\" as a valid value for {}.", v, name)),
        _ => Ok(default),
    }
}

fn get_from_file(name: &str) -> Result<String> {
    let path = env::var(format!("{}_FILE", name))?;
    Ok(fs::read_to_string(path)?)
}

pub mod variables {
    pub use crate::environment_variables::*;
}
