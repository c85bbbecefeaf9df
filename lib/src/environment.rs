use std::env;
use std::str::FromStr;
use tracing::log::warn;

pub struct Environment;

impl Environment {
    pub fn string(
        env_name: &str,
        default: &str,
    ) -> String {
        env::var(env_name).ok().filter(|value| !value.trim().is_empty()).unwrap_or(default.to_string())
    }

    pub fn optional_string(env_name: &str) -> Option<String> {
        env::var(env_name).ok().filter(|value| !value.trim().is_empty())
    }

    pub fn u16(
        env_name: &str,
        default: u16,
    ) -> u16 {
        Self::parse(env_name, default)
    }

    pub fn u64(
        env_name: &str,
        default: u64,
    ) -> u64 {
        Self::parse(env_name, default)
    }

    pub fn usize(
        env_name: &str,
        default: usize,
    ) -> usize {
        Self::parse(env_name, default)
    }

    pub fn boolean(
        env_name: &str,
        default: bool,
    ) -> bool {
        Self::parse(env_name, default)
    }

    fn parse<T>(
        env_name: &str,
        default: T,
    ) -> T
    where
        T: FromStr + Copy + std::fmt::Display,
    {
        match env::var(env_name) {
            Ok(value) => value.trim().parse::<T>().unwrap_or_else(|_| {
                warn!("Invalid value '{value}' for {env_name}, falling back to {default}");
                default
            }),
            Err(_) => default,
        }
    }
}
