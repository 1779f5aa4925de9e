use std::{num::NonZeroUsize, path::PathBuf, str::FromStr};

use dotenvy::var;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use structstruck::strike;

use crate::types::{
    ParamDefaults, DEFAULT_LIMIT, DEFAULT_MAX_VISIBLE, MAX_LIMIT, MAX_VISIBLE_CAP,
};

pub static CONFIG: Lazy<Config> = Lazy::new(Config::new);

strike! {
    #[strikethrough[derive(Debug, Clone, Serialize, Deserialize)]]
    pub struct Config {
        pub paging:
            pub struct {
                pub default_limit: NonZeroUsize,
                pub max_limit: NonZeroUsize,
                pub max_visible: usize,
            }
        ,
        pub data_path: Option<PathBuf>,
        pub cache_ttl_secs: u64,
        pub cache_capacity: usize,
        pub max_views: usize,
        pub concurrency_limit: usize,
        pub port: u16,
        pub is_dev: bool,
    }
}

impl Default for Paging {
    fn default() -> Self {
        Paging {
            default_limit: DEFAULT_LIMIT,
            max_limit: MAX_LIMIT,
            max_visible: DEFAULT_MAX_VISIBLE,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            paging: Paging::default(),
            data_path: None,
            cache_ttl_secs: 10,
            cache_capacity: 1024,
            max_views: 64,
            concurrency_limit: 256,
            port: 8080,
            is_dev: false,
        }
    }
}

fn parsed_var<T: FromStr>(name: &str, default: T) -> T {
    var(name)
        .map(|value| {
            value
                .parse()
                .unwrap_or_else(|_| panic!("{} must be a valid number", name))
        })
        .unwrap_or(default)
}

/// Dev mode is opt-in: only `MODE=dev` enables it.
fn is_dev_mode(mode: Option<&str>) -> bool {
    mode == Some("dev")
}

impl Config {
    pub fn new() -> Self {
        let defaults = Config::default();
        let max_limit = parsed_var("MAX_LIMIT", defaults.paging.max_limit);
        Config {
            paging: Paging {
                default_limit: parsed_var("DEFAULT_LIMIT", defaults.paging.default_limit)
                    .min(max_limit),
                max_limit,
                max_visible: parsed_var("MAX_VISIBLE_PAGES", defaults.paging.max_visible)
                    .clamp(1, MAX_VISIBLE_CAP),
            },
            data_path: var("DATA_PATH").ok().map(PathBuf::from),
            cache_ttl_secs: parsed_var("CACHE_TTL_SECS", defaults.cache_ttl_secs),
            cache_capacity: parsed_var("CACHE_CAPACITY", defaults.cache_capacity).max(1),
            max_views: parsed_var("MAX_VIEWS", defaults.max_views).max(1),
            concurrency_limit: parsed_var("CONCURRENCY_LIMIT", defaults.concurrency_limit).max(1),
            port: parsed_var("PORT", defaults.port),
            is_dev: is_dev_mode(var("MODE").ok().as_deref()),
        }
    }

    pub fn param_defaults(&self) -> ParamDefaults {
        self.into()
    }
}

impl From<&Config> for ParamDefaults {
    fn from(val: &Config) -> Self {
        ParamDefaults {
            limit: val.paging.default_limit,
            max_limit: val.paging.max_limit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.paging.default_limit.get(), 10);
        assert_eq!(config.paging.max_limit.get(), 100);
        assert_eq!(config.paging.max_visible, 5);
        assert_eq!(config.port, 8080);
        assert_eq!(config.cache_capacity, 1024);
        assert_eq!(config.max_views, 64);
        assert!(!config.is_dev);
        assert!(config.data_path.is_none());
    }

    #[test]
    fn test_dev_mode_is_opt_in() {
        assert!(!is_dev_mode(None));
        assert!(!is_dev_mode(Some("prod")));
        assert!(!is_dev_mode(Some("")));
        assert!(is_dev_mode(Some("dev")));
    }

    #[test]
    fn test_param_defaults_follow_config() {
        let mut config = Config::default();
        config.paging.default_limit = NonZeroUsize::new(25).unwrap();
        let defaults = config.param_defaults();
        assert_eq!(defaults.limit.get(), 25);
        assert_eq!(defaults.max_limit.get(), 100);
    }
}
