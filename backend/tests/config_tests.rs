mod support;

use refraction_estimator::config::{ConfigError, ServerConfig};

const VARS: [&str; 3] = ["HOST", "PORT", "PUBLIC_ORIGIN"];

fn cleared() -> Vec<(&'static str, Option<&'static str>)> {
    VARS.iter().map(|k| (*k, None)).collect()
}

#[test]
fn test_from_env_defaults() {
    support::with_scoped_env(&cleared(), || {
        let config = ServerConfig::from_env().unwrap();
        assert_eq!(config, ServerConfig::default());
        assert!(config.public_origin.is_none());
    });
}

#[test]
fn test_from_env_reads_all_variables() {
    support::with_scoped_env(
        &[
            ("HOST", Some("127.0.0.1")),
            ("PORT", Some("3000")),
            ("PUBLIC_ORIGIN", Some("https://vision.example.com/")),
        ],
        || {
            let config = ServerConfig::from_env().unwrap();
            assert_eq!(config.bind_addr().unwrap().to_string(), "127.0.0.1:3000");
            assert_eq!(
                config.public_origin.unwrap().as_str(),
                "https://vision.example.com"
            );
        },
    );
}

#[test]
fn test_from_env_rejects_bad_port() {
    support::with_scoped_env(&[("PORT", Some("http")), ("PUBLIC_ORIGIN", None)], || {
        assert_eq!(
            ServerConfig::from_env(),
            Err(ConfigError::InvalidPort("http".to_string()))
        );
    });
}

#[test]
fn test_from_env_rejects_bad_origin() {
    support::with_scoped_env(
        &[("PORT", None), ("PUBLIC_ORIGIN", Some("vision.example.com"))],
        || {
            assert!(matches!(
                ServerConfig::from_env(),
                Err(ConfigError::InvalidOrigin(_))
            ));
        },
    );
}

#[test]
fn test_blank_origin_is_ignored() {
    support::with_scoped_env(&[("PORT", None), ("PUBLIC_ORIGIN", Some("  "))], || {
        assert!(ServerConfig::from_env().unwrap().public_origin.is_none());
    });
}
