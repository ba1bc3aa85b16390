use std::path::Path;

use askdocs_core::config::{resolve_with_base, Config, Settings};
use askdocs_core::Error;
use figment::Jail;

#[test]
fn defaults_match_documented_values() {
    let settings = Settings::default();
    assert_eq!(settings.chunking.target_words, 500);
    assert_eq!(settings.chunking.overlap_sentences, 2);
    assert_eq!(settings.retrieval.top_k, 10);
    assert!((settings.retrieval.similarity_floor - 0.1).abs() < f32::EPSILON);
    assert_eq!(settings.retrieval.min_chunk_chars, 50);
    assert_eq!(settings.retrieval.max_passages, 6);
    assert!(settings.validate().is_ok());
}

#[test]
fn toml_and_env_layers_override_defaults() {
    Jail::expect_with(|jail| {
        jail.create_file("config.toml", "[retrieval]\ntop_k = 4\n\n[data]\nowner_id = \"bob\"\n")?;
        jail.create_file("config.test.toml", "[chunking]\ntarget_words = 120\n")?;
        jail.set_env("APP_RETRIEVAL__MAX_PASSAGES", "3");

        let config = Config::from_figment(Config::figment_for_env("test"));
        let settings = config.settings().expect("settings");
        assert_eq!(settings.retrieval.top_k, 4);
        assert_eq!(settings.retrieval.max_passages, 3);
        assert_eq!(settings.chunking.target_words, 120);
        assert_eq!(settings.chunking.overlap_sentences, 2);
        assert_eq!(settings.data.owner_id, "bob");

        let top_k: usize = config.get("retrieval.top_k").expect("keyed get");
        assert_eq!(top_k, 4);
        Ok(())
    });
}

#[test]
fn invalid_values_are_rejected() {
    Jail::expect_with(|jail| {
        jail.create_file("config.toml", "[retrieval]\ntop_k = 0\n")?;
        let config = Config::from_figment(Config::figment_for_env("dev"));
        assert!(matches!(config.settings(), Err(Error::InvalidConfig(_))));
        Ok(())
    });
}

#[test]
fn relative_paths_resolve_against_base() {
    let base = Path::new("/srv/askdocs");
    assert_eq!(resolve_with_base(base, "docs"), base.join("docs"));
    assert_eq!(resolve_with_base(base, "/data/docs"), Path::new("/data/docs"));
}
