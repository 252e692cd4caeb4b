//! Config file save/load tests.

use mulling::{DashboardConfig, SearchForm};
use mulling_search::{Language, Model, QueryMode};

#[test]
fn saved_config_loads_back_identically() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("nested").join("config.toml");

    let mut config = DashboardConfig::default();
    config.server.base_url = "http://192.168.137.217:5050".into();
    config.search.model = Model::Metalaser;
    config.search.k = 50;
    config.search.multilingual = true;
    config.search.output_languages = vec![Language::English, Language::Tamil];

    config.save_to_file(&path).expect("save");
    let loaded = DashboardConfig::load(Some(&path)).expect("load");
    assert_eq!(loaded, config);
}

#[test]
fn partial_file_drives_initial_form() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        "[search]\nmodel = \"senbai\"\nlang = \"zh\"\nk = 7\nmultilingual = true\nnormalize = false\n",
    )
    .expect("write");

    let config = DashboardConfig::from_file(&path).expect("load");
    let request = SearchForm::from_defaults(&config.search).to_request("台风");
    assert_eq!(request.model, Model::Senbai);
    assert_eq!(request.lang, Language::Chinese);
    assert_eq!(request.k, 7);
    assert_eq!(
        request.mode,
        QueryMode::Multilingual {
            normalize: false,
            output_languages: Language::corpus().to_vec(),
        }
    );
}

#[test]
fn invalid_file_is_rejected() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[search]\nk = 5000\n").expect("write");
    let err = DashboardConfig::from_file(&path).unwrap_err();
    assert!(err.to_string().contains("search.k"));

    std::fs::write(&path, "[server\n").expect("write");
    let err = DashboardConfig::from_file(&path).unwrap_err();
    assert!(err.to_string().starts_with("config error"));
}

#[test]
fn missing_explicit_file_is_io_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let err = DashboardConfig::load(Some(&dir.path().join("absent.toml"))).unwrap_err();
    assert!(err.to_string().starts_with("I/O error"));
}
