use std::sync::Mutex;

use tempfile::NamedTempFile;

use vision_sentry::config::SentryConfig;

static ENV_LOCK: Mutex<()> = Mutex::new(());

fn clear_env() {
    for key in [
        "SENTRY_CONFIG",
        "SENTRY_MIN_CONFIDENCE",
        "SENTRY_ALERT_CLASSES",
        "SENTRY_CAPTURE_CLASSES",
        "SENTRY_FRAME_BUDGET_MS",
        "SENTRY_IMAGES_DIR",
    ] {
        std::env::remove_var(key);
    }
}

#[test]
fn defaults_match_the_demo_hardware() {
    let _guard = ENV_LOCK.lock().unwrap();
    clear_env();

    let cfg = SentryConfig::load().expect("load config");

    assert_eq!(cfg.camera.sensor_mode, 5);
    assert_eq!(cfg.presentation_resolution(), (1640, 922));
    assert!(cfg.camera.fullscreen);
    assert_eq!(cfg.inference_resolution(), (320, 240));
    assert!((cfg.inference.min_confidence - 0.3).abs() < 1e-6);
    assert_eq!(cfg.classes.alert, vec!["person"]);
    assert_eq!(cfg.classes.capture, vec!["cat"]);
    assert_eq!(cfg.frame_budget.as_millis(), 500);
    assert_eq!(cfg.audio.gpio, 22);
    assert_eq!(cfg.audio.bpm, 30);
    assert_eq!(cfg.images_dir.to_str().unwrap(), "images");

    clear_env();
}

#[test]
fn loads_config_from_file_and_env_overrides() {
    let _guard = ENV_LOCK.lock().unwrap();
    clear_env();

    let mut file = NamedTempFile::new().expect("temp config");
    let json = r#"{
        "camera": {
            "sensor_mode": 4,
            "width": 1280,
            "height": 720,
            "fullscreen": false
        },
        "inference": {
            "width": 300,
            "height": 300,
            "min_confidence": 0.5
        },
        "classes": {
            "alert": ["person", "dog"],
            "capture": ["cat"]
        },
        "timing": {
            "frame_budget_ms": 750
        },
        "audio": {
            "gpio": 17,
            "bpm": 60
        },
        "images_dir": "captures"
    }"#;
    std::io::Write::write_all(&mut file, json.as_bytes()).expect("write config");

    std::env::set_var("SENTRY_CONFIG", file.path());
    std::env::set_var("SENTRY_CAPTURE_CLASSES", "cat, bird");
    std::env::set_var("SENTRY_MIN_CONFIDENCE", "0.6");

    let cfg = SentryConfig::load().expect("load config");

    assert_eq!(cfg.camera.sensor_mode, 4);
    assert_eq!(cfg.presentation_resolution(), (1280, 720));
    assert!(!cfg.camera.fullscreen);
    assert_eq!(cfg.inference_resolution(), (300, 300));
    // Env wins over file.
    assert!((cfg.inference.min_confidence - 0.6).abs() < 1e-6);
    assert_eq!(cfg.classes.alert, vec!["person", "dog"]);
    assert_eq!(cfg.classes.capture, vec!["cat", "bird"]);
    assert_eq!(cfg.frame_budget.as_millis(), 750);
    assert_eq!(cfg.audio.gpio, 17);
    assert_eq!(cfg.audio.bpm, 60);
    assert_eq!(cfg.images_dir.to_str().unwrap(), "captures");

    clear_env();
}

#[test]
fn out_of_range_confidence_is_rejected() {
    let _guard = ENV_LOCK.lock().unwrap();
    clear_env();

    std::env::set_var("SENTRY_MIN_CONFIDENCE", "1.5");
    let err = SentryConfig::load().unwrap_err();
    assert!(err.to_string().contains("min_confidence"));

    clear_env();
}

#[test]
fn malformed_config_file_is_a_setup_failure() {
    let _guard = ENV_LOCK.lock().unwrap();
    clear_env();

    let mut file = NamedTempFile::new().expect("temp config");
    std::io::Write::write_all(&mut file, b"not json").expect("write config");
    std::env::set_var("SENTRY_CONFIG", file.path());

    let err = SentryConfig::load().unwrap_err();
    assert!(err.to_string().contains("invalid config file"));

    clear_env();
}
