//! Integration tests for jvmsec

mod cli_tests {
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;
    use tempfile::TempDir;

    /// Isolated from the user's config and the lifecycle's environment
    fn jvmsec(config_dir: &TempDir) -> Command {
        let mut cmd = cargo_bin_cmd!("jvmsec");
        cmd.env("JVMSEC_CONFIG", config_dir.path().join("config.toml"))
            .env_remove("CNB_LAYERS_DIR")
            .env_remove("CNB_BUILDPACK_DIR");
        cmd
    }

    #[test]
    fn help_displays() {
        let config = TempDir::new().unwrap();
        jvmsec(&config)
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("Java security properties"));
    }

    #[test]
    fn version_displays() {
        let config = TempDir::new().unwrap();
        jvmsec(&config)
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("jvmsec"));
    }

    #[test]
    fn contribute_for_launch() {
        let config = TempDir::new().unwrap();
        let layers = TempDir::new().unwrap();

        jvmsec(&config)
            .arg("contribute")
            .arg(layers.path())
            .args(["--layer", "test-layer", "--buildpack-name", "test-name"])
            .assert()
            .success()
            .stdout(predicate::str::contains("JAVA_SECURITY_PROPERTIES.override"));

        let layer = layers.path().join("test-layer");
        let file = layer.join("java-security.properties");
        assert!(file.is_file());
        assert_eq!(
            std::fs::read_to_string(layer.join("env/JAVA_OPTS.append")).unwrap(),
            format!(" -Djava.security.properties={}", file.display())
        );
        assert_eq!(
            std::fs::read_to_string(layer.join("env/JAVA_SECURITY_PROPERTIES.override")).unwrap(),
            file.display().to_string()
        );

        let metadata = std::fs::read_to_string(layers.path().join("test-layer.toml")).unwrap();
        assert!(metadata.contains("launch = true"));
        assert!(metadata.contains("build = false"));
    }

    #[test]
    fn contribute_with_relative_layers_dir_writes_absolute_paths() {
        let config = TempDir::new().unwrap();
        let work = TempDir::new().unwrap();

        jvmsec(&config)
            .current_dir(work.path())
            .args(["contribute", "layers", "--buildpack-name", "test-name"])
            .assert()
            .success();

        let env_dir = work.path().join("layers/java-security-properties/env");
        let value =
            std::fs::read_to_string(env_dir.join("JAVA_SECURITY_PROPERTIES.override")).unwrap();
        assert!(std::path::Path::new(&value).is_absolute(), "{value} is relative");
        assert!(value.ends_with("layers/java-security-properties/java-security.properties"));
        assert_eq!(
            std::fs::read_to_string(env_dir.join("JAVA_OPTS.append")).unwrap(),
            format!(" -Djava.security.properties={}", value)
        );
    }

    #[test]
    fn contribute_reads_layers_dir_from_env() {
        let config = TempDir::new().unwrap();
        let layers = TempDir::new().unwrap();
        let buildpack = TempDir::new().unwrap();
        std::fs::write(
            buildpack.path().join("buildpack.toml"),
            "[buildpack]\nid = \"example/jvm\"\nname = \"Example JVM\"\nversion = \"1.0.0\"\n",
        )
        .unwrap();

        jvmsec(&config)
            .env("CNB_LAYERS_DIR", layers.path())
            .env("CNB_BUILDPACK_DIR", buildpack.path())
            .args(["contribute", "--contribution", "build"])
            .assert()
            .success();

        let content = std::fs::read_to_string(
            layers
                .path()
                .join("java-security-properties")
                .join("java-security.properties"),
        )
        .unwrap();
        assert!(content.contains("Example JVM 1.0.0"));
    }

    #[test]
    fn contribute_json_output() {
        let config = TempDir::new().unwrap();
        let layers = TempDir::new().unwrap();

        let output = jvmsec(&config)
            .arg("contribute")
            .arg(layers.path())
            .args(["--buildpack-name", "test-name", "--contribution", "none", "--json"])
            .output()
            .unwrap();
        assert!(output.status.success());

        let layer: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(layer["name"], "java-security-properties");
        assert_eq!(layer["types"]["launch"], false);
        assert!(layer["shared_environment"]["JAVA_OPTS.append"]
            .as_str()
            .unwrap()
            .starts_with(" -Djava.security.properties="));
    }

    #[test]
    fn contribute_without_layers_dir_fails() {
        let config = TempDir::new().unwrap();
        jvmsec(&config)
            .args(["contribute", "--buildpack-name", "test-name"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Layers directory not set"));
    }

    #[test]
    fn contribute_without_buildpack_fails() {
        let config = TempDir::new().unwrap();
        let layers = TempDir::new().unwrap();
        jvmsec(&config)
            .arg("contribute")
            .arg(layers.path())
            .assert()
            .failure()
            .stderr(predicate::str::contains("missing name"));
    }

    #[test]
    fn contribute_uses_configured_properties() {
        let config = TempDir::new().unwrap();
        let layers = TempDir::new().unwrap();
        std::fs::write(
            config.path().join("config.toml"),
            "[buildpack]\nname = \"configured\"\n\n[properties]\n\"securerandom.source\" = \"file:/dev/urandom\"\n",
        )
        .unwrap();

        jvmsec(&config)
            .arg("contribute")
            .arg(layers.path())
            .assert()
            .success();

        let content = std::fs::read_to_string(
            layers
                .path()
                .join("java-security-properties")
                .join("java-security.properties"),
        )
        .unwrap();
        assert!(content.contains("contributed by configured"));
        assert!(content.contains("securerandom.source=file\\:/dev/urandom"));
    }

    #[test]
    fn config_path() {
        let config = TempDir::new().unwrap();
        jvmsec(&config)
            .args(["config", "path"])
            .assert()
            .success()
            .stdout(predicate::str::contains("config.toml"));
    }

    #[test]
    fn config_show() {
        let config = TempDir::new().unwrap();
        jvmsec(&config)
            .args(["config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("[layer]"));
    }

    #[test]
    fn config_set_then_show() {
        let config = TempDir::new().unwrap();
        jvmsec(&config)
            .args(["config", "set", "layer.contribution", "build"])
            .assert()
            .success();

        jvmsec(&config)
            .args(["config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("contribution = \"build\""));
    }
}
