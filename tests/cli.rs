use clap::Parser;
use curvemark::cli::{render_dry_run, run, Cli};
use curvemark::{Config, MarkerKind, Orientation, TubeProfile};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Writes a default config so tests never pick up the user's own file.
fn config_file(dir: &Path) -> PathBuf {
    let path = dir.join("config.toml");
    Config::new().save_to_file(&path).unwrap();
    path
}

fn parse(dir: &Path, args: &[&str]) -> Cli {
    let config = config_file(dir);
    let mut argv = vec!["curvemark", "--config", config.to_str().unwrap()];
    argv.extend_from_slice(args);
    Cli::try_parse_from(argv).unwrap()
}

#[test]
fn test_centimetres_are_the_default_unit() {
    let dir = TempDir::new().unwrap();
    let cli = parse(dir.path(), &["awning", "-W", "48", "-H", "100", "-r", "52"]);
    let job = cli.to_job(&Config::new()).unwrap();
    assert_eq!(job.width, 480.0);
    assert_eq!(job.height, 1000.0);
    assert_eq!(job.roll_width, 520.0);
    assert_eq!(job.deflection, 10.0);
    assert_eq!(job.kind, MarkerKind::Plain);
}

#[test]
fn test_inch_fractions_and_kind() {
    let dir = TempDir::new().unwrap();
    let cli = parse(
        dir.path(),
        &[
            "blind", "-W", "20 1/2", "-H", "40", "-r", "60", "-u", "in", "-k", "tube65", "-d",
            "0",
        ],
    );
    let job = cli.to_job(&Config::new()).unwrap();
    assert!((job.width - 520.7).abs() < 1e-9);
    assert_eq!(job.deflection, 0.0);
    assert_eq!(job.kind, MarkerKind::Zipper(TubeProfile::Tube65));
}

#[test]
fn test_writes_one_file_per_piece() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("out");
    let cli = parse(
        dir.path(),
        &[
            "awning",
            "-W",
            "60",
            "-H",
            "130",
            "-r",
            "52",
            "-o",
            out.to_str().unwrap(),
        ],
    );

    let report = run(&cli).unwrap();
    assert_eq!(report.plan.orientation, Orientation::CrossGrain);
    assert_eq!(
        report.written,
        vec![
            out.join("awning_01.dxf"),
            out.join("awning_02.dxf"),
            out.join("awning_03.dxf"),
        ]
    );
    assert!(report.written.iter().all(|p| p.exists()));
}

#[test]
fn test_dry_run_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("out");
    let cli = parse(
        dir.path(),
        &[
            "awning",
            "-W",
            "48",
            "-H",
            "100",
            "-r",
            "52",
            "-o",
            out.to_str().unwrap(),
            "--dry-run",
        ],
    );

    let report = run(&cli).unwrap();
    assert!(report.written.is_empty());
    assert!(!out.exists());

    let json = render_dry_run(&report).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["plan"]["orientation"], "with_grain");
    assert_eq!(value["pieces"][0]["suffix"], "");
    assert_eq!(value["job"]["kind"], "plain");
}

#[test]
fn test_invalid_input_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("out");
    let cli = parse(
        dir.path(),
        &[
            "awning",
            "-W",
            "48",
            "-H",
            "100",
            "-r",
            "52",
            "-d",
            "400",
            "-o",
            out.to_str().unwrap(),
        ],
    );

    let err = run(&cli).unwrap_err();
    assert!(format!("{:#}", err).contains("deflection"));
    assert!(!out.exists());
}

#[test]
fn test_missing_roll_width() {
    let dir = TempDir::new().unwrap();
    let cli = parse(dir.path(), &["awning", "-W", "48", "-H", "100"]);
    assert!(run(&cli).is_err());
}

#[test]
fn test_unparseable_length() {
    let dir = TempDir::new().unwrap();
    let cli = parse(dir.path(), &["awning", "-W", "wide", "-H", "100", "-r", "52"]);
    let err = run(&cli).unwrap_err();
    assert!(err.to_string().contains("Invalid width"));
}

#[test]
fn test_configured_stem_names_the_files() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("out");
    let config_path = dir.path().join("config.toml");
    let mut config = Config::new();
    config.output.stem = Some("shade".to_string());
    config.save_to_file(&config_path).unwrap();

    let cli = Cli::try_parse_from([
        "curvemark",
        "--config",
        config_path.to_str().unwrap(),
        "-W",
        "48",
        "-H",
        "100",
        "-r",
        "52",
        "-o",
        out.to_str().unwrap(),
    ])
    .unwrap();
    assert_eq!(cli.name, None);

    let report = run(&cli).unwrap();
    assert_eq!(report.written, vec![out.join("shade.dxf")]);
    assert!(out.join("shade.dxf").exists());
}

#[test]
fn test_missing_name_without_configured_stem() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("out");
    let cli = parse(
        dir.path(),
        &["-W", "48", "-H", "100", "-r", "52", "-o", out.to_str().unwrap()],
    );

    let err = run(&cli).unwrap_err();
    assert!(err.to_string().contains("output.stem"));
    assert!(!out.exists());
}
