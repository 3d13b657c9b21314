use std::path::PathBuf;

fn exe() -> PathBuf {
    std::env::var_os("CARGO_BIN_EXE_placeheat")
        .map(PathBuf::from)
        .unwrap_or_else(|| {
            let mut p = PathBuf::from("target").join("debug");
            p.push(if cfg!(windows) {
                "placeheat.exe"
            } else {
                "placeheat"
            });
            p
        })
}

#[test]
fn cli_file_mode_writes_png() {
    let dir = PathBuf::from("target").join("cli_smoke");
    std::fs::create_dir_all(&dir).unwrap();

    let csv_path = dir.join("points.csv");
    let out_path = dir.join("out.png");
    let _ = std::fs::remove_file(&out_path);
    std::fs::write(&csv_path, "id,10,990\nid,500,500\nid,990,10\n").unwrap();

    let status = std::process::Command::new(exe())
        .arg("--file")
        .arg(&csv_path)
        .arg("--out")
        .arg(&out_path)
        .args(["--scheme", "classic"])
        .status()
        .unwrap();

    assert!(status.success());
    let img = image::open(&out_path).unwrap().to_rgba8();
    assert_eq!(img.dimensions(), (1000, 1000));
    assert!(img.pixels().all(|p| p.0[3] == 255));
}

#[test]
fn cli_parse_failure_exits_non_zero() {
    let dir = PathBuf::from("target").join("cli_smoke_bad");
    std::fs::create_dir_all(&dir).unwrap();

    let csv_path = dir.join("points.csv");
    let out_path = dir.join("out.png");
    let _ = std::fs::remove_file(&out_path);
    std::fs::write(&csv_path, "id,abc,1\n").unwrap();

    let output = std::process::Command::new(exe())
        .arg("--file")
        .arg(&csv_path)
        .arg("--out")
        .arg(&out_path)
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("parse stage failed"), "stderr: {stderr}");
    assert!(stderr.contains("parse error"), "stderr: {stderr}");
    assert!(!out_path.exists());
}

#[test]
fn cli_rejects_url_and_file_together() {
    let status = std::process::Command::new(exe())
        .args(["--url", "http://127.0.0.1:1/x.csv", "--file", "x.csv"])
        .status()
        .unwrap();
    assert!(!status.success());
}

#[test]
fn cli_missing_input_names_source_stage() {
    let output = std::process::Command::new(exe())
        .args(["--file", "target/cli_smoke_missing/none.csv"])
        .args(["--out", "target/cli_smoke_missing/out.png"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("source stage failed"), "stderr: {stderr}");
    assert!(stderr.contains("none.csv"), "stderr: {stderr}");
}
