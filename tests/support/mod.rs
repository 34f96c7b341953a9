use anyhow::{Context, Result, bail};
use platform_catalog::ArtifactCoordinates;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use zip::write::SimpleFileOptions;

pub fn helper_binary(name: &str) -> PathBuf {
    let path = match name {
        "populate-catalog" => env!("CARGO_BIN_EXE_populate-catalog"),
        "archive-release" => env!("CARGO_BIN_EXE_archive-release"),
        other => panic!("unknown helper {other}"),
    };
    PathBuf::from(path)
}

pub fn run_command(mut cmd: Command) -> Result<Output> {
    let output = cmd
        .output()
        .with_context(|| format!("failed to run command: {:?}", cmd))?;
    if output.status.success() {
        Ok(output)
    } else {
        bail!(
            "command {:?} failed: status {:?}\nstdout: {}\nstderr: {}",
            cmd,
            output.status.code(),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        )
    }
}

/// Write a jar at `path` holding the given entries.
pub fn write_archive(path: &Path, entries: &[(&str, &str)]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut writer = zip::ZipWriter::new(file);
    for (name, body) in entries {
        writer.start_file(*name, SimpleFileOptions::default())?;
        writer.write_all(body.as_bytes())?;
    }
    writer.finish()?;
    Ok(())
}

pub fn build_prop(sdk: u32, codename: &str) -> String {
    format!(
        "# begin build properties\n\
         ro.build.version.sdk={sdk}\n\
         ro.build.version.codename={codename}\n\
         ro.build.version.release={sdk}\n"
    )
}

/// Place the local build where the repository resolver expects the
/// "current" sentinel artifact.
pub fn install_current_build(repo: &Path, build_prop: &str) -> Result<PathBuf> {
    let coords = ArtifactCoordinates::new(
        "org.robolectric",
        "android-all-instrumented",
        "current-robolectric-r0-i6",
    );
    let path = repo.join(coords.layout_path());
    write_archive(
        &path,
        &[
            ("META-INF/MANIFEST.MF", "Manifest-Version: 1.0\n"),
            ("build.prop", build_prop),
        ],
    )?;
    Ok(path)
}
