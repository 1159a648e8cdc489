use dalgen_codegen::{Error, FileSet, GenerateSettings, OutputKind};
use std::{
    fs,
    path::{Path, PathBuf},
    process::Command,
};
use tempfile::TempDir;
use tracing::{debug, info};

/// Files staged for one output directory
struct Stage {
    target: PathBuf,
    dir: TempDir,
    names: Vec<String>,
}

/// Write `files` into the model and query directories.
///
/// Every file is first written (and formatted, when `format` is on) inside a
/// staging directory next to its target; targets are only touched once all
/// files are staged. Returns the committed paths in `FileSet` order.
pub fn commit(
    files: &FileSet,
    settings: &GenerateSettings,
    format: bool,
) -> Result<Vec<PathBuf>, Error> {
    settings.validate()?;
    let mut stages = Vec::new();
    for (kind, target) in [
        (OutputKind::Model, settings.model_dir()),
        (OutputKind::Query, settings.query_dir()),
    ] {
        if files.of_kind(kind).next().is_none() {
            continue;
        }
        let stage = stage(files, kind, target)?;
        if format {
            for name in stage.names.iter() {
                rustfmt(&stage.dir.path().join(name), name)?;
            }
        }
        stages.push(stage);
    }

    let mut written = Vec::with_capacity(files.len());
    for Stage { target, dir, names } in stages {
        fs::create_dir_all(&target)?;
        for name in names {
            let file_path = target.join(&name);
            info!("Writing {}", file_path.display());
            fs::rename(dir.path().join(&name), &file_path)?;
            written.push(file_path);
        }
    }
    Ok(written)
}

fn stage(files: &FileSet, kind: OutputKind, target: &Path) -> Result<Stage, Error> {
    let parent = target
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(parent)?;
    let dir = tempfile::Builder::new()
        .prefix(".dalgen-")
        .tempdir_in(parent)?;
    debug!("Staging {:?} files in {}", kind, dir.path().display());

    let mut names = Vec::new();
    for file in files.of_kind(kind) {
        fs::write(dir.path().join(&file.name), file.content.as_bytes())?;
        names.push(file.name.clone());
    }
    Ok(Stage {
        target: target.to_owned(),
        dir,
        names,
    })
}

fn rustfmt(path: &Path, name: &str) -> Result<(), Error> {
    let exit_status = Command::new("rustfmt")
        .arg("--edition")
        .arg("2021")
        .arg(path)
        .status()?;
    if !exit_status.success() {
        return Err(Error::Format(name.to_owned()));
    }
    Ok(())
}
