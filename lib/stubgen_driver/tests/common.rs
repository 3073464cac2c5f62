use std::path::PathBuf;

use clap::Parser;
use stubgen_driver::StubArgs;
use tempfile::TempDir;

#[derive(Debug)]
pub struct Workspace {
    pub folder: TempDir,
    pub header: PathBuf,
    pub output: PathBuf,
}

/// Writes `source` as a header in a fresh temp dir.
pub fn workspace(source: &str) -> Result<Workspace, Box<dyn std::error::Error>> {
    let folder = tempfile::tempdir()?;
    let header = folder.path().join("api.h");
    std::fs::write(&header, source)?;
    let output = folder.path().join("stubs.txt");

    Ok(Workspace {
        folder,
        header,
        output,
    })
}

/// Parses a command line the way the binary would, pointing it at the workspace.
pub fn args(ws: &Workspace, extra: &[&str]) -> StubArgs {
    let mut argv = vec![
        "stubgen".to_string(),
        ws.header.display().to_string(),
        "--output".to_string(),
        ws.output.display().to_string(),
    ];
    argv.extend(extra.iter().map(|x| x.to_string()));
    StubArgs::try_parse_from(argv).unwrap()
}

pub fn read_output(ws: &Workspace) -> Vec<String> {
    std::fs::read_to_string(&ws.output)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}
