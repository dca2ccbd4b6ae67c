/// Evaluation entrypoint of the separation tool
///
/// The separation model and metric computation live in an external tool.
/// The harness only builds its `evaluate` invocation, runs it, and reads the
/// metric reports it leaves behind.
use crate::museval::compile_metrics;
use stemeval_core::error::{Result, StemevalError};
use stemeval_core::{Backend, MetricMap, Preset};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, info};

/// Lines of stderr kept in an evaluation failure message
const STDERR_TAIL_LINES: usize = 20;

/// Arguments of one `evaluate` invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvaluateArgs {
    pub preset: String,
    pub music_dir: PathBuf,
    pub output_path: PathBuf,
    pub backend: Backend,
    pub mwf: bool,
}

impl EvaluateArgs {
    pub fn new(preset: &str, music_dir: &Path, output_path: &Path) -> Self {
        Self {
            preset: preset.to_owned(),
            music_dir: music_dir.to_path_buf(),
            output_path: output_path.to_path_buf(),
            backend: Backend::default(),
            mwf: false,
        }
    }

    pub fn with_backend(mut self, backend: Backend) -> Self {
        self.backend = backend;
        self
    }

    pub fn with_mwf(mut self, mwf: bool) -> Self {
        self.mwf = mwf;
        self
    }

    /// `evaluate -p <preset> --mus_dir <dir> -o <out> -B <backend> [--mwf]`
    pub fn to_command_line(&self) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            "evaluate".into(),
            "-p".into(),
            self.preset.clone().into(),
            "--mus_dir".into(),
            self.music_dir.clone().into(),
            "-o".into(),
            self.output_path.clone().into(),
            "-B".into(),
            self.backend.as_str().into(),
        ];
        if self.mwf {
            args.push("--mwf".into());
        }
        args
    }
}

/// Something that can evaluate a separation preset on a dataset
pub trait EvaluationEntrypoint {
    fn evaluate(&self, args: &EvaluateArgs, preset: &Preset) -> Result<MetricMap>;
}

/// Runs the separation tool as a subprocess
#[derive(Debug, Clone)]
pub struct CommandEntrypoint {
    program: PathBuf,
    prefix_args: Vec<String>,
}

impl CommandEntrypoint {
    pub fn new<P: Into<PathBuf>>(program: P) -> Self {
        Self {
            program: program.into(),
            prefix_args: Vec::new(),
        }
    }

    /// Arguments placed before `evaluate`, e.g. `-m spleeter` for a python launcher
    pub fn with_prefix_args(mut self, args: Vec<String>) -> Self {
        self.prefix_args = args;
        self
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    fn build_command(&self, args: &EvaluateArgs) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.prefix_args);
        cmd.args(args.to_command_line());
        cmd
    }
}

impl EvaluationEntrypoint for CommandEntrypoint {
    fn evaluate(&self, args: &EvaluateArgs, preset: &Preset) -> Result<MetricMap> {
        std::fs::create_dir_all(&args.output_path)?;

        let mut cmd = self.build_command(args);
        info!(
            "Running {} evaluate with preset {} ({} instruments, backend {})",
            self.program.display(),
            preset.name,
            preset.instrument_list.len(),
            args.backend
        );
        debug!("Command: {:?}", cmd);

        let output = cmd.output().map_err(|e| {
            StemevalError::Evaluation(format!(
                "Failed to execute {}: {}",
                self.program.display(),
                e
            ))
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let lines: Vec<&str> = stderr.lines().collect();
            let tail = lines[lines.len().saturating_sub(STDERR_TAIL_LINES)..].join("\n");
            return Err(StemevalError::Evaluation(format!(
                "{} exited with {}: {}",
                self.program.display(),
                output.status,
                tail
            )));
        }

        compile_metrics(&args.output_path)
    }
}
