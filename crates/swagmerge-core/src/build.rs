use std::path::{Path, PathBuf};
use std::process::Command;

use log::info;

use crate::config::BuildConfig;
use crate::error::BuildError;

/// Produces the generated docs that the merge step patches.
pub trait SpecBuilder {
    fn build(&self) -> Result<(), BuildError>;
}

/// Runs an external generator such as `swag init -o <docs_dir>`.
#[derive(Debug, Clone)]
pub struct CommandBuilder {
    pub program: String,
    pub args: Vec<String>,
    pub output_dir: PathBuf,
}

impl CommandBuilder {
    pub fn from_config(config: &BuildConfig, output_dir: &Path) -> Self {
        Self {
            program: config.program.clone(),
            args: config.args.clone(),
            output_dir: output_dir.to_path_buf(),
        }
    }
}

impl SpecBuilder for CommandBuilder {
    fn build(&self) -> Result<(), BuildError> {
        info!(
            "running {} {} -o {}",
            self.program,
            self.args.join(" "),
            self.output_dir.display()
        );
        let status = Command::new(&self.program)
            .args(&self.args)
            .arg("-o")
            .arg(&self.output_dir)
            .status()
            .map_err(|source| BuildError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !status.success() {
            return Err(BuildError::Failed {
                program: self.program.clone(),
                status: status.to_string(),
            });
        }
        Ok(())
    }
}

/// A builder that does nothing, for docs that are already generated.
#[derive(Debug, Clone, Copy, Default)]
pub struct SkipBuild;

impl SpecBuilder for SkipBuild {
    fn build(&self) -> Result<(), BuildError> {
        Ok(())
    }
}
