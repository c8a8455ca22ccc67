//! Shared helpers for CLI specs
//!
//! `Project` is a throwaway directory the CLI runs in; `convoy()`
//! builds an invocation of the compiled binary rooted there.

use std::path::PathBuf;
use tempfile::TempDir;

pub struct Project {
    dir: TempDir,
}

impl Project {
    /// A fresh empty project directory
    pub fn empty() -> Self {
        Self {
            dir: TempDir::new().expect("create temp project"),
        }
    }

    /// Write a file relative to the project root, creating parents
    pub fn file(&self, rel: &str, content: &str) -> &Self {
        let path = self.path(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create parent dirs");
        }
        std::fs::write(&path, content).expect("write project file");
        self
    }

    pub fn path(&self, rel: &str) -> PathBuf {
        self.dir.path().join(rel)
    }

    /// Read a file the pipeline produced
    pub fn read(&self, rel: &str) -> String {
        std::fs::read_to_string(self.path(rel)).expect("read project file")
    }

    pub fn exists(&self, rel: &str) -> bool {
        self.path(rel).exists()
    }

    /// Start a convoy invocation rooted in this project
    pub fn convoy(&self) -> ConvoyCmd {
        let mut cmd = assert_cmd::Command::cargo_bin("convoy").expect("convoy binary");
        cmd.current_dir(self.dir.path());
        ConvoyCmd { cmd }
    }
}

pub struct ConvoyCmd {
    cmd: assert_cmd::Command,
}

impl ConvoyCmd {
    pub fn args(mut self, args: &[&str]) -> Self {
        self.cmd.args(args);
        self
    }

    /// Run and require exit code 0
    pub fn passes(mut self) -> CmdOutput {
        CmdOutput::from(self.cmd.assert().success())
    }

    /// Run and require a non-zero exit code
    pub fn fails(mut self) -> CmdOutput {
        CmdOutput::from(self.cmd.assert().failure())
    }
}

pub struct CmdOutput {
    stdout: String,
    stderr: String,
}

impl CmdOutput {
    fn from(assert: assert_cmd::assert::Assert) -> Self {
        let output = assert.get_output();
        Self {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }

    pub fn stdout(&self) -> &str {
        &self.stdout
    }

    #[track_caller]
    pub fn stdout_has(self, needle: &str) -> Self {
        assert!(
            self.stdout.contains(needle),
            "stdout missing {:?}\n--- stdout ---\n{}",
            needle,
            self.stdout
        );
        self
    }

    #[track_caller]
    pub fn stderr_has(self, needle: &str) -> Self {
        assert!(
            self.stderr.contains(needle),
            "stderr missing {:?}\n--- stderr ---\n{}",
            needle,
            self.stderr
        );
        self
    }
}
