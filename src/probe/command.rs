use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::Error;
use crate::probe::{ProbeOutcome, Prober};

/// Prober that shells out to an external test command.
///
/// Each probe is a command template (argv word list) with the candidate
/// path appended; the compress probe additionally appends the scratch
/// output path. The child inherits stdio and is waited on synchronously.
/// The scratch file is overwritten on every compress probe, which is safe
/// under the driver's strictly sequential execution model.
#[derive(Debug, Clone)]
pub struct CommandProber {
    decode: Vec<String>,
    compress: Vec<String>,
    scratch: PathBuf,
}

impl CommandProber {
    /// Build a prober from whitespace-separated command templates, e.g.
    /// `"luajit tests/Test.lua -o"` and `"luajit tests/Test.lua -c"`.
    pub fn new(decode_cmd: &str, compress_cmd: &str, scratch: PathBuf) -> Result<Self, Error> {
        let decode = split_template(decode_cmd, "decode")?;
        let compress = split_template(compress_cmd, "compress")?;
        Ok(Self {
            decode,
            compress,
            scratch,
        })
    }

    pub fn scratch(&self) -> &Path {
        &self.scratch
    }

    fn run(&self, template: &[String], trailing: &[&Path]) -> Result<ProbeOutcome, Error> {
        let mut command = Command::new(&template[0]);
        command.args(&template[1..]);
        for arg in trailing {
            command.arg(arg);
        }

        let status = command.status().map_err(|source| Error::Spawn {
            command: template.join(" "),
            source,
        })?;

        if status.success() {
            Ok(ProbeOutcome::Passed)
        } else {
            Ok(ProbeOutcome::Failed {
                code: exit_code(&status),
            })
        }
    }
}

impl Prober for CommandProber {
    fn probe_decode(&self, path: &Path) -> Result<ProbeOutcome, Error> {
        self.run(&self.decode, &[path])
    }

    fn probe_compress(&self, path: &Path) -> Result<ProbeOutcome, Error> {
        self.run(&self.compress, &[path, &self.scratch])
    }
}

fn split_template(template: &str, role: &'static str) -> Result<Vec<String>, Error> {
    let words: Vec<String> = template.split_whitespace().map(str::to_string).collect();
    if words.is_empty() {
        return Err(Error::EmptyCommand { role });
    }
    Ok(words)
}

/// Exit code of a finished child. A signal death has no code; report the
/// negated signal number so it stays distinguishable and nonzero.
fn exit_code(status: &std::process::ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return -signal;
        }
    }
    -1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_templates() {
        let err = CommandProber::new("", "true", PathBuf::from("/tmp/out"));
        assert!(matches!(err, Err(Error::EmptyCommand { role: "decode" })));

        let err = CommandProber::new("true", "   ", PathBuf::from("/tmp/out"));
        assert!(matches!(err, Err(Error::EmptyCommand { role: "compress" })));
    }

    #[test]
    fn splits_template_words() {
        let prober =
            CommandProber::new("luajit tests/Test.lua -o", "luajit tests/Test.lua -c", PathBuf::from("/tmp/out"))
                .unwrap();
        assert_eq!(prober.decode, vec!["luajit", "tests/Test.lua", "-o"]);
        assert_eq!(prober.compress, vec!["luajit", "tests/Test.lua", "-c"]);
    }

    #[cfg(unix)]
    #[test]
    fn missing_command_is_a_spawn_error() {
        let prober = CommandProber::new(
            "/nonexistent/probe-command",
            "/nonexistent/probe-command",
            PathBuf::from("/tmp/out"),
        )
        .unwrap();
        let err = prober.probe_decode(Path::new("/etc/hostname"));
        assert!(matches!(err, Err(Error::Spawn { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn maps_exit_statuses() {
        let prober =
            CommandProber::new("true", "false", PathBuf::from("/tmp/out")).unwrap();

        let outcome = prober.probe_decode(Path::new("/etc/hostname")).unwrap();
        assert_eq!(outcome, ProbeOutcome::Passed);

        let outcome = prober.probe_compress(Path::new("/etc/hostname")).unwrap();
        assert_eq!(outcome, ProbeOutcome::Failed { code: 1 });
    }
}
