use std::fmt;

#[derive(Debug)]
pub enum Error {
    /// Compress round trip failed for a candidate. Fatal; the child's exit
    /// status becomes the driver's own exit status.
    RoundTrip { path: String, code: i32 },

    /// A probe command could not be launched at all.
    Spawn {
        command: String,
        source: std::io::Error,
    },

    /// A probe command template parsed to zero words.
    EmptyCommand { role: &'static str },

    /// IO error in the driver itself.
    Io(std::io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RoundTrip { path, code } => {
                write!(f, "regression error: '{}' failed round trip with exit code {}", path, code)
            }
            Self::Spawn { command, source } => {
                write!(f, "probe error: cannot launch '{}': {}", command, source)
            }
            Self::EmptyCommand { role } => {
                write!(f, "probe error: empty {} command", role)
            }
            Self::Io(e) => write!(f, "io error: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Spawn { source, .. } => Some(source),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

// Automatic conversions for ease of use
impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self { Self::Io(e) }
}
