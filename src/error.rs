use std::fmt;

#[derive(Debug)]
pub enum RaskError {
    DuplicateTask(String),
    UnknownTask {
        name: String,
        referenced_by: Option<String>,
    },
    Cycle(Vec<String>),
    CommandFailed {
        command: String,
        status: Option<i32>,
    },
    Io(std::io::Error),
    Parse(String),
}

impl RaskError {
    pub fn unknown_task(name: &str) -> Self {
        RaskError::UnknownTask {
            name: name.to_string(),
            referenced_by: None,
        }
    }

    pub fn unknown_task_in(name: &str, referenced_by: &str) -> Self {
        RaskError::UnknownTask {
            name: name.to_string(),
            referenced_by: Some(referenced_by.to_string()),
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self {
            RaskError::CommandFailed {
                status: Some(code), ..
            } => *code,
            _ => 1,
        }
    }
}

impl fmt::Display for RaskError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RaskError::DuplicateTask(name) => {
                write!(f, "Task '{}' is defined more than once", name)
            }
            RaskError::UnknownTask {
                name,
                referenced_by: Some(by),
            } => write!(f, "Task '{}' (required by '{}') is not defined", name, by),
            RaskError::UnknownTask {
                name,
                referenced_by: None,
            } => write!(f, "Task '{}' is not defined", name),
            RaskError::Cycle(path) => {
                write!(f, "Circular prerequisites: {}", path.join(" -> "))
            }
            RaskError::CommandFailed {
                command,
                status: Some(code),
            } => write!(f, "Command '{}' failed with exit status {}", command, code),
            RaskError::CommandFailed {
                command,
                status: None,
            } => write!(f, "Command '{}' was terminated by a signal", command),
            RaskError::Io(err) => write!(f, "IO error: {}", err),
            RaskError::Parse(msg) => write!(f, "Parse error: {}", msg),
        }
    }
}

impl std::error::Error for RaskError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RaskError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for RaskError {
    fn from(err: std::io::Error) -> Self {
        RaskError::Io(err)
    }
}

impl From<toml::de::Error> for RaskError {
    fn from(err: toml::de::Error) -> Self {
        RaskError::Parse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, RaskError>;
