use std::{collections::HashMap, env, fs, sync::OnceLock};

use regex::Regex;
use serde::Deserialize;

use super::{Registry, Task, dependency::validate};
use crate::error::Result;

#[derive(Debug, Deserialize)]
struct Taskfile {
    #[serde(rename = "task")]
    tasks: HashMap<String, Task>,
    config: Option<ConfigSection>,
    #[serde(default)]
    variables: HashMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct ConfigSection {
    default: Option<NameList>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum NameList {
    One(String),
    Many(Vec<String>),
}

impl NameList {
    fn into_vec(self) -> Vec<String> {
        match self {
            NameList::One(name) => vec![name],
            NameList::Many(names) => names,
        }
    }
}

pub fn load_taskfile(path: &str) -> Result<Registry> {
    let contents = fs::read_to_string(path)?;
    let taskfile: Taskfile = toml::from_str(&contents)?;
    build_registry(taskfile)
}

fn build_registry(taskfile: Taskfile) -> Result<Registry> {
    let default_targets = taskfile
        .config
        .and_then(|c| c.default)
        .map(NameList::into_vec);

    let mut variables = taskfile.variables;
    add_builtin_variables(&mut variables);

    let mut entries: Vec<(String, Task)> = taskfile.tasks.into_iter().collect();
    entries.sort_by(|a, b| a.0.cmp(&b.0));

    let mut registry = Registry::new();
    for (name, mut task) in entries {
        if task.id.is_empty() {
            task.id = name;
        }
        task.commands = task.commands.map(|c| substitute_variables(c, &variables));
        registry.register(task)?;
    }

    // With no [config] default, a task literally named "default" serves
    // as the default target.
    let default_targets = default_targets.unwrap_or_else(|| {
        if registry.contains("default") {
            vec!["default".to_string()]
        } else {
            Vec::new()
        }
    });
    registry.set_default_targets(default_targets);

    validate(&registry)?;
    Ok(registry)
}

fn add_builtin_variables(variables: &mut HashMap<String, String>) {
    for (key, value) in env::vars() {
        variables.entry(format!("ENV_{}", key)).or_insert(value);
    }

    if let Ok(pwd) = env::current_dir() {
        variables
            .entry("PWD".to_string())
            .or_insert_with(|| pwd.to_string_lossy().to_string());
    }
}

fn variable_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}|\$([A-Za-z_][A-Za-z0-9_]*)\b").unwrap()
    })
}

fn substitute_variables(text: &str, variables: &HashMap<String, String>) -> String {
    variable_pattern()
        .replace_all(text, |caps: &regex::Captures| {
            let name = caps
                .get(1)
                .or_else(|| caps.get(2))
                .map(|m| m.as_str())
                .unwrap_or_default();
            variables
                .get(name)
                .cloned()
                .unwrap_or_else(|| caps[0].to_string())
        })
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RaskError;

    fn parse(contents: &str) -> Result<Registry> {
        let taskfile: Taskfile = toml::from_str(contents).map_err(RaskError::from)?;
        build_registry(taskfile)
    }

    #[test]
    fn loads_tasks_with_prerequisites_and_defaults() {
        let registry = parse(
            r#"
            [config]
            default = ["test", "run"]

            [task.test]
            description = "build and run tests"
            commands = ["dub clean", "dub test"]

            [task.run]
            prerequisites = ["test"]
            commands = "dub run"
            "#,
        )
        .unwrap();

        let test = registry.get("test").unwrap();
        assert_eq!(test.description.as_deref(), Some("build and run tests"));
        assert_eq!(test.commands.to_vec(), vec!["dub clean", "dub test"]);

        let run = registry.get("run").unwrap();
        assert_eq!(run.prerequisites, vec!["test"]);
        assert_eq!(run.commands.to_vec(), vec!["dub run"]);

        assert_eq!(registry.default_targets(), ["test", "run"]);
    }

    #[test]
    fn default_accepts_a_single_name() {
        let registry = parse(
            r#"
            [config]
            default = "build"

            [task.build]
            commands = "true"
            "#,
        )
        .unwrap();

        assert_eq!(registry.default_targets(), ["build"]);
    }

    #[test]
    fn task_named_default_becomes_the_default_target() {
        let registry = parse(
            r#"
            [task.default]
            prerequisites = ["build"]

            [task.build]
            commands = "true"
            "#,
        )
        .unwrap();

        assert_eq!(registry.default_targets(), ["default"]);
    }

    #[test]
    fn no_default_at_all_leaves_targets_empty() {
        let registry = parse(
            r#"
            [task.build]
            commands = "true"
            "#,
        )
        .unwrap();

        assert!(registry.default_targets().is_empty());
    }

    #[test]
    fn explicit_id_collision_is_a_duplicate() {
        let err = parse(
            r#"
            [task.build]
            commands = "true"

            [task.compile]
            id = "build"
            commands = "true"
            "#,
        )
        .unwrap_err();

        assert!(matches!(err, RaskError::DuplicateTask(name) if name == "build"));
    }

    #[test]
    fn unknown_prerequisite_is_rejected_at_load() {
        let err = parse(
            r#"
            [task.build]
            prerequisites = ["generate"]
            commands = "true"
            "#,
        )
        .unwrap_err();

        assert!(matches!(err, RaskError::UnknownTask { name, .. } if name == "generate"));
    }

    #[test]
    fn variables_are_substituted_into_commands() {
        let registry = parse(
            r#"
            [variables]
            TOOL = "dub"

            [task.test]
            commands = ["${TOOL} clean", "$TOOL test", "echo $MISSING"]
            "#,
        )
        .unwrap();

        assert_eq!(
            registry.get("test").unwrap().commands.to_vec(),
            vec!["dub clean", "dub test", "echo $MISSING"]
        );
    }

    #[test]
    fn environment_is_exposed_with_env_prefix() {
        // SAFETY: tests in this module do not race on this variable.
        unsafe { env::set_var("RASK_CONFIG_TEST", "ok") };

        let registry = parse(
            r#"
            [task.show]
            commands = "echo ${ENV_RASK_CONFIG_TEST}"
            "#,
        )
        .unwrap();

        assert_eq!(
            registry.get("show").unwrap().commands.to_vec(),
            vec!["echo ok"]
        );
    }
}
