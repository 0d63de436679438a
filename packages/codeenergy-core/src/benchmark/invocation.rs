//! Per-language execution conventions
//!
//! Every sample receives its input size as the single trailing argument.

use std::path::Path;

use crate::config::BenchmarkConfig;
use crate::errors::{EnergyError, Result};
use crate::features::process_measure::CommandLine;
use crate::shared::models::Language;

/// How one sample is run at one input size
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Run once per sample before any measurement
    pub compile: Option<CommandLine>,
    pub run: CommandLine,
}

impl Invocation {
    /// # Errors
    ///
    /// `EnergyError::Configuration` if a JVM source path has no file stem to
    /// use as the class name.
    pub fn for_language(
        language: Language,
        source_path: &Path,
        input_size: u64,
        config: &BenchmarkConfig,
    ) -> Result<Self> {
        let path = source_path.display().to_string();
        let size = input_size.to_string();

        let invocation = match language {
            Language::PythonicIndent => Self {
                compile: None,
                run: CommandLine::new(&config.python, [path, size]),
            },
            Language::BraceBased => Self {
                compile: None,
                run: CommandLine::new(&config.node, [path, size]),
            },
            Language::JvmLike => {
                let class_name = source_path
                    .file_stem()
                    .and_then(|stem| stem.to_str())
                    .ok_or_else(|| {
                        EnergyError::config(format!("no class name in '{}'", path))
                    })?;
                let class_dir = match source_path.parent() {
                    Some(dir) if !dir.as_os_str().is_empty() => dir.display().to_string(),
                    _ => ".".to_string(),
                };
                Self {
                    compile: Some(CommandLine::new(&config.javac, [path.clone()])),
                    run: CommandLine::new(
                        &config.java,
                        ["-cp".to_string(), class_dir, class_name.to_string(), size],
                    ),
                }
            }
        };
        Ok(invocation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_script_invocations() {
        let config = BenchmarkConfig::default();
        let inv = Invocation::for_language(
            Language::PythonicIndent,
            &PathBuf::from("samples/sort.py"),
            400,
            &config,
        )
        .unwrap();
        assert!(inv.compile.is_none());
        assert_eq!(inv.run, CommandLine::new("python3", ["samples/sort.py", "400"]));

        let inv =
            Invocation::for_language(Language::BraceBased, &PathBuf::from("a.js"), 100, &config)
                .unwrap();
        assert_eq!(inv.run.program, "node");
    }

    #[test]
    fn test_jvm_compiles_then_runs_class() {
        let config = BenchmarkConfig::default();
        let inv = Invocation::for_language(
            Language::JvmLike,
            &PathBuf::from("samples/java/Fib.java"),
            1600,
            &config,
        )
        .unwrap();

        assert_eq!(
            inv.compile,
            Some(CommandLine::new("javac", ["samples/java/Fib.java"]))
        );
        assert_eq!(
            inv.run,
            CommandLine::new("java", ["-cp", "samples/java", "Fib", "1600"])
        );

        let inv =
            Invocation::for_language(Language::JvmLike, &PathBuf::from("Main.java"), 1, &config)
                .unwrap();
        assert_eq!(inv.run.args[1], ".");
    }
}
