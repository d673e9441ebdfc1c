//! Info command: describe the host and the flags read from the environment.

use crate::output::OutputFormatter;
use crate::output::SystemSummary;
use anyhow::Context;
use anyhow::Result;
use flib_core::Environment;
use flib_core::system::SystemInfo;

fn summarize(system: &SystemInfo, env: &Environment) -> SystemSummary {
    let os = system.os();
    SystemSummary {
        os: os.name(),
        posix: os.is_posix(),
        machine: system.machine().to_string(),
        architecture: system.architecture().ok().map(|arch| arch.to_string()),
        pointer_width: system.pointer_width(),
        config_dir: os.user_config_dir().map(|p| p.display().to_string()),
        data_dir: os.user_data_dir().map(|p| p.display().to_string()),
        ci: env.ci(),
        debug: env.debug(),
        verbose: env.verbose(),
    }
}

pub fn execute(formatter: &dyn OutputFormatter) -> Result<()> {
    let env = Environment::from_process().context("failed to read the process environment")?;
    formatter.format_system_info(&summarize(SystemInfo::current(), &env))
}

#[cfg(test)]
mod tests {
    use super::*;
    use flib_core::system::OsInfo;

    #[test]
    fn test_summarize_known_machine() {
        let system = SystemInfo::new("aarch64", 64, OsInfo::from_system("Darwin", true));
        let env = Environment::new([("CI", "1")], "/");

        let summary = summarize(&system, &env);
        assert_eq!(summary.os, "darwin");
        assert!(summary.posix);
        assert_eq!(summary.architecture.as_deref(), Some("arm64"));
        assert_eq!(summary.pointer_width, 64);
        assert!(summary.ci);
        assert!(!summary.debug);
    }

    #[test]
    fn test_summarize_unknown_machine() {
        let system = SystemInfo::new("riscv64", 64, OsInfo::from_system("Linux", true));
        let env = Environment::new(Vec::<(String, String)>::new(), "/");

        let summary = summarize(&system, &env);
        assert_eq!(summary.architecture, None);
        assert_eq!(summary.machine, "riscv64");
    }
}
