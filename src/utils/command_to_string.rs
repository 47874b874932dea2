use itertools::Itertools;

/// Render a prepared process as one shell-like line, for logging
pub fn command_to_string(cmd: &std::process::Command) -> String {
    let program = cmd.get_program().to_string_lossy();
    let args = cmd.get_args().map(|arg| arg.to_string_lossy()).join(" ");
    format!("{} {}", program, args)
}

/// Same rendering for an argument list that has not been turned into a process yet
pub fn args_to_string(args: &[String]) -> String {
    args.iter().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_program_and_args() {
        let mut cmd = std::process::Command::new("salmon");
        cmd.arg("quant").arg("-p").arg("4");
        assert_eq!(command_to_string(&cmd), "salmon quant -p 4");
        assert_eq!(
            args_to_string(&["fastp".to_string(), "-w".to_string(), "2".to_string()]),
            "fastp -w 2"
        );
    }
}
