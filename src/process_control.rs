use std::{
    path::{Path, PathBuf},
    process::{Child, Command, Stdio},
    time::{Duration, Instant},
};

use crate::{
    append_launch_log, append_launch_warning, launch_plan::build_debug_command, LauncherError,
    ProcessStatus,
};

/// A launched game. Dropping the handle leaves the process running.
#[derive(Debug)]
pub struct ProcessHandle {
    child: Child,
    command: String,
    started_at: Instant,
}

impl ProcessHandle {
    pub fn pid(&self) -> u32 {
        self.child.id()
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    pub fn elapsed(&self) -> Duration {
        self.started_at.elapsed()
    }
}

/// Anchors a program given with a directory part to the current directory, since the child
/// runs from that directory. Bare names stay as they are for the `PATH` lookup.
fn spawnable_program_path(program: &Path) -> std::io::Result<PathBuf> {
    let has_dir = program
        .parent()
        .is_some_and(|dir| !dir.as_os_str().is_empty());
    if has_dir {
        std::path::absolute(program)
    } else {
        Ok(program.to_path_buf())
    }
}

fn detached_command(args: &[String]) -> Result<(Command, String), LauncherError> {
    let Some((program, rest)) = args.split_first() else {
        return Err(LauncherError::InvalidRequest(
            "argument vector is empty".to_string(),
        ));
    };

    let program_path = spawnable_program_path(Path::new(program))
        .map_err(|source| spawn_failed(build_debug_command(args), source))?;

    let mut command = Command::new(&program_path);
    command
        .args(rest)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null());

    if let Some(parent) = program_path.parent().filter(|dir| dir.is_dir()) {
        command.current_dir(parent);
    }

    #[cfg(windows)]
    {
        use std::os::windows::process::CommandExt;
        const CREATE_NEW_PROCESS_GROUP: u32 = 0x0000_0200;
        command.creation_flags(CREATE_NEW_PROCESS_GROUP);
    }

    Ok((command, build_debug_command(args)))
}

fn spawn_failed(command: String, source: std::io::Error) -> LauncherError {
    append_launch_warning(&format!("failed to start {command}: {source}"));
    LauncherError::Spawn { command, source }
}

/// Starts `args[0]` with the remaining arguments and returns without waiting.
pub fn launch(args: &[String]) -> Result<ProcessHandle, LauncherError> {
    let (mut command, debug_command) = detached_command(args)?;
    let child = command
        .spawn()
        .map_err(|source| spawn_failed(debug_command.clone(), source))?;
    append_launch_log(&format!("started pid {}: {}", child.id(), debug_command));

    Ok(ProcessHandle {
        child,
        command: debug_command,
        started_at: Instant::now(),
    })
}

/// Point-in-time liveness check; never blocks.
pub fn poll(handle: &mut ProcessHandle) -> ProcessStatus {
    match handle.child.try_wait() {
        Ok(None) => ProcessStatus::Running,
        Ok(Some(status)) => {
            append_launch_log(&format!(
                "pid {} exited after {}s: {}",
                handle.pid(),
                handle.elapsed().as_secs(),
                status
            ));
            ProcessStatus::ExitedWithCode(status.code())
        }
        Err(error) => {
            append_launch_warning(&format!(
                "failed to poll pid {}: {}; treating it as exited",
                handle.pid(),
                error
            ));
            ProcessStatus::ExitedWithCode(None)
        }
    }
}

/// Starts a helper process and forgets about it. Returns its pid.
pub fn spawn_detached(args: &[String]) -> Result<u32, LauncherError> {
    let (mut command, debug_command) = detached_command(args)?;
    let child = command
        .spawn()
        .map_err(|source| spawn_failed(debug_command.clone(), source))?;
    let pid = child.id();
    append_launch_log(&format!("started helper pid {pid}: {debug_command}"));
    Ok(pid)
}
