//! Profile service - registers HBCI users through aqhbci-tool4
//!
//! Every operation is a one-shot, blocking action. All state lives on disk:
//! the tool's configuration directory and the PIN staging file.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::adapters::settings_file::SubstringSettingsLocator;
use crate::domain::result::{Error, Result};
use crate::domain::{HttpVersion, User};
use crate::ports::{CommandRunner, SettingsLocator};
use crate::services::http_version::rewrite_http_version;

/// Where aqhbci-tool4 keeps its configuration when no `-C` is given
///
/// Settings file lookup without a configuration directory searches here,
/// not relative to the current working directory.
pub fn default_tool_config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".aqbanking"))
}

/// Manages HBCI user profiles in an aqhbci configuration directory
pub struct ProfileManager {
    config_dir: Option<PathBuf>,
    pin_file: Option<PathBuf>,
    runner: Arc<dyn CommandRunner>,
    locator: Arc<dyn SettingsLocator>,
}

impl ProfileManager {
    pub fn new(
        config_dir: Option<PathBuf>,
        pin_file: Option<PathBuf>,
        runner: Arc<dyn CommandRunner>,
    ) -> Self {
        Self {
            config_dir,
            pin_file,
            runner,
            locator: Arc::new(SubstringSettingsLocator::new()),
        }
    }

    /// Replace the settings file lookup strategy
    pub fn with_locator(mut self, locator: Arc<dyn SettingsLocator>) -> Self {
        self.locator = locator;
        self
    }

    pub fn config_dir(&self) -> Option<&Path> {
        self.config_dir.as_deref()
    }

    pub fn pin_file(&self) -> Option<&Path> {
        self.pin_file.as_deref()
    }

    /// Name of the external tool program
    pub fn program(&self) -> &str {
        self.runner.program()
    }

    /// Delete the configuration directory and the PIN file
    ///
    /// Only defined for an explicit configuration directory so that the
    /// tool's default location is never wiped. Missing paths are fine.
    pub fn reset(&self) -> Result<()> {
        let config_dir = self
            .config_dir
            .as_deref()
            .ok_or_else(|| Error::config("reset without a configuration directory is not supported"))?;

        remove_path(config_dir)?;
        if let Some(pin_file) = &self.pin_file {
            remove_path(pin_file)?;
        }
        Ok(())
    }

    /// Register `user` with the external tool and force its HTTP version
    ///
    /// The profile created by the tool is kept even when the HTTP version
    /// patch fails afterwards.
    pub fn add_user(&self, user: &User) -> Result<()> {
        self.run_tool(&self.add_user_args(user))?;
        self.set_http_version(user)
    }

    /// Stage the user's PIN and fetch the system ID from the bank
    ///
    /// The PIN file is left on disk afterwards.
    pub fn get_sys_id(&self, user: &User) -> Result<()> {
        let pin_file = self
            .pin_file
            .as_deref()
            .ok_or_else(|| Error::config("getting the system ID without a PIN file is not supported"))?;

        let pin_line = format!("PIN_{}_{} = \"{}\"", user.bank_code, user.id, user.pin);
        write_private(pin_file, pin_line.as_bytes())?;

        self.run_tool(&self.get_sys_id_args(pin_file))?;
        Ok(())
    }

    /// All user settings files in lookup order
    pub fn settings_files(&self) -> Result<Vec<PathBuf>> {
        match self.tool_config_dir() {
            Some(dir) => self.locator.list(&dir),
            None => Ok(Vec::new()),
        }
    }

    fn set_http_version(&self, user: &User) -> Result<()> {
        let version = HttpVersion::parse(&user.http_version)?;

        let config_dir = self
            .tool_config_dir()
            .ok_or_else(|| Error::not_found("no configuration directory to search for user file"))?;
        let file = self.locator.locate(&config_dir, &user.id, &user.bank_code)?;

        let data = fs::read(&file)?;
        write_private(&file, &rewrite_http_version(&data, &version))?;
        Ok(())
    }

    fn tool_config_dir(&self) -> Option<PathBuf> {
        self.config_dir.clone().or_else(default_tool_config_dir)
    }

    fn scope_args(&self) -> Vec<String> {
        match &self.config_dir {
            Some(dir) => vec!["-C".to_string(), dir.to_string_lossy().into_owned()],
            None => Vec::new(),
        }
    }

    fn add_user_args(&self, user: &User) -> Vec<String> {
        let mut args = self.scope_args();
        args.push("adduser".to_string());

        let flags = [
            ("-N", &user.name),
            ("-u", &user.id),
            ("-b", &user.bank_code),
            ("-s", &user.server_url),
            ("-t", &user.token_type),
        ];
        for (flag, value) in flags {
            if !value.is_empty() {
                args.push(flag.to_string());
                args.push(value.clone());
            }
        }
        if !user.hbci_version.is_empty() {
            args.push(format!("--hbciversion={}", user.hbci_version));
        }
        args
    }

    fn get_sys_id_args(&self, pin_file: &Path) -> Vec<String> {
        let mut args = self.scope_args();
        args.extend([
            "-P".to_string(),
            pin_file.to_string_lossy().into_owned(),
            "-A".to_string(),
            "-n".to_string(),
            "getsysid".to_string(),
        ]);
        args
    }

    fn run_tool(&self, args: &[String]) -> Result<String> {
        let out = self.runner.run(args)?;
        if !out.success {
            return Err(Error::external_tool(out.status, out.output));
        }
        Ok(out.output)
    }
}

/// Remove a file or directory tree; a missing path is not an error
fn remove_path(path: &Path) -> io::Result<()> {
    match fs::symlink_metadata(path) {
        Ok(meta) if meta.is_dir() => fs::remove_dir_all(path),
        Ok(_) => fs::remove_file(path),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e),
    }
}

/// Overwrite `path` with `data`, readable and writable by the owner only
fn write_private(path: &Path, data: &[u8]) -> io::Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = options.open(path)?;
    file.write_all(data)?;

    // mode() only applies to newly created files
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.set_permissions(fs::Permissions::from_mode(0o600))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use tempfile::tempdir;

    use crate::adapters::settings_file::users_dir;
    use crate::ports::CommandOutput;

    /// Records arguments and answers with a canned output
    struct RecordingRunner {
        calls: Mutex<Vec<Vec<String>>>,
        response: CommandOutput,
    }

    impl RecordingRunner {
        fn new(response: CommandOutput) -> Arc<Self> {
            Arc::new(Self {
                calls: Mutex::new(Vec::new()),
                response,
            })
        }

        fn calls(&self) -> Vec<Vec<String>> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl CommandRunner for RecordingRunner {
        fn program(&self) -> &str {
            "aqhbci-tool4"
        }

        fn run(&self, args: &[String]) -> io::Result<CommandOutput> {
            self.calls.lock().unwrap().push(args.to_vec());
            Ok(self.response.clone())
        }
    }

    fn strings(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn full_user() -> User {
        User::new("U1", "B1")
            .with_name("Jane Doe")
            .with_server_url("https://hbci.example.com")
            .with_token_type("pintan")
            .with_hbci_version("300")
            .with_http_version("1.1")
            .with_pin("1234")
    }

    #[test]
    fn test_add_user_args_all_fields() {
        let runner = RecordingRunner::new(CommandOutput::ok(""));
        let manager = ProfileManager::new(Some(PathBuf::from("/tmp/aqconf")), None, runner);

        assert_eq!(
            manager.add_user_args(&full_user()),
            strings(&[
                "-C",
                "/tmp/aqconf",
                "adduser",
                "-N",
                "Jane Doe",
                "-u",
                "U1",
                "-b",
                "B1",
                "-s",
                "https://hbci.example.com",
                "-t",
                "pintan",
                "--hbciversion=300",
            ])
        );
    }

    #[test]
    fn test_add_user_args_omit_empty_fields() {
        let runner = RecordingRunner::new(CommandOutput::ok(""));
        let manager = ProfileManager::new(None, None, runner);

        assert_eq!(
            manager.add_user_args(&User::new("U1", "")),
            strings(&["adduser", "-u", "U1"])
        );
    }

    #[test]
    fn test_get_sys_id_args() {
        let runner = RecordingRunner::new(CommandOutput::ok(""));
        let manager = ProfileManager::new(Some(PathBuf::from("conf")), None, runner);

        assert_eq!(
            manager.get_sys_id_args(Path::new("pin")),
            strings(&["-C", "conf", "-P", "pin", "-A", "-n", "getsysid"])
        );
    }

    #[test]
    fn test_reset_without_config_dir_fails() {
        let dir = tempdir().unwrap();
        let pin = dir.path().join("pin");
        fs::write(&pin, "x").unwrap();

        let runner = RecordingRunner::new(CommandOutput::ok(""));
        let manager = ProfileManager::new(None, Some(pin.clone()), runner.clone());

        let err = manager.reset().unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(pin.exists());
        assert!(runner.calls().is_empty());
    }

    #[test]
    fn test_reset_removes_dir_and_pin_file() {
        let dir = tempdir().unwrap();
        let conf = dir.path().join("aqconf");
        let pin = dir.path().join("aqpin");
        fs::create_dir_all(users_dir(&conf)).unwrap();
        fs::write(users_dir(&conf).join("u.conf"), "x").unwrap();
        fs::write(&pin, "x").unwrap();

        let runner = RecordingRunner::new(CommandOutput::ok(""));
        let manager = ProfileManager::new(Some(conf.clone()), Some(pin.clone()), runner);

        manager.reset().unwrap();
        assert!(!conf.exists());
        assert!(!pin.exists());

        // Idempotent
        manager.reset().unwrap();
    }

    #[test]
    fn test_add_user_failure_wraps_output() {
        let dir = tempdir().unwrap();
        let runner = RecordingRunner::new(CommandOutput::failed(1, "bad bank code"));
        let manager = ProfileManager::new(Some(dir.path().to_path_buf()), None, runner);

        let err = manager.add_user(&full_user()).unwrap_err();
        assert!(matches!(err, Error::ExternalTool { .. }));
        assert!(err.to_string().contains("bad bank code"));
    }

    #[test]
    fn test_add_user_patches_http_version() {
        let dir = tempdir().unwrap();
        let users = users_dir(dir.path());
        fs::create_dir_all(&users).unwrap();
        let file = users.join("user.conf");
        fs::write(&file, "userId=\"U1\"\nbankCode=\"B1\"\nhttpVMajor=\"9\"\nhttpVMinor=\"9\"\n").unwrap();
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&file, fs::Permissions::from_mode(0o644)).unwrap();
        }

        let runner = RecordingRunner::new(CommandOutput::ok(""));
        let manager = ProfileManager::new(Some(dir.path().to_path_buf()), None, runner.clone());

        manager
            .add_user(&User::new("U1", "B1").with_http_version("1.2"))
            .unwrap();

        assert_eq!(
            fs::read_to_string(&file).unwrap(),
            "userId=\"U1\"\nbankCode=\"B1\"\nhttpVMajor=\"1\"\nhttpVMinor=\"2\"\n"
        );
        assert_eq!(runner.calls().len(), 1);

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = fs::metadata(&file).unwrap().permissions().mode();
            assert_eq!(mode & 0o777, 0o600);
        }
    }

    #[test]
    fn test_add_user_writes_http_version_verbatim() {
        let dir = tempdir().unwrap();
        let users = users_dir(dir.path());
        fs::create_dir_all(&users).unwrap();
        let file = users.join("user.conf");
        fs::write(&file, "U1 B1 httpVMajor=\"9\" httpVMinor=\"9\"").unwrap();

        let runner = RecordingRunner::new(CommandOutput::ok(""));
        let manager = ProfileManager::new(Some(dir.path().to_path_buf()), None, runner);

        manager
            .add_user(&User::new("U1", "B1").with_http_version("01.01"))
            .unwrap();
        assert_eq!(
            fs::read_to_string(&file).unwrap(),
            "U1 B1 httpVMajor=\"01\" httpVMinor=\"01\""
        );
    }

    /// Always answers with one fixed path, regardless of the user
    struct FixedLocator(PathBuf);

    impl SettingsLocator for FixedLocator {
        fn locate(&self, _config_dir: &Path, _user_id: &str, _bank_code: &str) -> Result<PathBuf> {
            Ok(self.0.clone())
        }

        fn list(&self, _config_dir: &Path) -> Result<Vec<PathBuf>> {
            Ok(vec![self.0.clone()])
        }
    }

    #[test]
    fn test_add_user_uses_injected_locator() {
        let dir = tempdir().unwrap();
        let users = users_dir(dir.path());
        fs::create_dir_all(&users).unwrap();
        let original = "U1 B1 httpVMajor=\"9\" httpVMinor=\"9\"";
        let first = users.join("a.conf");
        let second = users.join("b.conf");
        fs::write(&first, original).unwrap();
        fs::write(&second, original).unwrap();

        let runner = RecordingRunner::new(CommandOutput::ok(""));
        let manager = ProfileManager::new(Some(dir.path().to_path_buf()), None, runner)
            .with_locator(Arc::new(FixedLocator(second.clone())));

        manager
            .add_user(&User::new("U1", "B1").with_http_version("1.0"))
            .unwrap();

        // The substring scan would have picked a.conf
        assert_eq!(fs::read_to_string(&first).unwrap(), original);
        assert_eq!(
            fs::read_to_string(&second).unwrap(),
            "U1 B1 httpVMajor=\"1\" httpVMinor=\"0\""
        );
        assert_eq!(manager.settings_files().unwrap(), vec![second]);
    }

    #[test]
    fn test_lookup_without_config_dir_uses_home_default() {
        let runner = RecordingRunner::new(CommandOutput::ok(""));
        let manager = ProfileManager::new(None, None, runner);

        let expected = default_tool_config_dir();
        assert_eq!(manager.tool_config_dir(), expected);
        if let Some(dir) = expected {
            assert!(dir.ends_with(".aqbanking"));
            assert!(dir.is_absolute());
        }
    }

    #[test]
    fn test_add_user_invalid_http_version_leaves_file() {
        let dir = tempdir().unwrap();
        let users = users_dir(dir.path());
        fs::create_dir_all(&users).unwrap();
        let file = users.join("user.conf");
        let original = "U1 B1 httpVMajor=\"2\" httpVMinor=\"1\"";
        fs::write(&file, original).unwrap();

        let runner = RecordingRunner::new(CommandOutput::ok(""));
        let manager = ProfileManager::new(Some(dir.path().to_path_buf()), None, runner);

        for bad in ["1", "1.2.3", ""] {
            let err = manager
                .add_user(&User::new("U1", "B1").with_http_version(bad))
                .unwrap_err();
            assert!(matches!(err, Error::Validation(_)));
            assert_eq!(fs::read_to_string(&file).unwrap(), original);
        }
    }

    #[test]
    fn test_add_user_without_settings_file_is_not_found() {
        let dir = tempdir().unwrap();
        let runner = RecordingRunner::new(CommandOutput::ok(""));
        let manager = ProfileManager::new(Some(dir.path().to_path_buf()), None, runner);

        let err = manager
            .add_user(&User::new("U1", "B1").with_http_version("1.1"))
            .unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[test]
    fn test_get_sys_id_without_pin_file_fails_before_running() {
        let runner = RecordingRunner::new(CommandOutput::ok(""));
        let manager = ProfileManager::new(None, None, runner.clone());

        let err = manager.get_sys_id(&full_user()).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(runner.calls().is_empty());
    }

    #[test]
    fn test_get_sys_id_writes_pin_file() {
        let dir = tempdir().unwrap();
        let pin = dir.path().join("aqpin");
        fs::write(&pin, "stale content that is longer than the new line").unwrap();

        let runner = RecordingRunner::new(CommandOutput::ok("system id fetched"));
        let manager = ProfileManager::new(None, Some(pin.clone()), runner.clone());

        manager.get_sys_id(&full_user()).unwrap();

        assert_eq!(fs::read_to_string(&pin).unwrap(), "PIN_B1_U1 = \"1234\"");
        assert_eq!(
            runner.calls(),
            vec![vec![
                "-P".to_string(),
                pin.to_string_lossy().into_owned(),
                "-A".to_string(),
                "-n".to_string(),
                "getsysid".to_string(),
            ]]
        );

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = fs::metadata(&pin).unwrap().permissions().mode();
            assert_eq!(mode & 0o777, 0o600);
        }
    }

    #[test]
    fn test_get_sys_id_failure_wraps_output() {
        let dir = tempdir().unwrap();
        let runner = RecordingRunner::new(CommandOutput::failed(3, "no connection"));
        let manager = ProfileManager::new(None, Some(dir.path().join("pin")), runner);

        let err = manager.get_sys_id(&full_user()).unwrap_err();
        assert!(err.to_string().contains("no connection"));
    }

    #[test]
    fn test_settings_files_lists_conf_files() {
        let dir = tempdir().unwrap();
        let users = users_dir(dir.path());
        fs::create_dir_all(&users).unwrap();
        fs::write(users.join("a.conf"), "").unwrap();
        fs::write(users.join("notes.txt"), "").unwrap();

        let runner = RecordingRunner::new(CommandOutput::ok(""));
        let manager = ProfileManager::new(Some(dir.path().to_path_buf()), None, runner);

        assert_eq!(manager.settings_files().unwrap(), vec![users.join("a.conf")]);
    }
}
