//! External tool names and registry limits

/// Default number of files a project may hold
pub const DEFAULT_MAX_FILES: usize = 10;

/// Flag passed to the leak checker ahead of the executable
pub const LEAK_CHECK_FLAG: &str = "--leak-check=full";

/// Programs the manager delegates to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toolchain {
    /// Interactive editor, invoked as `<editor> <file>`
    pub editor: String,
    /// Compiler, invoked as `<compiler> -c <src> -o <obj>`
    pub compiler: String,
    /// Compiler driver used for linking, invoked as `<linker> -o <exe> <objs...>`
    pub linker: String,
    /// Interactive debugger, invoked as `<debugger> <exe>`
    pub debugger: String,
    /// Memory checker, invoked as `<memcheck> --leak-check=full <exe> <args...>`
    pub memcheck: String,
}

impl Default for Toolchain {
    fn default() -> Self {
        Self {
            editor: "vim".to_string(),
            compiler: "gcc".to_string(),
            linker: "gcc".to_string(),
            debugger: "gdb".to_string(),
            memcheck: "valgrind".to_string(),
        }
    }
}

/// Session configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub toolchain: Toolchain,
    pub max_files: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            toolchain: Toolchain::default(),
            max_files: DEFAULT_MAX_FILES,
        }
    }
}
