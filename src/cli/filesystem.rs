use std::fs;
use std::io::Read;
use std::path::PathBuf;

pub const STDIN_PATH: &str = "-";

pub struct FileSystem {
    root_directory: PathBuf,
}

impl FileSystem {
    pub fn new(root_directory: PathBuf) -> Self {
        Self { root_directory }
    }

    pub fn get_root_directory_path(&self) -> String {
        self.root_directory.display().to_string()
    }

    pub fn is_file(&self, path: &str) -> bool {
        let path = self.root_directory.join(path);
        path.is_file()
    }

    pub fn path_exists(&self, path: &str) -> bool {
        let path = self.root_directory.join(path);
        path.exists()
    }

    /// Reads a file relative to the root directory, or stdin for `-`.
    pub fn read_file(&self, path: &str) -> Result<String, String> {
        if path == STDIN_PATH {
            let mut contents = String::new();
            return std::io::stdin()
                .read_to_string(&mut contents)
                .map(|_| contents)
                .map_err(|e| format!("Couldn't read stdin: {}", e));
        }
        if !self.is_file(path) {
            return Err(format!(
                "No file {} in {}",
                path,
                self.get_root_directory_path()
            ));
        }
        fs::read_to_string(self.root_directory.join(path))
            .map_err(|e| format!("Couldn't read {}: {}", path, e))
    }
}
